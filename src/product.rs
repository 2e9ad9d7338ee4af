use serde::{Deserialize, Serialize};

const NA: &str = "N/A";

/// Column order shared by both projections and the rendered table.
pub const COLUMNS: [&str; 9] = [
    "Name",
    "Price Now",
    "Original Price",
    "Special Offer",
    "Rating",
    "Reviews",
    "Store",
    "Delivery",
    "Image",
];

/// Raw product record as it arrives from the shopping-search payload.
///
/// Nothing is required; sparse records degrade to placeholder cells instead
/// of failing downstream rendering.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductRecord {
    pub title: Option<String>,
    pub price: Option<String>,
    pub old_price: Option<String>,
    pub extensions: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub reviews: Option<u64>,
    pub source: Option<String>,
    pub source_icon: Option<String>,
    pub delivery: Option<String>,
    pub thumbnail: Option<String>,
    pub product_link: Option<String>,
}

/// Display projection: markup-bearing cells meant for direct rendering.
#[derive(Debug, Clone)]
pub struct DisplayRow {
    pub name: String,
    pub price_now: String,
    pub original_price: String,
    pub special_offer: String,
    pub rating: String,
    pub reviews: String,
    pub store: String,
    pub delivery: String,
    pub image: String,
}

/// LLM-input projection: plain text only. Markup must never reach the
/// model, or it echoes it back mangled into the summary.
#[derive(Debug, Clone, Serialize)]
pub struct LlmRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Price Now")]
    pub price_now: String,
    #[serde(rename = "Original Price")]
    pub original_price: String,
    #[serde(rename = "Special Offer")]
    pub special_offer: String,
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Reviews")]
    pub reviews: String,
    #[serde(rename = "Store")]
    pub store: String,
    #[serde(rename = "Delivery")]
    pub delivery: String,
}

impl ProductRecord {
    fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or(NA)
    }

    fn source_text(&self) -> &str {
        self.source.as_deref().unwrap_or(NA)
    }

    fn special_offer(&self) -> String {
        match &self.extensions {
            Some(exts) if !exts.is_empty() => exts.join(", "),
            _ => "No Discount".to_string(),
        }
    }

    fn rating_text(&self) -> String {
        self.rating
            .map(|r| r.to_string())
            .unwrap_or_else(|| NA.to_string())
    }

    fn reviews_text(&self) -> String {
        self.reviews
            .map(|r| r.to_string())
            .unwrap_or_else(|| NA.to_string())
    }

    pub fn display_row(&self) -> DisplayRow {
        DisplayRow {
            name: format!(
                "<a href='{}' target='_blank'>{}</a>",
                self.product_link.as_deref().unwrap_or("#"),
                self.title_text()
            ),
            price_now: self.price.clone().unwrap_or_else(|| NA.to_string()),
            original_price: self.old_price.clone().unwrap_or_else(|| NA.to_string()),
            special_offer: self.special_offer(),
            rating: format!("{} ⭐", self.rating_text()),
            reviews: format!("{} Reviews", self.reviews_text()),
            store: format!(
                "<img src='{}' alt='{}' style='height:20px;vertical-align:middle;'/> {}",
                self.source_icon.as_deref().unwrap_or("#"),
                self.source_text(),
                self.source_text()
            ),
            delivery: self.delivery.clone().unwrap_or_else(|| NA.to_string()),
            image: format!(
                "<img src='{}' alt='Product Image' style='height:50px;'/>",
                self.thumbnail.as_deref().unwrap_or("#")
            ),
        }
    }

    pub fn llm_row(&self) -> LlmRow {
        LlmRow {
            name: self.title_text().to_string(),
            price_now: self.price.clone().unwrap_or_else(|| NA.to_string()),
            original_price: self.old_price.clone().unwrap_or_else(|| NA.to_string()),
            special_offer: self.special_offer(),
            rating: self.rating_text(),
            reviews: format!("{} Reviews", self.reviews_text()),
            store: self.source_text().to_string(),
            delivery: self.delivery.clone().unwrap_or_else(|| NA.to_string()),
        }
    }
}

/// Render display rows as an HTML table with the fixed column order.
/// Cells are not escaped: the display projection embeds its own markup.
pub fn render_table(rows: &[DisplayRow]) -> String {
    let mut html = String::from("<table>\n<thead>\n<tr>");
    for column in COLUMNS {
        html.push_str(&format!("<th>{}</th>", column));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in rows {
        html.push_str("<tr>");
        for cell in [
            &row.name,
            &row.price_now,
            &row.original_price,
            &row.special_offer,
            &row.rating,
            &row.reviews,
            &row.store,
            &row.delivery,
            &row.image,
        ] {
            html.push_str(&format!("<td>{}</td>", cell));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>");
    html
}
