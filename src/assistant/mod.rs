pub mod country;
pub mod refiner;
pub mod summarizer;

use anyhow::Result;

use crate::llm::CompletionBackend;
use crate::product::{render_table, ProductRecord};

use country::CountryResolver;
use refiner::{QueryRefiner, RefinedQuery};
use summarizer::SummaryGenerator;

/// Number of records considered for comparison. Callers order by
/// relevance; no re-ranking happens here.
const MAX_COMPARED: usize = 5;

const EMPTY_TABLE: &str = "<h3>No Products Found</h3>";
const EMPTY_SUMMARY: &str =
    "<h3>Summary Unavailable</h3><p>No product data available for analysis.</p>";

/// The (table, summary) pair produced for a product comparison. Both sides
/// are derived from the same top-N slice through different projections.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub table: String,
    pub summary: String,
}

pub struct Assistant<C> {
    country: CountryResolver<C>,
    refiner: QueryRefiner<C>,
    summarizer: SummaryGenerator<C>,
}

impl<C: CompletionBackend + Clone> Assistant<C> {
    pub fn new(llm: C) -> Self {
        Self {
            country: CountryResolver::new(llm.clone()),
            refiner: QueryRefiner::new(llm.clone()),
            summarizer: SummaryGenerator::new(llm),
        }
    }

    pub async fn resolve_country(&self, location: &str) -> Option<String> {
        self.country.resolve(location).await
    }

    pub async fn refine_query(&self, user_input: &str, location: &str) -> Result<RefinedQuery> {
        self.refiner.refine(user_input, location).await
    }

    /// Build the comparison table and narrative summary for the top
    /// products.
    ///
    /// `featured` and `nearby` are accepted for parity with the search
    /// payload but are not folded into the table yet. An empty product
    /// list short-circuits to a fixed empty-state pair without an LLM
    /// call.
    pub async fn compare(
        &self,
        products: &[ProductRecord],
        _featured: Option<&[ProductRecord]>,
        _nearby: Option<&[ProductRecord]>,
    ) -> ComparisonResult {
        let top = &products[..products.len().min(MAX_COMPARED)];
        if top.is_empty() {
            return ComparisonResult {
                table: EMPTY_TABLE.to_string(),
                summary: EMPTY_SUMMARY.to_string(),
            };
        }

        let display_rows: Vec<_> = top.iter().map(|p| p.display_row()).collect();
        let llm_rows: Vec<_> = top.iter().map(|p| p.llm_row()).collect();

        let summary = self.summarizer.generate(&llm_rows).await;
        let table = render_table(&display_rows);

        ComparisonResult { table, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::stub::StubLlm;

    fn product(title: &str) -> ProductRecord {
        ProductRecord {
            title: Some(title.to_string()),
            price: Some("$10".into()),
            ..ProductRecord::default()
        }
    }

    #[tokio::test]
    async fn empty_input_short_circuits_without_llm_call() {
        let stub = StubLlm::with_reply("should never be used");
        let assistant = Assistant::new(stub.clone());

        let result = assistant.compare(&[], None, None).await;

        assert_eq!(result.table, "<h3>No Products Found</h3>");
        assert_eq!(
            result.summary,
            "<h3>Summary Unavailable</h3><p>No product data available for analysis.</p>"
        );
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn only_first_five_products_are_considered() {
        let products: Vec<_> = (1..=7).map(|i| product(&format!("Product {}", i))).collect();
        let stub = StubLlm::with_reply("<p>summary</p>");
        let assistant = Assistant::new(stub.clone());

        let result = assistant.compare(&products, None, None).await;

        assert!(result.table.contains("Product 5"));
        assert!(!result.table.contains("Product 6"));
        assert!(!result.table.contains("Product 7"));

        let prompts = stub.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Product 5"));
        assert!(!prompts[0].contains("Product 6"));
    }

    #[tokio::test]
    async fn table_rows_follow_input_order() {
        let products = vec![product("Zeta"), product("Alpha")];
        let assistant = Assistant::new(StubLlm::with_reply(""));

        let result = assistant.compare(&products, None, None).await;

        let zeta = result.table.find("Zeta").unwrap();
        let alpha = result.table.find("Alpha").unwrap();
        assert!(zeta < alpha);
    }

    #[tokio::test]
    async fn summary_failure_still_yields_a_table() {
        let products = vec![product("Only One")];
        let assistant = Assistant::new(StubLlm::failing("boom"));

        let result = assistant.compare(&products, None, None).await;

        assert!(result.table.contains("Only One"));
        assert!(result.summary.contains("<h3>Summary Unavailable</h3>"));
    }
}
