use tracing::warn;

use crate::llm::CompletionBackend;
use crate::product::LlmRow;
use crate::prompt::PromptRequest;

const SYSTEM_PROMPT: &str = "You are a highly skilled shopping assistant with expertise in comparing products and summarizing findings. \
Your task is to analyze product data and generate a detailed summary in valid HTML format.";

const FORMAT_PROMPT: &str = "Your response should include the following sections, each in valid HTML format:\n\
<h3>Best Value Product</h3>: Identify the product with the best price-to-value ratio. Explain your reasoning.\n\
<h3>Highest Rated Option</h3>: Highlight the product with the highest user rating and explain why it stands out.\n\
<h3>Unique Features</h3>: List any unique features of specific products and why they are beneficial.\n\
<h3>Trade-offs and Comparisons</h3>: Discuss trade-offs among the products, considering price, ratings, and reviews.\n\
<h3>Conclusion and Suggestion</h3>: Provide a recommendation for the best product or approach, with justification.\n\
If any section lacks sufficient data, explain the limitations explicitly but still include the section.\n\
Use <ul> for lists and <li> for each item where applicable.";

/// Headings every summary must contain, in document order.
pub const REQUIRED_SECTIONS: [&str; 5] = [
    "<h3>Best Value Product</h3>",
    "<h3>Highest Rated Option</h3>",
    "<h3>Unique Features</h3>",
    "<h3>Trade-offs and Comparisons</h3>",
    "<h3>Conclusion and Suggestion</h3>",
];

const FALLBACK_SUMMARY: &str = "<h3>Summary Unavailable</h3><p>An error occurred while generating the summary. Please try again later.</p>";

pub struct SummaryGenerator<C> {
    llm: C,
}

impl<C: CompletionBackend> SummaryGenerator<C> {
    pub fn new(llm: C) -> Self {
        Self { llm }
    }

    /// Generate the HTML comparison summary for the given plain-text rows.
    ///
    /// Always returns a document containing all five required headings.
    /// Transport failures degrade to a fixed fallback document; nothing
    /// propagates to the caller.
    pub async fn generate(&self, rows: &[LlmRow]) -> String {
        let records = serde_json::to_string(rows).unwrap_or_else(|_| "[]".to_string());
        let user_prompt = format!("Here is the product information in JSON format:\n{}", records);
        let prompt = PromptRequest::new(SYSTEM_PROMPT, FORMAT_PROMPT, user_prompt);

        match self.llm.complete(&prompt.render()).await {
            Ok(text) => repair_sections(text.trim()),
            Err(e) => {
                warn!("summary generation failed: {e:#}");
                FALLBACK_SUMMARY.to_string()
            }
        }
    }
}

/// Append a fallback block for every required heading the model omitted.
///
/// Detection is a case-sensitive exact substring match on purpose: what
/// counts as "present" has to be predictable, so a heading that differs in
/// case or spacing gets its fallback block rather than a fuzzy match.
fn repair_sections(summary: &str) -> String {
    let mut out = summary.to_string();
    for section in REQUIRED_SECTIONS {
        if !out.contains(section) {
            out.push_str(&format!(
                "\n{}\n<p>Data unavailable for this section.</p>",
                section
            ));
        }
    }
    out
}
