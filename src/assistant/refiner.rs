use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::llm::CompletionBackend;
use crate::prompt::PromptRequest;

const SYSTEM_PROMPT: &str =
    "You are a highly skilled shopping assistant. Refine user queries into specific product searches.";

const FORMAT_PROMPT: &str = r#"Respond with a JSON object containing exactly two string fields:
{"refined_query": "<refined search query for the product search>", "additional_info": "<additional adjectives summarized to be added to the search query>"}
Respond with ONLY the JSON object. No other text."#;

/// Structured refinement result. Callers depend on both fields, so a
/// response that does not fit this shape is an error rather than a
/// partially-filled fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefinedQuery {
    pub refined_query: String,
    pub additional_info: String,
}

pub struct QueryRefiner<C> {
    llm: C,
}

impl<C: CompletionBackend> QueryRefiner<C> {
    pub fn new(llm: C) -> Self {
        Self { llm }
    }

    /// Refine raw user input into a structured product search.
    ///
    /// `location` is carried for geo context but not folded into the
    /// prompt yet.
    pub async fn refine(&self, user_input: &str, _location: &str) -> Result<RefinedQuery> {
        let prompt = PromptRequest::new(SYSTEM_PROMPT, FORMAT_PROMPT, user_input);
        let response = self.llm.complete(&prompt.render()).await?;
        parse_refined(&response)
    }
}

fn parse_refined(text: &str) -> Result<RefinedQuery> {
    // Models often wrap the object in prose; slice to the outermost braces
    // before parsing. The slice itself must still match the schema exactly.
    let json_str = match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    };

    serde_json::from_str(json_str).with_context(|| {
        format!(
            "refined-query response did not match the expected schema: {}",
            text.trim()
        )
    })
}
