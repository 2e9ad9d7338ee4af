use tracing::warn;

use crate::llm::CompletionBackend;
use crate::prompt::PromptRequest;

const SYSTEM_PROMPT: &str = "You are an expert at identifying ISO 3166-1 alpha-2 country codes from locations. \
Output only the two-letter country code (e.g., 'US' for United States) for the provided location, \
without any additional text or explanations.";

const FORMAT_PROMPT: &str = "Output the ISO 3166-1 alpha-2 country code only.";

pub struct CountryResolver<C> {
    llm: C,
}

impl<C: CompletionBackend> CountryResolver<C> {
    pub fn new(llm: C) -> Self {
        Self { llm }
    }

    /// Resolve a free-text location to an uppercase alpha-2 country code.
    ///
    /// Geo-targeting is best effort: any transport failure or unusable
    /// model output returns `None` with a warning instead of an error.
    pub async fn resolve(&self, location: &str) -> Option<String> {
        let prompt = PromptRequest::new(
            SYSTEM_PROMPT,
            FORMAT_PROMPT,
            format!("Location: {}", location),
        );

        let response = match self.llm.complete(&prompt.render()).await {
            Ok(text) => text,
            Err(e) => {
                warn!("country code lookup failed: {e:#}");
                return None;
            }
        };

        let code = response.trim();
        if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(code.to_ascii_uppercase())
        } else {
            warn!("invalid country code returned: {code:?}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::stub::StubLlm;

    #[tokio::test]
    async fn accepts_and_uppercases_two_letter_codes() {
        for (reply, expected) in [("us", "US"), ("De", "DE"), ("  jp \n", "JP")] {
            let resolver = CountryResolver::new(StubLlm::with_reply(reply));
            assert_eq!(resolver.resolve("somewhere").await.as_deref(), Some(expected));
        }
    }

    #[tokio::test]
    async fn rejects_anything_but_two_alphabetic_chars() {
        for reply in ["USA", "U", "u1", "", "The code is US", "ü2"] {
            let resolver = CountryResolver::new(StubLlm::with_reply(reply));
            assert_eq!(resolver.resolve("somewhere").await, None, "reply {reply:?}");
        }
    }

    #[tokio::test]
    async fn transport_failure_yields_none() {
        let resolver = CountryResolver::new(StubLlm::failing("connection refused"));
        assert_eq!(resolver.resolve("Berlin").await, None);
    }

    #[tokio::test]
    async fn prompt_names_the_location() {
        let stub = StubLlm::with_reply("DE");
        let resolver = CountryResolver::new(stub.clone());
        resolver.resolve("Berlin, Germany").await;

        let prompts = stub.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Human: Location: Berlin, Germany"));
        assert!(prompts[0].contains("ISO 3166-1 alpha-2"));
    }
}
