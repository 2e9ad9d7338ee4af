/// Three-part prompt consumed once per LLM call.
///
/// The hosted model takes a single text blob, so system instructions,
/// format instructions, and the human turn are flattened into a fixed
/// chat-transcript layout with an empty AI turn for the model to fill in.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub system_prompt: String,
    pub format_prompt: String,
    pub user_prompt: String,
}

impl PromptRequest {
    pub fn new(
        system_prompt: impl Into<String>,
        format_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            format_prompt: format_prompt.into(),
            user_prompt: user_prompt.into(),
        }
    }

    /// Render the prompt in the layout the model was tuned on. No content
    /// validation; empty parts render as empty lines.
    pub fn render(&self) -> String {
        format!(
            "System: {}\n{}\nHuman: {}\nAI:",
            self.system_prompt, self.format_prompt, self.user_prompt
        )
    }
}
