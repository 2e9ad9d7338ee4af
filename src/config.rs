use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub watsonx_url: String,
    pub watsonx_api_key: String,
    pub watsonx_project_id: String,
    pub model_id: String,
    pub max_new_tokens: u32,
    pub repetition_penalty: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            watsonx_url: std::env::var("WATSONX_URL").context("WATSONX_URL must be set")?,
            watsonx_api_key: std::env::var("WATSONX_API_KEY")
                .context("WATSONX_API_KEY must be set")?,
            watsonx_project_id: std::env::var("WATSONX_PROJECT_ID")
                .context("WATSONX_PROJECT_ID must be set")?,
            model_id: std::env::var("MODEL_ID")
                .unwrap_or_else(|_| "meta-llama/llama-3-1-70b-instruct".into()),
            max_new_tokens: std::env::var("MAX_NEW_TOKENS")
                .unwrap_or_else(|_| "6000".into())
                .parse()
                .context("MAX_NEW_TOKENS must be a number")?,
            repetition_penalty: std::env::var("REPETITION_PENALTY")
                .unwrap_or_else(|_| "1".into())
                .parse()
                .context("REPETITION_PENALTY must be a number")?,
        })
    }
}
