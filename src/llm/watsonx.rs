use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::CompletionBackend;

/// Decoding configuration sent with every generation request. Fixed at
/// construction; the client is read-only afterwards.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub model_id: String,
    pub decoding_method: String,
    pub max_new_tokens: u32,
    pub repetition_penalty: f64,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model_id: "meta-llama/llama-3-1-70b-instruct".to_string(),
            decoding_method: "greedy".to_string(),
            max_new_tokens: 6000,
            repetition_penalty: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WatsonxClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    project_id: String,
    params: GenerationParams,
}

// watsonx.ai text-generation wire format
#[derive(Debug, Clone, Serialize)]
struct GenerationRequest {
    model_id: String,
    project_id: String,
    input: String,
    parameters: RequestParameters,
}

#[derive(Debug, Clone, Serialize)]
struct RequestParameters {
    decoding_method: String,
    max_new_tokens: u32,
    repetition_penalty: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerationResponse {
    results: Vec<GenerationResult>,
}

#[derive(Debug, Clone, Deserialize)]
struct GenerationResult {
    generated_text: String,
}

impl WatsonxClient {
    pub fn new(base_url: &str, api_key: &str, project_id: &str, params: GenerationParams) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            project_id: project_id.to_string(),
            params,
        }
    }
}

#[async_trait]
impl CompletionBackend for WatsonxClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = GenerationRequest {
            model_id: self.params.model_id.clone(),
            project_id: self.project_id.clone(),
            input: prompt.to_string(),
            parameters: RequestParameters {
                decoding_method: self.params.decoding_method.clone(),
                max_new_tokens: self.params.max_new_tokens,
                repetition_penalty: self.params.repetition_penalty,
            },
        };

        let url = format!("{}/ml/v1/text/generation?version=2023-05-29", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to watsonx.ai")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("watsonx.ai API error ({}): {}", status, body);
        }

        let api_response: GenerationResponse = response
            .json()
            .await
            .context("Failed to parse watsonx.ai response")?;

        let text = api_response
            .results
            .first()
            .map(|r| r.generated_text.as_str())
            .unwrap_or("")
            .to_string();

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_decoding_parameters() {
        let request = GenerationRequest {
            model_id: "meta-llama/llama-3-1-70b-instruct".into(),
            project_id: "proj-123".into(),
            input: "System: hi\n\nHuman: hello\nAI:".into(),
            parameters: RequestParameters {
                decoding_method: "greedy".into(),
                max_new_tokens: 6000,
                repetition_penalty: 1.0,
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model_id"], "meta-llama/llama-3-1-70b-instruct");
        assert_eq!(value["project_id"], "proj-123");
        assert_eq!(value["parameters"]["decoding_method"], "greedy");
        assert_eq!(value["parameters"]["max_new_tokens"], 6000);
    }

    #[test]
    fn response_takes_first_result() {
        let raw = r#"{"results":[{"generated_text":"US"},{"generated_text":"ignored"}]}"#;
        let parsed: GenerationResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.results.first().unwrap().generated_text, "US");
    }
}
