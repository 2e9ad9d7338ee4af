pub mod watsonx;

pub use watsonx::{GenerationParams, WatsonxClient};

use anyhow::Result;
use async_trait::async_trait;

/// The single seam to the hosted text-generation service.
///
/// Generation configuration (model id, decoding, output limits) is fixed at
/// client construction, so the operation is text in, text out. Components
/// are generic over this trait so tests can script responses without a
/// network.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[cfg(test)]
pub mod stub;
