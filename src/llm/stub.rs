use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use super::CompletionBackend;

enum Reply {
    Text(String),
    Error(String),
}

/// Scripted backend for tests. Clones share the same script and call log,
/// so a test can hand the stub to a component and still inspect the prompts
/// it received.
#[derive(Clone)]
pub struct StubLlm {
    inner: Arc<Mutex<Inner>>,
}

struct Inner {
    replies: VecDeque<Reply>,
    prompts: Vec<String>,
}

impl StubLlm {
    pub fn with_reply(text: &str) -> Self {
        Self::with_replies(vec![text])
    }

    pub fn with_replies(texts: Vec<&str>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                replies: texts.into_iter().map(|t| Reply::Text(t.to_string())).collect(),
                prompts: Vec::new(),
            })),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                replies: VecDeque::from([Reply::Error(message.to_string())]),
                prompts: Vec::new(),
            })),
        }
    }

    /// Prompts observed so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.inner.lock().unwrap().prompts.clone()
    }

    pub fn calls(&self) -> usize {
        self.inner.lock().unwrap().prompts.len()
    }
}

#[async_trait]
impl CompletionBackend for StubLlm {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut inner = self.inner.lock().unwrap();
        inner.prompts.push(prompt.to_string());
        match inner.replies.pop_front() {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Error(message)) => Err(anyhow::anyhow!(message)),
            None => Ok(String::new()),
        }
    }
}
