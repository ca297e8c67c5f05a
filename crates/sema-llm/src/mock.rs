//! Test-only mock LLM provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::LlmError;
use crate::provider::{LlmProvider, Message};

#[derive(Debug, Clone)]
pub struct MockProvider {
    pub default_response: String,
    pub embedding: Vec<f32>,
    pub fail_chat: bool,
    /// Embed calls fail with `QuotaExceeded` once this many have succeeded.
    pub embed_quota: Option<usize>,
    embed_calls: Arc<AtomicUsize>,
    chat_calls: Arc<AtomicUsize>,
    last_messages: Arc<Mutex<Vec<Message>>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            default_response: "mock response".into(),
            embedding: vec![0.1; 16],
            fail_chat: false,
            embed_quota: None,
            embed_calls: Arc::new(AtomicUsize::new(0)),
            chat_calls: Arc::new(AtomicUsize::new(0)),
            last_messages: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockProvider {
    #[must_use]
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_chat: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = embedding;
        self
    }

    #[must_use]
    pub fn with_embed_quota(mut self, quota: usize) -> Self {
        self.embed_quota = Some(quota);
        self
    }

    #[must_use]
    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }

    /// Messages passed to the most recent `chat` call.
    #[must_use]
    pub fn last_messages(&self) -> Vec<Message> {
        self.last_messages.lock().unwrap().clone()
    }
}

impl LlmProvider for MockProvider {
    async fn chat(&self, messages: &[Message]) -> Result<String, LlmError> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = messages.to_vec();
        if self.fail_chat {
            return Err(LlmError::Provider("mock chat error".into()));
        }
        Ok(self.default_response.clone())
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>, LlmError> {
        let used = self.embed_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(quota) = self.embed_quota
            && used >= quota
        {
            return Err(LlmError::QuotaExceeded);
        }
        Ok(self.embedding.clone())
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "mock"
    }

    fn supports_embeddings(&self) -> bool {
        true
    }
}
