use std::fmt;

use crate::error::LlmError;
use crate::openai::OpenAiProvider;
use crate::provider::{LlmProvider, Message};

/// OpenAI-wire-compatible endpoint under a custom provider name.
///
/// Covers hosted providers that speak the OpenAI format on their own base
/// URL, e.g. Gemini's `/v1beta/openai` surface or Groq.
#[derive(Clone)]
pub struct CompatibleProvider {
    inner: OpenAiProvider,
    provider_name: String,
}

impl CompatibleProvider {
    #[must_use]
    pub fn new(
        provider_name: String,
        api_key: String,
        base_url: String,
        model: String,
        max_tokens: u32,
        temperature: f32,
        embedding_model: Option<String>,
    ) -> Self {
        let inner = OpenAiProvider::new(
            api_key,
            base_url,
            model,
            max_tokens,
            temperature,
            embedding_model,
        );
        Self {
            inner,
            provider_name,
        }
    }
}

impl fmt::Debug for CompatibleProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompatibleProvider")
            .field("provider_name", &self.provider_name)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

impl LlmProvider for CompatibleProvider {
    async fn chat(&self, messages: &[Message]) -> Result<String, LlmError> {
        self.inner.chat(messages).await
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, LlmError> {
        self.inner.embed(text).await
    }

    fn name(&self) -> &str {
        &self.provider_name
    }

    fn supports_embeddings(&self) -> bool {
        self.inner.supports_embeddings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_provider() -> CompatibleProvider {
        CompatibleProvider::new(
            "gemini".into(),
            "key".into(),
            "https://generativelanguage.googleapis.com/v1beta/openai".into(),
            "gemini-2.5-flash".into(),
            4096,
            0.2,
            None,
        )
    }

    #[test]
    fn name_returns_custom_provider_name() {
        assert_eq!(test_provider().name(), "gemini");
    }

    #[test]
    fn supports_embeddings_without_model() {
        assert!(!test_provider().supports_embeddings());
    }

    #[test]
    fn supports_embeddings_with_model() {
        let p = CompatibleProvider::new(
            "gemini".into(),
            "key".into(),
            "http://localhost".into(),
            "m".into(),
            100,
            0.2,
            Some("gemini-embedding-001".into()),
        );
        assert!(p.supports_embeddings());
    }

    #[test]
    fn clone_preserves_name() {
        let c = test_provider().clone();
        assert_eq!(c.name(), "gemini");
    }

    #[test]
    fn debug_contains_provider_name() {
        let dbg = format!("{:?}", test_provider());
        assert!(dbg.contains("gemini"));
        assert!(dbg.contains("CompatibleProvider"));
    }

    #[tokio::test]
    async fn chat_unreachable_errors() {
        let p = CompatibleProvider::new(
            "test".into(),
            "key".into(),
            "http://127.0.0.1:1".into(),
            "m".into(),
            100,
            0.2,
            None,
        );
        assert!(p.chat(&[Message::user("hello")]).await.is_err());
    }

    #[tokio::test]
    async fn embed_without_model_errors() {
        let result = test_provider().embed("test").await;
        assert!(matches!(result, Err(LlmError::EmbedUnsupported { .. })));
    }
}
