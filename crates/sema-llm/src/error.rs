#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("provider quota exceeded")]
    QuotaExceeded,

    #[error("invalid provider credentials")]
    InvalidCredentials,

    #[error("empty response from {provider}")]
    EmptyResponse { provider: String },

    #[error("embedding not supported by {provider}")]
    EmbedUnsupported { provider: String },

    #[error("provider error: {0}")]
    Provider(String),
}

pub type Result<T> = std::result::Result<T, LlmError>;
