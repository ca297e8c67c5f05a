use sema_index::IndexError;
use sema_llm::LlmError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("index error: {0}")]
    Index(#[from] IndexError),

    /// Ingestion aborted mid-loop; the first `stored` chunks are already
    /// durable in the vector store.
    #[error("ingestion aborted after storing {stored} chunks: {cause}")]
    PartialIngest {
        stored: usize,
        #[source]
        cause: Box<PipelineError>,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
