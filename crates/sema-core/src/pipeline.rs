//! RAG pipeline orchestration: ingest documents, answer queries over
//! retrieved context.

use std::sync::Arc;

use sema_index::{Chunker, RankedResult, Retriever, VectorStore};
use sema_llm::provider::{LlmProvider, Message};

use crate::error::{PipelineError, Result};

const SYSTEM_PROMPT: &str = "You are an expert coding assistant.";

/// Composes chunker, embedding provider, vector store, and completion
/// provider into the two end-to-end operations: ingest and answer.
///
/// All collaborators are injected at construction; the pipeline holds no
/// global state and no hidden connections.
pub struct RagPipeline<P: LlmProvider> {
    provider: Arc<P>,
    store: Arc<VectorStore>,
    retriever: Retriever,
    chunker: Chunker,
    top_k: usize,
}

impl<P: LlmProvider> RagPipeline<P> {
    #[must_use]
    pub fn new(provider: Arc<P>, store: Arc<VectorStore>, chunker: Chunker, top_k: usize) -> Self {
        let retriever = Retriever::new(Arc::clone(&store));
        Self {
            provider,
            store,
            retriever,
            chunker,
            top_k,
        }
    }

    /// Chunk `text`, embed each chunk in order, and persist it under
    /// `{source_id}_{index}`. Returns the number of chunks stored.
    ///
    /// Embedding calls run strictly sequentially; there is no batching.
    ///
    /// # Errors
    ///
    /// A failure mid-loop aborts the remainder and returns
    /// [`PipelineError::PartialIngest`] reporting how many chunks were
    /// already stored durably — callers must not treat the document as
    /// fully ingested, nor assume nothing was written.
    pub async fn ingest(&self, source_id: &str, text: &str) -> Result<usize> {
        let chunks = self.chunker.split(text);
        tracing::debug!(source_id, chunks = chunks.len(), "ingesting document");

        let mut stored = 0usize;
        for (index, chunk) in chunks.iter().enumerate() {
            let embedding = self
                .provider
                .embed(chunk)
                .await
                .map_err(|e| partial(stored, e.into()))?;
            self.store
                .put(&format!("{source_id}_{index}"), chunk, embedding)
                .map_err(|e| partial(stored, e.into()))?;
            stored += 1;
        }

        tracing::info!(source_id, stored, "document ingested");
        Ok(stored)
    }

    /// Answer `query` grounded in the most similar stored chunks.
    ///
    /// An empty store is not an error: the completion runs with an empty
    /// context block.
    ///
    /// # Errors
    ///
    /// Embedding, retrieval, and completion failures propagate typed and
    /// unchanged; a failed completion is a failure, never an answer.
    pub async fn answer(&self, query: &str) -> Result<String> {
        let query_embedding = self.provider.embed(query).await?;
        let hits = self.retriever.top_k(&query_embedding, self.top_k)?;
        tracing::debug!(hits = hits.len(), "retrieved context chunks");

        let context = hits
            .iter()
            .map(|h| h.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let prompt = format!(
            "Use the following code context to answer the question:\n\n\
             {context}\n\nQuestion: {query}\nAnswer:"
        );

        let messages = [Message::system(SYSTEM_PROMPT), Message::user(prompt)];
        Ok(self.provider.chat(&messages).await?)
    }

    /// Ranked chunks for `query` without running a completion.
    ///
    /// # Errors
    ///
    /// Returns an error if embedding or retrieval fails.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<RankedResult>> {
        let query_embedding = self.provider.embed(query).await?;
        Ok(self.retriever.top_k(&query_embedding, k)?)
    }
}

fn partial(stored: usize, cause: PipelineError) -> PipelineError {
    PipelineError::PartialIngest {
        stored,
        cause: Box::new(cause),
    }
}
