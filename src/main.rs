use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use sema_core::config::{Config, ProviderKind};
use sema_core::error::PipelineError;
use sema_core::pipeline::RagPipeline;
use sema_index::{Chunker, ChunkerConfig, VectorStore};
use sema_llm::LlmError;
use sema_llm::any::AnyProvider;
use sema_llm::compatible::CompatibleProvider;
use sema_llm::openai::OpenAiProvider;

#[derive(Parser)]
#[command(name = "sema", version, about = "RAG backend for a codebase assistant")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "sema.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Chunk, embed, and store a source file.
    Ingest {
        path: PathBuf,
        /// Identifier for the document; a fresh UUID when omitted.
        #[arg(long)]
        source_id: Option<String>,
    },
    /// Answer a question grounded in stored code context.
    Query { text: String },
    /// Show the stored chunks most similar to a query.
    Search {
        text: String,
        #[arg(long, default_value_t = 3)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let provider = Arc::new(create_provider(&config)?);
    let store = Arc::new(VectorStore::open(&config.store.path)?);
    let chunker = Chunker::new(ChunkerConfig {
        chunk_size: config.store.chunk_size,
        overlap: config.store.overlap,
    })?;
    let pipeline = RagPipeline::new(provider, store, chunker, config.retrieval.top_k);

    match cli.command {
        Command::Ingest { path, source_id } => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let text = String::from_utf8_lossy(&bytes);
            let source_id = source_id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

            match pipeline.ingest(&source_id, &text).await {
                Ok(count) => {
                    println!("stored {count} chunks from {} as {source_id}", path.display());
                }
                Err(e) => return Err(translate(e)),
            }
        }
        Command::Query { text } => match pipeline.answer(&text).await {
            Ok(answer) => println!("{answer}"),
            Err(e) => return Err(translate(e)),
        },
        Command::Search { text, limit } => match pipeline.search(&text, limit).await {
            Ok(results) => {
                for result in results {
                    let preview: String = result.text.lines().next().unwrap_or("").into();
                    println!("{:>7.4}  {preview}", result.score);
                }
            }
            Err(e) => return Err(translate(e)),
        },
    }

    Ok(())
}

fn create_provider(config: &Config) -> anyhow::Result<AnyProvider> {
    let api_key = std::env::var("SEMA_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        bail!("SEMA_API_KEY is not set");
    }

    let llm = &config.llm;
    let provider = match llm.provider {
        ProviderKind::OpenAi => AnyProvider::OpenAi(OpenAiProvider::new(
            api_key,
            llm.base_url.clone(),
            llm.model.clone(),
            llm.max_tokens,
            llm.temperature,
            Some(llm.embedding_model.clone()),
        )),
        ProviderKind::Compatible => AnyProvider::Compatible(CompatibleProvider::new(
            llm.name.clone(),
            api_key,
            llm.base_url.clone(),
            llm.model.clone(),
            llm.max_tokens,
            llm.temperature,
            Some(llm.embedding_model.clone()),
        )),
    };

    tracing::info!(provider = %llm.provider, model = %llm.model, "provider ready");
    Ok(provider)
}

/// Attach user-facing guidance to provider failures at the process boundary.
fn translate(err: PipelineError) -> anyhow::Error {
    let guidance = match llm_cause(&err) {
        Some(LlmError::QuotaExceeded) => {
            "provider quota exceeded - try again later or reduce request volume"
        }
        Some(LlmError::InvalidCredentials) => {
            "invalid provider credentials - check SEMA_API_KEY"
        }
        _ => return err.into(),
    };
    anyhow::Error::new(err).context(guidance)
}

fn llm_cause(err: &PipelineError) -> Option<&LlmError> {
    match err {
        PipelineError::Llm(e) => Some(e),
        PipelineError::PartialIngest { cause, .. } => llm_cause(cause),
        PipelineError::Index(_) => None,
    }
}
