//! `fitrank` entrypoint: ranks resume files against a job description file.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use mimalloc::MiMalloc;
use tokio::signal;

use fitrank::config::Config;
use fitrank::embedding::{CachedEmbedder, EmbeddingProvider, shared_embedder};
use fitrank::ranking::{BatchRanker, RankerOptions, RankingStatus, StopSignal};
use fitrank::source::read_document;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const USAGE: &str = "usage: fitrank <job-description.txt> <resume>...";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if args.iter().any(|a| a.as_os_str() == "--help" || a.as_os_str() == "-h") {
        println!("{USAGE}");
        return Ok(());
    }
    let Some((query_path, resume_paths)) = args.split_first() else {
        bail!(USAGE);
    };

    let config = Config::from_env()?;
    config.validate()?;

    if config.uses_stub() {
        tracing::warn!("No FITRANK_MODEL_PATH configured, running embedder in stub mode");
    }

    let query = std::fs::read(query_path)
        .with_context(|| format!("failed to read job description {}", query_path.display()))?;
    let query = fitrank::source::decode_text(&query);
    let documents = resume_paths.iter().map(|p| read_document(p)).collect();

    let embedder = shared_embedder(config.sentence_config())?;
    let provider: Arc<dyn EmbeddingProvider> = if config.embedding_cache_capacity > 0 {
        Arc::new(CachedEmbedder::new(embedder, config.embedding_cache_capacity))
    } else {
        embedder
    };

    tracing::info!(
        model_id = provider.model_id(),
        resumes = resume_paths.len(),
        max_concurrency = config.max_concurrency,
        "Ranking resumes"
    );

    let stop = StopSignal::new();
    tokio::spawn(stop_on_ctrl_c(stop.clone()));

    let ranker = BatchRanker::with_options(provider, RankerOptions::from(&config));
    let result = ranker.rank_async(&query, documents, &stop).await;

    if let RankingStatus::Stopped { processed } = result.status {
        tracing::warn!(processed, "Interrupted, printing partial ranking");
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn stop_on_ctrl_c(stop: StopSignal) {
    match signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C, finishing in-flight candidates");
            stop.stop();
        }
        Err(e) => tracing::error!(error = %e, "Failed to install Ctrl+C handler"),
    }
}
