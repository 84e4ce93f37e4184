use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tracing::{debug, info};

use super::error::EmbeddingError;
use super::provider::EmbeddingProvider;
use super::sentence::{SentenceConfig, SentenceEmbedder};

static SHARED: OnceLock<Arc<SentenceEmbedder>> = OnceLock::new();
static INIT_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Returns the process-wide embedder, loading it on first use.
///
/// The model is loaded at most once per process and never torn down. `config` is only
/// consulted by the call that performs the load; later calls get the same instance
/// regardless of the config they pass. A failed load is not memoised.
pub fn shared_embedder(config: SentenceConfig) -> Result<Arc<SentenceEmbedder>, EmbeddingError> {
    if let Some(embedder) = SHARED.get() {
        return Ok(Arc::clone(embedder));
    }

    let _guard = INIT_LOCK.lock();
    if let Some(embedder) = SHARED.get() {
        debug!("Shared embedder initialised by another caller");
        return Ok(Arc::clone(embedder));
    }

    let embedder = Arc::new(SentenceEmbedder::load(config)?);
    info!(
        model_id = embedder.model_id(),
        stub = embedder.is_stub(),
        "Shared embedder initialised"
    );

    Ok(Arc::clone(SHARED.get_or_init(|| embedder)))
}
