//! Process-lifetime embedder cache.
//!
//! Loading a model is expensive and the loaded model is read-only, so each
//! backend is built at most once per process and shared as an
//! `Arc<dyn EmbeddingProvider>`.

use crate::error::Result;
use crate::hashing::HashingEmbedder;
use crate::{EmbedderKind, EmbedderOptions, EmbeddingProvider};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::{debug, info};

type SharedProviders = HashMap<EmbedderKind, Arc<dyn EmbeddingProvider>>;

fn providers() -> &'static Mutex<SharedProviders> {
    static PROVIDERS: OnceLock<Mutex<SharedProviders>> = OnceLock::new();
    PROVIDERS.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Get the shared embedder for `kind`, loading it on first use.
///
/// `options` only matter for the call that performs the load; later calls
/// get the already-loaded instance. The lock is held while loading, so
/// concurrent first requests load the model once.
pub fn shared_embedder(
    kind: EmbedderKind,
    options: &EmbedderOptions,
) -> Result<Arc<dyn EmbeddingProvider>> {
    let mut loaded = providers()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(provider) = loaded.get(&kind) {
        debug!("Reusing loaded {} embedder", provider.name());
        return Ok(Arc::clone(provider));
    }

    let provider = create_embedder(kind, options)?;
    info!(
        "Initialised {} embedder ({} dimensions)",
        provider.name(),
        provider.dimension()
    );
    loaded.insert(kind, Arc::clone(&provider));
    Ok(provider)
}

/// Build a fresh, unshared embedder for `kind`
pub fn create_embedder(
    kind: EmbedderKind,
    options: &EmbedderOptions,
) -> Result<Arc<dyn EmbeddingProvider>> {
    match kind {
        EmbedderKind::Hashing => Ok(Arc::new(HashingEmbedder::new(options.dimension))),
        EmbedderKind::MiniLm => load_sentence_model(options),
    }
}

#[cfg(feature = "sentence-model")]
fn load_sentence_model(options: &EmbedderOptions) -> Result<Arc<dyn EmbeddingProvider>> {
    let model = crate::sentence::SentenceEmbedder::load(options)?;
    Ok(Arc::new(model))
}

#[cfg(not(feature = "sentence-model"))]
fn load_sentence_model(_options: &EmbedderOptions) -> Result<Arc<dyn EmbeddingProvider>> {
    Err(crate::EmbeddingError::ModelUnavailable {
        model: "all-MiniLM-L6-v2".to_string(),
        reason: "built without the `sentence-model` feature".to_string(),
    })
}
