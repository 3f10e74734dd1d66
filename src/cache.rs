//! Lazily populated, process-lifetime model cache.
//!
//! The cache is an owned value, injected wherever it is needed, rather
//! than process-global state. Handles are loaded on first use of a
//! language and never evicted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::catalog;
use crate::engines::mms::{HubFetcher, MmsModel, MmsTokenizer, ModelHandle};
use crate::error::Error;

/// Loads a model handle for a catalog entry.
///
/// The cache is generic over its loader so tests can substitute one that
/// counts invocations or fails on demand.
pub trait ModelLoader {
    type Handle;

    fn load(&self, code: &str, model_id: &str) -> Result<Self::Handle, Error>;
}

/// Default loader: fetch artifacts from the hub, then build the ONNX
/// session and tokenizer.
pub struct HubLoader {
    fetcher: HubFetcher,
    num_threads: Option<usize>,
}

impl Default for HubLoader {
    fn default() -> Self {
        Self {
            fetcher: HubFetcher::default(),
            num_threads: None,
        }
    }
}

impl HubLoader {
    pub fn new(fetcher: HubFetcher, num_threads: Option<usize>) -> Self {
        Self {
            fetcher,
            num_threads,
        }
    }
}

impl ModelLoader for HubLoader {
    type Handle = ModelHandle;

    fn load(&self, code: &str, model_id: &str) -> Result<ModelHandle, Error> {
        let wrap = |source: crate::engines::mms::MmsError| Error::ModelLoad {
            code: code.to_string(),
            source,
        };

        let artifacts = self.fetcher.fetch(model_id).map_err(wrap)?;
        let model = MmsModel::load(&artifacts.onnx_path, self.num_threads).map_err(wrap)?;
        let tokenizer = MmsTokenizer::load(&artifacts.vocab_path).map_err(wrap)?;
        Ok(ModelHandle::new(model, tokenizer))
    }
}

/// In-memory mapping from language code to loaded model handle.
///
/// The map lock is held across a load, so concurrent first use of the
/// same language serializes into exactly one load; the loser of the race
/// gets the winner's handle. Loads of different languages also serialize,
/// an accepted cost for a blocking library.
pub struct ModelCache<L: ModelLoader> {
    loader: L,
    loaded: Mutex<HashMap<String, Arc<L::Handle>>>,
}

impl<L: ModelLoader> ModelCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            loaded: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve a language code to its model handle, loading it on first
    /// use.
    ///
    /// Codes without a catalog entry fail with
    /// [`Error::UnsupportedLanguage`] before any fetch is attempted; a
    /// failed load leaves the cache unchanged, so a later call retries.
    pub fn resolve(&self, code: &str) -> Result<Arc<L::Handle>, Error> {
        let model_id = catalog::model_id(code).ok_or_else(|| {
            log::warn!("Model for language '{code}' is not available");
            Error::UnsupportedLanguage(code.to_string())
        })?;

        let mut loaded = self.loaded.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = loaded.get(code) {
            return Ok(Arc::clone(handle));
        }

        log::info!("Loading model for '{code}' ({model_id})");
        let handle = Arc::new(self.loader.load(code, model_id).inspect_err(|e| {
            log::warn!("Failed to load model for '{code}': {e}");
        })?);
        loaded.insert(code.to_string(), Arc::clone(&handle));
        Ok(handle)
    }

    /// Whether a handle for `code` is already loaded.
    pub fn is_cached(&self, code: &str) -> bool {
        self.loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(code)
    }
}
