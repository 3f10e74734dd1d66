//! Synthesis orchestration: tokenize, infer, stretch, encode.

use crate::cache::{HubLoader, ModelCache, ModelLoader};
use crate::engines::mms::{ModelHandle, SAMPLE_RATE};
use crate::error::Error;
use crate::resample;
use crate::AudioBuffer;

/// Drives one synthesis request end to end against an injected cache.
pub struct Synthesizer<L: ModelLoader<Handle = ModelHandle> = HubLoader> {
    cache: ModelCache<L>,
}

impl Default for Synthesizer<HubLoader> {
    fn default() -> Self {
        Self::new()
    }
}

impl Synthesizer<HubLoader> {
    /// A synthesizer backed by the default hub fetcher and cache layout.
    pub fn new() -> Self {
        Self::with_cache(ModelCache::new(HubLoader::default()))
    }
}

impl<L: ModelLoader<Handle = ModelHandle>> Synthesizer<L> {
    pub fn with_cache(cache: ModelCache<L>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &ModelCache<L> {
        &self.cache
    }

    /// Synthesize `text` in the given language at `speed` times normal
    /// playback rate, returning an in-memory WAV buffer.
    ///
    /// The resample step fails soft: an invalid speed is logged and the
    /// unstretched waveform is kept, since audio in hand beats an error
    /// at this point in the pipeline.
    pub fn synthesize(&self, text: &str, code: &str, speed: f32) -> Result<AudioBuffer, Error> {
        let handle = self.cache.resolve(code)?;

        let input_ids = handle.tokenizer().encode(text);
        let waveform = handle.infer(&input_ids).map_err(|e| {
            log::warn!("Failed to generate speech for '{code}': {e}");
            Error::Synthesis(e)
        })?;

        let waveform = match resample::stretch(&waveform, speed) {
            Ok(stretched) => stretched.into_owned(),
            Err(e) => {
                log::warn!("Error adjusting speed: {e}; keeping original waveform");
                waveform
            }
        };

        AudioBuffer::encode(waveform, SAMPLE_RATE).map_err(|e| {
            log::warn!("Failed to encode WAV for '{code}': {e}");
            Error::Synthesis(e.into())
        })
    }
}
