//! Meta MMS text-to-speech engine implementation.
//!
//! The Massively Multilingual Speech project publishes one single-speaker
//! VITS checkpoint per language under `facebook/mms-tts-{iso639_3}`. This
//! module drives the ONNX export of those checkpoints: a character-level
//! tokenizer feeds token ids into the model, which emits a 16 kHz mono
//! waveform in one forward pass.
//!
//! # Model Directory Layout
//!
//! Artifacts are fetched on first use into a per-repository cache
//! directory (see [`hub`]):
//!
//! ```text
//! <cache>/facebook--mms-tts-eng/
//! ├── model.onnx    # VITS checkpoint, ONNX export
//! ├── vocab.json    # character -> token id map
//! └── config.json   # checkpoint metadata (sampling rate)
//! ```

pub mod hub;
pub mod model;
pub mod tokenizer;

use std::sync::Mutex;

pub use hub::{HubFetcher, ModelArtifacts};
pub use model::{MmsError, MmsModel, SAMPLE_RATE};
pub use tokenizer::MmsTokenizer;

/// A loaded model and its tokenizer, bound to one language.
///
/// The model sits behind a mutex because ONNX inference needs exclusive
/// session access; the tokenizer is immutable and shared freely.
pub struct ModelHandle {
    model: Mutex<MmsModel>,
    tokenizer: MmsTokenizer,
}

impl ModelHandle {
    pub fn new(model: MmsModel, tokenizer: MmsTokenizer) -> Self {
        Self {
            model: Mutex::new(model),
            tokenizer,
        }
    }

    pub fn tokenizer(&self) -> &MmsTokenizer {
        &self.tokenizer
    }

    /// Run inference over pre-tokenized input ids.
    pub fn infer(&self, input_ids: &[i64]) -> Result<Vec<f32>, MmsError> {
        let mut model = self
            .model
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        model.infer(input_ids)
    }
}
