use std::path::Path;

use ndarray::Array2;
use ort::execution_providers::CPUExecutionProvider;
use ort::inputs;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::TensorRef;

/// Output sample rate of every MMS-TTS checkpoint.
pub const SAMPLE_RATE: u32 = 16_000;

#[derive(thiserror::Error, Debug)]
pub enum MmsError {
    #[error("ONNX runtime error: {0}")]
    Ort(#[from] ort::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
    #[error("WAV encoding error: {0}")]
    Wav(#[from] hound::Error),
    #[error("Download of {url} failed: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Invalid vocab.json: {0}")]
    Vocab(String),
    #[error("Invalid config.json: {0}")]
    Config(String),
    #[error("Text produced no tokens the model vocabulary covers")]
    EmptyInput,
}

/// A loaded MMS VITS checkpoint, ready for inference.
///
/// The session runs on CPU in inference-only mode; VITS generates the
/// full waveform in a single forward pass, so there is no decoding loop.
pub struct MmsModel {
    session: Session,
    /// Detected input name: "input_ids" or "inputs", depending on exporter
    input_name: String,
}

impl MmsModel {
    /// Load a checkpoint from its ONNX export.
    pub fn load(onnx_path: &Path, num_threads: Option<usize>) -> Result<Self, MmsError> {
        log::info!("Loading MMS model from {}", onnx_path.display());

        let session = init_session(onnx_path, num_threads)?;
        let input_name = detect_input_name(&session);
        log::debug!("Detected token input name '{input_name}'");

        Ok(Self {
            session,
            input_name,
        })
    }

    /// Run one forward pass over tokenized input ids, returning the raw
    /// mono waveform at [`SAMPLE_RATE`].
    pub fn infer(&mut self, input_ids: &[i64]) -> Result<Vec<f32>, MmsError> {
        if input_ids.is_empty() {
            return Err(MmsError::EmptyInput);
        }

        let ids = Array2::from_shape_vec((1, input_ids.len()), input_ids.to_vec())?;

        let outputs = self.session.run(inputs![
            self.input_name.as_str() => TensorRef::from_array_view(ids.view())?,
        ])?;

        // First output is the waveform, shaped [1, n] or [1, 1, n].
        let first_output = outputs
            .iter()
            .next()
            .ok_or_else(|| MmsError::Ort(ort::Error::new("No output from model")))?;
        let waveform = first_output.1.try_extract_array::<f32>()?;

        Ok(waveform.as_slice().unwrap_or(&[]).to_vec())
    }
}

/// Initialize an inference-only ONNX session on the CPU provider.
fn init_session(onnx_path: &Path, num_threads: Option<usize>) -> Result<Session, MmsError> {
    let providers = vec![CPUExecutionProvider::default().build()];

    let mut builder = Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .with_execution_providers(providers)?;

    if let Some(threads) = num_threads {
        builder = builder
            .with_intra_threads(threads)?
            .with_inter_threads(threads)?;
    }

    Ok(builder.commit_from_file(onnx_path)?)
}

/// Detect the token input name from session inputs.
///
/// Exports of the HF checkpoint name it `input_ids`; some community
/// conversions use `inputs`.
fn detect_input_name(session: &Session) -> String {
    for input in session.inputs() {
        if input.name() == "input_ids" || input.name() == "inputs" {
            return input.name().to_string();
        }
    }
    "input_ids".to_string()
}
