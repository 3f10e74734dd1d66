use crate::engines::mms::MmsError;

/// Failure taxonomy for synthesis requests.
///
/// Every failure is logged where it occurs and returned as a structured
/// variant, so callers can tell an unsupported language apart from a
/// model-load or inference problem instead of receiving a bare absence.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("language '{0}' is not supported")]
    UnsupportedLanguage(String),
    #[error("could not identify the language of the input text")]
    DetectionFailed,
    #[error("failed to load model for '{code}': {source}")]
    ModelLoad {
        code: String,
        #[source]
        source: MmsError,
    },
    #[error("synthesis failed: {0}")]
    Synthesis(#[source] MmsError),
}
