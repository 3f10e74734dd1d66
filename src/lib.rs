//! # mms-speak
//!
//! Auto-detecting text-to-speech over Meta's MMS (Massively Multilingual
//! Speech) VITS checkpoints.
//!
//! ## Features
//!
//! - **60 languages**: one single-speaker checkpoint per language, fetched
//!   from the HuggingFace Hub on first use and cached on disk
//! - **Automatic language detection**: a fast trigram classifier with a
//!   statistical fallback picks the voice for you
//! - **Speed control**: linear-interpolation resampling adjusts playback
//!   speed (pitch shifts with it, like a tape)
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! mms-speak = "0.1"
//! ```
//!
//! ```ignore
//! use mms_speak::Speaker;
//!
//! let speaker = Speaker::new();
//!
//! // Detect the language, then synthesize.
//! let audio = speaker.speak("Bonjour tout le monde", 1.0)?;
//! std::fs::write("bonjour.wav", audio.wav_bytes())?;
//!
//! // Or name the language yourself and skip detection.
//! let audio = speaker.speak_with_lang("en", "Hello world", 1.25)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod detect;
pub mod engines;
pub mod resample;

#[cfg(feature = "mms")]
pub mod cache;
#[cfg(feature = "mms")]
mod error;
#[cfg(feature = "mms")]
pub mod synth;

use std::io::Cursor;
use std::path::{Path, PathBuf};

use derive_builder::Builder;

pub use detect::{Detection, LanguageDetector};
pub use resample::ResampleError;

#[cfg(feature = "mms")]
pub use error::Error;

#[cfg(feature = "mms")]
use crate::cache::{HubLoader, ModelCache};
#[cfg(feature = "mms")]
use crate::engines::mms::hub::{self, HubFetcher};
#[cfg(feature = "mms")]
use crate::synth::Synthesizer;

/// An in-memory WAV recording produced by one synthesis call.
///
/// Holds both the raw f32 samples and their 16-bit PCM mono WAV encoding;
/// the encoded bytes start at the RIFF header, ready to hand to a player
/// or write to disk.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
    wav: Vec<u8>,
}

impl AudioBuffer {
    /// Encode samples as 16-bit PCM mono WAV.
    pub fn encode(samples: Vec<f32>, sample_rate: u32) -> Result<Self, hound::Error> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
            for &sample in &samples {
                let scaled = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
                writer.write_sample(scaled)?;
            }
            writer.finalize()?;
        }
        cursor.set_position(0);

        Ok(Self {
            samples,
            sample_rate,
            wav: cursor.into_inner(),
        })
    }

    /// The encoded WAV bytes, starting at the RIFF header.
    pub fn wav_bytes(&self) -> &[u8] {
        &self.wav
    }

    /// Consume the buffer as a reader positioned at the start of the WAV.
    pub fn into_reader(self) -> Cursor<Vec<u8>> {
        Cursor::new(self.wav)
    }

    /// Raw audio samples before encoding.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Write the encoded WAV to a file.
    pub fn write_wav(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, &self.wav)
    }
}

/// Configuration for building a [`Speaker`].
///
/// All fields are optional; defaults match [`Speaker::new`].
#[derive(Debug, Clone, Default, Builder)]
#[builder(default, setter(into, strip_option))]
pub struct SpeakerOptions {
    /// Root directory for downloaded model artifacts.
    pub cache_root: Option<PathBuf>,
    /// Base URL of the model hub (override for mirrors or tests).
    pub hub_base_url: Option<String>,
    /// CPU threads per inference session. `None` uses the ORT default.
    pub num_threads: Option<usize>,
}

/// High-level entry point: detection, model cache, and synthesis in one
/// value.
///
/// Construction is cheap apart from initializing the statistical language
/// detector; models are loaded lazily on first use of each language.
#[cfg(feature = "mms")]
pub struct Speaker {
    detector: LanguageDetector,
    synth: Synthesizer<HubLoader>,
}

#[cfg(feature = "mms")]
impl Default for Speaker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "mms")]
impl Speaker {
    pub fn new() -> Self {
        Self::with_options(SpeakerOptions::default())
    }

    pub fn with_options(options: SpeakerOptions) -> Self {
        let base_url = options
            .hub_base_url
            .unwrap_or_else(|| hub::DEFAULT_BASE_URL.to_string());
        let cache_root = options.cache_root.unwrap_or_else(hub::default_cache_root);
        let loader = HubLoader::new(HubFetcher::new(base_url, cache_root), options.num_threads);

        Self {
            detector: LanguageDetector::new(),
            synth: Synthesizer::with_cache(ModelCache::new(loader)),
        }
    }

    /// Detect the language of `text` and synthesize it at `speed` times
    /// normal playback rate.
    pub fn speak(&self, text: &str, speed: f32) -> Result<AudioBuffer, Error> {
        match self.detector.detect(text) {
            Detection::Supported(code) => {
                log::info!("Detected language: {code}");
                self.synth.synthesize(text, &code, speed)
            }
            Detection::Unsupported(code) => {
                log::warn!("Detected language '{code}' is not supported");
                Err(Error::UnsupportedLanguage(code))
            }
            Detection::Unknown => {
                log::warn!("Language detection failed");
                Err(Error::DetectionFailed)
            }
        }
    }

    /// Synthesize `text` in a caller-supplied language, skipping
    /// detection.
    pub fn speak_with_lang(
        &self,
        lang: &str,
        text: &str,
        speed: f32,
    ) -> Result<AudioBuffer, Error> {
        if !catalog::is_supported(lang) {
            log::warn!("Language '{lang}' not supported");
            return Err(Error::UnsupportedLanguage(lang.to_string()));
        }

        log::info!("Using pre-detected language: {lang}");
        self.synth.synthesize(text, lang, speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(len: usize) -> Vec<f32> {
        (0..len).map(|i| (i as f32 * 0.05).sin() * 0.8).collect()
    }

    #[test]
    fn encoded_wav_is_16khz_mono_pcm() {
        let buffer = AudioBuffer::encode(sine(16_000), 16_000).expect("encode must succeed");

        assert!(buffer.wav_bytes().starts_with(b"RIFF"));
        assert!((buffer.duration_secs() - 1.0).abs() < 1e-9);

        let reader = hound::WavReader::new(buffer.into_reader()).expect("valid WAV");
        let spec = reader.spec();
        assert_eq!(spec.sample_rate, 16_000);
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.len(), 16_000);
    }

    #[test]
    fn encoding_clamps_out_of_range_samples() {
        let buffer =
            AudioBuffer::encode(vec![2.0, -2.0, 0.0], 16_000).expect("encode must succeed");
        let reader = hound::WavReader::new(buffer.into_reader()).expect("valid WAV");
        let decoded: Vec<i16> = reader
            .into_samples()
            .collect::<Result<_, _>>()
            .expect("samples decode");
        assert_eq!(decoded, vec![i16::MAX, -i16::MAX, 0]);
    }

    #[test]
    fn faster_speech_yields_a_shorter_buffer() {
        let wave = sine(32_000);
        let normal = AudioBuffer::encode(wave.clone(), 16_000).expect("encode");
        let fast_wave = crate::resample::stretch(&wave, 2.0)
            .expect("stretch")
            .into_owned();
        let fast = AudioBuffer::encode(fast_wave, 16_000).expect("encode");

        assert!((fast.duration_secs() - normal.duration_secs() / 2.0).abs() < 1e-3);
        assert!(fast.wav_bytes().len() < normal.wav_bytes().len());
        assert_ne!(fast.wav_bytes(), normal.wav_bytes());
    }

    #[test]
    fn speaker_options_builder_fills_defaults() {
        let options = SpeakerOptionsBuilder::default()
            .num_threads(2usize)
            .build()
            .expect("builder must succeed");
        assert_eq!(options.num_threads, Some(2));
        assert_eq!(options.cache_root, None);
        assert_eq!(options.hub_base_url, None);
    }

    #[cfg(feature = "mms")]
    #[test]
    fn speak_with_lang_rejects_unsupported_codes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let options = SpeakerOptionsBuilder::default()
            .cache_root(dir.path())
            // Unroutable: any fetch attempt would error, not hang.
            .hub_base_url("http://127.0.0.1:0")
            .build()
            .expect("builder must succeed");
        let speaker = Speaker::with_options(options);

        let err = speaker
            .speak_with_lang("xx", "text", 1.0)
            .expect_err("'xx' has no catalog entry");
        assert!(matches!(err, Error::UnsupportedLanguage(code) if code == "xx"));

        // No artifact directory may have been created for it.
        assert_eq!(std::fs::read_dir(dir.path()).expect("read dir").count(), 0);
    }
}
