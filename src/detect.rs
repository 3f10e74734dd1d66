//! Two-stage language identification.
//!
//! Stage one is `whatlang`, a fast trigram classifier: when it names a
//! catalog-supported language the detector short-circuits and never pays
//! for the second stage. Stage two is `lingua`, a slower statistical
//! detector used as the precision fallback for short or mixed-script text
//! where trigram models are unreliable. A stage that cannot classify the
//! input counts as a non-match and falls through; it is never an error.

use crate::catalog;

/// Outcome of language detection.
///
/// A classified-but-unsupported language is surfaced as its own case
/// instead of being folded into [`Detection::Unknown`], so callers can
/// tell "we know what this is but cannot speak it" apart from "no
/// classifier had an opinion".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// A catalog-supported language code.
    Supported(String),
    /// A confidently classified language with no catalog entry. Always
    /// carries the ISO-639-3 code, whichever classifier produced it.
    Unsupported(String),
    /// Neither classifier produced a usable result.
    Unknown,
}

impl Detection {
    /// The detected code, or the sentinel `"unknown"` when the language is
    /// unsupported or undetected.
    pub fn code(&self) -> &str {
        match self {
            Detection::Supported(code) => code,
            _ => "unknown",
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Detection::Supported(_))
    }
}

/// Two-stage language detector over the catalog's supported set.
pub struct LanguageDetector {
    fallback: lingua::LanguageDetector,
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageDetector {
    pub fn new() -> Self {
        let fallback = lingua::LanguageDetectorBuilder::from_all_languages().build();
        Self { fallback }
    }

    /// Detect the language of `text` against the catalog.
    pub fn detect(&self, text: &str) -> Detection {
        // Stage 1: fast trigram classification.
        let primary = whatlang::detect(text).map(|info| info.lang());
        if let Some(lang) = primary {
            if let Some(code) = catalog::from_iso639_3(normalize_iso3(lang.code())) {
                log::debug!("trigram stage matched '{code}'");
                return Detection::Supported(code.to_string());
            }
        }

        // Stage 2: statistical fallback.
        if let Some(language) = self.fallback.detect_language_of(text) {
            let code = language.iso_code_639_1().to_string().to_lowercase();
            if catalog::is_supported(&code) {
                log::debug!("statistical stage matched '{code}'");
                return Detection::Supported(code);
            }
            // Catalog keys without a two-letter code (e.g. `fil`) are
            // reachable through their three-letter spelling.
            let code3 = language.iso_code_639_3().to_string().to_lowercase();
            if let Some(code) = catalog::from_iso639_3(&code3) {
                log::debug!("statistical stage matched '{code}' via '{code3}'");
                return Detection::Supported(code.to_string());
            }
            log::debug!("statistical stage classified unsupported '{code3}'");
            return Detection::Unsupported(code3);
        }

        // Stage 2 had no opinion; report stage 1's unsupported guess if any.
        match primary {
            Some(lang) => Detection::Unsupported(normalize_iso3(lang.code()).to_string()),
            None => Detection::Unknown,
        }
    }
}

/// Reconcile whatlang's ISO-639-3 spelling with the one MMS uses.
fn normalize_iso3(code: &str) -> &str {
    match code {
        "cmn" => "zho", // Mandarin vs. macro-language Chinese
        "pes" => "fas", // Iranian Persian vs. macro-language Persian
        "nob" => "nor", // Bokmål vs. macro-language Norwegian
        "ori" => "ory", // Odia
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> LanguageDetector {
        LanguageDetector::new()
    }

    #[test]
    fn detects_english_prose() {
        let text = "The quick brown fox jumps over the lazy dog while the \
                    farmer watches from the porch of his old wooden house.";
        assert_eq!(detector().detect(text), Detection::Supported("en".into()));
    }

    #[test]
    fn detects_french_prose() {
        let text = "Bonjour tout le monde, je voudrais vous parler de la \
                    situation économique de notre pays cette année.";
        assert_eq!(detector().detect(text), Detection::Supported("fr".into()));
    }

    #[test]
    fn detection_only_yields_catalog_codes_or_unknown() {
        let samples = [
            "Hello there, how are you doing today my good friend?",
            "Guten Morgen, wie geht es Ihnen an diesem schönen Tag?",
            "1234567890",
            "???!!!",
        ];
        let detector = detector();
        for text in samples {
            let detection = detector.detect(text);
            let code = detection.code();
            assert!(
                code == "unknown" || crate::catalog::is_supported(code),
                "unvalidated code {code:?} leaked out for {text:?}"
            );
        }
    }

    #[test]
    fn normalizes_macro_language_spellings() {
        assert_eq!(normalize_iso3("cmn"), "zho");
        assert_eq!(normalize_iso3("pes"), "fas");
        assert_eq!(normalize_iso3("nob"), "nor");
        assert_eq!(normalize_iso3("eng"), "eng");
    }

    #[test]
    fn unsupported_languages_surface_as_iso639_3() {
        // Latvian prose: both classifiers know the language, the catalog
        // does not. Whichever stage answers must spell the code the same
        // way, as three letters.
        let text = "Labdien, es vēlētos jums pastāstīt par mūsu valsts \
                    ekonomisko situāciju šajā gadā un nākamajos gados.";
        match detector().detect(text) {
            Detection::Unsupported(code) => {
                assert_eq!(code.len(), 3, "expected ISO-639-3, got {code:?}");
                assert!(!crate::catalog::is_supported(&code));
            }
            other => panic!("expected an unsupported classification, got {other:?}"),
        }
    }

    #[test]
    fn tagalog_resolves_to_the_filipino_checkpoint() {
        let text = "Magandang umaga po sa inyong lahat, kumusta na kayo \
                    ngayong magandang araw na ito?";
        assert_eq!(
            detector().detect(text),
            Detection::Supported("fil".into())
        );
    }

    #[test]
    fn unsupported_detection_reports_the_sentinel_code() {
        assert_eq!(Detection::Unsupported("lav".into()).code(), "unknown");
        assert_eq!(Detection::Unknown.code(), "unknown");
        assert_eq!(Detection::Supported("en".into()).code(), "en");
    }
}
