//! Static table of supported languages and their MMS-TTS model repositories.
//!
//! Each entry maps a short language code (ISO-639-1 where one exists,
//! otherwise the conventional three-letter code, e.g. `kok` or `brx`) to the
//! HuggingFace repository of the matching single-speaker VITS checkpoint.
//! The table is fixed at compile time and never mutated.

/// Supported language codes and their model repositories.
static ENTRIES: &[(&str, &str)] = &[
    // Indian languages
    ("hi", "facebook/mms-tts-hin"),  // Hindi
    ("en", "facebook/mms-tts-eng"),  // English
    ("ta", "facebook/mms-tts-tam"),  // Tamil
    ("pa", "facebook/mms-tts-pan"),  // Punjabi
    ("bn", "facebook/mms-tts-ben"),  // Bengali
    ("mr", "facebook/mms-tts-mar"),  // Marathi
    ("gu", "facebook/mms-tts-guj"),  // Gujarati
    ("kn", "facebook/mms-tts-kan"),  // Kannada
    ("ml", "facebook/mms-tts-mal"),  // Malayalam
    ("te", "facebook/mms-tts-tel"),  // Telugu
    ("or", "facebook/mms-tts-ory"),  // Odia
    ("as", "facebook/mms-tts-asm"),  // Assamese
    ("ur", "facebook/mms-tts-urd"),  // Urdu
    ("sd", "facebook/mms-tts-snd"),  // Sindhi
    ("kok", "facebook/mms-tts-kok"), // Konkani
    ("sa", "facebook/mms-tts-san"),  // Sanskrit
    ("doi", "facebook/mms-tts-doi"), // Dogri
    ("ne", "facebook/mms-tts-nep"),  // Nepali
    ("mai", "facebook/mms-tts-mai"), // Maithili
    ("brx", "facebook/mms-tts-brx"), // Bodo
    ("mni", "facebook/mms-tts-mni"), // Manipuri
    ("sat", "facebook/mms-tts-sat"), // Santali
    // European languages
    ("fr", "facebook/mms-tts-fra"),  // French
    ("de", "facebook/mms-tts-deu"),  // German
    ("es", "facebook/mms-tts-spa"),  // Spanish
    ("it", "facebook/mms-tts-ita"),  // Italian
    ("pt", "facebook/mms-tts-por"),  // Portuguese
    ("ru", "facebook/mms-tts-rus"),  // Russian
    ("nl", "facebook/mms-tts-nld"),  // Dutch
    ("pl", "facebook/mms-tts-pol"),  // Polish
    ("sv", "facebook/mms-tts-swe"),  // Swedish
    ("da", "facebook/mms-tts-dan"),  // Danish
    ("fi", "facebook/mms-tts-fin"),  // Finnish
    ("no", "facebook/mms-tts-nor"),  // Norwegian
    ("el", "facebook/mms-tts-ell"),  // Greek
    // Asian languages
    ("zh", "facebook/mms-tts-zho"),  // Chinese (Mandarin)
    ("ja", "facebook/mms-tts-jpn"),  // Japanese
    ("ko", "facebook/mms-tts-kor"),  // Korean
    ("th", "facebook/mms-tts-tha"),  // Thai
    ("vi", "facebook/mms-tts-vie"),  // Vietnamese
    ("ms", "facebook/mms-tts-msa"),  // Malay
    ("id", "facebook/mms-tts-ind"),  // Indonesian
    ("fil", "facebook/mms-tts-tgl"), // Filipino (Tagalog)
    // Middle Eastern & African languages
    ("ar", "facebook/mms-tts-ara"),  // Arabic
    ("tr", "facebook/mms-tts-tur"),  // Turkish
    ("fa", "facebook/mms-tts-fas"),  // Persian (Farsi)
    ("he", "facebook/mms-tts-heb"),  // Hebrew
    ("am", "facebook/mms-tts-amh"),  // Amharic
    ("sw", "facebook/mms-tts-swa"),  // Swahili
    ("yo", "facebook/mms-tts-yor"),  // Yoruba
    ("ha", "facebook/mms-tts-hau"),  // Hausa
    ("ig", "facebook/mms-tts-ibo"),  // Igbo
    // Other languages
    ("hu", "facebook/mms-tts-hun"),  // Hungarian
    ("cs", "facebook/mms-tts-ces"),  // Czech
    ("ro", "facebook/mms-tts-ron"),  // Romanian
    ("bg", "facebook/mms-tts-bul"),  // Bulgarian
    ("uk", "facebook/mms-tts-ukr"),  // Ukrainian
    ("sr", "facebook/mms-tts-srp"),  // Serbian
    ("hr", "facebook/mms-tts-hrv"),  // Croatian
    ("sk", "facebook/mms-tts-slk"),  // Slovak
];

/// Look up the model repository for a language code.
pub fn model_id(code: &str) -> Option<&'static str> {
    ENTRIES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, repo)| *repo)
}

/// Whether a language code has a catalog entry.
pub fn is_supported(code: &str) -> bool {
    model_id(code).is_some()
}

/// All supported language codes, in catalog order.
pub fn codes() -> impl Iterator<Item = &'static str> {
    ENTRIES.iter().map(|(code, _)| *code)
}

/// Map an ISO-639-3 code back to the catalog's short code.
///
/// Every MMS repository name ends in the ISO-639-3 code of its language,
/// so the lookup matches on that suffix. Returns `None` when no catalog
/// entry uses the given three-letter code.
pub fn from_iso639_3(code3: &str) -> Option<&'static str> {
    ENTRIES
        .iter()
        .find(|(_, repo)| repo.rsplit('-').next() == Some(code3))
        .map(|(code, _)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_languages_are_supported() {
        for code in ["en", "fr", "hi", "zh", "ar"] {
            assert!(is_supported(code), "expected '{code}' in catalog");
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert!(!is_supported("xx"));
        assert!(!is_supported(""));
        assert!(!is_supported("unknown"));
        assert_eq!(model_id("xx"), None);
    }

    #[test]
    fn model_ids_point_at_mms_repositories() {
        for code in codes() {
            let repo = model_id(code).expect("every listed code must resolve");
            assert!(
                repo.starts_with("facebook/mms-tts-"),
                "unexpected repo for '{code}': {repo}"
            );
        }
    }

    #[test]
    fn catalog_has_no_duplicate_codes() {
        let mut seen = std::collections::HashSet::new();
        for code in codes() {
            assert!(seen.insert(code), "duplicate catalog entry for '{code}'");
        }
        assert_eq!(seen.len(), 60);
    }

    #[test]
    fn iso639_3_suffix_maps_back_to_short_code() {
        assert_eq!(from_iso639_3("hin"), Some("hi"));
        assert_eq!(from_iso639_3("eng"), Some("en"));
        assert_eq!(from_iso639_3("zho"), Some("zh"));
        // Filipino is served by the Tagalog checkpoint
        assert_eq!(from_iso639_3("tgl"), Some("fil"));
        assert_eq!(from_iso639_3("xyz"), None);
    }
}
