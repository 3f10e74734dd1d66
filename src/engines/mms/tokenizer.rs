use std::collections::HashMap;
use std::path::Path;

use super::model::MmsError;

/// Character-level tokenizer for MMS VITS checkpoints.
///
/// The checkpoint's `vocab.json` maps single characters to token ids.
/// Encoding lowercases the input, drops characters the vocabulary does
/// not cover, and intersperses the blank token between ids (the VITS
/// `add_blank` convention), matching the reference tokenizer.
pub struct MmsTokenizer {
    vocab: HashMap<char, i64>,
    blank_id: i64,
    add_blank: bool,
    lowercase: bool,
}

impl MmsTokenizer {
    /// Load the tokenizer from a `vocab.json` file.
    pub fn load(vocab_path: &Path) -> Result<Self, MmsError> {
        let vocab = load_vocab(vocab_path)?;
        Ok(Self::from_vocab(vocab))
    }

    /// Build a tokenizer from an in-memory vocabulary, with the MMS
    /// defaults (`add_blank` on, lowercasing on, blank id 0).
    pub fn from_vocab(vocab: HashMap<char, i64>) -> Self {
        Self {
            vocab,
            blank_id: 0,
            add_blank: true,
            lowercase: true,
        }
    }

    /// Disable blank-token interspersal (for checkpoints exported with
    /// `add_blank = false`).
    pub fn without_blank(mut self) -> Self {
        self.add_blank = false;
        self
    }

    /// Encode text into model input ids.
    ///
    /// Characters outside the vocabulary are silently dropped, matching
    /// the reference tokenizer's normalization. An empty result means the
    /// vocabulary covered nothing in the input.
    pub fn encode(&self, text: &str) -> Vec<i64> {
        let normalized: String = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let ids: Vec<i64> = normalized
            .chars()
            .filter_map(|ch| self.vocab.get(&ch).copied())
            .collect();

        if !self.add_blank || ids.is_empty() {
            return ids;
        }

        // Interleave: [blank, t0, blank, t1, ..., tN, blank]
        let mut interspersed = Vec::with_capacity(ids.len() * 2 + 1);
        interspersed.push(self.blank_id);
        for id in ids {
            interspersed.push(id);
            interspersed.push(self.blank_id);
        }
        interspersed
    }

    pub fn vocab_len(&self) -> usize {
        self.vocab.len()
    }
}

/// Load a vocabulary from a `vocab.json` file.
///
/// The file must be a JSON object mapping single-character strings to
/// integer token ids.
pub fn load_vocab(vocab_path: &Path) -> Result<HashMap<char, i64>, MmsError> {
    let content = std::fs::read_to_string(vocab_path)?;
    let json: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| MmsError::Vocab(format!("Failed to parse JSON: {e}")))?;

    let vocab_obj = json
        .as_object()
        .ok_or_else(|| MmsError::Vocab("vocab.json must be a JSON object".to_string()))?;

    let mut map = HashMap::new();
    for (k, v) in vocab_obj {
        let mut chars = k.chars();
        let ch = chars
            .next()
            .ok_or_else(|| MmsError::Vocab(format!("Empty key in vocab: {k:?}")))?;
        if chars.next().is_some() {
            // Multi-character entries (e.g. "<unk>") are metadata tokens,
            // never produced by character-level encoding.
            continue;
        }
        let id = v
            .as_i64()
            .ok_or_else(|| MmsError::Vocab(format!("Non-integer vocab value for key {k:?}")))?;
        map.insert(ch, id);
    }

    Ok(map)
}
