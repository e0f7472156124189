use std::collections::BTreeMap;

use serde::Deserialize;

/// Vowels every table must map; okurigana conversion feeds them directly.
const VOWELS: [&str; 5] = ["a", "i", "u", "e", "o"];

#[derive(Deserialize)]
struct RomajiFile {
    #[serde(default)]
    mappings: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RomajiConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[mappings] table is empty")]
    Empty,
    #[error("key must be printable ASCII without upper-case letters: {0:?}")]
    InvalidKey(String),
    #[error("empty kana for {0:?}")]
    EmptyValue(String),
    #[error("vowel {0:?} is not mapped")]
    MissingVowel(&'static str),
    #[error("kana tables already initialized")]
    AlreadyInitialized,
}

/// A romaji key the automaton can receive: lower-case letters, digits and
/// punctuation. Upper-case letters open a marked region instead.
fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_graphic() && !c.is_ascii_uppercase())
}

/// Parse `[mappings]` into a sorted romaji → kana map.
pub fn parse_romaji_toml(toml_str: &str) -> Result<BTreeMap<String, String>, RomajiConfigError> {
    let file: RomajiFile =
        toml::from_str(toml_str).map_err(|e| RomajiConfigError::Parse(e.to_string()))?;
    let mappings = file.mappings;
    if mappings.is_empty() {
        return Err(RomajiConfigError::Empty);
    }

    if let Some(key) = mappings.keys().find(|k| !is_valid_key(k)) {
        return Err(RomajiConfigError::InvalidKey(key.clone()));
    }
    if let Some((key, _)) = mappings.iter().find(|(_, kana)| kana.is_empty()) {
        return Err(RomajiConfigError::EmptyValue(key.clone()));
    }
    if let Some(vowel) = VOWELS.iter().find(|v| !mappings.contains_key(**v)) {
        return Err(RomajiConfigError::MissingVowel(*vowel));
    }
    Ok(mappings)
}
