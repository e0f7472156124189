use std::collections::BTreeMap;
use std::sync::OnceLock;

use lexime_trie::DoubleArray;

use super::config::{parse_romaji_toml, RomajiConfigError};
use crate::unicode::hiragana_to_katakana;

pub const DEFAULT_TOML: &str = include_str!("default_romaji.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Hiragana,
    Katakana,
}

impl Script {
    /// The script `q` toggles to.
    pub fn partner(self) -> Script {
        match self {
            Script::Hiragana => Script::Katakana,
            Script::Katakana => Script::Hiragana,
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum TrieLookupResult {
    None,
    Prefix,
    Exact(String),
    ExactAndPrefix(String),
}

/// Romaji fragment → kana trie for one script.
pub struct KanaTable {
    script: Script,
    da: DoubleArray<u8>,
    /// Kana indexed by the trie's value ids (sorted romaji order).
    values: Vec<String>,
    /// First characters of all fragments, sorted.
    triggers: Vec<char>,
    sokuon: &'static str,
    hatsuon: &'static str,
}

impl KanaTable {
    /// Build a table from hiragana mappings, converting values for `script`.
    pub fn from_mappings(script: Script, mappings: BTreeMap<String, String>) -> Self {
        let (sokuon, hatsuon) = match script {
            Script::Hiragana => ("っ", "ん"),
            Script::Katakana => ("ッ", "ン"),
        };
        // BTreeMap keys are sorted, as DoubleArray::build requires
        let keys: Vec<&[u8]> = mappings.keys().map(|r| r.as_bytes()).collect();
        let da = DoubleArray::<u8>::build(&keys);
        let values = mappings
            .values()
            .map(|kana| match script {
                Script::Hiragana => kana.clone(),
                Script::Katakana => hiragana_to_katakana(kana),
            })
            .collect();
        let mut triggers: Vec<char> = mappings.keys().filter_map(|k| k.chars().next()).collect();
        triggers.dedup();
        Self {
            script,
            da,
            values,
            triggers,
            sokuon,
            hatsuon,
        }
    }

    /// Set custom TOML before the first `get()` call.
    pub fn init_custom(toml_content: String) -> Result<(), RomajiConfigError> {
        // Validate eagerly
        parse_romaji_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RomajiConfigError::AlreadyInitialized)
    }

    /// Shared table for `script`, built on first use.
    pub fn get(script: Script) -> &'static KanaTable {
        static HIRAGANA: OnceLock<KanaTable> = OnceLock::new();
        static KATAKANA: OnceLock<KanaTable> = OnceLock::new();
        let cell = match script {
            Script::Hiragana => &HIRAGANA,
            Script::Katakana => &KATAKANA,
        };
        cell.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            let map = parse_romaji_toml(toml_str).expect("romaji TOML must be valid");
            KanaTable::from_mappings(script, map)
        })
    }

    pub fn script(&self) -> Script {
        self.script
    }

    /// Toggle partner (hiragana ↔ katakana).
    pub fn partner(&self) -> &'static KanaTable {
        KanaTable::get(self.script.partner())
    }

    pub fn lookup(&self, romaji: &str) -> TrieLookupResult {
        let pr = self.da.probe(romaji.as_bytes());
        match (pr.value, pr.has_children) {
            (None, false) => TrieLookupResult::None,
            (None, true) => TrieLookupResult::Prefix,
            (Some(id), false) => TrieLookupResult::Exact(self.values[id as usize].clone()),
            (Some(id), true) => TrieLookupResult::ExactAndPrefix(self.values[id as usize].clone()),
        }
    }

    /// Kana for a complete fragment, if the fragment is mapped.
    pub fn kana(&self, romaji: &str) -> Option<&str> {
        let id = self.da.probe(romaji.as_bytes()).value?;
        self.values.get(id as usize).map(String::as_str)
    }

    /// Geminate marker syllable (っ / ッ).
    pub fn sokuon(&self) -> &'static str {
        self.sokuon
    }

    /// Syllabic n (ん / ン).
    pub fn hatsuon(&self) -> &'static str {
        self.hatsuon
    }

    /// Every character that can start a fragment, in sorted order.
    pub fn trigger_keys(&self) -> Vec<char> {
        self.triggers.clone()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
