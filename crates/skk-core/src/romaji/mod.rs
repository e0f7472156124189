//! Romaji-to-kana conversion.
//!
//! A [`KanaTable`] maps romaji fragments to kana for one script, and the
//! [`RomajiAutomaton`] consumes keys one at a time, handling sokuon (っ),
//! hatsuon (ん) and yōon (きゃ) boundaries.

mod automaton;
mod config;
mod table;

pub use automaton::{convert_romaji, RomajiAutomaton, Step};
pub use config::{parse_romaji_toml, RomajiConfigError};
pub use table::{KanaTable, Script, TrieLookupResult, DEFAULT_TOML};

/// Returns the embedded default romaji TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}
