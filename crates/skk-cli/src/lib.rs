//! Diagnostics for the SKK engine: transliteration, dictionary lookups,
//! key replay against a scripted line editor, and config checks.

pub mod commands;
pub mod dict_source;
pub mod trace_init;

use std::io;

use skk_core::romaji::RomajiConfigError;
use skk_core::settings::SettingsError;

use dict_source::DictSourceError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Dict(#[from] DictSourceError),

    #[error("settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("romaji table: {0}")]
    Romaji(#[from] RomajiConfigError),

    #[error("invalid key notation: {0}")]
    Keys(String),
}
