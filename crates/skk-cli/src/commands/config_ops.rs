use std::fmt::Write as _;
use std::fs;

use clap::ValueEnum;

use skk_core::romaji::{self, KanaTable, Script};
use skk_core::settings;

use crate::CliError;

/// The two TOML files a session can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKind {
    Romaji,
    Settings,
}

impl ConfigKind {
    fn default_toml(self) -> &'static str {
        match self {
            ConfigKind::Romaji => romaji::default_toml(),
            ConfigKind::Settings => settings::default_toml(),
        }
    }

    /// Parse `content` and describe what a session would get from it.
    pub fn summary(self, content: &str) -> Result<String, CliError> {
        match self {
            ConfigKind::Romaji => romaji_summary(content),
            ConfigKind::Settings => settings_summary(content),
        }
    }
}

pub fn config_export(kind: ConfigKind) {
    print!("{}", kind.default_toml());
}

pub fn config_check(kind: ConfigKind, file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let summary = die!(kind.summary(&content), "Error: {}");
    print!("{summary}");
}

/// Mapping count, the keys that start romaji input, and the letters left
/// without a row (their upper-case form still opens a marked region but
/// cannot carry okurigana).
fn romaji_summary(content: &str) -> Result<String, CliError> {
    let mappings = romaji::parse_romaji_toml(content)?;
    let has_nn = mappings.get("nn").map(String::as_str) == Some("ん");
    let table = KanaTable::from_mappings(Script::Hiragana, mappings);
    let triggers = table.trigger_keys();
    let unmapped: String = ('a'..='z').filter(|c| !triggers.contains(c)).collect();

    let mut out = String::new();
    let _ = writeln!(out, "OK: {} mappings", table.len());
    let _ = writeln!(out, "trigger keys: {}", triggers.iter().collect::<String>());
    if !unmapped.is_empty() {
        let _ = writeln!(out, "letters without romaji: {unmapped}");
    }
    if !has_nn {
        let _ = writeln!(out, "note: \"nn\" is not mapped to ん; a lone n still flushes to ん");
    }
    Ok(out)
}

/// Special keys and the candidate page row as the listing labels it.
fn settings_summary(content: &str) -> Result<String, CliError> {
    let s = settings::parse_settings_toml(content)?;
    let keys = &s.keys;
    let labels: Vec<String> = (0..s.candidates.page_size())
        .filter_map(|slot| s.candidates.page_label(slot))
        .map(|c| c.to_string())
        .collect();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "OK: commit={} cancel={} back={} purge={}",
        keys.commit, keys.cancel, keys.back, keys.purge
    );
    let _ = writeln!(
        out,
        "modes: toggle_script={} latin={} fullwidth_latin={} abbrev={}",
        keys.toggle_script, keys.latin, keys.fullwidth_latin, keys.abbrev
    );
    let _ = writeln!(
        out,
        "page row: {} ({} per page after {} single candidates)",
        labels.join(" "),
        s.candidates.page_size(),
        s.candidates.paging_threshold
    );
    let _ = writeln!(out, "prompt: {:?}", s.prompt.style);
    Ok(out)
}
