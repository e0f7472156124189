//! Session settings loaded from TOML.
//!
//! Default values are embedded via `include_str!("default_settings.toml")`
//! and checked by `build.rs`. A session holds its own `Settings`; there is no
//! global instance.

use std::collections::HashSet;

use serde::Deserialize;

use crate::key::Key;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub keys: KeySettings,
    pub candidates: CandidateSettings,
    pub prompt: PromptSettings,
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("embedded settings TOML must be valid")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct KeySettings {
    pub cancel: Key,
    pub commit: Key,
    pub back: Key,
    pub purge: Key,
    pub toggle_script: Key,
    pub latin: Key,
    pub fullwidth_latin: Key,
    pub abbrev: Key,
}

impl KeySettings {
    fn named(&self) -> [(&'static str, Key); 8] {
        [
            ("keys.cancel", self.cancel),
            ("keys.commit", self.commit),
            ("keys.back", self.back),
            ("keys.purge", self.purge),
            ("keys.toggle_script", self.toggle_script),
            ("keys.latin", self.latin),
            ("keys.fullwidth_latin", self.fullwidth_latin),
            ("keys.abbrev", self.abbrev),
        ]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateSettings {
    pub page_keys: String,
    pub paging_threshold: usize,
}

impl CandidateSettings {
    pub fn page_size(&self) -> usize {
        self.page_keys.chars().count()
    }

    /// Page slot bound to `key`, if it is one of the page keys.
    pub fn page_slot(&self, key: Key) -> Option<usize> {
        self.page_keys.chars().position(|c| c == key.as_char())
    }

    /// Label shown for page slot `slot`.
    pub fn page_label(&self, slot: usize) -> Option<char> {
        self.page_keys
            .chars()
            .nth(slot)
            .map(|c| c.to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptSettings {
    pub style: PromptStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptStyle {
    NextLine,
    CurrentLine,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn invalid(field: &str, reason: impl Into<String>) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    let mut seen = HashSet::new();
    for (field, key) in s.keys.named() {
        if !seen.insert(key) {
            return Err(invalid(field, format!("{key} is already bound")));
        }
    }
    // Selecting-state keys are read as plain characters.
    for (field, key) in [
        ("keys.back", s.keys.back),
        ("keys.purge", s.keys.purge),
    ] {
        if !key.is_ascii_printable() || key == Key::SPACE {
            return Err(invalid(field, "must be a printable non-space key"));
        }
    }

    if s.candidates.paging_threshold == 0 {
        return Err(invalid("candidates.paging_threshold", "must be positive"));
    }
    let page_keys = &s.candidates.page_keys;
    if page_keys.is_empty() {
        return Err(invalid("candidates.page_keys", "must not be empty"));
    }
    let mut seen = HashSet::new();
    for c in page_keys.chars() {
        if !c.is_ascii_graphic() {
            return Err(invalid(
                "candidates.page_keys",
                format!("{c:?} is not a printable key"),
            ));
        }
        if !seen.insert(c) {
            return Err(invalid("candidates.page_keys", format!("{c:?} is repeated")));
        }
        // Paging matches page keys first; back and cancel must stay reachable.
        if let Some(field) = [("keys.back", s.keys.back), ("keys.cancel", s.keys.cancel)]
            .iter()
            .find(|(_, key)| key.as_char() == c)
            .map(|(field, _)| field)
        {
            return Err(invalid(
                "candidates.page_keys",
                format!("{c:?} is also {field}"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_candidates(section: &str) -> String {
        DEFAULT_SETTINGS_TOML.replace(
            "page_keys = \"asdfjkl:\"\n",
            &format!("{section}\n"),
        )
    }

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.keys.cancel, Key::CTRL_G);
        assert_eq!(s.keys.commit, Key::CTRL_J);
        assert_eq!(s.keys.back, Key::new('x'));
        assert_eq!(s.keys.purge, Key::new('X'));
        assert_eq!(s.keys.toggle_script, Key::new('q'));
        assert_eq!(s.keys.latin, Key::new('l'));
        assert_eq!(s.keys.fullwidth_latin, Key::new('L'));
        assert_eq!(s.keys.abbrev, Key::new('/'));
        assert_eq!(s.candidates.page_keys, "asdfjkl:");
        assert_eq!(s.candidates.paging_threshold, 4);
        assert_eq!(s.prompt.style, PromptStyle::NextLine);
    }

    #[test]
    fn page_slots_and_labels() {
        let s = Settings::default();
        assert_eq!(s.candidates.page_size(), 8);
        assert_eq!(s.candidates.page_slot(Key::new('a')), Some(0));
        assert_eq!(s.candidates.page_slot(Key::new(':')), Some(7));
        assert_eq!(s.candidates.page_slot(Key::new('A')), None);
        assert_eq!(s.candidates.page_label(1), Some('S'));
        assert_eq!(s.candidates.page_label(8), None);
    }

    #[test]
    fn parse_current_line_prompt() {
        let toml = DEFAULT_SETTINGS_TOML.replace("\"next-line\"", "\"current-line\"");
        let s = parse_settings_toml(&toml).unwrap();
        assert_eq!(s.prompt.style, PromptStyle::CurrentLine);
    }

    #[test]
    fn error_unknown_prompt_style() {
        let toml = DEFAULT_SETTINGS_TOML.replace("\"next-line\"", "\"popup\"");
        assert!(matches!(
            parse_settings_toml(&toml),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn error_bad_key() {
        let toml = DEFAULT_SETTINGS_TOML.replace("\"C-g\"", "\"C-gg\"");
        assert!(matches!(
            parse_settings_toml(&toml),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn error_duplicate_key() {
        let toml = DEFAULT_SETTINGS_TOML.replace("back = \"x\"", "back = \"q\"");
        match parse_settings_toml(&toml) {
            Err(SettingsError::InvalidValue { field, .. }) => {
                assert_eq!(field, "keys.toggle_script")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn error_control_back_key() {
        let toml = DEFAULT_SETTINGS_TOML.replace("back = \"x\"", "back = \"C-b\"");
        match parse_settings_toml(&toml) {
            Err(SettingsError::InvalidValue { field, .. }) => assert_eq!(field, "keys.back"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn error_zero_threshold() {
        let toml = DEFAULT_SETTINGS_TOML.replace("paging_threshold = 4", "paging_threshold = 0");
        match parse_settings_toml(&toml) {
            Err(SettingsError::InvalidValue { field, .. }) => {
                assert_eq!(field, "candidates.paging_threshold")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn error_page_keys() {
        for bad in ["page_keys = \"\"", "page_keys = \"aa\"", "page_keys = \"a b\""] {
            let toml = with_candidates(bad);
            match parse_settings_toml(&toml) {
                Err(SettingsError::InvalidValue { field, .. }) => {
                    assert_eq!(field, "candidates.page_keys", "{bad}")
                }
                other => panic!("{bad}: unexpected: {other:?}"),
            }
        }
    }

    #[test]
    fn error_page_key_shadows_back_or_cancel() {
        let toml = with_candidates("page_keys = \"asdfjklx\"");
        match parse_settings_toml(&toml) {
            Err(SettingsError::InvalidValue { field, reason }) => {
                assert_eq!(field, "candidates.page_keys");
                assert!(reason.contains("keys.back"), "{reason}");
            }
            other => panic!("unexpected: {other:?}"),
        }

        let toml = with_candidates("page_keys = \"asdf\"")
            .replace("cancel = \"C-g\"", "cancel = \"f\"");
        assert!(matches!(
            parse_settings_toml(&toml),
            Err(SettingsError::InvalidValue { field, .. }) if field == "candidates.page_keys"
        ));
    }

    #[test]
    fn error_missing_section() {
        let toml = "[keys]\ncancel = \"C-g\"\n";
        assert!(matches!(
            parse_settings_toml(toml),
            Err(SettingsError::Parse(_))
        ));
    }
}
