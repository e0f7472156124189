use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between a candidate word and its annotation.
pub const ANNOTATION_SEPARATOR: char = ';';

/// A dictionary candidate, stored as the raw `word;annotation` text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Candidate(String);

impl Candidate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The text inserted into the buffer.
    pub fn word(&self) -> &str {
        match self.0.split_once(ANNOTATION_SEPARATOR) {
            Some((word, _)) => word,
            None => &self.0,
        }
    }

    pub fn annotation(&self) -> Option<&str> {
        self.0
            .split_once(ANNOTATION_SEPARATOR)
            .map(|(_, note)| note)
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Same candidate with every numeral code rendered from `digits`.
    pub fn expand_numerals(&self, digits: &str) -> Self {
        Self(crate::numeric::expand(&self.0, digits))
    }
}

impl From<&str> for Candidate {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Candidate {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
