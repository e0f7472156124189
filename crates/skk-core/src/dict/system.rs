use std::collections::HashMap;

use super::{Candidate, Dictionary};

/// Read-only reading → candidates store, loaded once up front.
#[derive(Debug, Default)]
pub struct SystemDictionary {
    entries: HashMap<String, Vec<Candidate>>,
}

impl SystemDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(reading, candidates)` pairs. Empty lists are dropped so
    /// that a found list is never empty; a repeated reading keeps the last list.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<Candidate>)>,
    {
        let entries = entries
            .into_iter()
            .filter(|(_, candidates)| !candidates.is_empty())
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Dictionary for SystemDictionary {
    fn lookup(&self, reading: &str) -> Option<Vec<Candidate>> {
        self.entries.get(reading).cloned()
    }
}
