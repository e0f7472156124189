//! User dictionary with runtime registration and purging.
//!
//! Uses `RwLock` for interior mutability so that the outer session and any
//! nested prompt sessions can share one store through an `Arc`.


use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::dict::{Candidate, Dictionary};

/// What the User store knows about one reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEntry {
    Words(Vec<Candidate>),
    /// The reading was purged; it hides any System entry.
    Purged,
}

#[derive(Debug, Default)]
pub struct UserDictionary {
    entries: RwLock<HashMap<String, UserEntry>>,
}

impl UserDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<Candidate>)>,
    {
        let map = entries
            .into_iter()
            .filter(|(_, words)| !words.is_empty())
            .map(|(reading, words)| (reading, UserEntry::Words(words)))
            .collect();
        Self {
            entries: RwLock::new(map),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, UserEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, UserEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn entry(&self, reading: &str) -> Option<UserEntry> {
        self.read().get(reading).cloned()
    }

    /// Put `word` in front of the reading's list. Returns `false` if the word
    /// was already present.
    pub fn insert_front(&self, reading: &str, word: &str) -> bool {
        let candidate = Candidate::new(word);
        let mut map = self.write();
        let entry = map
            .entry(reading.to_string())
            .or_insert_with(|| UserEntry::Words(Vec::new()));
        match entry {
            UserEntry::Words(words) => {
                if words.iter().any(|w| w.word() == candidate.word()) {
                    return false;
                }
                words.insert(0, candidate);
            }
            UserEntry::Purged => *entry = UserEntry::Words(vec![candidate]),
        }
        true
    }

    /// Remove the candidate at `index`. Emptying the list tombstones the
    /// reading. Returns `false` if there was nothing at `index`.
    pub fn remove(&self, reading: &str, index: usize) -> bool {
        let mut map = self.write();
        let Some(UserEntry::Words(words)) = map.get_mut(reading) else {
            return false;
        };
        if index >= words.len() {
            return false;
        }
        words.remove(index);
        if words.is_empty() {
            map.insert(reading.to_string(), UserEntry::Purged);
        }
        true
    }

    /// Delete the reading, hiding it from lookups in every layer.
    pub fn delete(&self, reading: &str) {
        self.write().insert(reading.to_string(), UserEntry::Purged);
    }

    /// Store `words` as the complete list for `reading`. An empty list
    /// deletes the reading.
    pub fn replace(&self, reading: &str, words: Vec<Candidate>) {
        let entry = if words.is_empty() {
            UserEntry::Purged
        } else {
            UserEntry::Words(words)
        };
        self.write().insert(reading.to_string(), entry);
    }

    /// Forget anything stored for `reading`, tombstone included.
    pub fn forget(&self, reading: &str) -> bool {
        self.write().remove(reading).is_some()
    }

    /// All live entries as (reading, candidates), sorted by reading.
    pub fn list(&self) -> Vec<(String, Vec<Candidate>)> {
        let map = self.read();
        let mut result: Vec<(String, Vec<Candidate>)> = map
            .iter()
            .filter_map(|(reading, entry)| match entry {
                UserEntry::Words(words) => Some((reading.clone(), words.clone())),
                UserEntry::Purged => None,
            })
            .collect();
        result.sort_by(|a, b| a.0.cmp(&b.0));
        result
    }

    /// Readings that have been purged, sorted.
    pub fn purged(&self) -> Vec<String> {
        let map = self.read();
        let mut result: Vec<String> = map
            .iter()
            .filter(|(_, entry)| matches!(entry, UserEntry::Purged))
            .map(|(reading, _)| reading.clone())
            .collect();
        result.sort();
        result
    }
}

impl Dictionary for UserDictionary {
    fn lookup(&self, reading: &str) -> Option<Vec<Candidate>> {
        match self.read().get(reading) {
            Some(UserEntry::Words(words)) => Some(words.clone()),
            _ => None,
        }
    }
}
