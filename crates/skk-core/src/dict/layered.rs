use std::sync::Arc;

use tracing::debug;

use super::{Candidate, Dictionary};
use crate::numeric;
use crate::user_dict::{UserDictionary, UserEntry};

/// User store layered over the System store.
///
/// The User store shadows the System store per reading, including readings
/// it has purged.
#[derive(Clone)]
pub struct Dictionaries {
    user: Arc<UserDictionary>,
    system: Arc<dyn Dictionary>,
}

impl Dictionaries {
    pub fn new(user: Arc<UserDictionary>, system: Arc<dyn Dictionary>) -> Self {
        Self { user, system }
    }

    pub fn user(&self) -> &Arc<UserDictionary> {
        &self.user
    }

    pub fn system(&self) -> &Arc<dyn Dictionary> {
        &self.system
    }

    /// Exact lookup. The outer `None` means the reading is unknown; the inner
    /// `None` means it was purged and must not fall back any further.
    fn lookup_exact(&self, reading: &str) -> Option<Option<Vec<Candidate>>> {
        match self.user.entry(reading) {
            Some(UserEntry::Words(words)) => Some(Some(words)),
            Some(UserEntry::Purged) => Some(None),
            None => self.system.lookup(reading).map(Some),
        }
    }

    /// Candidates for `reading`, falling back to the numeral placeholder
    /// entry when the reading contains digits.
    pub fn lookup(&self, reading: &str) -> Option<Vec<Candidate>> {
        let _span = tracing::debug_span!("lookup", reading).entered();
        if let Some(found) = self.lookup_exact(reading) {
            return found;
        }
        let key = numeric::abstract_digits(reading)?;
        let found = self.lookup_exact(&key.reading).flatten()?;
        debug!(placeholder = %key.reading, digits = %key.digits, "numeral lookup");
        Some(
            found
                .iter()
                .map(|c| c.expand_numerals(&key.digits))
                .collect(),
        )
    }

    /// Put `word` in front of the candidates for `reading`.
    ///
    /// Returns `false` without touching the store if the word is already a
    /// candidate.
    pub fn register(&self, reading: &str, word: &str) -> bool {
        let mut list = self.lookup(reading).unwrap_or_default();
        let candidate = Candidate::new(word);
        if list.iter().any(|c| c.word() == candidate.word()) {
            return false;
        }
        list.insert(0, candidate);
        self.user.replace(reading, list);
        debug!(reading, word, "registered");
        true
    }

    /// Drop the candidate at `index` for `reading`.
    ///
    /// Removing the last candidate deletes the reading from lookups.
    pub fn purge(&self, reading: &str, index: usize) -> bool {
        let Some(mut list) = self.lookup(reading) else {
            return false;
        };
        if index >= list.len() {
            return false;
        }
        if list.len() == 1 {
            self.user.delete(reading);
        } else {
            list.remove(index);
            self.user.replace(reading, list);
        }
        debug!(reading, index, "purged");
        true
    }
}
