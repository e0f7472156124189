use super::table::{KanaTable, TrieLookupResult};

/// Result of feeding one key to the automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Kana to insert now. `pending` is the prefix left over for the next key,
    /// e.g. the restart consonant after a geminate.
    Commit { kana: String, pending: String },
    /// Nothing resolved yet; the whole prefix is still pending.
    Pending(String),
    /// Upper-case key: open a marked region, then feed this lower-case key.
    StartMarker(char),
}

impl Step {
    /// A syllable or punctuation mark completed with nothing left pending.
    pub fn is_boundary(&self) -> bool {
        matches!(self, Step::Commit { pending, .. } if pending.is_empty())
    }
}

fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'i' | 'u' | 'e' | 'o')
}

fn is_consonant(ch: char) -> bool {
    ch.is_ascii_lowercase() && !is_vowel(ch)
}

/// Incremental romaji → kana transliteration over one [`KanaTable`].
pub struct RomajiAutomaton<'t> {
    table: &'t KanaTable,
    pending: String,
}

impl<'t> RomajiAutomaton<'t> {
    pub fn new(table: &'t KanaTable) -> Self {
        Self {
            table,
            pending: String::new(),
        }
    }

    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Whether `key` continues the pending prefix into a known fragment.
    pub fn extends(&self, key: char) -> bool {
        let mut candidate = self.pending.clone();
        candidate.push(key);
        self.table.lookup(&candidate) != TrieLookupResult::None
    }

    pub fn feed(&mut self, key: char) -> Step {
        if key.is_ascii_uppercase() {
            return Step::StartMarker(key.to_ascii_lowercase());
        }
        let mut committed = String::new();
        self.push(key, &mut committed);
        if committed.is_empty() {
            Step::Pending(self.pending.clone())
        } else {
            Step::Commit {
                kana: committed,
                pending: self.pending.clone(),
            }
        }
    }

    /// Force-resolve the pending prefix: a lone `n` becomes ん, a complete
    /// fragment its kana, anything else is returned literally.
    pub fn flush(&mut self) -> String {
        let pending = std::mem::take(&mut self.pending);
        if pending == "n" {
            return self.table.hatsuon().to_string();
        }
        match self.table.kana(&pending) {
            Some(kana) => kana.to_string(),
            None => pending,
        }
    }

    fn push(&mut self, key: char, out: &mut String) {
        let mut candidate = std::mem::take(&mut self.pending);
        candidate.push(key);
        match self.table.lookup(&candidate) {
            TrieLookupResult::Exact(kana) => out.push_str(&kana),
            TrieLookupResult::ExactAndPrefix(_) | TrieLookupResult::Prefix => {
                self.pending = candidate;
            }
            TrieLookupResult::None => {
                candidate.pop();
                let previous = candidate;
                if previous.is_empty() {
                    // Not a fragment start at all (digits, stray symbols).
                    out.push(key);
                    return;
                }
                if previous.len() == 1
                    && previous.starts_with(key)
                    && is_consonant(key)
                    && key != 'n'
                {
                    // Doubled consonant: geminate, then restart from the consonant.
                    out.push_str(self.table.sokuon());
                    self.pending.push(key);
                    return;
                }
                if previous == "n" {
                    out.push_str(self.table.hatsuon());
                } else if let Some(kana) = self.table.kana(&previous) {
                    out.push_str(kana);
                } else {
                    out.push_str(&previous);
                }
                self.push(key, out);
            }
        }
    }
}

/// Transliterate a whole romaji string, flushing whatever is left pending.
pub fn convert_romaji(table: &KanaTable, romaji: &str) -> String {
    let mut automaton = RomajiAutomaton::new(table);
    let mut out = String::new();
    for ch in romaji.chars() {
        let key = ch.to_ascii_lowercase();
        if let Step::Commit { kana, .. } = automaton.feed(key) {
            out.push_str(&kana);
        }
    }
    out.push_str(&automaton.flush());
    out
}
