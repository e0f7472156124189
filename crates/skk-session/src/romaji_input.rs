use tracing::{debug, debug_span};

use skk_core::key::Key;
use skk_core::romaji::{KanaTable, RomajiAutomaton, Step};

use crate::buffer::{seek_marker, Buffer};
use crate::command::Command;
use crate::conversion::Conversion;
use crate::mode::Mode;
use crate::types::{Flow, MARKER_WHITE};

/// How a run of romaji keys ended.
enum Outcome {
    /// Nothing left pending.
    Resolved,
    /// A key that is not romaji arrived; the pending text is in the buffer
    /// and the key still has to be handled.
    Interrupted(Key),
    /// No more keys.
    Closed,
}

/// Drives one automaton with the pending romaji shown literally after the
/// cursor, writing kana into the buffer as it resolves.
struct Composer<'t> {
    automaton: RomajiAutomaton<'t>,
    table: &'t KanaTable,
    /// Characters of pending romaji currently in the buffer.
    shown: usize,
    /// Kana committed so far.
    committed: String,
}

impl<'t> Composer<'t> {
    fn new(table: &'t KanaTable) -> Self {
        Self {
            automaton: RomajiAutomaton::new(table),
            table,
            shown: 0,
            committed: String::new(),
        }
    }

    fn is_romaji(&self, key: Key) -> bool {
        let c = key.as_char();
        self.automaton.extends(c) || self.table.trigger_keys().contains(&c)
    }

    fn show(&mut self, buf: &mut dyn Buffer, kana: &str) {
        let pending = self.automaton.pending();
        let pos = buf.cursor() - self.shown;
        buf.replace_from(pos, &format!("{kana}{pending}"));
        self.shown = pending.chars().count();
        self.committed.push_str(kana);
    }

    fn feed(&mut self, buf: &mut dyn Buffer, key: char) {
        match self.automaton.feed(key) {
            Step::Commit { kana, .. } => self.show(buf, &kana),
            Step::Pending(_) => self.show(buf, ""),
            Step::StartMarker(lower) => {
                self.flush(buf);
                buf.insert(&MARKER_WHITE.to_string());
                self.feed(buf, lower);
            }
        }
    }

    /// Feed `first`, then keep reading keys until nothing is pending.
    fn run(&mut self, buf: &mut dyn Buffer, first: char) -> Outcome {
        self.feed(buf, first);
        while !self.automaton.is_idle() {
            let key = match buf.read_key() {
                Ok(key) => key,
                Err(e) => {
                    debug!("romaji input closed: {e}");
                    return Outcome::Closed;
                }
            };
            if !self.is_romaji(key) {
                return Outcome::Interrupted(key);
            }
            self.feed(buf, key.as_char());
        }
        Outcome::Resolved
    }

    /// Resolve what is left pending, in place.
    fn flush(&mut self, buf: &mut dyn Buffer) {
        let rest = self.automaton.flush();
        let pos = buf.cursor() - self.shown;
        buf.replace_from(pos, &rest);
        self.shown = 0;
        self.committed.push_str(&rest);
    }
}

/// A romaji key in kana input. An upper-case key opens a marked region
/// before its syllable.
pub struct RomajiInput {
    key: char,
    table: &'static KanaTable,
}

impl RomajiInput {
    pub fn new(key: char, table: &'static KanaTable) -> Self {
        Self { key, table }
    }
}

impl Command for RomajiInput {
    fn name(&self) -> &str {
        "SKK_ROMAJI"
    }

    fn call(&self, mode: &mut Mode, buf: &mut dyn Buffer) -> Flow {
        let _span = debug_span!("romaji", key = %self.key).entered();
        let mut composer = Composer::new(self.table);
        match composer.run(buf, self.key) {
            Outcome::Resolved => Flow::Continue,
            Outcome::Interrupted(key) => {
                composer.flush(buf);
                buf.lookup_binding(key).call(mode, buf)
            }
            Outcome::Closed => {
                composer.flush(buf);
                Flow::Abort
            }
        }
    }
}

/// An upper-case key: opens a marked region, or converts the region with
/// okurigana when one is already open.
pub struct ConversionTrigger {
    key: char,
}

impl ConversionTrigger {
    /// `key` is the upper-case letter bound to the trigger.
    pub fn new(key: char) -> Self {
        Self { key }
    }

    fn lower(&self) -> char {
        self.key.to_ascii_lowercase()
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

impl Command for ConversionTrigger {
    fn name(&self) -> &str {
        "SKK_HENKAN_TRIGGER"
    }

    fn call(&self, mode: &mut Mode, buf: &mut dyn Buffer) -> Flow {
        let _span = debug_span!("trigger", key = %self.key).entered();
        let table = mode.table();
        let marked =
            seek_marker(buf).map(|marker| (marker, buf.substring(marker + 1, buf.cursor())));
        let (marker, marked) = match marked {
            Some((marker, marked)) if !marked.is_empty() => (marker, marked),
            // region already open and empty: just the syllable
            Some(_) => return RomajiInput::new(self.lower(), table).call(mode, buf),
            // the automaton asks for the marker
            None => return RomajiInput::new(self.key, table).call(mode, buf),
        };

        let key = self.lower();
        let reading = format!("{marked}{key}");
        let mut composer = Composer::new(table);
        let interrupted = if is_vowel(key) {
            composer.feed(buf, key);
            None
        } else {
            match composer.run(buf, key) {
                Outcome::Resolved => None,
                Outcome::Interrupted(key) => Some(key),
                Outcome::Closed => return Flow::Abort,
            }
        };
        let mut postfix = composer.committed;
        postfix.push_str(composer.automaton.pending());
        debug!(%reading, %postfix, "okurigana");
        Conversion::okurigana(marker, marked, reading, postfix).run(mode, buf, interrupted)
    }
}
