//! The candidate-selection state machine for one marked region.
//!
//! While it runs, the region shows `▼` followed by the current candidate and
//! the okurigana postfix. Every exit leaves either committed text without a
//! marker, the `▽` region it started from, or nothing at all.

use tracing::{debug, debug_span};

use skk_core::dict::Candidate;
use skk_core::key::Key;
use skk_core::selection::{Position, Selection};

use crate::buffer::Buffer;
use crate::mode::Mode;
use crate::types::{is_marker, Flow, MARKER_BLACK, MARKER_WHITE};

/// A marked region being converted.
pub(crate) struct Conversion {
    marker: usize,
    /// Text between the marker and the cursor when conversion started.
    marked: String,
    /// Dictionary key.
    reading: String,
    /// Okurigana appended to every candidate.
    postfix: String,
}

/// What the key read in a state asks for.
enum Next {
    Stay,
    Done(Flow),
}

impl Conversion {
    pub(crate) fn plain(marker: usize, reading: String) -> Self {
        Self {
            marker,
            marked: reading.clone(),
            reading,
            postfix: String::new(),
        }
    }

    pub(crate) fn okurigana(
        marker: usize,
        marked: String,
        reading: String,
        postfix: String,
    ) -> Self {
        Self {
            marker,
            marked,
            reading,
            postfix,
        }
    }

    /// Convert until the region is committed, reverted, or erased. `pending`
    /// is a key that arrived before conversion started; it is handled as the
    /// first key read.
    pub(crate) fn run(
        &self,
        mode: &mut Mode,
        buf: &mut dyn Buffer,
        mut pending: Option<Key>,
    ) -> Flow {
        let _span = debug_span!("convert", reading = %self.reading).entered();
        let list = mode.dictionaries().lookup(&self.reading).unwrap_or_default();
        let settings = mode.settings();
        let mut selection = Selection::start(
            list.len(),
            settings.candidates.paging_threshold,
            settings.candidates.page_size(),
        );
        loop {
            let position = selection.position();
            debug!(?position);
            let next = match position {
                Position::Reading => {
                    self.revert(buf);
                    Next::Done(Flow::Continue)
                }
                Position::Register => {
                    let flow = self.register(mode, buf);
                    match pending.take() {
                        Some(key) => Next::Done(redispatch(mode, buf, key)),
                        None => Next::Done(flow),
                    }
                }
                Position::Single(index) => {
                    self.show(buf, &list[index]);
                    let key = match pending.take() {
                        Some(key) => Ok(key),
                        None => buf.read_key(),
                    };
                    match key {
                        Ok(key) => self.select(mode, buf, &list, &mut selection, key),
                        Err(e) => {
                            debug!("conversion closed: {e}");
                            self.revert(buf);
                            Next::Done(Flow::Abort)
                        }
                    }
                }
                Position::Page { start, end } => {
                    self.page(mode, buf, &list[start..end], &mut selection)
                }
            };
            if let Next::Done(flow) = next {
                return flow;
            }
        }
    }

    /// One key while a single candidate is shown.
    fn select(
        &self,
        mode: &mut Mode,
        buf: &mut dyn Buffer,
        list: &[Candidate],
        selection: &mut Selection,
        key: Key,
    ) -> Next {
        let keys = mode.settings().keys.clone();
        let Some(index) = selection.current() else {
            return Next::Stay;
        };
        if key == keys.cancel {
            self.revert(buf);
            Next::Done(Flow::Continue)
        } else if key == keys.commit {
            self.commit(buf, &list[index]);
            Next::Done(Flow::Continue)
        } else if key.is_control() {
            self.commit(buf, &list[index]);
            Next::Done(redispatch(mode, buf, key))
        } else if key == Key::SPACE {
            selection.advance();
            Next::Stay
        } else if key == keys.back {
            selection.back();
            Next::Stay
        } else if key == keys.purge {
            if self.purge(mode, buf, &list[index], index) {
                Next::Done(Flow::Continue)
            } else {
                Next::Stay
            }
        } else {
            self.commit(buf, &list[index]);
            Next::Done(redispatch(mode, buf, key))
        }
    }

    /// One key while a page of candidates is listed.
    fn page(
        &self,
        mode: &Mode,
        buf: &mut dyn Buffer,
        page: &[Candidate],
        selection: &mut Selection,
    ) -> Next {
        let settings = mode.settings();
        let mut text = String::new();
        for (slot, candidate) in page.iter().enumerate() {
            if let Some(label) = settings.candidates.page_label(slot) {
                text.push_str(&format!("{label}:{} ", candidate.word()));
            }
        }
        text.push_str(&format!("[残り {}]", selection.remaining()));

        let key = match buf.ask_key(mode.prompter(), &text) {
            Ok(key) => key,
            Err(e) => {
                debug!("paging closed: {e}");
                self.revert(buf);
                return Next::Done(Flow::Abort);
            }
        };
        let settings = mode.settings();
        if let Some(slot) = settings.candidates.page_slot(key) {
            if selection.pick(slot).is_some() {
                self.commit(buf, &page[slot]);
                return Next::Done(Flow::Continue);
            }
        } else if key == Key::SPACE {
            selection.advance();
        } else if key == settings.keys.back {
            selection.page_back();
        } else if key == settings.keys.cancel {
            self.revert(buf);
            return Next::Done(Flow::Continue);
        }
        Next::Stay
    }

    fn show(&self, buf: &mut dyn Buffer, candidate: &Candidate) {
        let text = format!("{MARKER_BLACK}{}{}", candidate.word(), self.postfix);
        buf.replace_from(self.marker, &text);
    }

    fn commit(&self, buf: &mut dyn Buffer, candidate: &Candidate) {
        debug!(word = candidate.word(), "commit");
        buf.replace_from(self.marker, &format!("{}{}", candidate.word(), self.postfix));
    }

    fn revert(&self, buf: &mut dyn Buffer) {
        let text = format!("{MARKER_WHITE}{}{}", self.marked, self.postfix);
        buf.replace_from(self.marker, &text);
    }

    /// Ask for a new word and commit it. An empty answer reverts. A region
    /// left open in the answer is taken as typed.
    fn register(&self, mode: &Mode, buf: &mut dyn Buffer) -> Flow {
        debug!("register");
        let nested = mode.nested(&self.reading);
        let answer = buf
            .read_line(mode.prompter(), &self.reading, nested, true)
            .map(|line| line.chars().filter(|&c| !is_marker(c)).collect::<String>());
        match answer {
            Ok(word) if !word.is_empty() => {
                if !mode.dictionaries().register(&self.reading, &word) {
                    debug!(%word, "already registered");
                }
                self.commit(buf, &Candidate::new(word));
            }
            Ok(_) => self.revert(buf),
            Err(e) => {
                debug!("registration abandoned: {e}");
                self.revert(buf);
            }
        }
        Flow::Continue
    }

    /// Confirm and purge the candidate at `index`. Returns `true` if the
    /// region was erased.
    fn purge(
        &self,
        mode: &Mode,
        buf: &mut dyn Buffer,
        candidate: &Candidate,
        index: usize,
    ) -> bool {
        let question = format!(
            "really purge \"{} /{}/ \"?(yes or no)",
            self.reading,
            candidate.raw()
        );
        let nested = mode.nested(&question);
        match buf.read_line(mode.prompter(), &question, nested, false) {
            Ok(answer) if answer == "y" || answer == "yes" => {
                mode.dictionaries().purge(&self.reading, index);
                buf.replace_from(self.marker, "");
                true
            }
            Ok(_) => false,
            Err(e) => {
                debug!("purge abandoned: {e}");
                false
            }
        }
    }
}

fn redispatch(mode: &mut Mode, buf: &mut dyn Buffer, key: Key) -> Flow {
    buf.lookup_binding(key).call(mode, buf)
}
