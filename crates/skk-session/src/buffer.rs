use std::io;
use std::rc::Rc;

use skk_core::key::Key;

use crate::command::Command;
use crate::mode::Mode;
use crate::prompt::QueryPrompter;
use crate::types::{is_marker, PromptError};

/// What the conversion commands need from the host line editor.
///
/// Positions are character indices into the edited line. Every mutation
/// repaints the line.
pub trait Buffer {
    /// Block until the next key arrives.
    fn read_key(&mut self) -> io::Result<Key>;

    fn cursor(&self) -> usize;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn char_at(&self, pos: usize) -> Option<char>;
    /// Text of `[start, end)`, clamped to the line.
    fn substring(&self, start: usize, end: usize) -> String;

    /// Insert at the cursor and move the cursor past the text.
    fn insert(&mut self, text: &str);
    /// Replace `[pos, cursor)` with `text`; the cursor ends after it.
    fn replace_from(&mut self, pos: usize, text: &str);
    /// Remove one character, keeping the cursor on the same text.
    fn remove_at(&mut self, pos: usize);

    fn bind_key(&mut self, key: Key, command: Rc<dyn Command>);
    fn unbind_key(&mut self, key: Key);
    /// The explicit binding of `key`, if any.
    fn binding(&self, key: Key) -> Option<Rc<dyn Command>>;
    /// The command `key` runs: its binding, else self-insert for printable
    /// keys and a no-op for the rest.
    fn lookup_binding(&self, key: Key) -> Rc<dyn Command>;

    /// Show a one-line question and read a single key as the answer.
    fn ask_key(&mut self, prompter: &dyn QueryPrompter, text: &str) -> Result<Key, PromptError>;

    /// Read a whole line in a nested editor driven by `nested`. With `ime`
    /// set the nested editor starts with kana input enabled.
    fn read_line(
        &mut self,
        prompter: &dyn QueryPrompter,
        text: &str,
        nested: Mode,
        ime: bool,
    ) -> Result<String, PromptError>;
}

/// Position of the nearest marker left of the cursor.
pub fn seek_marker(buf: &dyn Buffer) -> Option<usize> {
    (0..buf.cursor())
        .rev()
        .find(|&pos| buf.char_at(pos).is_some_and(is_marker))
}
