//! A minimal single-line editor that hosts the conversion commands.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;

use tracing::{debug_span, warn};
use unicode_width::UnicodeWidthStr;

use skk_core::key::Key;

use crate::buffer::Buffer;
use crate::command::{Command, Keymap, NamedCommand};
use crate::mode::Mode;
use crate::prompt::QueryPrompter;
use crate::types::{Flow, PromptError};

/// Key source and display sink of a [`LineEditor`].
pub trait Terminal: Write {
    fn read_key(&mut self) -> io::Result<Key>;
}

/// Replays a fixed key sequence and records everything drawn.
///
/// Reading past the last key fails with `UnexpectedEof`.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    keys: VecDeque<Key>,
    output: Vec<u8>,
}

impl ScriptedTerminal {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            output: Vec::new(),
        }
    }

    /// Keys from the characters of `s`, one key per character.
    pub fn typed(s: &str) -> Self {
        Self::new(s.chars().map(Key::new))
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl Write for ScriptedTerminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Terminal for ScriptedTerminal {
    fn read_key(&mut self) -> io::Result<Key> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more keys"))
    }
}

pub struct LineEditor<'t> {
    terminal: &'t mut dyn Terminal,
    prompt: String,
    text: Vec<char>,
    cursor: usize,
    keymap: Keymap,
}

impl<'t> LineEditor<'t> {
    pub fn new(terminal: &'t mut dyn Terminal, prompt: impl Into<String>) -> Self {
        let mut keymap = Keymap::new();
        let accept = NamedCommand::rc("ACCEPT_LINE", |_, _| Flow::Accept);
        let abort = NamedCommand::rc("ABORT_LINE", |_, _| Flow::Abort);
        let backspace = NamedCommand::rc("DELETE_BACKWARD", delete_backward);
        keymap.bind(Key::ENTER, accept);
        keymap.bind(Key::CTRL_C, Rc::clone(&abort));
        keymap.bind(Key::CTRL_D, abort);
        keymap.bind(Key::CTRL_H, Rc::clone(&backspace));
        keymap.bind(Key::DELETE, backspace);
        Self {
            terminal,
            prompt: prompt.into(),
            text: Vec::new(),
            cursor: 0,
            keymap,
        }
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    /// Run the command bound to `key`.
    pub fn dispatch(&mut self, mode: &mut Mode, key: Key) -> Flow {
        let _span = debug_span!("dispatch", %key).entered();
        let command = self.lookup_binding(key);
        command.call(mode, self)
    }

    /// Edit until the line is accepted or aborted.
    pub fn run(&mut self, mode: &mut Mode) -> Result<String, PromptError> {
        self.repaint();
        loop {
            let key = self.terminal.read_key()?;
            match self.dispatch(mode, key) {
                Flow::Continue => {}
                Flow::Accept => return Ok(self.text()),
                Flow::Abort => return Err(PromptError::Aborted),
            }
        }
    }

    fn paint(&mut self) -> io::Result<()> {
        let text: String = self.text.iter().collect();
        write!(self.terminal, "\r{}{}\x1b[K", self.prompt, text)?;
        let tail: String = self.text[self.cursor..].iter().collect();
        let width = tail.width();
        if width > 0 {
            write!(self.terminal, "\x1b[{width}D")?;
        }
        self.terminal.flush()
    }

    /// Write prompter output to the terminal.
    fn emit(&mut self, draw: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> io::Result<()> {
        let mut out = Vec::new();
        draw(&mut out)?;
        self.terminal.write_all(&out)?;
        self.terminal.flush()
    }

    fn repaint(&mut self) {
        if let Err(e) = self.paint() {
            warn!("repaint failed: {e}");
        }
    }
}

fn delete_backward(_: &mut Mode, buf: &mut dyn Buffer) -> Flow {
    let cursor = buf.cursor();
    if cursor > 0 {
        buf.remove_at(cursor - 1);
    }
    Flow::Continue
}

/// Inserts its own key.
struct SelfInsert(Key);

impl Command for SelfInsert {
    fn name(&self) -> &str {
        "SELF_INSERT"
    }

    fn call(&self, _: &mut Mode, buf: &mut dyn Buffer) -> Flow {
        buf.insert(&self.0.as_char().to_string());
        Flow::Continue
    }
}

struct Nop;

impl Command for Nop {
    fn name(&self) -> &str {
        "NOP"
    }

    fn call(&self, _: &mut Mode, _: &mut dyn Buffer) -> Flow {
        Flow::Continue
    }
}

impl Buffer for LineEditor<'_> {
    fn read_key(&mut self) -> io::Result<Key> {
        self.terminal.flush()?;
        self.terminal.read_key()
    }

    fn cursor(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.text.len()
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos).copied()
    }

    fn substring(&self, start: usize, end: usize) -> String {
        let end = end.min(self.text.len());
        let start = start.min(end);
        self.text[start..end].iter().collect()
    }

    fn insert(&mut self, text: &str) {
        let chars: Vec<char> = text.chars().collect();
        let n = chars.len();
        self.text.splice(self.cursor..self.cursor, chars);
        self.cursor += n;
        self.repaint();
    }

    fn replace_from(&mut self, pos: usize, text: &str) {
        let pos = pos.min(self.cursor);
        let chars: Vec<char> = text.chars().collect();
        let n = chars.len();
        self.text.splice(pos..self.cursor, chars);
        self.cursor = pos + n;
        self.repaint();
    }

    fn remove_at(&mut self, pos: usize) {
        if pos >= self.text.len() {
            return;
        }
        self.text.remove(pos);
        if pos < self.cursor {
            self.cursor -= 1;
        }
        self.repaint();
    }

    fn bind_key(&mut self, key: Key, command: Rc<dyn Command>) {
        self.keymap.bind(key, command);
    }

    fn unbind_key(&mut self, key: Key) {
        self.keymap.unbind(key);
    }

    fn binding(&self, key: Key) -> Option<Rc<dyn Command>> {
        self.keymap.get(key)
    }

    fn lookup_binding(&self, key: Key) -> Rc<dyn Command> {
        match self.keymap.get(key) {
            Some(command) => command,
            None if !key.is_control() && key != Key::DELETE => Rc::new(SelfInsert(key)),
            None => Rc::new(Nop),
        }
    }

    fn ask_key(&mut self, prompter: &dyn QueryPrompter, text: &str) -> Result<Key, PromptError> {
        self.emit(|w| prompter.prompt(w, text))?;
        let key = self.terminal.read_key();
        self.emit(|w| prompter.line_feed(w))?;
        self.repaint();
        Ok(key?)
    }

    fn read_line(
        &mut self,
        prompter: &dyn QueryPrompter,
        text: &str,
        mut nested: Mode,
        ime: bool,
    ) -> Result<String, PromptError> {
        let _span = debug_span!("read_line", text, ime).entered();
        self.emit(|w| prompter.prompt(w, text))?;
        let result = {
            let mut editor = LineEditor::new(&mut *self.terminal, format!("{text} "));
            if ime {
                nested.enable_kana(&mut editor);
            }
            editor.run(&mut nested)
        };
        self.emit(|w| prompter.line_feed(w))?;
        self.repaint();
        result
    }
}
