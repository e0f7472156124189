use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use skk_core::key::Key;

use crate::buffer::Buffer;
use crate::mode::Mode;
use crate::types::Flow;

/// A key binding target.
pub trait Command {
    fn name(&self) -> &str;
    fn call(&self, mode: &mut Mode, buf: &mut dyn Buffer) -> Flow;
}

impl fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A command backed by a plain function.
pub struct NamedCommand {
    name: &'static str,
    func: fn(&mut Mode, &mut dyn Buffer) -> Flow,
}

impl NamedCommand {
    pub fn new(name: &'static str, func: fn(&mut Mode, &mut dyn Buffer) -> Flow) -> Self {
        Self { name, func }
    }

    pub fn rc(name: &'static str, func: fn(&mut Mode, &mut dyn Buffer) -> Flow) -> Rc<dyn Command> {
        Rc::new(Self::new(name, func))
    }
}

impl Command for NamedCommand {
    fn name(&self) -> &str {
        self.name
    }

    fn call(&self, mode: &mut Mode, buf: &mut dyn Buffer) -> Flow {
        (self.func)(mode, buf)
    }
}

/// Explicit key bindings of one editor.
#[derive(Default, Clone)]
pub struct Keymap {
    bindings: HashMap<Key, Rc<dyn Command>>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, key: Key, command: Rc<dyn Command>) {
        self.bindings.insert(key, command);
    }

    pub fn unbind(&mut self, key: Key) {
        self.bindings.remove(&key);
    }

    pub fn get(&self, key: Key) -> Option<Rc<dyn Command>> {
        self.bindings.get(&key).cloned()
    }
}

/// Bindings of U+0000..=U+0080 captured before kana input took over.
///
/// Keys that had no explicit binding are recorded as `None` and become
/// unbound again on restore.
#[derive(Clone, Debug)]
pub struct SavedBindings {
    entries: Vec<(Key, Option<Rc<dyn Command>>)>,
}

impl SavedBindings {
    pub const RANGE: std::ops::RangeInclusive<char> = '\u{0}'..='\u{80}';

    pub fn capture(buf: &dyn Buffer) -> Self {
        let entries = Self::RANGE
            .map(Key::new)
            .map(|key| (key, buf.binding(key)))
            .collect();
        Self { entries }
    }

    pub fn restore(&self, buf: &mut dyn Buffer) {
        for (key, command) in &self.entries {
            match command {
                Some(command) => buf.bind_key(*key, Rc::clone(command)),
                None => buf.unbind_key(*key),
            }
        }
    }

    pub fn get(&self, key: Key) -> Option<&Rc<dyn Command>> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, command)| command.as_ref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
