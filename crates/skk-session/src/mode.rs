use std::rc::Rc;
use std::sync::Arc;

use tracing::debug;

use skk_core::dict::Dictionaries;
use skk_core::key::Key;
use skk_core::romaji::{KanaTable, Script};
use skk_core::settings::Settings;
use skk_core::unicode::to_fullwidth;

use crate::buffer::{seek_marker, Buffer};
use crate::command::{Command, NamedCommand, SavedBindings};
use crate::conversion;
use crate::prompt::{prompter_for, QueryPrompter};
use crate::romaji_input::{ConversionTrigger, RomajiInput};
use crate::types::{Flow, MARKER_WHITE};

/// Upper-case keys that open a marked region or trigger okurigana conversion.
pub const UPPER_TRIGGERS: &str = "AIUEOKSTNHMYRWFGZDBPCJ";

/// One SKK session: the dictionaries, the active kana table, how questions
/// are asked, and the bindings to restore when leaving kana input.
pub struct Mode {
    dicts: Dictionaries,
    prompter: Box<dyn QueryPrompter>,
    saved: Option<SavedBindings>,
    table: &'static KanaTable,
    settings: Arc<Settings>,
}

impl Mode {
    pub fn new(dicts: Dictionaries, settings: Arc<Settings>) -> Self {
        Self {
            dicts,
            prompter: prompter_for(settings.prompt.style),
            saved: None,
            table: KanaTable::get(Script::Hiragana),
            settings,
        }
    }

    pub fn dictionaries(&self) -> &Dictionaries {
        &self.dicts
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn prompter(&self) -> &dyn QueryPrompter {
        &*self.prompter
    }

    pub fn table(&self) -> &'static KanaTable {
        self.table
    }

    pub fn script(&self) -> Script {
        self.table.script()
    }

    pub fn saved_bindings(&self) -> Option<&SavedBindings> {
        self.saved.as_ref()
    }

    /// A session for a question asked while this one is converting. It shares
    /// the dictionaries and starts with nothing saved.
    pub fn nested(&self, prompt: &str) -> Mode {
        Mode {
            dicts: self.dicts.clone(),
            prompter: self.prompter.recurse(prompt),
            saved: None,
            table: KanaTable::get(Script::Hiragana),
            settings: Arc::clone(&self.settings),
        }
    }

    /// Bind the commit key of a fresh editor to enable kana input.
    pub fn install(&self, buf: &mut dyn Buffer) {
        buf.bind_key(
            self.settings.keys.commit,
            NamedCommand::rc("SKK_ENABLE_ROMAJI", |m, b| m.enable_kana(b)),
        );
    }

    /// Capture the current bindings. Only the first call has an effect.
    pub fn backup_keymap(&mut self, buf: &dyn Buffer) {
        if self.saved.is_some() {
            return;
        }
        debug!("backup keymap");
        self.saved = Some(SavedBindings::capture(buf));
    }

    pub fn restore_keymap(&self, buf: &mut dyn Buffer) {
        debug!("restore keymap");
        if let Some(saved) = &self.saved {
            saved.restore(buf);
        }
    }

    pub fn enable_kana(&mut self, buf: &mut dyn Buffer) -> Flow {
        self.backup_keymap(buf);
        self.enable_hiragana(buf);
        Flow::Continue
    }

    fn enable_romaji(&self, buf: &mut dyn Buffer) {
        for key in self.table.trigger_keys() {
            buf.bind_key(Key::new(key), Rc::new(RomajiInput::new(key, self.table)));
        }
        let keys = &self.settings.keys;
        buf.bind_key(
            keys.toggle_script,
            NamedCommand::rc("SKK_TOGGLE_KANA", |m, b| m.toggle_script(b)),
        );
        buf.bind_key(
            keys.abbrev,
            NamedCommand::rc("SKK_ABBREV_MODE", |m, b| m.abbrev_mode(b)),
        );
        for upper in UPPER_TRIGGERS.chars() {
            buf.bind_key(Key::new(upper), Rc::new(ConversionTrigger::new(upper)));
        }
    }

    fn enable_hiragana(&mut self, buf: &mut dyn Buffer) {
        debug!("enable hiragana");
        self.table = KanaTable::get(Script::Hiragana);
        self.enable_romaji(buf);
        let keys = &self.settings.keys;
        let bindings: [(Key, Rc<dyn Command>); 5] = [
            (
                Key::SPACE,
                NamedCommand::rc("SKK_START_HENKAN", |m, b| m.start_conversion(b)),
            ),
            (
                keys.latin,
                NamedCommand::rc("SKK_LATIN_MODE", |m, b| m.latin_mode(b)),
            ),
            (
                keys.fullwidth_latin,
                NamedCommand::rc("SKK_JISX0208_LATIN_MODE", |m, b| m.fullwidth_latin_mode(b)),
            ),
            (
                keys.cancel,
                NamedCommand::rc("SKK_CANCEL", |m, b| m.cancel(b)),
            ),
            (
                keys.commit,
                NamedCommand::rc("SKK_KAKUTEI", |m, b| m.kakutei(b)),
            ),
        ];
        for (key, command) in bindings {
            buf.bind_key(key, command);
        }
    }

    pub fn latin_mode(&mut self, buf: &mut dyn Buffer) -> Flow {
        self.restore_keymap(buf);
        Flow::Continue
    }

    pub fn toggle_script(&mut self, buf: &mut dyn Buffer) -> Flow {
        self.table = self.table.partner();
        debug!(script = ?self.table.script(), "toggle script");
        self.enable_romaji(buf);
        Flow::Continue
    }

    /// Every printable ASCII key inserts its full-width form until the commit
    /// key returns to kana input.
    pub fn fullwidth_latin_mode(&mut self, buf: &mut dyn Buffer) -> Flow {
        for c in ' '..='~' {
            buf.bind_key(Key::new(c), Rc::new(FullWidthInsert(to_fullwidth(c))));
        }
        buf.bind_key(
            self.settings.keys.commit,
            NamedCommand::rc("SKK_JISX0208_LATIN_KAKUTEI", |m, b| {
                m.restore_keymap(b);
                m.enable_kana(b)
            }),
        );
        Flow::Continue
    }

    /// Open a marked region for a Latin reading.
    pub fn abbrev_mode(&mut self, buf: &mut dyn Buffer) -> Flow {
        if seek_marker(buf).is_some() {
            return Flow::Continue;
        }
        self.restore_keymap(buf);
        buf.insert(&MARKER_WHITE.to_string());
        buf.bind_key(
            Key::SPACE,
            NamedCommand::rc("SKK_ABBREV_START_HENKAN", |m, b| {
                let flow = m.start_conversion(b);
                m.enable_kana(b);
                flow
            }),
        );
        Flow::Continue
    }

    pub fn start_conversion(&mut self, buf: &mut dyn Buffer) -> Flow {
        let Some(marker) = seek_marker(buf) else {
            buf.insert(" ");
            return Flow::Continue;
        };
        let reading = buf.substring(marker + 1, buf.cursor());
        if reading.is_empty() {
            return Flow::Continue;
        }
        conversion::Conversion::plain(marker, reading).run(self, buf, None)
    }

    pub fn kakutei(&mut self, buf: &mut dyn Buffer) -> Flow {
        match seek_marker(buf) {
            Some(marker) => {
                buf.remove_at(marker);
                Flow::Continue
            }
            None => self.latin_mode(buf),
        }
    }

    pub fn cancel(&mut self, buf: &mut dyn Buffer) -> Flow {
        match seek_marker(buf) {
            Some(marker) => {
                buf.replace_from(marker, "");
                Flow::Continue
            }
            None => self.latin_mode(buf),
        }
    }
}

struct FullWidthInsert(char);

impl Command for FullWidthInsert {
    fn name(&self) -> &str {
        "SKK_JISX0208_LATIN_INSERT"
    }

    fn call(&self, _: &mut Mode, buf: &mut dyn Buffer) -> Flow {
        buf.insert(&self.0.to_string());
        Flow::Continue
    }
}
