
use std::sync::Arc;

use skk_core::dict::{Candidate, Dictionaries, SystemDictionary};
use skk_core::key::Key;
use skk_core::settings::Settings;
use skk_core::user_dict::UserDictionary;

use crate::{LineEditor, Mode, PromptError, ScriptedTerminal};

pub(super) fn words(list: &[&str]) -> Vec<Candidate> {
    list.iter().map(|s| Candidate::new(*s)).collect()
}

pub(super) fn make_test_dicts() -> Dictionaries {
    let system = SystemDictionary::from_entries([
        ("かく".to_string(), words(&["書く;write", "画く"])),
        ("かk".to_string(), words(&["書", "描"])),
        ("とし#".to_string(), words(&["#0年", "#2年"])),
        ("あい".to_string(), words(&["愛"])),
        ("skk".to_string(), words(&["SKK"])),
        (
            "かん".to_string(),
            words(&[
                "缶", "管", "間", "感", "館", "巻", "刊", "完", "官", "寒", "換", "冠", "幹", "甘",
            ]),
        ),
    ]);
    Dictionaries::new(Arc::new(UserDictionary::new()), Arc::new(system))
}

/// Keys from a compact notation: `^x` is the control key for `x`, anything
/// else is typed as is.
pub(super) fn keys(s: &str) -> Vec<Key> {
    let mut out = Vec::new();
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '^' {
            if let Some(key) = chars.next().and_then(Key::ctrl) {
                out.push(key);
                continue;
            }
        }
        out.push(Key::new(c));
    }
    out
}

pub(super) struct Run {
    pub result: Result<String, PromptError>,
    pub text: String,
    pub output: String,
    pub remaining: usize,
}

impl Run {
    /// The accepted line; panics if the line was not accepted.
    pub fn line(&self) -> &str {
        match &self.result {
            Ok(line) => line,
            Err(e) => panic!("line not accepted: {e} (text {:?})", self.text),
        }
    }
}

pub(super) fn type_keys_with(dicts: &Dictionaries, settings: Settings, input: &str) -> Run {
    let mut terminal = ScriptedTerminal::new(keys(input));
    let mut mode = Mode::new(dicts.clone(), Arc::new(settings));
    let (result, text) = {
        let mut editor = LineEditor::new(&mut terminal, "> ");
        mode.install(&mut editor);
        let result = editor.run(&mut mode);
        (result, editor.text())
    };
    Run {
        result,
        text,
        output: terminal.output(),
        remaining: terminal.remaining(),
    }
}

/// Run a fresh editor over `input` with kana input installed on C-j.
pub(super) fn type_keys(dicts: &Dictionaries, input: &str) -> Run {
    type_keys_with(dicts, Settings::default(), input)
}
