use std::path::Path;
use std::sync::Arc;

use tracing::info;

use skk_core::dict::Dictionaries;
use skk_core::key::Key;
use skk_core::settings::Settings;
use skk_session::{LineEditor, Mode, PromptError, ScriptedTerminal};

use super::{load_dictionaries, load_settings};
use crate::{dict_source, CliError};

/// Parses key notation: `^x` is the control chord for `x`, `^^` a literal
/// caret, anything else is typed as is.
pub fn parse_keys(notation: &str) -> Result<Vec<Key>, CliError> {
    let mut keys = Vec::new();
    let mut chars = notation.chars();
    while let Some(c) = chars.next() {
        if c != '^' {
            keys.push(Key::new(c));
            continue;
        }
        match chars.next() {
            Some('^') => keys.push(Key::new('^')),
            Some(letter) => keys.push(
                Key::ctrl(letter)
                    .ok_or_else(|| CliError::Keys(format!("^{letter} is not a control key")))?,
            ),
            None => return Err(CliError::Keys("trailing ^".into())),
        }
    }
    Ok(keys)
}

#[derive(Debug)]
pub struct Simulation {
    pub result: Result<String, PromptError>,
    pub output: String,
    pub unread: usize,
}

/// Replays `keys` through a line editor with the input method installed.
pub fn simulate(dicts: &Dictionaries, settings: Settings, keys: Vec<Key>) -> Simulation {
    let mut terminal = ScriptedTerminal::new(keys);
    let mut mode = Mode::new(dicts.clone(), Arc::new(settings));
    let result = {
        let mut editor = LineEditor::new(&mut terminal, "> ");
        mode.install(&mut editor);
        editor.run(&mut mode)
    };
    Simulation {
        result,
        output: terminal.output(),
        unread: terminal.remaining(),
    }
}

pub struct SimulateOptions<'a> {
    pub user_file: Option<&'a str>,
    pub settings_file: Option<&'a str>,
    pub show_output: bool,
    pub save_user: bool,
}

pub fn simulate_cmd(dict_file: &str, notation: &str, opts: &SimulateOptions<'_>) {
    let keys = die!(parse_keys(notation), "Error: {}");
    let settings = die!(
        load_settings(opts.settings_file.map(Path::new)),
        "Error loading settings: {}"
    );
    let dicts = die!(
        load_dictionaries(Path::new(dict_file), opts.user_file.map(Path::new)),
        "Error loading dictionaries: {}"
    );

    let sim = simulate(&dicts, settings, keys);
    info!(unread = sim.unread, "simulation finished");

    if opts.show_output {
        println!("{:?}", sim.output);
    }
    match &sim.result {
        Ok(line) => println!("{line}"),
        Err(PromptError::Aborted) => println!("(aborted)"),
        Err(e) => println!("(ended: {e})"),
    }

    if opts.save_user {
        match opts.user_file {
            Some(path) => die!(
                dict_source::save_user(Path::new(path), dicts.user()),
                "Error saving user dictionary: {}"
            ),
            None => eprintln!("--save-user needs --user"),
        }
    }
}
