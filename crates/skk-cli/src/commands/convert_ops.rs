use std::path::Path;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use skk_core::dict::Candidate;
use skk_core::numeric::NumeralStyle;
use skk_core::romaji::{convert_romaji, KanaTable, Script};

use super::load_dictionaries;
use crate::CliError;

pub fn romaji_cmd(input: &str, katakana: bool) {
    let script = if katakana {
        Script::Katakana
    } else {
        Script::Hiragana
    };
    println!("{}", convert_romaji(KanaTable::get(script), input));
}

pub fn numeral_cmd(code: char, digits: &str) {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        eprintln!("Error: {digits:?} is not a digit run");
        std::process::exit(1);
    }
    match NumeralStyle::from_code(code) {
        Some(style) => println!("{}", style.render(digits)),
        None => {
            eprintln!("Error: unknown numeral style #{code}");
            std::process::exit(1);
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LookupRow {
    pub word: String,
    pub annotation: Option<String>,
}

impl From<&Candidate> for LookupRow {
    fn from(c: &Candidate) -> Self {
        Self {
            word: c.word().to_string(),
            annotation: c.annotation().map(str::to_string),
        }
    }
}

pub fn lookup_rows(
    dict_file: &Path,
    user_file: Option<&Path>,
    reading: &str,
) -> Result<Vec<LookupRow>, CliError> {
    let dicts = load_dictionaries(dict_file, user_file)?;
    Ok(dicts
        .lookup(reading)
        .unwrap_or_default()
        .iter()
        .map(LookupRow::from)
        .collect())
}

pub fn lookup_cmd(dict_file: &str, user_file: Option<&str>, reading: &str, json: bool) {
    let rows = die!(
        lookup_rows(Path::new(dict_file), user_file.map(Path::new), reading),
        "Error: {}"
    );
    if json {
        let out = die!(serde_json::to_string_pretty(&rows), "Error: {}");
        println!("{out}");
        return;
    }
    if rows.is_empty() {
        println!("No entries found for \"{reading}\"");
        return;
    }
    let width = rows.iter().map(|r| r.word.width()).max().unwrap_or(0);
    for (i, row) in rows.iter().enumerate() {
        match &row.annotation {
            Some(note) => {
                let pad = " ".repeat(width - row.word.width());
                println!("{:>3}  {}{pad}  ; {note}", i + 1, row.word);
            }
            None => println!("{:>3}  {}", i + 1, row.word),
        }
    }
}
