//! How inline questions are drawn relative to the edited line.

use std::io::{self, Write};

use skk_core::settings::PromptStyle;

pub trait QueryPrompter {
    /// Draw the question `text`, leaving the cursor where the answer goes.
    fn prompt(&self, w: &mut dyn Write, text: &str) -> io::Result<()>;
    /// Clear the question and return to the edited line.
    fn line_feed(&self, w: &mut dyn Write) -> io::Result<()>;
    /// Prompter for a question asked from inside the question `original`.
    fn recurse(&self, original: &str) -> Box<dyn QueryPrompter>;
}

/// Ask on the line below the edited line.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryOnNextLine;

impl QueryPrompter for QueryOnNextLine {
    fn prompt(&self, w: &mut dyn Write, text: &str) -> io::Result<()> {
        write!(w, "\n{text} ")
    }

    fn line_feed(&self, w: &mut dyn Write) -> io::Result<()> {
        w.write_all(b"\r\x1b[K\x1b[A")
    }

    fn recurse(&self, original: &str) -> Box<dyn QueryPrompter> {
        Box::new(QueryOnCurrentLine::new(original))
    }
}

/// Ask by overwriting the current line, then restore `original`.
#[derive(Debug, Default, Clone)]
pub struct QueryOnCurrentLine {
    original: String,
}

impl QueryOnCurrentLine {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
        }
    }
}

impl QueryPrompter for QueryOnCurrentLine {
    fn prompt(&self, w: &mut dyn Write, text: &str) -> io::Result<()> {
        write!(w, "\r{text} ")
    }

    fn line_feed(&self, w: &mut dyn Write) -> io::Result<()> {
        write!(w, "\r{} \x1b[K", self.original)
    }

    fn recurse(&self, original: &str) -> Box<dyn QueryPrompter> {
        Box::new(QueryOnCurrentLine::new(original))
    }
}

pub fn prompter_for(style: PromptStyle) -> Box<dyn QueryPrompter> {
    match style {
        PromptStyle::NextLine => Box::new(QueryOnNextLine),
        PromptStyle::CurrentLine => Box::new(QueryOnCurrentLine::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn next_line() {
        let p = QueryOnNextLine;
        assert_eq!(render(|w| p.prompt(w, "ほげ")), "\nほげ ");
        assert_eq!(render(|w| p.line_feed(w)), "\r\x1b[K\x1b[A");
    }

    #[test]
    fn current_line() {
        let p = QueryOnCurrentLine::new("> ");
        assert_eq!(render(|w| p.prompt(w, "ほげ")), "\rほげ ");
        assert_eq!(render(|w| p.line_feed(w)), "\r>  \x1b[K");
    }

    #[test]
    fn recurse_overwrites_question_line() {
        let nested = QueryOnNextLine.recurse("ほげ");
        assert_eq!(render(|w| nested.prompt(w, "ふが")), "\rふが ");
        assert_eq!(render(|w| nested.line_feed(w)), "\rほげ \x1b[K");
        let deeper = nested.recurse("ふが");
        assert_eq!(render(|w| deeper.line_feed(w)), "\rふが \x1b[K");
    }
}
