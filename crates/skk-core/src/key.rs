//! Key codes delivered by the host, one character per keystroke.
//!
//! Control keys are represented by their C0 code (`C-g` is U+0007). Keys are
//! written in settings files as a single character or in `C-x` notation, with
//! `SPC`, `RET` and `DEL` as named aliases.

use std::fmt;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub struct Key(char);

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum KeyParseError {
    #[error("empty key")]
    Empty,
    #[error("not a control key: {0}")]
    BadControl(String),
    #[error("unknown key: {0}")]
    Unknown(String),
}

impl Key {
    pub const CTRL_C: Key = Key('\x03');
    pub const CTRL_D: Key = Key('\x04');
    pub const CTRL_G: Key = Key('\x07');
    pub const CTRL_H: Key = Key('\x08');
    pub const CTRL_J: Key = Key('\n');
    pub const ENTER: Key = Key('\r');
    pub const SPACE: Key = Key(' ');
    pub const DELETE: Key = Key('\x7f');

    pub const fn new(c: char) -> Self {
        Key(c)
    }

    /// Control-key chord for an ASCII letter (`ctrl('g')` is `C-g`).
    pub fn ctrl(letter: char) -> Option<Key> {
        let upper = letter.to_ascii_uppercase();
        if ('@'..='_').contains(&upper) {
            Some(Key(char::from(upper as u8 & 0x1f)))
        } else {
            None
        }
    }

    pub fn as_char(self) -> char {
        self.0
    }

    /// C0 control characters only; DEL counts as an ordinary key.
    pub fn is_control(self) -> bool {
        self.0 < ' '
    }

    pub fn is_ascii_printable(self) -> bool {
        (' '..='~').contains(&self.0)
    }

    pub fn parse(s: &str) -> Result<Key, KeyParseError> {
        match s {
            "" => return Err(KeyParseError::Empty),
            "SPC" => return Ok(Key::SPACE),
            "RET" => return Ok(Key::ENTER),
            "DEL" => return Ok(Key::DELETE),
            _ => {}
        }
        if let Some(rest) = s.strip_prefix("C-") {
            let mut chars = rest.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Key::ctrl(c).ok_or_else(|| KeyParseError::BadControl(s.into())),
                _ => Err(KeyParseError::BadControl(s.into())),
            };
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Key(c)),
            _ => Err(KeyParseError::Unknown(s.into())),
        }
    }
}

impl From<char> for Key {
    fn from(c: char) -> Self {
        Key(c)
    }
}

impl TryFrom<String> for Key {
    type Error = KeyParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Key::parse(&s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ' ' => f.write_str("SPC"),
            '\r' => f.write_str("RET"),
            '\x7f' => f.write_str("DEL"),
            c if c < ' ' => write!(f, "C-{}", char::from(c as u8 + 0x40).to_ascii_lowercase()),
            c => write!(f, "{c}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_plain_and_named() {
        assert_eq!(Key::parse("x"), Ok(Key::new('x')));
        assert_eq!(Key::parse("X"), Ok(Key::new('X')));
        assert_eq!(Key::parse("SPC"), Ok(Key::SPACE));
        assert_eq!(Key::parse("RET"), Ok(Key::ENTER));
    }

    #[test]
    fn parse_control() {
        assert_eq!(Key::parse("C-g"), Ok(Key::CTRL_G));
        assert_eq!(Key::parse("C-j"), Ok(Key::CTRL_J));
        assert_eq!(Key::parse("C-J"), Ok(Key::CTRL_J));
        assert!(matches!(Key::parse("C-"), Err(KeyParseError::BadControl(_))));
        assert!(matches!(Key::parse("C-gg"), Err(KeyParseError::BadControl(_))));
        assert!(matches!(Key::parse("C-1"), Err(KeyParseError::BadControl(_))));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Key::parse(""), Err(KeyParseError::Empty));
        assert!(matches!(Key::parse("abc"), Err(KeyParseError::Unknown(_))));
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for key in [Key::CTRL_G, Key::CTRL_J, Key::SPACE, Key::new('q'), Key::DELETE] {
            assert_eq!(Key::parse(&key.to_string()), Ok(key));
        }
    }

    #[test]
    fn control_classification() {
        assert!(Key::CTRL_G.is_control());
        assert!(Key::ENTER.is_control());
        assert!(!Key::SPACE.is_control());
        assert!(!Key::DELETE.is_control());
        assert!(Key::new('a').is_ascii_printable());
        assert!(!Key::new('あ').is_ascii_printable());
    }
}
