//! Numeral abstraction for dictionary readings.
//!
//! A reading such as `とし5` is looked up as `とし#`; candidates of the
//! placeholder entry carry `#n` codes that are rendered from the captured digit
//! run according to the style digit `n`.

use crate::unicode::to_fullwidth_str;

/// Sentinel that replaces a digit run in a reading and prefixes style codes
/// in candidates.
pub const PLACEHOLDER: char = '#';

const KANJI_DIGITS: [char; 10] = ['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九'];
const SMALL_UNITS: [&str; 4] = ["", "十", "百", "千"];
const GROUP_UNITS: [&str; 5] = ["", "万", "億", "兆", "京"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumeralStyle {
    /// `#0`: digits as typed.
    Verbatim,
    /// `#1`: full-width digits.
    FullWidth,
    /// `#2`: kanji numerals with place values (千二百三十四).
    KanjiPositional,
    /// `#3`: kanji numerals digit by digit (一二三四).
    KanjiDigits,
}

impl NumeralStyle {
    /// Style for the digit following a placeholder, or `None` if the pair is
    /// not a numeral code. Codes without a dedicated rendering fall back to
    /// verbatim digits.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            '0' => Some(Self::Verbatim),
            '1' => Some(Self::FullWidth),
            '2' => Some(Self::KanjiPositional),
            '3' => Some(Self::KanjiDigits),
            '4' | '5' | '9' => Some(Self::Verbatim),
            _ => None,
        }
    }

    pub fn render(self, digits: &str) -> String {
        match self {
            Self::Verbatim => digits.to_string(),
            Self::FullWidth => to_fullwidth_str(digits),
            Self::KanjiPositional => to_kanji_positional(digits),
            Self::KanjiDigits => to_kanji_digits(digits),
        }
    }
}

/// A reading with its first digit run replaced by [`PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumeralKey {
    pub reading: String,
    pub digits: String,
}

/// Abstract the first maximal run of ASCII digits in `reading`.
pub fn abstract_digits(reading: &str) -> Option<NumeralKey> {
    let start = reading.find(|c: char| c.is_ascii_digit())?;
    let len = reading[start..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(reading.len() - start);
    let end = start + len;
    let mut abstracted = String::with_capacity(reading.len());
    abstracted.push_str(&reading[..start]);
    abstracted.push(PLACEHOLDER);
    abstracted.push_str(&reading[end..]);
    Some(NumeralKey {
        reading: abstracted,
        digits: reading[start..end].to_string(),
    })
}

/// Replace every `#n` code in `candidate` with the rendering of `digits`.
pub fn expand(candidate: &str, digits: &str) -> String {
    let mut out = String::with_capacity(candidate.len());
    let mut chars = candidate.chars().peekable();
    while let Some(c) = chars.next() {
        if c == PLACEHOLDER {
            if let Some(style) = chars.peek().copied().and_then(NumeralStyle::from_code) {
                chars.next();
                out.push_str(&style.render(digits));
                continue;
            }
        }
        out.push(c);
    }
    out
}

pub fn to_kanji_digits(digits: &str) -> String {
    digits
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => KANJI_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// Kanji numerals with place values, grouped by 万 (10^4).
///
/// Runs longer than the largest group unit supports are rendered digit by
/// digit instead.
pub fn to_kanji_positional(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        return if digits.is_empty() {
            String::new()
        } else {
            KANJI_DIGITS[0].to_string()
        };
    }
    if trimmed.len() > GROUP_UNITS.len() * 4 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return to_kanji_digits(digits);
    }

    let values: Vec<usize> = trimmed.bytes().map(|b| (b - b'0') as usize).collect();
    let group_count = values.len().div_ceil(4);
    let mut out = String::new();
    for group in (0..group_count).rev() {
        let mut group_text = String::new();
        for place in (0..4).rev() {
            let power = group * 4 + place;
            if power >= values.len() {
                continue;
            }
            let d = values[values.len() - 1 - power];
            if d == 0 {
                continue;
            }
            if d != 1 || place == 0 {
                group_text.push(KANJI_DIGITS[d]);
            }
            group_text.push_str(SMALL_UNITS[place]);
        }
        if !group_text.is_empty() {
            out.push_str(&group_text);
            out.push_str(GROUP_UNITS[group]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abstract_digits() {
        let key = abstract_digits("とし5").unwrap();
        assert_eq!(key.reading, "とし#");
        assert_eq!(key.digits, "5");

        let key = abstract_digits("だい12かい").unwrap();
        assert_eq!(key.reading, "だい#かい");
        assert_eq!(key.digits, "12");
    }

    #[test]
    fn test_abstract_first_run_only() {
        let key = abstract_digits("1と2").unwrap();
        assert_eq!(key.reading, "#と2");
        assert_eq!(key.digits, "1");
    }

    #[test]
    fn test_abstract_without_digits() {
        assert_eq!(abstract_digits("ほげ"), None);
        assert_eq!(abstract_digits(""), None);
    }

    #[test]
    fn test_expand_styles() {
        assert_eq!(expand("#0年", "5"), "5年");
        assert_eq!(expand("#1年", "25"), "２５年");
        assert_eq!(expand("#2年", "5"), "五年");
        assert_eq!(expand("#3年", "1024"), "一〇二四年");
        assert_eq!(expand("#2年", "1024"), "千二十四年");
    }

    #[test]
    fn test_expand_zero() {
        assert_eq!(expand("#2", "0"), "〇");
        assert_eq!(expand("#3", "0"), "〇");
    }

    #[test]
    fn test_expand_fallback_and_literal() {
        assert_eq!(expand("#4回", "7"), "7回");
        assert_eq!(expand("#9", "7"), "7");
        // not a numeral code: left alone
        assert_eq!(expand("#6", "7"), "#6");
        assert_eq!(expand("C#", "7"), "C#");
        assert_eq!(expand("#0月#0日", "3"), "3月3日");
    }

    #[test]
    fn test_expand_is_noop_on_plain_text() {
        assert_eq!(expand("五年", "5"), "五年");
    }

    #[test]
    fn test_positional() {
        assert_eq!(to_kanji_positional("1"), "一");
        assert_eq!(to_kanji_positional("10"), "十");
        assert_eq!(to_kanji_positional("11"), "十一");
        assert_eq!(to_kanji_positional("20"), "二十");
        assert_eq!(to_kanji_positional("105"), "百五");
        assert_eq!(to_kanji_positional("1234"), "千二百三十四");
        assert_eq!(to_kanji_positional("10000"), "一万");
        assert_eq!(to_kanji_positional("11000"), "一万千");
        assert_eq!(to_kanji_positional("100000000"), "一億");
        assert_eq!(to_kanji_positional("120030004"), "一億二千三万四");
        assert_eq!(to_kanji_positional("007"), "七");
        assert_eq!(to_kanji_positional("000"), "〇");
    }

    #[test]
    fn test_positional_overflow_falls_back() {
        let long = "1".repeat(21);
        assert_eq!(to_kanji_positional(&long), "一".repeat(21));
    }

    #[test]
    fn test_fullwidth() {
        assert_eq!(NumeralStyle::FullWidth.render("0"), "０");
        assert_eq!(NumeralStyle::FullWidth.render("10000"), "１００００");
    }
}
