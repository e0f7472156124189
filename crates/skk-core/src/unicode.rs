//! Character-level conversions between scripts and widths.

/// Check the full Hiragana block (U+3040..U+309F). A few codepoints in the
/// block are unassigned but never appear in romaji tables or readings.
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309F}').contains(&c)
}

/// Convert a hiragana string to katakana.
/// Non-hiragana characters (ー, punctuation, ASCII) are passed through unchanged.
pub fn hiragana_to_katakana(s: &str) -> String {
    s.chars()
        .map(|c| {
            // ゝゞ (U+309D..) sit outside the shifted range of the katakana block
            if is_hiragana(c) && c < '\u{309D}' {
                char::from_u32(c as u32 + 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Map a printable ASCII character to its full-width (JIS X 0208) form.
///
/// Space becomes the ideographic space U+3000; control characters and
/// anything outside ASCII are returned unchanged.
pub fn to_fullwidth(c: char) -> char {
    match c {
        ' ' => '\u{3000}',
        '!'..='~' => char::from_u32(c as u32 - 0x21 + 0xFF01).unwrap_or(c),
        _ => c,
    }
}

pub fn to_fullwidth_str(s: &str) -> String {
    s.chars().map(to_fullwidth).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hiragana_to_katakana() {
        assert_eq!(hiragana_to_katakana("きょうは"), "キョウハ");
        assert_eq!(hiragana_to_katakana("らーめん"), "ラーメン");
        assert_eq!(hiragana_to_katakana("ゔぁ"), "ヴァ");
        assert_eq!(hiragana_to_katakana("、。「」"), "、。「」");
        assert_eq!(hiragana_to_katakana("abc"), "abc");
        assert_eq!(hiragana_to_katakana("カタカナ"), "カタカナ");
    }

    #[test]
    fn test_fullwidth() {
        assert_eq!(to_fullwidth('A'), 'Ａ');
        assert_eq!(to_fullwidth('0'), '０');
        assert_eq!(to_fullwidth('~'), '～');
        assert_eq!(to_fullwidth(' '), '\u{3000}');
        assert_eq!(to_fullwidth('\x07'), '\x07');
        assert_eq!(to_fullwidth('あ'), 'あ');
        assert_eq!(to_fullwidth_str("skk 1"), "ｓｋｋ\u{3000}１");
    }
}
