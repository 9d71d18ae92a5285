//! Character-level helpers for kana and full-width conversion.

/// Hiragana codepoints that have a katakana counterpart at a fixed +0x60
/// offset. The voiced-sound marks (U+309B, U+309C) are shared by both scripts
/// and stay as they are.
pub fn is_hiragana(c: char) -> bool {
    ('\u{3040}'..='\u{309A}').contains(&c)
}

pub fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

/// Convert a hiragana string to katakana.
///
/// The romaji table spells "vu" as う + U+309B, which has no single hiragana
/// codepoint; after shifting, the pair collapses into ヴ.
pub fn hiragana_to_katakana(s: &str) -> String {
    let shifted: String = s
        .chars()
        .map(|c| {
            if is_hiragana(c) {
                char::from_u32(c as u32 + 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect();
    shifted.replace("ウ\u{309B}", "ヴ")
}

/// Map a printable ASCII character to its full-width form.
/// Space becomes the ideographic space; anything outside `!`..=`~` is
/// returned unchanged.
pub fn to_full_width(c: char) -> char {
    match c {
        ' ' => '\u{3000}',
        '!'..='~' => char::from_u32(c as u32 - 0x20 + 0xFF00).unwrap_or(c),
        _ => c,
    }
}
