//! Character classes of the Arabic script used by the cleaning rules and the
//! purity checks on finished passages.

pub const TATWEEL: char = '\u{0640}';

pub fn is_arabic_block(ch: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&ch)
}

/// Harakat, Quranic annotation signs and the other combining marks of the
/// Arabic block. Typing compares base letters only.
pub fn is_diacritic(ch: char) -> bool {
    matches!(
        ch,
        '\u{0610}'..='\u{061A}' | '\u{064B}'..='\u{065F}' | '\u{0670}' | '\u{06D6}'..='\u{06ED}'
    )
}

pub fn is_arabic_digit(ch: char) -> bool {
    matches!(ch, '\u{0660}'..='\u{0669}' | '\u{06F0}'..='\u{06F9}')
}

/// A base letter of the Arabic block: alphabetic, not a combining mark, not
/// the elongation character.
pub fn is_arabic_letter(ch: char) -> bool {
    is_arabic_block(ch) && ch.is_alphabetic() && !is_diacritic(ch) && ch != TATWEEL
}

/// True when every character is an Arabic letter or a single ASCII space
/// between words.
pub fn is_practice_text(text: &str) -> bool {
    text.chars().all(|ch| ch == ' ' || is_arabic_letter(ch))
        && !text.starts_with(' ')
        && !text.ends_with(' ')
        && !text.contains("  ")
}
