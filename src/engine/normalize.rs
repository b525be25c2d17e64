/// Folds letters that many native typists do not tell apart onto one
/// canonical letter, so that the comparison measures typing rather than
/// spelling. Applied to both the typed and the expected character.
pub fn normalize_char(ch: char) -> char {
    match ch {
        // '1' is a common ad-hoc stand-in for alef on Latin keyboards.
        'أ' | 'إ' | 'آ' | 'ا' | '1' => 'ا',
        'ى' | 'ي' => 'ي',
        'ؤ' | 'و' => 'و',
        'ه' | 'ة' => 'ه',
        _ => ch,
    }
}

pub fn chars_match(typed: char, expected: char) -> bool {
    normalize_char(typed) == normalize_char(expected)
}
