//! Turns a raw encyclopedia extract into a run of short, plain Arabic words.
//!
//! Each rule is a pure `&str -> String` transformation. A [`RuleSet`] folds
//! them left to right. Order matters: the token rules near the end assume
//! brackets, Latin text and diacritics are already gone.

use std::sync::LazyLock;

use icu_normalizer::ComposingNormalizerBorrowed;
use regex::Regex;

use crate::engine::filter::{TATWEEL, is_arabic_block, is_arabic_letter, is_diacritic};

/// Tokens of this many characters or more are treated as concatenation
/// artifacts or transliterations.
pub const MAX_TOKEN_CHARS: usize = 9;

/// Length of a run of one repeated character that marks a token as garbled.
pub const REPEAT_RUN: usize = 3;

/// Site, reference and navigation words. A token starting with any of these
/// is dropped together with its suffix. Stored in the canonical letter forms
/// produced by [`canonicalize_letters`].
const BOILERPLATE_PREFIXES: &[&str] = &[
    "كوم",
    "دوت",
    "صفحة",
    "موقع",
    "ويكيبيديا",
    "مراجع",
    "المراجع",
    "وصلات",
    "خارجية",
    "ببليوغرافيا",
    "ملاحظات",
    "مصادر",
    "دراسات",
    "قراءات",
    "كتب",
    "مجلات",
    "مواقع",
    "انظر",
];

/// Whole words dropped only on an exact match.
const BOILERPLATE_WORDS: &[&str] = &[
    "مونتيروني",
    "ديسكوغز",
    "بيزبول",
    "رفرنس",
    "كوم",
    "ويكيبيديا",
    "اوليمبيديا",
    "انظر",
    "ايضا",
    "وصلات",
    "خارجية",
    "ببليوغرافيا",
    "ملاحظات",
    "مصادر",
    "دراسات",
    "قراءات",
    "اضافية",
    "كتب",
    "مجلات",
    "مواقع",
    "مراجع",
    "المراجع",
];

/// Punctuation of the script that survives the block filter.
const SCRIPT_PUNCTUATION: &[char] = &[
    '،', '؛', TATWEEL, '؟', '‘', '’', '“', '”', '٬', '٫', '٪', '٭', '۔', '؍', '؞', '۞', '۩',
];

static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*?\]|\(.*?\)").expect("bracket pattern is valid"));

pub type RuleFn = fn(&str) -> String;

/// A named, stateless text transformation.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: RuleFn,
}

const fn rule(name: &'static str, apply: RuleFn) -> Rule {
    Rule { name, apply }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Rule").field(&self.name).finish()
    }
}

#[derive(Clone, Debug)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The full pipeline for Arabic Wikipedia extracts.
    pub fn arabic() -> Self {
        Self::new(vec![
            rule("fold_compatibility_forms", fold_compatibility_forms),
            rule("strip_bracketed", strip_bracketed),
            rule("strip_latin_and_digits", strip_latin_and_digits),
            rule("strip_diacritics", strip_diacritics),
            rule("canonicalize_letters", canonicalize_letters),
            rule("keep_arabic_block", keep_arabic_block),
            rule("strip_script_punctuation", strip_script_punctuation),
            rule("drop_repeated_runs", drop_repeated_runs),
            rule("drop_boilerplate_prefixes", drop_boilerplate_prefixes),
            rule("drop_long_tokens", drop_long_tokens),
            rule("drop_boilerplate_words", drop_boilerplate_words),
            rule("collapse_whitespace", collapse_whitespace),
        ])
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn apply(&self, text: &str) -> String {
        self.rules
            .iter()
            .fold(text.to_string(), |acc, rule| (rule.apply)(&acc))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::arabic()
    }
}

/// NFKC, so presentation forms (e.g. the lam-alef ligature) become base
/// letters instead of being discarded as out-of-block characters.
pub fn fold_compatibility_forms(text: &str) -> String {
    ComposingNormalizerBorrowed::new_nfkc()
        .normalize(text)
        .into_owned()
}

/// Removes `[...]` citation markers and `(...)` glosses. Spans do not cross
/// line breaks.
pub fn strip_bracketed(text: &str) -> String {
    BRACKETED.replace_all(text, "").into_owned()
}

pub fn strip_latin_and_digits(text: &str) -> String {
    text.chars().filter(|ch| !ch.is_ascii_alphanumeric()).collect()
}

pub fn strip_diacritics(text: &str) -> String {
    text.chars().filter(|&ch| !is_diacritic(ch)).collect()
}

/// Hamza carriers on alef fold to bare alef and alef maqsura to ya.
pub fn canonicalize_letters(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            'أ' | 'إ' | 'آ' => 'ا',
            'ى' => 'ي',
            _ => ch,
        })
        .collect()
}

pub fn keep_arabic_block(text: &str) -> String {
    text.chars()
        .filter(|&ch| is_arabic_block(ch) || ch.is_whitespace())
        .collect()
}

/// Drops the listed punctuation and whatever else in the block is not a
/// letter (digits, currency and number signs).
pub fn strip_script_punctuation(text: &str) -> String {
    text.chars()
        .filter(|&ch| {
            !SCRIPT_PUNCTUATION.contains(&ch) && (ch.is_whitespace() || is_arabic_letter(ch))
        })
        .collect()
}

pub fn drop_repeated_runs(text: &str) -> String {
    retain_tokens(text, |token| !has_repeated_run(token, REPEAT_RUN))
}

pub fn drop_boilerplate_prefixes(text: &str) -> String {
    retain_tokens(text, |token| {
        !BOILERPLATE_PREFIXES
            .iter()
            .any(|prefix| token.starts_with(prefix))
    })
}

pub fn drop_long_tokens(text: &str) -> String {
    retain_tokens(text, |token| token.chars().count() < MAX_TOKEN_CHARS)
}

pub fn drop_boilerplate_words(text: &str) -> String {
    retain_tokens(text, |token| !BOILERPLATE_WORDS.contains(&token))
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn retain_tokens(text: &str, keep: impl Fn(&str) -> bool) -> String {
    text.split_whitespace()
        .filter(|token| keep(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn has_repeated_run(token: &str, run: usize) -> bool {
    let mut prev = None;
    let mut count = 0;
    for ch in token.chars() {
        if Some(ch) == prev {
            count += 1;
        } else {
            prev = Some(ch);
            count = 1;
        }
        if count >= run {
            return true;
        }
    }
    false
}
