use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::generator::ExtractSource;
use crate::generator::cleaning::RuleSet;

pub const DEFAULT_MAX_ATTEMPTS: usize = 15;

/// The fixed text of one practice session. An empty passage stands for a
/// failed build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Passage {
    chars: Vec<char>,
}

impl Passage {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn get(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    pub fn word_count(&self) -> usize {
        self.text().split_whitespace().count()
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }
}

/// Cleaned words gathered across the fetch attempts of one build.
#[derive(Debug, Default)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    pub fn extend_from(&mut self, cleaned: &str) {
        self.words.extend(cleaned.split_whitespace().map(str::to_string));
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn take_text(&self, count: usize) -> String {
        self.words
            .iter()
            .take(count)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub struct PassageBuilder<S> {
    source: S,
    rules: RuleSet,
    cancel: Option<Arc<AtomicBool>>,
}

impl<S: ExtractSource> PassageBuilder<S> {
    pub fn new(source: S) -> Self {
        Self::with_rules(source, RuleSet::arabic())
    }

    pub fn with_rules(source: S, rules: RuleSet) -> Self {
        Self {
            source,
            rules,
            cancel: None,
        }
    }

    /// Stops the build before its next fetch once `flag` is set. A cancelled
    /// build returns an empty passage.
    pub fn cancel_on(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Fetches and cleans extracts until `desired_words` words are collected
    /// or `max_attempts` fetches have been made. Fetch failures count as
    /// attempts that yielded nothing.
    ///
    /// Returns the first `desired_words` words, or an empty passage when fewer
    /// than half of them could be collected.
    pub fn build(&mut self, desired_words: usize, max_attempts: usize) -> Passage {
        if desired_words == 0 {
            return Passage::empty();
        }

        let mut pool = WordPool::default();
        for attempt in 1..=max_attempts {
            if self.is_cancelled() {
                debug!(attempt, "build cancelled");
                return Passage::empty();
            }
            let raw = match self.source.fetch_extract() {
                Ok(raw) => raw,
                Err(err) if err.is_timeout() => {
                    warn!(attempt, "extract fetch timed out");
                    continue;
                }
                Err(err) => {
                    warn!(attempt, error = %err, "extract fetch failed");
                    continue;
                }
            };

            let cleaned = self.rules.apply(&raw);
            pool.extend_from(&cleaned);
            debug!(
                attempt,
                raw_chars = raw.chars().count(),
                collected = pool.len(),
                "cleaned extract"
            );

            if pool.len() >= desired_words {
                break;
            }
        }

        let text = pool.take_text(desired_words);
        if text.trim().is_empty() || pool.len() * 2 < desired_words {
            info!(
                collected = pool.len(),
                desired = desired_words,
                "not enough text for a passage"
            );
            return Passage::empty();
        }

        info!(
            words = pool.len().min(desired_words),
            desired = desired_words,
            "passage ready"
        );
        Passage::new(&text)
    }
}
