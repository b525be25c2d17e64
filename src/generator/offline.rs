use std::sync::Arc;

use crate::error::FetchError;
use crate::generator::ExtractSource;

/// Serves the paragraphs of a local text file as extracts, one per fetch,
/// starting at `start` and visiting each paragraph at most once.
pub struct OfflineSource {
    paragraphs: Arc<[String]>,
    next: usize,
    served: usize,
}

impl OfflineSource {
    pub fn new(paragraphs: Arc<[String]>, start: usize) -> Self {
        let next = if paragraphs.is_empty() {
            0
        } else {
            start % paragraphs.len()
        };
        Self {
            paragraphs,
            next,
            served: 0,
        }
    }
}

impl ExtractSource for OfflineSource {
    fn fetch_extract(&mut self) -> Result<String, FetchError> {
        if self.served >= self.paragraphs.len() {
            return Err(FetchError::Exhausted);
        }
        let paragraph = self.paragraphs[self.next].clone();
        self.next = (self.next + 1) % self.paragraphs.len();
        self.served += 1;
        Ok(paragraph)
    }
}

/// Splits text on blank lines, dropping empty paragraphs.
pub fn split_paragraphs(text: &str) -> Arc<[String]> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(line.trim());
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs.into()
}
