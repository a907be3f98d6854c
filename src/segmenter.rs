//! # Segmenter Module
//!
//! Splits a transcribed utterance into independent order clauses on
//! conjunctions ("and", "और", ...) and separators (",", "।", ...).

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

/// Words that join two ordered items
pub const DEFAULT_CONJUNCTIONS: &[&str] = &["and", "aur", "और", "तथा"];

/// Characters that always end a clause
const SEPARATOR_CLASS: &str = r"[,;&\x{0964}]";

lazy_static! {
    static ref DEFAULT_SPLIT_REGEX: Regex = Regex::new(&split_pattern(DEFAULT_CONJUNCTIONS))
        .expect("Default segment pattern should be valid");
}

fn split_pattern(conjunctions: &[&str]) -> String {
    let words: Vec<String> = conjunctions
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .map(|w| regex::escape(&w))
        .collect();

    if words.is_empty() {
        SEPARATOR_CLASS.to_string()
    } else {
        format!(r"\b(?:{})\b|{}", words.join("|"), SEPARATOR_CLASS)
    }
}

/// Map Devanagari digits (०-९) to ASCII digits, leaving other text as is
pub fn normalize_digits(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{0966}'..='\u{096F}' => char::from(b'0' + (c as u32 - 0x0966) as u8),
            _ => c,
        })
        .collect()
}

/// Utterance splitter
#[derive(Debug, Clone)]
pub struct Segmenter {
    pattern: Regex,
}

impl Segmenter {
    /// Segmenter using the default English + Hindi conjunctions
    pub fn new() -> Self {
        Self {
            pattern: DEFAULT_SPLIT_REGEX.clone(),
        }
    }

    /// Segmenter with a custom conjunction list; separators are always kept
    pub fn with_conjunctions(conjunctions: &[&str]) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&split_pattern(conjunctions))?;
        Ok(Self { pattern })
    }

    /// Split an utterance into clauses, in spoken order
    ///
    /// The text is lowercased and Devanagari digits are mapped to ASCII
    /// before splitting. Empty and whitespace-only clauses are dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use voice_bill::segmenter::Segmenter;
    ///
    /// let segmenter = Segmenter::new();
    /// assert_eq!(
    ///     segmenter.segment("1 kg Onion and 2 kg potato"),
    ///     vec!["1 kg onion", "2 kg potato"]
    /// );
    /// assert!(segmenter.segment("  ").is_empty());
    /// ```
    pub fn segment(&self, utterance: &str) -> Vec<String> {
        let text = normalize_digits(&utterance.to_lowercase());
        let segments: Vec<String> = self
            .pattern
            .split(&text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        trace!("Segmented '{}' into {:?}", text, segments);
        debug!("Utterance split into {} clauses", segments.len());
        segments
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_on_commas_and_hindi_conjunction() {
        let segmenter = Segmenter::new();
        let clauses = segmenter.segment("2 किलो चीनी और 1 लीटर दूध, 3 bread");
        assert_eq!(clauses, vec!["2 किलो चीनी", "1 लीटर दूध", "3 bread"]);
    }

    #[test]
    fn test_conjunction_must_be_whole_word() {
        let segmenter = Segmenter::new();
        // "sand" and "candy" contain "and" but are not conjunctions
        assert_eq!(segmenter.segment("2 kg sandy candy"), vec!["2 kg sandy candy"]);
    }

    #[test]
    fn test_drops_empty_segments() {
        let segmenter = Segmenter::new();
        assert_eq!(segmenter.segment(", and ,1 kg rice,,"), vec!["1 kg rice"]);
        assert!(segmenter.segment("").is_empty());
    }

    #[test]
    fn test_devanagari_digits_are_normalized() {
        assert_eq!(normalize_digits("२ किलो"), "2 किलो");
        assert_eq!(normalize_digits("१.५"), "1.5");
        let segmenter = Segmenter::new();
        assert_eq!(segmenter.segment("५०० ग्राम दाल"), vec!["500 ग्राम दाल"]);
    }

    #[test]
    fn test_custom_conjunctions() {
        let segmenter = Segmenter::with_conjunctions(&["plus"]).unwrap();
        assert_eq!(segmenter.segment("1 kg rice plus 2 kg salt"), vec!["1 kg rice", "2 kg salt"]);
        // default conjunctions are replaced, separators stay
        assert_eq!(segmenter.segment("rice and salt, tea"), vec!["rice and salt", "tea"]);
    }
}
