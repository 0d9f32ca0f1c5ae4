//! Text feature extraction
//!
//! Maps a query string to a fixed 9-element vector. Stateless and
//! deterministic; empty or whitespace-only text is rejected because the token
//! length statistics are undefined for it.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CoreError, CoreResult};

/// Width of every extracted vector
pub const FEATURE_COUNT: usize = 9;

/// Column names, in extraction order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "char_length",
    "token_count",
    "special_char_count",
    "mean_token_length",
    "max_token_length",
    "min_token_length",
    "uppercase_count",
    "digit_count",
    "sentence_end_count",
];

static WHITESPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_RUN_RE regex should compile"));

static SPECIAL_CHAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("SPECIAL_CHAR_RE regex should compile"));

static UPPERCASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]").expect("UPPERCASE_RE regex should compile"));

static DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]").expect("DIGIT_RE regex should compile"));

static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]").expect("SENTENCE_END_RE regex should compile"));

pub struct FeatureExtractor;

impl FeatureExtractor {
    pub fn extract(text: &str) -> CoreResult<Vec<f64>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CoreError::DegenerateInput);
        }

        let token_lengths: Vec<usize> = WHITESPACE_RUN_RE
            .split(trimmed)
            .map(|token| token.chars().count())
            .collect();
        let token_count = token_lengths.len();
        let total: usize = token_lengths.iter().sum();
        let max = token_lengths.iter().copied().max().unwrap_or(0);
        let min = token_lengths.iter().copied().min().unwrap_or(0);

        Ok(vec![
            text.chars().count() as f64,
            token_count as f64,
            SPECIAL_CHAR_RE.find_iter(text).count() as f64,
            total as f64 / token_count as f64,
            max as f64,
            min as f64,
            UPPERCASE_RE.find_iter(text).count() as f64,
            DIGIT_RE.find_iter(text).count() as f64,
            SENTENCE_END_RE.find_iter(text).count() as f64,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_known_sentence() {
        let features = FeatureExtractor::extract("Hello World, 42 times!").unwrap();
        assert_eq!(features.len(), FEATURE_COUNT);
        assert_eq!(features[0], 22.0); // chars
        assert_eq!(features[1], 4.0); // tokens
        assert_eq!(features[2], 2.0); // ',' and '!'
        assert_eq!(features[3], 19.0 / 4.0); // 5 + 6 + 2 + 6
        assert_eq!(features[4], 6.0);
        assert_eq!(features[5], 2.0);
        assert_eq!(features[6], 2.0); // H, W
        assert_eq!(features[7], 2.0);
        assert_eq!(features[8], 1.0);
    }

    #[test]
    fn test_whitespace_runs_are_one_separator() {
        let features = FeatureExtractor::extract("a \t\n  bb").unwrap();
        assert_eq!(features[1], 2.0);
        assert_eq!(features[4], 2.0);
        assert_eq!(features[5], 1.0);
        // Whitespace is neither special nor counted in tokens
        assert_eq!(features[2], 0.0);
    }

    #[test]
    fn test_surrounding_whitespace_ignored_for_tokens() {
        let features = FeatureExtractor::extract("  why?  ").unwrap();
        assert_eq!(features[0], 8.0);
        assert_eq!(features[1], 1.0);
        assert_eq!(features[5], 4.0);
        assert_eq!(features[8], 1.0);
    }

    #[test]
    fn test_non_ascii_counts_as_special() {
        let features = FeatureExtractor::extract("café").unwrap();
        assert_eq!(features[0], 4.0);
        assert_eq!(features[2], 1.0);
        assert_eq!(features[6], 0.0);
    }

    #[test]
    fn test_degenerate_input_rejected() {
        assert_eq!(
            FeatureExtractor::extract(""),
            Err(CoreError::DegenerateInput)
        );
        assert_eq!(
            FeatureExtractor::extract(" \t\n"),
            Err(CoreError::DegenerateInput)
        );
    }

    #[test]
    fn test_deterministic() {
        let text = "Is the 3rd Option better? Maybe.";
        assert_eq!(
            FeatureExtractor::extract(text).unwrap(),
            FeatureExtractor::extract(text).unwrap()
        );
    }
}
