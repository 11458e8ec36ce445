//! Text analysis for task descriptions.
//!
//! Tokenisation, vocabulary-based skill extraction, length-based
//! complexity and keyword classification. All functions are pure and
//! case-insensitive.

use crate::config::{CategoryRule, ComplexityConfig};

/// Category assigned when no keyword table matches.
pub const DEFAULT_CATEGORY: &str = "General";

/// Splits text into lowercase tokens.
///
/// A token is a maximal run of alphanumerics, `+` or `#`, so "C++" and
/// "C#" survive as tokens.
///
/// ```
/// use u_allocate::matching::text::tokenize;
///
/// assert_eq!(tokenize("Build a C++ driver, fast!"), vec!["build", "a", "c++", "driver", "fast"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Number of whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Whether `phrase` occurs as a contiguous token sequence in `tokens`.
pub fn contains_phrase(tokens: &[String], phrase: &str) -> bool {
    let needle = tokenize(phrase);
    if needle.is_empty() || needle.len() > tokens.len() {
        return false;
    }
    tokens.windows(needle.len()).any(|w| w == needle.as_slice())
}

/// Skills from `vocabulary` mentioned in `text`.
///
/// Returned lowercase, de-duplicated, in vocabulary order.
pub fn extract_skills<'a, I>(text: &str, vocabulary: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let tokens = tokenize(text);
    let mut found: Vec<String> = Vec::new();
    for skill in vocabulary {
        let skill = skill.trim().to_lowercase();
        if skill.is_empty() || found.contains(&skill) {
            continue;
        }
        if contains_phrase(&tokens, &skill) {
            found.push(skill);
        }
    }
    found
}

/// Task complexity in `[0, cap]`, growing with description length.
pub fn task_complexity(text: &str, config: &ComplexityConfig) -> f64 {
    (word_count(text) as f64 * config.per_word).clamp(0.0, config.cap.max(0.0))
}

/// Classifies a description by keyword hits.
///
/// The category with the most matching keywords wins; earlier categories
/// win ties. Returns [`DEFAULT_CATEGORY`] when nothing matches.
pub fn classify(text: &str, categories: &[CategoryRule]) -> String {
    let tokens = tokenize(text);
    let mut best: Option<(&str, usize)> = None;

    for rule in categories {
        let hits = rule
            .keywords
            .iter()
            .filter(|k| contains_phrase(&tokens, k))
            .count();
        if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
            best = Some((rule.name.as_str(), hits));
        }
    }

    best.map(|(name, _)| name.to_string())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}
