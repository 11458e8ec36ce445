//! Text similarity between task descriptions and skill lists.

use std::collections::HashMap;
use std::fmt::Debug;

use super::text::tokenize;

/// Semantic similarity between two texts.
///
/// Implementations return a value in `[0, 1]`, where 1 means the texts
/// are equivalent for matching purposes.
pub trait SimilarityModel: Send + Sync + Debug {
    /// Model name (e.g., "tf-cosine").
    fn name(&self) -> &'static str;

    /// Similarity of `task` to `skills`.
    fn similarity(&self, task: &str, skills: &str) -> f64;
}

/// Cosine similarity of term-frequency vectors.
///
/// Both texts are tokenised with [`tokenize`]; each distinct token is a
/// dimension weighted by its count. Returns 0 when either side has no
/// tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermFrequencyCosine;

impl TermFrequencyCosine {
    fn term_counts(text: &str) -> HashMap<String, f64> {
        let mut counts = HashMap::new();
        for token in tokenize(text) {
            *counts.entry(token).or_insert(0.0) += 1.0;
        }
        counts
    }
}

impl SimilarityModel for TermFrequencyCosine {
    fn name(&self) -> &'static str {
        "tf-cosine"
    }

    fn similarity(&self, task: &str, skills: &str) -> f64 {
        let a = Self::term_counts(task);
        let b = Self::term_counts(skills);
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let dot: f64 = a
            .iter()
            .filter_map(|(token, wa)| b.get(token).map(|wb| wa * wb))
            .sum();
        let norm_a = a.values().map(|w| w * w).sum::<f64>().sqrt();
        let norm_b = b.values().map(|w| w * w).sum::<f64>().sqrt();

        (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_texts() {
        let sim = TermFrequencyCosine.similarity("python flask", "Flask, Python");
        assert!((sim - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_disjoint_texts() {
        let sim = TermFrequencyCosine.similarity("embedded firmware", "react, nodejs");
        assert!(sim.abs() < 1e-10);
    }

    #[test]
    fn test_partial_overlap() {
        // task: {python:1, api:1}, skills: {python:1, sql:1} → 1 / (√2·√2) = 0.5
        let sim = TermFrequencyCosine.similarity("python api", "python, sql");
        assert!((sim - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_empty_side() {
        assert_eq!(TermFrequencyCosine.similarity("", "python"), 0.0);
        assert_eq!(TermFrequencyCosine.similarity("python", " , "), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let m = TermFrequencyCosine;
        let a = "build react dashboard with nodejs backend";
        let b = "javascript, react, nodejs";
        assert!((m.similarity(a, b) - m.similarity(b, a)).abs() < 1e-12);
    }
}
