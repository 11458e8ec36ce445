//! Allocator configuration.
//!
//! Every field has a default, so a TOML file only needs to mention the
//! values it overrides:
//!
//! ```toml
//! feedback_step = 0.1
//!
//! [scoring.urgency]
//! high = 1.25
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::models::Urgency;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Feedback delta applied by a single like/dislike.
    pub feedback_step: f64,
    /// Skills recognised in task text in addition to roster skills.
    pub skill_vocabulary: Vec<String>,
    /// Score blending weights.
    pub scoring: ScoringConfig,
    /// Completion-time prediction parameters.
    pub completion: CompletionModel,
    /// Keyword tables for task classification, in priority order.
    pub categories: Vec<CategoryRule>,
}

/// Weights for the blended match score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Proficiency bonus = mean(proficiencies) / divisor.
    pub proficiency_divisor: f64,
    /// Bonus per extracted task skill the individual holds.
    pub keyword_bonus: f64,
    pub urgency: UrgencyWeights,
    pub due_date: DueDateWeights,
    pub complexity: ComplexityConfig,
}

/// Urgency multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrgencyWeights {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

/// Due-date multipliers by time remaining.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DueDateWeights {
    /// Due date already passed.
    pub overdue: f64,
    /// Due within 24 hours.
    pub within_day: f64,
    /// Due within 72 hours.
    pub within_three_days: f64,
    /// Due within 168 hours.
    pub within_week: f64,
    /// Due later than a week out.
    pub later: f64,
}

/// Task complexity from description length.
///
/// complexity = min(cap, per_word * word_count)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityConfig {
    pub per_word: f64,
    pub cap: f64,
}

/// Completion-time prediction.
///
/// hours = base_hours * (1 + complexity) * (reference_proficiency / mean proficiency)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionModel {
    pub base_hours: f64,
    pub reference_proficiency: f64,
}

/// A task category and the keywords that indicate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            feedback_step: 0.05,
            skill_vocabulary: default_vocabulary(),
            scoring: ScoringConfig::default(),
            completion: CompletionModel::default(),
            categories: default_categories(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            proficiency_divisor: 10.0,
            keyword_bonus: 0.1,
            urgency: UrgencyWeights::default(),
            due_date: DueDateWeights::default(),
            complexity: ComplexityConfig::default(),
        }
    }
}

impl Default for UrgencyWeights {
    fn default() -> Self {
        Self {
            low: 0.9,
            medium: 1.0,
            high: 1.1,
        }
    }
}

impl UrgencyWeights {
    /// Multiplier for an urgency level.
    pub fn weight(&self, urgency: Urgency) -> f64 {
        match urgency {
            Urgency::Low => self.low,
            Urgency::Medium => self.medium,
            Urgency::High => self.high,
        }
    }
}

impl Default for DueDateWeights {
    fn default() -> Self {
        Self {
            overdue: 1.5,
            within_day: 1.3,
            within_three_days: 1.15,
            within_week: 1.05,
            later: 1.0,
        }
    }
}

impl Default for ComplexityConfig {
    fn default() -> Self {
        Self {
            per_word: 0.01,
            cap: 0.5,
        }
    }
}

impl Default for CompletionModel {
    fn default() -> Self {
        Self {
            base_hours: 5.0,
            reference_proficiency: 3.0,
        }
    }
}

fn default_vocabulary() -> Vec<String> {
    [
        "python",
        "machine learning",
        "flask",
        "django",
        "javascript",
        "typescript",
        "react",
        "nodejs",
        "java",
        "spring boot",
        "c++",
        "c#",
        "rust",
        "sql",
        "docker",
        "kubernetes",
        "aws",
        "embedded systems",
        "data analysis",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_categories() -> Vec<CategoryRule> {
    vec![
        CategoryRule::new(
            "Web Development",
            &[
                "web", "website", "frontend", "javascript", "react", "html", "css", "nodejs",
                "flask", "django",
            ],
        ),
        CategoryRule::new(
            "Data Analysis",
            &[
                "data", "analysis", "analytics", "machine learning", "model", "python",
                "dashboard", "report",
            ],
        ),
        CategoryRule::new(
            "Backend Development",
            &["api", "backend", "java", "spring boot", "database", "sql", "service"],
        ),
        CategoryRule::new(
            "Embedded Systems",
            &["embedded", "firmware", "c++", "microcontroller", "hardware", "driver"],
        ),
        CategoryRule::new(
            "DevOps",
            &["deploy", "deployment", "docker", "kubernetes", "pipeline", "aws", "ci"],
        ),
    ]
}

impl AllocatorConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads configuration from `path`.
    ///
    /// Returns defaults when `path` is `None` or the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            debug!(config_path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        debug!(config_path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
