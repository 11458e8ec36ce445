//! Built-in scoring rules.
//!
//! # Categories
//!
//! - **Additive** (summed into the base score): skill similarity,
//!   feedback adjustment, proficiency bonus, keyword overlap
//! - **Multiplicative** (scale the base score): urgency, due-date
//!   urgency, task complexity
//!
//! # Score Convention
//! All rules return higher scores for better candidates.

use chrono::{NaiveDateTime, TimeDelta};
use std::sync::Arc;

use super::{Combine, MatchContext, RuleScore, ScoringRule, SimilarityModel, TaskProfile};
use crate::config::{DueDateWeights, UrgencyWeights};
use crate::models::Individual;

// ======================== Additive rules ========================

/// Similarity between the task description and the candidate's skills text.
#[derive(Debug, Clone)]
pub struct SkillSimilarity {
    model: Arc<dyn SimilarityModel>,
}

impl SkillSimilarity {
    /// Creates the rule with the given similarity model.
    pub fn new<M: SimilarityModel + 'static>(model: M) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    /// Creates the rule from a shared model.
    pub fn shared(model: Arc<dyn SimilarityModel>) -> Self {
        Self { model }
    }
}

impl ScoringRule for SkillSimilarity {
    fn name(&self) -> &'static str {
        "similarity"
    }

    fn combine(&self) -> Combine {
        Combine::Add
    }

    fn evaluate(
        &self,
        candidate: &Individual,
        task: &TaskProfile,
        _context: &MatchContext,
    ) -> RuleScore {
        self.model.similarity(&task.description, &candidate.skills)
    }

    fn description(&self) -> &'static str {
        "Task/skills text similarity"
    }
}

/// Accumulated like/dislike feedback for the candidate.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackAdjustment;

impl ScoringRule for FeedbackAdjustment {
    fn name(&self) -> &'static str {
        "feedback"
    }

    fn combine(&self) -> Combine {
        Combine::Add
    }

    fn evaluate(
        &self,
        candidate: &Individual,
        _task: &TaskProfile,
        context: &MatchContext,
    ) -> RuleScore {
        context.feedback_for(&candidate.id)
    }

    fn description(&self) -> &'static str {
        "Accumulated feedback adjustment"
    }
}

/// Mean proficiency scaled down by `divisor`.
///
/// `sum(p) / (len(p) * divisor)`; zero for an empty list.
#[derive(Debug, Clone, Copy)]
pub struct ProficiencyBonus {
    pub divisor: f64,
}

impl Default for ProficiencyBonus {
    fn default() -> Self {
        Self { divisor: 10.0 }
    }
}

impl ScoringRule for ProficiencyBonus {
    fn name(&self) -> &'static str {
        "proficiency"
    }

    fn combine(&self) -> Combine {
        Combine::Add
    }

    fn evaluate(
        &self,
        candidate: &Individual,
        _task: &TaskProfile,
        _context: &MatchContext,
    ) -> RuleScore {
        if self.divisor <= 0.0 {
            return 0.0;
        }
        candidate
            .average_proficiency()
            .map(|avg| avg / self.divisor)
            .unwrap_or(0.0)
    }

    fn description(&self) -> &'static str {
        "Average proficiency bonus"
    }
}

/// Fixed bonus per task skill mentioned in the candidate's skills text.
#[derive(Debug, Clone, Copy)]
pub struct KeywordOverlap {
    pub bonus: f64,
}

impl Default for KeywordOverlap {
    fn default() -> Self {
        Self { bonus: 0.1 }
    }
}

impl ScoringRule for KeywordOverlap {
    fn name(&self) -> &'static str {
        "keywords"
    }

    fn combine(&self) -> Combine {
        Combine::Add
    }

    fn evaluate(
        &self,
        candidate: &Individual,
        task: &TaskProfile,
        _context: &MatchContext,
    ) -> RuleScore {
        let overlap = task
            .skills
            .iter()
            .filter(|skill| candidate.mentions_skill(skill))
            .count();
        self.bonus * overlap as f64
    }

    fn description(&self) -> &'static str {
        "Extracted skill overlap bonus"
    }
}

// ======================== Multiplicative rules ========================

/// Task urgency multiplier.
#[derive(Debug, Clone, Default)]
pub struct UrgencyWeight {
    pub weights: UrgencyWeights,
}

impl ScoringRule for UrgencyWeight {
    fn name(&self) -> &'static str {
        "urgency"
    }

    fn combine(&self) -> Combine {
        Combine::Scale
    }

    fn evaluate(
        &self,
        _candidate: &Individual,
        task: &TaskProfile,
        _context: &MatchContext,
    ) -> RuleScore {
        self.weights.weight(task.urgency)
    }

    fn description(&self) -> &'static str {
        "Urgency multiplier"
    }
}

/// Due-date urgency multiplier.
///
/// | Time until due | Multiplier |
/// |----------------|-----------|
/// | no due date | 1.0 (neutral) |
/// | ≤ 0 (overdue) | `overdue` |
/// | < 24 h | `within_day` |
/// | < 72 h | `within_three_days` |
/// | < 168 h | `within_week` |
/// | otherwise | `later` |
#[derive(Debug, Clone, Default)]
pub struct DueDateUrgency {
    pub weights: DueDateWeights,
}

impl DueDateUrgency {
    /// Multiplier for a due date evaluated at `now`.
    pub fn multiplier(&self, due: Option<NaiveDateTime>, now: NaiveDateTime) -> f64 {
        let Some(due) = due else {
            return 1.0;
        };
        let left = due - now;
        let w = &self.weights;
        if left <= TimeDelta::zero() {
            w.overdue
        } else if left < TimeDelta::hours(24) {
            w.within_day
        } else if left < TimeDelta::hours(72) {
            w.within_three_days
        } else if left < TimeDelta::hours(168) {
            w.within_week
        } else {
            w.later
        }
    }
}

impl ScoringRule for DueDateUrgency {
    fn name(&self) -> &'static str {
        "due_date"
    }

    fn combine(&self) -> Combine {
        Combine::Scale
    }

    fn evaluate(
        &self,
        _candidate: &Individual,
        task: &TaskProfile,
        context: &MatchContext,
    ) -> RuleScore {
        self.multiplier(task.due_date, context.now)
    }

    fn description(&self) -> &'static str {
        "Due-date urgency multiplier"
    }
}

/// `1 + complexity` multiplier.
#[derive(Debug, Clone, Copy)]
pub struct ComplexityBoost;

impl ScoringRule for ComplexityBoost {
    fn name(&self) -> &'static str {
        "complexity"
    }

    fn combine(&self) -> Combine {
        Combine::Scale
    }

    fn evaluate(
        &self,
        _candidate: &Individual,
        task: &TaskProfile,
        _context: &MatchContext,
    ) -> RuleScore {
        1.0 + task.complexity
    }

    fn description(&self) -> &'static str {
        "Task complexity multiplier"
    }
}
