//! Match context and analysed task profile passed to scoring rules.

use chrono::NaiveDateTime;
use std::collections::HashMap;

use super::text;
use crate::config::ComplexityConfig;
use crate::models::{ShiftPreference, TaskRequest, Urgency};

/// Runtime state passed to scoring rules.
///
/// Carries the evaluation clock and the accumulated feedback ledger.
#[derive(Debug, Clone)]
pub struct MatchContext {
    /// Evaluation time, used for due-date urgency.
    pub now: NaiveDateTime,
    /// Accumulated feedback per individual (individual_id → delta sum).
    pub feedback: HashMap<String, f64>,
}

impl MatchContext {
    /// Creates a context at the given time with an empty ledger.
    pub fn at_time(now: NaiveDateTime) -> Self {
        Self {
            now,
            feedback: HashMap::new(),
        }
    }

    /// Sets the feedback adjustment for an individual.
    pub fn with_feedback(mut self, individual_id: impl Into<String>, adjustment: f64) -> Self {
        self.feedback.insert(individual_id.into(), adjustment);
        self
    }

    /// Replaces the whole feedback ledger.
    pub fn with_feedback_ledger(mut self, feedback: HashMap<String, f64>) -> Self {
        self.feedback = feedback;
        self
    }

    /// Feedback adjustment for an individual (0.0 if none recorded).
    pub fn feedback_for(&self, individual_id: &str) -> f64 {
        self.feedback.get(individual_id).copied().unwrap_or(0.0)
    }
}

/// A task request with its text analysis precomputed.
///
/// Analysis runs once per match; every candidate is scored against the
/// same profile.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskProfile {
    /// Original description.
    pub description: String,
    /// Vocabulary skills mentioned in the description.
    pub skills: Vec<String>,
    /// Length-based complexity factor.
    pub complexity: f64,
    pub urgency: Urgency,
    pub shift: ShiftPreference,
    pub due_date: Option<NaiveDateTime>,
}

impl TaskProfile {
    /// Analyses a request against a skill vocabulary.
    pub fn analyze<'a, I>(
        request: &TaskRequest,
        vocabulary: I,
        complexity: &ComplexityConfig,
    ) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            description: request.description.clone(),
            skills: text::extract_skills(&request.description, vocabulary),
            complexity: text::task_complexity(&request.description, complexity),
            urgency: request.urgency,
            shift: request.shift,
            due_date: request.due_date,
        }
    }
}
