//! Candidate filtering, scoring rules and ranking.
//!
//! Matching runs in three stages:
//!
//! 1. **Filter**: keep individuals who are available, idle and on an
//!    accepted shift ([`filter_candidates`]).
//! 2. **Score**: sum the additive rules into a base score, then multiply
//!    by every scaling rule.
//! 3. **Rank**: stable sort by score, descending, so equal scores keep
//!    roster order.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use u_allocate::config::ScoringConfig;
//! use u_allocate::matching::{MatchContext, MatchEngine, TaskProfile};
//! use u_allocate::models::{demo_roster, TaskRequest};
//!
//! let roster = demo_roster();
//! let request = TaskRequest::new("Train a machine learning model in python");
//! let config = ScoringConfig::default();
//! let vocabulary = ["python", "machine learning"];
//! let profile = TaskProfile::analyze(&request, vocabulary, &config.complexity);
//! let now = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
//!
//! let engine = MatchEngine::standard(&config);
//! let ranked = engine.rank(&roster, &profile, &MatchContext::at_time(now));
//! assert_eq!(ranked[0].name, "Alice");
//! ```

mod context;
mod engine;
pub mod rules;
pub mod similarity;
pub mod text;

pub use context::{MatchContext, TaskProfile};
pub use engine::{filter_candidates, MatchEngine, RankedCandidate, ScoreBreakdown};
pub use similarity::{SimilarityModel, TermFrequencyCosine};

use crate::models::Individual;
use std::fmt::Debug;

/// Score returned by a scoring rule.
///
/// Higher scores = better candidate.
pub type RuleScore = f64;

/// How a rule's score enters the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combine {
    /// Summed into the base score.
    Add,
    /// Multiplies the base score.
    Scale,
}

/// A rule that scores one candidate for one task.
pub trait ScoringRule: Send + Sync + Debug {
    /// Rule name (e.g., "similarity", "urgency").
    fn name(&self) -> &'static str;

    /// Whether the score is additive or a multiplier.
    fn combine(&self) -> Combine;

    /// Scores `candidate` for `task`.
    fn evaluate(
        &self,
        candidate: &Individual,
        task: &TaskProfile,
        context: &MatchContext,
    ) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
