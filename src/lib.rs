//! Task-to-worker allocation.
//!
//! Keeps a roster of individuals, ranks them for incoming tasks with a
//! blended heuristic score, and tracks the assignment lifecycle from
//! hand-over to completion.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Individual`, `TaskRequest`, `MatchRecord`,
//!   `Job`, `Proposal`
//! - **`matching`**: Text analysis, similarity models, scoring rules and the
//!   `MatchEngine`
//! - **`allocator`**: The `Allocator` desk (assign, auto-allocate, progress,
//!   overdue reassignment), completion forecasts and `TeamKpi`
//! - **`jobs`**: Scheduled jobs and proposals
//! - **`export`**: CSV export and roster import
//! - **`validation`**: Input checks (presence, proficiency ranges, roster integrity)
//! - **`config`**: TOML-backed tuning knobs
//!
//! # Scoring
//!
//! ```text
//! score = (similarity + feedback + proficiency_bonus + keyword_bonus)
//!         * urgency_weight * due_date_multiplier * (1 + complexity)
//! ```

pub mod allocator;
pub mod config;
pub mod error;
pub mod export;
pub mod jobs;
pub mod matching;
pub mod models;
pub mod validation;

pub use error::{AllocationError, Result};
