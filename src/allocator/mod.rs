//! Allocation desk, completion forecasts and team KPIs.
//!
//! # Algorithm
//!
//! `Allocator` ranks idle, shift-compatible individuals with a
//! [`MatchEngine`](crate::matching::MatchEngine) and assigns the task either
//! to a chosen individual or to the top-ranked one. It is a greedy,
//! one-task-at-a-time heuristic with no look-ahead.
//!
//! # KPI
//!
//! `TeamKpi` computes roster-wide metrics: completion rate, utilization,
//! average feedback and average progress of active tasks.

mod desk;
mod forecast;
mod kpi;

pub use desk::{Allocator, AssignmentReceipt, AutoAllocation, MatchOutcome, Reassignment};
pub use forecast::{assignment_notice, predict_completion_hours};
pub use kpi::TeamKpi;
