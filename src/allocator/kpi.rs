//! Team performance indicators.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Headcount | Roster size |
//! | Available | Individuals accepting work |
//! | Active tasks | Individuals holding a task |
//! | Completion rate | completed / assigned (1.0 when nothing assigned) |
//! | Avg feedback | Mean of `avg_feedback` |
//! | Utilization | active / headcount |
//! | Avg progress | Mean progress of active tasks |

use serde::Serialize;

use crate::models::Individual;

/// Roster-wide performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamKpi {
    pub headcount: usize,
    pub available: usize,
    pub active_tasks: usize,
    pub tasks_assigned: u64,
    pub tasks_completed: u64,
    /// Fraction of assigned tasks completed (0.0..1.0).
    pub completion_rate: f64,
    pub avg_feedback: f64,
    /// Fraction of the roster holding a task (0.0..1.0).
    pub utilization: f64,
    /// Mean progress (0–100) across active tasks.
    pub avg_progress: f64,
}

impl TeamKpi {
    /// Computes KPIs from the roster.
    pub fn calculate(roster: &[Individual]) -> Self {
        let headcount = roster.len();
        let mut available = 0;
        let mut active = 0;
        let mut assigned: u64 = 0;
        let mut completed: u64 = 0;
        let mut feedback_sum = 0.0;
        let mut progress_sum = 0.0;

        for ind in roster {
            if ind.available {
                available += 1;
            }
            if ind.is_busy() {
                active += 1;
                progress_sum += ind.progress as f64;
            }
            assigned += ind.tasks_assigned as u64;
            completed += ind.tasks_completed as u64;
            feedback_sum += ind.avg_feedback;
        }

        let completion_rate = if assigned == 0 {
            1.0
        } else {
            completed as f64 / assigned as f64
        };

        let (avg_feedback, utilization) = if headcount == 0 {
            (0.0, 0.0)
        } else {
            (
                feedback_sum / headcount as f64,
                active as f64 / headcount as f64,
            )
        };

        let avg_progress = if active == 0 {
            0.0
        } else {
            progress_sum / active as f64
        };

        Self {
            headcount,
            available,
            active_tasks: active,
            tasks_assigned: assigned,
            tasks_completed: completed,
            completion_rate,
            avg_feedback,
            utilization,
            avg_progress,
        }
    }

    /// Whether the team meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_completion_rate: f64, max_utilization: f64) -> bool {
        self.completion_rate >= min_completion_rate && self.utilization <= max_utilization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::demo_roster;

    #[test]
    fn test_demo_roster_kpi() {
        let kpi = TeamKpi::calculate(&demo_roster());
        assert_eq!(kpi.headcount, 4);
        assert_eq!(kpi.available, 3);
        assert_eq!(kpi.active_tasks, 0);
        assert_eq!(kpi.tasks_assigned, 3);
        assert_eq!(kpi.tasks_completed, 3);
        assert!((kpi.completion_rate - 1.0).abs() < 1e-10);
        assert!((kpi.avg_feedback - (4.2 + 3.8 + 3.2 + 4.5) / 4.0).abs() < 1e-10);
        assert_eq!(kpi.utilization, 0.0);
    }

    #[test]
    fn test_active_tasks() {
        let mut a = Individual::new("A", "A").with_history(2, 1);
        a.current_task = Some("t".into());
        a.available = false;
        a.progress = 40;
        let b = Individual::new("B", "B").with_history(2, 0);

        let kpi = TeamKpi::calculate(&[a, b]);
        assert_eq!(kpi.active_tasks, 1);
        assert!((kpi.utilization - 0.5).abs() < 1e-10);
        assert!((kpi.completion_rate - 0.25).abs() < 1e-10);
        assert!((kpi.avg_progress - 40.0).abs() < 1e-10);
        assert!(kpi.meets_thresholds(0.2, 0.5));
        assert!(!kpi.meets_thresholds(0.5, 0.5));
    }

    #[test]
    fn test_empty_roster() {
        let kpi = TeamKpi::calculate(&[]);
        assert_eq!(kpi.headcount, 0);
        assert_eq!(kpi.completion_rate, 1.0);
        assert_eq!(kpi.utilization, 0.0);
        assert_eq!(kpi.avg_feedback, 0.0);
    }
}
