//! Completion-time prediction and assignment notices.

use crate::config::CompletionModel;
use crate::models::Individual;

/// Predicts hours needed by `individual` for a task of the given complexity.
///
/// Faster for above-reference proficiency, slower below it; an individual
/// with no ratings is treated as reference. Rounded to one decimal.
pub fn predict_completion_hours(
    individual: &Individual,
    complexity: f64,
    model: &CompletionModel,
) -> f64 {
    let skill_factor = match individual.average_proficiency() {
        Some(avg) if avg > 0.0 => model.reference_proficiency / avg,
        _ => 1.0,
    };
    let hours = model.base_hours * (1.0 + complexity.max(0.0)) * skill_factor;
    (hours * 10.0).round() / 10.0
}

/// Text sent to an individual when a task is assigned.
pub fn assignment_notice(individual: &Individual, task: &str, hours: f64) -> String {
    format!(
        "Task '{task}' assigned to {}. Predicted completion time: {hours} hrs.",
        individual.name
    )
}
