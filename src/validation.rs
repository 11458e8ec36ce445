//! Input validation for allocation requests.
//!
//! Checks user-supplied forms and roster integrity before they reach
//! the allocator. Detects:
//! - Missing required text (name, skills, task description, proposal fields)
//! - Unparseable or out-of-range proficiency ratings
//! - Duplicate individual IDs
//! - Roster entries whose task state contradicts their availability
//! - Completion predictions that cannot be turned into a finish time
//!
//! All checks collect every problem instead of stopping at the first.

use std::collections::HashSet;

use crate::models::{Individual, NewIndividual, TaskRequest};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Lowest accepted proficiency rating.
pub const MIN_PROFICIENCY: f64 = 1.0;
/// Highest accepted proficiency rating.
pub const MAX_PROFICIENCY: f64 = 5.0;
/// Smallest accepted proposal estimate (hours).
pub const MIN_ESTIMATE_HOURS: f64 = 0.5;
/// Largest accepted completion prediction on a loaded roster (hours).
pub const MAX_PREDICTED_HOURS: f64 = 10_000.0;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required field is empty.
    MissingField,
    /// A numeric field could not be parsed.
    InvalidNumber,
    /// A numeric field is outside its accepted range.
    OutOfRange,
    /// Two individuals share the same ID.
    DuplicateId,
    /// Task state and availability disagree.
    InconsistentState,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    fn missing(field: &str) -> Self {
        Self::new(
            ValidationErrorKind::MissingField,
            format!("{field} must not be empty"),
        )
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Parses comma-separated proficiency ratings.
///
/// Blank input yields an empty list. Every entry must be a number in
/// [`MIN_PROFICIENCY`]..=[`MAX_PROFICIENCY`].
pub fn parse_proficiencies(input: &str) -> Result<Vec<f64>, Vec<ValidationError>> {
    let mut values = Vec::new();
    let mut errors = Vec::new();

    if input.trim().is_empty() {
        return Ok(values);
    }

    for (idx, raw) in input.split(',').map(str::trim).enumerate() {
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && (MIN_PROFICIENCY..=MAX_PROFICIENCY).contains(&v) => {
                values.push(v)
            }
            Ok(v) => errors.push(ValidationError::new(
                ValidationErrorKind::OutOfRange,
                format!(
                    "proficiency #{} is {v}, expected {MIN_PROFICIENCY}..={MAX_PROFICIENCY}",
                    idx + 1
                ),
            )),
            Err(_) => errors.push(ValidationError::new(
                ValidationErrorKind::InvalidNumber,
                format!("proficiency #{} ('{raw}') is not a number", idx + 1),
            )),
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(errors)
    }
}

/// Validates the add-individual form.
///
/// Checks:
/// 1. Name is present
/// 2. At least one skill is present
/// 3. Proficiencies parse and are in range
pub fn validate_new_individual(form: &NewIndividual) -> ValidationResult {
    let mut errors = Vec::new();

    if form.name.trim().is_empty() {
        errors.push(ValidationError::missing("name"));
    }
    if crate::models::split_list(&form.skills).next().is_none() {
        errors.push(ValidationError::missing("skills"));
    }
    if let Err(mut prof_errors) = parse_proficiencies(&form.proficiencies) {
        errors.append(&mut prof_errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a match request (non-empty description).
pub fn validate_task(request: &TaskRequest) -> ValidationResult {
    if request.has_description() {
        Ok(())
    } else {
        Err(vec![ValidationError::missing("task description")])
    }
}

/// Validates proposal fields.
pub fn validate_proposal(
    job_id: &str,
    proposer: &str,
    text: &str,
    estimated_hours: f64,
) -> ValidationResult {
    let mut errors = Vec::new();

    for (field, value) in [("job id", job_id), ("proposer", proposer), ("proposal text", text)] {
        if value.trim().is_empty() {
            errors.push(ValidationError::missing(field));
        }
    }
    if !(estimated_hours.is_finite() && estimated_hours >= MIN_ESTIMATE_HOURS) {
        errors.push(ValidationError::new(
            ValidationErrorKind::OutOfRange,
            format!("estimated time must be at least {MIN_ESTIMATE_HOURS} hours"),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a loaded roster.
///
/// Checks:
/// 1. No duplicate IDs
/// 2. Every proficiency is in range
/// 3. Progress does not exceed 100
/// 4. Anyone holding a task is marked unavailable
/// 5. A held task has a non-blank description
/// 6. Predicted completion is finite and in 0..=[`MAX_PREDICTED_HOURS`]
pub fn validate_roster(individuals: &[Individual]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut ids = HashSet::new();

    for ind in individuals {
        if !ids.insert(ind.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate individual ID: {}", ind.id),
            ));
        }

        if ind
            .proficiencies
            .iter()
            .any(|p| !(MIN_PROFICIENCY..=MAX_PROFICIENCY).contains(p))
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutOfRange,
                format!("Individual '{}' has a proficiency outside 1..=5", ind.id),
            ));
        }

        if ind.progress > 100 {
            errors.push(ValidationError::new(
                ValidationErrorKind::OutOfRange,
                format!("Individual '{}' has progress {} > 100", ind.id, ind.progress),
            ));
        }

        if ind.is_busy() && ind.available {
            errors.push(ValidationError::new(
                ValidationErrorKind::InconsistentState,
                format!(
                    "Individual '{}' holds a task but is marked available",
                    ind.id
                ),
            ));
        }

        if ind
            .current_task
            .as_deref()
            .is_some_and(|task| task.trim().is_empty())
        {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingField,
                format!("Individual '{}' holds a task with no description", ind.id),
            ));
        }

        if let Some(hours) = ind.predicted_completion {
            if !(hours.is_finite() && (0.0..=MAX_PREDICTED_HOURS).contains(&hours)) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::OutOfRange,
                    format!(
                        "Individual '{}' has predicted completion {hours}, \
                         expected 0..={MAX_PREDICTED_HOURS} hours",
                        ind.id
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_proficiencies() {
        assert_eq!(parse_proficiencies("4, 3.5,5").unwrap(), vec![4.0, 3.5, 5.0]);
        assert!(parse_proficiencies("").unwrap().is_empty());
        assert!(parse_proficiencies("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_proficiencies_errors() {
        let errors = parse_proficiencies("4, abc, 7, ").unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidNumber && e.message.contains("abc")));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::OutOfRange && e.message.contains("#3")));
        // Trailing empty entry is not a number either.
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_valid_new_individual() {
        let form = NewIndividual::new("Eve", "rust, sql").with_proficiencies("5, 4");
        assert!(validate_new_individual(&form).is_ok());
    }

    #[test]
    fn test_new_individual_missing_fields() {
        let form = NewIndividual::new("  ", " , ");
        let errors = validate_new_individual(&form).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::MissingField));
    }

    #[test]
    fn test_new_individual_bad_proficiency() {
        let form = NewIndividual::new("Eve", "rust").with_proficiencies("0.5");
        let errors = validate_new_individual(&form).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::OutOfRange);
    }

    #[test]
    fn test_validate_task() {
        assert!(validate_task(&TaskRequest::new("Fix login bug")).is_ok());
        let errors = validate_task(&TaskRequest::new("   ")).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::MissingField);
    }

    #[test]
    fn test_validate_proposal() {
        assert!(validate_proposal("j1", "Bob", "I know React", 2.0).is_ok());

        let errors = validate_proposal("", "Bob", " ", 0.25).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::OutOfRange));
    }

    #[test]
    fn test_roster_duplicate_id() {
        let roster = vec![Individual::new("A", "x"), Individual::new("A", "y")];
        let errors = validate_roster(&roster).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_roster_inconsistent_state() {
        let mut busy = Individual::new("A", "x");
        busy.current_task = Some("deploy".into());
        let errors = validate_roster(&[busy.clone()]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::InconsistentState);

        busy.available = false;
        assert!(validate_roster(&[busy]).is_ok());
    }

    #[test]
    fn test_roster_multiple_errors() {
        let mut bad = Individual::new("A", "x").with_proficiencies(vec![9.0]);
        bad.progress = 150;
        let roster = vec![bad, Individual::new("A", "y")];
        let errors = validate_roster(&roster).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_roster_predicted_completion_range() {
        let mut ind = Individual::new("A", "x").with_available(false);
        ind.current_task = Some("triage".into());

        for hours in [1e18, f64::INFINITY, f64::NAN, -1.0, MAX_PREDICTED_HOURS + 1.0] {
            ind.predicted_completion = Some(hours);
            let errors = validate_roster(&[ind.clone()]).unwrap_err();
            assert_eq!(errors[0].kind, ValidationErrorKind::OutOfRange, "hours = {hours}");
        }

        ind.predicted_completion = Some(0.0);
        assert!(validate_roster(&[ind.clone()]).is_ok());
        ind.predicted_completion = Some(MAX_PREDICTED_HOURS);
        assert!(validate_roster(&[ind]).is_ok());
    }

    #[test]
    fn test_roster_blank_current_task() {
        let mut ind = Individual::new("A", "x").with_available(false);
        ind.current_task = Some("  ".into());
        let errors = validate_roster(&[ind]).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::MissingField);
    }

    #[test]
    fn test_demo_roster_is_valid() {
        assert!(validate_roster(&crate::models::demo_roster()).is_ok());
    }
}
