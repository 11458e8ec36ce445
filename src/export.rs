//! CSV export and import.
//!
//! # Layouts
//!
//! | Export | Columns |
//! |--------|---------|
//! | Individuals | Full record; importable |
//! | Match history | task, category, urgency, matches, due_date, timestamp, predicted_completion |
//! | Performance | name, skills, shift, available, tasks, feedback, predicted_completion |
//!
//! Proficiencies and match lists are `;`-joined inside one cell. Optional
//! values are empty cells, except in the history and performance exports
//! where a missing value reads `N/A`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

use crate::error::{AllocationError, Result};
use crate::jobs::SCHEDULE_FORMAT;
use crate::models::{Individual, MatchRecord, Shift};
use crate::validation::{validate_roster, ValidationError, ValidationErrorKind};

/// Timestamp format used in every export.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NOT_AVAILABLE: &str = "N/A";
const LIST_SEPARATOR: &str = ";";

/// Flat CSV row for an individual.
#[derive(Debug, Serialize, Deserialize)]
struct IndividualRow {
    id: String,
    name: String,
    skills: String,
    proficiencies: String,
    available: bool,
    shift: Shift,
    tasks_assigned: u32,
    tasks_completed: u32,
    avg_feedback: f64,
    predicted_completion: Option<f64>,
    current_task: Option<String>,
    assigned_at: Option<String>,
    progress: u8,
}

impl From<&Individual> for IndividualRow {
    fn from(ind: &Individual) -> Self {
        Self {
            id: ind.id.clone(),
            name: ind.name.clone(),
            skills: ind.skills.clone(),
            proficiencies: ind
                .proficiencies
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR),
            available: ind.available,
            shift: ind.shift,
            tasks_assigned: ind.tasks_assigned,
            tasks_completed: ind.tasks_completed,
            avg_feedback: ind.avg_feedback,
            predicted_completion: ind.predicted_completion,
            current_task: ind.current_task.clone(),
            assigned_at: ind
                .assigned_at
                .map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
            progress: ind.progress,
        }
    }
}

impl TryFrom<IndividualRow> for Individual {
    type Error = AllocationError;

    fn try_from(row: IndividualRow) -> Result<Self> {
        let mut proficiencies = Vec::new();
        for raw in row.proficiencies.split(LIST_SEPARATOR).map(str::trim) {
            if raw.is_empty() {
                continue;
            }
            let value = raw.parse::<f64>().map_err(|_| {
                AllocationError::Invalid(vec![ValidationError::new(
                    ValidationErrorKind::InvalidNumber,
                    format!("individual '{}': proficiency '{raw}' is not a number", row.id),
                )])
            })?;
            proficiencies.push(value);
        }

        let assigned_at = match row.assigned_at.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).map_err(
                |_| AllocationError::InvalidDateTime {
                    input: raw.to_string(),
                    expected: "YYYY-MM-DD HH:MM:SS",
                },
            )?),
        };

        Ok(Individual {
            id: row.id,
            name: row.name,
            skills: row.skills,
            proficiencies,
            available: row.available,
            shift: row.shift,
            tasks_assigned: row.tasks_assigned,
            tasks_completed: row.tasks_completed,
            avg_feedback: row.avg_feedback,
            predicted_completion: row.predicted_completion,
            current_task: row.current_task.filter(|t| !t.is_empty()),
            assigned_at,
            progress: row.progress,
        })
    }
}

/// Writes the roster as CSV.
pub fn write_individuals<W: io::Write>(writer: W, roster: &[Individual]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for ind in roster {
        writer.serialize(IndividualRow::from(ind))?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a roster written by [`write_individuals`].
///
/// The result passes [`validate_roster`]; an empty `current_task` cell
/// means no task is held.
pub fn read_individuals<R: io::Read>(reader: R) -> Result<Vec<Individual>> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut roster = Vec::new();
    for row in reader.deserialize::<IndividualRow>() {
        roster.push(Individual::try_from(row?)?);
    }
    validate_roster(&roster)?;
    Ok(roster)
}

/// Writes the match history as CSV.
pub fn write_match_history<W: io::Write>(writer: W, records: &[MatchRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([
        "task",
        "category",
        "urgency",
        "matches",
        "due_date",
        "timestamp",
        "predicted_completion",
    ])?;
    for record in records {
        let matches = record
            .matches
            .iter()
            .map(|m| format!("{}:{:.4}", m.individual_id, m.score))
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR);
        let due = record
            .due_date
            .map(|d| d.format(SCHEDULE_FORMAT).to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let predicted = record
            .predicted_completion
            .map(|h| h.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        writer.write_record([
            record.task.as_str(),
            record.category.as_str(),
            record.urgency.as_str(),
            matches.as_str(),
            due.as_str(),
            record.timestamp.format(TIMESTAMP_FORMAT).to_string().as_str(),
            predicted.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes per-individual performance analytics as CSV.
pub fn write_performance<W: io::Write>(writer: W, roster: &[Individual]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record([
        "name",
        "skills",
        "shift",
        "available",
        "tasks_assigned",
        "tasks_completed",
        "avg_feedback",
        "predicted_completion",
    ])?;
    for ind in roster {
        let predicted = ind
            .predicted_completion
            .map(|h| h.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        writer.write_record([
            ind.name.as_str(),
            ind.skills.as_str(),
            ind.shift.as_str(),
            if ind.available { "true" } else { "false" },
            ind.tasks_assigned.to_string().as_str(),
            ind.tasks_completed.to_string().as_str(),
            ind.avg_feedback.to_string().as_str(),
            predicted.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn create_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(fs::File::create(path)?)
}

/// Writes the roster to a CSV file, creating parent directories.
pub fn save_individuals(path: &Path, roster: &[Individual]) -> Result<()> {
    write_individuals(create_file(path)?, roster)?;
    info!(path = %path.display(), rows = roster.len(), "individuals exported");
    Ok(())
}

/// Reads a roster from a CSV file.
pub fn load_individuals(path: &Path) -> Result<Vec<Individual>> {
    let roster = read_individuals(fs::File::open(path)?)?;
    info!(path = %path.display(), rows = roster.len(), "individuals loaded");
    Ok(roster)
}

/// Writes the match history to a CSV file.
pub fn save_match_history(path: &Path, records: &[MatchRecord]) -> Result<()> {
    write_match_history(create_file(path)?, records)?;
    info!(path = %path.display(), rows = records.len(), "match history exported");
    Ok(())
}

/// Writes performance analytics to a CSV file.
pub fn save_performance(path: &Path, roster: &[Individual]) -> Result<()> {
    write_performance(create_file(path)?, roster)?;
    info!(path = %path.display(), rows = roster.len(), "performance analytics exported");
    Ok(())
}
