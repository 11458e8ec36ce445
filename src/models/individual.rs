//! Individual (worker) model.
//!
//! Individuals are the entities tasks are allocated to. Each carries a
//! free-text skill list, numeric proficiencies, a shift, availability,
//! and the counters maintained by the assignment lifecycle.

use chrono::{NaiveDateTime, TimeDelta};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse working window of an individual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    /// Day shift.
    Morning,
    /// Night shift.
    Night,
}

impl Shift {
    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Night => "Night",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Shift::Morning),
            "night" => Ok(Shift::Night),
            other => Err(format!("unknown shift '{other}'")),
        }
    }
}

/// A schedulable worker record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    /// Opaque identifier (8 lowercase hex characters when generated).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Comma-joined free-text skills (e.g., "python, machine learning").
    pub skills: String,
    /// Proficiency ratings on a 1–5 scale, in skill order.
    pub proficiencies: Vec<f64>,
    /// Whether the individual accepts new work.
    pub available: bool,
    /// Working shift.
    pub shift: Shift,
    /// Number of tasks ever assigned.
    pub tasks_assigned: u32,
    /// Number of tasks completed.
    pub tasks_completed: u32,
    /// Running feedback rating.
    pub avg_feedback: f64,
    /// Predicted hours for the current task.
    pub predicted_completion: Option<f64>,
    /// Description of the task in progress.
    pub current_task: Option<String>,
    /// When the current task was assigned.
    pub assigned_at: Option<NaiveDateTime>,
    /// Progress of the current task (0–100).
    pub progress: u8,
}

impl Individual {
    /// Creates an available morning-shift individual with no skills.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            skills: String::new(),
            proficiencies: Vec::new(),
            available: true,
            shift: Shift::Morning,
            tasks_assigned: 0,
            tasks_completed: 0,
            avg_feedback: 0.0,
            predicted_completion: None,
            current_task: None,
            assigned_at: None,
            progress: 0,
        }
    }

    /// Sets the skills text.
    pub fn with_skills(mut self, skills: impl Into<String>) -> Self {
        self.skills = skills.into();
        self
    }

    /// Sets the proficiency ratings.
    pub fn with_proficiencies(mut self, proficiencies: Vec<f64>) -> Self {
        self.proficiencies = proficiencies;
        self
    }

    /// Sets the shift.
    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.shift = shift;
        self
    }

    /// Sets availability.
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Sets the running feedback rating.
    pub fn with_avg_feedback(mut self, avg_feedback: f64) -> Self {
        self.avg_feedback = avg_feedback;
        self
    }

    /// Sets the assigned/completed counters.
    pub fn with_history(mut self, assigned: u32, completed: u32) -> Self {
        self.tasks_assigned = assigned;
        self.tasks_completed = completed;
        self
    }

    /// Individual skills, trimmed and lowercased, empty entries dropped.
    pub fn skill_list(&self) -> Vec<String> {
        split_list(&self.skills)
            .map(|s| s.to_lowercase())
            .collect()
    }

    /// Whether the skill list contains `skill` (case-insensitive, whole entry).
    pub fn has_skill(&self, skill: &str) -> bool {
        let wanted = skill.trim().to_lowercase();
        split_list(&self.skills).any(|s| s.to_lowercase() == wanted)
    }

    /// Whether `skill` occurs anywhere in the skills text (case-insensitive).
    ///
    /// "spring" is mentioned by "java, spring boot". A blank skill is never
    /// mentioned.
    pub fn mentions_skill(&self, skill: &str) -> bool {
        let wanted = skill.trim().to_lowercase();
        !wanted.is_empty() && self.skills.to_lowercase().contains(&wanted)
    }

    /// Mean proficiency, or `None` when no ratings are recorded.
    pub fn average_proficiency(&self) -> Option<f64> {
        if self.proficiencies.is_empty() {
            None
        } else {
            Some(self.proficiencies.iter().sum::<f64>() / self.proficiencies.len() as f64)
        }
    }

    /// Whether a task is currently held.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.current_task.is_some()
    }

    /// Whether the individual can take a new task right now.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.available && !self.is_busy()
    }

    /// When the current assignment is expected to finish.
    ///
    /// `None` without an assignment time, or when the prediction is
    /// negative, non-finite or too large to represent.
    pub fn expected_finish(&self) -> Option<NaiveDateTime> {
        let assigned_at = self.assigned_at?;
        let hours = self.predicted_completion?;
        if !hours.is_finite() || hours < 0.0 {
            return None;
        }
        let minutes = (hours * 60.0).round();
        if minutes >= i64::MAX as f64 {
            return None;
        }
        let delta = TimeDelta::try_minutes(minutes as i64)?;
        assigned_at.checked_add_signed(delta)
    }

    /// Clears all current-task state and makes the individual available.
    pub(crate) fn release(&mut self) {
        self.current_task = None;
        self.assigned_at = None;
        self.predicted_completion = None;
        self.progress = 0;
        self.available = true;
    }
}

/// Raw input for adding an individual to the roster.
///
/// Proficiencies are kept as entered (comma-separated) and parsed during
/// validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIndividual {
    pub name: String,
    pub skills: String,
    pub proficiencies: String,
    pub available: bool,
    pub shift: Shift,
}

impl NewIndividual {
    /// Creates an available morning-shift form.
    pub fn new(name: impl Into<String>, skills: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            skills: skills.into(),
            proficiencies: String::new(),
            available: true,
            shift: Shift::Morning,
        }
    }

    /// Sets the comma-separated proficiency input.
    pub fn with_proficiencies(mut self, proficiencies: impl Into<String>) -> Self {
        self.proficiencies = proficiencies.into();
        self
    }

    /// Sets the shift.
    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.shift = shift;
        self
    }

    /// Sets availability.
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }
}

/// Splits a comma-separated list, trimming and skipping empty entries.
pub(crate) fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Generates an 8-character lowercase hex identifier.
pub fn generate_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{:08x}", rng.random::<u32>())
}

/// Built-in roster used by the command-line front end and examples.
pub fn demo_roster() -> Vec<Individual> {
    vec![
        Individual::new("1a2b3c4d", "Alice")
            .with_skills("python, machine learning, flask")
            .with_proficiencies(vec![4.5, 4.0, 3.5])
            .with_avg_feedback(4.2),
        Individual::new("2b3c4d5e", "Bob")
            .with_skills("javascript, react, nodejs")
            .with_proficiencies(vec![4.0, 3.5, 4.0])
            .with_history(1, 1)
            .with_avg_feedback(3.8),
        Individual::new("3c4d5e6f", "Charlie")
            .with_skills("java, spring boot")
            .with_proficiencies(vec![3.0, 3.5])
            .with_available(false)
            .with_shift(Shift::Night)
            .with_history(2, 2)
            .with_avg_feedback(3.2),
        Individual::new("4d5e6f7g", "Diana")
            .with_skills("c++, embedded systems")
            .with_proficiencies(vec![4.5, 4.0])
            .with_shift(Shift::Night)
            .with_avg_feedback(4.5),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_individual_builder() {
        let ind = Individual::new("A1", "Alice")
            .with_skills("Python, Machine Learning , ,flask")
            .with_proficiencies(vec![4.0, 5.0])
            .with_shift(Shift::Night)
            .with_available(false)
            .with_history(3, 2)
            .with_avg_feedback(4.1);

        assert_eq!(ind.id, "A1");
        assert_eq!(ind.shift, Shift::Night);
        assert!(!ind.available);
        assert_eq!(ind.tasks_assigned, 3);
        assert_eq!(ind.tasks_completed, 2);
        assert_eq!(
            ind.skill_list(),
            vec!["python", "machine learning", "flask"]
        );
        assert!(ind.has_skill("machine learning"));
        assert!(ind.has_skill(" FLASK "));
        assert!(!ind.has_skill("learning"));
        assert!(ind.mentions_skill("learning"));
        assert!(ind.mentions_skill("MACHINE"));
        assert!(!ind.mentions_skill("rust"));
        assert!(!ind.mentions_skill("  "));
    }

    #[test]
    fn test_average_proficiency() {
        let ind = Individual::new("A1", "A").with_proficiencies(vec![4.5, 4.0, 3.5]);
        assert!((ind.average_proficiency().unwrap() - 4.0).abs() < 1e-10);

        let empty = Individual::new("B1", "B");
        assert!(empty.average_proficiency().is_none());
    }

    #[test]
    fn test_idle_and_busy() {
        let mut ind = Individual::new("A1", "A");
        assert!(ind.is_idle());

        ind.current_task = Some("write docs".into());
        assert!(ind.is_busy());
        assert!(!ind.is_idle());

        ind.available = false;
        ind.release();
        assert!(ind.is_idle());
        assert_eq!(ind.progress, 0);
    }

    #[test]
    fn test_expected_finish() {
        let at = NaiveDate::from_ymd_opt(2025, 4, 3)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut ind = Individual::new("A1", "A");
        assert!(ind.expected_finish().is_none());

        ind.assigned_at = Some(at);
        ind.predicted_completion = Some(5.5);
        let finish = ind.expected_finish().unwrap();
        assert_eq!(finish, at + chrono::Duration::minutes(330));
    }

    #[test]
    fn test_expected_finish_out_of_range() {
        let at = NaiveDate::from_ymd_opt(2025, 4, 3)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let mut ind = Individual::new("A1", "A");
        ind.assigned_at = Some(at);

        for hours in [1e18, f64::INFINITY, f64::NAN, -2.0, 1e12] {
            ind.predicted_completion = Some(hours);
            assert!(ind.expected_finish().is_none(), "hours = {hours}");
        }
    }

    #[test]
    fn test_shift_parse() {
        assert_eq!("morning".parse::<Shift>(), Ok(Shift::Morning));
        assert_eq!(" Night ".parse::<Shift>(), Ok(Shift::Night));
        assert!("evening".parse::<Shift>().is_err());
        assert_eq!(Shift::Night.to_string(), "Night");
    }

    #[test]
    fn test_generate_id_format() {
        let mut rng = SmallRng::seed_from_u64(42);
        let id = generate_id(&mut rng);
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_demo_roster() {
        let roster = demo_roster();
        assert_eq!(roster.len(), 4);
        assert!(!roster[2].available);
        assert_eq!(roster[3].shift, Shift::Night);
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut ind = demo_roster().remove(0);
        ind.current_task = Some("triage".into());
        ind.assigned_at = NaiveDate::from_ymd_opt(2025, 4, 3)
            .unwrap()
            .and_hms_opt(9, 0, 0);

        let json = serde_json::to_string(&ind).unwrap();
        assert!(json.contains("\"shift\":\"Morning\""));
        let back: Individual = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ind);
    }
}
