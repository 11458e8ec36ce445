//! Task request model.
//!
//! A task request is the input to matching: a free-text description plus
//! the scheduling metadata (urgency, shift preference, optional due date)
//! that shape candidate scores.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::Shift;

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

impl Urgency {
    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            other => Err(format!("unknown urgency '{other}'")),
        }
    }
}

/// Which shifts a task accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShiftPreference {
    /// Any shift.
    #[default]
    Any,
    /// Morning shift only.
    Morning,
    /// Night shift only.
    Night,
}

impl ShiftPreference {
    /// Whether an individual on `shift` satisfies this preference.
    pub fn accepts(&self, shift: Shift) -> bool {
        match self {
            ShiftPreference::Any => true,
            ShiftPreference::Morning => shift == Shift::Morning,
            ShiftPreference::Night => shift == Shift::Night,
        }
    }

    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftPreference::Any => "Any",
            ShiftPreference::Morning => "Morning",
            ShiftPreference::Night => "Night",
        }
    }
}

impl fmt::Display for ShiftPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(ShiftPreference::Any),
            "morning" => Ok(ShiftPreference::Morning),
            "night" => Ok(ShiftPreference::Night),
            other => Err(format!("unknown shift preference '{other}'")),
        }
    }
}

impl From<Shift> for ShiftPreference {
    fn from(shift: Shift) -> Self {
        match shift {
            Shift::Morning => ShiftPreference::Morning,
            Shift::Night => ShiftPreference::Night,
        }
    }
}

/// A task to be matched against the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRequest {
    /// Free-text requirements.
    pub description: String,
    /// Category; `None` = classify from the description.
    pub category: Option<String>,
    /// Priority level.
    pub urgency: Urgency,
    /// Accepted shifts.
    pub shift: ShiftPreference,
    /// Deadline; `None` = no deadline.
    pub due_date: Option<NaiveDateTime>,
}

impl TaskRequest {
    /// Creates a medium-urgency, any-shift request with no deadline.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            category: None,
            urgency: Urgency::Medium,
            shift: ShiftPreference::Any,
            due_date: None,
        }
    }

    /// Sets the category. Blank categories are treated as absent.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.trim().is_empty() {
            None
        } else {
            Some(category)
        };
        self
    }

    /// Sets the urgency.
    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    /// Sets the shift preference.
    pub fn with_shift(mut self, shift: ShiftPreference) -> Self {
        self.shift = shift;
        self
    }

    /// Sets the due date.
    pub fn with_due_date(mut self, due: NaiveDateTime) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Whether the description contains anything besides whitespace.
    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }
}
