//! Match history model.
//!
//! Every matching or auto-allocation run produces a [`MatchRecord`].
//! Records are append-only: the history never mutates or removes them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Urgency;

/// One ranked candidate within a match record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEntry {
    /// Matched individual ID.
    pub individual_id: String,
    /// Final blended score.
    pub score: f64,
}

/// Outcome of a single matching run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Task description as entered.
    pub task: String,
    /// Given or classified category.
    pub category: String,
    /// Task urgency.
    pub urgency: Urgency,
    /// Candidates in rank order.
    pub matches: Vec<MatchEntry>,
    /// Task deadline, if any.
    pub due_date: Option<NaiveDateTime>,
    /// When the match ran.
    pub timestamp: NaiveDateTime,
    /// Predicted hours (auto-allocation only).
    pub predicted_completion: Option<f64>,
}

impl MatchRecord {
    /// Highest-ranked entry.
    pub fn top(&self) -> Option<&MatchEntry> {
        self.matches.first()
    }
}

/// Append-only list of match records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchHistory {
    records: Vec<MatchRecord>,
}

impl MatchHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record.
    pub fn push(&mut self, record: MatchRecord) {
        self.records.push(record);
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    /// Records, newest first.
    pub fn recent(&self) -> impl Iterator<Item = &MatchRecord> {
        self.records.iter().rev()
    }

    /// Records that list the given individual.
    pub fn involving<'a>(
        &'a self,
        individual_id: &'a str,
    ) -> impl Iterator<Item = &'a MatchRecord> {
        self.records
            .iter()
            .filter(move |r| r.matches.iter().any(|m| m.individual_id == individual_id))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(task: &str, ids: &[&str]) -> MatchRecord {
        MatchRecord {
            task: task.into(),
            category: "General".into(),
            urgency: Urgency::Low,
            matches: ids
                .iter()
                .enumerate()
                .map(|(i, id)| MatchEntry {
                    individual_id: id.to_string(),
                    score: 1.0 - i as f64 * 0.1,
                })
                .collect(),
            due_date: None,
            timestamp: NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            predicted_completion: None,
        }
    }

    #[test]
    fn test_history_append_order() {
        let mut history = MatchHistory::new();
        assert!(history.is_empty());

        history.push(record("first", &["A"]));
        history.push(record("second", &["B", "A"]));

        assert_eq!(history.len(), 2);
        assert_eq!(history.records()[0].task, "first");
        let recent: Vec<_> = history.recent().map(|r| r.task.as_str()).collect();
        assert_eq!(recent, vec!["second", "first"]);
    }

    #[test]
    fn test_history_involving() {
        let mut history = MatchHistory::new();
        history.push(record("t1", &["A"]));
        history.push(record("t2", &["B"]));
        history.push(record("t3", &["B", "A"]));

        let tasks: Vec<_> = history.involving("A").map(|r| r.task.as_str()).collect();
        assert_eq!(tasks, vec!["t1", "t3"]);
    }

    #[test]
    fn test_record_top() {
        let r = record("t", &["X", "Y"]);
        assert_eq!(r.top().unwrap().individual_id, "X");
        assert!(record("empty", &[]).top().is_none());
    }
}
