//! Scheduled job and proposal models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{ShiftPreference, TaskRequest, Urgency};

/// A job posted for future allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub job_id: String,
    /// Work to be done.
    pub task_description: String,
    /// Priority level.
    pub urgency: Urgency,
    /// Accepted shifts.
    pub task_shift: ShiftPreference,
    /// Qualifications the assignee should hold.
    pub required_quals: Vec<String>,
    /// When the job should start.
    pub scheduled_time: NaiveDateTime,
    /// Deadline, if any.
    pub due_date: Option<NaiveDateTime>,
    /// Whether the job has been allocated.
    pub assigned: bool,
}

impl Job {
    /// Converts the job into a match request.
    ///
    /// Required qualifications are appended to the description so they
    /// participate in skill extraction and similarity.
    pub fn to_task_request(&self) -> TaskRequest {
        let description = if self.required_quals.is_empty() {
            self.task_description.clone()
        } else {
            format!(
                "{} (requires: {})",
                self.task_description,
                self.required_quals.join(", ")
            )
        };
        TaskRequest {
            description,
            category: None,
            urgency: self.urgency,
            shift: self.task_shift,
            due_date: self.due_date,
        }
    }
}

/// A team member's bid for a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    /// Target job. Not checked against the job board.
    pub job_id: String,
    /// Who is proposing.
    pub proposer: String,
    /// Why the proposer fits.
    pub proposal_text: String,
    /// Self-estimated hours.
    pub estimated_time: f64,
    /// Submission time.
    pub timestamp: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn job(quals: Vec<String>) -> Job {
        Job {
            job_id: "abcd1234".into(),
            task_description: "Train a model".into(),
            urgency: Urgency::High,
            task_shift: ShiftPreference::Night,
            required_quals: quals,
            scheduled_time: NaiveDate::from_ymd_opt(2025, 4, 3)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
            due_date: None,
            assigned: false,
        }
    }

    #[test]
    fn test_job_to_request_with_quals() {
        let req = job(vec!["python".into(), "machine learning".into()]).to_task_request();
        assert_eq!(
            req.description,
            "Train a model (requires: python, machine learning)"
        );
        assert_eq!(req.urgency, Urgency::High);
        assert_eq!(req.shift, ShiftPreference::Night);
    }

    #[test]
    fn test_job_to_request_without_quals() {
        let req = job(Vec::new()).to_task_request();
        assert_eq!(req.description, "Train a model");
        assert!(req.category.is_none());
    }
}
