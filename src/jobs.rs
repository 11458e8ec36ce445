//! Job board: scheduled jobs and proposals.
//!
//! Jobs and proposals are append-only lists. A proposal's job ID is not
//! required to exist on the board; unknown IDs are accepted and logged.

use chrono::NaiveDateTime;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AllocationError, Result};
use crate::models::{generate_id, Job, Proposal, ShiftPreference, Urgency};
use crate::validation::{validate_proposal, ValidationError, ValidationErrorKind};

/// Format accepted for scheduled times and due dates.
pub const SCHEDULE_FORMAT: &str = "%Y-%m-%d %H:%M";
const SCHEDULE_FORMAT_HINT: &str = "YYYY-MM-DD HH:MM";

/// Parses a `YYYY-MM-DD HH:MM` timestamp.
pub fn parse_schedule_time(input: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(input.trim(), SCHEDULE_FORMAT).map_err(|_| {
        AllocationError::InvalidDateTime {
            input: input.to_string(),
            expected: SCHEDULE_FORMAT_HINT,
        }
    })
}

/// Raw input for scheduling a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDraft {
    pub task_description: String,
    pub urgency: Urgency,
    pub task_shift: ShiftPreference,
    /// Comma-separated qualifications.
    pub required_quals: String,
    /// `YYYY-MM-DD HH:MM`.
    pub scheduled_time: String,
    pub due_date: Option<NaiveDateTime>,
}

impl JobDraft {
    pub fn new(task_description: impl Into<String>, scheduled_time: impl Into<String>) -> Self {
        Self {
            task_description: task_description.into(),
            urgency: Urgency::Medium,
            task_shift: ShiftPreference::Any,
            required_quals: String::new(),
            scheduled_time: scheduled_time.into(),
            due_date: None,
        }
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    pub fn with_shift(mut self, shift: ShiftPreference) -> Self {
        self.task_shift = shift;
        self
    }

    pub fn with_quals(mut self, quals: impl Into<String>) -> Self {
        self.required_quals = quals.into();
        self
    }

    pub fn with_due_date(mut self, due: NaiveDateTime) -> Self {
        self.due_date = Some(due);
        self
    }
}

/// Scheduled jobs and the proposals submitted for them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobBoard {
    jobs: Vec<Job>,
    proposals: Vec<Proposal>,
}

impl JobBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a job with a freshly generated ID.
    pub fn schedule(&mut self, draft: JobDraft) -> Result<&Job> {
        self.schedule_with_rng(draft, &mut rand::rng())
    }

    /// Schedules a job, drawing the ID from `rng`.
    pub fn schedule_with_rng<R: Rng + ?Sized>(
        &mut self,
        draft: JobDraft,
        rng: &mut R,
    ) -> Result<&Job> {
        if draft.task_description.trim().is_empty() {
            return Err(AllocationError::Invalid(vec![ValidationError::new(
                ValidationErrorKind::MissingField,
                "job task description must not be empty",
            )]));
        }
        let scheduled_time = parse_schedule_time(&draft.scheduled_time)?;

        let mut job_id = generate_id(rng);
        while self.job(&job_id).is_some() {
            job_id = generate_id(rng);
        }

        let job = Job {
            job_id,
            task_description: draft.task_description,
            urgency: draft.urgency,
            task_shift: draft.task_shift,
            required_quals: crate::models::split_list(&draft.required_quals)
                .map(str::to_string)
                .collect(),
            scheduled_time,
            due_date: draft.due_date,
            assigned: false,
        };
        info!(job_id = %job.job_id, scheduled = %job.scheduled_time, "job scheduled");
        self.jobs.push(job);
        Ok(&self.jobs[self.jobs.len() - 1])
    }

    /// Records a proposal.
    pub fn submit_proposal(
        &mut self,
        job_id: &str,
        proposer: &str,
        proposal_text: &str,
        estimated_time: f64,
        now: NaiveDateTime,
    ) -> Result<&Proposal> {
        validate_proposal(job_id, proposer, proposal_text, estimated_time)?;

        let job_id = job_id.trim();
        if self.job(job_id).is_none() {
            warn!(job_id, "proposal submitted for a job that is not on the board");
        }

        self.proposals.push(Proposal {
            job_id: job_id.to_string(),
            proposer: proposer.trim().to_string(),
            proposal_text: proposal_text.trim().to_string(),
            estimated_time,
            timestamp: now,
        });
        info!(job_id, proposer = proposer.trim(), "proposal submitted");
        Ok(&self.proposals[self.proposals.len() - 1])
    }

    /// Marks a job allocated.
    pub fn mark_assigned(&mut self, job_id: &str) -> Result<()> {
        let job = self
            .jobs
            .iter_mut()
            .find(|j| j.job_id == job_id)
            .ok_or_else(|| AllocationError::UnknownJob(job_id.to_string()))?;
        job.assigned = true;
        Ok(())
    }

    pub fn job(&self, job_id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.job_id == job_id)
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Jobs not yet allocated, in scheduling order.
    pub fn pending(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter().filter(|j| !j.assigned)
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    /// Proposals for one job, in submission order.
    pub fn proposals_for<'a>(&'a self, job_id: &'a str) -> impl Iterator<Item = &'a Proposal> {
        self.proposals.iter().filter(move |p| p.job_id == job_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_schedule_time() {
        let t = parse_schedule_time("2025-04-03 14:30").unwrap();
        assert_eq!(
            t,
            NaiveDate::from_ymd_opt(2025, 4, 3)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap()
        );
        assert!(matches!(
            parse_schedule_time("next tuesday"),
            Err(AllocationError::InvalidDateTime { .. })
        ));
    }

    #[test]
    fn test_schedule_job() {
        let mut board = JobBoard::new();
        let mut rng = SmallRng::seed_from_u64(7);
        let job = board
            .schedule_with_rng(
                JobDraft::new("Train churn model", "2025-04-03 14:30")
                    .with_urgency(Urgency::High)
                    .with_quals("python, , machine learning "),
                &mut rng,
            )
            .unwrap();

        assert_eq!(job.job_id.len(), 8);
        assert_eq!(job.required_quals, vec!["python", "machine learning"]);
        assert!(!job.assigned);
        assert_eq!(board.jobs().len(), 1);
        assert_eq!(board.pending().count(), 1);
    }

    #[test]
    fn test_schedule_rejects_bad_input() {
        let mut board = JobBoard::new();
        assert!(matches!(
            board.schedule(JobDraft::new("Do it", "2025/04/03")),
            Err(AllocationError::InvalidDateTime { .. })
        ));
        assert!(matches!(
            board.schedule(JobDraft::new("  ", "2025-04-03 14:30")),
            Err(AllocationError::Invalid(_))
        ));
        assert!(board.jobs().is_empty());
    }

    #[test]
    fn test_mark_assigned() {
        let mut board = JobBoard::new();
        let id = board
            .schedule(JobDraft::new("Ship it", "2025-04-03 14:30"))
            .unwrap()
            .job_id
            .clone();

        board.mark_assigned(&id).unwrap();
        assert!(board.job(&id).unwrap().assigned);
        assert_eq!(board.pending().count(), 0);
        assert!(matches!(
            board.mark_assigned("nope"),
            Err(AllocationError::UnknownJob(_))
        ));
    }

    #[test]
    fn test_proposals() {
        let mut board = JobBoard::new();
        board
            .submit_proposal("j1", "Bob", "React is my thing", 3.0, now())
            .unwrap();
        // Unknown job IDs are accepted.
        board
            .submit_proposal("j2", " Alice ", "I can help", 0.5, now())
            .unwrap();

        assert_eq!(board.proposals().len(), 2);
        assert_eq!(board.proposals_for("j2").next().unwrap().proposer, "Alice");
        assert_eq!(board.proposals_for("j1").count(), 1);
    }

    #[test]
    fn test_proposal_validation() {
        let mut board = JobBoard::new();
        let err = board
            .submit_proposal("j1", "", "text", 0.1, now())
            .unwrap_err();
        match err {
            AllocationError::Invalid(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(board.proposals().is_empty());
    }
}
