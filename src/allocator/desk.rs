//! The allocation desk.
//!
//! # Lifecycle
//!
//! 1. `match_task` ranks idle, shift-compatible individuals and logs a
//!    [`MatchRecord`].
//! 2. `assign` (manual) or `auto_allocate` (top candidate) hands the task
//!    over: the individual becomes unavailable with progress 0.
//! 3. `update_progress` / `advance_progress` track work.
//! 4. `complete_task` credits the individual and makes them available.
//!    `reassign_overdue` releases stale work and hands it to someone else.

use chrono::NaiveDateTime;
use rand::Rng;
use std::collections::HashMap;
use tracing::{debug, info};

use super::forecast::{assignment_notice, predict_completion_hours};
use super::TeamKpi;
use crate::config::AllocatorConfig;
use crate::error::{AllocationError, Result};
use crate::jobs::JobBoard;
use crate::matching::text::{classify, task_complexity};
use crate::matching::{MatchContext, MatchEngine, RankedCandidate, TaskProfile};
use crate::models::{
    generate_id, Individual, MatchEntry, MatchHistory, MatchRecord, NewIndividual,
    ShiftPreference, TaskRequest, Urgency,
};
use crate::validation::{
    parse_proficiencies, validate_new_individual, validate_roster, validate_task,
};

/// Result of a manual match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Given or classified category.
    pub category: String,
    /// Vocabulary skills found in the description.
    pub extracted_skills: Vec<String>,
    /// Candidates, best first. Empty when nobody qualifies.
    pub ranking: Vec<RankedCandidate>,
}

/// Confirmation of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentReceipt {
    pub individual_id: String,
    pub task: String,
    pub predicted_hours: f64,
    /// Message for the assignee.
    pub notice: String,
}

/// Result of an automatic allocation.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoAllocation {
    /// Chosen candidate, with score breakdown.
    pub candidate: RankedCandidate,
    pub category: String,
    pub receipt: AssignmentReceipt,
}

/// An overdue task moved off its holder.
#[derive(Debug, Clone, PartialEq)]
pub struct Reassignment {
    pub task: String,
    /// Individual the task was taken from.
    pub from: String,
    /// New holder; `None` when nobody else could take it.
    pub to: Option<String>,
}

/// Owns the roster, feedback ledger and match history.
///
/// All operations are synchronous and take `&mut self`; callers that
/// share an allocator across threads wrap it in a lock.
#[derive(Debug, Clone)]
pub struct Allocator {
    config: AllocatorConfig,
    engine: MatchEngine,
    roster: Vec<Individual>,
    feedback: HashMap<String, f64>,
    history: MatchHistory,
}

impl Allocator {
    /// Creates an allocator with an empty roster and the standard engine.
    pub fn new(config: AllocatorConfig) -> Self {
        let engine = MatchEngine::standard(&config.scoring);
        Self {
            config,
            engine,
            roster: Vec::new(),
            feedback: HashMap::new(),
            history: MatchHistory::new(),
        }
    }

    /// Loads a roster after validating it.
    pub fn with_roster(mut self, roster: Vec<Individual>) -> Result<Self> {
        validate_roster(&roster)?;
        self.feedback = roster.iter().map(|ind| (ind.id.clone(), 0.0)).collect();
        self.roster = roster;
        Ok(self)
    }

    /// Replaces the match engine.
    pub fn with_engine(mut self, engine: MatchEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    pub fn roster(&self) -> &[Individual] {
        &self.roster
    }

    pub fn history(&self) -> &MatchHistory {
        &self.history
    }

    pub fn individual(&self, id: &str) -> Option<&Individual> {
        self.roster.iter().find(|ind| ind.id == id)
    }

    fn individual_mut(&mut self, id: &str) -> Result<&mut Individual> {
        self.roster
            .iter_mut()
            .find(|ind| ind.id == id)
            .ok_or_else(|| AllocationError::UnknownIndividual(id.to_string()))
    }

    /// Accumulated feedback adjustment for an individual.
    pub fn feedback_for(&self, id: &str) -> f64 {
        self.feedback.get(id).copied().unwrap_or(0.0)
    }

    /// Team performance indicators.
    pub fn kpi(&self) -> TeamKpi {
        TeamKpi::calculate(&self.roster)
    }

    // ======================== Roster management ========================

    /// Adds an individual from a form; returns the new ID.
    pub fn add_individual(&mut self, form: NewIndividual) -> Result<String> {
        self.add_individual_with_rng(form, &mut rand::rng())
    }

    /// Adds an individual, drawing the ID from `rng`.
    pub fn add_individual_with_rng<R: Rng + ?Sized>(
        &mut self,
        form: NewIndividual,
        rng: &mut R,
    ) -> Result<String> {
        validate_new_individual(&form)?;
        let proficiencies = parse_proficiencies(&form.proficiencies)?;

        let mut id = generate_id(rng);
        while self.individual(&id).is_some() {
            id = generate_id(rng);
        }

        let individual = Individual::new(id.clone(), form.name.trim())
            .with_skills(form.skills.trim())
            .with_proficiencies(proficiencies)
            .with_available(form.available)
            .with_shift(form.shift);

        info!(id = %id, name = %individual.name, "individual added");
        self.roster.push(individual);
        self.feedback.insert(id.clone(), 0.0);
        Ok(id)
    }

    /// Sets availability.
    ///
    /// An individual holding a task cannot be made available; complete or
    /// release the task instead.
    pub fn set_availability(&mut self, id: &str, available: bool) -> Result<()> {
        let ind = self.individual_mut(id)?;
        if available && ind.is_busy() {
            return Err(AllocationError::AlreadyAssigned(id.to_string()));
        }
        ind.available = available;
        debug!(id, available, "availability updated");
        Ok(())
    }

    /// Individuals whose name or skills contain `term` (case-insensitive).
    ///
    /// A blank term returns the whole roster.
    pub fn search(&self, term: &str) -> Vec<&Individual> {
        let term = term.trim().to_lowercase();
        self.roster
            .iter()
            .filter(|ind| {
                term.is_empty()
                    || ind.name.to_lowercase().contains(&term)
                    || ind.skills.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Adds `delta` to an individual's feedback ledger and rating.
    ///
    /// Returns the new ledger value.
    pub fn record_feedback(&mut self, id: &str, delta: f64) -> Result<f64> {
        let ind = self.individual_mut(id)?;
        ind.avg_feedback += delta;
        let entry = self.feedback.entry(id.to_string()).or_insert(0.0);
        *entry += delta;
        let total = *entry;
        debug!(id, delta, total, "feedback recorded");
        Ok(total)
    }

    /// Positive feedback of one configured step.
    pub fn like(&mut self, id: &str) -> Result<f64> {
        self.record_feedback(id, self.config.feedback_step)
    }

    /// Negative feedback of one configured step.
    pub fn dislike(&mut self, id: &str) -> Result<f64> {
        self.record_feedback(id, -self.config.feedback_step)
    }

    // ======================== Matching ========================

    /// Skills recognised in task text: configured vocabulary plus every
    /// roster skill.
    pub fn vocabulary(&self) -> Vec<String> {
        let mut vocab: Vec<String> = self
            .config
            .skill_vocabulary
            .iter()
            .map(|s| s.trim().to_lowercase())
            .collect();
        for ind in &self.roster {
            for skill in ind.skill_list() {
                if !vocab.contains(&skill) {
                    vocab.push(skill);
                }
            }
        }
        vocab
    }

    /// Analyses a request against the current vocabulary.
    pub fn analyze(&self, request: &TaskRequest) -> TaskProfile {
        let vocab = self.vocabulary();
        TaskProfile::analyze(
            request,
            vocab.iter().map(String::as_str),
            &self.config.scoring.complexity,
        )
    }

    fn context(&self, now: NaiveDateTime) -> MatchContext {
        MatchContext::at_time(now).with_feedback_ledger(self.feedback.clone())
    }

    fn category_for(&self, request: &TaskRequest) -> String {
        request
            .category
            .clone()
            .unwrap_or_else(|| classify(&request.description, &self.config.categories))
    }

    /// Ranks candidates without recording anything.
    pub fn preview(
        &self,
        request: &TaskRequest,
        now: NaiveDateTime,
    ) -> Result<Vec<RankedCandidate>> {
        validate_task(request)?;
        let profile = self.analyze(request);
        Ok(self.engine.rank(&self.roster, &profile, &self.context(now)))
    }

    /// Ranks candidates for a task and records the outcome.
    ///
    /// Nothing is recorded when no individual qualifies.
    pub fn match_task(
        &mut self,
        request: &TaskRequest,
        now: NaiveDateTime,
    ) -> Result<MatchOutcome> {
        validate_task(request)?;
        let profile = self.analyze(request);
        let ranking = self.engine.rank(&self.roster, &profile, &self.context(now));
        let category = self.category_for(request);

        if ranking.is_empty() {
            info!(shift = %request.shift, "no available individuals for task");
        } else {
            self.history.push(MatchRecord {
                task: request.description.clone(),
                category: category.clone(),
                urgency: request.urgency,
                matches: ranking
                    .iter()
                    .map(|c| MatchEntry {
                        individual_id: c.individual_id.clone(),
                        score: c.score,
                    })
                    .collect(),
                due_date: request.due_date,
                timestamp: now,
                predicted_completion: None,
            });
        }

        Ok(MatchOutcome {
            category,
            extracted_skills: profile.skills,
            ranking,
        })
    }

    /// Assigns a task to an individual.
    ///
    /// Fails if the individual already holds a task or has been marked
    /// unavailable.
    pub fn assign(
        &mut self,
        id: &str,
        task: &str,
        now: NaiveDateTime,
    ) -> Result<AssignmentReceipt> {
        validate_task(&TaskRequest::new(task))?;
        let complexity = task_complexity(task, &self.config.scoring.complexity);
        let model = self.config.completion.clone();

        let ind = self.individual_mut(id)?;
        if ind.is_busy() {
            return Err(AllocationError::AlreadyAssigned(id.to_string()));
        }
        if !ind.available {
            return Err(AllocationError::Unavailable(id.to_string()));
        }

        let hours = predict_completion_hours(ind, complexity, &model);
        ind.tasks_assigned += 1;
        ind.available = false;
        ind.predicted_completion = Some(hours);
        ind.current_task = Some(task.to_string());
        ind.assigned_at = Some(now);
        ind.progress = 0;

        let notice = assignment_notice(ind, task, hours);
        info!(id, hours, "{notice}");

        Ok(AssignmentReceipt {
            individual_id: id.to_string(),
            task: task.to_string(),
            predicted_hours: hours,
            notice,
        })
    }

    /// Assigns the task to the top-ranked candidate and records it.
    ///
    /// Returns `None` when nobody qualifies.
    pub fn auto_allocate(
        &mut self,
        request: &TaskRequest,
        now: NaiveDateTime,
    ) -> Result<Option<AutoAllocation>> {
        self.allocate_top(request, now, None)
    }

    fn allocate_top(
        &mut self,
        request: &TaskRequest,
        now: NaiveDateTime,
        exclude: Option<&str>,
    ) -> Result<Option<AutoAllocation>> {
        validate_task(request)?;
        let profile = self.analyze(request);
        let best = self
            .engine
            .rank(&self.roster, &profile, &self.context(now))
            .into_iter()
            .find(|c| Some(c.individual_id.as_str()) != exclude);

        let Some(candidate) = best else {
            info!(shift = %request.shift, "no candidate for auto allocation");
            return Ok(None);
        };

        let receipt = self.assign(&candidate.individual_id, &request.description, now)?;
        let category = self.category_for(request);

        self.history.push(MatchRecord {
            task: request.description.clone(),
            category: category.clone(),
            urgency: request.urgency,
            matches: vec![MatchEntry {
                individual_id: candidate.individual_id.clone(),
                score: candidate.score,
            }],
            due_date: request.due_date,
            timestamp: now,
            predicted_completion: Some(receipt.predicted_hours),
        });

        Ok(Some(AutoAllocation {
            candidate,
            category,
            receipt,
        }))
    }

    /// Auto-allocates a scheduled job and marks it assigned on success.
    ///
    /// A job that is already allocated is refused.
    pub fn allocate_job(
        &mut self,
        board: &mut JobBoard,
        job_id: &str,
        now: NaiveDateTime,
    ) -> Result<Option<AutoAllocation>> {
        let job = board
            .job(job_id)
            .ok_or_else(|| AllocationError::UnknownJob(job_id.to_string()))?;
        if job.assigned {
            return Err(AllocationError::JobAlreadyAssigned(job_id.to_string()));
        }
        let request = job.to_task_request();

        let allocation = self.auto_allocate(&request, now)?;
        if allocation.is_some() {
            board.mark_assigned(job_id)?;
        }
        Ok(allocation)
    }

    // ======================== Progress ========================

    /// Sets progress of an active task (clamped to 100).
    pub fn update_progress(&mut self, id: &str, percent: u8) -> Result<()> {
        let ind = self.individual_mut(id)?;
        if !ind.is_busy() {
            return Err(AllocationError::NotAssigned(id.to_string()));
        }
        ind.progress = percent.min(100);
        Ok(())
    }

    /// Advances every active task by `step` percent (capped at 100).
    ///
    /// Returns the number of tasks advanced.
    pub fn advance_progress(&mut self, step: u8) -> usize {
        let mut advanced = 0;
        for ind in self.roster.iter_mut().filter(|ind| ind.is_busy()) {
            ind.progress = ind.progress.saturating_add(step).min(100);
            advanced += 1;
        }
        debug!(advanced, step, "progress advanced");
        advanced
    }

    /// Completes the individual's task and makes them available.
    ///
    /// Returns the completed task description.
    pub fn complete_task(&mut self, id: &str) -> Result<String> {
        let ind = self.individual_mut(id)?;
        let task = ind
            .current_task
            .clone()
            .ok_or_else(|| AllocationError::NotAssigned(id.to_string()))?;
        ind.tasks_completed += 1;
        ind.release();
        info!(id, task = %task, "task completed");
        Ok(task)
    }

    /// Individuals whose task has outrun its prediction at `now`.
    pub fn overdue(&self, now: NaiveDateTime) -> Vec<&Individual> {
        self.roster
            .iter()
            .filter(|ind| ind.is_busy() && ind.expected_finish().is_some_and(|finish| now > finish))
            .collect()
    }

    /// Releases overdue tasks and hands each to the best other candidate.
    pub fn reassign_overdue(&mut self, now: NaiveDateTime) -> Result<Vec<Reassignment>> {
        let stale: Vec<(String, String)> = self
            .overdue(now)
            .into_iter()
            .filter_map(|ind| ind.current_task.clone().map(|task| (ind.id.clone(), task)))
            .collect();

        let mut moves = Vec::with_capacity(stale.len());
        for (from, task) in stale {
            self.individual_mut(&from)?.release();
            info!(id = %from, task = %task, "overdue task released");

            let request = TaskRequest::new(task.clone())
                .with_urgency(Urgency::High)
                .with_shift(ShiftPreference::Any);
            let to = self
                .allocate_top(&request, now, Some(&from))?
                .map(|a| a.candidate.individual_id);

            moves.push(Reassignment { task, from, to });
        }
        Ok(moves)
    }
}
