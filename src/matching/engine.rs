//! Match engine: candidate filter, score composition and ranking.

use std::sync::Arc;
use tracing::debug;

use super::rules::{
    ComplexityBoost, DueDateUrgency, FeedbackAdjustment, KeywordOverlap, ProficiencyBonus,
    SkillSimilarity, UrgencyWeight,
};
use super::{Combine, MatchContext, ScoringRule, SimilarityModel, TaskProfile, TermFrequencyCosine};
use crate::config::ScoringConfig;
use crate::models::{Individual, ShiftPreference};

/// Individuals that can take a task on the given shift.
///
/// Keeps roster order. An individual qualifies when available, holding no
/// current task, and on a shift the preference accepts.
pub fn filter_candidates(roster: &[Individual], shift: ShiftPreference) -> Vec<usize> {
    roster
        .iter()
        .enumerate()
        .filter(|(_, ind)| ind.is_idle() && shift.accepts(ind.shift))
        .map(|(idx, _)| idx)
        .collect()
}

/// Per-rule contributions to a candidate's score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// (rule name, rule score) in evaluation order.
    pub components: Vec<(&'static str, f64)>,
    /// Sum of additive rules.
    pub base: f64,
    /// Product of scaling rules.
    pub multiplier: f64,
    /// `base * multiplier`.
    pub total: f64,
}

impl ScoreBreakdown {
    /// Score of a named rule, if it ran.
    pub fn component(&self, name: &str) -> Option<f64> {
        self.components
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }
}

/// A scored candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    /// Index into the roster slice that was ranked.
    pub index: usize,
    pub individual_id: String,
    pub name: String,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Composable scoring engine.
///
/// Additive rules form the base score; scaling rules multiply it.
/// With no scaling rules the multiplier is 1.
///
/// # Example
/// ```
/// use u_allocate::matching::MatchEngine;
/// use u_allocate::matching::rules;
///
/// let engine = MatchEngine::new()
///     .with_rule(rules::ProficiencyBonus::default())
///     .with_rule(rules::ComplexityBoost);
/// assert_eq!(engine.rule_names(), vec!["proficiency", "complexity"]);
/// ```
#[derive(Clone, Default)]
pub struct MatchEngine {
    rules: Vec<Arc<dyn ScoringRule>>,
}

impl MatchEngine {
    /// Creates an engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The standard seven-rule blend with term-frequency similarity.
    pub fn standard(config: &ScoringConfig) -> Self {
        Self::standard_with_model(config, TermFrequencyCosine)
    }

    /// The standard blend with a custom similarity model.
    pub fn standard_with_model<M: SimilarityModel + 'static>(
        config: &ScoringConfig,
        model: M,
    ) -> Self {
        Self::new()
            .with_rule(SkillSimilarity::new(model))
            .with_rule(FeedbackAdjustment)
            .with_rule(ProficiencyBonus {
                divisor: config.proficiency_divisor,
            })
            .with_rule(KeywordOverlap {
                bonus: config.keyword_bonus,
            })
            .with_rule(UrgencyWeight {
                weights: config.urgency.clone(),
            })
            .with_rule(DueDateUrgency {
                weights: config.due_date.clone(),
            })
            .with_rule(ComplexityBoost)
    }

    /// Adds a rule.
    pub fn with_rule<R: ScoringRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Scores one candidate.
    pub fn score(
        &self,
        candidate: &Individual,
        task: &TaskProfile,
        context: &MatchContext,
    ) -> ScoreBreakdown {
        let mut components = Vec::with_capacity(self.rules.len());
        let mut base = 0.0;
        let mut multiplier = 1.0;

        for rule in &self.rules {
            let value = rule.evaluate(candidate, task, context);
            match rule.combine() {
                Combine::Add => base += value,
                Combine::Scale => multiplier *= value,
            }
            components.push((rule.name(), value));
        }

        ScoreBreakdown {
            components,
            base,
            multiplier,
            total: base * multiplier,
        }
    }

    /// Filters, scores and ranks the roster for a task.
    ///
    /// Highest score first. The sort is stable: equal scores keep
    /// roster order.
    pub fn rank(
        &self,
        roster: &[Individual],
        task: &TaskProfile,
        context: &MatchContext,
    ) -> Vec<RankedCandidate> {
        let candidates = filter_candidates(roster, task.shift);
        debug!(
            roster = roster.len(),
            candidates = candidates.len(),
            shift = %task.shift,
            "filtered candidates"
        );

        let mut ranked: Vec<RankedCandidate> = candidates
            .into_iter()
            .map(|idx| {
                let ind = &roster[idx];
                let breakdown = self.score(ind, task, context);
                RankedCandidate {
                    index: idx,
                    individual_id: ind.id.clone(),
                    name: ind.name.clone(),
                    score: breakdown.total,
                    breakdown,
                }
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for (pos, c) in ranked.iter().enumerate() {
            debug!(rank = pos + 1, id = %c.individual_id, score = c.score, "ranked candidate");
        }
        ranked
    }

    /// Best candidate, if any.
    pub fn select_best(
        &self,
        roster: &[Individual],
        task: &TaskProfile,
        context: &MatchContext,
    ) -> Option<RankedCandidate> {
        self.rank(roster, task, context).into_iter().next()
    }
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|r| format!("{}({:?})", r.name(), r.combine()))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComplexityConfig;
    use crate::models::{Shift, TaskRequest, Urgency};
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn profile(request: &TaskRequest) -> TaskProfile {
        TaskProfile::analyze(
            request,
            ["python", "machine learning", "react", "c++"],
            &ComplexityConfig::default(),
        )
    }

    fn person(id: &str, skills: &str, shift: Shift) -> Individual {
        Individual::new(id, id)
            .with_skills(skills)
            .with_proficiencies(vec![4.0])
            .with_shift(shift)
    }

    /// Constant-similarity model so only the rule under test varies.
    #[derive(Debug)]
    struct Flat(f64);

    impl SimilarityModel for Flat {
        fn name(&self) -> &'static str {
            "flat"
        }
        fn similarity(&self, _task: &str, _skills: &str) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_filter_excludes_unavailable_busy_and_wrong_shift() {
        let mut busy = person("busy", "python", Shift::Morning);
        busy.current_task = Some("other".into());
        busy.available = false;
        let mut busy_but_flagged_available = person("flagged", "python", Shift::Morning);
        busy_but_flagged_available.current_task = Some("other".into());
        let roster = vec![
            person("m1", "python", Shift::Morning),
            person("off", "python", Shift::Morning).with_available(false),
            busy,
            busy_but_flagged_available,
            person("n1", "python", Shift::Night),
        ];

        assert_eq!(filter_candidates(&roster, ShiftPreference::Any), vec![0, 4]);
        assert_eq!(filter_candidates(&roster, ShiftPreference::Morning), vec![0]);
        assert_eq!(filter_candidates(&roster, ShiftPreference::Night), vec![4]);
    }

    #[test]
    fn test_ranking_descending() {
        let roster = vec![
            person("js", "javascript, react", Shift::Morning),
            person("py", "python, machine learning", Shift::Morning),
        ];
        let req = TaskRequest::new("python machine learning pipeline");
        let engine = MatchEngine::standard(&ScoringConfig::default());

        let ranked = engine.rank(&roster, &profile(&req), &MatchContext::at_time(now()));
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].individual_id, "py");
        assert_eq!(ranked[0].index, 1);
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let roster = vec![
            person("c", "python", Shift::Morning),
            person("a", "python", Shift::Night),
            person("b", "python", Shift::Morning),
        ];
        let req = TaskRequest::new("python");
        let engine = MatchEngine::standard_with_model(&ScoringConfig::default(), Flat(0.5));

        let ranked = engine.rank(&roster, &profile(&req), &MatchContext::at_time(now()));
        let ids: Vec<_> = ranked.iter().map(|c| c.individual_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_higher_urgency_scores_higher() {
        let roster = vec![person("p", "python", Shift::Morning)];
        let engine = MatchEngine::standard_with_model(&ScoringConfig::default(), Flat(0.5));
        let ctx = MatchContext::at_time(now());

        let score_for = |urgency| {
            let req = TaskRequest::new("python").with_urgency(urgency);
            engine.rank(&roster, &profile(&req), &ctx)[0].score
        };
        assert!(score_for(Urgency::High) > score_for(Urgency::Medium));
        assert!(score_for(Urgency::Medium) > score_for(Urgency::Low));
    }

    #[test]
    fn test_score_formula() {
        let ind = Individual::new("A", "A")
            .with_skills("python, machine learning")
            .with_proficiencies(vec![4.0, 5.0]);
        let req = TaskRequest::new("python machine learning")
            .with_urgency(Urgency::High)
            .with_due_date(now() + Duration::hours(10));
        let task = profile(&req);
        let ctx = MatchContext::at_time(now()).with_feedback("A", 0.05);
        let engine = MatchEngine::standard_with_model(&ScoringConfig::default(), Flat(0.6));

        let b = engine.score(&ind, &task, &ctx);
        // base = 0.6 + 0.05 + 0.45 + 0.2
        assert!((b.base - 1.3).abs() < 1e-10);
        // multiplier = 1.1 * 1.3 * (1 + 0.03)
        assert!((b.multiplier - 1.1 * 1.3 * 1.03).abs() < 1e-10);
        assert!((b.total - b.base * b.multiplier).abs() < 1e-12);
        assert_eq!(b.component("keywords"), Some(0.2));
        assert!(b.component("missing").is_none());
    }

    #[test]
    fn test_no_candidates() {
        let roster = vec![person("n", "python", Shift::Night)];
        let req = TaskRequest::new("python").with_shift(ShiftPreference::Morning);
        let engine = MatchEngine::standard(&ScoringConfig::default());
        let ctx = MatchContext::at_time(now());

        assert!(engine.rank(&roster, &profile(&req), &ctx).is_empty());
        assert!(engine.select_best(&roster, &profile(&req), &ctx).is_none());
        assert!(engine.rank(&[], &profile(&req), &ctx).is_empty());
    }

    #[test]
    fn test_empty_engine_scores_zero() {
        let engine = MatchEngine::new();
        let b = engine.score(
            &person("p", "python", Shift::Morning),
            &profile(&TaskRequest::new("python")),
            &MatchContext::at_time(now()),
        );
        assert_eq!(b.total, 0.0);
        assert_eq!(b.multiplier, 1.0);
        assert!(b.components.is_empty());
    }

    #[test]
    fn test_standard_rule_order() {
        let engine = MatchEngine::standard(&ScoringConfig::default());
        assert_eq!(
            engine.rule_names(),
            vec![
                "similarity",
                "feedback",
                "proficiency",
                "keywords",
                "urgency",
                "due_date",
                "complexity"
            ]
        );
    }
}
