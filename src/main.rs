mod cli;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::path::Path;
use tracing::{info, warn};

use u_allocate::allocator::Allocator;
use u_allocate::config::AllocatorConfig;
use u_allocate::models::{demo_roster, Individual, NewIndividual, TaskRequest};
use u_allocate::{export, jobs};

use crate::cli::{CliArgs, Command, ExportKind};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let config = AllocatorConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;
    let roster = load_roster(args.roster.as_deref())?;
    let mut allocator = Allocator::new(config)
        .with_roster(roster)
        .context("roster failed validation")?;

    let now = Local::now().naive_local();
    let mutated = match args.command {
        Command::Match {
            task,
            category,
            urgency,
            shift,
            due,
            assign_top,
            history_out,
        } => {
            let mut request = TaskRequest::new(task).with_urgency(urgency).with_shift(shift);
            if let Some(category) = category {
                request = request.with_category(category);
            }
            if let Some(due) = due {
                request = request.with_due_date(jobs::parse_schedule_time(&due)?);
            }

            if assign_top {
                match allocator.auto_allocate(&request, now)? {
                    Some(allocation) => {
                        println!(
                            "{} ({}) score {:.4} [{}]",
                            allocation.candidate.name,
                            allocation.candidate.individual_id,
                            allocation.candidate.score,
                            allocation.category
                        );
                        println!("{}", allocation.receipt.notice);
                    }
                    None => println!(
                        "No available individuals found for auto allocation in the specified shift."
                    ),
                }
            } else {
                let outcome = allocator.match_task(&request, now)?;
                println!("Category: {}", outcome.category);
                if !outcome.extracted_skills.is_empty() {
                    println!("Skills: {}", outcome.extracted_skills.join(", "));
                }
                if outcome.ranking.is_empty() {
                    println!("No available individuals found for the specified shift.");
                }
                for (rank, candidate) in outcome.ranking.iter().enumerate() {
                    println!(
                        "{:>2}. {:<12} {}  {:.4}",
                        rank + 1,
                        candidate.name,
                        candidate.individual_id,
                        candidate.score
                    );
                }
            }

            if let Some(path) = history_out {
                export::save_match_history(&path, allocator.history().records())
                    .with_context(|| format!("failed to write {}", path.display()))?;
            }
            assign_top
        }
        Command::Add {
            name,
            skills,
            proficiencies,
            shift,
            unavailable,
        } => {
            let form = NewIndividual::new(name, skills)
                .with_proficiencies(proficiencies)
                .with_shift(shift)
                .with_available(!unavailable);
            let id = allocator.add_individual(form)?;
            println!("Added individual {id}");
            true
        }
        Command::Complete { id } => {
            let task = allocator.complete_task(&id)?;
            println!("Completed '{task}'");
            true
        }
        Command::Reassign => {
            let moves = allocator.reassign_overdue(now)?;
            if moves.is_empty() {
                println!("No overdue tasks.");
            }
            for m in &moves {
                match &m.to {
                    Some(to) => println!("'{}': {} -> {}", m.task, m.from, to),
                    None => println!("'{}': released from {}, no one available", m.task, m.from),
                }
            }
            !moves.is_empty()
        }
        Command::Export { kind, out } => {
            let written = match kind {
                ExportKind::Individuals => export::save_individuals(&out, allocator.roster()),
                ExportKind::Analytics => export::save_performance(&out, allocator.roster()),
            };
            written.with_context(|| format!("failed to write {}", out.display()))?;
            println!("Wrote {}", out.display());
            false
        }
        Command::Kpi => {
            let kpi = allocator.kpi();
            println!("Headcount:        {}", kpi.headcount);
            println!("Available:        {}", kpi.available);
            println!("Active tasks:     {}", kpi.active_tasks);
            println!("Tasks assigned:   {}", kpi.tasks_assigned);
            println!("Tasks completed:  {}", kpi.tasks_completed);
            println!("Completion rate:  {:.1}%", kpi.completion_rate * 100.0);
            println!("Avg feedback:     {:.2}", kpi.avg_feedback);
            println!("Utilization:      {:.1}%", kpi.utilization * 100.0);
            println!("Avg progress:     {:.1}%", kpi.avg_progress);
            false
        }
    };

    if mutated {
        if let Some(path) = args.roster.as_deref() {
            export::save_individuals(path, allocator.roster())
                .with_context(|| format!("failed to write roster {}", path.display()))?;
        }
    }

    Ok(())
}

fn load_roster(path: Option<&Path>) -> Result<Vec<Individual>> {
    match path {
        Some(path) if path.exists() => export::load_individuals(path)
            .with_context(|| format!("failed to read roster {}", path.display())),
        Some(path) => {
            warn!(path = %path.display(), "roster file not found, starting from the demo roster");
            Ok(demo_roster())
        }
        None => {
            info!("using the demo roster");
            Ok(demo_roster())
        }
    }
}
