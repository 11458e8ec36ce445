//! Allocation domain models.
//!
//! Provides the core data types for representing allocation problems
//! and their outcomes.
//!
//! # Domain Mappings
//!
//! | u-allocate | Software team | Field service | Support desk |
//! |------------|---------------|---------------|--------------|
//! | Individual | Engineer | Technician | Agent |
//! | TaskRequest | Ticket | Work order | Case |
//! | MatchRecord | Triage log | Dispatch log | Routing log |
//! | Job | Backlog item | Planned visit | Scheduled callback |

mod history;
mod individual;
mod job;
mod task;

pub use history::{MatchEntry, MatchHistory, MatchRecord};
pub use individual::{demo_roster, generate_id, Individual, NewIndividual, Shift};
pub(crate) use individual::split_list;
pub use job::{Job, Proposal};
pub use task::{ShiftPreference, TaskRequest, Urgency};
