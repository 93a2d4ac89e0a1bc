mod collision;
mod name_builder;
mod planner;
mod types;

pub use collision::{path_occupied, CollisionResolver};
pub use name_builder::{format_base_name, NamePattern, RenameConfig};
pub use planner::{commit, commit_with_ledger, preview};
pub use types::{CommitReport, PhotoCandidate, PlanEntry, RenameFailure, RenamePlan};
