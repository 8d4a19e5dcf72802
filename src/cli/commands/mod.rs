//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that read the planner
//! state share [`PlannerContext`] so configuration, program files and saved
//! progress are loaded the same way everywhere.

pub mod completions;
pub mod context;
pub mod dispatcher;
pub mod export;
pub mod init;
pub mod lint;
pub mod mark;
pub mod report;
pub mod schema;
pub mod status;
pub mod tree;

pub use context::PlannerContext;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
