//! degreeplan - Degree requirement tracking and progress auditing.
//!
//! degreeplan reads a program's requirement tree from JSON, evaluates it
//! against the courses a student has completed or planned, and reports
//! progress per category and per program.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Planner configuration and program file loading
//! - [`error`] - Error types and result aliases
//! - [`lint`] - Program file validation and linting
//! - [`requirements`] - Requirement trees, evaluation and progress
//! - [`state`] - Completion persistence
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use degreeplan::requirements::{
//!     CompletionState, Evaluator, Program, RequirementCategory, RequirementNode,
//! };
//!
//! let program = Program::new(
//!     "Computer Science",
//!     120,
//!     vec![RequirementCategory::new(
//!         "Core",
//!         vec![
//!             RequirementNode::course("CS 1331", Some(4)),
//!             RequirementNode::course("CS 1332", Some(3)),
//!         ],
//!     )],
//! );
//! let state = CompletionState::with_completed(["CS 1331"]);
//!
//! let evaluator = Evaluator::new(&program, &state);
//! let progress = evaluator.program_progress().unwrap();
//! assert_eq!(progress.categories[0].percentage, 50);
//! assert_eq!(evaluator.credits_summary().unwrap().completed_credits, 4);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod lint;
pub mod requirements;
pub mod state;
pub mod ui;

pub use error::{PlannerError, Result};
