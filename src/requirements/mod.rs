//! Degree requirement trees and their evaluation.
//!
//! This module holds the requirement data model and the one evaluator every
//! view relies on to decide what is satisfied and how far along a student is.
//!
//! # Modules
//!
//! - [`node`] - Requirement tree nodes and their JSON shape
//! - [`program`] - Programs, categories and footnotes
//! - [`completion`] - Completed/planned course sets
//! - [`evaluator`] - Node satisfaction and anomaly reporting
//! - [`progress`] - Unit, category, program and credit aggregation
//! - [`gpa`] - Grades and GPA
//! - [`code`] - Course code normalization for typed input

pub mod code;
pub mod completion;
pub mod evaluator;
pub mod gpa;
pub mod node;
pub mod program;
pub mod progress;

pub use code::{is_course_code, normalize_course_code};
pub use completion::{CompletionSource, CompletionState};
pub use evaluator::{Anomaly, AnomalyKind, Evaluator};
pub use gpa::{compute_gpa, GpaSummary, Grade};
pub use node::{
    CompletionKey, Course, FlexibleRequirement, NodeKind, RequirementNode, DEFAULT_CREDITS,
};
pub use program::{Footnote, NodePath, Program, ProgramKind, RequirementCategory};
pub use progress::{
    round_percentage, CategoryProgress, CreditsSummary, NodeProgress, ProgramProgress,
};
