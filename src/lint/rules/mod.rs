//! Built-in lint rules.
//!
//! This module contains all the built-in validation rules for program files.

pub mod circular_group_ref;
pub mod duplicate_course;
pub mod empty_group;
pub mod node_shape;
pub mod program_credits;
pub mod selection;
pub mod undefined_group_ref;

pub use circular_group_ref::CircularGroupRefRule;
pub use duplicate_course::DuplicateCourseRule;
pub use empty_group::EmptyGroupRule;
pub use node_shape::{MissingCourseCodeRule, UnknownNodeKindRule};
pub use program_credits::ProgramCreditsRule;
pub use selection::{EmptySelectionRule, InvalidSelectionCountRule, SelectionUnsatisfiableRule};
pub use undefined_group_ref::UndefinedGroupRefRule;
