//! Program file validation and linting.
//!
//! Requirement trees are authored by hand and only partly checked by the
//! parser. This module validates them at load time through a pluggable
//! rule-based system, so malformed nodes show up before anyone relies on a
//! progress number.
//!
//! # Overview
//!
//! The lint system consists of:
//!
//! - **Rules** - Individual validation checks ([`LintRule`] trait)
//! - **Registry** - Collection of all available rules ([`RuleRegistry`])
//! - **Diagnostics** - Issue reports with severity and suggestions ([`LintDiagnostic`])
//!
//! # Example
//!
//! ```
//! use degreeplan::lint::{RuleRegistry, RuleId, Severity};
//! use degreeplan::requirements::{Program, RequirementCategory, RequirementNode};
//!
//! let program = Program::new(
//!     "Math",
//!     18,
//!     vec![RequirementCategory::new(
//!         "Core",
//!         vec![RequirementNode::select(0, vec![RequirementNode::course("MATH 1551", None)])],
//!     )],
//! );
//!
//! let diagnostics = RuleRegistry::with_builtins().check(&program);
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].rule_id, RuleId::new("invalid-selection-count"));
//! assert_eq!(diagnostics[0].severity, Severity::Error);
//! ```

pub mod diagnostic;
pub mod output;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod schema;

pub use diagnostic::LintDiagnostic;
pub use output::{HumanFormatter, JsonFormatter, LintFormatter, OutputFormat};
pub use registry::RuleRegistry;
pub use rule::{LintRule, RuleId, Severity};
pub use rules::{
    CircularGroupRefRule, DuplicateCourseRule, EmptyGroupRule, EmptySelectionRule,
    InvalidSelectionCountRule, MissingCourseCodeRule, ProgramCreditsRule,
    SelectionUnsatisfiableRule, UndefinedGroupRefRule, UnknownNodeKindRule,
};
pub use schema::SchemaGenerator;
