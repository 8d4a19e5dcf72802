//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to
//! `.degreeplan/config.yml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `.degreeplan/config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Student name (for display purposes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,

    /// Path to the major's program file, relative to the project root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<PathBuf>,

    /// Paths to minor program files
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub minors: Vec<PathBuf>,

    /// Global settings
    pub settings: Settings,
}

impl PlannerConfig {
    /// Program paths in display order: major first, then minors.
    pub fn program_paths(&self) -> Vec<&PathBuf> {
        self.major.iter().chain(self.minors.iter()).collect()
    }
}

/// Global settings that apply to every command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default output mode: normal, verbose, quiet, silent
    pub default_output: OutputMode,

    /// Count planned courses as completed
    #[serde(skip_serializing_if = "is_false")]
    pub projected: bool,
}

fn is_false(v: &bool) -> bool {
    !v
}

/// Output verbosity mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Normal,
    Verbose,
    Quiet,
    Silent,
}
