//! Error types for degreeplan operations.
//!
//! This module defines [`PlannerError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PlannerError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `PlannerError::Other`) for unexpected errors
//! - Malformed requirement nodes are *not* errors: the evaluator fails them
//!   closed and reports an [`Anomaly`](crate::requirements::Anomaly) instead

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for degreeplan operations.
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Failed to read or parse a program requirements file.
    #[error("Failed to load program at {path}: {message}")]
    ProgramParseError { path: PathBuf, message: String },

    /// A shared requirement group references itself, directly or indirectly.
    #[error("Circular requirement reference detected: {cycle}")]
    CyclicRequirement { cycle: String },

    /// No configured program matches the requested name.
    #[error("Unknown program: {name}")]
    UnknownProgram { name: String },

    /// A grade string could not be parsed.
    #[error("Invalid grade '{value}' (expected one of A, B, C, D, F, P, W)")]
    InvalidGrade { value: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for degreeplan operations.
pub type Result<T> = std::result::Result<T, PlannerError>;
