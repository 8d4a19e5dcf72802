//! Configuration loading, parsing, and validation.
//!
//! This module handles:
//! - Schema definitions in [`schema`]
//! - File discovery, config and program loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use degreeplan::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".degreeplan");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "major: programs/cs.json").unwrap();
//!
//! let config = load_config(temp.path()).unwrap();
//! validate(&config).unwrap();
//! assert!(config.major.is_some());
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use schema::{OutputMode, PlannerConfig, Settings};

pub use loader::{
    apply_env_overrides, find_project_root, load_config, load_config_file, load_program,
    load_programs, parse_bool_override, parse_config, select_programs, ConfigPaths,
    LoadedProgram, PROJECTED_ENV, PROJECT_DIR,
};

pub use validator::{validate, validate_config, ValidationError};
