//! Configuration validation rules.
//!
//! Program files get their own lint rules; this module only checks the
//! planner configuration that points at them.

use crate::config::schema::PlannerConfig;
use crate::error::{PlannerError, Result};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

/// Validate a configuration and return all errors.
///
/// This function collects all validation errors rather than stopping
/// at the first one, allowing users to fix multiple issues at once.
pub fn validate_config(config: &PlannerConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.major.is_none() {
        errors.push(ValidationError {
            rule: "missing-major".to_string(),
            message: "No major configured; set 'major' to a program file".to_string(),
        });
    }

    let paths = config.program_paths();
    for (i, path) in paths.iter().enumerate() {
        if paths[..i].contains(path) {
            errors.push(ValidationError {
                rule: "duplicate-program".to_string(),
                message: format!("Program '{}' is listed more than once", path.display()),
            });
        }
    }

    errors
}

/// Validate configuration, returning the first error if any.
pub fn validate(config: &PlannerConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(PlannerError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn requires_major() {
        let errors = validate_config(&PlannerConfig::default());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "missing-major");
    }

    #[test]
    fn detects_duplicate_programs() {
        let config = PlannerConfig {
            major: Some(PathBuf::from("cs.json")),
            minors: vec![PathBuf::from("cs.json")],
            ..Default::default()
        };

        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, "duplicate-program");
    }

    #[test]
    fn validate_returns_validation_error() {
        let result = validate(&PlannerConfig::default());
        assert!(matches!(
            result,
            Err(PlannerError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn valid_config_passes() {
        let config = PlannerConfig {
            major: Some(PathBuf::from("cs.json")),
            minors: vec![PathBuf::from("math.json")],
            ..Default::default()
        };
        assert!(validate(&config).is_ok());
    }
}
