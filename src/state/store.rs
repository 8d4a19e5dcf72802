//! Persistent completion storage.
//!
//! The [`ProgressStore`] records which courses a student has completed or
//! planned, and their grades. It lives in `.degreeplan/progress.yml` next to
//! the planner config.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::PROJECT_DIR;
use crate::error::{PlannerError, Result};
use crate::requirements::CompletionState;

/// Persistent completion state for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressStore {
    /// Schema version for migration.
    pub version: u32,

    /// When the store was last saved.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Completed and planned courses.
    #[serde(default)]
    pub completion: CompletionState,
}

impl Default for ProgressStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressStore {
    /// Current schema version.
    pub const CURRENT_VERSION: u32 = 1;

    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            updated_at: None,
            completion: CompletionState::new(),
        }
    }

    /// Get the store file path for a project root.
    pub fn store_file(project_root: &Path) -> PathBuf {
        project_root.join(PROJECT_DIR).join("progress.yml")
    }

    /// Load the store from disk, or an empty store if none exists yet.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = Self::store_file(project_root);

        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&path)?;
        let store: Self =
            serde_yaml::from_str(&content).map_err(|e| PlannerError::ConfigParseError {
                path: path.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            completed = store.completion.completed.len(),
            planned = store.completion.planned.len(),
            "Loaded progress store"
        );
        Ok(store)
    }

    /// Save the store to disk using atomic write.
    ///
    /// Writes to a temp file and renames it over the store, so a crash
    /// mid-write never leaves a partial file.
    pub fn save(&mut self, project_root: &Path) -> Result<()> {
        let path = Self::store_file(project_root);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        self.updated_at = Some(Utc::now());
        let content = serde_yaml::to_string(self).map_err(|e| {
            PlannerError::ConfigValidationError {
                message: format!("Failed to serialize progress: {}", e),
            }
        })?;

        let temp_path = path.with_extension("yml.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, &path)?;

        Ok(())
    }
}
