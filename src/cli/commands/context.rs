//! Shared loading for commands that read planner state.
//!
//! Every reporting or mutating command needs the same three things: the
//! validated config, the programs it names, and the saved completion store.

use std::path::{Path, PathBuf};

use crate::config::{load_config, load_programs, validate, LoadedProgram, PlannerConfig};
use crate::config::{ConfigPaths, PROJECT_DIR};
use crate::error::{PlannerError, Result};
use crate::requirements::Program;
use crate::state::ProgressStore;
use crate::ui::{OutputMode, UserInterface};

use super::dispatcher::CommandResult;

/// Config, programs and completion state for one command invocation.
#[derive(Debug)]
pub struct PlannerContext {
    pub root: PathBuf,
    pub config: PlannerConfig,
    pub programs: Vec<LoadedProgram>,
    pub store: ProgressStore,
}

impl PlannerContext {
    /// Load everything for the project at `root`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if there is no `.degreeplan/config.yml` or a
    /// program file it names is missing, and parse or validation errors for
    /// malformed files.
    pub fn load(root: &Path) -> Result<Self> {
        let paths = ConfigPaths::discover(root);
        if !paths.has_project_config() {
            return Err(PlannerError::ConfigNotFound {
                path: config_path(root),
            });
        }

        let config = load_config(root)?;
        validate(&config)?;
        let programs = load_programs(root, &config)?;
        let store = ProgressStore::load(root)?;

        tracing::debug!(
            root = %root.display(),
            programs = programs.len(),
            completed = store.completion.completed.len(),
            planned = store.completion.planned.len(),
            "Loaded planner context"
        );

        Ok(Self {
            root: root.to_path_buf(),
            config,
            programs,
            store,
        })
    }

    /// Whether planned courses count, from the flag or the config default.
    pub fn projected(&self, flag: bool) -> bool {
        flag || self.config.settings.projected
    }

    /// Apply config default_output when no CLI flag was explicitly set.
    pub fn apply_default_output(&self, ui: &mut dyn UserInterface) {
        if ui.output_mode() == OutputMode::Normal {
            ui.set_output_mode(self.config.settings.default_output.into());
        }
    }

    /// Owned copies of every loaded program, major first.
    pub fn program_list(&self) -> Vec<Program> {
        self.programs.iter().map(|p| p.program.clone()).collect()
    }

    /// Whether any configured program has a leaf keyed by `key`.
    pub fn is_known_key(&self, key: &str) -> bool {
        self.programs
            .iter()
            .any(|p| p.program.leaf_keys().iter().any(|k| k == key))
    }

    /// Persist the completion store.
    pub fn save(&mut self) -> Result<()> {
        self.store.save(&self.root)
    }
}

/// Report a domain error to the user and pick the exit code.
///
/// A missing project config exits with 2; other user-facing failures exit
/// with 1. IO and unexpected errors are propagated.
pub fn report_error(
    project_root: &Path,
    err: PlannerError,
    ui: &mut dyn UserInterface,
) -> Result<CommandResult> {
    match err {
        PlannerError::ConfigNotFound { path } if path == config_path(project_root) => {
            ui.error("No configuration found. Run 'degreeplan init' first.");
            Ok(CommandResult::failure(2))
        }
        PlannerError::ConfigNotFound { path } => {
            ui.error(&format!("Program file not found: {}", path.display()));
            Ok(CommandResult::failure(1))
        }
        PlannerError::ConfigParseError { path, message } => {
            ui.error(&format!("Parse error in {}: {}", path.display(), message));
            Ok(CommandResult::failure(1))
        }
        e @ (PlannerError::ConfigValidationError { .. }
        | PlannerError::ProgramParseError { .. }
        | PlannerError::CyclicRequirement { .. }
        | PlannerError::UnknownProgram { .. }
        | PlannerError::InvalidGrade { .. }) => {
            ui.error(&e.to_string());
            Ok(CommandResult::failure(1))
        }
        e => Err(e),
    }
}

fn config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_DIR).join("config.yml")
}
