//! Init command implementation.
//!
//! The `degreeplan init` command writes `.degreeplan/config.yml` naming the
//! major and minor program files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::InitArgs;
use crate::config::{load_program, PlannerConfig, PROJECT_DIR};
use crate::error::{PlannerError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The init command implementation.
pub struct InitCommand {
    project_root: PathBuf,
    args: InitArgs,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(project_root: &Path, args: InitArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &InitArgs {
        &self.args
    }

    fn config_path(&self) -> PathBuf {
        self.project_root.join(PROJECT_DIR).join("config.yml")
    }

    /// Build config file content from the arguments.
    fn create_config(&self) -> Result<String> {
        let config = PlannerConfig {
            student_name: self.args.name.clone(),
            major: Some(self.args.major.clone()),
            minors: self.args.minors.clone(),
            ..Default::default()
        };
        let body = serde_yaml::to_string(&config).map_err(|e| PlannerError::Other(e.into()))?;

        Ok(format!(
            "# degreeplan configuration\n\
             #\n\
             # Program paths are relative to this project's root.\n\
             # settings.default_output: normal | verbose | quiet | silent\n\
             # settings.projected: count planned courses as completed\n\
             \n\
             {body}"
        ))
    }

    /// Check that each program file loads, warning about the ones that don't.
    fn check_programs(&self, ui: &mut dyn UserInterface) {
        let paths = std::iter::once(&self.args.major).chain(self.args.minors.iter());
        for relative in paths {
            match load_program(&self.project_root.join(relative)) {
                Ok(program) => ui.message(&format!(
                    "  {} ({}) from {}",
                    program.name,
                    program.kind,
                    relative.display()
                )),
                Err(e) => ui.warning(&e.to_string()),
            }
        }
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config_path = self.config_path();
        if config_path.exists() && !self.args.force {
            ui.warning("Configuration already exists. Use --force to overwrite.");
            return Ok(CommandResult::failure(1));
        }

        ui.show_header("Degree Plan Setup");
        self.check_programs(ui);

        let config = self.create_config()?;
        fs::create_dir_all(self.project_root.join(PROJECT_DIR))?;
        fs::write(&config_path, config)?;
        tracing::debug!(path = %config_path.display(), "Wrote config");

        ui.success("Created .degreeplan/config.yml");
        ui.message("\nNext steps:");
        ui.message("  1. Run `degreeplan lint` to check your program files");
        ui.message("  2. Run `degreeplan mark <CODE>` for each course you have completed");

        Ok(CommandResult::success())
    }
}
