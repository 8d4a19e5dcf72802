//! Configuration and program file discovery and loading.
//!
//! The project layout is:
//!
//! ```text
//! <root>/.degreeplan/config.yml     planner configuration (YAML)
//! <root>/.degreeplan/progress.yml   completion store (YAML)
//! <root>/<program>.json             program files referenced by the config
//! ```

use crate::config::schema::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::requirements::Program;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project directory.
pub const PROJECT_DIR: &str = ".degreeplan";

/// Environment variable that forces projected mode.
pub const PROJECTED_ENV: &str = "DEGREEPLAN_PROJECTED";

/// Paths to the files inside a project directory.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Planner config: .degreeplan/config.yml
    pub config: Option<PathBuf>,

    /// Completion store: .degreeplan/progress.yml (may not exist yet)
    pub progress: PathBuf,
}

impl ConfigPaths {
    /// Discover files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        let dir = project_root.join(PROJECT_DIR);
        let config = dir.join("config.yml");
        Self {
            config: config.exists().then_some(config),
            progress: dir.join("progress.yml"),
        }
    }

    /// Check if a project config exists.
    pub fn has_project_config(&self) -> bool {
        self.config.is_some()
    }
}

/// A program together with the file it was read from.
#[derive(Debug, Clone)]
pub struct LoadedProgram {
    pub path: PathBuf,
    pub program: Program,
}

/// Find the project root by walking up from `start`.
///
/// The root is the first directory containing `.degreeplan/`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(PROJECT_DIR).is_dir() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load `.degreeplan/config.yml` from a project root, with environment
/// overrides applied.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config(project_root: &Path) -> Result<PlannerConfig> {
    let path = project_root.join(PROJECT_DIR).join("config.yml");
    let mut config = load_config_file(&path)?;
    apply_env_overrides(&mut config);
    tracing::debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Load a single config file.
pub fn load_config_file(path: &Path) -> Result<PlannerConfig> {
    let content = read_file(path)?;
    parse_config(&content, path)
}

/// Parse YAML content into a [`PlannerConfig`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_config(content: &str, source_path: &Path) -> Result<PlannerConfig> {
    serde_yaml::from_str(content).map_err(|e| PlannerError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Apply environment variable overrides on top of file config.
pub fn apply_env_overrides(config: &mut PlannerConfig) {
    let value = std::env::var(PROJECTED_ENV).ok();
    if let Some(projected) = parse_bool_override(value.as_deref()) {
        tracing::debug!(projected, "Projected mode overridden from environment");
        config.settings.projected = projected;
    }
}

/// Interpret a boolean override value. Unset or unrecognised values
/// leave the config alone.
pub fn parse_bool_override(value: Option<&str>) -> Option<bool> {
    match value?.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Load a program JSON file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ProgramParseError` if the JSON is invalid.
pub fn load_program(path: &Path) -> Result<Program> {
    let content = read_file(path)?;
    let program: Program =
        serde_json::from_str(&content).map_err(|e| PlannerError::ProgramParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    tracing::debug!(
        path = %path.display(),
        program = %program.name,
        categories = program.requirements.len(),
        "Loaded program"
    );
    Ok(program)
}

/// Load every program the config names, major first.
///
/// Relative paths resolve against the project root.
pub fn load_programs(project_root: &Path, config: &PlannerConfig) -> Result<Vec<LoadedProgram>> {
    config
        .program_paths()
        .into_iter()
        .map(|relative| -> Result<LoadedProgram> {
            let path = project_root.join(relative);
            let program = load_program(&path)?;
            Ok(LoadedProgram { path, program })
        })
        .collect()
}

/// Pick programs by name, or all of them when no name is given.
///
/// Names match case-insensitively.
pub fn select_programs<'a>(
    programs: &'a [LoadedProgram],
    name: Option<&str>,
) -> Result<Vec<&'a LoadedProgram>> {
    let Some(name) = name else {
        return Ok(programs.iter().collect());
    };
    let selected: Vec<_> = programs
        .iter()
        .filter(|p| p.program.name.eq_ignore_ascii_case(name))
        .collect();
    if selected.is_empty() {
        return Err(PlannerError::UnknownProgram {
            name: name.to_string(),
        });
    }
    Ok(selected)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PlannerError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PlannerError::Io(e)
        }
    })
}
