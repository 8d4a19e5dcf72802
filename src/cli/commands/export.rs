//! Export command implementation.
//!
//! The `degreeplan export` command writes a progress report for every
//! configured program as JSON or CSV.

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::args::ExportArgs;
use crate::error::{PlannerError, Result};
use crate::ui::UserInterface;

use super::context::{report_error, PlannerContext};
use super::dispatcher::{Command, CommandResult};
use super::report::PlanReport;

const CSV_HEADER: &str =
    "program,kind,category,completed_units,total_units,percentage,completed_credits,min_credits";

/// The export command implementation.
pub struct ExportCommand {
    project_root: PathBuf,
    args: ExportArgs,
}

impl ExportCommand {
    /// Create a new export command.
    pub fn new(project_root: &Path, args: ExportArgs) -> Self {
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
    pub fn args(&self) -> &ExportArgs {
        &self.args
    }

    fn render(&self, report: &PlanReport) -> Result<String> {
        match self.args.format.as_str() {
            "csv" => Ok(to_csv(report)),
            _ => serde_json::to_string_pretty(report).map_err(|e| PlannerError::Other(e.into())),
        }
    }
}

impl Command for ExportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = match PlannerContext::load(&self.project_root) {
            Ok(ctx) => ctx,
            Err(e) => return report_error(&self.project_root, e, ui),
        };
        ctx.apply_default_output(ui);

        let selected: Vec<_> = ctx.programs.iter().collect();
        let report = match PlanReport::build(&ctx, &selected, ctx.projected(self.args.projected)) {
            Ok(report) => report,
            Err(e) => return report_error(&self.project_root, e, ui),
        };
        for program in &report.programs {
            for anomaly in &program.anomalies {
                ui.warning(&format!("{}: {}", program.name, anomaly));
            }
        }

        let content = self.render(&report)?;
        match &self.args.output {
            Some(path) => {
                let path = self.project_root.join(path);
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, content)?;
                tracing::debug!(path = %path.display(), format = %self.args.format, "Exported report");
                ui.success(&format!("Exported report to {}", path.display()));
            }
            None => ui.message(content.trim_end()),
        }

        Ok(CommandResult::success())
    }
}

/// One row per category, with a header line.
fn to_csv(report: &PlanReport) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');

    for program in &report.programs {
        for category in &program.progress.categories {
            let fields = [
                csv_field(&program.name),
                program.kind.to_string(),
                csv_field(&category.name),
                category.completed_units.to_string(),
                category.total_units.to_string(),
                category.percentage.to_string(),
                category.completed_credits.to_string(),
                category.min_credits.map(|c| c.to_string()).unwrap_or_default(),
            ];
            out.push_str(&fields.join(","));
            out.push('\n');
        }
    }

    out
}

/// Quote a field when it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
