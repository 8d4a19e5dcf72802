//! Status command implementation.
//!
//! The `degreeplan status` command shows progress for every configured
//! program: a category table, the overall category count, credits and GPA.

use std::path::{Path, PathBuf};

use crate::cli::args::StatusArgs;
use crate::config::select_programs;
use crate::error::{PlannerError, Result};
use crate::ui::{format_fraction, format_progress_bar, Table, UserInterface};

use super::context::{report_error, PlannerContext};
use super::dispatcher::{Command, CommandResult};
use super::report::{PlanReport, ProgramReport};

const BAR_WIDTH: usize = 20;

/// The status command implementation.
pub struct StatusCommand {
    project_root: PathBuf,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(project_root: &Path, args: StatusArgs) -> Self {
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
    pub fn args(&self) -> &StatusArgs {
        &self.args
    }

    fn build_report(&self, ctx: &PlannerContext) -> Result<PlanReport> {
        let selected = select_programs(&ctx.programs, self.args.program.as_deref())?;
        PlanReport::build(ctx, &selected, ctx.projected(self.args.projected))
    }

    fn show_program(&self, ui: &mut dyn UserInterface, report: &ProgramReport) {
        ui.show_header(&format!("{} ({})", report.name, report.kind));

        let mut table = Table::new(vec!["Category", "Progress", "Units", "Credits"]);
        for category in &report.progress.categories {
            let credits = match category.min_credits {
                Some(min) => format!("{}/{}", category.completed_credits, min),
                None => category.completed_credits.to_string(),
            };
            table.add_row(vec![
                category.name.clone(),
                format!(
                    "{} {:>3}%",
                    format_progress_bar(category.percentage, BAR_WIDTH),
                    category.percentage
                ),
                format!("{}/{}", category.completed_units, category.total_units),
                credits,
            ]);
        }
        if !table.is_empty() {
            ui.message(&table.render());
        }

        let progress = &report.progress;
        ui.message(&format!(
            "Overall: {} categories complete",
            format_fraction(
                progress.complete_category_count,
                progress.total_category_count,
                progress.overall_percentage
            )
        ));
        ui.message(&format!(
            "Credits: {}/{}",
            report.credits.completed_credits, report.credits.total_credits
        ));

        for anomaly in &report.anomalies {
            ui.warning(anomaly);
        }
        ui.message("");
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = match PlannerContext::load(&self.project_root) {
            Ok(ctx) => ctx,
            Err(e) => return report_error(&self.project_root, e, ui),
        };
        ctx.apply_default_output(ui);

        let report = match self.build_report(&ctx) {
            Ok(report) => report,
            Err(e) => return report_error(&self.project_root, e, ui),
        };

        if self.args.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| PlannerError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        if let Some(name) = &report.student {
            ui.message(&format!("Student: {}", name));
        }
        if report.projected {
            ui.detail("Projected: planned courses count as completed");
        }

        for program in &report.programs {
            self.show_program(ui, program);
        }

        ui.message(&format!(
            "GPA: {} ({} graded credits)",
            report.gpa.display(),
            report.gpa.graded_credits
        ));

        Ok(CommandResult::success())
    }
}
