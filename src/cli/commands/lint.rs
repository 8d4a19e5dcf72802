//! Lint command implementation.
//!
//! The `degreeplan lint` command validates every configured program file
//! using the lint rule system.

use std::path::{Path, PathBuf};

use crate::cli::args::LintArgs;
use crate::error::Result;
use crate::lint::{
    HumanFormatter, JsonFormatter, LintDiagnostic, LintFormatter, OutputFormat, RuleRegistry,
    Severity,
};
use crate::ui::{should_use_colors, UserInterface};

use super::context::{report_error, PlannerContext};
use super::dispatcher::{Command, CommandResult};

/// The lint command implementation.
pub struct LintCommand {
    project_root: PathBuf,
    args: LintArgs,
}

impl LintCommand {
    /// Create a new lint command.
    pub fn new(project_root: &Path, args: LintArgs) -> Self {
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
    pub fn args(&self) -> &LintArgs {
        &self.args
    }

    fn output_format(&self) -> OutputFormat {
        match self.args.format.as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Human,
        }
    }

    /// Run all lint rules over every program, tagging each diagnostic with
    /// the file it came from.
    fn run_rules(&self, registry: &RuleRegistry, ctx: &PlannerContext) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();
        for loaded in &ctx.programs {
            let file = loaded
                .path
                .strip_prefix(&self.project_root)
                .unwrap_or(&loaded.path);
            diagnostics.extend(
                registry
                    .check(&loaded.program)
                    .into_iter()
                    .map(|d| d.with_file(file)),
            );
        }
        diagnostics
    }

    /// Format diagnostics using the appropriate formatter.
    fn format_output(&self, diagnostics: &[LintDiagnostic]) -> String {
        let mut output = Vec::new();

        match self.output_format() {
            OutputFormat::Json => {
                JsonFormatter::new().format(diagnostics, &mut output).ok();
            }
            OutputFormat::Human => {
                HumanFormatter::new(should_use_colors())
                    .format(diagnostics, &mut output)
                    .ok();
            }
        }

        String::from_utf8(output).unwrap_or_default()
    }
}

impl Command for LintCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = match PlannerContext::load(&self.project_root) {
            Ok(ctx) => ctx,
            Err(e) => return report_error(&self.project_root, e, ui),
        };
        ctx.apply_default_output(ui);

        let registry = RuleRegistry::with_builtins();
        let diagnostics = self.run_rules(&registry, &ctx);

        let has_errors = diagnostics.iter().any(|d| d.severity == Severity::Error);
        let has_warnings = diagnostics.iter().any(|d| d.severity == Severity::Warning);
        let should_fail = has_errors || (self.args.strict && has_warnings);

        let output = self.format_output(&diagnostics);
        match self.output_format() {
            OutputFormat::Human if diagnostics.is_empty() => {
                ui.success(&format!(
                    "{} program file(s) are valid",
                    ctx.programs.len()
                ));
            }
            OutputFormat::Human => {
                for line in output.lines() {
                    let plain = console::strip_ansi_codes(line);
                    if plain.starts_with("error") {
                        ui.error(line);
                    } else if plain.starts_with("warning") {
                        ui.warning(line);
                    } else {
                        ui.message(line);
                    }
                }
            }
            OutputFormat::Json => ui.message(&output),
        }

        if should_fail {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn setup_project(program: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".degreeplan");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), "major: programs/cs.json\n").unwrap();
        fs::create_dir_all(temp.path().join("programs")).unwrap();
        fs::write(temp.path().join("programs/cs.json"), program).unwrap();
        temp
    }

    fn run(program: &str, args: LintArgs) -> (CommandResult, MockUI) {
        let temp = setup_project(program);
        let cmd = LintCommand::new(temp.path(), args);
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();
        (result, ui)
    }

    const VALID: &str = r#"{
        "name": "Computer Science",
        "total_credits": 120,
        "requirements": [{"name": "Core", "courses": [
            {"courseType": "regular", "code": "CS 1331"}
        ]}]
    }"#;

    #[test]
    fn lint_command_creation() {
        let temp = TempDir::new().unwrap();
        let cmd = LintCommand::new(temp.path(), LintArgs::default());
        assert_eq!(cmd.project_root(), temp.path());
        assert_eq!(cmd.args().format, "human");
    }

    #[test]
    fn lint_no_config() {
        let temp = TempDir::new().unwrap();
        let cmd = LintCommand::new(temp.path(), LintArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn lint_valid_program() {
        let (result, ui) = run(VALID, LintArgs::default());
        assert!(result.success);
        assert!(ui.has_success("1 program file(s) are valid"));
    }

    #[test]
    fn lint_applies_config_default_output() {
        let temp = setup_project(VALID);
        fs::write(
            temp.path().join(".degreeplan/config.yml"),
            "major: programs/cs.json\nsettings:\n  default_output: quiet\n",
        )
        .unwrap();
        let cmd = LintCommand::new(temp.path(), LintArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert_eq!(ui.output_mode(), crate::ui::OutputMode::Quiet);
    }

    #[test]
    fn lint_detects_invalid_selection_count() {
        let program = r#"{
            "name": "CS",
            "total_credits": 120,
            "requirements": [{"name": "Core", "courses": [
                {"courseType": "selection", "selectionCount": 0, "options": [
                    {"courseType": "regular", "code": "CS 1331"}
                ]}
            ]}]
        }"#;
        let (result, ui) = run(program, LintArgs::default());

        assert!(!result.success);
        assert!(ui.has_error("invalid-selection-count"));
        assert!(ui.has_message("programs/cs.json requirements[0].courses[0]"));
    }

    #[test]
    fn lint_detects_circular_reference() {
        let program = r#"{
            "name": "CS",
            "total_credits": 120,
            "requirements": [{"name": "Core", "courses": [
                {"courseType": "group_ref", "ref": "a"}
            ]}],
            "shared_groups": {
                "a": {"courseType": "group_ref", "ref": "b"},
                "b": {"courseType": "group_ref", "ref": "a"}
            }
        }"#;
        let (result, ui) = run(program, LintArgs::default());

        assert!(!result.success);
        assert!(ui.has_error("circular-group-ref"));
    }

    #[test]
    fn lint_warnings_pass_without_strict() {
        let program = r#"{
            "name": "CS",
            "total_credits": 120,
            "requirements": [{"name": "Core", "courses": [
                {"courseType": "or_group", "courses": []}
            ]}]
        }"#;
        let (result, ui) = run(program, LintArgs::default());

        assert!(result.success);
        assert!(ui.has_warning("empty-group"));
    }

    #[test]
    fn lint_strict_mode_fails_on_warnings() {
        let program = r#"{
            "name": "CS",
            "total_credits": 120,
            "requirements": [{"name": "Core", "courses": [
                {"courseType": "or_group", "courses": []}
            ]}]
        }"#;
        let args = LintArgs {
            strict: true,
            ..Default::default()
        };
        let (result, _) = run(program, args);

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn lint_json_format() {
        let args = LintArgs {
            format: "json".to_string(),
            ..Default::default()
        };
        let (result, ui) = run(VALID, args);

        assert!(result.success);
        let json: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(json["summary"]["total"], 0);
    }

    #[test]
    fn lint_unparseable_program() {
        let (result, ui) = run("{ not json", LintArgs::default());

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Failed to load program"));
    }
}
