//! JSON output formatter.
//!
//! Formats lint diagnostics as machine-readable JSON for tooling integration.

use super::LintFormatter;
use crate::lint::{LintDiagnostic, Severity};
use serde::Serialize;
use std::io::Write;

/// Formats lint output as JSON.
pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    diagnostics: Vec<JsonDiagnostic>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonDiagnostic {
    rule_id: String,
    severity: Severity,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<String>,
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    errors: usize,
    warnings: usize,
    hints: usize,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl LintFormatter for JsonFormatter {
    fn format<W: Write>(
        &self,
        diagnostics: &[LintDiagnostic],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let json_diagnostics: Vec<_> = diagnostics
            .iter()
            .map(|d| JsonDiagnostic {
                rule_id: d.rule_id.0.clone(),
                severity: d.severity,
                message: d.message.clone(),
                file: d.file.as_ref().map(|f| f.display().to_string()),
                path: d.path.as_ref().map(|p| p.to_string()),
                suggestion: d.suggestion.clone(),
            })
            .collect();

        let count = |severity: Severity| diagnostics.iter().filter(|d| d.severity == severity).count();
        let summary = JsonSummary {
            total: diagnostics.len(),
            errors: count(Severity::Error),
            warnings: count(Severity::Warning),
            hints: count(Severity::Hint),
        };

        let output = JsonOutput {
            diagnostics: json_diagnostics,
            summary,
        };

        serde_json::to_writer_pretty(writer, &output).map_err(std::io::Error::other)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lint::RuleId;
    use crate::requirements::NodePath;

    fn render(diagnostics: &[LintDiagnostic]) -> serde_json::Value {
        let mut output = Vec::new();
        JsonFormatter::new().format(diagnostics, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn produces_valid_json() {
        let parsed = render(&[LintDiagnostic::new(
            RuleId::new("test"),
            Severity::Error,
            "Error message",
        )]);

        assert!(parsed["diagnostics"].is_array());
        assert_eq!(parsed["diagnostics"][0]["severity"], "error");
        assert_eq!(parsed["summary"]["total"].as_u64().unwrap(), 1);
    }

    #[test]
    fn includes_location_when_present() {
        let parsed = render(&[LintDiagnostic::new(RuleId::new("test"), Severity::Error, "msg")
            .with_file("programs/cs.json")
            .with_path(NodePath::shared("labs"))]);

        assert_eq!(parsed["diagnostics"][0]["file"], "programs/cs.json");
        assert_eq!(parsed["diagnostics"][0]["path"], "shared_groups.labs");
    }

    #[test]
    fn omits_location_when_absent() {
        let parsed = render(&[LintDiagnostic::new(
            RuleId::new("test"),
            Severity::Error,
            "msg",
        )]);

        assert!(parsed["diagnostics"][0]["path"].is_null());
        assert!(parsed["diagnostics"][0]["file"].is_null());
    }

    #[test]
    fn summary_counts_by_severity() {
        let parsed = render(&[
            LintDiagnostic::new(RuleId::new("r1"), Severity::Error, "e1"),
            LintDiagnostic::new(RuleId::new("r2"), Severity::Error, "e2"),
            LintDiagnostic::new(RuleId::new("r3"), Severity::Warning, "w1"),
            LintDiagnostic::new(RuleId::new("r4"), Severity::Hint, "h1"),
        ]);

        assert_eq!(parsed["summary"]["total"], 4);
        assert_eq!(parsed["summary"]["errors"], 2);
        assert_eq!(parsed["summary"]["warnings"], 1);
        assert_eq!(parsed["summary"]["hints"], 1);
    }

    #[test]
    fn empty_input_has_zero_total() {
        let parsed = render(&[]);
        assert_eq!(parsed["summary"]["total"], 0);
    }
}
