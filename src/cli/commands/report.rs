//! Progress reports shared by `status` and `export`.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::LoadedProgram;
use crate::error::Result;
use crate::requirements::{
    compute_gpa, CompletionState, CreditsSummary, Evaluator, GpaSummary, ProgramKind,
    ProgramProgress,
};

use super::context::PlannerContext;

/// Progress of one program.
#[derive(Debug, Clone, Serialize)]
pub struct ProgramReport {
    pub name: String,
    pub kind: ProgramKind,
    pub file: PathBuf,
    pub progress: ProgramProgress,
    pub credits: CreditsSummary,
    /// Malformed nodes found while evaluating, already formatted.
    pub anomalies: Vec<String>,
}

impl ProgramReport {
    /// Evaluate one program against the completion state.
    pub fn build(loaded: &LoadedProgram, state: &CompletionState, projected: bool) -> Result<Self> {
        let evaluator = Evaluator::new(&loaded.program, state).projected(projected);
        let progress = evaluator.program_progress()?;
        let credits = evaluator.credits_summary()?;
        let anomalies = evaluator
            .take_anomalies()
            .iter()
            .map(ToString::to_string)
            .collect();

        Ok(Self {
            name: loaded.program.name.clone(),
            kind: loaded.program.kind,
            file: loaded.path.clone(),
            progress,
            credits,
            anomalies,
        })
    }
}

/// Progress of every selected program plus GPA.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub projected: bool,
    pub programs: Vec<ProgramReport>,
    /// Computed over every configured program, not just the selected ones.
    pub gpa: GpaSummary,
}

impl PlanReport {
    /// Build reports for `selected`, which must come from `ctx.programs`.
    pub fn build(ctx: &PlannerContext, selected: &[&LoadedProgram], projected: bool) -> Result<Self> {
        let state = &ctx.store.completion;
        let programs = selected
            .iter()
            .map(|loaded| ProgramReport::build(loaded, state, projected))
            .collect::<Result<Vec<_>>>()?;
        let gpa = compute_gpa(state, &ctx.program_list());

        Ok(Self {
            student: ctx.config.student_name.clone(),
            generated_at: Utc::now(),
            projected,
            programs,
            gpa,
        })
    }
}
