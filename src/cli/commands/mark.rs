//! Mark, unmark and toggle command implementations.
//!
//! These commands edit the saved completion store. Input is matched against
//! the keys the configured programs list, as typed first and then normalized,
//! so `cs1331` records `CS 1331` when that is how the program spells it.

use std::path::{Path, PathBuf};

use crate::cli::args::{MarkArgs, UnmarkArgs};
use crate::error::Result;
use crate::requirements::{is_course_code, normalize_course_code, CompletionSource, Grade};
use crate::ui::UserInterface;

use super::context::{report_error, PlannerContext};
use super::dispatcher::{Command, CommandResult};

/// Map typed input onto a key some program lists.
///
/// The input as typed wins over its normalized form, so programs that store
/// `CS1331` or codes in mixed case stay markable. Unlisted input is kept as
/// typed.
fn resolve_key(ctx: &PlannerContext, code: &str) -> Option<String> {
    let raw = code.trim();
    if ctx.is_known_key(raw) {
        return Some(raw.to_string());
    }
    let normalized = normalize_course_code(raw);
    ctx.is_known_key(&normalized).then_some(normalized)
}

/// Resolve typed codes, warning about keys no program lists.
fn resolve_keys(ctx: &PlannerContext, codes: &[String], ui: &mut dyn UserInterface) -> Vec<String> {
    codes
        .iter()
        .map(|code| {
            resolve_key(ctx, code).unwrap_or_else(|| {
                let key = code.trim().to_string();
                ui.warning(&format!("'{}' is not listed in any configured program", key));
                if !is_course_code(&key) {
                    ui.show_hint("Flexible requirements are matched by their exact text");
                }
                key
            })
        })
        .collect()
}

/// Find the stored key an unmark refers to: whichever spelling is recorded,
/// then whichever a program lists.
fn stored_key(ctx: &PlannerContext, code: &str, planned: bool) -> String {
    let raw = code.trim();
    let normalized = normalize_course_code(raw);
    let completion = &ctx.store.completion;
    let recorded = |key: &str| {
        if planned {
            completion.is_planned(key)
        } else {
            completion.is_completed(key)
        }
    };

    let key = [raw, normalized.as_str()]
        .into_iter()
        .find(|key| recorded(key))
        .map(str::to_string)
        .or_else(|| resolve_key(ctx, raw))
        .unwrap_or_else(|| raw.to_string());
    key
}

fn save(ctx: &mut PlannerContext, ui: &mut dyn UserInterface) -> Result<CommandResult> {
    match ctx.save() {
        Ok(()) => Ok(CommandResult::success()),
        Err(e) => report_error(&ctx.root, e, ui),
    }
}

/// The mark command implementation.
pub struct MarkCommand {
    project_root: PathBuf,
    args: MarkArgs,
}

impl MarkCommand {
    /// Create a new mark command.
    pub fn new(project_root: &Path, args: MarkArgs) -> Self {
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
    pub fn args(&self) -> &MarkArgs {
        &self.args
    }
}

impl Command for MarkCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let grade = match self.args.grade.as_deref().map(str::parse::<Grade>).transpose() {
            Ok(grade) => grade,
            Err(e) => return report_error(&self.project_root, e, ui),
        };

        let mut ctx = match PlannerContext::load(&self.project_root) {
            Ok(ctx) => ctx,
            Err(e) => return report_error(&self.project_root, e, ui),
        };
        ctx.apply_default_output(ui);

        for key in resolve_keys(&ctx, &self.args.codes, ui) {
            let completion = &mut ctx.store.completion;
            if self.args.planned {
                if completion.mark_planned(key.clone()) {
                    ui.success(&format!("Planned {}", key));
                } else {
                    ui.message(&format!("{} is already planned", key));
                }
                continue;
            }

            let newly = completion.mark_completed(key.clone());
            // A completed course is no longer a plan.
            completion.unmark_planned(&key);
            match grade {
                Some(grade) => {
                    completion.set_grade(key.clone(), grade);
                    ui.success(&format!("Completed {} (grade {})", key, grade));
                }
                None if newly => ui.success(&format!("Completed {}", key)),
                None => ui.message(&format!("{} is already completed", key)),
            }
        }

        save(&mut ctx, ui)
    }
}

/// The unmark command implementation.
pub struct UnmarkCommand {
    project_root: PathBuf,
    args: UnmarkArgs,
}

impl UnmarkCommand {
    /// Create a new unmark command.
    pub fn new(project_root: &Path, args: UnmarkArgs) -> Self {
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
    pub fn args(&self) -> &UnmarkArgs {
        &self.args
    }
}

impl Command for UnmarkCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut ctx = match PlannerContext::load(&self.project_root) {
            Ok(ctx) => ctx,
            Err(e) => return report_error(&self.project_root, e, ui),
        };
        ctx.apply_default_output(ui);

        for code in &self.args.codes {
            let key = stored_key(&ctx, code, self.args.planned);
            let completion = &mut ctx.store.completion;
            let (removed, what) = if self.args.planned {
                (completion.unmark_planned(&key), "planned")
            } else {
                (completion.unmark_completed(&key), "completed")
            };
            if removed {
                ui.success(&format!("{} is no longer {}", key, what));
            } else {
                ui.message(&format!("{} was not {}", key, what));
            }
        }

        save(&mut ctx, ui)
    }
}

/// The toggle command implementation.
pub struct ToggleCommand {
    project_root: PathBuf,
    args: UnmarkArgs,
}

impl ToggleCommand {
    /// Create a new toggle command.
    pub fn new(project_root: &Path, args: UnmarkArgs) -> Self {
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
    pub fn args(&self) -> &UnmarkArgs {
        &self.args
    }
}

impl Command for ToggleCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut ctx = match PlannerContext::load(&self.project_root) {
            Ok(ctx) => ctx,
            Err(e) => return report_error(&self.project_root, e, ui),
        };
        ctx.apply_default_output(ui);

        for key in resolve_keys(&ctx, &self.args.codes, ui) {
            let completion = &mut ctx.store.completion;
            let (now_set, what) = if self.args.planned {
                (completion.toggle_planned(&key), "planned")
            } else {
                (completion.toggle_completed(&key), "completed")
            };
            if now_set {
                ui.success(&format!("{} is now {}", key, what));
            } else {
                ui.success(&format!("{} is no longer {}", key, what));
            }
        }

        save(&mut ctx, ui)
    }
}
