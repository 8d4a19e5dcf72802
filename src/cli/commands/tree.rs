//! Tree command implementation.
//!
//! The `degreeplan tree` command prints each program's requirement tree with
//! a completion marker per node. Shared groups are expanded where they are
//! referenced.

use std::path::{Path, PathBuf};

use crate::cli::args::TreeArgs;
use crate::config::select_programs;
use crate::error::{PlannerError, Result};
use crate::requirements::{CompletionState, Evaluator, NodeKind, Program, RequirementNode};
use crate::ui::UserInterface;

use super::context::{report_error, PlannerContext};
use super::dispatcher::{Command, CommandResult};

const SATISFIED: &str = "✓";
const PLANNED: &str = "◐";
const REMAINING: &str = "○";

/// The tree command implementation.
pub struct TreeCommand {
    project_root: PathBuf,
    args: TreeArgs,
}

impl TreeCommand {
    /// Create a new tree command.
    pub fn new(project_root: &Path, args: TreeArgs) -> Self {
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
    pub fn args(&self) -> &TreeArgs {
        &self.args
    }

    fn render_all(&self, ctx: &PlannerContext) -> Result<Vec<(String, Vec<String>)>> {
        let projected = ctx.projected(self.args.projected);
        select_programs(&ctx.programs, self.args.program.as_deref())?
            .into_iter()
            .map(|loaded| -> Result<(String, Vec<String>)> {
                let renderer = TreeRenderer::new(&loaded.program, &ctx.store.completion, projected);
                Ok((loaded.program.name.clone(), renderer.render()?))
            })
            .collect()
    }
}

impl Command for TreeCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = match PlannerContext::load(&self.project_root) {
            Ok(ctx) => ctx,
            Err(e) => return report_error(&self.project_root, e, ui),
        };
        ctx.apply_default_output(ui);

        let trees = match self.render_all(&ctx) {
            Ok(trees) => trees,
            Err(e) => return report_error(&self.project_root, e, ui),
        };

        for (name, lines) in trees {
            ui.show_header(&name);
            for line in lines {
                ui.message(&line);
            }
            ui.message("");
        }
        ui.show_hint(&format!(
            "{} satisfied  {} planned  {} remaining",
            SATISFIED, PLANNED, REMAINING
        ));

        Ok(CommandResult::success())
    }
}

/// Renders one program's requirement tree as indented lines.
struct TreeRenderer<'a> {
    program: &'a Program,
    state: &'a CompletionState,
    evaluator: Evaluator<'a>,
}

impl<'a> TreeRenderer<'a> {
    fn new(program: &'a Program, state: &'a CompletionState, projected: bool) -> Self {
        Self {
            program,
            state,
            evaluator: Evaluator::new(program, state).projected(projected),
        }
    }

    fn render(&self) -> Result<Vec<String>> {
        let program = self.program;
        let mut lines = Vec::new();

        for category in &program.requirements {
            let progress = self.evaluator.category_progress(category)?;
            let marker = if progress.is_complete() {
                SATISFIED
            } else {
                REMAINING
            };
            lines.push(format!(
                "{} {} ({}%)",
                marker, category.name, progress.percentage
            ));
            for node in &category.courses {
                self.render_node(node, 1, &mut Vec::new(), &mut lines)?;
            }
        }

        let footnotes: Vec<_> = program
            .footnotes
            .iter()
            .filter(|f| self.footnote_used(f.number))
            .collect();
        if !footnotes.is_empty() {
            lines.push(String::new());
            for footnote in footnotes {
                lines.push(format!("[{}] {}", footnote.number, footnote.text));
            }
        }

        Ok(lines)
    }

    fn render_node(
        &self,
        node: &'a RequirementNode,
        depth: usize,
        refs: &mut Vec<&'a str>,
        lines: &mut Vec<String>,
    ) -> Result<()> {
        let indent = "  ".repeat(depth);
        let marker = self.marker(node)?;
        let notes = self.footnote_marks(node);

        match &node.kind {
            NodeKind::Regular(_) | NodeKind::Flexible(_) => {
                let credits = node.leaf_credits().unwrap_or(0);
                lines.push(format!(
                    "{}{} {} ({} cr){}",
                    indent,
                    marker,
                    node.label(),
                    credits,
                    notes
                ));
            }
            NodeKind::AndGroup { children } | NodeKind::OrGroup { children } => {
                let title = if matches!(node.kind, NodeKind::AndGroup { .. }) {
                    "All of"
                } else {
                    "One of"
                };
                lines.push(format!("{}{} {}:{}", indent, marker, title, notes));
                for child in children {
                    self.render_node(child, depth + 1, refs, lines)?;
                }
            }
            NodeKind::Selection {
                selection_count,
                options,
            } => {
                let progress = self.evaluator.node_progress(node)?;
                lines.push(format!(
                    "{}{} Choose {} ({}/{}):{}",
                    indent,
                    marker,
                    selection_count,
                    progress.completed_units,
                    progress.total_units,
                    notes
                ));
                for option in options {
                    self.render_node(option, depth + 1, refs, lines)?;
                }
            }
            NodeKind::Reference { name } => {
                if let Some(pos) = refs.iter().position(|r| *r == name.as_str()) {
                    let mut cycle: Vec<&str> = refs[pos..].to_vec();
                    cycle.push(name);
                    return Err(PlannerError::CyclicRequirement {
                        cycle: cycle.join(" -> "),
                    });
                }
                match self.program.shared_group(name) {
                    Some(target) => {
                        lines.push(format!("{}{} {}:{}", indent, marker, name, notes));
                        refs.push(name);
                        self.render_node(target, depth + 1, refs, lines)?;
                        refs.pop();
                    }
                    None => lines.push(format!(
                        "{}{} {} (undefined){}",
                        indent, marker, name, notes
                    )),
                }
            }
            NodeKind::Unknown { .. } => {
                lines.push(format!("{}{} {}{}", indent, marker, node.label(), notes));
            }
        }

        Ok(())
    }

    fn marker(&self, node: &RequirementNode) -> Result<&'static str> {
        if self.evaluator.is_satisfied(node)? {
            return Ok(SATISFIED);
        }
        let planned = node
            .completion_key()
            .is_some_and(|key| self.state.planned.contains(key.as_str()));
        Ok(if planned { PLANNED } else { REMAINING })
    }

    fn footnote_marks(&self, node: &RequirementNode) -> String {
        node.footnote_refs
            .iter()
            .map(|n| format!(" [{}]", n))
            .collect()
    }

    fn footnote_used(&self, number: u32) -> bool {
        let mut used = false;
        self.program.walk(&mut |_, node| {
            if node.footnote_refs.contains(&number) {
                used = true;
            }
        });
        used
    }
}
