//! Progress aggregation over categories and programs.
//!
//! Progress is counted in *units*, not credits. Every top-level node of a
//! category is one unit, except that an AND-group counts one unit per child
//! and a selection group counts `selection_count` units. OR-groups stay a
//! single all-or-nothing unit. References are resolved before counting.
//!
//! Program progress counts complete categories; it is a separate, coarser
//! figure than any category percentage and is reported alongside them.

use serde::Serialize;

use super::evaluator::Evaluator;
use super::node::{NodeKind, RequirementNode};
use super::program::RequirementCategory;
use crate::error::Result;

/// Units contributed by one top-level node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NodeProgress {
    pub completed_units: u32,
    pub total_units: u32,
}

/// Progress of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryProgress {
    pub name: String,
    pub completed_units: u32,
    pub total_units: u32,
    pub percentage: u32,
    /// Credits of satisfied leaves inside this category.
    pub completed_credits: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_credits: Option<u32>,
}

impl CategoryProgress {
    /// A category is complete at 100%.
    pub fn is_complete(&self) -> bool {
        self.percentage >= 100
    }
}

/// Progress of a whole program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramProgress {
    pub complete_category_count: u32,
    pub total_category_count: u32,
    /// Share of complete categories, not a unit or credit average.
    pub overall_percentage: u32,
    pub categories: Vec<CategoryProgress>,
}

/// Completed credits against the program's published total.
///
/// The two numbers come from different sources (the tree and the program
/// record) and are never reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreditsSummary {
    pub completed_credits: u32,
    pub total_credits: u32,
}

/// `round(100 * completed / total)`, or 0 when `total` is 0. Halves round up.
pub fn round_percentage(completed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * f64::from(completed) / f64::from(total)).round() as u32
}

fn saturate(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

impl Evaluator<'_> {
    /// Units contributed by a top-level node.
    pub fn node_progress(&self, node: &RequirementNode) -> Result<NodeProgress> {
        self.units(node, &mut Vec::new())
    }

    /// Progress of one category.
    pub fn category_progress(&self, category: &RequirementCategory) -> Result<CategoryProgress> {
        let mut completed_units: u32 = 0;
        let mut total_units: u32 = 0;
        let mut completed_credits: u32 = 0;

        for node in &category.courses {
            let units = self.node_progress(node)?;
            completed_units = completed_units.saturating_add(units.completed_units);
            total_units = total_units.saturating_add(units.total_units);
            completed_credits =
                completed_credits.saturating_add(self.satisfied_credits(node, &mut Vec::new())?);
        }

        Ok(CategoryProgress {
            name: category.name.clone(),
            completed_units,
            total_units,
            percentage: round_percentage(completed_units, total_units),
            completed_credits,
            min_credits: category.min_credits,
        })
    }

    /// Progress of the evaluator's program.
    pub fn program_progress(&self) -> Result<ProgramProgress> {
        tracing::debug!(program = %self.program.name, projected = self.is_projected(), "Evaluating program progress");

        let categories = self
            .program
            .requirements
            .iter()
            .map(|c| self.category_progress(c))
            .collect::<Result<Vec<_>>>()?;

        let complete = saturate(categories.iter().filter(|c| c.is_complete()).count());
        let total = saturate(categories.len());

        Ok(ProgramProgress {
            complete_category_count: complete,
            total_category_count: total,
            overall_percentage: round_percentage(complete, total),
            categories,
        })
    }

    /// Completed credits across the program, against its published total.
    pub fn credits_summary(&self) -> Result<CreditsSummary> {
        let mut completed_credits: u32 = 0;
        for category in &self.program.requirements {
            for node in &category.courses {
                completed_credits =
                    completed_credits.saturating_add(self.satisfied_credits(node, &mut Vec::new())?);
            }
        }

        Ok(CreditsSummary {
            completed_credits,
            total_credits: self.program.total_credits,
        })
    }

    fn units(&self, node: &RequirementNode, stack: &mut Vec<String>) -> Result<NodeProgress> {
        match &node.kind {
            NodeKind::AndGroup { children } => Ok(NodeProgress {
                completed_units: saturate(self.count_satisfied(children, stack)?),
                total_units: saturate(children.len()),
            }),
            NodeKind::Selection {
                selection_count,
                options,
            } => {
                let satisfied = self.count_satisfied(options, stack)?;
                if !self.selection_is_valid(node, *selection_count, options) {
                    // Still one visible, never-complete unit.
                    return Ok(NodeProgress {
                        completed_units: 0,
                        total_units: 1,
                    });
                }
                let required = u32::try_from(*selection_count).unwrap_or(u32::MAX);
                Ok(NodeProgress {
                    completed_units: saturate(satisfied).min(required),
                    total_units: required,
                })
            }
            NodeKind::Reference { name } => match self.enter(name, node, stack)? {
                Some(target) => {
                    let result = self.units(target, stack);
                    stack.pop();
                    result
                }
                None => Ok(NodeProgress {
                    completed_units: 0,
                    total_units: 1,
                }),
            },
            _ => Ok(NodeProgress {
                completed_units: u32::from(self.satisfied(node, stack)?),
                total_units: 1,
            }),
        }
    }

    /// Sum of credits of every satisfied leaf under `node`.
    fn satisfied_credits(&self, node: &RequirementNode, stack: &mut Vec<String>) -> Result<u32> {
        match &node.kind {
            NodeKind::Regular(_) | NodeKind::Flexible(_) => {
                if self.satisfied(node, stack)? {
                    Ok(node.leaf_credits().unwrap_or(0))
                } else {
                    Ok(0)
                }
            }
            NodeKind::AndGroup { children } | NodeKind::OrGroup { children } => {
                self.sum_credits(children, stack)
            }
            NodeKind::Selection { options, .. } => self.sum_credits(options, stack),
            NodeKind::Reference { name } => match self.enter(name, node, stack)? {
                Some(target) => {
                    let result = self.satisfied_credits(target, stack);
                    stack.pop();
                    result
                }
                None => Ok(0),
            },
            NodeKind::Unknown { .. } => Ok(0),
        }
    }

    fn sum_credits(&self, nodes: &[RequirementNode], stack: &mut Vec<String>) -> Result<u32> {
        let mut total: u32 = 0;
        for node in nodes {
            total = total.saturating_add(self.satisfied_credits(node, stack)?);
        }
        Ok(total)
    }
}
