//! Completion state supplied to the evaluator.
//!
//! The evaluator only needs membership tests, expressed by the
//! [`CompletionSource`] trait. [`CompletionState`] is the concrete store the
//! CLI persists; plain string sets work too.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::gpa::Grade;

/// Read-only view of which requirements a student has completed or planned.
///
/// Keys are the strings produced by
/// [`CompletionKey::as_str`](super::CompletionKey::as_str): course codes, or
/// the literal text of a text-only flexible requirement.
pub trait CompletionSource {
    /// Whether the key is recorded as completed.
    fn is_completed(&self, key: &str) -> bool;

    /// Whether the key is recorded as planned.
    fn is_planned(&self, _key: &str) -> bool {
        false
    }
}

impl CompletionSource for HashSet<String> {
    fn is_completed(&self, key: &str) -> bool {
        self.contains(key)
    }
}

impl CompletionSource for BTreeSet<String> {
    fn is_completed(&self, key: &str) -> bool {
        self.contains(key)
    }
}

/// Completed and planned requirements, plus grades for completed courses.
///
/// Completed and planned are disjoint in intent but this type does not
/// enforce it: marking a planned course completed leaves it planned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionState {
    pub completed: BTreeSet<String>,
    pub planned: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub grades: BTreeMap<String, Grade>,
}

impl CompletionState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a state with the given completed keys.
    pub fn with_completed<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            completed: keys.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Record a key as completed. Returns `true` if it was not already.
    pub fn mark_completed(&mut self, key: impl Into<String>) -> bool {
        self.completed.insert(key.into())
    }

    /// Record a key as planned. Returns `true` if it was not already.
    pub fn mark_planned(&mut self, key: impl Into<String>) -> bool {
        self.planned.insert(key.into())
    }

    /// Remove a completion and any grade recorded for it.
    pub fn unmark_completed(&mut self, key: &str) -> bool {
        self.grades.remove(key);
        self.completed.remove(key)
    }

    /// Remove a plan.
    pub fn unmark_planned(&mut self, key: &str) -> bool {
        self.planned.remove(key)
    }

    /// Flip completion of a key. Returns the new membership.
    pub fn toggle_completed(&mut self, key: &str) -> bool {
        if self.unmark_completed(key) {
            false
        } else {
            self.completed.insert(key.to_string());
            true
        }
    }

    /// Flip the plan for a key. Returns the new membership.
    pub fn toggle_planned(&mut self, key: &str) -> bool {
        if self.planned.remove(key) {
            false
        } else {
            self.planned.insert(key.to_string());
            true
        }
    }

    /// Record a grade. The course is marked completed as well.
    pub fn set_grade(&mut self, key: impl Into<String>, grade: Grade) {
        let key = key.into();
        self.completed.insert(key.clone());
        self.grades.insert(key, grade);
    }

    /// Grade recorded for a key, if any.
    pub fn grade(&self, key: &str) -> Option<Grade> {
        self.grades.get(key).copied()
    }
}

impl CompletionSource for CompletionState {
    fn is_completed(&self, key: &str) -> bool {
        self.completed.contains(key)
    }

    fn is_planned(&self, key: &str) -> bool {
        self.planned.contains(key)
    }
}
