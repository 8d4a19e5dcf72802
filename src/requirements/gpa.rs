//! Letter grades and GPA.
//!
//! GPA is the credit-weighted mean of quality points over graded courses.
//! Pass and withdrawal grades carry no quality points and are left out of
//! both sums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::completion::CompletionState;
use super::node::DEFAULT_CREDITS;
use super::program::Program;
use crate::error::PlannerError;

/// A final course grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
    /// Pass in a pass/fail course.
    P,
    /// Withdrawal.
    W,
}

impl Grade {
    /// Quality points on the 4.0 scale, or `None` for P and W.
    pub fn quality_points(self) -> Option<f64> {
        match self {
            Grade::A => Some(4.0),
            Grade::B => Some(3.0),
            Grade::C => Some(2.0),
            Grade::D => Some(1.0),
            Grade::F => Some(0.0),
            Grade::P | Grade::W => None,
        }
    }
}

impl FromStr for Grade {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            "P" => Ok(Grade::P),
            "W" => Ok(Grade::W),
            _ => Err(PlannerError::InvalidGrade {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
            Grade::P => "P",
            Grade::W => "W",
        };
        f.write_str(s)
    }
}

/// Credit-weighted grade summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GpaSummary {
    pub graded_credits: u32,
    pub quality_points: f64,
    /// `None` until at least one graded credit exists.
    pub gpa: Option<f64>,
}

impl GpaSummary {
    /// GPA rounded to two decimals for display.
    pub fn display(&self) -> String {
        match self.gpa {
            Some(gpa) => format!("{:.2}", gpa),
            None => "n/a".to_string(),
        }
    }
}

/// Compute GPA over every graded course in `state`.
///
/// Credits come from the first program that lists the course, falling back
/// to [`DEFAULT_CREDITS`].
pub fn compute_gpa(state: &CompletionState, programs: &[Program]) -> GpaSummary {
    let mut graded_credits = 0u32;
    let mut quality_points = 0.0;

    for (code, grade) in &state.grades {
        let Some(points) = grade.quality_points() else {
            continue;
        };
        let credits = programs
            .iter()
            .find_map(|p| p.course_credits(code))
            .unwrap_or(DEFAULT_CREDITS);
        graded_credits = graded_credits.saturating_add(credits);
        quality_points += points * f64::from(credits);
    }

    let gpa = (graded_credits > 0).then(|| quality_points / f64::from(graded_credits));

    GpaSummary {
        graded_credits,
        quality_points,
        gpa,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::{RequirementCategory, RequirementNode};

    fn program() -> Program {
        Program::new(
            "CS",
            120,
            vec![RequirementCategory::new(
                "Core",
                vec![
                    RequirementNode::course("CS 1331", Some(4)),
                    RequirementNode::course("CS 1332", Some(2)),
                ],
            )],
        )
    }

    #[test]
    fn parses_grades_case_insensitively() {
        assert_eq!("a".parse::<Grade>().unwrap(), Grade::A);
        assert_eq!(" F ".parse::<Grade>().unwrap(), Grade::F);
        assert!("A+".parse::<Grade>().is_err());
    }

    #[test]
    fn pass_and_withdrawal_have_no_points() {
        assert_eq!(Grade::P.quality_points(), None);
        assert_eq!(Grade::W.quality_points(), None);
        assert_eq!(Grade::C.quality_points(), Some(2.0));
    }

    #[test]
    fn gpa_is_credit_weighted() {
        let mut state = CompletionState::new();
        state.set_grade("CS 1331", Grade::A); // 4 credits * 4.0
        state.set_grade("CS 1332", Grade::C); // 2 credits * 2.0
        let summary = compute_gpa(&state, &[program()]);
        assert_eq!(summary.graded_credits, 6);
        assert!((summary.gpa.unwrap() - 20.0 / 6.0).abs() < 1e-9);
        assert_eq!(summary.display(), "3.33");
    }

    #[test]
    fn unknown_courses_use_default_credits() {
        let mut state = CompletionState::new();
        state.set_grade("ART 1000", Grade::B);
        let summary = compute_gpa(&state, &[program()]);
        assert_eq!(summary.graded_credits, DEFAULT_CREDITS);
        assert_eq!(summary.gpa, Some(3.0));
    }

    #[test]
    fn no_graded_credits_means_no_gpa() {
        let mut state = CompletionState::new();
        state.set_grade("CS 1331", Grade::P);
        let summary = compute_gpa(&state, &[program()]);
        assert_eq!(summary.gpa, None);
        assert_eq!(summary.display(), "n/a");
    }
}
