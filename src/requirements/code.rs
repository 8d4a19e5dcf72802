//! Course code normalization for user input.
//!
//! Stored programs write codes as `SUBJ 1234`. Users type `subj1234`,
//! `Subj  1234` and so on; this module maps those forms onto the stored one.
//! The evaluator itself compares codes exactly.

use std::sync::LazyLock;

use regex::Regex;

/// Subject letters, optional whitespace or dash, catalog number with an
/// optional letter suffix.
static COURSE_CODE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z]{2,5})[\s-]*(\d{3,4}[A-Za-z]?)\s*$")
        .expect("COURSE_CODE_REGEX must compile")
});

/// Normalize a typed course code to `SUBJ 1234` form.
///
/// Input that does not look like a course code (for example the text of a
/// flexible requirement) is returned trimmed but otherwise unchanged.
///
/// ```
/// use degreeplan::requirements::normalize_course_code;
///
/// assert_eq!(normalize_course_code("cs1331"), "CS 1331");
/// assert_eq!(normalize_course_code("Free elective"), "Free elective");
/// ```
pub fn normalize_course_code(input: &str) -> String {
    match COURSE_CODE_REGEX.captures(input) {
        Some(caps) => format!("{} {}", caps[1].to_uppercase(), caps[2].to_uppercase()),
        None => input.trim().to_string(),
    }
}

/// Whether the input looks like a course code rather than free text.
pub fn is_course_code(input: &str) -> bool {
    COURSE_CODE_REGEX.is_match(input)
}
