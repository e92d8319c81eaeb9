//! Input validation for scheduling requests.
//!
//! Checks structural integrity of courses, faculty, and preferences
//! before any domain is built. Detects:
//! - Duplicate IDs
//! - Unknown faculty and course references, in courses, preferences,
//!   and seeded busy entries
//! - Courses with no required faculty
//! - Weekly period counts of zero or not divisible by the block size
//! - Block sizes no break-free run on the grid can hold
//!
//! All detected issues are reported at once so the caller can fix the
//! request in one pass.

use std::collections::HashSet;

use crate::models::{Course, Day, DayPreference, Faculty, TimeGrid};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A course references a faculty member that doesn't exist.
    UnknownFaculty,
    /// A preference references a course that doesn't exist.
    UnknownCourse,
    /// A course declares zero required faculty.
    NoRequiredFaculty,
    /// A course has a weekly period count of zero.
    ZeroWeeklyPeriods,
    /// A weekly period count is not divisible by the block size.
    IndivisibleWeeklyPeriods,
    /// A block size larger than any break-free run on the grid.
    BlockTooLarge,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a scheduling request's input data.
///
/// Checks:
/// 1. No duplicate course IDs
/// 2. No duplicate faculty IDs
/// 3. Every course requires at least one faculty member
/// 4. Every required faculty reference points to a known faculty member
/// 5. Weekly period counts are positive and divisible by the block size
/// 6. Every block size fits some break-free run on the grid
/// 7. Every preference references a known course
/// 8. Every seeded busy entry references a known faculty member
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(
    grid: &TimeGrid,
    courses: &[Course],
    faculty: &[Faculty],
    preferences: &[DayPreference],
    busy_seed: &[(String, Day, u8)],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut faculty_ids = HashSet::new();
    for f in faculty {
        if !faculty_ids.insert(f.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate faculty ID: {}", f.id),
            ));
        }
    }

    let mut course_ids = HashSet::new();
    let max_block = grid.max_block_size();

    for course in courses {
        if !course_ids.insert(course.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", course.id),
            ));
        }

        if course.faculty_ids.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoRequiredFaculty,
                format!("Course '{}' requires no faculty", course.id),
            ));
        }

        for fid in &course.faculty_ids {
            if !faculty_ids.contains(fid.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownFaculty,
                    format!("Course '{}' references unknown faculty '{}'", course.id, fid),
                ));
            }
        }

        let block = course.block_size();
        if course.weekly_periods == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroWeeklyPeriods,
                format!("Course '{}' has zero weekly periods", course.id),
            ));
        } else if block == 0 || course.weekly_periods % block.max(1) != 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::IndivisibleWeeklyPeriods,
                format!(
                    "Course '{}': weekly periods {} not divisible by block size {}",
                    course.id, course.weekly_periods, block
                ),
            ));
        }

        if block > max_block {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlockTooLarge,
                format!(
                    "Course '{}': block size {} exceeds the longest break-free run ({})",
                    course.id, block, max_block
                ),
            ));
        }
    }

    for pref in preferences {
        if !course_ids.contains(pref.course_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCourse,
                format!(
                    "Preference references unknown course '{}'",
                    pref.course_id
                ),
            ));
        }
    }

    for (fid, _, _) in busy_seed {
        if !faculty_ids.contains(fid.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownFaculty,
                format!("Busy seed references unknown faculty '{}'", fid),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
