//! Course and occurrence models.
//!
//! The course kind is a tagged variant: the block size is fixed by the
//! tag at construction (1 for theory, the declared contiguous size for
//! labs), so an ill-formed combination like "theory spanning three
//! periods" cannot be represented.
//!
//! A course with `weekly_periods = H` and block size `B` decomposes
//! into `H / B` occurrences; each occurrence is the unit variable the
//! search assigns a slot to. Divisibility is a validation precondition.

use serde::{Deserialize, Serialize};

/// Kind of course, carrying the block-size requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseKind {
    /// Single-period meetings.
    Theory,
    /// Contiguous multi-period meetings of a fixed size.
    Lab {
        /// Consecutive periods required per meeting (at least 2).
        block_size: u8,
    },
}

impl CourseKind {
    /// Periods per occurrence.
    #[inline]
    pub fn block_size(&self) -> u8 {
        match self {
            CourseKind::Theory => 1,
            CourseKind::Lab { block_size } => *block_size,
        }
    }
}

/// A course to be scheduled for a section.
///
/// Every occurrence of the course requires all listed faculty members
/// simultaneously (labs commonly list two).
///
/// # Example
/// ```
/// use timetable_engine::models::Course;
///
/// let lab = Course::lab("C1", 2)
///     .with_code("IT301")
///     .with_name("Machine Learning Lab")
///     .with_weekly_periods(2)
///     .with_faculty("F1")
///     .with_faculty("F2");
///
/// assert_eq!(lab.block_size(), 2);
/// assert_eq!(lab.occurrence_count(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: String,
    /// Course code, e.g. `"IT302"`.
    pub code: String,
    /// Course name.
    pub name: String,
    /// Theory or lab, fixing the block size.
    pub kind: CourseKind,
    /// Total periods per week across all occurrences.
    pub weekly_periods: u8,
    /// Faculty required simultaneously for every occurrence.
    pub faculty_ids: Vec<String>,
}

impl Course {
    /// Creates a theory course (block size 1).
    pub fn theory(id: impl Into<String>) -> Self {
        Self::with_kind(id, CourseKind::Theory)
    }

    /// Creates a lab course with the given contiguous block size.
    pub fn lab(id: impl Into<String>, block_size: u8) -> Self {
        Self::with_kind(id, CourseKind::Lab { block_size })
    }

    fn with_kind(id: impl Into<String>, kind: CourseKind) -> Self {
        let block = kind.block_size();
        Self {
            id: id.into(),
            code: String::new(),
            name: String::new(),
            kind,
            weekly_periods: block,
            faculty_ids: Vec::new(),
        }
    }

    /// Sets the course code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the total weekly period count.
    pub fn with_weekly_periods(mut self, weekly_periods: u8) -> Self {
        self.weekly_periods = weekly_periods;
        self
    }

    /// Adds a required faculty member.
    pub fn with_faculty(mut self, faculty_id: impl Into<String>) -> Self {
        self.faculty_ids.push(faculty_id.into());
        self
    }

    /// Periods per occurrence, fixed by the kind.
    #[inline]
    pub fn block_size(&self) -> u8 {
        self.kind.block_size()
    }

    /// Number of weekly occurrences (`weekly_periods / block_size`).
    ///
    /// Validation guarantees divisibility before any occurrence is
    /// derived; for unvalidated input this truncates.
    #[inline]
    pub fn occurrence_count(&self) -> u8 {
        self.weekly_periods / self.block_size().max(1)
    }
}

/// One meeting instance of a course — the atomic search variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occurrence {
    /// Index of the course in the request's course list.
    pub course: usize,
    /// Ordinal of this occurrence within the course (0-based).
    pub index: u8,
}

impl Occurrence {
    /// Creates an occurrence reference.
    pub fn new(course: usize, index: u8) -> Self {
        Self { course, index }
    }
}
