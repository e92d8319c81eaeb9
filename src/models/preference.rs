//! Day preference records.
//!
//! A preference names the days a course's section would like its
//! meetings on. Hard preferences prune the slot domain (non-preferred
//! days become illegal); soft preferences only bias value ordering and
//! are never allowed to cause infeasibility.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Day;

/// Preferred days for one course within a section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPreference {
    /// The course this preference applies to.
    pub course_id: String,
    /// Preferred days. An empty set means no preference declared.
    pub days: BTreeSet<Day>,
    /// Whether the preference is a hard constraint.
    pub hard: bool,
}

impl DayPreference {
    /// Creates a soft preference (value ordering only).
    pub fn soft(course_id: impl Into<String>, days: impl IntoIterator<Item = Day>) -> Self {
        Self {
            course_id: course_id.into(),
            days: days.into_iter().collect(),
            hard: false,
        }
    }

    /// Creates a hard preference (non-preferred days are pruned from
    /// the domain).
    pub fn hard(course_id: impl Into<String>, days: impl IntoIterator<Item = Day>) -> Self {
        Self {
            hard: true,
            ..Self::soft(course_id, days)
        }
    }

    /// Whether any preferred day is declared.
    pub fn is_declared(&self) -> bool {
        !self.days.is_empty()
    }
}
