//! Faculty model.
//!
//! A faculty member is a scheduling resource: an identifier plus a
//! per-day set of free period ordinals. External faculty (shared with
//! other departments or sections) are modeled identically; the flag
//! only signals to the caller that their busy state may need seeding
//! across scheduling requests.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::{Day, Slot};

/// A faculty member and their weekly availability.
///
/// # Example
/// ```
/// use timetable_engine::models::{Day, Faculty};
///
/// let faculty = Faculty::new("F1")
///     .with_name("Dr. Geeitha")
///     .with_free(Day::Monday, [1, 2, 3, 5, 6, 7]);
///
/// assert!(faculty.is_free(Day::Monday, 2));
/// assert!(!faculty.is_free(Day::Monday, 4));
/// assert!(!faculty.is_free(Day::Tuesday, 1));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Free period ordinals per day. A missing day means fully
    /// unavailable that day.
    pub available: HashMap<Day, BTreeSet<u8>>,
    /// Shared with other sections or departments. No scheduling
    /// semantics inside the engine; see the crate docs on busy-state
    /// seeding.
    pub is_external: bool,
}

impl Faculty {
    /// Creates a faculty member with no availability.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            available: HashMap::new(),
            is_external: false,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds free periods on a day.
    pub fn with_free(mut self, day: Day, periods: impl IntoIterator<Item = u8>) -> Self {
        self.available.entry(day).or_default().extend(periods);
        self
    }

    /// Marks every listed period free on every teaching day.
    pub fn with_free_all_days(mut self, periods: impl IntoIterator<Item = u8> + Clone) -> Self {
        for day in Day::ALL {
            self = self.with_free(day, periods.clone());
        }
        self
    }

    /// Flags this faculty member as external (shared across sections).
    pub fn external(mut self) -> Self {
        self.is_external = true;
        self
    }

    /// Whether this faculty member is free at a specific period.
    #[inline]
    pub fn is_free(&self, day: Day, period: u8) -> bool {
        self.available
            .get(&day)
            .is_some_and(|periods| periods.contains(&period))
    }

    /// Whether this faculty member is free for every period a slot covers.
    #[inline]
    pub fn is_free_for(&self, slot: &Slot) -> bool {
        match self.available.get(&slot.day) {
            Some(periods) => slot.periods().all(|p| periods.contains(&p)),
            None => false,
        }
    }

    /// Days on which this faculty member has any availability.
    pub fn available_days(&self) -> impl Iterator<Item = Day> + '_ {
        Day::ALL
            .into_iter()
            .filter(|day| self.available.get(day).is_some_and(|p| !p.is_empty()))
    }
}
