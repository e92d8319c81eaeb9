//! Days and time slots.
//!
//! A slot identifies where a course occurrence meets: a day plus an
//! inclusive range of period ordinals. Theory occurrences occupy a
//! single period (`start == end`); lab occurrences occupy a contiguous
//! block.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A teaching day.
///
/// Ordered Monday first; domain enumeration and tie-breaking follow
/// this order, which keeps search results deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Day {
    /// All teaching days, in week order.
    pub const ALL: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// Day name as displayed on a timetable.
    pub fn name(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A candidate or committed time slot: day plus an inclusive period range.
///
/// Invariant: `start_period <= end_period`, and the range corresponds to
/// one of the grid's valid contiguous blocks (it never bridges a break).
/// The domain builder only ever produces slots drawn from the grid's
/// block table, so the invariant holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Teaching day.
    pub day: Day,
    /// First period ordinal (inclusive).
    pub start_period: u8,
    /// Last period ordinal (inclusive).
    pub end_period: u8,
}

impl Slot {
    /// Creates a slot spanning `[start_period, end_period]` on `day`.
    pub fn new(day: Day, start_period: u8, end_period: u8) -> Self {
        debug_assert!(start_period <= end_period);
        Self {
            day,
            start_period,
            end_period,
        }
    }

    /// Creates a single-period slot.
    pub fn single(day: Day, period: u8) -> Self {
        Self::new(day, period, period)
    }

    /// Number of periods this slot covers.
    #[inline]
    pub fn block_size(&self) -> u8 {
        self.end_period - self.start_period + 1
    }

    /// Iterates the period ordinals this slot covers.
    #[inline]
    pub fn periods(&self) -> impl Iterator<Item = u8> {
        self.start_period..=self.end_period
    }

    /// Whether this slot covers the given period ordinal.
    #[inline]
    pub fn covers(&self, period: u8) -> bool {
        period >= self.start_period && period <= self.end_period
    }

    /// Whether two slots overlap in time (same day, intersecting ranges).
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.day == other.day
            && self.start_period <= other.end_period
            && other.start_period <= self.end_period
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_period == self.end_period {
            write!(f, "{} P{}", self.day, self.start_period)
        } else {
            write!(f, "{} P{}-P{}", self.day, self.start_period, self.end_period)
        }
    }
}
