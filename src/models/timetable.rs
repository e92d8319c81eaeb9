//! Projected timetable grid.
//!
//! The deliverable result: a day-by-period grid where each cell is
//! either free or a scheduled class (course plus the full required
//! faculty set). Lab occurrences fill every period of their block.
//! Break spans are carried alongside the rows for presentation.

use serde::{Deserialize, Serialize};

use super::{BreakSpan, CourseKind, Day};

/// A completed weekly timetable for one section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timetable {
    /// Section identifier this timetable was generated for.
    pub section: String,
    /// One row per teaching day, in week order.
    pub rows: Vec<DayRow>,
    /// Non-schedulable break spans from the grid.
    pub breaks: Vec<BreakSpan>,
}

/// One day's schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayRow {
    /// The teaching day.
    pub day: Day,
    /// One cell per schedulable period, in period order.
    pub cells: Vec<PeriodCell>,
}

/// One period's cell within a day row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodCell {
    /// Period ordinal.
    pub period: u8,
    /// What occupies the period.
    pub entry: TimetableCell,
}

/// Contents of a timetable cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimetableCell {
    /// No class scheduled.
    Free,
    /// A scheduled class.
    Class(ClassEntry),
}

/// A scheduled class as shown on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    /// Course code, e.g. `"IT301"`.
    pub course_code: String,
    /// Course name.
    pub course_name: String,
    /// Names of every required faculty member, in course order.
    pub faculty: Vec<String>,
    /// Theory or lab.
    pub kind: CourseKind,
}

impl Timetable {
    /// The cell at (day, period), if the period exists on the grid.
    pub fn cell(&self, day: Day, period: u8) -> Option<&TimetableCell> {
        self.rows
            .iter()
            .find(|row| row.day == day)?
            .cells
            .iter()
            .find(|c| c.period == period)
            .map(|c| &c.entry)
    }

    /// Iterates every scheduled class cell as (day, period, entry).
    pub fn classes(&self) -> impl Iterator<Item = (Day, u8, &ClassEntry)> {
        self.rows.iter().flat_map(|row| {
            row.cells.iter().filter_map(move |cell| match &cell.entry {
                TimetableCell::Class(entry) => Some((row.day, cell.period, entry)),
                TimetableCell::Free => None,
            })
        })
    }

    /// Number of occupied (class) cells.
    pub fn class_cell_count(&self) -> usize {
        self.classes().count()
    }
}
