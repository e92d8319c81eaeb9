//! Timetabling domain models.
//!
//! Core data types for the weekly classroom scheduling problem and its
//! solution. The time grid is static configuration; faculty, courses,
//! and preferences are per-request input; the timetable is the
//! projected result.
//!
//! | Type | Role |
//! |------|------|
//! | `TimeGrid`, `Period`, `BreakSpan` | the teaching week |
//! | `Day`, `Slot` | where an occurrence meets |
//! | `Faculty` | availability resource |
//! | `Course`, `CourseKind`, `Occurrence` | what gets scheduled |
//! | `DayPreference` | hard/soft preferred days |
//! | `Timetable` | the deliverable grid |

mod course;
mod faculty;
mod grid;
mod preference;
mod slot;
mod timetable;

pub use course::{Course, CourseKind, Occurrence};
pub use faculty::Faculty;
pub use grid::{BreakSpan, Period, TimeGrid};
pub use preference::DayPreference;
pub use slot::{Day, Slot};
pub use timetable::{ClassEntry, DayRow, PeriodCell, Timetable, TimetableCell};
