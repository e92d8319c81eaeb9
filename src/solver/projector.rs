//! Solution projection.
//!
//! Converts a completed assignment into the day/period timetable grid
//! and re-validates the three solution invariants first:
//!
//! 1. no two occurrences sharing a faculty member overlap in time,
//! 2. every slot is exactly one of the grid's valid blocks for its
//!    course's block size,
//! 3. every required faculty member is free for every covered period.
//!
//! The re-validation is cheap next to search and catches engine bugs,
//! not input errors; a failure is an engine defect surfaced as
//! [`ScheduleError::InvariantViolation`].

use std::collections::HashMap;

use tracing::error;

use crate::constraints::{slot_satisfies_availability, slots_clash};
use crate::error::ScheduleError;
use crate::models::{
    ClassEntry, Course, Day, DayRow, Faculty, PeriodCell, Timetable, TimetableCell, TimeGrid,
};
use crate::solver::search::Solution;

/// Projects a solution onto the timetable grid after re-validating it.
pub fn project(
    section: &str,
    grid: &TimeGrid,
    courses: &[Course],
    faculty: &[Faculty],
    solution: &Solution,
) -> Result<Timetable, ScheduleError> {
    validate_solution(grid, courses, faculty, solution)?;

    let faculty_names: HashMap<&str, &str> = faculty
        .iter()
        .map(|f| (f.id.as_str(), if f.name.is_empty() { f.id.as_str() } else { f.name.as_str() }))
        .collect();

    let mut rows: Vec<DayRow> = Day::ALL
        .into_iter()
        .map(|day| DayRow {
            day,
            cells: grid
                .period_numbers()
                .map(|period| PeriodCell {
                    period,
                    entry: TimetableCell::Free,
                })
                .collect(),
        })
        .collect();

    for &(occurrence, slot) in &solution.assignments {
        let course = &courses[occurrence.course];
        let entry = ClassEntry {
            course_code: course.code.clone(),
            course_name: course.name.clone(),
            faculty: course
                .faculty_ids
                .iter()
                .map(|id| {
                    faculty_names
                        .get(id.as_str())
                        .copied()
                        .unwrap_or(id.as_str())
                        .to_string()
                })
                .collect(),
            kind: course.kind,
        };

        // Rows were built from `Day::ALL` in week order, so the day's
        // discriminant doubles as its row index.
        let row = &mut rows[slot.day as usize];
        for cell in row.cells.iter_mut().filter(|c| slot.covers(c.period)) {
            cell.entry = TimetableCell::Class(entry.clone());
        }
    }

    Ok(Timetable {
        section: section.to_string(),
        rows,
        breaks: grid.breaks().to_vec(),
    })
}

/// Re-checks the three solution invariants over the full assignment.
fn validate_solution(
    grid: &TimeGrid,
    courses: &[Course],
    faculty: &[Faculty],
    solution: &Solution,
) -> Result<(), ScheduleError> {
    let faculty_by_id: HashMap<&str, &Faculty> =
        faculty.iter().map(|f| (f.id.as_str(), f)).collect();

    for (i, &(occ_a, slot_a)) in solution.assignments.iter().enumerate() {
        let course_a = &courses[occ_a.course];

        if !grid.is_valid_block(slot_a.start_period, slot_a.end_period)
            || slot_a.block_size() != course_a.block_size()
        {
            return defect(format!(
                "course '{}' occupies {slot_a}, which is not a valid {}-period block",
                course_a.id,
                course_a.block_size()
            ));
        }

        let required: Vec<&Faculty> = course_a
            .faculty_ids
            .iter()
            .filter_map(|id| faculty_by_id.get(id.as_str()).copied())
            .collect();
        if !slot_satisfies_availability(&slot_a, &required) {
            return defect(format!(
                "course '{}' is scheduled at {slot_a} outside some required faculty's availability",
                course_a.id
            ));
        }

        for &(occ_b, slot_b) in &solution.assignments[i + 1..] {
            let course_b = &courses[occ_b.course];
            if slots_clash(
                &slot_a,
                &course_a.faculty_ids,
                &slot_b,
                &course_b.faculty_ids,
            ) {
                return defect(format!(
                    "courses '{}' ({slot_a}) and '{}' ({slot_b}) double-book a shared faculty member",
                    course_a.id, course_b.id
                ));
            }
        }
    }

    Ok(())
}

fn defect(detail: String) -> Result<(), ScheduleError> {
    error!(%detail, "solution failed invariant re-validation");
    Err(ScheduleError::InvariantViolation { detail })
}
