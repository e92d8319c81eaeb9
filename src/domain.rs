//! Slot-domain construction.
//!
//! For every occurrence of every course, enumerates the candidate slots
//! drawn from the grid's valid-block table: every (day, block) pair
//! where all required faculty are simultaneously free for the whole
//! block, restricted to hard preferred days when declared. Candidates
//! are ordered by day, then by start period; the preference scorer may
//! later reorder them (soft preferences only).
//!
//! An empty domain is reported immediately as its own failure cause —
//! "no day where the required faculty overlap for the block size" is a
//! common misconfiguration and must be distinguishable from search-time
//! infeasibility.

use std::collections::HashMap;

use crate::constraints::slot_satisfies_availability;
use crate::error::ScheduleError;
use crate::models::{Course, Day, DayPreference, Faculty, Occurrence, Slot, TimeGrid};

/// The candidate slots for one occurrence.
#[derive(Debug, Clone)]
pub struct OccurrenceDomain {
    /// Which occurrence these candidates belong to.
    pub occurrence: Occurrence,
    /// Legal candidate slots, in (day, start period) order.
    pub candidates: Vec<Slot>,
}

/// Builds the initial domain for every occurrence of every course.
///
/// Occurrences of one course share the same candidate list (they are
/// interchangeable until search commits them), so the list is computed
/// once per course and cloned per occurrence.
///
/// # Errors
/// [`ScheduleError::EmptyDomain`] if any course yields no candidates.
pub fn build_domains(
    grid: &TimeGrid,
    courses: &[Course],
    faculty: &[Faculty],
    preferences: &[DayPreference],
) -> Result<Vec<OccurrenceDomain>, ScheduleError> {
    let faculty_by_id: HashMap<&str, &Faculty> =
        faculty.iter().map(|f| (f.id.as_str(), f)).collect();

    let mut domains = Vec::new();

    for (course_idx, course) in courses.iter().enumerate() {
        let required: Vec<&Faculty> = course
            .faculty_ids
            .iter()
            .filter_map(|id| faculty_by_id.get(id.as_str()).copied())
            .collect();

        let hard_days = preferences
            .iter()
            .find(|p| p.hard && p.course_id == course.id && p.is_declared())
            .map(|p| &p.days);

        let mut candidates = Vec::new();
        for day in Day::ALL {
            if let Some(days) = hard_days {
                if !days.contains(&day) {
                    continue;
                }
            }
            for &(start, end) in grid.valid_blocks(course.block_size()) {
                let slot = Slot::new(day, start, end);
                if slot_satisfies_availability(&slot, &required) {
                    candidates.push(slot);
                }
            }
        }

        if candidates.is_empty() {
            return Err(ScheduleError::EmptyDomain {
                course_id: course.id.clone(),
                occurrence: 0,
            });
        }

        for index in 0..course.occurrence_count() {
            domains.push(OccurrenceDomain {
                occurrence: Occurrence::new(course_idx, index),
                candidates: candidates.clone(),
            });
        }
    }

    Ok(domains)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> TimeGrid {
        TimeGrid::standard()
    }

    #[test]
    fn test_theory_domain_all_free() {
        let faculty = vec![Faculty::new("F1").with_free_all_days(1..=7)];
        let courses = vec![Course::theory("C1").with_faculty("F1")];

        let domains = build_domains(&grid(), &courses, &faculty, &[]).unwrap();
        assert_eq!(domains.len(), 1);
        // 5 days × 7 single-period blocks
        assert_eq!(domains[0].candidates.len(), 35);
        // Ordered by day then period
        assert_eq!(domains[0].candidates[0], Slot::single(Day::Monday, 1));
        assert_eq!(domains[0].candidates[34], Slot::single(Day::Friday, 7));
    }

    #[test]
    fn test_lab_domain_respects_breaks() {
        let faculty = vec![Faculty::new("F1").with_free_all_days(1..=7)];
        let courses = vec![Course::lab("C1", 2)
            .with_weekly_periods(2)
            .with_faculty("F1")];

        let domains = build_domains(&grid(), &courses, &faculty, &[]).unwrap();
        // 5 days × 3 size-2 blocks; none bridges a break
        assert_eq!(domains[0].candidates.len(), 15);
        for slot in &domains[0].candidates {
            assert!(grid().is_valid_block(slot.start_period, slot.end_period));
        }
    }

    #[test]
    fn test_availability_filters_days() {
        let faculty = vec![Faculty::new("F1").with_free(Day::Wednesday, [1, 2])];
        let courses = vec![Course::theory("C1").with_faculty("F1")];

        let domains = build_domains(&grid(), &courses, &faculty, &[]).unwrap();
        assert_eq!(
            domains[0].candidates,
            vec![
                Slot::single(Day::Wednesday, 1),
                Slot::single(Day::Wednesday, 2)
            ]
        );
    }

    #[test]
    fn test_multi_faculty_requires_overlap() {
        // A free Monday P1-P2 only, B free Tuesday P3-P4 only:
        // no day where both cover a full 2-block → empty domain.
        let faculty = vec![
            Faculty::new("A").with_free(Day::Monday, [1, 2]),
            Faculty::new("B").with_free(Day::Tuesday, [3, 4]),
        ];
        let courses = vec![Course::lab("C1", 2)
            .with_weekly_periods(2)
            .with_faculty("A")
            .with_faculty("B")];

        let err = build_domains(&grid(), &courses, &faculty, &[]).unwrap_err();
        assert!(matches!(err, ScheduleError::EmptyDomain { course_id, .. } if course_id == "C1"));
    }

    #[test]
    fn test_hard_preference_prunes_days() {
        let faculty = vec![Faculty::new("F1").with_free_all_days(1..=7)];
        let courses = vec![Course::theory("C1").with_faculty("F1")];
        let prefs = vec![DayPreference::hard("C1", [Day::Monday, Day::Wednesday])];

        let domains = build_domains(&grid(), &courses, &faculty, &prefs).unwrap();
        assert!(domains[0]
            .candidates
            .iter()
            .all(|s| s.day == Day::Monday || s.day == Day::Wednesday));
        assert_eq!(domains[0].candidates.len(), 14);
    }

    #[test]
    fn test_soft_preference_does_not_prune() {
        let faculty = vec![Faculty::new("F1").with_free_all_days(1..=7)];
        let courses = vec![Course::theory("C1").with_faculty("F1")];
        let prefs = vec![DayPreference::soft("C1", [Day::Monday])];

        let domains = build_domains(&grid(), &courses, &faculty, &prefs).unwrap();
        assert_eq!(domains[0].candidates.len(), 35);
    }

    #[test]
    fn test_one_domain_per_occurrence() {
        let faculty = vec![Faculty::new("F1").with_free_all_days(1..=7)];
        let courses = vec![Course::theory("C1")
            .with_weekly_periods(3)
            .with_faculty("F1")];

        let domains = build_domains(&grid(), &courses, &faculty, &[]).unwrap();
        assert_eq!(domains.len(), 3);
        assert_eq!(domains[1].occurrence, Occurrence::new(0, 1));
        assert_eq!(domains[0].candidates, domains[2].candidates);
    }
}
