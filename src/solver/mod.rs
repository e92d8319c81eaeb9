//! Scheduling engine entry point.
//!
//! Wires the pipeline: validate the request, build per-occurrence slot
//! domains, order candidates by soft preference, run the backtracking
//! search, and project a successful assignment onto the timetable grid.
//!
//! One request is one self-contained, synchronous computation. Separate
//! requests can run concurrently; when two sections share a faculty
//! member (typically an external one), the caller must seed that
//! member's committed periods with [`SolveRequest::with_busy_faculty`]
//! and serialize the contending requests — the engine never discovers
//! cross-section bookings mid-search.
//!
//! # Example
//!
//! ```
//! use timetable_engine::models::{Course, Day, Faculty};
//! use timetable_engine::solver::{SolveOutcome, SolveRequest, Solver};
//!
//! let request = SolveRequest::new("II Year IT A")
//!     .with_faculty(Faculty::new("F1").with_free_all_days(1..=7))
//!     .with_course(Course::theory("C1").with_code("IT302").with_faculty("F1"));
//!
//! let outcome = Solver::new().solve(&request).unwrap();
//! assert!(matches!(outcome, SolveOutcome::Solved(_)));
//! ```

mod projector;
mod scorer;
mod search;

use std::collections::BTreeSet;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::domain::build_domains;
use crate::error::ScheduleError;
use crate::models::{Course, Day, DayPreference, Faculty, TimeGrid, Timetable};
use crate::validation::validate_request;

pub use projector::project;
pub use scorer::{is_preferred, order_candidates};
pub use search::{BusyMap, ClashHint, InfeasibleReport, SearchBudget, Solution};

use search::{Search, SearchResult};

/// Everything the engine needs for one section's timetable.
#[derive(Debug, Clone)]
pub struct SolveRequest {
    /// Section identifier (carried through to the timetable).
    pub section: String,
    /// The weekly time grid. Defaults to [`TimeGrid::standard`].
    pub grid: TimeGrid,
    /// Courses to schedule.
    pub courses: Vec<Course>,
    /// Faculty pool with availability.
    pub faculty: Vec<Faculty>,
    /// Hard and soft day preferences.
    pub preferences: Vec<DayPreference>,
    /// Search bounds.
    pub budget: SearchBudget,
    /// Pre-seeded busy periods `(faculty id, day, period)` for faculty
    /// shared with other sections.
    busy_seed: Vec<(String, Day, u8)>,
    /// Optional value-ordering perturbation seed for restarts.
    perturbation_seed: Option<u64>,
}

impl SolveRequest {
    /// Creates a request on the standard grid with no courses.
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            grid: TimeGrid::standard(),
            courses: Vec::new(),
            faculty: Vec::new(),
            preferences: Vec::new(),
            budget: SearchBudget::default(),
            busy_seed: Vec::new(),
            perturbation_seed: None,
        }
    }

    /// Replaces the time grid.
    pub fn with_grid(mut self, grid: TimeGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Adds a course.
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Adds a faculty member.
    pub fn with_faculty(mut self, faculty: Faculty) -> Self {
        self.faculty.push(faculty);
        self
    }

    /// Adds a day preference.
    pub fn with_preference(mut self, preference: DayPreference) -> Self {
        self.preferences.push(preference);
        self
    }

    /// Sets the search budget.
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Caps backtrack steps.
    pub fn with_max_backtracks(mut self, max_backtracks: u64) -> Self {
        self.budget.max_backtracks = max_backtracks;
        self
    }

    /// Caps wall-clock time.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.budget.time_limit = Some(limit);
        self
    }

    /// Seeds a busy period for a shared faculty member, committed by
    /// another section before this search starts.
    pub fn with_busy_faculty(
        mut self,
        faculty_id: impl Into<String>,
        day: Day,
        period: u8,
    ) -> Self {
        self.busy_seed.push((faculty_id.into(), day, period));
        self
    }

    /// Perturbs value ordering within preference tiers for a restart.
    /// Deterministic per seed; hard constraints are unaffected.
    pub fn with_perturbation_seed(mut self, seed: u64) -> Self {
        self.perturbation_seed = Some(seed);
        self
    }
}

/// Result of a well-formed scheduling request.
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    /// A complete, validated timetable.
    Solved(Timetable),
    /// The search space was exhausted: no assignment satisfies the hard
    /// constraints. Re-run only with changed input (more availability,
    /// fewer courses, relaxed hard preferences).
    Infeasible(InfeasibleReport),
    /// A budget ran out first. Feasibility is undecided; retry with a
    /// larger budget or simplified input.
    Abandoned {
        /// Backtrack steps consumed.
        backtracks: u64,
        /// Wall-clock time consumed.
        elapsed: Duration,
    },
}

/// The timetabling engine.
///
/// Stateless; all per-request state lives inside the search it spawns,
/// so one `Solver` may serve many requests, concurrently if desired.
#[derive(Debug, Clone, Default)]
pub struct Solver;

impl Solver {
    /// Creates a solver.
    pub fn new() -> Self {
        Self
    }

    /// Schedules one section.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidRequest`] for malformed input,
    /// [`ScheduleError::EmptyDomain`] when some occurrence has no legal
    /// slot at all, and [`ScheduleError::InvariantViolation`] if the
    /// projector's defensive re-validation fails (an engine defect).
    pub fn solve(&self, request: &SolveRequest) -> Result<SolveOutcome, ScheduleError> {
        info!(
            section = %request.section,
            courses = request.courses.len(),
            faculty = request.faculty.len(),
            "scheduling request"
        );

        validate_request(
            &request.grid,
            &request.courses,
            &request.faculty,
            &request.preferences,
            &request.busy_seed,
        )
        .map_err(ScheduleError::InvalidRequest)?;

        let mut domains = build_domains(
            &request.grid,
            &request.courses,
            &request.faculty,
            &request.preferences,
        )?;

        let mut rng = request.perturbation_seed.map(StdRng::seed_from_u64);
        for domain in &mut domains {
            let course = &request.courses[domain.occurrence.course];
            let soft_days = soft_preferred_days(&request.preferences, &course.id);
            order_candidates(&mut domain.candidates, &soft_days, rng.as_mut());
        }

        let seeded = seed_busy_map(request);
        let result = Search::new(
            &request.courses,
            &request.faculty,
            &domains,
            seeded,
            request.budget.clone(),
        )
        .run();

        match result {
            SearchResult::Solved(solution) => {
                let timetable = projector::project(
                    &request.section,
                    &request.grid,
                    &request.courses,
                    &request.faculty,
                    &solution,
                )?;
                info!(section = %request.section, "timetable generated");
                Ok(SolveOutcome::Solved(timetable))
            }
            SearchResult::Infeasible(report) => {
                info!(
                    section = %request.section,
                    course = %report.course_id,
                    "no feasible timetable"
                );
                Ok(SolveOutcome::Infeasible(report))
            }
            SearchResult::Abandoned {
                backtracks,
                elapsed,
            } => {
                info!(
                    section = %request.section,
                    backtracks,
                    "search abandoned on budget"
                );
                Ok(SolveOutcome::Abandoned {
                    backtracks,
                    elapsed,
                })
            }
        }
    }
}

/// Soft preferred days for a course; hard preferences are already
/// folded into the domain and must not bias ordering twice.
fn soft_preferred_days(preferences: &[DayPreference], course_id: &str) -> BTreeSet<Day> {
    preferences
        .iter()
        .filter(|p| !p.hard && p.course_id == course_id)
        .flat_map(|p| p.days.iter().copied())
        .collect()
}

fn seed_busy_map(request: &SolveRequest) -> BusyMap {
    let mut seeded = BusyMap::new(request.faculty.len());
    for (id, day, period) in &request.busy_seed {
        if let Some(index) = request.faculty.iter().position(|f| &f.id == id) {
            seeded.occupy(index, *day, *period);
        }
    }
    seeded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Slot, TimetableCell};

    fn solved(outcome: SolveOutcome) -> Timetable {
        match outcome {
            SolveOutcome::Solved(t) => t,
            other => panic!("expected solved, got {other:?}"),
        }
    }

    #[test]
    fn test_single_theory_single_faculty() {
        // Scenario A: one theory occurrence, faculty free everywhere,
        // budget 1.
        let request = SolveRequest::new("S")
            .with_faculty(Faculty::new("F1").with_free_all_days(1..=7))
            .with_course(Course::theory("C1").with_code("IT302").with_faculty("F1"))
            .with_max_backtracks(1);

        let timetable = solved(Solver::new().solve(&request).unwrap());
        assert_eq!(timetable.class_cell_count(), 1);
    }

    #[test]
    fn test_no_overlapping_availability_is_empty_domain() {
        // Scenario B: lab needs both faculty together; their free
        // periods never coincide → empty domain, not infeasibility.
        let request = SolveRequest::new("S")
            .with_faculty(Faculty::new("A").with_free(Day::Monday, [1, 2]))
            .with_faculty(Faculty::new("B").with_free(Day::Tuesday, [3, 4]))
            .with_course(
                Course::lab("C1", 2)
                    .with_weekly_periods(2)
                    .with_faculty("A")
                    .with_faculty("B"),
            );

        let err = Solver::new().solve(&request).unwrap_err();
        assert!(matches!(err, ScheduleError::EmptyDomain { course_id, .. } if course_id == "C1"));
    }

    #[test]
    fn test_contended_single_slot_is_infeasible() {
        // Scenario C: two theory courses, one shared faculty member,
        // one free period total.
        let request = SolveRequest::new("S")
            .with_faculty(Faculty::new("F1").with_free(Day::Monday, [1]))
            .with_course(Course::theory("C1").with_faculty("F1"))
            .with_course(Course::theory("C2").with_faculty("F1"));

        let outcome = Solver::new().solve(&request).unwrap();
        assert!(matches!(outcome, SolveOutcome::Infeasible(_)));
    }

    #[test]
    fn test_soft_preferred_day_is_chosen_first() {
        // Scenario D: lab prefers Wednesday (soft), faculty free all
        // week → the first accepted solution lands on Wednesday.
        let request = SolveRequest::new("S")
            .with_faculty(Faculty::new("F1").with_free_all_days(1..=7))
            .with_faculty(Faculty::new("F2").with_free_all_days(1..=7))
            .with_course(
                Course::lab("C1", 2)
                    .with_code("IT301")
                    .with_weekly_periods(2)
                    .with_faculty("F1")
                    .with_faculty("F2"),
            )
            .with_preference(DayPreference::soft("C1", [Day::Wednesday]));

        let timetable = solved(Solver::new().solve(&request).unwrap());
        for (day, _, _) in timetable.classes() {
            assert_eq!(day, Day::Wednesday);
        }
        assert_eq!(timetable.class_cell_count(), 2);
    }

    #[test]
    fn test_hard_preference_restricts_placement() {
        let request = SolveRequest::new("S")
            .with_faculty(Faculty::new("F1").with_free_all_days(1..=7))
            .with_course(
                Course::theory("C1")
                    .with_weekly_periods(3)
                    .with_faculty("F1"),
            )
            .with_preference(DayPreference::hard("C1", [Day::Friday]));

        let timetable = solved(Solver::new().solve(&request).unwrap());
        for (day, _, _) in timetable.classes() {
            assert_eq!(day, Day::Friday);
        }
    }

    #[test]
    fn test_invalid_request_is_rejected() {
        let request = SolveRequest::new("S")
            .with_course(Course::theory("C1")); // no faculty at all

        let err = Solver::new().solve(&request).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidRequest(_)));
    }

    #[test]
    fn test_seeded_busy_faculty_is_avoided() {
        // External faculty member already teaches Monday P1 elsewhere.
        let request = SolveRequest::new("S")
            .with_faculty(
                Faculty::new("EXT")
                    .with_free(Day::Monday, [1, 2])
                    .external(),
            )
            .with_course(Course::theory("C1").with_faculty("EXT"))
            .with_busy_faculty("EXT", Day::Monday, 1);

        let timetable = solved(Solver::new().solve(&request).unwrap());
        assert_eq!(timetable.cell(Day::Monday, 1), Some(&TimetableCell::Free));
        assert!(matches!(
            timetable.cell(Day::Monday, 2),
            Some(TimetableCell::Class(_))
        ));
    }

    #[test]
    fn test_busy_seed_with_unknown_faculty_is_rejected() {
        // A typo in the seeded faculty id must fail validation rather
        // than drop the seed and double-book the real member.
        let request = SolveRequest::new("S")
            .with_faculty(Faculty::new("EXT").with_free(Day::Monday, [1, 2]))
            .with_course(Course::theory("C1").with_faculty("EXT"))
            .with_busy_faculty("EXTT", Day::Monday, 1);

        let err = Solver::new().solve(&request).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidRequest(_)));
    }

    #[test]
    fn test_full_section_no_shared_periods() {
        // A realistic mix: one two-faculty lab plus three theory
        // courses over a shared pool; verify pairwise no-clash on the
        // projected grid through the cell contents.
        let request = SolveRequest::new("II Year IT A")
            .with_faculty(
                Faculty::new("F1")
                    .with_name("Dr. Geeitha")
                    .with_free_all_days(1..=7),
            )
            .with_faculty(
                Faculty::new("F2")
                    .with_name("Ms. Anitha")
                    .with_free_all_days(1..=7),
            )
            .with_faculty(
                Faculty::new("F3")
                    .with_name("Dr. Mathematics")
                    .with_free(Day::Monday, [1, 2, 3])
                    .with_free(Day::Thursday, [1, 2, 3])
                    .external(),
            )
            .with_course(
                Course::lab("C1", 2)
                    .with_code("IT301")
                    .with_name("ML Lab")
                    .with_weekly_periods(4)
                    .with_faculty("F1")
                    .with_faculty("F2"),
            )
            .with_course(
                Course::theory("C2")
                    .with_code("IT302")
                    .with_name("Operating Systems")
                    .with_weekly_periods(3)
                    .with_faculty("F2"),
            )
            .with_course(
                Course::theory("C3")
                    .with_code("MA201")
                    .with_name("Discrete Mathematics")
                    .with_weekly_periods(3)
                    .with_faculty("F3"),
            );

        let timetable = solved(Solver::new().solve(&request).unwrap());
        // 2 lab occurrences × 2 periods + 3 + 3 theory periods.
        assert_eq!(timetable.class_cell_count(), 10);
    }

    #[test]
    fn test_determinism_of_full_pipeline() {
        let build = || {
            SolveRequest::new("S")
                .with_faculty(Faculty::new("F1").with_free_all_days(1..=7))
                .with_faculty(Faculty::new("F2").with_free_all_days(1..=7))
                .with_course(
                    Course::lab("C1", 2)
                        .with_weekly_periods(2)
                        .with_faculty("F1")
                        .with_faculty("F2"),
                )
                .with_course(
                    Course::theory("C2")
                        .with_weekly_periods(3)
                        .with_faculty("F1"),
                )
        };

        let first = solved(Solver::new().solve(&build()).unwrap());
        for _ in 0..3 {
            let next = solved(Solver::new().solve(&build()).unwrap());
            for (day, period, entry) in first.classes() {
                assert_eq!(
                    next.cell(day, period),
                    Some(&TimetableCell::Class(entry.clone()))
                );
            }
        }
    }

    #[test]
    fn test_perturbed_restart_still_satisfies_constraints() {
        let base = SolveRequest::new("S")
            .with_faculty(Faculty::new("F1").with_free_all_days(1..=7))
            .with_course(
                Course::theory("C1")
                    .with_weekly_periods(3)
                    .with_faculty("F1"),
            )
            .with_preference(DayPreference::soft("C1", [Day::Monday]));

        for seed in [1u64, 2, 3] {
            let request = base.clone().with_perturbation_seed(seed);
            let timetable = solved(Solver::new().solve(&request).unwrap());
            // Soft preference still leads: with three occurrences and
            // seven Monday periods, all three stay on Monday.
            for (day, _, _) in timetable.classes() {
                assert_eq!(day, Day::Monday);
            }
        }
    }

    #[test]
    fn test_projected_slots_are_valid_blocks() {
        let request = SolveRequest::new("S")
            .with_faculty(Faculty::new("F1").with_free_all_days(1..=7))
            .with_faculty(Faculty::new("F2").with_free_all_days(1..=7))
            .with_course(
                Course::lab("C1", 2)
                    .with_weekly_periods(6)
                    .with_faculty("F1")
                    .with_faculty("F2"),
            );

        let timetable = solved(Solver::new().solve(&request).unwrap());
        let grid = TimeGrid::standard();

        // Reconstruct occupied runs per day and confirm each is a valid
        // 2-block (never straddling a break).
        for day in Day::ALL {
            let occupied: Vec<u8> = grid
                .period_numbers()
                .filter(|&p| {
                    matches!(timetable.cell(day, p), Some(TimetableCell::Class(_)))
                })
                .collect();
            for pair in occupied.chunks(2) {
                if let [start, end] = *pair {
                    assert!(grid.is_valid_block(start, end));
                    let _ = Slot::new(day, start, end);
                }
            }
        }
    }
}
