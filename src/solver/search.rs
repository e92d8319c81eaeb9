//! Backtracking search engine.
//!
//! # Algorithm
//!
//! 1. Pick the unassigned occurrence with the fewest remaining
//!    consistent candidates (most-constrained-variable, recomputed
//!    after every commit).
//! 2. Try its candidates in scorer order. A candidate is consistent if
//!    every required faculty member is free for it (defensive re-check;
//!    the domain builder already guarantees this), it touches no seeded
//!    busy period, and it clashes with no committed occurrence sharing
//!    a faculty member.
//! 3. Commit, update the busy map, recurse; on failure undo and try the
//!    next candidate; with no candidate left, backtrack.
//!
//! First complete assignment wins — there is no optimization pass.
//! The search is bounded by a backtrack-step budget and an optional
//! wall-clock budget; exceeding either yields a distinct *abandoned*
//! outcome, never conflated with proven infeasibility.
//!
//! # Reference
//! Russell & Norvig (2021), "Artificial Intelligence: A Modern
//! Approach", Ch. 6: Constraint Satisfaction Problems

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::constraints::{slot_satisfies_availability, slots_clash};
use crate::domain::OccurrenceDomain;
use crate::models::{Course, Day, Faculty, Occurrence, Slot};

/// Search bounds. Exceeding either limit abandons the search.
#[derive(Debug, Clone)]
pub struct SearchBudget {
    /// Maximum backtrack steps. The search abandons once the count
    /// exceeds this limit, so a proof that completes on exactly the
    /// last permitted step still reports its real outcome.
    pub max_backtracks: u64,
    /// Optional wall-clock limit.
    pub time_limit: Option<Duration>,
}

impl SearchBudget {
    /// Creates a budget with the given backtrack limit.
    pub fn new(max_backtracks: u64) -> Self {
        Self {
            max_backtracks,
            time_limit: None,
        }
    }

    /// Adds a wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self::new(100_000)
    }
}

/// Per-faculty busy periods, indexed by faculty position in the
/// request's faculty list. Holds seeded entries plus entries induced
/// by committed assignments.
#[derive(Debug, Clone, Default)]
pub struct BusyMap {
    per_faculty: Vec<BTreeSet<(Day, u8)>>,
}

impl BusyMap {
    /// Creates an empty map for `faculty_count` members.
    pub fn new(faculty_count: usize) -> Self {
        Self {
            per_faculty: vec![BTreeSet::new(); faculty_count],
        }
    }

    /// Marks a (day, period) busy for a faculty member.
    pub fn occupy(&mut self, faculty: usize, day: Day, period: u8) {
        self.per_faculty[faculty].insert((day, period));
    }

    /// Whether a faculty member is busy at (day, period).
    #[inline]
    pub fn is_busy(&self, faculty: usize, day: Day, period: u8) -> bool {
        self.per_faculty[faculty].contains(&(day, period))
    }

    /// Busy periods for one faculty member.
    pub fn busy_periods(&self, faculty: usize) -> &BTreeSet<(Day, u8)> {
        &self.per_faculty[faculty]
    }

    fn occupy_slot(&mut self, faculty: &[usize], slot: &Slot) {
        for &f in faculty {
            for p in slot.periods() {
                self.per_faculty[f].insert((slot.day, p));
            }
        }
    }

    fn release_slot(&mut self, faculty: &[usize], slot: &Slot) {
        for &f in faculty {
            for p in slot.periods() {
                self.per_faculty[f].remove(&(slot.day, p));
            }
        }
    }
}

/// A completed assignment plus the busy map it induces.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Slot per occurrence, in occurrence order.
    pub assignments: Vec<(Occurrence, Slot)>,
    /// Faculty busy map (seeded entries included).
    pub busy: BusyMap,
}

/// Diagnostic hint: the last clash observed before a domain exhausted.
#[derive(Debug, Clone)]
pub struct ClashHint {
    /// Course whose candidate was rejected.
    pub course_a: String,
    /// Committed course it clashed with.
    pub course_b: String,
    /// The rejected candidate slot.
    pub slot: Slot,
}

/// Why search exhausted without a solution.
///
/// The named occurrence is the one whose domain ran out at the deepest
/// point reached; the clash is a hint, not a guaranteed root cause.
#[derive(Debug, Clone)]
pub struct InfeasibleReport {
    /// Course of the deepest exhausted occurrence.
    pub course_id: String,
    /// Occurrence ordinal within that course.
    pub occurrence: u8,
    /// Last clash seen while exhausting that domain.
    pub last_clash: Option<ClashHint>,
}

/// Result of one search run.
#[derive(Debug, Clone)]
pub enum SearchResult {
    /// Every occurrence was assigned.
    Solved(Solution),
    /// The search space was exhausted: no feasible assignment exists
    /// for this input.
    Infeasible(InfeasibleReport),
    /// A budget was exceeded before success or exhaustion. No
    /// conclusion about feasibility can be drawn.
    Abandoned {
        /// Backtrack steps consumed.
        backtracks: u64,
        /// Wall-clock time consumed.
        elapsed: Duration,
    },
}

enum Step {
    Solved,
    Exhausted,
    Abandoned,
}

enum Conflict {
    Unavailable,
    SeededBusy,
    Clash { other: usize },
}

/// One self-contained search over a set of occurrence domains.
///
/// Owns all mutable state (partial assignment, busy map); independent
/// searches can run concurrently with no shared state.
pub(crate) struct Search<'a> {
    courses: &'a [Course],
    domains: &'a [OccurrenceDomain],
    /// Required faculty per course, as indices into the faculty list.
    course_faculty: Vec<Vec<usize>>,
    /// Required faculty per course, resolved for availability checks.
    course_required: Vec<Vec<&'a Faculty>>,
    assigned: Vec<Option<Slot>>,
    busy: BusyMap,
    /// Caller-seeded busy periods, never released.
    seeded: BusyMap,
    budget: SearchBudget,
    backtracks: u64,
    started: Instant,
    deepest_depth: usize,
    deepest_domain: usize,
    last_clash: Option<ClashHint>,
}

impl<'a> Search<'a> {
    /// Sets up a search. `seeded` carries pre-occupied periods for
    /// shared faculty, indexed like `faculty`.
    pub(crate) fn new(
        courses: &'a [Course],
        faculty: &'a [Faculty],
        domains: &'a [OccurrenceDomain],
        seeded: BusyMap,
        budget: SearchBudget,
    ) -> Self {
        let index_of = |id: &str| faculty.iter().position(|f| f.id == id);
        let course_faculty: Vec<Vec<usize>> = courses
            .iter()
            .map(|c| c.faculty_ids.iter().filter_map(|id| index_of(id)).collect())
            .collect();
        let course_required: Vec<Vec<&Faculty>> = course_faculty
            .iter()
            .map(|indices| indices.iter().map(|&i| &faculty[i]).collect())
            .collect();

        Self {
            courses,
            domains,
            course_faculty,
            course_required,
            assigned: vec![None; domains.len()],
            busy: seeded.clone(),
            seeded,
            budget,
            backtracks: 0,
            started: Instant::now(),
            deepest_depth: 0,
            deepest_domain: 0,
            last_clash: None,
        }
    }

    /// Runs the search to one of the three terminal results.
    pub(crate) fn run(mut self) -> SearchResult {
        debug!(
            occurrences = self.domains.len(),
            candidates = self
                .domains
                .iter()
                .map(|d| d.candidates.len())
                .sum::<usize>(),
            max_backtracks = self.budget.max_backtracks,
            "search started"
        );

        let result = match self.step(0) {
            Step::Solved => {
                let assignments = self
                    .domains
                    .iter()
                    .zip(&self.assigned)
                    .map(|(d, slot)| (d.occurrence, slot.expect("complete assignment")))
                    .collect();
                SearchResult::Solved(Solution {
                    assignments,
                    busy: self.busy,
                })
            }
            Step::Exhausted => {
                let occurrence = self.domains[self.deepest_domain].occurrence;
                SearchResult::Infeasible(InfeasibleReport {
                    course_id: self.courses[occurrence.course].id.clone(),
                    occurrence: occurrence.index,
                    last_clash: self.last_clash,
                })
            }
            Step::Abandoned => SearchResult::Abandoned {
                backtracks: self.backtracks,
                elapsed: self.started.elapsed(),
            },
        };

        let outcome = match &result {
            SearchResult::Solved(_) => "solved",
            SearchResult::Infeasible(_) => "infeasible",
            SearchResult::Abandoned { .. } => "abandoned",
        };
        debug!(
            backtracks = self.backtracks,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            outcome,
            "search finished"
        );
        result
    }

    fn step(&mut self, depth: usize) -> Step {
        let Some(di) = self.pick_most_constrained() else {
            return Step::Solved;
        };

        for ci in 0..self.domains[di].candidates.len() {
            let slot = self.domains[di].candidates[ci];
            match self.find_conflict(di, &slot) {
                None => {}
                Some(Conflict::Clash { other }) => {
                    let course_a = self.domains[di].occurrence.course;
                    let course_b = self.domains[other].occurrence.course;
                    self.last_clash = Some(ClashHint {
                        course_a: self.courses[course_a].id.clone(),
                        course_b: self.courses[course_b].id.clone(),
                        slot,
                    });
                    continue;
                }
                Some(_) => continue,
            }

            self.commit(di, slot);
            trace!(occurrence = di, %slot, depth, "assigned");

            match self.step(depth + 1) {
                Step::Solved => return Step::Solved,
                Step::Abandoned => return Step::Abandoned,
                Step::Exhausted => {
                    self.undo(di, slot);
                    self.backtracks += 1;
                    trace!(occurrence = di, %slot, depth, "backtracked");
                    if self.out_of_budget() {
                        return Step::Abandoned;
                    }
                }
            }
        }

        if depth >= self.deepest_depth {
            self.deepest_depth = depth;
            self.deepest_domain = di;
        }
        Step::Exhausted
    }

    /// The unassigned occurrence with the smallest remaining domain.
    /// Ties break on occurrence order, keeping the search deterministic.
    fn pick_most_constrained(&self) -> Option<usize> {
        (0..self.domains.len())
            .filter(|&di| self.assigned[di].is_none())
            .min_by_key(|&di| self.remaining(di))
    }

    /// Candidates of `di` still consistent with the committed partial
    /// assignment.
    fn remaining(&self, di: usize) -> usize {
        self.domains[di]
            .candidates
            .iter()
            .filter(|slot| self.find_conflict(di, slot).is_none())
            .count()
    }

    fn find_conflict(&self, di: usize, slot: &Slot) -> Option<Conflict> {
        let course = self.domains[di].occurrence.course;
        let faculty_indices = &self.course_faculty[course];

        // Domains only contain available slots, so this normally never fires.
        if !slot_satisfies_availability(slot, &self.course_required[course]) {
            return Some(Conflict::Unavailable);
        }

        for &f in faculty_indices {
            for p in slot.periods() {
                if self.seeded.is_busy(f, slot.day, p) {
                    return Some(Conflict::SeededBusy);
                }
            }
        }

        for (other, other_slot) in self.assigned.iter().enumerate() {
            let Some(other_slot) = other_slot else { continue };
            let other_course = self.domains[other].occurrence.course;
            if slots_clash(
                slot,
                faculty_indices,
                other_slot,
                &self.course_faculty[other_course],
            ) {
                return Some(Conflict::Clash { other });
            }
        }

        None
    }

    fn commit(&mut self, di: usize, slot: Slot) {
        let course = self.domains[di].occurrence.course;
        self.busy.occupy_slot(&self.course_faculty[course], &slot);
        self.assigned[di] = Some(slot);
    }

    fn undo(&mut self, di: usize, slot: Slot) {
        let course = self.domains[di].occurrence.course;
        self.busy.release_slot(&self.course_faculty[course], &slot);
        self.assigned[di] = None;
    }

    fn out_of_budget(&self) -> bool {
        if self.backtracks > self.budget.max_backtracks {
            return true;
        }
        match self.budget.time_limit {
            Some(limit) => self.started.elapsed() >= limit,
            None => false,
        }
    }
}
