//! Constraint predicates.
//!
//! The two hard-constraint checks the search applies to every candidate
//! slot. Both are pure and allocation-free: availability is O(block
//! size × faculty count), clash is O(|faculty A| × |faculty B|). They
//! are called inside the innermost search loop.
//!
//! Two courses with disjoint faculty sets may share a (day, period)
//! with no clash — that is what lets independent labs run in parallel.

use crate::models::{Faculty, Slot};

/// Whether every listed faculty member is free for every period the
/// slot covers.
#[inline]
pub fn slot_satisfies_availability(slot: &Slot, faculty: &[&Faculty]) -> bool {
    faculty.iter().all(|f| f.is_free_for(slot))
}

/// Whether two committed slots would double-book a shared faculty
/// member: the faculty sets intersect and the slots overlap in time.
#[inline]
pub fn slots_clash<T: PartialEq>(a: &Slot, faculty_a: &[T], b: &Slot, faculty_b: &[T]) -> bool {
    if !a.overlaps(b) {
        return false;
    }
    faculty_a.iter().any(|fa| faculty_b.contains(fa))
}
