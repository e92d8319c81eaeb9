//! Soft-preference value ordering.
//!
//! Soft preferred days never prune the domain; they only decide which
//! candidates the search tries first. Candidates split into two tiers —
//! preferred-day slots, then the rest — each keeping the domain
//! builder's (day, period) order, so the greedy bias survives
//! backtracking: when a preferred choice is undone, the next preferred
//! candidate is tried before any non-preferred one.
//!
//! A perturbation seed shuffles candidates *within* each tier. Restarts
//! with different seeds explore different equally-preferred orderings
//! while each individual run stays deterministic.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::models::{Day, Slot};

/// Whether a candidate slot falls on a preferred day.
#[inline]
pub fn is_preferred(slot: &Slot, preferred: &BTreeSet<Day>) -> bool {
    preferred.contains(&slot.day)
}

/// Reorders candidates preferred-tier first.
///
/// Stable within tiers; with `rng`, each tier is shuffled instead.
/// With an empty preference set the order is unchanged (or uniformly
/// shuffled when perturbing).
pub fn order_candidates(
    candidates: &mut [Slot],
    preferred: &BTreeSet<Day>,
    rng: Option<&mut StdRng>,
) {
    // sort_by_key is stable: ties keep the (day, period) domain order.
    candidates.sort_by_key(|slot| !is_preferred(slot, preferred));

    if let Some(rng) = rng {
        let split = candidates
            .iter()
            .position(|slot| !is_preferred(slot, preferred))
            .unwrap_or(candidates.len());
        let (front, back) = candidates.split_at_mut(split);
        front.shuffle(rng);
        back.shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn candidates() -> Vec<Slot> {
        Day::ALL
            .into_iter()
            .flat_map(|day| (1..=3).map(move |p| Slot::single(day, p)))
            .collect()
    }

    fn prefs(days: &[Day]) -> BTreeSet<Day> {
        days.iter().copied().collect()
    }

    #[test]
    fn test_preferred_tier_first() {
        let mut c = candidates();
        order_candidates(&mut c, &prefs(&[Day::Wednesday]), None);

        assert_eq!(c[0], Slot::single(Day::Wednesday, 1));
        assert_eq!(c[1], Slot::single(Day::Wednesday, 2));
        assert_eq!(c[2], Slot::single(Day::Wednesday, 3));
        // Non-preferred tier keeps original (day, period) order.
        assert_eq!(c[3], Slot::single(Day::Monday, 1));
    }

    #[test]
    fn test_no_preference_keeps_order() {
        let mut c = candidates();
        let original = c.clone();
        order_candidates(&mut c, &BTreeSet::new(), None);
        assert_eq!(c, original);
    }

    #[test]
    fn test_perturbed_keeps_tier_boundary() {
        let preferred = prefs(&[Day::Monday, Day::Friday]);
        let mut rng = StdRng::seed_from_u64(7);
        let mut c = candidates();
        order_candidates(&mut c, &preferred, Some(&mut rng));

        // Six preferred slots still precede all nine non-preferred ones.
        assert!(c[..6].iter().all(|s| is_preferred(s, &preferred)));
        assert!(c[6..].iter().all(|s| !is_preferred(s, &preferred)));
    }

    #[test]
    fn test_perturbation_is_deterministic_per_seed() {
        let preferred = prefs(&[Day::Monday]);

        let mut a = candidates();
        let mut b = candidates();
        order_candidates(&mut a, &preferred, Some(&mut StdRng::seed_from_u64(42)));
        order_candidates(&mut b, &preferred, Some(&mut StdRng::seed_from_u64(42)));
        assert_eq!(a, b);
    }
}
