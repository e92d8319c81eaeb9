//! Constraint-satisfaction timetabling engine.
//!
//! Assigns weekly classroom time slots to an academic section's courses
//! such that every hard rule holds — faculty availability, no
//! double-booking, contiguous lab blocks, simultaneous multi-faculty
//! availability — while trying preferred days first. The first complete
//! assignment wins; preference satisfaction is a greedy value-ordering
//! bias, not a global objective.
//!
//! Storage, transport, and presentation are external collaborators:
//! they supply [`models::Course`] / [`models::Faculty`] /
//! [`models::DayPreference`] records and consume the projected
//! [`models::Timetable`] or the structured infeasibility report.
//!
//! # Modules
//!
//! - **`models`**: domain types — `TimeGrid`, `Slot`, `Faculty`,
//!   `Course`, `Occurrence`, `DayPreference`, `Timetable`
//! - **`domain`**: per-occurrence candidate-slot construction
//! - **`constraints`**: pure availability and clash predicates
//! - **`solver`**: backtracking search, preference-ordered value
//!   selection, budgets, solution projection
//! - **`validation`**: request integrity checks
//! - **`error`**: error taxonomy
//!
//! # References
//!
//! - Russell & Norvig (2021), "Artificial Intelligence: A Modern
//!   Approach", Ch. 6 (CSP backtracking, MRV heuristic)
//! - Schaerf (1999), "A Survey of Automated Timetabling"

pub mod constraints;
pub mod domain;
pub mod error;
pub mod models;
pub mod solver;
pub mod validation;
