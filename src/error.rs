//! Error taxonomy.
//!
//! Only conditions that prevent a request from being answered are
//! errors. Infeasibility and budget exhaustion are legitimate outcomes
//! of a well-formed request and live in `solver::SolveOutcome`.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors terminating a scheduling request.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The request failed pre-search integrity checks (duplicate ids,
    /// indivisible weekly period counts, unknown faculty references,
    /// and so on). All detected issues are carried.
    #[error("invalid scheduling request ({} issue(s)): {}", .0.len(), summarize(.0))]
    InvalidRequest(Vec<ValidationError>),

    /// An occurrence has no legal candidate slot at all — typically no
    /// day where every required faculty member is simultaneously free
    /// for the full block. Detected before search starts.
    #[error(
        "course '{course_id}' occurrence {occurrence}: no candidate slot — \
         required faculty have no overlapping availability for the block size"
    )]
    EmptyDomain {
        /// The affected course.
        course_id: String,
        /// Zero-based occurrence ordinal within the course.
        occurrence: u8,
    },

    /// The projector's defensive re-validation failed. Always an engine
    /// defect, never a user-facing outcome.
    #[error("solution invariant violated (engine defect): {detail}")]
    InvariantViolation {
        /// Which invariant failed, and where.
        detail: String,
    },
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
