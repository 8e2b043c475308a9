//! Crate error type.
//!
//! Every fallible operation returns [`Result`]. Structural problems in the
//! input tables are collected by [`crate::validation`] and surfaced as a
//! single [`MrcpspError::InvalidProblem`].

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors produced while building, preprocessing, decoding, or evaluating.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MrcpspError {
    /// The input tables failed structural validation.
    #[error("invalid problem data: {}", summarize(.0))]
    InvalidProblem(Vec<ValidationError>),

    /// Every mode of an activity exceeds the renewable capacity.
    #[error("infeasible instance: activity {activity} has no mode within resource capacity")]
    InfeasibleActivity { activity: usize },

    /// The decoder stalled with nothing running and nothing eligible.
    #[error("cyclic precedence: decoding stalled on day {day} with {pending} activities unscheduled")]
    CyclicPrecedence { day: u32, pending: usize },

    /// A chosen mode cannot run even on an otherwise idle project.
    #[error("activity {activity} mode {mode} exceeds renewable capacity")]
    ModeExceedsCapacity { activity: usize, mode: usize },

    /// Candidate sequences do not match the number of activities.
    #[error("candidate length mismatch: expected {expected}, got {keys} keys and {modes} modes")]
    CandidateLengthMismatch {
        expected: usize,
        keys: usize,
        modes: usize,
    },

    /// A candidate names a mode the activity does not have.
    #[error("activity {activity} has {available} modes, mode {mode} requested")]
    ModeOutOfRange {
        activity: usize,
        mode: usize,
        available: usize,
    },

    /// A schedule entry ends before it starts.
    #[error("activity {activity} is placed from day {start} to day {end}")]
    InvalidPlacement { activity: usize, start: u32, end: u32 },

    /// Normalization bounds collapse to a single value.
    #[error("degenerate {objective} bounds: max {max} equals min {min}")]
    DegenerateBounds {
        objective: &'static str,
        max: f64,
        min: f64,
    },

    /// Engine configuration is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, MrcpspError>;

fn summarize(errors: &[ValidationError]) -> String {
    match errors {
        [] => "no details".to_string(),
        [only] => only.message.clone(),
        [first, rest @ ..] => format!("{} (and {} more)", first.message, rest.len()),
    }
}
