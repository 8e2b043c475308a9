//! Input and output validation for project scheduling.
//!
//! [`validate_problem`] checks the structural integrity of an instance
//! before preprocessing or decoding. Detects:
//! - Empty projects and activities without modes
//! - Resource vectors that disagree with the capacity vector
//! - Zero durations and non-finite costs
//! - Out-of-range and self-referencing predecessors
//! - Circular precedence dependencies (DAG validation)
//!
//! [`check_schedule`] verifies a decoded schedule against its instance:
//! completeness, precedence, and daily renewable capacity.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{ProblemData, Schedule, Violation};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{kind:?}: {message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// The project has no activities.
    EmptyProject,
    /// An activity has no modes.
    NoModes,
    /// Table or vector lengths disagree.
    DimensionMismatch,
    /// A mode lasts zero days.
    ZeroDuration,
    /// A predecessor index is out of range.
    InvalidPredecessor,
    /// An activity lists itself as predecessor.
    SelfDependency,
    /// Precedence graph contains a cycle.
    CyclicDependency,
    /// A mode cost is NaN or infinite.
    InvalidCost,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the structure of a problem instance.
///
/// Checks:
/// 1. At least one activity
/// 2. Every activity has at least one mode
/// 3. Every mode's resource vector matches the capacity vector length
/// 4. Every mode lasts at least one day and has a finite cost
/// 5. All predecessor indices exist and are not self-references
/// 6. No circular precedence dependencies
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &ProblemData) -> ValidationResult {
    let mut errors = Vec::new();
    let n = problem.activity_count();
    let k = problem.resource_count();

    if n == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyProject,
            "Project has no activities",
        ));
    }

    if problem.resource_types.len() != k {
        errors.push(ValidationError::new(
            ValidationErrorKind::DimensionMismatch,
            format!(
                "{} resource type ids for {k} capacities",
                problem.resource_types.len()
            ),
        ));
    }

    for (a, act) in problem.activities.iter().enumerate() {
        if act.modes.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoModes,
                format!("Activity {a} has no modes"),
            ));
        }

        for (m, mode) in act.modes.iter().enumerate() {
            if mode.resources.len() != k {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DimensionMismatch,
                    format!(
                        "Activity {a} mode {m} has {} resource entries, expected {k}",
                        mode.resources.len()
                    ),
                ));
            }
            if mode.duration == 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::ZeroDuration,
                    format!("Activity {a} mode {m} has zero duration"),
                ));
            }
            if !mode.cost.is_finite() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidCost,
                    format!("Activity {a} mode {m} has non-finite cost {}", mode.cost),
                ));
            }
        }

        for &p in &act.predecessors {
            if p >= n {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidPredecessor,
                    format!("Activity {a} references unknown predecessor {p}"),
                ));
            } else if p == a {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SelfDependency,
                    format!("Activity {a} lists itself as predecessor"),
                ));
            }
        }
    }

    if let Some(cycle_err) = detect_cycles(problem) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles in the precedence graph using DFS.
///
/// # Algorithm
/// Topological sort via DFS. If a back-edge is found (visiting a node
/// currently in the recursion stack), a cycle exists. Self-loops are
/// reported separately and skipped here.
fn detect_cycles(problem: &ProblemData) -> Option<ValidationError> {
    let n = problem.activity_count();
    let adj: Vec<Vec<usize>> = problem
        .activities
        .iter()
        .enumerate()
        .map(|(a, act)| {
            act.predecessors
                .iter()
                .copied()
                .filter(|&p| p < n && p != a)
                .collect()
        })
        .collect();

    let mut visited = vec![false; n];
    let mut in_stack = vec![false; n];

    for node in 0..n {
        if !visited[node] && has_cycle_dfs(node, &adj, &mut visited, &mut in_stack) {
            return Some(ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular dependency detected involving activity {node}"),
            ));
        }
    }

    None
}

fn has_cycle_dfs(
    node: usize,
    adj: &[Vec<usize>],
    visited: &mut [bool],
    in_stack: &mut [bool],
) -> bool {
    visited[node] = true;
    in_stack[node] = true;

    for &next in &adj[node] {
        if in_stack[next] {
            return true; // Back edge → cycle
        }
        if !visited[next] && has_cycle_dfs(next, adj, visited, in_stack) {
            return true;
        }
    }

    in_stack[node] = false;
    false
}

/// Checks a schedule for completeness, precedence, and capacity.
///
/// Returns every violation found; an empty vector means the schedule is
/// sound for `problem`. Entries naming an unknown activity or mode, or
/// ending before they start, are reported as invalid placements and left
/// out of the capacity check, which still runs over the remaining entries.
pub fn check_schedule(schedule: &Schedule, problem: &ProblemData) -> Vec<Violation> {
    let n = problem.activity_count();
    let mut violations = Vec::new();
    let mut seen = vec![0usize; n];
    let mut placeable = Schedule::with_capacity(schedule.len());

    for entry in &schedule.entries {
        if let Some(count) = seen.get_mut(entry.activity) {
            *count += 1;
        }
        if let Err(err) = problem.mode(entry.activity, entry.mode) {
            violations.push(Violation::invalid_placement(entry.activity, err.to_string()));
        } else if !entry.is_well_formed() {
            violations.push(Violation::invalid_placement(
                entry.activity,
                format!(
                    "Activity {} ends on day {} before it starts on day {}",
                    entry.activity, entry.end, entry.start
                ),
            ));
        } else {
            placeable.push(*entry);
        }
    }
    for (a, &count) in seen.iter().enumerate() {
        match count {
            0 => violations.push(Violation::missing(a)),
            1 => {}
            _ => violations.push(Violation::duplicate(a)),
        }
    }

    for entry in &schedule.entries {
        let Some(act) = problem.activities.get(entry.activity) else {
            continue;
        };
        for &p in &act.predecessors {
            if let Some(pred) = schedule.entry_for(p) {
                if pred.end > entry.start {
                    violations.push(Violation::precedence(
                        entry.activity,
                        format!(
                            "Activity {} starts on day {} before predecessor {p} ends on day {}",
                            entry.activity, entry.start, pred.end
                        ),
                    ));
                }
            }
        }
    }

    // Every entry left is well formed with a known mode
    if let Ok(profile) = placeable.resource_profile(problem) {
        for (day, usage) in profile.iter().enumerate() {
            let over = usage
                .iter()
                .zip(&problem.capacities)
                .position(|(&u, &cap)| u > cap);
            if let Some(k) = over {
                violations.push(Violation::capacity_exceeded(
                    day,
                    format!(
                        "Day {day}: resource {k} uses {} of {}",
                        usage[k], problem.capacities[k]
                    ),
                ));
            }
        }
    }

    violations
}
