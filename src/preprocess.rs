//! Instance reduction before search.
//!
//! Shrinks a raw instance to an equivalent, smaller one by applying three
//! simplification rules in a fixed order until none of them changes
//! anything:
//!
//! 1. **Infeasible modes**: a mode whose resource vector exceeds capacity
//!    in any component can never run and is removed.
//! 2. **Redundant resources**: if the sum over activities of their
//!    largest demand for a resource type stays within capacity, that type
//!    can never bind and is dropped from every mode and from the capacities.
//! 3. **Dominated modes**: for an activity with several modes, the longest
//!    mode is removed when no other mode needs more of any resource.
//!
//! Dropped resource types stay dropped for the rest of the run; removing
//! modes only ever lowers demand, so a redundant type cannot become
//! binding again.
//!
//! # Reference
//! Sprecher, Hartmann & Drexl (1997), "An exact algorithm for project
//! scheduling with multiple modes", Sec. 3 (Preprocessing)

use tracing::{debug, info};

use crate::error::{MrcpspError, Result};
use crate::models::ProblemData;
use crate::validation::validate_problem;

/// Counters describing what preprocessing removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreprocessStats {
    /// Number of full rule passes, including the final no-change pass.
    pub passes: usize,
    /// Modes removed for exceeding capacity.
    pub infeasible_modes: usize,
    /// Resource types dropped as redundant.
    pub redundant_resources: usize,
    /// Modes removed as dominated.
    pub dominated_modes: usize,
}

/// Reduces `raw` to an equivalent instance.
///
/// Deterministic and idempotent: `preprocess(preprocess(x)) == preprocess(x)`.
///
/// # Errors
/// - [`MrcpspError::InvalidProblem`] if `raw` fails structural validation.
/// - [`MrcpspError::InfeasibleActivity`] if every mode of some activity
///   exceeds capacity.
pub fn preprocess(raw: ProblemData) -> Result<ProblemData> {
    preprocess_with_stats(raw).map(|(problem, _)| problem)
}

/// Same as [`preprocess`], also returning what was removed.
pub fn preprocess_with_stats(raw: ProblemData) -> Result<(ProblemData, PreprocessStats)> {
    validate_problem(&raw).map_err(MrcpspError::InvalidProblem)?;

    let modes_before: usize = raw.mode_counts().iter().sum();
    let mut problem = raw;
    let mut stats = PreprocessStats::default();

    loop {
        stats.passes += 1;

        let infeasible = remove_infeasible_modes(&mut problem)?;
        let redundant = remove_redundant_resources(&mut problem);
        let dominated = remove_dominated_modes(&mut problem);

        stats.infeasible_modes += infeasible;
        stats.redundant_resources += redundant;
        stats.dominated_modes += dominated;

        if infeasible == 0 && redundant == 0 && dominated == 0 {
            break;
        }
    }

    info!(
        passes = stats.passes,
        modes_before,
        modes_after = problem.mode_counts().iter().sum::<usize>(),
        resources_kept = problem.resource_count(),
        "preprocessing finished"
    );

    Ok((problem, stats))
}

/// Removes modes that exceed capacity. Returns the number removed.
fn remove_infeasible_modes(problem: &mut ProblemData) -> Result<usize> {
    let capacities = &problem.capacities;
    let mut removed = 0;

    for (a, act) in problem.activities.iter_mut().enumerate() {
        let before = act.modes.len();
        act.modes.retain(|mode| {
            let fits = mode.fits(capacities);
            if !fits {
                debug!(activity = a, mode = mode.original_index, "removing infeasible mode");
            }
            fits
        });
        if act.modes.is_empty() {
            return Err(MrcpspError::InfeasibleActivity { activity: a });
        }
        removed += before - act.modes.len();
    }

    Ok(removed)
}

/// Drops resource types that can never bind. Returns the number dropped.
fn remove_redundant_resources(problem: &mut ProblemData) -> usize {
    let k = problem.resource_count();
    let mut worst_case = vec![0u64; k];
    for act in &problem.activities {
        for (r, total) in worst_case.iter_mut().enumerate() {
            let peak = act.modes.iter().map(|m| m.resources[r]).max().unwrap_or(0);
            *total += u64::from(peak);
        }
    }

    let keep: Vec<bool> = worst_case
        .iter()
        .zip(&problem.capacities)
        .map(|(&demand, &cap)| demand > u64::from(cap))
        .collect();
    let dropped = keep.iter().filter(|&&kept| !kept).count();
    if dropped == 0 {
        return 0;
    }

    for (r, _) in keep.iter().enumerate().filter(|&(_, &kept)| !kept) {
        debug!(
            resource = problem.resource_types[r],
            demand = worst_case[r],
            capacity = problem.capacities[r],
            "dropping redundant resource"
        );
    }

    for act in &mut problem.activities {
        for mode in &mut act.modes {
            retain_by(&mut mode.resources, &keep);
        }
    }
    retain_by(&mut problem.capacities, &keep);
    retain_by(&mut problem.resource_types, &keep);

    dropped
}

fn retain_by<T>(values: &mut Vec<T>, keep: &[bool]) {
    let mut flags = keep.iter();
    values.retain(|_| flags.next().copied().unwrap_or(true));
}

/// Removes the longest mode of each activity when it has no resource
/// advantage over the others. Returns the number removed.
fn remove_dominated_modes(problem: &mut ProblemData) -> usize {
    let mut removed = 0;

    for (a, act) in problem.activities.iter_mut().enumerate() {
        if act.modes.len() < 2 {
            continue;
        }

        // First mode with the maximum duration
        let longest = act
            .modes
            .iter()
            .enumerate()
            .fold(0, |best, (i, m)| {
                if m.duration > act.modes[best].duration {
                    i
                } else {
                    best
                }
            });

        let dominated = act
            .modes
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != longest)
            .all(|(_, m)| m.uses_no_more_than(&act.modes[longest]));

        if dominated {
            let mode = act.modes.remove(longest);
            debug!(
                activity = a,
                mode = mode.original_index,
                duration = mode.duration,
                "removing dominated mode"
            );
            removed += 1;
        }
    }

    removed
}
