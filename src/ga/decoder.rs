//! Serial schedule generation from a random-key candidate.
//!
//! # Algorithm
//!
//! Simulates the project day by day starting at day 0:
//!
//! 1. Collect the eligible activities: not started, all predecessors done.
//! 2. Visit them by descending key (ties: lower index first). Admit each
//!    one whose chosen mode fits next to everything currently running.
//!    An activity that does not fit waits for a later day and does not
//!    block lower-priority ones.
//! 3. Advance one day; activities whose remaining duration reaches zero
//!    finish and release their resources from the next day on.
//!
//! Decoding stops when every activity is done. If a day ends with nothing
//! running and activities still pending, no later day can differ; this is
//! reported as an error instead of looping forever.
//!
//! # Complexity
//! O(H · n · (p + k)) where H = makespan, n = activities, p = predecessors
//! per activity, k = resource types.
//!
//! # Reference
//! Kolisch & Hartmann (1999), "Heuristic Algorithms for the
//! Resource-Constrained Project Scheduling Problem", Sec. 2.1 (Serial SGS)

use tracing::{trace, warn};

use super::chromosome::Candidate;
use crate::error::{MrcpspError, Result};
use crate::models::{Mode, ProblemData, Schedule, ScheduledActivity};
use crate::validation::{ValidationError, ValidationErrorKind};

/// An activity in execution.
struct Running<'a> {
    activity: usize,
    resources: &'a [u32],
    remaining: u32,
}

/// Decodes a candidate into a day-by-day schedule.
///
/// Deterministic: identical inputs yield identical schedules. Entries are
/// in admission order.
///
/// # Errors
/// - [`MrcpspError::CandidateLengthMismatch`] / [`MrcpspError::ModeOutOfRange`]
///   if the candidate does not fit `problem`.
/// - [`MrcpspError::InvalidProblem`] if a chosen mode's resource vector
///   does not match the capacity vector. Other structural checks are left
///   to [`crate::validation::validate_problem`] or preprocessing.
/// - [`MrcpspError::CyclicPrecedence`] if pending activities can never
///   become eligible.
/// - [`MrcpspError::ModeExceedsCapacity`] if an eligible activity cannot
///   run even on an idle project (only possible on unpreprocessed data).
pub fn decode(candidate: &Candidate, problem: &ProblemData) -> Result<Schedule> {
    candidate.validate(problem)?;

    let n = problem.activity_count();
    let modes: Vec<&Mode> = candidate
        .modes
        .iter()
        .enumerate()
        .map(|(a, &m)| problem.mode(a, m))
        .collect::<Result<_>>()?;
    if let Some((a, mode)) = modes
        .iter()
        .enumerate()
        .find(|(_, m)| m.resources.len() != problem.resource_count())
    {
        return Err(MrcpspError::InvalidProblem(vec![ValidationError::new(
            ValidationErrorKind::DimensionMismatch,
            format!(
                "Activity {a} mode {} has {} resource entries, expected {}",
                candidate.modes[a],
                mode.resources.len(),
                problem.resource_count()
            ),
        )]));
    }

    let mut done = vec![false; n];
    let mut started = vec![false; n];
    let mut done_count = 0;
    let mut running: Vec<Running<'_>> = Vec::new();
    let mut usage = vec![0u32; problem.resource_count()];
    let mut schedule = Schedule::with_capacity(n);
    let mut day = 0u32;

    while done_count < n {
        let mut eligible: Vec<usize> = (0..n)
            .filter(|&a| {
                !started[a]
                    && problem.activities[a]
                        .predecessors
                        .iter()
                        .all(|&p| done.get(p).copied().unwrap_or(false))
            })
            .collect();
        eligible.sort_by(|&a, &b| {
            candidate.keys[b]
                .total_cmp(&candidate.keys[a])
                .then(a.cmp(&b))
        });
        let first_eligible = eligible.first().copied();

        let mut admitted = 0;
        for a in eligible {
            let mode = modes[a];
            if !fits(&usage, &mode.resources, &problem.capacities) {
                continue;
            }
            for (used, &need) in usage.iter_mut().zip(&mode.resources) {
                *used += need;
            }
            started[a] = true;
            admitted += 1;
            schedule.push(ScheduledActivity {
                activity: a,
                mode: candidate.modes[a],
                start: day,
                end: day + mode.duration,
            });
            running.push(Running {
                activity: a,
                resources: &mode.resources,
                remaining: mode.duration,
            });
        }

        if running.is_empty() {
            let pending = n - done_count;
            warn!(day, pending, "decoding stalled");
            return Err(match first_eligible {
                Some(activity) => MrcpspError::ModeExceedsCapacity {
                    activity,
                    mode: candidate.modes[activity],
                },
                None => MrcpspError::CyclicPrecedence { day, pending },
            });
        }

        trace!(day, admitted, running = running.len(), "decoded day");

        day += 1;
        for r in &mut running {
            r.remaining = r.remaining.saturating_sub(1);
            if r.remaining == 0 {
                done[r.activity] = true;
                done_count += 1;
                for (used, &need) in usage.iter_mut().zip(r.resources) {
                    *used -= need;
                }
            }
        }
        running.retain(|r| r.remaining > 0);
    }

    Ok(schedule)
}

/// Whether `need` fits next to `usage` within `capacities`.
fn fits(usage: &[u32], need: &[u32], capacities: &[u32]) -> bool {
    usage
        .iter()
        .zip(need)
        .zip(capacities)
        .all(|((&used, &need), &cap)| used.checked_add(need).is_some_and(|total| total <= cap))
}
