//! Schedule (decoded solution) model.
//!
//! A schedule lists every activity with its chosen mode and its start
//! and end day, in the order the decoder admitted them. It may carry
//! constraint violations when it was checked against a problem.
//!
//! # Time Convention
//!
//! Days are half-open: an activity with `start = 3` and duration 2
//! occupies days 3 and 4 and has `end = 5`. A successor may start on
//! day 5.

use serde::{Deserialize, Serialize};

use super::problem::ProblemData;
use crate::error::{MrcpspError, Result};

/// A complete schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Activity placements in admission order.
    pub entries: Vec<ScheduledActivity>,
}

/// One activity placed in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledActivity {
    /// Activity index.
    pub activity: usize,
    /// Chosen mode index (into the preprocessed mode list).
    pub mode: usize,
    /// First day of execution.
    pub start: u32,
    /// First day after execution (`start + duration`).
    pub end: u32,
}

/// A constraint violation found in a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related activity index, or day index for capacity violations.
    pub entity: usize,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Activity started before a predecessor finished.
    PrecedenceViolation,
    /// Renewable usage on some day exceeded capacity.
    CapacityExceeded,
    /// Activity is missing from the schedule.
    MissingActivity,
    /// Activity appears more than once.
    DuplicateActivity,
    /// Entry names an unknown activity or mode, or ends before it starts.
    InvalidPlacement,
}

impl ScheduledActivity {
    /// Duration in days; zero for a malformed placement ending before it starts.
    #[inline]
    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the placement ends no earlier than it starts.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end
    }

    /// Whether the activity is executing on `day`.
    #[inline]
    pub fn is_active_on(&self, day: u32) -> bool {
        self.start <= day && day < self.end
    }
}

impl Violation {
    /// Creates a precedence violation.
    pub fn precedence(activity: usize, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::PrecedenceViolation,
            entity: activity,
            message: message.into(),
        }
    }

    /// Creates a capacity violation for a given day.
    pub fn capacity_exceeded(day: usize, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::CapacityExceeded,
            entity: day,
            message: message.into(),
        }
    }

    /// Creates a missing-activity violation.
    pub fn missing(activity: usize) -> Self {
        Self {
            violation_type: ViolationType::MissingActivity,
            entity: activity,
            message: format!("Activity {activity} is not scheduled"),
        }
    }

    /// Creates a violation for an entry that cannot be placed.
    pub fn invalid_placement(activity: usize, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::InvalidPlacement,
            entity: activity,
            message: message.into(),
        }
    }

    /// Creates a duplicate-activity violation.
    pub fn duplicate(activity: usize) -> Self {
        Self {
            violation_type: ViolationType::DuplicateActivity,
            entity: activity,
            message: format!("Activity {activity} is scheduled more than once"),
        }
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty schedule with room for `n` entries.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            entries: Vec::with_capacity(n),
        }
    }

    /// Appends a placement.
    pub fn push(&mut self, entry: ScheduledActivity) {
        self.entries.push(entry);
    }

    /// Number of placed activities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Makespan: latest end day over all placements.
    pub fn makespan(&self) -> u32 {
        self.entries.iter().map(|e| e.end).max().unwrap_or(0)
    }

    /// Finds the placement of an activity.
    pub fn entry_for(&self, activity: usize) -> Option<&ScheduledActivity> {
        self.entries.iter().find(|e| e.activity == activity)
    }

    /// Start day of an activity.
    pub fn start_of(&self, activity: usize) -> Option<u32> {
        self.entry_for(activity).map(|e| e.start)
    }

    /// Activities executing on `day`.
    pub fn active_on(&self, day: u32) -> Vec<usize> {
        self.entries
            .iter()
            .filter(|e| e.is_active_on(day))
            .map(|e| e.activity)
            .collect()
    }

    /// Renewable usage per day: `profile[day][k]` for `day in 0..makespan`.
    ///
    /// Fails if a placement names a mode the problem does not have or
    /// ends before it starts.
    pub fn resource_profile(&self, problem: &ProblemData) -> Result<Vec<Vec<u32>>> {
        let horizon = self.makespan() as usize;
        let mut profile = vec![vec![0u32; problem.resource_count()]; horizon];

        for entry in &self.entries {
            if !entry.is_well_formed() {
                return Err(MrcpspError::InvalidPlacement {
                    activity: entry.activity,
                    start: entry.start,
                    end: entry.end,
                });
            }
            let mode = problem.mode(entry.activity, entry.mode)?;
            for day in &mut profile[entry.start as usize..entry.end as usize] {
                for (used, &need) in day.iter_mut().zip(&mode.resources) {
                    *used += need;
                }
            }
        }
        Ok(profile)
    }

    /// Peak usage of each resource type over the schedule.
    pub fn peak_usage(&self, problem: &ProblemData) -> Result<Vec<u32>> {
        let profile = self.resource_profile(problem)?;
        let mut peak = vec![0u32; problem.resource_count()];
        for day in &profile {
            for (p, &u) in peak.iter_mut().zip(day) {
                *p = (*p).max(u);
            }
        }
        Ok(peak)
    }
}
