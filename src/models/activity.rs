//! Activity and execution-mode model.
//!
//! An activity is the smallest schedulable unit of project work. It can
//! be executed in one of several modes; each mode fixes the renewable
//! resource draw, the duration in days, and the cost.
//!
//! # Cost Model
//!
//! A mode's cost is folded into a single scalar at construction time:
//! `fixed_cost + Σ non_renewable[k] * unit_cost[k]`. Non-renewable
//! consumption plays no further role in scheduling.
//!
//! # Reference
//! Talbot (1982), "Resource-Constrained Project Scheduling with
//! Time-Resource Tradeoffs: The Nonpreemptive Case"

use serde::{Deserialize, Serialize};

/// One way of executing an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mode {
    /// Renewable resource units held on every day of execution.
    pub resources: Vec<u32>,
    /// Duration in whole days (≥ 1).
    pub duration: u32,
    /// Total cost of running the activity in this mode.
    pub cost: f64,
    /// Position of this mode in the raw input table.
    ///
    /// Preserved through preprocessing so results can be mapped back.
    pub original_index: usize,
}

impl Mode {
    /// Creates a mode with an already-aggregated cost.
    pub fn new(resources: Vec<u32>, duration: u32, cost: f64) -> Self {
        Self {
            resources,
            duration,
            cost,
            original_index: 0,
        }
    }

    /// Creates a mode whose cost is derived from a fixed part plus
    /// non-renewable consumption priced per unit.
    ///
    /// Extra entries in the longer of `non_renewable`/`unit_costs` are ignored.
    pub fn with_cost_components(
        resources: Vec<u32>,
        duration: u32,
        fixed_cost: f64,
        non_renewable: &[u32],
        unit_costs: &[f64],
    ) -> Self {
        let variable: f64 = non_renewable
            .iter()
            .zip(unit_costs)
            .map(|(&units, &price)| units as f64 * price)
            .sum();
        Self::new(resources, duration, fixed_cost + variable)
    }

    /// Sets the raw-table position.
    pub fn with_original_index(mut self, index: usize) -> Self {
        self.original_index = index;
        self
    }

    /// Whether this mode fits within `capacities` when running alone.
    pub fn fits(&self, capacities: &[u32]) -> bool {
        self.resources
            .iter()
            .zip(capacities)
            .all(|(&need, &cap)| need <= cap)
    }

    /// Whether this mode needs no more of any resource than `other`.
    pub fn uses_no_more_than(&self, other: &Mode) -> bool {
        self.resources
            .iter()
            .zip(&other.resources)
            .all(|(&mine, &theirs)| mine <= theirs)
    }
}

/// A project activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Indices of activities that must finish before this one starts.
    pub predecessors: Vec<usize>,
    /// Available execution modes.
    pub modes: Vec<Mode>,
}

impl Activity {
    /// Creates an activity with no predecessors and no modes.
    pub fn new() -> Self {
        Self {
            predecessors: Vec::new(),
            modes: Vec::new(),
        }
    }

    /// Adds a predecessor index.
    pub fn with_predecessor(mut self, predecessor: usize) -> Self {
        self.predecessors.push(predecessor);
        self
    }

    /// Replaces the predecessor list.
    pub fn with_predecessors(mut self, predecessors: Vec<usize>) -> Self {
        self.predecessors = predecessors;
        self
    }

    /// Appends a mode, recording its raw-table position.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        let index = self.modes.len();
        self.modes.push(mode.with_original_index(index));
        self
    }

    /// Number of available modes.
    pub fn mode_count(&self) -> usize {
        self.modes.len()
    }

    /// Shortest duration over all modes.
    pub fn min_duration(&self) -> Option<u32> {
        self.modes.iter().map(|m| m.duration).min()
    }

    /// Longest duration over all modes.
    pub fn max_duration(&self) -> Option<u32> {
        self.modes.iter().map(|m| m.duration).max()
    }

    /// Cheapest mode cost.
    pub fn min_cost(&self) -> Option<f64> {
        self.modes.iter().map(|m| m.cost).reduce(f64::min)
    }

    /// Most expensive mode cost.
    pub fn max_cost(&self) -> Option<f64> {
        self.modes.iter().map(|m| m.cost).reduce(f64::max)
    }
}

impl Default for Activity {
    fn default() -> Self {
        Self::new()
    }
}
