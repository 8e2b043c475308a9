//! Bi-objective evaluation: makespan and cost.
//!
//! | Objective | Definition | Needs decoding |
//! |-----------|-----------|----------------|
//! | Makespan | Latest `start + duration` in the decoded schedule | yes |
//! | Cost | Sum of the chosen modes' costs | no |
//!
//! Both are minimized. For selection schemes that need non-negative,
//! higher-is-better fitness (roulette wheel), [`ObjectiveBounds`] maps
//! them linearly onto `[0, 1]`:
//!
//! ```text
//! time = (Tmax - makespan) / (Tmax - Tmin)
//! cost = (Cmax - cost)     / (Cmax - Cmin)
//! ```
//!
//! with `Tmax` the sum of longest durations, `Tmin` the largest shortest
//! duration of any single activity, and `Cmax`/`Cmin` the sums of most and
//! least expensive mode costs.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::chromosome::Candidate;
use super::decoder::decode;
use crate::error::{MrcpspError, Result};
use crate::models::ProblemData;

/// Raw minimization objectives of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Objectives {
    /// Project duration in days.
    pub makespan: u32,
    /// Total mode cost.
    pub cost: f64,
}

impl Objectives {
    /// Objective vector `[makespan, cost]`.
    pub fn to_array(self) -> [f64; 2] {
        [self.makespan as f64, self.cost]
    }
}

/// Normalized maximization fitness, each component in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFitness {
    /// Time fitness (1 = shortest possible).
    pub time: f64,
    /// Cost fitness (1 = cheapest possible).
    pub cost: f64,
}

impl NormalizedFitness {
    /// Fitness vector `[time, cost]`.
    pub fn to_array(self) -> [f64; 2] {
        [self.time, self.cost]
    }
}

/// Normalization bounds for [`NormalizedFitness`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveBounds {
    /// Sum over activities of the longest mode duration.
    pub t_max: u32,
    /// Largest shortest-mode duration of any activity.
    pub t_min: u32,
    /// Sum over activities of the most expensive mode cost.
    pub c_max: f64,
    /// Sum over activities of the cheapest mode cost.
    pub c_min: f64,
}

impl ObjectiveBounds {
    /// Computes bounds from a (preprocessed) problem.
    ///
    /// # Errors
    /// [`MrcpspError::DegenerateBounds`] if `Tmax == Tmin` or
    /// `Cmax == Cmin`, since the normalization would divide by zero.
    pub fn from_problem(problem: &ProblemData) -> Result<Self> {
        let acts = &problem.activities;
        let bounds = Self {
            t_max: acts.iter().filter_map(|a| a.max_duration()).sum(),
            t_min: acts.iter().filter_map(|a| a.min_duration()).max().unwrap_or(0),
            c_max: acts.iter().filter_map(|a| a.max_cost()).sum(),
            c_min: acts.iter().filter_map(|a| a.min_cost()).sum(),
        };

        if bounds.t_max <= bounds.t_min {
            warn!(t_max = bounds.t_max, t_min = bounds.t_min, "degenerate time bounds");
            return Err(MrcpspError::DegenerateBounds {
                objective: "time",
                max: bounds.t_max as f64,
                min: bounds.t_min as f64,
            });
        }
        if bounds.c_max <= bounds.c_min {
            warn!(c_max = bounds.c_max, c_min = bounds.c_min, "degenerate cost bounds");
            return Err(MrcpspError::DegenerateBounds {
                objective: "cost",
                max: bounds.c_max,
                min: bounds.c_min,
            });
        }
        Ok(bounds)
    }

    /// Maps raw objectives onto `[0, 1]`, higher is better.
    pub fn normalize(&self, objectives: Objectives) -> NormalizedFitness {
        let t_max = self.t_max as f64;
        let t_min = self.t_min as f64;
        NormalizedFitness {
            time: (t_max - objectives.makespan as f64) / (t_max - t_min),
            cost: (self.c_max - objectives.cost) / (self.c_max - self.c_min),
        }
    }
}

/// Makespan of the decoded candidate.
pub fn makespan(candidate: &Candidate, problem: &ProblemData) -> Result<u32> {
    Ok(decode(candidate, problem)?.makespan())
}

/// Total cost of the candidate's mode choices. Does not decode.
pub fn total_cost(candidate: &Candidate, problem: &ProblemData) -> Result<f64> {
    candidate.validate(problem)?;
    candidate
        .modes
        .iter()
        .enumerate()
        .map(|(a, &m)| problem.mode(a, m).map(|mode| mode.cost))
        .sum()
}

/// Evaluates both minimization objectives.
pub fn evaluate(candidate: &Candidate, problem: &ProblemData) -> Result<Objectives> {
    Ok(Objectives {
        makespan: makespan(candidate, problem)?,
        cost: total_cost(candidate, problem)?,
    })
}

/// Evaluates the normalized maximization fitness.
pub fn evaluate_normalized(
    candidate: &Candidate,
    problem: &ProblemData,
    bounds: &ObjectiveBounds,
) -> Result<NormalizedFitness> {
    evaluate(candidate, problem).map(|objectives| bounds.normalize(objectives))
}
