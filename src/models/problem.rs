//! Project (problem instance) model.
//!
//! [`ProblemData`] is the static description of an MRCPSP instance:
//! activities with precedence and modes, plus a renewable capacity
//! vector that holds on every day of the horizon.
//!
//! Instances usually arrive as plain tables ([`ProjectTables`]), one row
//! per activity and one entry per mode, and are converted with
//! [`ProblemData::from_tables`].

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::activity::{Activity, Mode};
use crate::error::{MrcpspError, Result};
use crate::validation::{validate_problem, ValidationError, ValidationErrorKind};

/// Raw tabular instance description.
///
/// Indexing: `[activity][mode]` for per-mode data, `[activity][mode][k]`
/// for per-resource vectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectTables {
    /// Predecessor indices per activity.
    pub predecessors: Vec<Vec<usize>>,
    /// Renewable consumption per activity, mode, and resource type.
    pub renewable: Vec<Vec<Vec<u32>>>,
    /// Duration in days per activity and mode.
    pub durations: Vec<Vec<u32>>,
    /// Fixed cost per activity and mode.
    pub fixed_costs: Vec<Vec<f64>>,
    /// Non-renewable consumption per activity, mode, and resource type.
    ///
    /// May be empty, in which case mode cost equals the fixed cost.
    pub non_renewable: Vec<Vec<Vec<u32>>>,
    /// Price per unit of each non-renewable resource type.
    pub non_renewable_costs: Vec<f64>,
    /// Daily renewable capacity per resource type.
    pub capacities: Vec<u32>,
}

/// An MRCPSP instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemData {
    /// Activities, indexed `0..N`.
    pub activities: Vec<Activity>,
    /// Daily renewable capacity per kept resource type.
    pub capacities: Vec<u32>,
    /// Raw-table index of each kept resource type.
    pub resource_types: Vec<usize>,
}

impl ProblemData {
    /// Creates an instance from activities and capacities.
    ///
    /// Does not validate; see [`ProblemData::validated`].
    pub fn new(activities: Vec<Activity>, capacities: Vec<u32>) -> Self {
        let resource_types = (0..capacities.len()).collect();
        Self {
            activities,
            capacities,
            resource_types,
        }
    }

    /// Creates an instance and runs structural validation on it.
    pub fn validated(activities: Vec<Activity>, capacities: Vec<u32>) -> Result<Self> {
        let problem = Self::new(activities, capacities);
        validate_problem(&problem).map_err(MrcpspError::InvalidProblem)?;
        Ok(problem)
    }

    /// Builds a validated instance from plain tables, deriving mode costs.
    pub fn from_tables(tables: &ProjectTables) -> Result<Self> {
        check_table_shapes(tables).map_err(MrcpspError::InvalidProblem)?;
        let problem = Self::assemble(tables);
        validate_problem(&problem).map_err(MrcpspError::InvalidProblem)?;
        Ok(problem)
    }

    /// Converts tables whose shapes are already known to agree.
    pub(crate) fn assemble(tables: &ProjectTables) -> Self {
        let activities = tables
            .predecessors
            .iter()
            .enumerate()
            .map(|(a, preds)| {
                let modes = tables.durations[a].iter().enumerate().map(|(m, &duration)| {
                    let non_renewable = tables
                        .non_renewable
                        .get(a)
                        .and_then(|row| row.get(m))
                        .map(Vec::as_slice)
                        .unwrap_or(&[]);
                    Mode::with_cost_components(
                        tables.renewable[a][m].clone(),
                        duration,
                        tables.fixed_costs[a][m],
                        non_renewable,
                        &tables.non_renewable_costs,
                    )
                });
                modes.fold(
                    Activity::new().with_predecessors(preds.clone()),
                    Activity::with_mode,
                )
            })
            .collect();

        Self::new(activities, tables.capacities.clone())
    }

    /// Number of activities.
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    /// Number of renewable resource types.
    pub fn resource_count(&self) -> usize {
        self.capacities.len()
    }

    /// Number of modes of `activity` (0 if the index is unknown).
    pub fn mode_count(&self, activity: usize) -> usize {
        self.activities.get(activity).map_or(0, Activity::mode_count)
    }

    /// Mode counts of all activities, in index order.
    pub fn mode_counts(&self) -> Vec<usize> {
        self.activities.iter().map(Activity::mode_count).collect()
    }

    /// Looks up a mode, failing on an out-of-range index.
    pub fn mode(&self, activity: usize, mode: usize) -> Result<&Mode> {
        self.activities
            .get(activity)
            .and_then(|act| act.modes.get(mode))
            .ok_or_else(|| MrcpspError::ModeOutOfRange {
                activity,
                mode,
                available: self.mode_count(activity),
            })
    }

    /// Successor lists (inverse of the predecessor relation).
    pub fn successors(&self) -> Vec<Vec<usize>> {
        let mut succ = vec![Vec::new(); self.activities.len()];
        for (a, act) in self.activities.iter().enumerate() {
            for &p in &act.predecessors {
                if let Some(list) = succ.get_mut(p) {
                    list.push(a);
                }
            }
        }
        succ
    }

    /// Activities in a precedence-respecting order (Kahn's algorithm).
    ///
    /// Returns `None` if the precedence graph has a cycle.
    pub fn topological_order(&self) -> Option<Vec<usize>> {
        let n = self.activities.len();
        let succ = self.successors();
        let mut in_degree: Vec<usize> = self
            .activities
            .iter()
            .map(|a| a.predecessors.iter().filter(|&&p| p < n).count())
            .collect();

        let mut queue: VecDeque<usize> = (0..n).filter(|&a| in_degree[a] == 0).collect();
        let mut order = Vec::with_capacity(n);

        while let Some(a) = queue.pop_front() {
            order.push(a);
            for &s in &succ[a] {
                in_degree[s] -= 1;
                if in_degree[s] == 0 {
                    queue.push_back(s);
                }
            }
        }

        (order.len() == n).then_some(order)
    }

    /// Length of the longest precedence chain under the given mode choice,
    /// ignoring resource capacity.
    ///
    /// This is a lower bound on the makespan of any schedule using `modes`.
    pub fn critical_path_length(&self, modes: &[usize]) -> Result<u32> {
        let n = self.activities.len();
        if modes.len() != n {
            return Err(MrcpspError::CandidateLengthMismatch {
                expected: n,
                keys: modes.len(),
                modes: modes.len(),
            });
        }
        let order = self
            .topological_order()
            .ok_or(MrcpspError::CyclicPrecedence { day: 0, pending: n })?;

        let mut finish = vec![0u32; n];
        for a in order {
            let start = self.activities[a]
                .predecessors
                .iter()
                .filter_map(|&p| finish.get(p).copied())
                .max()
                .unwrap_or(0);
            finish[a] = start + self.mode(a, modes[a])?.duration;
        }
        Ok(finish.into_iter().max().unwrap_or(0))
    }
}

fn check_table_shapes(tables: &ProjectTables) -> std::result::Result<(), Vec<ValidationError>> {
    let n = tables.predecessors.len();
    let mut errors = Vec::new();
    let mismatch = |message: String| {
        ValidationError::new(ValidationErrorKind::DimensionMismatch, message)
    };

    for (name, len) in [
        ("renewable", tables.renewable.len()),
        ("durations", tables.durations.len()),
        ("fixed_costs", tables.fixed_costs.len()),
    ] {
        if len != n {
            errors.push(mismatch(format!(
                "Table '{name}' has {len} rows, expected {n}"
            )));
        }
    }
    if !tables.non_renewable.is_empty() && tables.non_renewable.len() != n {
        errors.push(mismatch(format!(
            "Table 'non_renewable' has {} rows, expected {n}",
            tables.non_renewable.len()
        )));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    for a in 0..n {
        let modes = tables.durations[a].len();
        if tables.renewable[a].len() != modes || tables.fixed_costs[a].len() != modes {
            errors.push(mismatch(format!(
                "Activity {a}: {modes} durations, {} renewable rows, {} fixed costs",
                tables.renewable[a].len(),
                tables.fixed_costs[a].len()
            )));
        }
        if let Some(row) = tables.non_renewable.get(a) {
            if row.len() != modes {
                errors.push(mismatch(format!(
                    "Activity {a}: {modes} durations, {} non-renewable rows",
                    row.len()
                )));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> ProblemData {
        // 0 → {1, 2} → 3
        ProblemData::new(
            vec![
                Activity::new().with_mode(Mode::new(vec![1], 2, 10.0)),
                Activity::new()
                    .with_predecessor(0)
                    .with_mode(Mode::new(vec![1], 3, 10.0))
                    .with_mode(Mode::new(vec![2], 1, 30.0)),
                Activity::new()
                    .with_predecessor(0)
                    .with_mode(Mode::new(vec![1], 5, 10.0)),
                Activity::new()
                    .with_predecessors(vec![1, 2])
                    .with_mode(Mode::new(vec![1], 1, 10.0)),
            ],
            vec![4],
        )
    }

    fn small_tables() -> ProjectTables {
        ProjectTables {
            predecessors: vec![vec![], vec![0]],
            renewable: vec![vec![vec![2, 1]], vec![vec![1, 1], vec![3, 0]]],
            durations: vec![vec![2], vec![4, 1]],
            fixed_costs: vec![vec![100.0], vec![50.0, 80.0]],
            non_renewable: vec![vec![vec![1]], vec![vec![2], vec![0]]],
            non_renewable_costs: vec![10.0],
            capacities: vec![5, 5],
        }
    }

    #[test]
    fn test_from_tables_derives_costs() {
        let problem = ProblemData::from_tables(&small_tables()).unwrap();
        assert_eq!(problem.activity_count(), 2);
        assert_eq!(problem.resource_count(), 2);
        assert_eq!(problem.mode_counts(), vec![1, 2]);
        assert_eq!(problem.mode(0, 0).unwrap().cost, 110.0);
        assert_eq!(problem.mode(1, 0).unwrap().cost, 70.0);
        assert_eq!(problem.mode(1, 1).unwrap().cost, 80.0);
        assert_eq!(problem.mode(1, 1).unwrap().original_index, 1);
        assert_eq!(problem.resource_types, vec![0, 1]);
    }

    #[test]
    fn test_from_tables_without_non_renewable() {
        let mut tables = small_tables();
        tables.non_renewable.clear();
        let problem = ProblemData::from_tables(&tables).unwrap();
        assert_eq!(problem.mode(0, 0).unwrap().cost, 100.0);
    }

    #[test]
    fn test_from_tables_shape_mismatch() {
        let mut tables = small_tables();
        tables.fixed_costs[1].pop();
        let err = ProblemData::from_tables(&tables).unwrap_err();
        match err {
            MrcpspError::InvalidProblem(errors) => {
                assert!(errors
                    .iter()
                    .any(|e| e.kind == ValidationErrorKind::DimensionMismatch));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_tables_row_count_mismatch() {
        let mut tables = small_tables();
        tables.durations.pop();
        assert!(matches!(
            ProblemData::from_tables(&tables),
            Err(MrcpspError::InvalidProblem(_))
        ));
    }

    #[test]
    fn test_mode_out_of_range() {
        let problem = diamond();
        assert_eq!(
            problem.mode(1, 2).unwrap_err(),
            MrcpspError::ModeOutOfRange {
                activity: 1,
                mode: 2,
                available: 2
            }
        );
    }

    #[test]
    fn test_successors() {
        let succ = diamond().successors();
        assert_eq!(succ[0], vec![1, 2]);
        assert_eq!(succ[1], vec![3]);
        assert!(succ[3].is_empty());
    }

    #[test]
    fn test_topological_order() {
        let order = diamond().topological_order().unwrap();
        let pos = |a: usize| order.iter().position(|&x| x == a).unwrap();
        assert!(pos(0) < pos(1));
        assert!(pos(0) < pos(2));
        assert!(pos(2) < pos(3));
    }

    #[test]
    fn test_topological_order_cycle() {
        let mut problem = diamond();
        problem.activities[0].predecessors.push(3);
        assert!(problem.topological_order().is_none());
    }

    #[test]
    fn test_critical_path_length() {
        let problem = diamond();
        // 0(2) → 2(5) → 3(1)
        assert_eq!(problem.critical_path_length(&[0, 0, 0, 0]).unwrap(), 8);
        assert_eq!(problem.critical_path_length(&[0, 1, 0, 0]).unwrap(), 8);
    }

    #[test]
    fn test_serde_roundtrip() {
        let problem = diamond();
        let json = serde_json::to_string(&problem).unwrap();
        let back: ProblemData = serde_json::from_str(&json).unwrap();
        assert_eq!(problem, back);
    }
}
