//! Multi-mode resource-constrained project scheduling (MRCPSP) core.
//!
//! Models project instances and evaluates random-key candidate schedules
//! against two objectives, makespan and cost. The multi-objective search
//! loop itself (population, Pareto ranking, crossover) is provided by an
//! external engine that uses the primitives in [`ga`].
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Activity`, `Mode`, `ProblemData`, `Schedule`
//! - **`validation`**: Instance integrity checks and schedule soundness checks
//! - **`preprocess`**: Fixed-point reduction of infeasible modes, redundant
//!   resources, and dominated modes
//! - **`ga`**: Candidate encoding, serial schedule decoding, objectives,
//!   mutation, and the [`ga::MrcpspProblem`] facade
//! - **`config`**: Objective sense and mutation rate
//! - **`instances`**: Reference benchmark data
//!
//! # Pipeline
//!
//! ```text
//! tables → ProblemData → preprocess → (generate/mutate) → decode → Schedule → objectives
//! ```
//!
//! # References
//!
//! - Talbot (1982), "Resource-Constrained Project Scheduling with Time-Resource Tradeoffs"
//! - Kolisch & Hartmann (1999), "Heuristic Algorithms for the RCPSP"
//! - Bean (1994), "Genetic Algorithms and Random Keys for Sequencing and Optimization"

pub mod config;
pub mod error;
pub mod ga;
pub mod instances;
pub mod models;
pub mod preprocess;
pub mod validation;

pub use error::{MrcpspError, Result};
