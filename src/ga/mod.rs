//! GA-facing encoding, decoding, and evaluation for MRCPSP.
//!
//! Supplies the problem-side primitives an external multi-objective
//! evolutionary engine (e.g. NSGA-II) needs. Uses a random-key/mode
//! dual-vector encoding.
//!
//! # Encoding
//!
//! - **Keys**: one priority in `[0, 1)` per activity; decoded by a serial
//!   schedule generation scheme that admits ready activities by
//!   descending key.
//! - **Modes**: one mode index per activity.
//!
//! # Submodules
//!
//! - [`decoder`]: Serial schedule generation
//! - [`objective`]: Makespan/cost and their normalized variants
//!
//! # Reference
//! - Bean (1994), "Genetic Algorithms and Random Keys for Sequencing and Optimization"
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"

mod chromosome;
pub mod decoder;
pub mod objective;
mod problem;

pub use chromosome::{generate, swap_key_mutation, Candidate};
pub use decoder::decode;
pub use objective::{
    evaluate, evaluate_normalized, makespan, total_cost, NormalizedFitness, ObjectiveBounds,
    Objectives,
};
pub use problem::MrcpspProblem;
