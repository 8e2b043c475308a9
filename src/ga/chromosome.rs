//! Random-key/mode dual-vector candidate for MRCPSP.
//!
//! # Encoding
//!
//! A candidate consists of two vectors parallel to the activity list:
//! - **Keys**: one real priority per activity, drawn from `[0, 1)`.
//!   Among activities ready on the same day, higher keys are scheduled
//!   first.
//! - **Modes**: one mode index per activity, `modes[i] < Mi`.
//!
//! # Reference
//! Bean (1994), "Genetic Algorithms and Random Keys for Sequencing and
//! Optimization"

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{MrcpspError, Result};
use crate::models::ProblemData;

/// Random-key/mode candidate solution.
///
/// Owned by whoever creates it; decoding and evaluation only borrow it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Priority key per activity (higher = scheduled earlier).
    pub keys: Vec<f64>,
    /// Chosen mode per activity.
    pub modes: Vec<usize>,
}

impl Candidate {
    /// Creates a candidate from explicit keys and modes.
    pub fn new(keys: Vec<f64>, modes: Vec<usize>) -> Self {
        Self { keys, modes }
    }

    /// Creates a random candidate.
    ///
    /// Draws one uniform key in `[0, 1)` and one uniform mode index per
    /// activity, independently. Activities without modes get mode 0, which
    /// is then reported as out of range when the candidate is used.
    pub fn random<R: Rng>(problem: &ProblemData, rng: &mut R) -> Self {
        let n = problem.activity_count();
        let keys = (0..n).map(|_| rng.random::<f64>()).collect();
        let modes = problem
            .activities
            .iter()
            .map(|act| rng.random_range(0..act.mode_count().max(1)))
            .collect();
        Self { keys, modes }
    }

    /// Number of activities encoded.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the candidate encodes no activities.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Priority key of an activity.
    pub fn key(&self, activity: usize) -> Option<f64> {
        self.keys.get(activity).copied()
    }

    /// Mode index of an activity.
    pub fn mode(&self, activity: usize) -> Option<usize> {
        self.modes.get(activity).copied()
    }

    /// Checks lengths and mode ranges against `problem`.
    ///
    /// External crossover operators should keep every candidate passing
    /// this check.
    pub fn validate(&self, problem: &ProblemData) -> Result<()> {
        let n = problem.activity_count();
        if self.keys.len() != n || self.modes.len() != n {
            return Err(MrcpspError::CandidateLengthMismatch {
                expected: n,
                keys: self.keys.len(),
                modes: self.modes.len(),
            });
        }
        for (activity, &mode) in self.modes.iter().enumerate() {
            let available = problem.mode_count(activity);
            if mode >= available {
                return Err(MrcpspError::ModeOutOfRange {
                    activity,
                    mode,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Whether [`validate`](Self::validate) passes.
    pub fn is_valid(&self, problem: &ProblemData) -> bool {
        self.validate(problem).is_ok()
    }
}

/// Generates a random candidate for `problem`.
pub fn generate<R: Rng>(problem: &ProblemData, rng: &mut R) -> Candidate {
    Candidate::random(problem, rng)
}

// ======================== Mutation operators ========================

/// Key swap mutation: exchanges the priority keys of two activities.
///
/// Two activity indices are drawn uniformly; for candidates longer than
/// two they are distinct. With probability `rate` their keys are swapped.
/// Modes are never touched. On candidates of length ≤ 2 the indices may
/// coincide, which makes the swap a no-op.
pub fn swap_key_mutation<R: Rng>(candidate: &mut Candidate, rate: f64, rng: &mut R) {
    let len = candidate.keys.len();
    if len == 0 {
        return;
    }
    let i = rng.random_range(0..len);
    let mut j = rng.random_range(0..len);
    while i == j && len > 2 {
        j = rng.random_range(0..len);
    }
    if rng.random::<f64>() < rate {
        candidate.keys.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, Mode};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn sample_problem() -> ProblemData {
        ProblemData::new(
            vec![
                Activity::new()
                    .with_mode(Mode::new(vec![1], 1, 1.0))
                    .with_mode(Mode::new(vec![2], 2, 2.0)),
                Activity::new().with_mode(Mode::new(vec![1], 3, 1.0)),
                Activity::new()
                    .with_predecessor(0)
                    .with_mode(Mode::new(vec![1], 1, 1.0))
                    .with_mode(Mode::new(vec![1], 2, 1.0))
                    .with_mode(Mode::new(vec![3], 1, 1.0)),
                Activity::new().with_mode(Mode::new(vec![2], 2, 2.0)),
            ],
            vec![4],
        )
    }

    #[test]
    fn test_random_candidate() {
        let problem = sample_problem();
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..100 {
            let c = generate(&problem, &mut rng);
            assert_eq!(c.len(), 4);
            assert!(c.keys.iter().all(|&k| (0.0..1.0).contains(&k)));
            assert!(c.is_valid(&problem));
            assert_eq!(c.mode(1), Some(0));
        }
    }

    #[test]
    fn test_random_covers_all_modes() {
        let problem = sample_problem();
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            seen[Candidate::random(&problem, &mut rng).modes[2]] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_validate_length() {
        let problem = sample_problem();
        let c = Candidate::new(vec![0.1, 0.2], vec![0, 0, 0, 0]);
        assert_eq!(
            c.validate(&problem).unwrap_err(),
            MrcpspError::CandidateLengthMismatch {
                expected: 4,
                keys: 2,
                modes: 4
            }
        );
    }

    #[test]
    fn test_validate_mode_range() {
        let problem = sample_problem();
        let c = Candidate::new(vec![0.1; 4], vec![0, 1, 0, 0]);
        assert_eq!(
            c.validate(&problem).unwrap_err(),
            MrcpspError::ModeOutOfRange {
                activity: 1,
                mode: 1,
                available: 1
            }
        );
    }

    #[test]
    fn test_swap_mutation_rate_one() {
        let mut rng = SmallRng::seed_from_u64(42);
        let original = Candidate::new(vec![0.1, 0.2, 0.3, 0.4], vec![1, 0, 2, 0]);

        for _ in 0..50 {
            let mut c = original.clone();
            swap_key_mutation(&mut c, 1.0, &mut rng);

            // Exactly two keys moved, modes untouched
            let moved = c
                .keys
                .iter()
                .zip(&original.keys)
                .filter(|(a, b)| a != b)
                .count();
            assert_eq!(moved, 2);
            assert_eq!(c.modes, original.modes);

            let mut sorted = c.keys.clone();
            sorted.sort_by(f64::total_cmp);
            assert_eq!(sorted, original.keys);
        }
    }

    #[test]
    fn test_swap_mutation_rate_zero() {
        let mut rng = SmallRng::seed_from_u64(42);
        let original = Candidate::new(vec![0.1, 0.2, 0.3], vec![0, 0, 0]);
        let mut c = original.clone();
        for _ in 0..50 {
            swap_key_mutation(&mut c, 0.0, &mut rng);
        }
        assert_eq!(c, original);
    }

    #[test]
    fn test_swap_mutation_degenerate_lengths() {
        let mut rng = SmallRng::seed_from_u64(42);

        let mut empty = Candidate::new(vec![], vec![]);
        swap_key_mutation(&mut empty, 1.0, &mut rng);
        assert!(empty.is_empty());

        let mut single = Candidate::new(vec![0.5], vec![0]);
        swap_key_mutation(&mut single, 1.0, &mut rng);
        assert_eq!(single.keys, vec![0.5]);

        // Length 2: either swapped or a no-op
        let mut pair = Candidate::new(vec![0.1, 0.9], vec![0, 0]);
        swap_key_mutation(&mut pair, 1.0, &mut rng);
        assert!(pair.keys == vec![0.1, 0.9] || pair.keys == vec![0.9, 0.1]);
    }
}
