//! MRCPSP problem facade for an external multi-objective search engine.
//!
//! Bundles a preprocessed instance with its configuration and exposes
//! the primitives an evolutionary engine needs: candidate generation,
//! mutation, and evaluation. Population management, crossover, and
//! Pareto ranking stay with the engine.

use rand::Rng;
use tracing::info;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::chromosome::{swap_key_mutation, Candidate};
use super::decoder::decode;
use super::objective::{evaluate, ObjectiveBounds, Objectives};
use crate::config::{EngineConfig, ObjectiveSense};
use crate::error::Result;
use crate::models::{ProblemData, Schedule};
use crate::preprocess::preprocess;

/// A preprocessed MRCPSP instance ready for search.
///
/// Immutable after construction, so one instance can be shared by
/// reference across evaluation threads.
///
/// # Example
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_mrcpsp::config::EngineConfig;
/// use u_mrcpsp::ga::MrcpspProblem;
/// use u_mrcpsp::instances;
///
/// let problem = MrcpspProblem::new(instances::m561_10(), EngineConfig::default()).unwrap();
/// let mut rng = SmallRng::seed_from_u64(42);
/// let candidate = problem.generate(&mut rng);
/// let [makespan, cost] = problem.evaluate(&candidate).unwrap();
/// assert!(makespan > 0.0 && cost > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct MrcpspProblem {
    problem: ProblemData,
    config: EngineConfig,
    bounds: Option<ObjectiveBounds>,
}

impl MrcpspProblem {
    /// Validates `config`, preprocesses `raw`, and precomputes
    /// normalization bounds when maximization is configured.
    ///
    /// # Errors
    /// Configuration errors, preprocessing errors, and degenerate bounds
    /// are all reported here, before any candidate is evaluated.
    pub fn new(raw: ProblemData, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let problem = preprocess(raw)?;
        let bounds = match config.sense {
            ObjectiveSense::Minimize => None,
            ObjectiveSense::Maximize => Some(ObjectiveBounds::from_problem(&problem)?),
        };

        info!(
            activities = problem.activity_count(),
            resources = problem.resource_count(),
            sense = ?config.sense,
            "problem ready"
        );

        Ok(Self {
            problem,
            config,
            bounds,
        })
    }

    /// The preprocessed instance.
    pub fn data(&self) -> &ProblemData {
        &self.problem
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Normalization bounds, present when maximization is configured.
    pub fn bounds(&self) -> Option<&ObjectiveBounds> {
        self.bounds.as_ref()
    }

    /// Creates a random candidate.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Candidate {
        Candidate::random(&self.problem, rng)
    }

    /// Mutates a candidate in place with the configured rate.
    pub fn mutate<R: Rng>(&self, candidate: &mut Candidate, rng: &mut R) {
        swap_key_mutation(candidate, self.config.mutation_rate, rng);
    }

    /// Decodes a candidate into a schedule.
    pub fn decode(&self, candidate: &Candidate) -> Result<Schedule> {
        decode(candidate, &self.problem)
    }

    /// Raw `(makespan, cost)` regardless of the configured sense.
    pub fn objectives(&self, candidate: &Candidate) -> Result<Objectives> {
        evaluate(candidate, &self.problem)
    }

    /// Evaluates a candidate in the configured sense.
    ///
    /// Returns `[makespan, cost]` for [`ObjectiveSense::Minimize`] and
    /// `[time, cost]` fitness for [`ObjectiveSense::Maximize`].
    pub fn evaluate(&self, candidate: &Candidate) -> Result<[f64; 2]> {
        let objectives = self.objectives(candidate)?;
        Ok(match &self.bounds {
            Some(bounds) => bounds.normalize(objectives).to_array(),
            None => objectives.to_array(),
        })
    }

    /// Evaluates many candidates; results keep the input order.
    ///
    /// Runs on the rayon thread pool when the `parallel` feature is on.
    pub fn evaluate_batch(&self, candidates: &[Candidate]) -> Vec<Result<[f64; 2]>> {
        #[cfg(feature = "parallel")]
        {
            candidates.par_iter().map(|c| self.evaluate(c)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            candidates.iter().map(|c| self.evaluate(c)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MrcpspError;
    use crate::instances;
    use crate::models::{Activity, Mode};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_new_preprocesses() {
        let problem = MrcpspProblem::new(instances::m561_10(), EngineConfig::default()).unwrap();
        // Activity 10 mode 0 needs 19 of resource 0
        assert_eq!(problem.data().mode_count(10), 4);
        assert!(problem.bounds().is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::default().with_mutation_rate(-0.1);
        assert!(matches!(
            MrcpspProblem::new(instances::m561_10(), config),
            Err(MrcpspError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_degenerate_bounds_rejected_up_front() {
        let raw = ProblemData::new(
            vec![Activity::new().with_mode(Mode::new(vec![1], 2, 5.0))],
            vec![1],
        );
        let config = EngineConfig::default().with_sense(ObjectiveSense::Maximize);
        assert!(matches!(
            MrcpspProblem::new(raw.clone(), config),
            Err(MrcpspError::DegenerateBounds { .. })
        ));
        // Minimization does not need bounds
        assert!(MrcpspProblem::new(raw, EngineConfig::default()).is_ok());
    }

    #[test]
    fn test_evaluate_senses() {
        let min = MrcpspProblem::new(instances::m561_10(), EngineConfig::default()).unwrap();
        let max = MrcpspProblem::new(
            instances::m561_10(),
            EngineConfig::default().with_sense(ObjectiveSense::Maximize),
        )
        .unwrap();

        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..20 {
            let c = min.generate(&mut rng);
            let [makespan, cost] = min.evaluate(&c).unwrap();
            let [time, cost_fit] = max.evaluate(&c).unwrap();
            assert!(makespan >= 1.0 && cost > 0.0);
            assert!((0.0..=1.0).contains(&time));
            assert!((0.0..=1.0).contains(&cost_fit));
        }
    }

    #[test]
    fn test_mutate_keeps_modes() {
        let problem = MrcpspProblem::new(
            instances::m561_10(),
            EngineConfig::default().with_mutation_rate(1.0),
        )
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(5);
        let original = problem.generate(&mut rng);
        let mut c = original.clone();
        problem.mutate(&mut c, &mut rng);

        assert_eq!(c.modes, original.modes);
        assert_ne!(c.keys, original.keys);
        assert!(c.is_valid(problem.data()));
    }

    #[test]
    fn test_evaluate_batch_order() {
        let problem = MrcpspProblem::new(instances::m561_10(), EngineConfig::default()).unwrap();
        let mut rng = SmallRng::seed_from_u64(9);
        let candidates: Vec<Candidate> = (0..16).map(|_| problem.generate(&mut rng)).collect();

        let batch = problem.evaluate_batch(&candidates);
        assert_eq!(batch.len(), candidates.len());
        for (c, result) in candidates.iter().zip(batch) {
            assert_eq!(result.unwrap(), problem.evaluate(c).unwrap());
        }
    }
}
