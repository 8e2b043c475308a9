use rand::rngs::SmallRng;
use rand::SeedableRng;
use u_mrcpsp::config::{EngineConfig, ObjectiveSense};
use u_mrcpsp::ga::{decode, evaluate, Candidate, MrcpspProblem, ObjectiveBounds};
use u_mrcpsp::instances;
use u_mrcpsp::models::ProblemData;
use u_mrcpsp::preprocess::{preprocess, preprocess_with_stats};
use u_mrcpsp::validation::check_schedule;

fn descending_keys(n: usize) -> Vec<f64> {
    (0..n).map(|i| 1.0 - 0.05 * i as f64).collect()
}

fn reduced() -> ProblemData {
    preprocess(instances::m561_10()).unwrap()
}

#[test]
fn test_preprocessing_removes_only_oversized_mode() {
    let (problem, stats) = preprocess_with_stats(instances::m561_10()).unwrap();

    assert_eq!(stats.infeasible_modes, 1);
    assert_eq!(stats.redundant_resources, 0);
    assert_eq!(stats.dominated_modes, 0);
    assert_eq!(problem.capacities, vec![15, 15]);
    assert_eq!(problem.mode_count(10), 4);
    assert_eq!(problem.activities[10].modes[0].original_index, 1);
    assert_eq!(problem.mode_counts().iter().sum::<usize>(), 16 * 5 - 1);
}

#[test]
fn test_preprocessing_keeps_mode_data() {
    let raw = instances::m561_10();
    let problem = reduced();
    for (act, raw_act) in problem.activities.iter().zip(&raw.activities) {
        assert_eq!(act.predecessors, raw_act.predecessors);
        for mode in &act.modes {
            let original = &raw_act.modes[mode.original_index];
            assert_eq!(mode.duration, original.duration);
            assert_eq!(mode.cost, original.cost);
            assert_eq!(mode.resources, original.resources);
        }
    }
}

#[test]
fn test_preprocessing_is_idempotent() {
    let once = reduced();
    assert_eq!(preprocess(once.clone()).unwrap(), once);
}

#[test]
fn test_priority_in_index_order_all_first_modes() {
    let problem = reduced();
    let candidate = Candidate::new(descending_keys(16), vec![0; 16]);
    let schedule = decode(&candidate, &problem).unwrap();

    assert_eq!(schedule.len(), 16);
    assert_eq!(schedule.entries[0].activity, 0);
    assert_eq!(schedule.start_of(0), Some(0));
    assert!(check_schedule(&schedule, &problem).is_empty());

    let starts: Vec<(usize, u32)> = schedule
        .entries
        .iter()
        .map(|e| (e.activity, e.start))
        .collect();
    assert_eq!(
        starts,
        vec![
            (0, 0),
            (1, 0),
            (2, 3),
            (3, 4),
            (4, 6),
            (5, 7),
            (8, 7),
            (6, 10),
            (7, 12),
            (9, 16),
            (11, 16),
            (10, 18),
            (12, 18),
            (13, 22),
            (15, 22),
            (14, 24),
        ]
    );

    // Capacity binds on this instance, so the makespan exceeds the
    // precedence-only lower bound
    let modes = vec![0; 16];
    assert_eq!(problem.critical_path_length(&modes).unwrap(), 13);
    assert_eq!(schedule.makespan(), 25);

    let objectives = evaluate(&candidate, &problem).unwrap();
    assert_eq!(objectives.makespan, 25);
    assert_eq!(objectives.cost, 5393.0);
}

#[test]
fn test_uncapacitated_makespan_is_critical_path() {
    let mut raw = instances::m561_10();
    raw.capacities = vec![1000, 1000];
    let problem = preprocess(raw).unwrap();

    // No resource can bind, so every type is dropped and only the
    // shortest mode of each activity survives
    assert!(problem.capacities.is_empty());
    assert!(problem.mode_counts().iter().all(|&m| m == 1));

    let modes = vec![0; 16];
    let critical = problem.critical_path_length(&modes).unwrap();
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..20 {
        let candidate = Candidate::random(&problem, &mut rng);
        let schedule = decode(&candidate, &problem).unwrap();
        assert_eq!(schedule.makespan(), critical);
        assert_eq!(schedule.start_of(0), Some(0));
    }
}

#[test]
fn test_normalization_bounds() {
    let problem = reduced();
    let bounds = ObjectiveBounds::from_problem(&problem).unwrap();
    assert_eq!(bounds.t_max, 135);
    assert_eq!(bounds.t_min, 4);
    assert_eq!(bounds.c_max, 5996.0);
    assert_eq!(bounds.c_min, 4858.0);
}

#[test]
fn test_maximize_facade_matches_bounds() {
    let engine = MrcpspProblem::new(
        instances::m561_10(),
        EngineConfig::default().with_sense(ObjectiveSense::Maximize),
    )
    .unwrap();
    let candidate = Candidate::new(descending_keys(16), vec![0; 16]);

    let [time, cost] = engine.evaluate(&candidate).unwrap();
    assert!((time - 110.0 / 131.0).abs() < 1e-12);
    assert!((cost - 603.0 / 1138.0).abs() < 1e-12);
}

#[test]
fn test_evaluation_is_deterministic() {
    let engine = MrcpspProblem::new(instances::m561_10(), EngineConfig::default()).unwrap();
    let mut rng = SmallRng::seed_from_u64(1234);
    for _ in 0..50 {
        let candidate = engine.generate(&mut rng);
        assert_eq!(
            engine.evaluate(&candidate).unwrap(),
            engine.evaluate(&candidate).unwrap()
        );
    }
}

#[test]
fn test_random_search_loop_stays_sound() {
    let engine = MrcpspProblem::new(
        instances::m561_10(),
        EngineConfig::default().with_mutation_rate(0.5),
    )
    .unwrap();
    let mut rng = SmallRng::seed_from_u64(99);
    let mut candidate = engine.generate(&mut rng);

    for _ in 0..200 {
        engine.mutate(&mut candidate, &mut rng);
        let schedule = engine.decode(&candidate).unwrap();
        assert!(check_schedule(&schedule, engine.data()).is_empty());

        let objectives = engine.objectives(&candidate).unwrap();
        assert_eq!(objectives.makespan, schedule.makespan());
        assert!(objectives.makespan <= 135);
    }
}
