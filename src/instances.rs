//! Reference benchmark instances.
//!
//! # Instances
//!
//! | Name | Activities | Modes | Renewable | Non-renewable |
//! |------|-----------|-------|-----------|---------------|
//! | [`m561_10`] | 16 | 5 | 2 (cap 15/15) | 2 (unit cost 19/13) |
//!
//! `m561_10` is a multi-mode instance with a fixed cost per mode on top of
//! the non-renewable consumption. One mode (activity 10, mode 0) exceeds
//! capacity, so the raw instance exercises preprocessing.

use crate::models::{ProblemData, ProjectTables};

/// Raw tables of the `m561_10` instance.
pub fn m561_10_tables() -> ProjectTables {
    ProjectTables {
        predecessors: vec![
            vec![],
            vec![],
            vec![],
            vec![0],
            vec![3],
            vec![1, 4],
            vec![3],
            vec![1],
            vec![1, 3],
            vec![5, 6, 7],
            vec![2, 7],
            vec![2, 7],
            vec![2, 5, 6],
            vec![0, 10, 11],
            vec![0, 10, 11],
            vec![8, 9, 12],
        ],
        renewable: vec![
            vec![vec![5, 5], vec![5, 5], vec![5, 5], vec![4, 5], vec![4, 5]],
            vec![vec![5, 10], vec![4, 8], vec![4, 6], vec![3, 6], vec![3, 3]],
            vec![vec![9, 9], vec![6, 8], vec![6, 8], vec![3, 7], vec![4, 6]],
            vec![vec![9, 8], vec![7, 8], vec![6, 8], vec![3, 6], vec![3, 5]],
            vec![vec![10, 9], vec![9, 9], vec![9, 6], vec![9, 6], vec![8, 4]],
            vec![vec![9, 5], vec![7, 4], vec![8, 4], vec![7, 3], vec![5, 2]],
            vec![vec![8, 10], vec![8, 7], vec![7, 8], vec![7, 7], vec![6, 6]],
            vec![vec![7, 9], vec![6, 9], vec![4, 8], vec![3, 7], vec![4, 7]],
            vec![vec![4, 9], vec![3, 9], vec![3, 8], vec![2, 8], vec![2, 8]],
            vec![vec![8, 2], vec![8, 2], vec![7, 2], vec![6, 2], vec![4, 2]],
            vec![vec![19, 9], vec![10, 7], vec![10, 8], vec![9, 4], vec![9, 1]],
            vec![vec![7, 2], vec![7, 2], vec![6, 2], vec![6, 1], vec![5, 1]],
            vec![vec![5, 7], vec![4, 7], vec![4, 5], vec![3, 5], vec![2, 3]],
            vec![vec![8, 9], vec![10, 9], vec![7, 9], vec![5, 6], vec![4, 7]],
            vec![vec![9, 6], vec![9, 6], vec![7, 5], vec![6, 5], vec![4, 5]],
            vec![vec![7, 5], vec![7, 4], vec![6, 4], vec![6, 4], vec![7, 4]],
        ],
        durations: vec![
            vec![3, 4, 4, 7, 9],
            vec![3, 4, 5, 6, 9],
            vec![1, 2, 4, 8, 8],
            vec![2, 2, 6, 8, 8],
            vec![1, 4, 5, 8, 9],
            vec![3, 7, 7, 8, 10],
            vec![2, 4, 4, 5, 6],
            vec![4, 5, 6, 10, 10],
            vec![1, 4, 5, 8, 10],
            vec![2, 5, 5, 7, 9],
            vec![1, 4, 4, 8, 9],
            vec![2, 3, 5, 9, 10],
            vec![2, 4, 7, 8, 10],
            vec![2, 2, 4, 5, 5],
            vec![1, 2, 5, 8, 9],
            vec![1, 2, 4, 4, 4],
        ],
        fixed_costs: vec![
            vec![300.0, 350.0, 375.0, 410.0, 450.0],
            vec![130.0, 140.0, 150.0, 160.0, 189.0],
            vec![40.0, 30.0, 70.0, 100.0, 95.0],
            vec![20.0, 20.0, 40.0, 65.0, 70.0],
            vec![100.0, 140.0, 150.0, 180.0, 169.0],
            vec![30.0, 55.0, 55.0, 60.0, 80.0],
            vec![120.0, 140.0, 145.0, 165.0, 140.0],
            vec![40.0, 50.0, 60.0, 80.0, 85.0],
            vec![20.0, 48.0, 65.0, 75.0, 90.0],
            vec![25.0, 35.0, 38.0, 50.0, 70.0],
            vec![100.0, 135.0, 140.0, 168.0, 185.0],
            vec![200.0, 300.0, 400.0, 500.0, 550.0],
            vec![40.0, 75.0, 100.0, 90.0, 110.0],
            vec![300.0, 300.0, 440.0, 500.0, 500.0],
            vec![120.0, 145.0, 175.0, 200.0, 220.0],
            vec![100.0, 130.0, 150.0, 155.0, 145.0],
        ],
        non_renewable: vec![
            vec![vec![8, 10], vec![6, 10], vec![7, 9], vec![5, 9], vec![3, 8]],
            vec![vec![3, 10], vec![3, 10], vec![2, 10], vec![1, 9], vec![1, 9]],
            vec![vec![10, 5], vec![9, 5], vec![9, 2], vec![7, 1], vec![7, 1]],
            vec![vec![9, 4], vec![10, 4], vec![9, 4], vec![6, 4], vec![7, 4]],
            vec![vec![9, 10], vec![9, 10], vec![8, 10], vec![8, 9], vec![7, 9]],
            vec![vec![7, 10], vec![7, 8], vec![7, 6], vec![7, 5], vec![6, 4]],
            vec![vec![5, 9], vec![4, 7], vec![5, 8], vec![4, 7], vec![2, 5]],
            vec![vec![9, 10], vec![7, 8], vec![6, 5], vec![5, 4], vec![4, 4]],
            vec![vec![9, 8], vec![9, 8], vec![8, 7], vec![8, 7], vec![7, 5]],
            vec![vec![6, 8], vec![6, 6], vec![6, 7], vec![3, 5], vec![2, 4]],
            vec![vec![9, 2], vec![8, 2], vec![7, 2], vec![6, 2], vec![6, 2]],
            vec![vec![7, 6], vec![6, 6], vec![6, 5], vec![5, 5], vec![4, 4]],
            vec![vec![6, 4], vec![5, 4], vec![5, 3], vec![5, 2], vec![4, 2]],
            vec![vec![7, 9], vec![8, 7], vec![7, 7], vec![5, 6], vec![6, 5]],
            vec![vec![4, 5], vec![3, 5], vec![2, 4], vec![2, 2], vec![1, 1]],
            vec![vec![9, 3], vec![7, 3], vec![3, 3], vec![5, 2], vec![4, 2]],
        ],
        non_renewable_costs: vec![19.0, 13.0],
        capacities: vec![15, 15],
    }
}

/// The raw `m561_10` instance (not preprocessed).
pub fn m561_10() -> ProblemData {
    ProblemData::assemble(&m561_10_tables())
}
