// =========================================================================
// FALSIFY-KF: KFold cross-validation contract over trajectory indices
//
// References:
//   - Stone (1974) "Cross-Validatory Choice and Assessment of Predictions"
// =========================================================================

use super::*;

/// FALSIFY-KF-001: K-Fold produces exactly K splits
#[test]
fn falsify_kf_001_produces_k_splits() {
    let splits = KFold::new(5).split(100).expect("valid");

    assert_eq!(
        splits.len(),
        5,
        "FALSIFIED KF-001: splits={}, expected 5",
        splits.len()
    );
}

/// FALSIFY-KF-002: Every trajectory appears in exactly one test fold
#[test]
fn falsify_kf_002_every_trajectory_in_one_test_fold() {
    let splits = KFold::new(5).with_random_state(3).split(20).expect("valid");

    let mut test_counts = vec![0usize; 20];
    for split in &splits {
        for &idx in &split.test {
            test_counts[idx] += 1;
        }
    }

    for (i, &count) in test_counts.iter().enumerate() {
        assert_eq!(
            count, 1,
            "FALSIFIED KF-002: trajectory {i} appeared in {count} test folds (expected 1)"
        );
    }
}

/// FALSIFY-KF-003: Train + test indices cover all trajectories per fold
#[test]
fn falsify_kf_003_train_test_cover_all() {
    let n = 17; // non-divisible by K to test remainder handling
    let splits = KFold::new(4).split(n).expect("valid");

    for (fold_idx, split) in splits.iter().enumerate() {
        let mut all: Vec<usize> = split.train.iter().chain(split.test.iter()).copied().collect();
        all.sort_unstable();
        all.dedup();

        assert_eq!(
            all.len(),
            n,
            "FALSIFIED KF-003: fold {fold_idx} covers {} trajectories, expected {n}",
            all.len()
        );
    }
}

/// FALSIFY-KF-004: Train and test sets are disjoint within each fold
#[test]
fn falsify_kf_004_train_test_disjoint() {
    use std::collections::HashSet;

    let splits = KFold::new(3).split(30).expect("valid");

    for (fold_idx, split) in splits.iter().enumerate() {
        let train_set: HashSet<usize> = split.train.iter().copied().collect();
        let test_set: HashSet<usize> = split.test.iter().copied().collect();

        let overlap = train_set.intersection(&test_set).count();
        assert_eq!(
            overlap, 0,
            "FALSIFIED KF-004: fold {fold_idx} has {overlap}-trajectory overlap between train/test"
        );
    }
}

/// FALSIFY-KF-005: More folds than trajectories is rejected
#[test]
fn falsify_kf_005_more_folds_than_trajectories_rejected() {
    let result = KFold::new(11).split(10);
    assert!(
        matches!(result, Err(SelectError::InsufficientTrajectories { .. })),
        "FALSIFIED KF-005: K > N was accepted"
    );
}

mod kf_proptest_falsify {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        /// FALSIFY-KF-001-prop: KFold produces exactly K disjoint, exhaustive test sets
        #[test]
        fn falsify_kf_001_prop_partition(
            k in 2..=10usize,
            n in 10..=50usize,
            seed in proptest::option::of(0u64..1000),
        ) {
            let mut kfold = KFold::new(k);
            if let Some(seed) = seed {
                kfold = kfold.with_random_state(seed);
            }
            let splits = kfold.split(n).expect("K <= N");
            prop_assert_eq!(splits.len(), k, "FALSIFIED KF-001-prop: splits={} != k={}", splits.len(), k);

            let mut test_counts = vec![0usize; n];
            for split in &splits {
                prop_assert!(!split.test.is_empty());
                prop_assert!(!split.train.is_empty());
                for &idx in &split.test {
                    test_counts[idx] += 1;
                }
            }
            prop_assert!(test_counts.iter().all(|&c| c == 1), "FALSIFIED KF-002-prop: {:?}", test_counts);
        }

        /// FALSIFY-KF-005-prop: K > N always fails before splitting
        #[test]
        fn falsify_kf_005_prop_k_exceeds_n(
            n in 0..=20usize,
            extra in 1..=5usize,
        ) {
            let k = (n + extra).max(2);
            prop_assert!(KFold::new(k).split(n).is_err());
        }
    }
}
