// =========================================================================
// FALSIFY-DS: descriptive statistics contract for fold-score aggregation
//
// References:
//   - Hyndman & Fan (1996) "Sample Quantiles in Statistical Packages"
// =========================================================================

use super::*;

/// FALSIFY-DS-001: Median of an odd-length slice is the middle value
#[test]
fn falsify_ds_001_median_odd() {
    let data = [5.0, 1.0, 3.0, 2.0, 4.0];
    let m = median(&data).expect("non-empty");

    assert!(
        (m - 3.0).abs() < 1e-12,
        "FALSIFIED DS-001: median={m}, expected 3.0"
    );
}

/// FALSIFY-DS-002: Median of an even-length slice averages the middle pair
#[test]
fn falsify_ds_002_median_even() {
    let data = [0.9, 1.4, 1.1, 1.2];
    let m = median(&data).expect("non-empty");

    assert!(
        (m - 1.15).abs() < 1e-12,
        "FALSIFIED DS-002: median={m}, expected 1.15"
    );
}

/// FALSIFY-DS-003: Quantile ordering: Q1 <= median <= Q3
#[test]
fn falsify_ds_003_quantile_ordering() {
    let data = [10.0, 2.0, 8.0, 4.0, 6.0, 1.0, 9.0, 3.0, 7.0, 5.0];
    let stats = DescriptiveStats::new(&data);

    let q1 = stats.quantile(0.25).expect("Q1");
    let med = stats.quantile(0.50).expect("median");
    let q3 = stats.quantile(0.75).expect("Q3");

    assert!(
        q1 <= med && med <= q3,
        "FALSIFIED DS-003: Q1={q1}, median={med}, Q3={q3} ordering violated"
    );
}

mod ds_proptest_falsify {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(50))]

        /// FALSIFY-DS-004-prop: median is invariant under permutation
        #[test]
        fn falsify_ds_004_prop_median_permutation_invariant(
            data in proptest::collection::vec(-100.0f64..100.0, 1..30),
            rotate in 0usize..30,
        ) {
            let mut shuffled = data.clone();
            shuffled.reverse();
            let k = rotate % shuffled.len();
            shuffled.rotate_left(k);

            let a = median(&data).expect("non-empty");
            let b = median(&shuffled).expect("non-empty");
            prop_assert_eq!(a, b, "FALSIFIED DS-004-prop: {} != {}", a, b);
        }

        /// FALSIFY-DS-005-prop: min <= median <= max
        #[test]
        fn falsify_ds_005_prop_median_bounded(
            data in proptest::collection::vec(-100.0f64..100.0, 1..30),
        ) {
            let stats = DescriptiveStats::new(&data);
            let m = stats.median().expect("non-empty");
            let lo = stats.min().expect("non-empty");
            let hi = stats.max().expect("non-empty");
            prop_assert!(lo <= m && m <= hi, "FALSIFIED DS-005-prop: {} not in [{}, {}]", m, lo, hi);
        }
    }
}
