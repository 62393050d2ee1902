// =========================================================================
// FALSIFY-MX: frame matrix contract (row access and stride subsampling)
// =========================================================================

use super::*;

/// FALSIFY-MX-001: Stride 1 is the identity
#[test]
fn falsify_mx_001_stride_one_identity() {
    let a = Matrix::from_vec(3, 2, vec![1.0_f32, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("valid");
    let b = a.every_nth_row(1).expect("stride 1");
    assert_eq!(a, b, "FALSIFIED MX-001: stride 1 changed the matrix");
}

/// FALSIFY-MX-002: Striding keeps the column count
#[test]
fn falsify_mx_002_stride_keeps_columns() {
    let a = Matrix::from_vec(7, 3, vec![0.0_f32; 21]).expect("valid");
    let b = a.every_nth_row(3).expect("stride 3");
    assert_eq!(
        b.shape(),
        (3, 3),
        "FALSIFIED MX-002: shape={:?}, expected (3,3)",
        b.shape()
    );
}

/// FALSIFY-MX-003: Row iteration visits rows in order
#[test]
fn falsify_mx_003_rows_in_order() {
    let a = Matrix::from_rows(&[vec![1.0_f32, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]]).expect("valid");
    let firsts: Vec<f32> = a.rows().map(|r| r[0]).collect();
    assert_eq!(firsts, vec![1.0, 3.0, 5.0], "FALSIFIED MX-003: rows out of order");
}

mod matrix_proptest_falsify {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(30))]

        /// FALSIFY-MX-002-prop: Strided row k equals original row k * stride
        #[test]
        fn falsify_mx_002_prop_strided_rows(
            rows in 0..=20usize,
            cols in 1..=4usize,
            stride in 1..=6usize,
        ) {
            let data: Vec<f32> = (0..rows * cols).map(|i| i as f32).collect();
            let a = Matrix::from_vec(rows, cols, data).expect("valid");
            let b = a.every_nth_row(stride).expect("stride >= 1");

            prop_assert_eq!(b.n_rows(), rows.div_ceil(stride));
            for k in 0..b.n_rows() {
                prop_assert_eq!(b.row(k), a.row(k * stride), "FALSIFIED MX-002-prop: row {}", k);
            }
        }
    }
}
