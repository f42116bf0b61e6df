//! Reconstruction and factor-property tests
//!
//! Checks Q·R = A, orthogonality of Q, bit-exact triangularity of R, and the
//! relationship between complete and reduced factors on square, tall, and
//! wide inputs.

use householder_qr::{QrDecomposition, QrMode};
use ndarray::{Array2, array};

const RTOL: f64 = 1e-8;
// An absolute tolerance matters for entries that are exactly zero
const ATOL: f64 = 1e-12;

fn decompose(matrix: Array2<f64>, mode: QrMode) -> QrDecomposition<f64> {
    QrDecomposition::new(matrix.into_dyn(), mode).unwrap()
}

/// Hilbert matrix: H[i,j] = 1 / (i + j + 1), ill-conditioned but dense
fn hilbert(rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(i, j)| 1.0 / ((i + j + 1) as f64))
}

fn assert_all_close(actual: &Array2<f64>, expected: &Array2<f64>) {
    assert_eq!(actual.dim(), expected.dim());
    for ((i, j), &a) in actual.indexed_iter() {
        let e = expected[[i, j]];
        assert!(
            (a - e).abs() <= ATOL + RTOL * e.abs(),
            "mismatch at ({}, {}): {} vs {}",
            i,
            j,
            a,
            e
        );
    }
}

fn assert_reconstructs(matrix: &Array2<f64>, mode: QrMode) {
    let mut decomposition = decompose(matrix.clone(), mode);
    let (q, r) = decomposition.qr().unwrap();

    assert_all_close(&q.dot(r), matrix);
}

fn assert_orthonormal_columns(q: &Array2<f64>) {
    let qtq = q.t().dot(q);
    for ((i, j), &value) in qtq.indexed_iter() {
        let expected = if i == j { 1.0 } else { 0.0 };
        assert!(
            (value - expected).abs() < 1e-10,
            "QᵗQ deviates from identity at ({}, {}): {}",
            i,
            j,
            value
        );
    }
}

fn square_sample() -> Array2<f64> {
    array![[2.0, -2.0, 18.0], [2.0, 1.0, 0.0], [1.0, 2.0, 0.0]]
}

fn tall_sample() -> Array2<f64> {
    array![
        [6.0, 2.0, 8.0],
        [5.0, 2.0, 4.0],
        [8.0, 0.0, 3.0],
        [8.0, 9.0, 1.0],
        [6.0, 0.0, 6.0]
    ]
}

fn wide_sample() -> Array2<f64> {
    array![
        [2.0, 3.0, 7.0, 1.0],
        [1.0, 3.0, 2.0, 4.0],
        [7.0, 9.0, 0.0, 2.0]
    ]
}

#[test]
fn test_reconstruction_square() {
    assert_reconstructs(&square_sample(), QrMode::Complete);
    assert_reconstructs(&square_sample(), QrMode::Reduced);
}

#[test]
fn test_reconstruction_tall() {
    assert_reconstructs(&tall_sample(), QrMode::Complete);
}

#[test]
fn test_reconstruction_wide() {
    assert_reconstructs(&wide_sample(), QrMode::Complete);
    assert_reconstructs(&wide_sample(), QrMode::Reduced);
}

#[test]
fn test_reconstruction_hilbert() {
    assert_reconstructs(&hilbert(6, 6), QrMode::Complete);
    assert_reconstructs(&hilbert(8, 5), QrMode::Complete);
}

#[test]
fn test_reduced_reconstruction_tall() {
    // For a tall matrix the reduced factors still multiply back to A
    let matrix = tall_sample();
    let mut decomposition = decompose(matrix.clone(), QrMode::Reduced);
    let (q, r) = decomposition.qr().unwrap();

    assert_eq!(q.dim(), (5, 3));
    assert_eq!(r.dim(), (3, 3));
    assert_all_close(&q.dot(r), &matrix);
}

#[test]
fn test_q_is_orthogonal() {
    for matrix in [square_sample(), tall_sample(), wide_sample(), hilbert(7, 7)] {
        let mut decomposition = decompose(matrix, QrMode::Complete);
        assert_orthonormal_columns(decomposition.q_matrix().unwrap());
    }
}

#[test]
fn test_reduced_q_has_orthonormal_columns() {
    let mut decomposition = decompose(tall_sample(), QrMode::Reduced);
    assert_orthonormal_columns(decomposition.q_matrix().unwrap());
}

#[test]
fn test_r_is_exactly_upper_triangular() {
    for matrix in [square_sample(), tall_sample(), wide_sample()] {
        let mut decomposition = decompose(matrix, QrMode::Complete);
        let r = decomposition.r_matrix().unwrap();

        for ((i, j), &value) in r.indexed_iter() {
            if i > j {
                assert_eq!(value, 0.0, "nonzero below diagonal at ({}, {})", i, j);
            }
        }
    }
}

#[test]
fn test_tall_r_diagonal_values() {
    // First column of the tall sample has norm exactly 15; the later
    // diagonal entries are regression anchors.
    let mut decomposition = decompose(tall_sample(), QrMode::Complete);
    let r = decomposition.r_matrix().unwrap();

    assert!((r[[0, 0]] - 15.0).abs() < 1e-10);
    assert!((r[[1, 1]] - (-7.0518713)).abs() < 1e-6);
    assert!((r[[2, 2]] - 5.69104299).abs() < 1e-6);
}

#[test]
fn test_modes_agree_on_square_input() {
    let mut complete = decompose(square_sample(), QrMode::Complete);
    let mut reduced = decompose(square_sample(), QrMode::Reduced);

    let (qc, rc) = complete.qr().unwrap();
    let (qc, rc) = (qc.clone(), rc.clone());
    let (qr, rr) = reduced.qr().unwrap();

    assert_eq!(&qc, qr);
    assert_eq!(&rc, rr);
}

#[test]
fn test_reduced_factors_are_prefix_of_complete_on_tall_input() {
    let mut complete = decompose(tall_sample(), QrMode::Complete);
    let mut reduced = decompose(tall_sample(), QrMode::Reduced);

    let (qc, rc) = complete.qr().unwrap();
    let (qc, rc) = (qc.clone(), rc.clone());
    let (qr, rr) = reduced.qr().unwrap();

    assert_eq!(qc.dim(), (5, 5));
    assert_eq!(rc.dim(), (5, 3));
    assert_eq!(qr.dim(), (5, 3));
    assert_eq!(rr.dim(), (3, 3));

    // Bit-identical prefixes: both instances ran the same sweep
    assert_eq!(qc.slice(ndarray::s![.., ..3]).to_owned(), *qr);
    assert_eq!(rc.slice(ndarray::s![..3, ..]).to_owned(), *rr);
}

#[test]
fn test_integer_valued_input() {
    let matrix = array![[3.0, 4.0, 3.0], [4.0, 3.0, 3.0], [2.0, 3.0, 2.0]];
    assert_reconstructs(&matrix, QrMode::Complete);

    let mut decomposition = decompose(matrix, QrMode::Complete);
    assert_orthonormal_columns(decomposition.q_matrix().unwrap());
}

#[test]
fn test_string_mode_constructor() {
    let mut decomposition =
        QrDecomposition::with_mode_token(tall_sample().into_dyn(), "reduced").unwrap();
    assert_eq!(decomposition.mode(), QrMode::Reduced);

    let (q, r) = decomposition.qr().unwrap();
    assert_eq!(q.dim(), (5, 3));
    assert_eq!(r.dim(), (3, 3));
}

#[test]
fn test_separate_instances_produce_identical_factors() {
    let mut first = decompose(square_sample(), QrMode::Complete);
    let mut second = decompose(square_sample(), QrMode::Complete);

    let q1 = first.q_matrix().unwrap().clone();
    let q2 = second.q_matrix().unwrap();

    assert_eq!(&q1, q2);
}
