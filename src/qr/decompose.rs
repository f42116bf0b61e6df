//! QR engine: mode handling, the reflection sweep, factor caching, and the
//! floating-point residual diagnostic

use crate::precision::Precision;
use crate::qr::householder::build_reflection;
use crate::utils::embed::embed;
use crate::utils::norms::max_abs_strictly_lower;
use crate::utils::order::order10;
use ndarray::{Array2, ArrayD, Ix2, s};

/// Error types for QR decomposition
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("unrecognized mode `{0}`, expected `complete` or `reduced`")]
    UnrecognizedMode(String),

    #[error("expected a two-dimensional matrix, got a {0}-dimensional input")]
    NotTwoDimensional(usize),

    #[error("matrix is already upper triangular, nothing to decompose")]
    AlreadyTriangular,

    #[error("factors have not been computed yet, call qr() first")]
    NotYetComputed,
}

/// Requested shape of the factors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QrMode {
    /// Q is square (rows x rows), R has the shape of the input
    #[default]
    Complete,
    /// Q keeps the first min(rows, cols) columns, R the first min(rows, cols)
    /// rows
    Reduced,
}

impl QrMode {
    /// Parse a mode token as accepted by the string-mode constructor
    pub fn from_mode_token(mode: &str) -> Result<Self, QrError> {
        match mode {
            "complete" => Ok(Self::Complete),
            "reduced" => Ok(Self::Reduced),
            _ => Err(QrError::UnrecognizedMode(mode.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Reduced => "reduced",
        }
    }
}

impl std::fmt::Display for QrMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order-of-magnitude diagnostic for the subdiagonal entries discarded when
/// truncating the working matrix to the reported R
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FpErrorOrder {
    /// Every discarded entry was already exactly zero
    Exact,
    /// The largest discarded entry had magnitude in [10^k, 10^(k+1))
    Order(i32),
}

impl std::fmt::Display for FpErrorOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => {
                write!(f, "no floating point error in the zeroed lower-triangular entries")
            }
            Self::Order(k) => write!(f, "floating point error of the order of 10^{k}"),
        }
    }
}

#[derive(Debug, Clone)]
struct Factors<T: Precision> {
    q: Array2<T>,
    r: Array2<T>,
    /// Working matrix as the sweep left it, before the strictly-lower
    /// triangle was forced to exact zero
    r_raw: Array2<T>,
}

/// Lazy, memoized QR decomposition of a dense real matrix.
///
/// An instance owns a snapshot of the input matrix and the requested
/// [`QrMode`]; the factors are computed on the first call to [`qr`] (or one
/// of the single-factor accessors) and cached for the lifetime of the
/// instance. There is no recompute operation: decomposing a different matrix
/// requires a fresh instance.
///
/// [`qr`]: QrDecomposition::qr
#[derive(Debug, Clone)]
pub struct QrDecomposition<T: Precision> {
    matrix: Array2<T>,
    mode: QrMode,
    factors: Option<Factors<T>>,
}

impl<T: Precision> QrDecomposition<T> {
    /// Create a decomposition instance for a dense 2-D matrix.
    ///
    /// The input is accepted with dynamic dimensionality so that the
    /// dimensionality contract is checked at runtime, mirroring the
    /// array-like surface of the programmatic API: anything other than a
    /// 2-D input is rejected with [`QrError::NotTwoDimensional`].
    pub fn new(matrix: ArrayD<T>, mode: QrMode) -> Result<Self, QrError> {
        let ndim = matrix.ndim();
        let matrix = matrix
            .into_dimensionality::<Ix2>()
            .map_err(|_| QrError::NotTwoDimensional(ndim))?;

        Ok(Self {
            matrix,
            mode,
            factors: None,
        })
    }

    /// Create a decomposition instance from a string mode token
    /// (`"complete"` or `"reduced"`).
    pub fn with_mode_token(matrix: ArrayD<T>, mode: &str) -> Result<Self, QrError> {
        Self::new(matrix, QrMode::from_mode_token(mode)?)
    }

    /// The mode the factors are assembled for
    pub fn mode(&self) -> QrMode {
        self.mode
    }

    /// The input matrix snapshot the decomposition works from
    pub fn input(&self) -> &Array2<T> {
        &self.matrix
    }

    /// Compute (or return the cached) factors Q and R with Q·R = A.
    ///
    /// The first call runs min(rows, cols) reflection steps: each builds the
    /// Householder matrix for the leading column of the trailing submatrix,
    /// applies it in place to that submatrix, and accumulates the embedded
    /// reflection into Q from the right. The strictly-lower triangle of the
    /// working matrix is then forced to exact zero and the factors are
    /// truncated according to the mode. Subsequent calls return the cached
    /// pair without recomputation.
    ///
    /// # Errors
    ///
    /// [`QrError::AlreadyTriangular`] if every strictly-lower-triangular
    /// entry of the input is exactly zero. Nothing is cached in that case,
    /// so repeated calls keep reporting the same condition.
    pub fn qr(&mut self) -> Result<(&Array2<T>, &Array2<T>), QrError> {
        if let Some(ref factors) = self.factors {
            return Ok((&factors.q, &factors.r));
        }

        let computed = compute_factors(&self.matrix, self.mode)?;
        let factors = self.factors.insert(computed);
        Ok((&factors.q, &factors.r))
    }

    /// The orthogonal factor Q, computing the decomposition if needed.
    ///
    /// Re-signals [`QrError::AlreadyTriangular`] on every call for an input
    /// that was refused by [`qr`](QrDecomposition::qr).
    pub fn q_matrix(&mut self) -> Result<&Array2<T>, QrError> {
        self.qr().map(|(q, _)| q)
    }

    /// The upper-triangular factor R, computing the decomposition if needed.
    ///
    /// Re-signals [`QrError::AlreadyTriangular`] on every call for an input
    /// that was refused by [`qr`](QrDecomposition::qr).
    pub fn r_matrix(&mut self) -> Result<&Array2<T>, QrError> {
        self.qr().map(|(_, r)| r)
    }

    /// Order of magnitude of the largest subdiagonal entry discarded when
    /// the working matrix was truncated to the upper-triangular R.
    ///
    /// # Errors
    ///
    /// [`QrError::NotYetComputed`] unless a successful [`qr`] call has been
    /// made on this instance; this accessor never computes the factors
    /// itself.
    ///
    /// [`qr`]: QrDecomposition::qr
    pub fn floating_point_error_order(&self) -> Result<FpErrorOrder, QrError> {
        let factors = self.factors.as_ref().ok_or(QrError::NotYetComputed)?;

        let worst = max_abs_strictly_lower(&factors.r_raw);
        if worst == T::zero() {
            Ok(FpErrorOrder::Exact)
        } else {
            Ok(FpErrorOrder::Order(order10(worst)))
        }
    }
}

fn compute_factors<T: Precision>(
    matrix: &Array2<T>,
    mode: QrMode,
) -> Result<Factors<T>, QrError> {
    if max_abs_strictly_lower(matrix) == T::zero() {
        return Err(QrError::AlreadyTriangular);
    }

    let (rows, cols) = matrix.dim();
    let mut r_work = matrix.clone();
    let mut q = Array2::eye(rows);

    for step in 0..rows.min(cols) {
        let h_sub = build_reflection(r_work.slice(s![step.., step]), rows - step);

        // Left-multiply the trailing submatrix only; entries outside it are
        // untouched.
        let reflected = h_sub.dot(&r_work.slice(s![step.., step..]));
        r_work.slice_mut(s![step.., step..]).assign(&reflected);

        q = q.dot(&embed(&h_sub, step));
    }

    let r_raw = r_work.clone();
    for i in 1..rows {
        for j in 0..i.min(cols) {
            r_work[[i, j]] = T::zero();
        }
    }

    let (q, r) = match mode {
        QrMode::Complete => (q, r_work),
        QrMode::Reduced => {
            let k = rows.min(cols);
            (
                q.slice(s![.., ..k]).to_owned(),
                r_work.slice(s![..k, ..]).to_owned(),
            )
        }
    };

    Ok(Factors { q, r, r_raw })
}

/// One-shot convenience for f64 matrices: decompose and return owned factors
pub fn qr_f64(
    matrix: &Array2<f64>,
    mode: QrMode,
) -> Result<(Array2<f64>, Array2<f64>), QrError> {
    let mut decomposition = QrDecomposition::new(matrix.clone().into_dyn(), mode)?;
    let (q, r) = decomposition.qr()?;
    Ok((q.clone(), r.clone()))
}
