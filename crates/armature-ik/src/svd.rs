//! Singular value decomposition behind a backend seam.
//!
//! The solver consumes the decomposition through [`SvdBackend`] so the
//! numeric library stays swappable; [`NalgebraSvd`] is the default
//! implementation.

use armature_core::SolveError;
use nalgebra::{DMatrix, DVector};

/// Thin singular value decomposition of a task Jacobian.
///
/// For an `m x n` input with `k = min(m, n)`: `u` is `m x k`,
/// `singular_values` has length `k` (non-negative, in the backend's order),
/// and `v_t` is `k x n`, satisfying `J = u * diag(singular_values) * v_t`
/// within the decomposition tolerance.
#[derive(Debug, Clone)]
pub struct SvdTriple {
    pub u: DMatrix<f32>,
    pub singular_values: DVector<f32>,
    pub v_t: DMatrix<f32>,
}

/// Dense-matrix SVD provider.
///
/// Implementations must verify their own factorization: a triple that does
/// not reconstruct the input within `tolerance` is a solve failure, never a
/// silent approximation.
pub trait SvdBackend {
    fn decompose(&self, matrix: &DMatrix<f32>, tolerance: f32) -> Result<SvdTriple, SolveError>;
}

/// nalgebra-backed [`SvdBackend`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NalgebraSvd;

impl SvdBackend for NalgebraSvd {
    fn decompose(&self, matrix: &DMatrix<f32>, tolerance: f32) -> Result<SvdTriple, SolveError> {
        let svd = matrix.clone().svd(true, true);
        let (Some(u), Some(v_t)) = (svd.u, svd.v_t) else {
            return Err(SolveError::SvdFailed);
        };
        let singular_values = svd.singular_values;

        let reconstructed = &u * DMatrix::from_diagonal(&singular_values) * &v_t;
        let deviation = (reconstructed - matrix).norm();
        if deviation >= tolerance {
            return Err(SolveError::SvdInconsistency {
                deviation,
                tolerance,
            });
        }

        Ok(SvdTriple {
            u,
            singular_values,
            v_t,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
