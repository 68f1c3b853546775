//! IK solve strategies over the task Jacobian.
//!
//! An [`IkSolver`] is bound to one target pose and borrows a chain per
//! call. Each strategy returns a joint-delta vector in the chain's column
//! order; none of them mutate the chain. The caller applies the deltas,
//! re-reads the chain, and iterates.

use armature_chain::KinematicChain;
use armature_core::{ConfigError, IkConfig, SolveError};
use nalgebra::{DMatrix, DVector, Quaternion, Vector3};

use crate::jacobian::build_jacobian;
use crate::residual::task_residual;
use crate::svd::{NalgebraSvd, SvdBackend, SvdTriple};

/// Jacobian inversion strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `J^T * residual` — cheapest, least accurate; the reference baseline.
    Transpose,
    /// Damped algebraic pseudo-inverse using `lambda_pseudo_inverse`.
    PseudoInverse,
    /// Damped algebraic pseudo-inverse using `lambda_dls`.
    DampedLeastSquares,
    /// Pseudo-inverse derived from the singular values.
    SvdPseudoInverse,
    /// Damped least squares on the singular values. Equivalent to
    /// [`Strategy::DampedLeastSquares`] in exact arithmetic, but stabler
    /// for ill-conditioned Jacobians.
    SvdDampedLeastSquares,
    /// Selectively damped least squares. Currently identical to
    /// [`Strategy::DampedLeastSquares`]; per-singular-value damping is not
    /// implemented.
    SelectivelyDamped,
}

/// Inverse-kinematics solver bound to one target pose.
///
/// Holds no ownership over the chain: every entry point borrows it and
/// re-walks it, so structural changes between solves are picked up. The
/// residual computed by the latest call is cached for [`IkSolver::error`]
/// and invalidated by [`IkSolver::set_target`]; a chain mutation between
/// calls is the caller's cue to solve again rather than reuse the metric.
pub struct IkSolver<B: SvdBackend = NalgebraSvd> {
    target_position: Vector3<f32>,
    target_rotation: Quaternion<f32>,
    config: IkConfig,
    backend: B,
    residual: Option<DVector<f32>>,
}

impl IkSolver<NalgebraSvd> {
    /// Create a solver for one target pose.
    ///
    /// The rotation does not need to be normalized; it is normalized when
    /// the orientation error is computed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration is invalid.
    pub fn new(
        target_position: Vector3<f32>,
        target_rotation: Quaternion<f32>,
        config: IkConfig,
    ) -> Result<Self, ConfigError> {
        Self::with_backend(target_position, target_rotation, config, NalgebraSvd)
    }
}

impl<B: SvdBackend> IkSolver<B> {
    /// Create a solver with a custom SVD backend.
    pub fn with_backend(
        target_position: Vector3<f32>,
        target_rotation: Quaternion<f32>,
        config: IkConfig,
        backend: B,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            target_position,
            target_rotation,
            config,
            backend,
            residual: None,
        })
    }

    pub const fn config(&self) -> &IkConfig {
        &self.config
    }

    /// Replace the target pose. Invalidates the cached residual.
    pub fn set_target(&mut self, position: Vector3<f32>, rotation: Quaternion<f32>) {
        self.target_position = position;
        self.target_rotation = rotation;
        self.residual = None;
    }

    /// Magnitude of the task-space residual for the chain's current state.
    ///
    /// Always recomputed from the chain, never served from a stale cache.
    pub fn error(&mut self, chain: &KinematicChain) -> f32 {
        self.refresh_residual(chain).norm()
    }

    /// The residual vector from the most recent solve or [`IkSolver::error`]
    /// call, if the target has not changed since.
    pub fn last_residual(&self) -> Option<&DVector<f32>> {
        self.residual.as_ref()
    }

    /// Dispatch to the given strategy.
    pub fn solve(
        &mut self,
        chain: &KinematicChain,
        strategy: Strategy,
    ) -> Result<DVector<f32>, SolveError> {
        match strategy {
            Strategy::Transpose => self.solve_transpose(chain),
            Strategy::PseudoInverse => self.solve_pseudo_inverse(chain),
            Strategy::DampedLeastSquares => self.solve_dls(chain),
            Strategy::SvdPseudoInverse => self.solve_svd_pseudo_inverse(chain),
            Strategy::SvdDampedLeastSquares => self.solve_svd_dls(chain),
            Strategy::SelectivelyDamped => self.solve_sdls(chain),
        }
    }

    /// `J^T * residual`.
    pub fn solve_transpose(&mut self, chain: &KinematicChain) -> Result<DVector<f32>, SolveError> {
        let jacobian = build_jacobian(self.config.task_dofs, chain);
        log::debug!(
            "transpose solve: {}x{} jacobian",
            jacobian.nrows(),
            jacobian.ncols()
        );
        let residual = self.refresh_residual(chain);
        Ok(jacobian.transpose() * residual)
    }

    /// Damped pseudo-inverse solve with `lambda_pseudo_inverse`.
    pub fn solve_pseudo_inverse(
        &mut self,
        chain: &KinematicChain,
    ) -> Result<DVector<f32>, SolveError> {
        let lambda = self.config.lambda_pseudo_inverse;
        self.solve_damped(chain, lambda)
    }

    /// Damped least squares via the algebraic normal equations, with
    /// `lambda_dls`.
    pub fn solve_dls(&mut self, chain: &KinematicChain) -> Result<DVector<f32>, SolveError> {
        let lambda = self.config.lambda_dls;
        self.solve_damped(chain, lambda)
    }

    /// Selectively damped least squares.
    ///
    /// Implemented as a plain damped-least-squares solve; the
    /// per-singular-value adaptive damping from the SDLS literature is not
    /// applied.
    pub fn solve_sdls(&mut self, chain: &KinematicChain) -> Result<DVector<f32>, SolveError> {
        let lambda = self.config.lambda_dls;
        self.solve_damped(chain, lambda)
    }

    /// Pseudo-inverse derived from the singular value decomposition, damped
    /// with `lambda_pseudo_inverse`.
    pub fn solve_svd_pseudo_inverse(
        &mut self,
        chain: &KinematicChain,
    ) -> Result<DVector<f32>, SolveError> {
        let jacobian = build_jacobian(self.config.task_dofs, chain);
        if jacobian.ncols() == 0 {
            self.refresh_residual(chain);
            return Ok(DVector::zeros(0));
        }
        log::debug!(
            "svd pseudo-inverse solve: {}x{} jacobian, lambda={}",
            jacobian.nrows(),
            jacobian.ncols(),
            self.config.lambda_pseudo_inverse
        );

        let svd = self.decompose(&jacobian)?;
        let lambda = self.config.lambda_pseudo_inverse;
        let k = svd.singular_values.len();
        let mut inverted = DMatrix::zeros(k, k);
        for i in 0..k {
            inverted[(i, i)] = 1.0 / (svd.singular_values[i] + lambda);
            // inverted[(i, i)] = if svd.singular_values[i] > lambda {
            //     1.0 / svd.singular_values[i]
            // } else {
            //     0.0
            // };
        }

        let residual = self.refresh_residual(chain);
        Ok(svd.v_t.transpose() * inverted * svd.u.transpose() * residual)
    }

    /// Damped least squares on the singular values, with `lambda_dls`.
    ///
    /// Equivalent to [`IkSolver::solve_dls`] in exact arithmetic; operating
    /// on the singular values directly keeps it stable when the Jacobian is
    /// ill-conditioned.
    pub fn solve_svd_dls(&mut self, chain: &KinematicChain) -> Result<DVector<f32>, SolveError> {
        let jacobian = build_jacobian(self.config.task_dofs, chain);
        if jacobian.ncols() == 0 {
            self.refresh_residual(chain);
            return Ok(DVector::zeros(0));
        }
        log::debug!(
            "svd dls solve: {}x{} jacobian, lambda={}",
            jacobian.nrows(),
            jacobian.ncols(),
            self.config.lambda_dls
        );

        let svd = self.decompose(&jacobian)?;
        let lambda = self.config.lambda_dls;
        let k = svd.singular_values.len();
        let mut damped = DMatrix::zeros(k, k);
        for i in 0..k {
            let s = svd.singular_values[i];
            damped[(i, i)] = s / (s * s + lambda * lambda);
        }

        let residual = self.refresh_residual(chain);
        Ok(svd.v_t.transpose() * damped * svd.u.transpose() * residual)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn solve_damped(
        &mut self,
        chain: &KinematicChain,
        lambda: f32,
    ) -> Result<DVector<f32>, SolveError> {
        let jacobian = build_jacobian(self.config.task_dofs, chain);
        if jacobian.ncols() == 0 {
            self.refresh_residual(chain);
            return Ok(DVector::zeros(0));
        }
        log::debug!(
            "damped pseudo-inverse solve: {}x{} jacobian, lambda={}",
            jacobian.nrows(),
            jacobian.ncols(),
            lambda
        );

        let pseudo_inverse = damped_pseudo_inverse(&jacobian, lambda)?;
        let residual = self.refresh_residual(chain);
        Ok(pseudo_inverse * residual)
    }

    fn decompose(&self, jacobian: &DMatrix<f32>) -> Result<SvdTriple, SolveError> {
        self.backend.decompose(jacobian, self.config.svd_tolerance)
    }

    fn refresh_residual(&mut self, chain: &KinematicChain) -> &DVector<f32> {
        let residual = task_residual(
            self.config.task_dofs,
            &self.target_position,
            &self.target_rotation,
            &chain.effector_pose(),
        );
        log::trace!("residual norm {}", residual.norm());
        self.residual.insert(residual)
    }
}

/// Damped pseudo-inverse of the Jacobian via the normal equations.
///
/// Picks the form that inverts the smaller square matrix:
/// `(J^T J + lambda^2 I_n)^-1 J^T` when `rows <= cols`, otherwise
/// `J^T (J J^T + lambda^2 I_m)^-1`. With `lambda = 0` this is the exact
/// pseudo-inverse and fails on singular configurations (e.g. a fully
/// extended chain); nonzero damping trades exactness for conditioning.
fn damped_pseudo_inverse(jacobian: &DMatrix<f32>, lambda: f32) -> Result<DMatrix<f32>, SolveError> {
    let (rows, cols) = jacobian.shape();
    let jt = jacobian.transpose();

    if rows <= cols {
        let normal = &jt * jacobian + DMatrix::identity(cols, cols) * (lambda * lambda);
        let inverse = normal
            .try_inverse()
            .ok_or(SolveError::SingularMatrix { dim: cols })?;
        Ok(inverse * jt)
    } else {
        let normal = jacobian * &jt + DMatrix::identity(rows, rows) * (lambda * lambda);
        let inverse = normal
            .try_inverse()
            .ok_or(SolveError::SingularMatrix { dim: rows })?;
        Ok(jt * inverse)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
