use thiserror::Error;

/// Top-level error type for the armature workspace.
#[derive(Debug, Error)]
pub enum ArmatureError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Solve error: {0}")]
    Solve(#[from] SolveError),

    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid task_dofs: {0} (must be in 1..=6)")]
    InvalidTaskDofs(usize),

    #[error("Invalid {name}: {value} (must be finite and >= 0)")]
    InvalidDamping { name: &'static str, value: f32 },

    #[error("Invalid svd_tolerance: {0} (must be finite and > 0)")]
    InvalidTolerance(f32),
}

/// Numerical solve failures.
///
/// Copy + static payloads for cheap propagation in hot paths. These are
/// surfaced to the caller, never substituted with zeros or NaNs; the caller
/// decides whether to retry with more damping or skip the frame.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SolveError {
    #[error("Singular matrix: {dim}x{dim} normal equations are not invertible (increase damping)")]
    SingularMatrix { dim: usize },

    #[error("SVD reconstruction off by {deviation} (tolerance {tolerance})")]
    SvdInconsistency { deviation: f32, tolerance: f32 },

    #[error("SVD backend did not produce the requested factors")]
    SvdFailed,
}

/// Chain mutation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("Delta dimension mismatch: expected {expected}, got {got}")]
    DeltaDimMismatch { expected: usize, got: usize },
}
