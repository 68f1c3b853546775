use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_task_dofs() -> usize {
    3
}
const fn default_lambda_pseudo_inverse() -> f32 {
    0.01
}
const fn default_lambda_dls() -> f32 {
    0.1
}
const fn default_svd_tolerance() -> f32 {
    1e-4
}

// ---------------------------------------------------------------------------
// IkConfig
// ---------------------------------------------------------------------------

/// Solver configuration, fixed for the lifetime of a solver instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IkConfig {
    /// Task-space dimensionality (default: 3).
    ///
    /// 1-3 constrain world position components; 4-6 add orientation
    /// components. Must be in `1..=6`.
    #[serde(default = "default_task_dofs")]
    pub task_dofs: usize,

    /// Damping for the pseudo-inverse strategies (default: 0.01).
    /// Zero gives the exact pseudo-inverse, which fails on singular
    /// configurations.
    #[serde(default = "default_lambda_pseudo_inverse")]
    pub lambda_pseudo_inverse: f32,

    /// Damping for the damped-least-squares strategies (default: 0.1).
    /// Higher = more robust near singularities, but slower convergence.
    #[serde(default = "default_lambda_dls")]
    pub lambda_dls: f32,

    /// Maximum Frobenius-norm deviation allowed between the Jacobian and
    /// its reconstruction from the SVD factors (default: 1e-4).
    #[serde(default = "default_svd_tolerance")]
    pub svd_tolerance: f32,
}

impl Default for IkConfig {
    fn default() -> Self {
        Self {
            task_dofs: default_task_dofs(),
            lambda_pseudo_inverse: default_lambda_pseudo_inverse(),
            lambda_dls: default_lambda_dls(),
            svd_tolerance: default_svd_tolerance(),
        }
    }
}

impl IkConfig {
    /// Position-only task space (3 DOFs) with default damping.
    pub fn position_only() -> Self {
        Self::default()
    }

    /// Full-pose task space (6 DOFs) with default damping.
    pub fn full_pose() -> Self {
        Self {
            task_dofs: 6,
            ..Self::default()
        }
    }

    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.task_dofs == 0 || self.task_dofs > 6 {
            return Err(ConfigError::InvalidTaskDofs(self.task_dofs));
        }
        if !self.lambda_pseudo_inverse.is_finite() || self.lambda_pseudo_inverse < 0.0 {
            return Err(ConfigError::InvalidDamping {
                name: "lambda_pseudo_inverse",
                value: self.lambda_pseudo_inverse,
            });
        }
        if !self.lambda_dls.is_finite() || self.lambda_dls < 0.0 {
            return Err(ConfigError::InvalidDamping {
                name: "lambda_dls",
                value: self.lambda_dls,
            });
        }
        if !self.svd_tolerance.is_finite() || self.svd_tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(self.svd_tolerance));
        }
        Ok(())
    }

    /// Whether the task space constrains orientation as well as position.
    pub const fn tracks_orientation(&self) -> bool {
        self.task_dofs > 3
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(IkConfig::default().validate().is_ok());
    }

    #[test]
    fn full_pose_tracks_orientation() {
        let config = IkConfig::full_pose();
        assert_eq!(config.task_dofs, 6);
        assert!(config.tracks_orientation());
        assert!(!IkConfig::position_only().tracks_orientation());
    }

    #[test]
    fn zero_task_dofs_rejected() {
        let config = IkConfig {
            task_dofs: 0,
            ..IkConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTaskDofs(0))
        ));
    }

    #[test]
    fn seven_task_dofs_rejected() {
        let config = IkConfig {
            task_dofs: 7,
            ..IkConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTaskDofs(7))
        ));
    }

    #[test]
    fn negative_damping_rejected() {
        let config = IkConfig {
            lambda_dls: -0.1,
            ..IkConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDamping {
                name: "lambda_dls",
                ..
            })
        ));
    }

    #[test]
    fn nan_damping_rejected() {
        let config = IkConfig {
            lambda_pseudo_inverse: f32::NAN,
            ..IkConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDamping {
                name: "lambda_pseudo_inverse",
                ..
            })
        ));
    }

    #[test]
    fn zero_damping_allowed() {
        let config = IkConfig {
            lambda_pseudo_inverse: 0.0,
            lambda_dls: 0.0,
            ..IkConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_tolerance_rejected() {
        let config = IkConfig {
            svd_tolerance: 0.0,
            ..IkConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn toml_defaults_fill_missing_fields() {
        let config: IkConfig = toml::from_str("task_dofs = 6").unwrap();
        assert_eq!(config.task_dofs, 6);
        assert!((config.lambda_dls - 0.1).abs() < f32::EPSILON);
        assert!((config.lambda_pseudo_inverse - 0.01).abs() < f32::EPSILON);
        assert!((config.svd_tolerance - 1e-4).abs() < f32::EPSILON);
    }

    #[test]
    fn from_file_roundtrip() {
        let path = std::env::temp_dir().join("armature_ik_config_test.toml");
        std::fs::write(&path, "task_dofs = 6\nlambda_dls = 0.25\n").unwrap();
        let config = IkConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config.task_dofs, 6);
        assert!((config.lambda_dls - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn from_file_rejects_invalid_values() {
        let path = std::env::temp_dir().join("armature_ik_config_invalid_test.toml");
        std::fs::write(&path, "task_dofs = 9\n").unwrap();
        let result = IkConfig::from_file(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::InvalidTaskDofs(9))));
    }

    #[test]
    fn from_file_missing_file_is_io_error() {
        let result = IkConfig::from_file("/nonexistent/armature.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn serde_json_roundtrip() {
        let config = IkConfig::full_pose();
        let json = serde_json::to_string(&config).unwrap();
        let config2: IkConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, config2);
    }
}
