// armature-core: Errors and solver configuration for the armature IK stack.

pub mod config;
pub mod error;

pub use config::IkConfig;
pub use error::{ArmatureError, ChainError, ConfigError, SolveError};
