use crate::lifecycle::ConfigError;
use thiserror::Error;

/// Errors raised while starting or stopping the kitchen.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Task failed: {0}")]
    TaskFailed(String),
}
