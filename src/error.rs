//! Top-level error type for a generation run
//!
//! Configuration errors mean the caller's parameters are wrong; the other
//! variants surface environment or serialization faults. A failed run
//! produces no artifact.

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
