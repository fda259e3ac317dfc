//! Configuration error types.

use thiserror::Error;

use super::Phase;

/// Errors that can occur when building a timer from a configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A phase was configured with no length.
    #[error("{phase} duration must be greater than zero")]
    ZeroDuration {
        /// The offending phase
        phase: Phase,
    },
}
