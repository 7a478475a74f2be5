//! Error type of the CLI.

use crate::config::ConfigError;

/// Any failure that ends the program.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration or credential problem.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Fatal error from the assistant library.
    #[error(transparent)]
    Placebot(#[from] placebot::Error),

    /// The async runtime could not be started.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Result type of the CLI.
pub type Result<T> = std::result::Result<T, CliError>;
