//! Error types for biodivmap

use thiserror::Error;

/// Main error type for biodivmap operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Degenerate density estimate: {0}")]
    DegenerateDensity(String),

    #[error("Algorithm error: {0}")]
    Algorithm(String),
}

/// Result type alias for biodivmap operations
pub type Result<T> = std::result::Result<T, Error>;
