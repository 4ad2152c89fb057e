//! # Biodivmap Core
//!
//! Core types, traits and errors for the biodivmap biodiversity analysis
//! toolkit.
//!
//! This crate provides:
//! - `Observation` / `ObservationSet`: georeferenced species sightings
//! - `Coordinate` / `BoundingBox`: degree-space positions and extents
//! - `Error` / `Result`: the shared error type
//! - The `Algorithm` trait for a consistent API

pub mod error;
pub mod geometry;
pub mod observation;

pub use error::{Error, Result};
pub use geometry::{BoundingBox, Coordinate};
pub use observation::{Observation, ObservationSet};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{BoundingBox, Coordinate};
    pub use crate::observation::{Observation, ObservationSet};
    pub use crate::Algorithm;
}

/// Core trait for all analysis operations in biodivmap.
///
/// Operations are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
