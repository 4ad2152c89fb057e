//! Observation-density hotspot detection
//!
//! Finds the centers of unusually dense regions in a set of observation
//! coordinates. Density alone would flag an entire dense region point by
//! point, so the flagged points are clustered and each cluster collapses
//! to one representative centroid.

use biodivmap_core::{Algorithm, Coordinate, Error, Result};

use crate::clustering::{cluster_centroids, dbscan, DbscanParams};
use crate::density::{min_max_normalize, Bandwidth, GaussianKde};

/// Parameters for hotspot detection
#[derive(Debug, Clone)]
pub struct HotspotParams {
    /// Normalized-density cutoff in [0, 1]. Points at or above it become
    /// hotspot candidates (default: 0.75).
    pub density_threshold: f64,
    /// Clustering radius for candidate points, in coordinate units
    /// (default: 0.001; degree-space, see [`DbscanParams`]).
    pub eps: f64,
    /// Minimum candidate cluster occupancy (default: 2).
    pub min_samples: usize,
    /// Kernel bandwidth rule (default: Scott)
    pub bandwidth: Bandwidth,
}

impl Default for HotspotParams {
    fn default() -> Self {
        Self {
            density_threshold: 0.75,
            eps: 0.001,
            min_samples: 2,
            bandwidth: Bandwidth::Scott,
        }
    }
}

impl HotspotParams {
    /// Check parameter ranges without running the detector.
    pub fn validate(&self) -> Result<()> {
        if !self.density_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.density_threshold)
        {
            return Err(Error::InvalidParameter {
                name: "density_threshold",
                value: self.density_threshold.to_string(),
                reason: "normalized-density cutoff must lie in [0, 1]".into(),
            });
        }
        self.dbscan_params().validate()
    }

    fn dbscan_params(&self) -> DbscanParams {
        DbscanParams {
            eps: self.eps,
            min_samples: self.min_samples,
        }
    }
}

/// Find density hotspots in a coordinate set.
///
/// The pipeline estimates a Gaussian kernel density at every input point,
/// min-max normalizes the estimates to [0, 1], keeps the points at or
/// above `density_threshold`, clusters them with DBSCAN and returns one
/// mean coordinate per cluster, in ascending cluster order. Noise points
/// among the candidates contribute to no hotspot.
///
/// Defined empty-result cases (not errors):
/// - fewer than 3 coordinates,
/// - a degenerate density surface (identical or collinear points),
/// - all density estimates equal, leaving the normalization undefined,
/// - no point at or above the threshold, or all candidates labelled noise.
///
/// # Errors
/// `InvalidParameter` for out-of-range parameters, see
/// [`HotspotParams::validate`]. Numerical edge cases never error.
pub fn find_hotspots(coords: &[Coordinate], params: &HotspotParams) -> Result<Vec<Coordinate>> {
    params.validate()?;

    if coords.len() < 3 {
        return Ok(Vec::new());
    }

    // A singular covariance means there is no usable density surface;
    // by policy that is an empty result, not an error.
    let kde = match GaussianKde::fit(coords, params.bandwidth) {
        Ok(kde) => kde,
        Err(Error::DegenerateDensity(_)) => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    let densities = kde.evaluate(coords);
    let normalized = match min_max_normalize(&densities) {
        Some(normalized) => normalized,
        None => return Ok(Vec::new()),
    };

    let candidates: Vec<Coordinate> = coords
        .iter()
        .zip(&normalized)
        .filter(|&(_, &d)| d >= params.density_threshold)
        .map(|(c, _)| *c)
        .collect();

    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let labels = dbscan(&candidates, &params.dbscan_params())?;
    Ok(cluster_centroids(&candidates, &labels))
}

/// Hotspot detection over observation coordinates
#[derive(Debug, Clone, Default)]
pub struct HotspotDetector;

impl Algorithm for HotspotDetector {
    type Input = Vec<Coordinate>;
    type Output = Vec<Coordinate>;
    type Params = HotspotParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "FindHotspots"
    }

    fn description(&self) -> &'static str {
        "Centroids of high-density regions in an observation coordinate set"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        find_hotspots(&input, &params)
    }
}
