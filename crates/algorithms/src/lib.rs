//! # Biodivmap Algorithms
//!
//! Biodiversity analysis algorithms for biodivmap.
//!
//! ## Available Algorithm Categories
//!
//! - **diversity**: richness, abundance, Shannon-Wiener and Simpson indices
//! - **density**: 2D Gaussian kernel density estimation
//! - **clustering**: DBSCAN over a k-d tree spatial index
//! - **hotspot**: density-based hotspot centroid detection
//! - **survey**: per-group and combined survey reports

pub mod clustering;
pub mod density;
pub mod diversity;
pub mod hotspot;
pub mod survey;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::clustering::{
        cluster_centroids, cluster_count, dbscan, DbscanParams, KdTree, NOISE,
    };
    pub use crate::density::{min_max_normalize, Bandwidth, GaussianKde};
    pub use crate::diversity::{
        compute_metrics, shannon_index, simpson_index, DiversityCalculator, DiversityMetrics,
    };
    pub use crate::hotspot::{find_hotspots, HotspotDetector, HotspotParams};
    pub use crate::survey::{
        mean_coordinate, GroupSummary, Survey, SurveyReport, COMBINED_GROUP,
    };
    pub use biodivmap_core::prelude::*;
}
