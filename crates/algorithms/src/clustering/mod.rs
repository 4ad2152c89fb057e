//! Spatial clustering of observation coordinates
//!
//! - DBSCAN: density-based clustering with noise labelling
//! - KdTree: 2D spatial index backing the neighborhood queries

mod dbscan;
pub mod kdtree;

pub use dbscan::{cluster_centroids, cluster_count, dbscan, DbscanParams, NOISE};
pub use kdtree::KdTree;
