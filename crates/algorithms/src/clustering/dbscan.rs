//! Density-based spatial clustering (DBSCAN)
//!
//! Groups coordinates into clusters of density-reachable points given a
//! neighborhood radius and a minimum occupancy. Points in no cluster are
//! labelled noise and excluded from all downstream aggregation.
//!
//! Reference:
//! Ester, M., Kriegel, H.-P., Sander, J., Xu, X. (1996). A density-based
//! algorithm for discovering clusters in large spatial databases with
//! noise. KDD-96.

use std::collections::VecDeque;

use biodivmap_core::{Coordinate, Error, Result};

use super::kdtree::KdTree;

/// Label assigned to points that belong to no cluster
pub const NOISE: i32 = -1;

/// Parameters for DBSCAN clustering
#[derive(Debug, Clone)]
pub struct DbscanParams {
    /// Neighborhood radius, in the same units as the coordinates.
    /// The default (0.001) is a degree-space constant sized for surveys
    /// spanning a few kilometres; rescale it for other extents.
    pub eps: f64,
    /// Minimum number of points (the point itself included) for a
    /// neighborhood to count as dense (default: 2).
    pub min_samples: usize,
}

impl Default for DbscanParams {
    fn default() -> Self {
        Self {
            eps: 0.001,
            min_samples: 2,
        }
    }
}

impl DbscanParams {
    /// Check parameter ranges without running the clustering.
    pub fn validate(&self) -> Result<()> {
        if !self.eps.is_finite() || self.eps <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "eps",
                value: self.eps.to_string(),
                reason: "neighborhood radius must be a positive finite number".into(),
            });
        }
        if self.min_samples == 0 {
            return Err(Error::InvalidParameter {
                name: "min_samples",
                value: self.min_samples.to_string(),
                reason: "a dense neighborhood needs at least one point".into(),
            });
        }
        Ok(())
    }
}

/// Cluster coordinates by density reachability.
///
/// Returns one label per input point, in input order. Cluster ids are
/// consecutive integers from 0 in discovery order; [`NOISE`] (-1) marks
/// points in no cluster. A point is a core point when at least
/// `min_samples` points (itself included) lie within `eps` of it;
/// clusters grow from core points, and non-core points within `eps` of a
/// core point join as border points.
///
/// The labelling is deterministic for a fixed input order. Reordering
/// the input can renumber clusters and reassign border points shared by
/// two clusters, but never changes which points are noise when
/// `min_samples <= 2`.
///
/// # Errors
/// `InvalidParameter` when `eps` is not a positive finite number or
/// `min_samples` is zero.
pub fn dbscan(coords: &[Coordinate], params: &DbscanParams) -> Result<Vec<i32>> {
    params.validate()?;

    if coords.is_empty() {
        return Ok(Vec::new());
    }

    let tree = KdTree::build(coords);
    let mut labels = vec![NOISE; coords.len()];
    let mut visited = vec![false; coords.len()];
    let mut cluster: i32 = 0;

    for i in 0..coords.len() {
        if visited[i] {
            continue;
        }
        visited[i] = true;

        let neighbors = tree.within_radius(&coords[i], params.eps);
        if neighbors.len() < params.min_samples {
            // Stays noise unless a later cluster claims it as border
            continue;
        }

        labels[i] = cluster;
        let mut frontier: VecDeque<usize> = neighbors.into();

        while let Some(j) = frontier.pop_front() {
            if labels[j] == NOISE {
                labels[j] = cluster;
            }
            if visited[j] {
                continue;
            }
            visited[j] = true;

            let expansion = tree.within_radius(&coords[j], params.eps);
            if expansion.len() >= params.min_samples {
                frontier.extend(expansion);
            }
        }

        cluster += 1;
    }

    Ok(labels)
}

/// Number of clusters in a label sequence (noise excluded).
pub fn cluster_count(labels: &[i32]) -> usize {
    labels
        .iter()
        .copied()
        .filter(|&l| l != NOISE)
        .max()
        .map_or(0, |max| max as usize + 1)
}

/// Mean coordinate of each cluster, in ascending label order.
///
/// Noise points contribute to no centroid. `coords` and `labels` must be
/// parallel, as returned by [`dbscan`] for the same slice.
pub fn cluster_centroids(coords: &[Coordinate], labels: &[i32]) -> Vec<Coordinate> {
    let k = cluster_count(labels);
    let mut sums = vec![(0.0_f64, 0.0_f64, 0_usize); k];

    for (coord, &label) in coords.iter().zip(labels) {
        if label == NOISE {
            continue;
        }
        let entry = &mut sums[label as usize];
        entry.0 += coord.lat;
        entry.1 += coord.lon;
        entry.2 += 1;
    }

    sums.into_iter()
        .filter(|&(_, _, count)| count > 0)
        .map(|(lat, lon, count)| Coordinate::new(lat / count as f64, lon / count as f64))
        .collect()
}
