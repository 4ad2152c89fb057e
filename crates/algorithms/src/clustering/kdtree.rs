//! 2D k-d tree for spatial indexing
//!
//! Provides O(log n) radius queries for scattered coordinates. Replaces
//! the O(n²) brute-force neighborhood scan in density-based clustering.
//!
//! Reference:
//! Bentley, J.L. (1975). Multidimensional binary search trees used
//! for associative searching. CACM, 18(9).

use biodivmap_core::Coordinate;

/// A 2D k-d tree over a fixed set of coordinates.
#[derive(Debug)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    /// Coordinates in original input order
    points: Vec<Coordinate>,
}

#[derive(Debug)]
struct KdNode {
    /// Index into `points`
    point_idx: usize,
    /// Split dimension: 0 = lat, 1 = lon
    split_dim: u8,
    /// Left child index (None = leaf)
    left: Option<usize>,
    /// Right child index (None = leaf)
    right: Option<usize>,
}

impl KdTree {
    /// Build a k-d tree from a coordinate slice.
    ///
    /// Construction is O(n log n) using median-of-coordinate splitting.
    /// Query results index into the original slice.
    pub fn build(coords: &[Coordinate]) -> Self {
        if coords.is_empty() {
            return Self {
                nodes: Vec::new(),
                points: Vec::new(),
            };
        }

        let mut indices: Vec<usize> = (0..coords.len()).collect();
        let stored_points: Vec<Coordinate> = coords.to_vec();
        let mut nodes = Vec::with_capacity(coords.len());

        build_recursive(&stored_points, &mut indices, 0, &mut nodes);

        Self {
            nodes,
            points: stored_points,
        }
    }

    /// Number of points in the tree.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Indices of all points within `radius` of `center` (inclusive).
    ///
    /// A point at exactly `radius` is included. Results are in no
    /// particular order.
    pub fn within_radius(&self, center: &Coordinate, radius: f64) -> Vec<usize> {
        if self.nodes.is_empty() || radius <= 0.0 {
            return Vec::new();
        }

        let radius_sq = radius * radius;
        let mut results = Vec::new();

        self.radius_recursive(0, center, radius_sq, &mut results);

        results
    }

    fn radius_recursive(
        &self,
        node_idx: usize,
        center: &Coordinate,
        radius_sq: f64,
        results: &mut Vec<usize>,
    ) {
        let node = &self.nodes[node_idx];
        let p = &self.points[node.point_idx];

        if center.dist_sq(p) <= radius_sq {
            results.push(node.point_idx);
        }

        // Signed distance from the query to the splitting plane
        let diff = if node.split_dim == 0 {
            center.lat - p.lat
        } else {
            center.lon - p.lon
        };

        // A subtree on the far side of the plane can only hold matches
        // when the plane itself is within the radius.
        if let Some(left) = node.left {
            if diff <= 0.0 || diff * diff <= radius_sq {
                self.radius_recursive(left, center, radius_sq, results);
            }
        }

        if let Some(right) = node.right {
            if diff >= 0.0 || diff * diff <= radius_sq {
                self.radius_recursive(right, center, radius_sq, results);
            }
        }
    }
}

/// Recursively build the k-d tree.
fn build_recursive(
    points: &[Coordinate],
    indices: &mut [usize],
    depth: usize,
    nodes: &mut Vec<KdNode>,
) -> usize {
    let n = indices.len();
    let split_dim = (depth % 2) as u8;

    // Sort by split dimension
    indices.sort_by(|&a, &b| {
        let va = if split_dim == 0 {
            points[a].lat
        } else {
            points[a].lon
        };
        let vb = if split_dim == 0 {
            points[b].lat
        } else {
            points[b].lon
        };
        va.partial_cmp(&vb).unwrap_or(std::cmp::Ordering::Equal)
    });

    let median = n / 2;
    let point_idx = indices[median];

    let node_idx = nodes.len();
    nodes.push(KdNode {
        point_idx,
        split_dim,
        left: None,
        right: None,
    });

    if median > 0 {
        let mut left_indices = indices[..median].to_vec();
        let left_idx = build_recursive(points, &mut left_indices, depth + 1, nodes);
        nodes[node_idx].left = Some(left_idx);
    }

    if median + 1 < n {
        let mut right_indices = indices[median + 1..].to_vec();
        let right_idx = build_recursive(points, &mut right_indices, depth + 1, nodes);
        nodes[node_idx].right = Some(right_idx);
    }

    node_idx
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_coords() -> Vec<Coordinate> {
        vec![
            Coordinate::new(2.0, 3.0),
            Coordinate::new(5.0, 4.0),
            Coordinate::new(9.0, 6.0),
            Coordinate::new(4.0, 7.0),
            Coordinate::new(8.0, 1.0),
            Coordinate::new(7.0, 2.0),
            Coordinate::new(1.0, 8.0),
            Coordinate::new(6.0, 5.0),
        ]
    }

    fn brute_force(coords: &[Coordinate], center: &Coordinate, radius: f64) -> Vec<usize> {
        coords
            .iter()
            .enumerate()
            .filter(|(_, c)| center.dist_sq(c) <= radius * radius)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn test_build_and_size() {
        let coords = sample_coords();
        let tree = KdTree::build(&coords);
        assert_eq!(tree.len(), 8);
        assert!(!tree.is_empty());
    }

    #[test]
    fn test_empty_tree() {
        let tree = KdTree::build(&[]);
        assert!(tree.is_empty());
        assert!(tree
            .within_radius(&Coordinate::new(0.0, 0.0), 10.0)
            .is_empty());
    }

    #[test]
    fn test_within_radius_inclusive() {
        let coords = sample_coords();
        let tree = KdTree::build(&coords);

        let center = Coordinate::new(6.0, 5.0);
        let results = tree.within_radius(&center, 0.0);
        assert!(results.is_empty(), "zero radius returns nothing");

        // A point at exactly the query radius is included
        let dist = center.dist(&coords[1]);
        let results = tree.within_radius(&center, dist);
        assert!(results.contains(&1));
        assert!(results.contains(&7));
    }

    #[test]
    fn test_within_radius_matches_brute_force() {
        let coords = sample_coords();
        let tree = KdTree::build(&coords);

        for qlat in 0..11 {
            for qlon in 0..11 {
                let center = Coordinate::new(qlat as f64 + 0.5, qlon as f64 + 0.5);
                for radius in [0.5, 1.5, 3.0, 8.0] {
                    let mut got = tree.within_radius(&center, radius);
                    let mut expected = brute_force(&coords, &center, radius);
                    got.sort_unstable();
                    expected.sort_unstable();
                    assert_eq!(
                        got, expected,
                        "mismatch at ({}, {}) r={}",
                        center.lat, center.lon, radius
                    );
                }
            }
        }
    }

    #[test]
    fn test_query_far_from_median_plane() {
        // Query deep inside one half of the tree, far from every split
        // plane; the home subtree must still be searched fully.
        let mut coords = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.001, 0.001),
            Coordinate::new(0.002, 0.0),
        ];
        for i in 0..20 {
            coords.push(Coordinate::new(100.0 + i as f64, 100.0 + i as f64));
        }

        let tree = KdTree::build(&coords);
        let mut results = tree.within_radius(&Coordinate::new(0.001, 0.0005), 0.01);
        results.sort_unstable();
        assert_eq!(results, vec![0, 1, 2]);
    }

    #[test]
    fn test_duplicate_points() {
        let coords = vec![
            Coordinate::new(1.0, 1.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(1.0, 1.0),
            Coordinate::new(5.0, 5.0),
        ];
        let tree = KdTree::build(&coords);

        let mut results = tree.within_radius(&Coordinate::new(1.0, 1.0), 0.1);
        results.sort_unstable();
        assert_eq!(results, vec![0, 1, 2]);
    }

    #[test]
    fn test_large_dataset_matches_brute_force() {
        // 500 deterministic pseudo-random points
        let coords: Vec<Coordinate> = (0..500)
            .map(|i| {
                let lat = ((i * 7 + 13) % 100) as f64 / 10.0;
                let lon = ((i * 11 + 37) % 100) as f64 / 10.0;
                Coordinate::new(lat, lon)
            })
            .collect();
        let tree = KdTree::build(&coords);
        assert_eq!(tree.len(), 500);

        for &(qlat, qlon, radius) in
            &[(5.0, 5.0, 1.0), (0.3, 9.7, 2.5), (9.9, 0.1, 0.7), (2.0, 2.0, 4.0)]
        {
            let center = Coordinate::new(qlat, qlon);
            let mut got = tree.within_radius(&center, radius);
            let mut expected = brute_force(&coords, &center, radius);
            got.sort_unstable();
            expected.sort_unstable();
            assert_eq!(got, expected);
        }
    }
}
