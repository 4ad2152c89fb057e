//! 2D Gaussian kernel density estimation
//!
//! Estimates a smooth observation-density surface from scattered
//! coordinates. Every input point contributes one Gaussian kernel whose
//! covariance is the sample covariance of the data scaled by a bandwidth
//! factor, so the smoothing adapts to the spread of the data in each
//! direction.
//!
//! References:
//! Scott, D.W. (1992). Multivariate Density Estimation: Theory,
//! Practice, and Visualization. Wiley.
//! Silverman, B.W. (1986). Density Estimation for Statistics and Data
//! Analysis. Chapman & Hall.

use std::f64::consts::PI;

use rayon::prelude::*;

use biodivmap_core::{Coordinate, Error, Result};

/// Bandwidth selection rule for the Gaussian kernel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bandwidth {
    /// Scott's rule: `n^(-1/(d+4))` with d = 2 (the default)
    Scott,
    /// Silverman's rule: `(n * (d+2)/4)^(-1/(d+4))` with d = 2
    Silverman,
    /// Fixed multiplier applied to the sample covariance
    Factor(f64),
}

impl Default for Bandwidth {
    fn default() -> Self {
        Bandwidth::Scott
    }
}

impl Bandwidth {
    /// Multiplier applied to the sample covariance, for d = 2 dimensions.
    fn factor(&self, n: usize) -> Result<f64> {
        const DIMS: f64 = 2.0;
        let n = n as f64;
        match *self {
            Bandwidth::Scott => Ok(n.powf(-1.0 / (DIMS + 4.0))),
            Bandwidth::Silverman => Ok((n * (DIMS + 2.0) / 4.0).powf(-1.0 / (DIMS + 4.0))),
            Bandwidth::Factor(f) => {
                if !f.is_finite() || f <= 0.0 {
                    return Err(Error::InvalidParameter {
                        name: "bandwidth",
                        value: f.to_string(),
                        reason: "bandwidth factor must be a positive finite number".into(),
                    });
                }
                Ok(f)
            }
        }
    }
}

/// A fitted 2D Gaussian kernel density estimator.
///
/// The kernel covariance is the unbiased sample covariance of the input
/// scaled by the squared bandwidth factor. The estimate at a point x is
///
/// ```text
/// f(x) = 1/(n * 2π * sqrt(det C)) * sum_i exp(-1/2 * (x - xi)' C⁻¹ (x - xi))
/// ```
#[derive(Debug, Clone)]
pub struct GaussianKde {
    points: Vec<Coordinate>,
    /// Inverse kernel covariance: [inv00, inv01, inv11] (symmetric)
    inv_cov: [f64; 3],
    /// Normalization constant `n * 2π * sqrt(det C)`
    norm: f64,
    factor: f64,
}

impl GaussianKde {
    /// Fit the estimator to a set of coordinates.
    ///
    /// # Errors
    /// `DegenerateDensity` when fewer than 3 points are supplied or the
    /// sample covariance is singular (identical or collinear points). In
    /// both cases no meaningful density surface exists. Note that any two
    /// points are collinear, so 3 points in general position is the
    /// effective minimum.
    ///
    /// `InvalidParameter` for a non-positive `Bandwidth::Factor`.
    pub fn fit(coords: &[Coordinate], bandwidth: Bandwidth) -> Result<Self> {
        let n = coords.len();
        let factor = bandwidth.factor(n)?;

        if n < 3 {
            return Err(Error::DegenerateDensity(format!(
                "kernel density needs at least 3 points, got {}",
                n
            )));
        }

        let n_f = n as f64;
        let mean_lat = coords.iter().map(|c| c.lat).sum::<f64>() / n_f;
        let mean_lon = coords.iter().map(|c| c.lon).sum::<f64>() / n_f;

        // Unbiased sample covariance, then scaled by factor² to get the
        // kernel covariance.
        let mut c00 = 0.0;
        let mut c01 = 0.0;
        let mut c11 = 0.0;
        for c in coords {
            let dlat = c.lat - mean_lat;
            let dlon = c.lon - mean_lon;
            c00 += dlat * dlat;
            c01 += dlat * dlon;
            c11 += dlon * dlon;
        }
        let scale = factor * factor / (n_f - 1.0);
        c00 *= scale;
        c01 *= scale;
        c11 *= scale;

        let det = c00 * c11 - c01 * c01;
        if !det.is_finite() || det <= 0.0 {
            return Err(Error::DegenerateDensity(
                "singular sample covariance (identical or collinear points)".into(),
            ));
        }

        Ok(Self {
            points: coords.to_vec(),
            inv_cov: [c11 / det, -c01 / det, c00 / det],
            norm: n_f * 2.0 * PI * det.sqrt(),
            factor,
        })
    }

    /// Number of kernel basis points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the estimator holds no points (never true for a fitted one)
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bandwidth factor applied to the sample covariance
    pub fn bandwidth_factor(&self) -> f64 {
        self.factor
    }

    /// Estimated density at a single coordinate
    pub fn density_at(&self, at: &Coordinate) -> f64 {
        let [inv00, inv01, inv11] = self.inv_cov;
        let mut sum = 0.0;

        for p in &self.points {
            let dlat = at.lat - p.lat;
            let dlon = at.lon - p.lon;
            let q = dlat * dlat * inv00 + 2.0 * dlat * dlon * inv01 + dlon * dlon * inv11;
            sum += (-0.5 * q).exp();
        }

        sum / self.norm
    }

    /// Estimated density at each query coordinate.
    ///
    /// Evaluations are independent given the fitted point set and run in
    /// parallel across queries.
    pub fn evaluate(&self, at: &[Coordinate]) -> Vec<f64> {
        at.par_iter().map(|c| self.density_at(c)).collect()
    }
}

/// Min-max normalize a slice of density values to [0, 1].
///
/// Returns `None` when the slice is empty or all values are equal, in
/// which case the normalization is undefined and callers should treat the
/// surface as carrying no density signal.
pub fn min_max_normalize(values: &[f64]) -> Option<Vec<f64>> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if !range.is_finite() || range <= 0.0 {
        return None;
    }

    Some(values.iter().map(|v| (v - min) / range).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square_corners() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(1.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(1.0, 1.0),
        ]
    }

    #[test]
    fn test_scott_factor() {
        // 64 points: 64^(-1/6) = 0.5 exactly
        let coords: Vec<Coordinate> = (0..64)
            .map(|i| Coordinate::new((i % 8) as f64, (i / 8) as f64))
            .collect();
        let kde = GaussianKde::fit(&coords, Bandwidth::Scott).unwrap();
        assert!((kde.bandwidth_factor() - 0.5).abs() < 1e-12);

        // Silverman coincides with Scott in 2 dimensions
        let kde = GaussianKde::fit(&coords, Bandwidth::Silverman).unwrap();
        assert!((kde.bandwidth_factor() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_fixed_factor_validation() {
        let coords = unit_square_corners();
        assert!(GaussianKde::fit(&coords, Bandwidth::Factor(0.5)).is_ok());
        assert!(GaussianKde::fit(&coords, Bandwidth::Factor(0.0)).is_err());
        assert!(GaussianKde::fit(&coords, Bandwidth::Factor(-1.0)).is_err());
        assert!(GaussianKde::fit(&coords, Bandwidth::Factor(f64::NAN)).is_err());
    }

    #[test]
    fn test_unit_square_density() {
        // Closed-form check: 4 corner kernels, diagonal covariance
        // C = 4^(-1/3)/3 * I, so f(center) = 4*exp(-0.5*q)/(4*2π*c)
        // with c = 0.2099868416, q = 0.5/c. Numerically ≈ 0.230451.
        let kde = GaussianKde::fit(&unit_square_corners(), Bandwidth::Scott).unwrap();

        let center = kde.density_at(&Coordinate::new(0.5, 0.5));
        assert!(
            (center - 0.230451).abs() < 1e-3,
            "expected ≈0.230451 at center, got {}",
            center
        );

        // All corners see the same configuration
        let corner_densities: Vec<f64> = unit_square_corners()
            .iter()
            .map(|c| kde.density_at(c))
            .collect();
        for d in &corner_densities[1..] {
            assert!((d - corner_densities[0]).abs() < 1e-12);
        }

        // Center of mass is denser than the corners
        assert!(center > corner_densities[0]);
    }

    #[test]
    fn test_density_positive_and_decaying() {
        let kde = GaussianKde::fit(&unit_square_corners(), Bandwidth::Scott).unwrap();
        let near = kde.density_at(&Coordinate::new(0.5, 0.5));
        let far = kde.density_at(&Coordinate::new(50.0, 50.0));
        assert!(near > 0.0);
        assert!(far >= 0.0);
        assert!(far < near);
    }

    #[test]
    fn test_evaluate_matches_density_at() {
        let kde = GaussianKde::fit(&unit_square_corners(), Bandwidth::Scott).unwrap();
        let queries = vec![
            Coordinate::new(0.5, 0.5),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(2.0, -1.0),
        ];
        let batch = kde.evaluate(&queries);
        assert_eq!(batch.len(), queries.len());
        for (q, &d) in queries.iter().zip(&batch) {
            assert!((kde.density_at(q) - d).abs() < 1e-15);
        }
    }

    #[test]
    fn test_too_few_points_is_degenerate() {
        let one = [Coordinate::new(0.0, 0.0)];
        let two = [Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0)];
        assert!(matches!(
            GaussianKde::fit(&one, Bandwidth::Scott),
            Err(Error::DegenerateDensity(_))
        ));
        assert!(matches!(
            GaussianKde::fit(&two, Bandwidth::Scott),
            Err(Error::DegenerateDensity(_))
        ));
    }

    #[test]
    fn test_identical_points_are_degenerate() {
        let coords = vec![Coordinate::new(1.0, 2.0); 10];
        assert!(matches!(
            GaussianKde::fit(&coords, Bandwidth::Scott),
            Err(Error::DegenerateDensity(_))
        ));
    }

    #[test]
    fn test_collinear_points_are_degenerate() {
        let coords: Vec<Coordinate> = (0..10)
            .map(|i| Coordinate::new(i as f64, i as f64 * 2.0))
            .collect();
        assert!(matches!(
            GaussianKde::fit(&coords, Bandwidth::Scott),
            Err(Error::DegenerateDensity(_))
        ));
    }

    #[test]
    fn test_min_max_normalize() {
        let normalized = min_max_normalize(&[1.0, 2.0, 3.0]).unwrap();
        assert!((normalized[0] - 0.0).abs() < 1e-12);
        assert!((normalized[1] - 0.5).abs() < 1e-12);
        assert!((normalized[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_min_max_normalize_degenerate() {
        assert!(min_max_normalize(&[]).is_none());
        assert!(min_max_normalize(&[4.2]).is_none());
        assert!(min_max_normalize(&[7.0, 7.0, 7.0]).is_none());
    }
}
