//! Geographic coordinates and extents
//!
//! Positions are plain latitude/longitude pairs in decimal degrees and
//! distances are Euclidean in degree space. That is only meaningful across
//! small extents (a survey area, a municipality); callers working at
//! continental scale must project first.

use serde::{Deserialize, Serialize};

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Squared Euclidean distance to another coordinate
    #[inline]
    pub fn dist_sq(&self, other: &Coordinate) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        dlat * dlat + dlon * dlon
    }

    /// Euclidean distance to another coordinate
    #[inline]
    pub fn dist(&self, other: &Coordinate) -> f64 {
        self.dist_sq(other).sqrt()
    }
}

/// Axis-aligned geographic extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Extent of a set of coordinates.
    ///
    /// Returns `None` for an empty slice. A single coordinate yields a
    /// zero-area box.
    pub fn from_coordinates(coords: &[Coordinate]) -> Option<Self> {
        let first = coords.first()?;
        let mut bbox = Self::new(first.lat, first.lon, first.lat, first.lon);

        for c in &coords[1..] {
            bbox.min_lat = bbox.min_lat.min(c.lat);
            bbox.min_lon = bbox.min_lon.min(c.lon);
            bbox.max_lat = bbox.max_lat.max(c.lat);
            bbox.max_lon = bbox.max_lon.max(c.lon);
        }

        Some(bbox)
    }

    /// Longitudinal span in degrees
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Latitudinal span in degrees
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Midpoint of the extent
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Whether a coordinate lies within the extent (borders included)
    pub fn contains(&self, coord: &Coordinate) -> bool {
        coord.lat >= self.min_lat
            && coord.lat <= self.max_lat
            && coord.lon >= self.min_lon
            && coord.lon <= self.max_lon
    }
}
