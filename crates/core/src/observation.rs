//! Species observation records

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Coordinate};

/// A single georeferenced species sighting.
///
/// The species name is a free-form identifier; records sharing a name are
/// counted as the same species. Duplicate records (same species, same
/// position) are legitimate and count separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Species identifier
    pub species: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl Observation {
    pub fn new(species: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            species: species.into(),
            latitude,
            longitude,
        }
    }

    /// Position of the sighting
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// An ordered collection of observations, typically one taxonomic group.
///
/// Sets are built once by the data-loading side and consumed read-only by
/// the analysis operations. Combining groups is a multiset union: `extend`
/// one set with the records of the others, duplicates preserved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservationSet {
    observations: Vec<Observation>,
}

impl ObservationSet {
    pub fn new() -> Self {
        Self {
            observations: Vec::new(),
        }
    }

    pub fn push(&mut self, observation: Observation) {
        self.observations.push(observation);
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    /// Positions of all observations, in record order.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.observations.iter().map(|o| o.coordinate()).collect()
    }

    /// Number of records per distinct species.
    pub fn species_counts(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for obs in &self.observations {
            *counts.entry(obs.species.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Geographic extent of the set. `None` when empty.
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_coordinates(&self.coordinates())
    }
}

impl FromIterator<Observation> for ObservationSet {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self {
            observations: iter.into_iter().collect(),
        }
    }
}

impl Extend<Observation> for ObservationSet {
    fn extend<I: IntoIterator<Item = Observation>>(&mut self, iter: I) {
        self.observations.extend(iter);
    }
}

impl IntoIterator for ObservationSet {
    type Item = Observation;
    type IntoIter = std::vec::IntoIter<Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> ObservationSet {
        vec![
            Observation::new("zorzal", -33.45, -70.66),
            Observation::new("queltehue", -33.46, -70.65),
            Observation::new("zorzal", -33.44, -70.67),
            Observation::new("zorzal", -33.45, -70.66),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_len_and_iter_order() {
        let set = sample_set();
        assert_eq!(set.len(), 4);
        assert!(!set.is_empty());

        let species: Vec<&str> = set.iter().map(|o| o.species.as_str()).collect();
        assert_eq!(species, vec!["zorzal", "queltehue", "zorzal", "zorzal"]);
    }

    #[test]
    fn test_species_counts() {
        let set = sample_set();
        let counts = set.species_counts();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["zorzal"], 3);
        assert_eq!(counts["queltehue"], 1);
    }

    #[test]
    fn test_coordinates_preserve_order_and_duplicates() {
        let set = sample_set();
        let coords = set.coordinates();
        assert_eq!(coords.len(), 4);
        assert_eq!(coords[0], coords[3]);
        assert!((coords[1].lat - -33.46).abs() < 1e-12);
    }

    #[test]
    fn test_bounds() {
        let set = sample_set();
        let bbox = set.bounds().unwrap();
        assert!((bbox.min_lat - -33.46).abs() < 1e-12);
        assert!((bbox.max_lat - -33.44).abs() < 1e-12);
        assert!((bbox.min_lon - -70.67).abs() < 1e-12);
        assert!((bbox.max_lon - -70.65).abs() < 1e-12);

        assert!(ObservationSet::new().bounds().is_none());
    }

    #[test]
    fn test_extend_is_multiset_union() {
        let mut all = sample_set();
        let other = sample_set();
        all.extend(other.into_iter());

        assert_eq!(all.len(), 8);
        assert_eq!(all.species_counts()["zorzal"], 6);
    }
}
