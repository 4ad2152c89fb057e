//! Biodiversity metrics for observation sets
//!
//! Computes community ecology indices from species sighting records.
//! Metrics are derived on demand from the observation set; nothing is
//! cached or persisted.

use serde::{Deserialize, Serialize};

use biodivmap_core::{Algorithm, ObservationSet, Result};

/// Diversity metrics for one observation set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiversityMetrics {
    /// Number of distinct species
    pub richness: usize,
    /// Total number of observation records
    pub abundance: usize,
    /// Shannon-Wiener index (base-2 log), rounded to 2 decimal places
    pub shannon: f64,
}

impl DiversityMetrics {
    fn empty() -> Self {
        Self {
            richness: 0,
            abundance: 0,
            shannon: 0.0,
        }
    }
}

/// Compute richness, abundance and the Shannon-Wiener index of a set.
///
/// Richness is the count of distinct species names, abundance the total
/// record count, and the Shannon-Wiener index
/// `H = -sum(pi * log2(pi))` over the proportion pi of each species,
/// rounded to 2 decimal places for reporting.
///
/// An empty set yields all-zero metrics; a single-species set yields
/// `shannon == 0`. The result does not depend on record order.
pub fn compute_metrics(observations: &ObservationSet) -> DiversityMetrics {
    if observations.is_empty() {
        return DiversityMetrics::empty();
    }

    let counts = observations.species_counts();
    let count_values: Vec<usize> = counts.values().copied().collect();

    DiversityMetrics {
        richness: counts.len(),
        abundance: observations.len(),
        shannon: round2(shannon_index(&count_values)),
    }
}

/// Shannon-Wiener index (H') over raw per-species counts
///
/// `H' = -sum(pi * log2(pi))` where pi is the proportion of species i.
/// Unrounded. Zero counts are skipped; an all-zero or empty slice yields 0.
pub fn shannon_index(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let total_f = total as f64;
    let mut h = 0.0;

    for &count in counts {
        if count > 0 {
            let pi = count as f64 / total_f;
            h -= pi * pi.log2();
        }
    }

    h
}

/// Simpson diversity index (1 - D) over raw per-species counts
///
/// `D = sum(pi^2)`, result = `1 - D`: the probability that two randomly
/// drawn records belong to different species. Range [0, 1): 0 = single
/// species, approaches 1 = many equally abundant species.
pub fn simpson_index(counts: &[usize]) -> f64 {
    let total: usize = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }

    let total_f = total as f64;
    let mut d = 0.0;

    for &count in counts {
        let pi = count as f64 / total_f;
        d += pi * pi;
    }

    1.0 - d
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Diversity metrics computation
#[derive(Debug, Clone, Default)]
pub struct DiversityCalculator;

impl Algorithm for DiversityCalculator {
    type Input = ObservationSet;
    type Output = DiversityMetrics;
    type Params = ();
    type Error = biodivmap_core::Error;

    fn name(&self) -> &'static str {
        "DiversityMetrics"
    }

    fn description(&self) -> &'static str {
        "Richness, abundance and Shannon-Wiener diversity of an observation set"
    }

    fn execute(&self, input: Self::Input, _params: Self::Params) -> Result<Self::Output> {
        Ok(compute_metrics(&input))
    }
}
