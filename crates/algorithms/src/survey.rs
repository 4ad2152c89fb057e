//! Survey-level analysis reports
//!
//! A survey is an ordered list of named observation groups (one per
//! taxonomic group, e.g. birds / anurans / bats). Analysis produces the
//! per-group and combined diversity metrics and hotspot lists, plus the
//! framing geometry (mean center and extent) a map-rendering consumer
//! needs to display them.

use serde::{Deserialize, Serialize};

use biodivmap_core::{BoundingBox, Coordinate, ObservationSet, Result};

use crate::diversity::{compute_metrics, DiversityMetrics};
use crate::hotspot::{find_hotspots, HotspotParams};

/// Name given to the all-groups aggregate summary
pub const COMBINED_GROUP: &str = "total";

/// An ordered collection of named observation groups.
#[derive(Debug, Clone, Default)]
pub struct Survey {
    groups: Vec<(String, ObservationSet)>,
}

impl Survey {
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Add a named group. Report order follows insertion order.
    pub fn add_group(&mut self, name: impl Into<String>, observations: ObservationSet) {
        self.groups.push((name.into(), observations));
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Metrics and hotspots for every group and for their union.
    ///
    /// The union is a multiset concatenation of all groups, so shared
    /// species are counted once for richness while every record keeps
    /// contributing to abundance. The report center is the arithmetic
    /// mean of all coordinates and the extent their bounding box; both
    /// are `None` when the survey holds no records.
    pub fn analyze(&self, params: &HotspotParams) -> Result<SurveyReport> {
        let mut groups = Vec::with_capacity(self.groups.len());
        for (name, observations) in &self.groups {
            groups.push(summarize_group(name, observations, params)?);
        }

        let combined_set: ObservationSet = self
            .groups
            .iter()
            .flat_map(|(_, set)| set.iter().cloned())
            .collect();

        let coords = combined_set.coordinates();
        let center = mean_coordinate(&coords);
        let extent = combined_set.bounds();
        let combined = summarize_group(COMBINED_GROUP, &combined_set, params)?;

        Ok(SurveyReport {
            groups,
            combined,
            center,
            extent,
        })
    }
}

/// Analysis results for one named group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub name: String,
    pub metrics: DiversityMetrics,
    pub hotspots: Vec<Coordinate>,
}

/// Full survey report: per-group summaries, the combined summary and the
/// framing geometry of all coordinates together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyReport {
    pub groups: Vec<GroupSummary>,
    pub combined: GroupSummary,
    /// Arithmetic mean of all coordinates; `None` for an empty survey
    pub center: Option<Coordinate>,
    /// Bounding box of all coordinates; `None` for an empty survey
    pub extent: Option<BoundingBox>,
}

fn summarize_group(
    name: &str,
    observations: &ObservationSet,
    params: &HotspotParams,
) -> Result<GroupSummary> {
    Ok(GroupSummary {
        name: name.to_string(),
        metrics: compute_metrics(observations),
        hotspots: find_hotspots(&observations.coordinates(), params)?,
    })
}

/// Arithmetic mean of a coordinate set; `None` when empty.
pub fn mean_coordinate(coords: &[Coordinate]) -> Option<Coordinate> {
    if coords.is_empty() {
        return None;
    }

    let n = coords.len() as f64;
    let (lat_sum, lon_sum) = coords
        .iter()
        .fold((0.0, 0.0), |(lat, lon), c| (lat + c.lat, lon + c.lon));

    Some(Coordinate::new(lat_sum / n, lon_sum / n))
}
