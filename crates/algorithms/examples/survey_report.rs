//! Survey report demo: synthetic rapid biodiversity assessment
//!
//! Builds three synthetic observation groups around two survey sites in the
//! Santiago basin:
//! - birds: dense aggregations at a wetland and a scrub site, plus scattered records
//! - anurans: one dense aggregation at the wetland
//! - bats: a handful of scattered roost records
//!
//! Then runs the full analysis and prints, per group and for the combined
//! "total" group:
//!   - species richness, abundance and Shannon-Wiener diversity
//!   - hotspot centroids (density threshold + clustering)
//! plus the survey center and extent for map framing.
//!
//! Run:
//!   cargo run -p biodivmap-algorithms --example survey_report

use biodivmap_algorithms::hotspot::HotspotParams;
use biodivmap_algorithms::survey::{GroupSummary, Survey};
use biodivmap_core::{Observation, ObservationSet};

/// Survey sites (lat, lon)
const WETLAND: (f64, f64) = (-33.45, -70.66);
const SCRUB: (f64, f64) = (-33.43, -70.64);

fn main() {
    // --- 1. Build synthetic observation groups ---
    let mut survey = Survey::new();
    survey.add_group("birds", birds());
    survey.add_group("anurans", anurans());
    survey.add_group("bats", bats());
    println!("Synthetic survey: {} groups", survey.len());

    // --- 2. Analyze with default parameters ---
    let params = HotspotParams::default();
    println!(
        "Parameters: density threshold = {}, eps = {} deg, min samples = {}",
        params.density_threshold, params.eps, params.min_samples
    );

    let report = survey.analyze(&params).expect("analysis failed");

    // --- 3. Per-group summaries ---
    for group in &report.groups {
        print_summary(group);
    }

    // --- 4. Combined totals ---
    print_summary(&report.combined);

    // --- 5. Map framing ---
    if let Some(center) = report.center {
        println!("\nMap center: ({:.5}, {:.5})", center.lat, center.lon);
    }
    if let Some(extent) = report.extent {
        println!(
            "Extent:     lat [{:.5}, {:.5}], lon [{:.5}, {:.5}]",
            extent.min_lat, extent.max_lat, extent.min_lon, extent.max_lon
        );
    }
}

fn print_summary(group: &GroupSummary) {
    let m = &group.metrics;
    println!(
        "\n{}: {} species, {} records, H' = {:.2}",
        group.name, m.richness, m.abundance, m.shannon
    );
    if group.hotspots.is_empty() {
        println!("  no hotspots");
    } else {
        println!("  hotspots ({}):", group.hotspots.len());
        for h in &group.hotspots {
            println!("    ({:.5}, {:.5})", h.lat, h.lon);
        }
    }
}

fn birds() -> ObservationSet {
    let mut set = ObservationSet::new();
    site_records(&mut set, "zorzal", WETLAND, 12, 0);
    site_records(&mut set, "chincol", SCRUB, 12, 50);
    scattered_records(&mut set, "queltehue", 6, 0);
    set
}

fn anurans() -> ObservationSet {
    let mut set = ObservationSet::new();
    site_records(&mut set, "sapito_de_rulo", WETLAND, 8, 25);
    scattered_records(&mut set, "rana_chilena", 2, 7);
    set
}

fn bats() -> ObservationSet {
    let mut set = ObservationSet::new();
    scattered_records(&mut set, "murcielago_comun", 3, 14);
    scattered_records(&mut set, "murcielago_orejudo", 2, 21);
    set
}

/// `count` records of one species jittered around a site, all within ~30 m
/// of each other so they aggregate under the default parameters.
fn site_records(
    set: &mut ObservationSet,
    species: &str,
    site: (f64, f64),
    count: usize,
    seed: usize,
) {
    for i in 0..count {
        let k = seed + i;
        let jlat = ((k * 7 + 13) % 100) as f64 / 100.0 * 0.0006 - 0.0003;
        let jlon = ((k * 11 + 37) % 100) as f64 / 100.0 * 0.0006 - 0.0003;
        set.push(Observation::new(species, site.0 + jlat, site.1 + jlon));
    }
}

/// Isolated single records spread over the wider survey area, far enough
/// apart (and from the sites) that none of them cluster.
fn scattered_records(set: &mut ObservationSet, species: &str, count: usize, seed: usize) {
    for i in 0..count {
        let k = (seed + i * 31) % 100;
        let lat = -33.4725 + (k % 10) as f64 * 0.005;
        let lon = -70.6825 + (k / 10) as f64 * 0.005;
        set.push(Observation::new(species, lat, lon));
    }
}
