//! Sweep the cone angle of a symmetric site and print POAV1/POAV2 indices.
//!
//! Purpose
//! - Show how n moves from 2 (flat sp2) towards 3 (sp3) as θP grows, and
//!   where the flat limit stops having a finite π-axis magnitude.

use poav::api::site_record;
use poav::rand3::{SiteSampleParams, SiteSampler};
use poav::PoavKind;

fn main() {
    println!("{:>8} {:>10} {:>10} {:>10}", "θP(deg)", "n(POAV1)", "m(POAV2)", "H");
    for step in 0..=10 {
        let theta_p = (step as f64 * 2.0).to_radians();
        let params = SiteSampleParams {
            pyramidalization_min: theta_p,
            pyramidalization_max: theta_p,
            bond_length_min: 1.42,
            bond_length_max: 1.42,
            azimuth_jitter: 0.0,
            random_orientation: false,
        };
        let sample = SiteSampler::generate_single(&params, 0).expect("valid params");
        match (
            site_record(PoavKind::Poav1, &sample.bonds, false),
            site_record(PoavKind::Poav2, &sample.bonds, false),
        ) {
            (Ok(r1), Ok(r2)) => println!(
                "{:>8.1} {:>10.4} {:>10.4} {:>10.5}",
                theta_p.to_degrees(),
                r1.get("n").unwrap_or(f64::NAN),
                r2.get("m").unwrap_or(f64::NAN),
                r1.get("H").unwrap_or(f64::NAN),
            ),
            (Err(e), _) | (_, Err(e)) => {
                println!("{:>8.1} {e}", theta_p.to_degrees())
            }
        }
    }
}
