//! Curated surface for downstream reporting and bindings (UNSTABLE).
//!
//! Convenience helpers that chain the usual steps for a single site:
//! build the POAV, derive the injected angles, finalize, serialize.

pub use crate::angles::{
    misalignment_angle, misalignment_angles, pyramidalization_angles, sigma_pi_angle,
    sigma_pi_angles,
};
pub use crate::rand3::{SeedReplay, SiteSample, SiteSampleParams, SiteSampler};

use nalgebra::Vector3;

use crate::{BondTriple, Poav, PoavCfg, PoavError, PoavKind, PoavRecord, PoavResult, PoavSite};

/// Pre: `bonds` are the three σ bonds of one atom.
/// Post: the finalized POAV of `kind`, with misalignment taken against
/// `neighbor_axes` (NaN where `None`).
pub fn analyze_site(
    kind: PoavKind,
    bonds: &BondTriple,
    neighbor_axes: &[Option<Vector3<f64>>; 3],
    cfg: PoavCfg,
) -> Result<PoavResult, PoavError> {
    let poav = Poav::build_with_cfg(kind, bonds, cfg);
    let sigma_pi = sigma_pi_angles(&poav)?;
    let misalignment = misalignment_angles(&poav, neighbor_axes)?;
    let mut site = PoavSite::new(poav);
    site.set_sigma_pi_angles(&sigma_pi)?;
    site.set_pyramidalization_angles(&pyramidalization_angles(&sigma_pi))?;
    site.set_misalignment_angles(&misalignment)?;
    site.finalize()
}

/// `analyze_site` followed by `todict`.
pub fn site_record(
    kind: PoavKind,
    bonds: &BondTriple,
    rad2deg: bool,
) -> Result<PoavRecord, PoavError> {
    analyze_site(kind, bonds, &[None; 3], PoavCfg::default())?.todict(rad2deg)
}
