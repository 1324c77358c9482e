//! Parallel POAV analysis over many sites.
//!
//! Each site is independent except for misalignment, which reads the π axis
//! of bonded neighbours. So we run two passes: build every POAV, then compute
//! and freeze each site's angles against the pass-1 axes. Results are
//! published only after both passes complete.
//!
//! Failures stay per site (`SiteError`) so a driver can skip, flag, or abort.

use std::fmt;

use nalgebra::Vector3;
use rayon::prelude::*;

use crate::angles::{misalignment_angles, pyramidalization_angles, sigma_pi_angles};
use crate::poav::{Poav, PoavAnalysis, PoavKind};
use crate::{BondTriple, PoavAtom, PoavCfg, PoavError, PoavResult, PoavSite};

/// One three-coordinate site: its bonds plus the batch index of the atom at
/// the far end of each bond (`None` when that atom is not part of the batch).
#[derive(Clone, Debug, PartialEq)]
pub struct SiteInput {
    pub bonds: BondTriple,
    pub neighbors: [Option<usize>; 3],
}

impl SiteInput {
    pub fn new(bonds: BondTriple, neighbors: [Option<usize>; 3]) -> Self {
        Self { bonds, neighbors }
    }

    /// Site without neighbour information; misalignment angles will be NaN.
    pub fn isolated(bonds: BondTriple) -> Self {
        Self::new(bonds, [None; 3])
    }
}

/// Failure of one site within a batch.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteError {
    pub site: usize,
    pub kind: PoavKind,
    pub error: PoavError,
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "site {} ({}): {}", self.site, self.kind, self.error)
    }
}

impl std::error::Error for SiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Analyse every site with one variant. Output is index-aligned with `sites`.
pub fn analyze_sites(
    sites: &[SiteInput],
    kind: PoavKind,
    cfg: &PoavCfg,
) -> Vec<Result<PoavResult, SiteError>> {
    let poavs: Vec<Poav> = sites
        .par_iter()
        .map(|s| Poav::build_with_cfg(kind, &s.bonds, *cfg))
        .collect();
    let axes: Vec<Option<Vector3<f64>>> = poavs.par_iter().map(|p| p.pi_axis().ok()).collect();

    let results: Vec<Result<PoavResult, SiteError>> = poavs
        .into_par_iter()
        .enumerate()
        .map(|(i, poav)| {
            finish_site(poav, &sites[i].neighbors, &axes).map_err(|error| SiteError {
                site: i,
                kind,
                error,
            })
        })
        .collect();

    let failures = results.iter().filter(|r| r.is_err()).count();
    for err in results.iter().filter_map(|r| r.as_ref().err()) {
        tracing::debug!(site = err.site, kind = %err.kind, error = %err.error, "site rejected");
    }
    tracing::info!(
        sites = sites.len(),
        failures,
        kind = %kind,
        threads = rayon::current_num_threads(),
        "poav batch"
    );
    results
}

fn finish_site(
    poav: Poav,
    neighbors: &[Option<usize>; 3],
    axes: &[Option<Vector3<f64>>],
) -> Result<PoavResult, PoavError> {
    let mut neighbor_axes = [None; 3];
    for (slot, nbr) in neighbor_axes.iter_mut().zip(neighbors) {
        if let Some(j) = *nbr {
            let axis = axes.get(j).ok_or_else(|| {
                PoavError::precondition(format!(
                    "neighbour index {j} outside batch of {}",
                    axes.len()
                ))
            })?;
            *slot = *axis;
        }
    }

    let sigma_pi = sigma_pi_angles(&poav)?;
    let misalignment = misalignment_angles(&poav, &neighbor_axes)?;
    let mut site = PoavSite::new(poav);
    site.set_sigma_pi_angles(&sigma_pi)?;
    site.set_pyramidalization_angles(&pyramidalization_angles(&sigma_pi))?;
    site.set_misalignment_angles(&misalignment)?;
    let result = site.finalize()?;
    // surface ill-defined descriptors now rather than at serialization
    result.curvature()?;
    result.hybridization()?;
    Ok(result)
}

/// Analyse `atoms` (index-aligned with `sites`) with every variant and store
/// the results in their slots. Returns the per-site failures.
pub fn analyze_atoms(
    atoms: &mut [PoavAtom],
    sites: &[SiteInput],
    cfg: &PoavCfg,
) -> Result<Vec<SiteError>, PoavError> {
    if atoms.len() != sites.len() {
        return Err(PoavError::precondition(format!(
            "{} atoms but {} sites",
            atoms.len(),
            sites.len()
        )));
    }
    let mut failures = Vec::new();
    for kind in PoavKind::ALL {
        let results = analyze_sites(sites, kind, cfg);
        for (atom, res) in atoms.iter_mut().zip(results) {
            match res {
                Ok(result) => atom.poav.set(kind, result)?,
                Err(err) => {
                    atom.poav.take(kind);
                    failures.push(err);
                }
            }
        }
    }
    Ok(failures)
}
