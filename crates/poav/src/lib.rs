//! Pi-Orbital Axis Vector (POAV) analysis of curved sp2 carbon.
//!
//! For an atom with three σ bonds this crate computes the local π-orbital
//! axis, the pyramidalization/σ-π/misalignment angles, the T, H, A
//! descriptors, and POAV1/POAV2 hybridization indices.
//!
//! Layout
//! - `bonds`: validated bond triples and pairwise bond angles.
//! - `poav`: the geometry engine and the three variants.
//! - `site`: write-once angle injection, finalization, and `todict` records.
//! - `angles`: conventional σ-π, pyramidalization, and misalignment angles.
//! - `attach`: per-variant result slots on atom records.
//! - `batch`: parallel two-pass analysis over many sites.
//! - `rand3`: seeded site sampler for tests and benchmarks.
//!
//! Out of scope: neighbour search and structure file formats. Callers supply
//! bond vectors and, for misalignment, neighbour indices.

pub mod angles;
pub mod api;
pub mod attach;
pub mod batch;
pub mod bonds;
pub mod cfg;
pub mod error;
pub mod poav;
pub mod rand3;
pub mod site;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use attach::{PoavAtom, PoavSlots};
pub use batch::{analyze_atoms, analyze_sites, SiteError, SiteInput};
pub use bonds::{Bond, BondAngles, BondTriple};
pub use cfg::PoavCfg;
pub use error::PoavError;
pub use poav::{
    Hybridization, Poav, Poav1, Poav2, PoavAnalysis, PoavBase, PoavKind, PoavR,
};
pub use site::{AngleSlots, PoavRecord, PoavResult, PoavSite, SiteAngles, ANGLE_KEYS};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::angles::{
        misalignment_angles, pyramidalization_angles, sigma_pi_angles,
    };
    pub use crate::{
        analyze_sites, BondTriple, Hybridization, Poav, PoavAnalysis, PoavCfg, PoavError,
        PoavKind, PoavRecord, PoavResult, PoavSite, SiteInput,
    };
    pub use nalgebra::Vector3 as Vec3;
}
