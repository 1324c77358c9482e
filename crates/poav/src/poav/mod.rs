//! π-Orbital Axis Vector analysis of one three-coordinate atom.
//!
//! Purpose
//! - Given the three σ-bond vectors of an atom, compute the local π-orbital
//!   axis and the descriptors T, H, A plus hybridization indices.
//! - Three formalisms (POAV1, POAV2, POAVR) differ only in how they pick the
//!   representative vectors and T; everything else is shared in `PoavBase`.
//!
//! Why this design (short)
//! - The variant set is closed, so it is an enum (`Poav`) with one capability
//!   trait (`PoavAnalysis`) instead of open dynamic dispatch.
//! - Geometry is an immutable snapshot; derived quantities are pure functions
//!   of it (no caches that could go stale).
//! - Degenerate sites surface as `PoavError::DegenerateGeometry` on the
//!   quantity that is ill-defined, never as NaN/Inf.

mod base;
mod variants;

pub use base::PoavBase;
pub use variants::{Poav1, Poav2, PoavR};

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector3;

use crate::{BondTriple, PoavCfg, PoavError};

/// Tag of a POAV formalism.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PoavKind {
    Poav1,
    Poav2,
    PoavR,
}

impl PoavKind {
    pub const ALL: [PoavKind; 3] = [PoavKind::Poav1, PoavKind::Poav2, PoavKind::PoavR];

    pub fn name(self) -> &'static str {
        match self {
            PoavKind::Poav1 => "POAV1",
            PoavKind::Poav2 => "POAV2",
            PoavKind::PoavR => "POAVR",
        }
    }
}

impl fmt::Display for PoavKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PoavKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "poav1" | "1" => Ok(PoavKind::Poav1),
            "poav2" | "2" => Ok(PoavKind::Poav2),
            "poavr" | "r" => Ok(PoavKind::PoavR),
            other => Err(format!("unknown POAV variant `{other}`")),
        }
    }
}

/// Capability shared by every variant: T, H, A, Vpi over a `PoavBase`.
pub trait PoavAnalysis {
    fn kind(&self) -> PoavKind;

    fn base(&self) -> &PoavBase;

    /// T of this variant.
    fn volume(&self) -> f64 {
        self.base().volume()
    }

    /// H = 3T/A.
    fn curvature(&self) -> Result<f64, PoavError> {
        self.base().curvature()
    }

    /// A = |vpi|.
    fn area(&self) -> Result<f64, PoavError> {
        self.base().area()
    }

    /// Vpi, the unit π-orbital axis.
    fn pi_axis(&self) -> Result<Vector3<f64>, PoavError> {
        self.base().pi_axis()
    }
}

impl PoavAnalysis for Poav1 {
    fn kind(&self) -> PoavKind {
        PoavKind::Poav1
    }
    fn base(&self) -> &PoavBase {
        Poav1::base(self)
    }
}

impl PoavAnalysis for Poav2 {
    fn kind(&self) -> PoavKind {
        PoavKind::Poav2
    }
    fn base(&self) -> &PoavBase {
        Poav2::base(self)
    }
}

impl PoavAnalysis for PoavR {
    fn kind(&self) -> PoavKind {
        PoavKind::PoavR
    }
    fn base(&self) -> &PoavBase {
        PoavR::base(self)
    }
}

/// One POAV result of any variant.
#[derive(Clone, Debug, PartialEq)]
pub enum Poav {
    Poav1(Poav1),
    Poav2(Poav2),
    PoavR(PoavR),
}

impl Poav {
    pub fn build(kind: PoavKind, bonds: &BondTriple) -> Self {
        Self::build_with_cfg(kind, bonds, PoavCfg::default())
    }

    pub fn build_with_cfg(kind: PoavKind, bonds: &BondTriple, cfg: PoavCfg) -> Self {
        match kind {
            PoavKind::Poav1 => Poav::Poav1(Poav1::with_cfg(bonds, cfg)),
            PoavKind::Poav2 => Poav::Poav2(Poav2::with_cfg(bonds, cfg)),
            PoavKind::PoavR => Poav::PoavR(PoavR::with_cfg(bonds, cfg)),
        }
    }

    /// Hybridization indices of this variant.
    ///
    /// POAV1 needs the σ-π angles; `None` there is a `MissingData` error.
    /// POAV2 and POAVR ignore the argument.
    pub fn hybridization(
        &self,
        sigma_pi_angles: Option<&[f64; 3]>,
    ) -> Result<Hybridization, PoavError> {
        match self {
            Poav::Poav1(p) => {
                let angles = sigma_pi_angles.ok_or(PoavError::MissingData {
                    field: "sigma_pi_angles",
                })?;
                let m = p.m(angles)?;
                Ok(Hybridization::Poav1 { m, n: 3.0 * m + 2.0 })
            }
            Poav::Poav2(p) => {
                let [n1, n2, n3] = p.indices()?;
                Ok(Hybridization::Poav2 {
                    m: p.m()?,
                    n1,
                    n2,
                    n3,
                })
            }
            Poav::PoavR(_) => Ok(Hybridization::PoavR),
        }
    }
}

impl PoavAnalysis for Poav {
    fn kind(&self) -> PoavKind {
        match self {
            Poav::Poav1(_) => PoavKind::Poav1,
            Poav::Poav2(_) => PoavKind::Poav2,
            Poav::PoavR(_) => PoavKind::PoavR,
        }
    }

    fn base(&self) -> &PoavBase {
        match self {
            Poav::Poav1(p) => p.base(),
            Poav::Poav2(p) => p.base(),
            Poav::PoavR(p) => p.base(),
        }
    }
}

impl From<Poav1> for Poav {
    fn from(p: Poav1) -> Self {
        Poav::Poav1(p)
    }
}

impl From<Poav2> for Poav {
    fn from(p: Poav2) -> Self {
        Poav::Poav2(p)
    }
}

impl From<PoavR> for Poav {
    fn from(p: PoavR) -> Self {
        Poav::PoavR(p)
    }
}

/// Variant-specific hybridization indices (spⁿ notation).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Hybridization {
    Poav1 { m: f64, n: f64 },
    Poav2 { m: f64, n1: f64, n2: f64, n3: f64 },
    PoavR,
}

impl Hybridization {
    /// Key/value pairs appended to a serialized record.
    pub fn entries(&self) -> Vec<(&'static str, f64)> {
        match *self {
            Hybridization::Poav1 { m, n } => vec![("m", m), ("n", n)],
            Hybridization::Poav2 { m, n1, n2, n3 } => {
                vec![("m", m), ("n1", n1), ("n2", n2), ("n3", n3)]
            }
            Hybridization::PoavR => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests;
