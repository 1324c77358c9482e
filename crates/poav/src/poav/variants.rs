//! The three POAV formalisms.
//!
//! - POAV1 (Haddon): unit bond vectors; m, n from the mean σ-π angle.
//! - POAV2: bond directions weighted by the cosine of the opposite bond
//!   angle; direction-dependent indices n1, n2, n3 and a combined m.
//! - POAVR: bond vectors weighted by their lengths.

use nalgebra::Vector3;

use super::base::PoavBase;
use crate::{BondAngles, BondTriple, PoavCfg, PoavError};

/// Unit-bond-vector variant.
#[derive(Clone, Debug, PartialEq)]
pub struct Poav1 {
    base: PoavBase,
}

impl Poav1 {
    pub fn new(bonds: &BondTriple) -> Self {
        Self::with_cfg(bonds, PoavCfg::default())
    }

    pub fn with_cfg(bonds: &BondTriple, cfg: PoavCfg) -> Self {
        let base = PoavBase::new(bonds, cfg);
        let v = base.unit_bonds();
        let t0 = base.t0();
        Self {
            base: base.with_representatives(v, t0),
        }
    }

    #[inline]
    pub fn base(&self) -> &PoavBase {
        &self.base
    }

    /// m = 2cos²θ̄ / (1 − 3cos²θ̄), θ̄ the mean σ-π angle.
    pub fn m(&self, sigma_pi_angles: &[f64; 3]) -> Result<f64, PoavError> {
        let mean = sigma_pi_angles.iter().sum::<f64>() / 3.0;
        let cos2 = mean.cos().powi(2);
        let denom = 1.0 - 3.0 * cos2;
        if self.base.cfg().is_zero_denominator(denom) {
            return Err(PoavError::degenerate(format!(
                "1 − 3cos²θσπ vanishes at mean σ-π angle {mean}; m is unbounded"
            )));
        }
        Ok(2.0 * cos2 / denom)
    }

    /// n = 3m + 2.
    pub fn n(&self, sigma_pi_angles: &[f64; 3]) -> Result<f64, PoavError> {
        Ok(3.0 * self.m(sigma_pi_angles)? + 2.0)
    }
}

/// Angle-weighted-projection variant.
///
/// `v_i = cos(θ_opp(i)) · V_i`, where θ_opp(i) is the angle between the two
/// bonds other than i. The cosines are stored as cosa12, cosa13, cosa23 in
/// `BondAngles::PAIRS` order.
#[derive(Clone, Debug, PartialEq)]
pub struct Poav2 {
    base: PoavBase,
    cosines: [f64; 3],
}

impl Poav2 {
    /// Use the pairwise angles measured from the bond vectors themselves.
    pub fn new(bonds: &BondTriple) -> Self {
        Self::with_angles(bonds, bonds.angles(), PoavCfg::default())
    }

    pub fn with_cfg(bonds: &BondTriple, cfg: PoavCfg) -> Self {
        Self::with_angles(bonds, bonds.angles(), cfg)
    }

    /// Use caller-supplied pairwise angles (same pair order as `BondAngles`).
    pub fn with_angles(bonds: &BondTriple, angles: BondAngles, cfg: PoavCfg) -> Self {
        let base = PoavBase::new(bonds, cfg);
        let units = base.unit_bonds();
        let v: [Vector3<f64>; 3] =
            std::array::from_fn(|i| angles.opposite(i).cos() * units[i]);
        let cosines = angles.cosines();
        let volume = -cosines.iter().product::<f64>() * base.t0();
        Self {
            base: base.with_representatives(v, volume),
            cosines,
        }
    }

    #[inline]
    pub fn base(&self) -> &PoavBase {
        &self.base
    }

    #[inline]
    pub fn cosa12(&self) -> f64 {
        self.cosines[0]
    }
    #[inline]
    pub fn cosa13(&self) -> f64 {
        self.cosines[1]
    }
    #[inline]
    pub fn cosa23(&self) -> f64 {
        self.cosines[2]
    }

    /// n1 = −cosa23 / (cosa12·cosa13).
    pub fn n1(&self) -> Result<f64, PoavError> {
        self.ratio("n1", self.cosa23(), self.cosa12() * self.cosa13())
    }

    /// n2 = −cosa13 / (cosa12·cosa23).
    pub fn n2(&self) -> Result<f64, PoavError> {
        self.ratio("n2", self.cosa13(), self.cosa12() * self.cosa23())
    }

    /// n3 = −cosa12 / (cosa23·cosa13).
    pub fn n3(&self) -> Result<f64, PoavError> {
        self.ratio("n3", self.cosa12(), self.cosa23() * self.cosa13())
    }

    /// (n1, n2, n3).
    pub fn indices(&self) -> Result<[f64; 3], PoavError> {
        Ok([self.n1()?, self.n2()?, self.n3()?])
    }

    /// m = 1 / Σ 1/(1+n_i) − 1.
    pub fn m(&self) -> Result<f64, PoavError> {
        let cfg = self.base.cfg();
        let mut sum = 0.0;
        for n in self.indices()? {
            if cfg.is_zero_denominator(1.0 + n) {
                return Err(PoavError::degenerate(format!("1 + n_i vanishes (n_i = {n})")));
            }
            sum += 1.0 / (1.0 + n);
        }
        if cfg.is_zero_denominator(sum) {
            return Err(PoavError::degenerate("Σ 1/(1+n_i) vanishes; m is unbounded"));
        }
        Ok(1.0 / sum - 1.0)
    }

    fn ratio(&self, name: &str, num: f64, denom: f64) -> Result<f64, PoavError> {
        if self.base.cfg().is_zero_denominator(denom) {
            return Err(PoavError::degenerate(format!(
                "{name}: product of bond-angle cosines vanishes ({denom:e})"
            )));
        }
        Ok(-num / denom)
    }
}

/// Bond-length-weighted variant: `v_i = R_i·V_i`, `T = R1·R2·R3·T0`.
#[derive(Clone, Debug, PartialEq)]
pub struct PoavR {
    base: PoavBase,
}

impl PoavR {
    pub fn new(bonds: &BondTriple) -> Self {
        Self::with_cfg(bonds, PoavCfg::default())
    }

    pub fn with_cfg(bonds: &BondTriple, cfg: PoavCfg) -> Self {
        let base = PoavBase::new(bonds, cfg);
        let lengths = base.bond_lengths();
        let units = base.unit_bonds();
        let v: [Vector3<f64>; 3] = std::array::from_fn(|i| lengths[i] * units[i]);
        let volume = lengths.iter().product::<f64>() * base.t0();
        Self {
            base: base.with_representatives(v, volume),
        }
    }

    #[inline]
    pub fn base(&self) -> &PoavBase {
        &self.base
    }
}
