//! Shared POAV geometry: reciprocal vectors, the π-orbital axis, and the
//! T/H/A descriptors computed from three representative vectors.

use nalgebra::Vector3;

use crate::{BondTriple, PoavCfg, PoavError};

/// Geometry snapshot shared by all variants.
///
/// Invariants:
/// - `b` are the raw bond vectors; `v` are the variant's representative
///   vectors, fixed at construction.
/// - `t0` is the unit-vector triple product divided by 6; `volume` is the
///   active variant's T (equals `t0` unless a variant rescales it).
/// - Everything else is recomputed from `v` on demand.
#[derive(Clone, Debug, PartialEq)]
pub struct PoavBase {
    b: [Vector3<f64>; 3],
    v: [Vector3<f64>; 3],
    t0: f64,
    volume: f64,
    cfg: PoavCfg,
}

impl PoavBase {
    pub(crate) fn new(bonds: &BondTriple, cfg: PoavCfg) -> Self {
        let b = bonds.vectors();
        let [u1, u2, u3] = b.map(|x| x / x.norm());
        let t0 = u1.dot(&u2.cross(&u3)) / 6.0;
        Self {
            b,
            v: b,
            t0,
            volume: t0,
            cfg,
        }
    }

    /// Replace the representative vectors and the active T.
    pub(crate) fn with_representatives(mut self, v: [Vector3<f64>; 3], volume: f64) -> Self {
        self.v = v;
        self.volume = volume;
        self
    }

    #[inline]
    pub fn cfg(&self) -> &PoavCfg {
        &self.cfg
    }

    /// Raw bond vectors b1, b2, b3.
    #[inline]
    pub fn bond_vectors(&self) -> &[Vector3<f64>; 3] {
        &self.b
    }

    /// Representative vectors v1, v2, v3.
    #[inline]
    pub fn representatives(&self) -> &[Vector3<f64>; 3] {
        &self.v
    }

    /// Unit bond vectors V1, V2, V3.
    pub fn unit_bonds(&self) -> [Vector3<f64>; 3] {
        self.b.map(|x| x / x.norm())
    }

    /// Bond lengths R1, R2, R3.
    pub fn bond_lengths(&self) -> [f64; 3] {
        self.b.map(|x| x.norm())
    }

    /// Unit-vector reference T0 = V1·(V2×V3)/6.
    #[inline]
    pub fn t0(&self) -> f64 {
        self.t0
    }

    /// T of the active variant.
    #[inline]
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// t = v1·(v2×v3).
    pub fn triple_product(&self) -> f64 {
        let [v1, v2, v3] = &self.v;
        v1.dot(&v2.cross(v3))
    }

    /// Cyclic cross products (v2×v3, v3×v1, v1×v2).
    pub fn reciprocals(&self) -> [Vector3<f64>; 3] {
        let [v1, v2, v3] = &self.v;
        [v2.cross(v3), v3.cross(v1), v1.cross(v2)]
    }

    /// vpi = (Σ reciprocals) / t. Fails when the representatives are coplanar.
    pub fn vpi(&self) -> Result<Vector3<f64>, PoavError> {
        let t = self.triple_product();
        let norms: f64 = self.v.iter().map(|x| x.norm()).product();
        if self.cfg.is_coplanar(t, norms) {
            return Err(PoavError::degenerate(format!(
                "representative vectors are coplanar (t = {t:e}); π axis is undefined"
            )));
        }
        Ok(self.reciprocal_sum() / t)
    }

    /// Vpi, the unit π-orbital axis.
    pub fn pi_axis(&self) -> Result<Vector3<f64>, PoavError> {
        let vpi = self.vpi()?;
        Ok(vpi / vpi.norm())
    }

    /// A = |vpi|.
    pub fn area(&self) -> Result<f64, PoavError> {
        Ok(self.vpi()?.norm())
    }

    /// H = 3T/A.
    ///
    /// Evaluated as `3T·|t| / |Σ reciprocals|`, which equals `3T/A` whenever A
    /// exists and stays finite (zero) for planar sites where A diverges.
    pub fn curvature(&self) -> Result<f64, PoavError> {
        let s = self.reciprocal_sum().norm();
        let [v1, v2, v3] = &self.v;
        let scale = v2.norm() * v3.norm() + v3.norm() * v1.norm() + v1.norm() * v2.norm();
        if !s.is_finite() || s <= self.cfg.eps_coplanar * scale {
            return Err(PoavError::degenerate(
                "reciprocal vectors cancel; curvature is undefined",
            ));
        }
        Ok(3.0 * self.volume * self.triple_product().abs() / s)
    }

    fn reciprocal_sum(&self) -> Vector3<f64> {
        let [r1, r2, r3] = self.reciprocals();
        r1 + r2 + r3
    }
}
