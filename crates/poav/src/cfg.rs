//! Numeric tolerances for POAV analysis.
//!
//! Policy
//! - Defaults are fixed constants calibrated on ideal sp2/sp3 sites; callers
//!   with unusual length scales override them through `PoavCfg`.
//! - The coplanarity test is relative: `|t| <= eps_coplanar · |v1||v2||v3|`,
//!   so it does not depend on the bond-length unit or on the variant's scaling.

/// Tolerances used by constructors and derived quantities.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoavCfg {
    /// Bonds shorter than this are rejected as zero-length.
    pub eps_length: f64,
    /// Relative triple-product threshold below which bonds count as coplanar.
    pub eps_coplanar: f64,
    /// Absolute threshold for hybridization-index denominators.
    pub eps_denominator: f64,
}

impl Default for PoavCfg {
    fn default() -> Self {
        Self {
            eps_length: 1e-12,
            eps_coplanar: 1e-10,
            eps_denominator: 1e-12,
        }
    }
}

impl PoavCfg {
    /// True if `t` is zero relative to the product of the three vector norms.
    #[inline]
    pub(crate) fn is_coplanar(&self, t: f64, norm_product: f64) -> bool {
        !t.is_finite() || t.abs() <= self.eps_coplanar * norm_product
    }

    #[inline]
    pub(crate) fn is_zero_denominator(&self, d: f64) -> bool {
        !d.is_finite() || d.abs() <= self.eps_denominator
    }
}
