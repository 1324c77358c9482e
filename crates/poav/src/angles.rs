//! σ-π, pyramidalization, and misalignment angles of one site.
//!
//! These are the values `PoavSite` expects to be injected. Callers may compute
//! them elsewhere; the functions here are the conventional definitions:
//! - σ-π angle θσπ of bond i: angle between Vpi and bond i, folded to ≥ π/2.
//! - pyramidalization θP = θσπ − π/2.
//! - misalignment φ of bond i: with n = b_i × Vpi, φ = |π/2 − ∠(n, Vpi_j)| for
//!   the neighbour j at the far end of bond i.

use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector3;

use crate::poav::PoavAnalysis;
use crate::PoavError;

/// σ-π angles of all three bonds.
pub fn sigma_pi_angles<P: PoavAnalysis + ?Sized>(poav: &P) -> Result<[f64; 3], PoavError> {
    let axis = poav.pi_axis()?;
    Ok(poav
        .base()
        .bond_vectors()
        .map(|b| sigma_pi_angle(&b, &axis)))
}

/// Angle between `axis` and `bond`, folded into [π/2, π].
pub fn sigma_pi_angle(bond: &Vector3<f64>, axis: &Vector3<f64>) -> f64 {
    let a = axis.angle(bond);
    if a < FRAC_PI_2 {
        std::f64::consts::PI - a
    } else {
        a
    }
}

pub fn pyramidalization_angles(sigma_pi: &[f64; 3]) -> [f64; 3] {
    sigma_pi.map(|a| a - FRAC_PI_2)
}

/// Misalignment of the neighbour's π axis against the plane spanned by `bond`
/// and this site's `axis`.
pub fn misalignment_angle(
    bond: &Vector3<f64>,
    axis: &Vector3<f64>,
    neighbor_axis: &Vector3<f64>,
) -> f64 {
    let normal = bond.cross(axis);
    (FRAC_PI_2 - normal.angle(neighbor_axis)).abs()
}

/// Misalignment angles of all three bonds. `None` neighbours yield NaN
/// (the neighbour has no POAV, so the angle is not applicable).
pub fn misalignment_angles<P: PoavAnalysis + ?Sized>(
    poav: &P,
    neighbor_axes: &[Option<Vector3<f64>>; 3],
) -> Result<[f64; 3], PoavError> {
    let axis = poav.pi_axis()?;
    let bonds = poav.base().bond_vectors();
    Ok(std::array::from_fn(|i| match &neighbor_axes[i] {
        Some(nbr) => misalignment_angle(&bonds[i], &axis, nbr),
        None => f64::NAN,
    }))
}
