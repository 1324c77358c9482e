//! Sigma-bond triples: the per-atom input of every POAV variant.
//!
//! - `Bond`: one sigma-bond vector from the analysed atom to a neighbour.
//! - `BondTriple`: exactly three bonds in caller order; every derived angle
//!   array is indexed against this order.
//! - `BondAngles`: the three pairwise bond angles, in pair order
//!   (1,2), (1,3), (2,3).

use nalgebra::Vector3;

use crate::{PoavCfg, PoavError};

/// Sigma-bond vector; the length is its Euclidean norm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bond {
    pub vector: Vector3<f64>,
}

impl Bond {
    #[inline]
    pub fn new(vector: Vector3<f64>) -> Self {
        Self { vector }
    }
    #[inline]
    pub fn length(&self) -> f64 {
        self.vector.norm()
    }
    /// Unit vector along the bond. Only meaningful for non-zero bonds, which
    /// `BondTriple` guarantees.
    #[inline]
    pub fn unit(&self) -> Vector3<f64> {
        self.vector / self.length()
    }
}

impl From<Vector3<f64>> for Bond {
    fn from(vector: Vector3<f64>) -> Self {
        Self::new(vector)
    }
}

/// Exactly three non-zero sigma bonds of one atom.
///
/// Invariants:
/// - `len() == 3` always; construction rejects any other count.
/// - No bond is shorter than `PoavCfg::eps_length`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BondTriple {
    bonds: [Bond; 3],
}

impl BondTriple {
    /// Validate a caller-ordered bond list with default tolerances.
    pub fn new(bonds: &[Bond]) -> Result<Self, PoavError> {
        Self::with_cfg(bonds, &PoavCfg::default())
    }

    pub fn with_cfg(bonds: &[Bond], cfg: &PoavCfg) -> Result<Self, PoavError> {
        let bonds: [Bond; 3] = bonds.try_into().map_err(|_| {
            PoavError::precondition(format!("expected exactly 3 bonds, got {}", bonds.len()))
        })?;
        for (i, bond) in bonds.iter().enumerate() {
            let len = bond.length();
            if !len.is_finite() || len <= cfg.eps_length {
                return Err(PoavError::precondition(format!(
                    "bond {} has zero or non-finite length ({len})",
                    i + 1
                )));
            }
        }
        Ok(Self { bonds })
    }

    pub fn from_vectors(vectors: [Vector3<f64>; 3]) -> Result<Self, PoavError> {
        Self::new(&vectors.map(Bond::new))
    }

    #[inline]
    pub fn bonds(&self) -> &[Bond; 3] {
        &self.bonds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    pub fn vectors(&self) -> [Vector3<f64>; 3] {
        self.bonds.map(|b| b.vector)
    }

    #[inline]
    pub fn lengths(&self) -> [f64; 3] {
        self.bonds.map(|b| b.length())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bond> {
        self.bonds.iter()
    }

    /// Pairwise bond angles in `BondAngles::PAIRS` order.
    pub fn angles(&self) -> BondAngles {
        let b = &self.bonds;
        BondAngles {
            angles: BondAngles::PAIRS.map(|(i, j)| b[i].vector.angle(&b[j].vector)),
        }
    }
}

impl std::ops::Index<usize> for BondTriple {
    type Output = Bond;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bonds[index]
    }
}

/// Pairwise angles (radians) between the bonds of a triple.
///
/// `angles[k]` is the angle between bonds `PAIRS[k].0` and `PAIRS[k].1`
/// (zero-based), i.e. the order θ12, θ13, θ23.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BondAngles {
    pub angles: [f64; 3],
}

impl BondAngles {
    /// Bond pair (zero-based) for each angle slot.
    pub const PAIRS: [(usize, usize); 3] = [(0, 1), (0, 2), (1, 2)];

    /// Accept externally measured angles; each must be finite and in (0, π].
    pub fn from_slice(values: &[f64]) -> Result<Self, PoavError> {
        let angles: [f64; 3] = values.try_into().map_err(|_| {
            PoavError::shape(
                "bond_angles",
                format!("expected 3 values, got {}", values.len()),
            )
        })?;
        if let Some(bad) = angles
            .iter()
            .find(|a| !a.is_finite() || **a <= 0.0 || **a > std::f64::consts::PI)
        {
            return Err(PoavError::shape(
                "bond_angles",
                format!("angle {bad} outside (0, π]"),
            ));
        }
        Ok(Self { angles })
    }

    #[inline]
    pub fn theta12(&self) -> f64 {
        self.angles[0]
    }
    #[inline]
    pub fn theta13(&self) -> f64 {
        self.angles[1]
    }
    #[inline]
    pub fn theta23(&self) -> f64 {
        self.angles[2]
    }

    /// Slot of the angle spanned by the two bonds other than `bond`.
    ///
    /// # Panics
    ///
    /// Panics if `bond` is not 0, 1, or 2.
    pub fn opposite_index(bond: usize) -> usize {
        Self::PAIRS
            .iter()
            .position(|&(i, j)| i != bond && j != bond)
            .unwrap_or_else(|| panic!("bond index {bond} out of range"))
    }

    /// Angle between the two bonds other than `bond` (zero-based).
    #[inline]
    pub fn opposite(&self, bond: usize) -> f64 {
        self.angles[Self::opposite_index(bond)]
    }

    #[inline]
    pub fn cosines(&self) -> [f64; 3] {
        self.angles.map(f64::cos)
    }
}
