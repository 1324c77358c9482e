//! POAV attachment slots on atom records.
//!
//! One slot per variant. Assignment checks that the result's variant matches
//! the slot; reading an empty slot yields `None` so traversal code can ask
//! whether an atom has been analysed. No computation happens here.

use nalgebra::Vector3;

use crate::poav::{PoavAnalysis, PoavKind};
use crate::{PoavError, PoavResult};

/// Storage for one published `PoavResult` per variant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PoavSlots {
    poav1: Option<PoavResult>,
    poav2: Option<PoavResult>,
    poavr: Option<PoavResult>,
}

impl PoavSlots {
    fn slot_mut(&mut self, slot: PoavKind) -> &mut Option<PoavResult> {
        match slot {
            PoavKind::Poav1 => &mut self.poav1,
            PoavKind::Poav2 => &mut self.poav2,
            PoavKind::PoavR => &mut self.poavr,
        }
    }

    /// Store `value` in the slot named `slot`; the variants must agree.
    pub fn set(&mut self, slot: PoavKind, value: PoavResult) -> Result<(), PoavError> {
        let found = value.kind();
        if found != slot {
            return Err(PoavError::TypeMismatch {
                expected: slot,
                found,
            });
        }
        *self.slot_mut(slot) = Some(value);
        Ok(())
    }

    pub fn get(&self, slot: PoavKind) -> Option<&PoavResult> {
        match slot {
            PoavKind::Poav1 => self.poav1.as_ref(),
            PoavKind::Poav2 => self.poav2.as_ref(),
            PoavKind::PoavR => self.poavr.as_ref(),
        }
    }

    pub fn take(&mut self, slot: PoavKind) -> Option<PoavResult> {
        self.slot_mut(slot).take()
    }

    pub fn set_poav1(&mut self, value: PoavResult) -> Result<(), PoavError> {
        self.set(PoavKind::Poav1, value)
    }
    pub fn set_poav2(&mut self, value: PoavResult) -> Result<(), PoavError> {
        self.set(PoavKind::Poav2, value)
    }
    pub fn set_poavr(&mut self, value: PoavResult) -> Result<(), PoavError> {
        self.set(PoavKind::PoavR, value)
    }

    pub fn poav1(&self) -> Option<&PoavResult> {
        self.get(PoavKind::Poav1)
    }
    pub fn poav2(&self) -> Option<&PoavResult> {
        self.get(PoavKind::Poav2)
    }
    pub fn poavr(&self) -> Option<&PoavResult> {
        self.get(PoavKind::PoavR)
    }

    /// True once any variant has been stored.
    pub fn is_analyzed(&self) -> bool {
        PoavKind::ALL.iter().any(|&k| self.get(k).is_some())
    }
}

/// Minimal atom record carrying POAV slots.
#[derive(Clone, Debug, PartialEq)]
pub struct PoavAtom {
    pub id: usize,
    pub element: String,
    pub position: Vector3<f64>,
    pub poav: PoavSlots,
}

impl PoavAtom {
    pub fn new(id: usize, element: impl Into<String>, position: Vector3<f64>) -> Self {
        Self {
            id,
            element: element.into(),
            position,
            poav: PoavSlots::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BondTriple, Poav, PoavSite, SiteAngles};
    use nalgebra::vector;

    fn result(kind: PoavKind) -> PoavResult {
        let bonds = BondTriple::from_vectors([
            vector![1.4, 0.0, -0.2],
            vector![-0.7, 1.21, -0.2],
            vector![-0.7, -1.21, -0.2],
        ])
        .unwrap();
        let angles = SiteAngles::new(&[1.7; 3], &[0.13; 3], &[0.0; 3]).unwrap();
        PoavResult::new(Poav::build(kind, &bonds), angles)
    }

    #[test]
    fn empty_slot_reads_as_absent() {
        let atom = PoavAtom::new(0, "C", vector![0.0, 0.0, 0.0]);
        for kind in PoavKind::ALL {
            assert!(atom.poav.get(kind).is_none());
        }
        assert!(!atom.poav.is_analyzed());
    }

    #[test]
    fn slot_accepts_matching_variant() {
        let mut atom = PoavAtom::new(3, "C", vector![0.0, 0.0, 0.0]);
        atom.poav.set_poav2(result(PoavKind::Poav2)).unwrap();
        assert_eq!(atom.poav.poav2().map(|r| r.kind()), Some(PoavKind::Poav2));
        assert!(atom.poav.poav1().is_none());
        assert!(atom.poav.is_analyzed());
    }

    #[test]
    fn slot_rejects_other_variant() {
        let mut slots = PoavSlots::default();
        let err = slots.set_poavr(result(PoavKind::Poav2)).unwrap_err();
        assert_eq!(
            err,
            PoavError::TypeMismatch {
                expected: PoavKind::PoavR,
                found: PoavKind::Poav2
            }
        );
        assert!(slots.poavr().is_none());
        assert!(err.to_string().contains("POAVR"));
    }

    #[test]
    fn finalized_site_can_be_published() {
        let mut site = PoavSite::new(result(PoavKind::Poav1).poav().clone());
        site.set_sigma_pi_angles(&[1.6; 3]).unwrap();
        site.set_pyramidalization_angles(&[0.03; 3]).unwrap();
        site.set_misalignment_angles(&[0.0; 3]).unwrap();
        let mut slots = PoavSlots::default();
        slots.set(PoavKind::Poav1, site.finalize().unwrap()).unwrap();
        let taken = slots.take(PoavKind::Poav1).unwrap();
        assert_eq!(taken.angles().sigma_pi(), &[1.6; 3]);
        assert!(slots.poav1().is_none());
    }
}
