//! Per-site angle injection and serialization.
//!
//! Two phases:
//! 1. `PoavSite`: geometry plus write-once angle slots. Each of the three
//!    angle arrays is assigned exactly once, with a length-3 check.
//! 2. `PoavResult`: produced by `PoavSite::finalize` once every slot is set;
//!    immutable, and the only type stored in atom attachment slots.
//!
//! Both phases serialize through `todict`, which yields a `PoavRecord` with
//! fixed keys (bond lengths, angle components, T, H, A, variant indices).

use crate::poav::{Hybridization, Poav, PoavAnalysis, PoavKind};
use crate::PoavError;

const SIGMA_PI: &str = "sigma_pi_angles";
const PYRAMIDALIZATION: &str = "pyramidalization_angles";
const MISALIGNMENT: &str = "misalignment_angles";

const BOND_KEYS: [&str; 3] = ["bond1", "bond2", "bond3"];
const SIGMA_PI_KEYS: [&str; 3] = ["sigma_pi_angle1", "sigma_pi_angle2", "sigma_pi_angle3"];
const PYRAMIDALIZATION_KEYS: [&str; 3] = [
    "pyramidalization_angle1",
    "pyramidalization_angle2",
    "pyramidalization_angle3",
];
const MISALIGNMENT_KEYS: [&str; 3] = [
    "misalignment_angle1",
    "misalignment_angle2",
    "misalignment_angle3",
];

/// Record keys that hold angles (converted by `rad2deg`).
pub const ANGLE_KEYS: [&str; 9] = [
    SIGMA_PI_KEYS[0],
    SIGMA_PI_KEYS[1],
    SIGMA_PI_KEYS[2],
    PYRAMIDALIZATION_KEYS[0],
    PYRAMIDALIZATION_KEYS[1],
    PYRAMIDALIZATION_KEYS[2],
    MISALIGNMENT_KEYS[0],
    MISALIGNMENT_KEYS[1],
    MISALIGNMENT_KEYS[2],
];

/// Check one injected angle array.
///
/// Values must be finite; misalignment angles may additionally be NaN,
/// which marks a bond whose neighbour has no POAV of its own.
fn angle_triple(field: &'static str, values: &[f64]) -> Result<[f64; 3], PoavError> {
    let triple: [f64; 3] = values.try_into().map_err(|_| {
        PoavError::shape(field, format!("expected 3 angles, got {}", values.len()))
    })?;
    let nan_ok = field == MISALIGNMENT;
    if let Some(bad) = triple
        .iter()
        .find(|a| a.is_infinite() || (a.is_nan() && !nan_ok))
    {
        return Err(PoavError::shape(field, format!("non-finite angle {bad}")));
    }
    Ok(triple)
}

/// The three per-bond angle arrays of a site, in radians and bond order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SiteAngles {
    sigma_pi: [f64; 3],
    pyramidalization: [f64; 3],
    misalignment: [f64; 3],
}

impl SiteAngles {
    pub fn new(
        sigma_pi: &[f64],
        pyramidalization: &[f64],
        misalignment: &[f64],
    ) -> Result<Self, PoavError> {
        Ok(Self {
            sigma_pi: angle_triple(SIGMA_PI, sigma_pi)?,
            pyramidalization: angle_triple(PYRAMIDALIZATION, pyramidalization)?,
            misalignment: angle_triple(MISALIGNMENT, misalignment)?,
        })
    }

    #[inline]
    pub fn sigma_pi(&self) -> &[f64; 3] {
        &self.sigma_pi
    }
    #[inline]
    pub fn pyramidalization(&self) -> &[f64; 3] {
        &self.pyramidalization
    }
    #[inline]
    pub fn misalignment(&self) -> &[f64; 3] {
        &self.misalignment
    }
}

/// Write-once slots for the injected angle arrays.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AngleSlots {
    sigma_pi: Option<[f64; 3]>,
    pyramidalization: Option<[f64; 3]>,
    misalignment: Option<[f64; 3]>,
}

impl AngleSlots {
    fn assign(
        slot: &mut Option<[f64; 3]>,
        field: &'static str,
        values: &[f64],
    ) -> Result<(), PoavError> {
        if slot.is_some() {
            return Err(PoavError::precondition(format!("`{field}` is already set")));
        }
        *slot = Some(angle_triple(field, values)?);
        Ok(())
    }

    fn complete(&self) -> Result<SiteAngles, PoavError> {
        Ok(SiteAngles {
            sigma_pi: self.sigma_pi.ok_or(PoavError::MissingData { field: SIGMA_PI })?,
            pyramidalization: self.pyramidalization.ok_or(PoavError::MissingData {
                field: PYRAMIDALIZATION,
            })?,
            misalignment: self
                .misalignment
                .ok_or(PoavError::MissingData { field: MISALIGNMENT })?,
        })
    }
}

/// A POAV under construction: geometry fixed, angle arrays pending.
#[derive(Clone, Debug, PartialEq)]
pub struct PoavSite {
    poav: Poav,
    slots: AngleSlots,
}

impl PoavSite {
    pub fn new(poav: impl Into<Poav>) -> Self {
        Self {
            poav: poav.into(),
            slots: AngleSlots::default(),
        }
    }

    #[inline]
    pub fn poav(&self) -> &Poav {
        &self.poav
    }

    pub fn set_sigma_pi_angles(&mut self, values: &[f64]) -> Result<(), PoavError> {
        AngleSlots::assign(&mut self.slots.sigma_pi, SIGMA_PI, values)
    }

    pub fn set_pyramidalization_angles(&mut self, values: &[f64]) -> Result<(), PoavError> {
        AngleSlots::assign(&mut self.slots.pyramidalization, PYRAMIDALIZATION, values)
    }

    pub fn set_misalignment_angles(&mut self, values: &[f64]) -> Result<(), PoavError> {
        AngleSlots::assign(&mut self.slots.misalignment, MISALIGNMENT, values)
    }

    pub fn sigma_pi_angles(&self) -> Option<&[f64; 3]> {
        self.slots.sigma_pi.as_ref()
    }

    pub fn pyramidalization_angles(&self) -> Option<&[f64; 3]> {
        self.slots.pyramidalization.as_ref()
    }

    pub fn misalignment_angles(&self) -> Option<&[f64; 3]> {
        self.slots.misalignment.as_ref()
    }

    pub fn hybridization(&self) -> Result<Hybridization, PoavError> {
        self.poav.hybridization(self.sigma_pi_angles())
    }

    /// Serialize; fails with `MissingData` while any angle array is unset.
    pub fn todict(&self, rad2deg: bool) -> Result<PoavRecord, PoavError> {
        let angles = self.slots.complete()?;
        PoavRecord::build(&self.poav, &angles, rad2deg)
    }

    /// Freeze the site once every angle array is set.
    pub fn finalize(self) -> Result<PoavResult, PoavError> {
        let angles = self.slots.complete()?;
        Ok(PoavResult {
            poav: self.poav,
            angles,
        })
    }
}

impl PoavAnalysis for PoavSite {
    fn kind(&self) -> PoavKind {
        self.poav.kind()
    }
    fn base(&self) -> &crate::PoavBase {
        self.poav.base()
    }
}

/// Immutable, fully populated POAV of one site.
#[derive(Clone, Debug, PartialEq)]
pub struct PoavResult {
    poav: Poav,
    angles: SiteAngles,
}

impl PoavResult {
    pub fn new(poav: impl Into<Poav>, angles: SiteAngles) -> Self {
        Self {
            poav: poav.into(),
            angles,
        }
    }

    #[inline]
    pub fn poav(&self) -> &Poav {
        &self.poav
    }

    #[inline]
    pub fn angles(&self) -> &SiteAngles {
        &self.angles
    }

    pub fn hybridization(&self) -> Result<Hybridization, PoavError> {
        self.poav.hybridization(Some(self.angles.sigma_pi()))
    }

    pub fn todict(&self, rad2deg: bool) -> Result<PoavRecord, PoavError> {
        PoavRecord::build(&self.poav, &self.angles, rad2deg)
    }
}

impl PoavAnalysis for PoavResult {
    fn kind(&self) -> PoavKind {
        self.poav.kind()
    }
    fn base(&self) -> &crate::PoavBase {
        self.poav.base()
    }
}

/// Ordered key/value export of one POAV (the `todict` mapping).
#[derive(Clone, Debug, PartialEq)]
pub struct PoavRecord {
    entries: Vec<(&'static str, f64)>,
}

impl PoavRecord {
    fn build(poav: &Poav, angles: &SiteAngles, rad2deg: bool) -> Result<Self, PoavError> {
        let conv = |a: f64| if rad2deg { a.to_degrees() } else { a };
        let mut entries = Vec::with_capacity(19);
        let lengths = poav.base().bond_lengths();
        entries.extend(BOND_KEYS.into_iter().zip(lengths));
        for (keys, values) in [
            (SIGMA_PI_KEYS, angles.sigma_pi()),
            (PYRAMIDALIZATION_KEYS, angles.pyramidalization()),
            (MISALIGNMENT_KEYS, angles.misalignment()),
        ] {
            entries.extend(keys.into_iter().zip(values.map(conv)));
        }
        entries.push(("T", poav.volume()));
        entries.push(("H", poav.curvature()?));
        entries.push(("A", poav.area()?));
        let hybrid = poav.hybridization(Some(angles.sigma_pi()))?;
        entries.extend(hybrid.entries());
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find_map(|&(k, v)| (k == key).then_some(v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|&(k, _)| k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<(&'static str, f64)> {
        self.entries
    }
}

impl IntoIterator for PoavRecord {
    type Item = (&'static str, f64);
    type IntoIter = std::vec::IntoIter<(&'static str, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
