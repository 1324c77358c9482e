//! Reproducible random three-coordinate sites.
//!
//! Purpose
//! - Feed property tests, benchmarks, and the CLI `sample` command with
//!   curved-sheet-like sites of known pyramidalization.
//!
//! Construction
//! - In a local frame the bonds lie on a cone around +z: bond i has azimuth
//!   2πi/3 plus jitter and makes the angle π/2 + θP with +z.
//! - Bond lengths are drawn independently; an optional random rotation moves
//!   the whole site (and its cone axis) to an arbitrary orientation.
//! - Every sample carries its seed, so `regenerate` replays it exactly.

use std::f64::consts::{PI, TAU};
use std::fmt;

use nalgebra::{Rotation3, Unit, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::BondTriple;

/// Error type of the site sampler.
#[derive(Debug)]
pub enum SamplerError {
    InvalidParams { reason: String },
    DegenerateSample { reason: String },
}

impl SamplerError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for SamplerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid sampler params: {reason}"),
            Self::DegenerateSample { reason } => write!(f, "degenerate sample: {reason}"),
        }
    }
}

impl std::error::Error for SamplerError {}

/// Sampling ranges (radians and length units).
#[derive(Clone, Debug, PartialEq)]
pub struct SiteSampleParams {
    pub pyramidalization_min: f64,
    pub pyramidalization_max: f64,
    pub bond_length_min: f64,
    pub bond_length_max: f64,
    /// Half-width of the uniform azimuthal jitter added to 2πi/3.
    pub azimuth_jitter: f64,
    pub random_orientation: bool,
}

impl Default for SiteSampleParams {
    fn default() -> Self {
        Self {
            pyramidalization_min: 0.0,
            pyramidalization_max: 0.3,
            bond_length_min: 1.38,
            bond_length_max: 1.46,
            azimuth_jitter: 0.1,
            random_orientation: true,
        }
    }
}

impl SiteSampleParams {
    fn validate(&self) -> Result<(), SamplerError> {
        let finite = [
            self.pyramidalization_min,
            self.pyramidalization_max,
            self.bond_length_min,
            self.bond_length_max,
            self.azimuth_jitter,
        ];
        if finite.iter().any(|x| !x.is_finite()) {
            return Err(SamplerError::invalid("all ranges must be finite"));
        }
        if self.pyramidalization_min < 0.0 || self.pyramidalization_max >= PI / 2.0 {
            return Err(SamplerError::invalid("pyramidalization must lie in [0, π/2)"));
        }
        if self.pyramidalization_min > self.pyramidalization_max {
            return Err(SamplerError::invalid(
                "pyramidalization_min <= pyramidalization_max required",
            ));
        }
        if self.bond_length_min <= 0.0 || self.bond_length_min > self.bond_length_max {
            return Err(SamplerError::invalid(
                "0 < bond_length_min <= bond_length_max required",
            ));
        }
        if !(0.0..PI / 3.0).contains(&self.azimuth_jitter) {
            return Err(SamplerError::invalid("azimuth_jitter must lie in [0, π/3)"));
        }
        Ok(())
    }
}

/// Replay token storing the seed that regenerates a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeedReplay {
    pub seed: u64,
}

/// One sampled site with its ground truth.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteSample {
    pub bonds: BondTriple,
    /// Cone half-angle offset θP used to place the bonds.
    pub pyramidalization: f64,
    /// Cone axis after rotation (unit).
    pub cone_axis: Vector3<f64>,
    pub replay: SeedReplay,
}

/// Seeded stream of sites.
pub struct SiteSampler {
    params: SiteSampleParams,
    master_rng: StdRng,
}

impl SiteSampler {
    pub fn new(params: SiteSampleParams, seed: u64) -> Result<Self, SamplerError> {
        params.validate()?;
        Ok(Self {
            params,
            master_rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn params(&self) -> &SiteSampleParams {
        &self.params
    }

    pub fn generate_single(params: &SiteSampleParams, seed: u64) -> Result<SiteSample, SamplerError> {
        params.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let theta_p = sample_range(&mut rng, params.pyramidalization_min, params.pyramidalization_max);
        let mut local = [Vector3::zeros(); 3];
        for (i, v) in local.iter_mut().enumerate() {
            let jitter = if params.azimuth_jitter > 0.0 {
                rng.gen_range(-params.azimuth_jitter..params.azimuth_jitter)
            } else {
                0.0
            };
            let phi = TAU * i as f64 / 3.0 + jitter;
            let r = sample_range(&mut rng, params.bond_length_min, params.bond_length_max);
            *v = r * Vector3::new(theta_p.cos() * phi.cos(), theta_p.cos() * phi.sin(), -theta_p.sin());
        }
        let rot = if params.random_orientation {
            Rotation3::from_axis_angle(&sample_unit_vector(&mut rng), rng.gen_range(0.0..TAU))
        } else {
            Rotation3::identity()
        };
        let bonds = BondTriple::from_vectors(local.map(|v| rot * v)).map_err(|e| {
            SamplerError::DegenerateSample {
                reason: e.to_string(),
            }
        })?;
        Ok(SiteSample {
            bonds,
            pyramidalization: theta_p,
            cone_axis: rot * Vector3::z(),
            replay: SeedReplay { seed },
        })
    }

    pub fn next_sample(&mut self) -> Result<SiteSample, SamplerError> {
        let seed = self.master_rng.next_u64();
        Self::generate_single(&self.params, seed)
    }

    pub fn regenerate(&self, replay: &SeedReplay) -> Result<SiteSample, SamplerError> {
        Self::generate_single(&self.params, replay.seed)
    }

    /// Draw `count` samples.
    pub fn take_samples(&mut self, count: usize) -> Result<Vec<SiteSample>, SamplerError> {
        (0..count).map(|_| self.next_sample()).collect()
    }
}

fn sample_range(rng: &mut StdRng, min: f64, max: f64) -> f64 {
    if (max - min).abs() < f64::EPSILON {
        return min;
    }
    rng.gen_range(min..max)
}

fn sample_unit_vector(rng: &mut StdRng) -> Unit<Vector3<f64>> {
    loop {
        let v = Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let n = v.norm();
        if n > 1e-6 && n <= 1.0 {
            return Unit::new_unchecked(v / n);
        }
    }
}

#[cfg(test)]
mod tests;
