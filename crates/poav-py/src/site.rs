//! Single-site POAV bindings.

use std::collections::HashMap;

use pyo3::prelude::*;
use poav::angles::{pyramidalization_angles, sigma_pi_angles};
use poav::{Poav, PoavAnalysis, PoavSite};

use crate::common::{bonds_from_py, kind_from_py, map_poav_err, PyVec3};

/// Unit π-orbital axis of a site.
#[pyfunction]
pub fn poav_axis(bonds: Vec<PyVec3>, variant: &str) -> PyResult<PyVec3> {
    let poav = Poav::build(kind_from_py(variant)?, &bonds_from_py(bonds)?);
    let axis = poav.pi_axis().map_err(map_poav_err)?;
    Ok((axis.x, axis.y, axis.z))
}

/// σ-π and pyramidalization angles (radians) of a site.
#[pyfunction]
pub fn site_angles(bonds: Vec<PyVec3>, variant: &str) -> PyResult<(Vec<f64>, Vec<f64>)> {
    let poav = Poav::build(kind_from_py(variant)?, &bonds_from_py(bonds)?);
    let sp = sigma_pi_angles(&poav).map_err(map_poav_err)?;
    Ok((sp.to_vec(), pyramidalization_angles(&sp).to_vec()))
}

/// Inject caller-computed angle arrays and return the `todict` mapping.
#[pyfunction]
#[pyo3(signature = (bonds, variant, sigma_pi, pyramidalization, misalignment, rad2deg = false))]
pub fn poav_todict(
    bonds: Vec<PyVec3>,
    variant: &str,
    sigma_pi: Vec<f64>,
    pyramidalization: Vec<f64>,
    misalignment: Vec<f64>,
    rad2deg: bool,
) -> PyResult<HashMap<String, f64>> {
    let poav = Poav::build(kind_from_py(variant)?, &bonds_from_py(bonds)?);
    let mut site = PoavSite::new(poav);
    site.set_sigma_pi_angles(&sigma_pi).map_err(map_poav_err)?;
    site.set_pyramidalization_angles(&pyramidalization)
        .map_err(map_poav_err)?;
    site.set_misalignment_angles(&misalignment)
        .map_err(map_poav_err)?;
    let record = site.todict(rad2deg).map_err(map_poav_err)?;
    Ok(record.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(poav_axis, m)?)?;
    m.add_function(wrap_pyfunction!(site_angles, m)?)?;
    m.add_function(wrap_pyfunction!(poav_todict, m)?)?;
    Ok(())
}
