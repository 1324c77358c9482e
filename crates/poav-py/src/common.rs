use nalgebra::Vector3;
use pyo3::exceptions::{PyTypeError, PyValueError};
use pyo3::prelude::*;
use poav::{BondTriple, PoavError, PoavKind};

pub type PyVec3 = (f64, f64, f64);

pub fn vec3(v: PyVec3) -> Vector3<f64> {
    Vector3::new(v.0, v.1, v.2)
}

pub fn bonds_from_py(bonds: Vec<PyVec3>) -> PyResult<BondTriple> {
    let bonds: Vec<poav::Bond> = bonds.into_iter().map(|b| vec3(b).into()).collect();
    BondTriple::new(&bonds).map_err(map_poav_err)
}

pub fn kind_from_py(variant: &str) -> PyResult<PoavKind> {
    variant.parse().map_err(PyValueError::new_err)
}

pub fn map_poav_err(err: PoavError) -> PyErr {
    match err {
        PoavError::TypeMismatch { .. } => PyTypeError::new_err(err.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}
