//! PyO3 bindings for the `poav` crate.
//!
//! Notes
//! - Keep bindings thin; bonds cross the boundary as lists of (x, y, z)
//!   tuples and records come back as plain dicts.
//! - Variant names accept `poav1`, `poav2`, `poavr` (case-insensitive).

use pyo3::prelude::*;

mod common;
mod site;

#[pymodule]
fn poav_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add("__version__", poav::VERSION)?;
    site::register(m)?;
    Ok(())
}
