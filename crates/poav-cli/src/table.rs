//! CSV site tables: one row per three-coordinate site.
//!
//! Columns `b1x..b3z` hold the bond vectors; optional `n1, n2, n3` hold the
//! row index of the atom at the far end of each bond (empty = none).

use anyhow::{anyhow, bail, Context, Result};
use nalgebra::Vector3;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

use poav::rand3::SiteSample;
use poav::{BondTriple, SiteInput};

const BOND_COLUMNS: [[&str; 3]; 3] = [
    ["b1x", "b1y", "b1z"],
    ["b2x", "b2y", "b2z"],
    ["b3x", "b3y", "b3z"],
];
const NEIGHBOR_COLUMNS: [&str; 3] = ["n1", "n2", "n3"];

pub fn read_sites(path: &str) -> Result<Vec<SiteInput>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(None)
        .finish()
        .with_context(|| format!("opening {path}"))?
        .collect()?;
    tracing::info!(rows = df.height(), cols = df.width(), "site_table");

    let mut comps = Vec::with_capacity(9);
    for name in BOND_COLUMNS.iter().flatten() {
        comps.push(float_column(&df, name)?);
    }
    let neighbors = NEIGHBOR_COLUMNS
        .iter()
        .map(|name| index_column(&df, name))
        .collect::<Result<Vec<_>>>()?;

    (0..df.height())
        .map(|row| {
            let v = |b: usize| {
                Vector3::new(comps[3 * b][row], comps[3 * b + 1][row], comps[3 * b + 2][row])
            };
            let bonds = BondTriple::from_vectors([v(0), v(1), v(2)])
                .with_context(|| format!("row {row}"))?;
            let nbrs = [neighbors[0][row], neighbors[1][row], neighbors[2][row]];
            Ok(SiteInput::new(bonds, nbrs))
        })
        .collect()
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let s = df
        .column(name)
        .with_context(|| format!("missing column `{name}`"))?
        .cast(&DataType::Float64)?;
    s.f64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.ok_or_else(|| anyhow!("row {row}: `{name}` is empty")))
        .collect()
}

fn index_column(df: &DataFrame, name: &str) -> Result<Vec<Option<usize>>> {
    let Ok(col) = df.column(name) else {
        return Ok(vec![None; df.height()]);
    };
    let s = col.cast(&DataType::Int64)?;
    s.i64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| match v {
            None => Ok(None),
            Some(i) if i >= 0 => Ok(Some(i as usize)),
            Some(i) => bail!("row {row}: negative neighbour index {i} in `{name}`"),
        })
        .collect()
}

/// Write sampled sites (bond columns plus ground-truth θP and seed).
pub fn write_samples(path: &Path, samples: &[SiteSample]) -> Result<()> {
    let mut columns = Vec::with_capacity(11);
    for (b, names) in BOND_COLUMNS.iter().enumerate() {
        for (k, name) in names.iter().enumerate() {
            let values: Vec<f64> = samples.iter().map(|s| s.bonds[b].vector[k]).collect();
            columns.push(Series::new((*name).into(), values));
        }
    }
    let theta: Vec<f64> = samples.iter().map(|s| s.pyramidalization).collect();
    columns.push(Series::new("pyramidalization".into(), theta));
    let seeds: Vec<u64> = samples.iter().map(|s| s.replay.seed).collect();
    columns.push(Series::new("seed".into(), seeds));

    let mut df = DataFrame::new(columns)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    CsvWriter::new(&mut file).include_header(true).finish(&mut df)?;
    Ok(())
}
