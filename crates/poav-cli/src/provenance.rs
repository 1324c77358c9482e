use anyhow::{Context, Result};
use poav::rand3::SiteSampleParams;
use poav::{PoavCfg, PoavKind};
use serde::Serialize;
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Numerical tolerances a run was made with.
#[derive(Serialize)]
pub struct Tolerances {
    pub eps_length: f64,
    pub eps_coplanar: f64,
    pub eps_denominator: f64,
}

impl From<&PoavCfg> for Tolerances {
    fn from(cfg: &PoavCfg) -> Self {
        Self {
            eps_length: cfg.eps_length,
            eps_coplanar: cfg.eps_coplanar,
            eps_denominator: cfg.eps_denominator,
        }
    }
}

/// The run that produced an artifact.
pub enum Payload<'a> {
    Analyze {
        input: &'a str,
        kinds: &'a [PoavKind],
        degrees: bool,
        cfg: &'a PoavCfg,
        sites: usize,
        failures: usize,
    },
    Sample {
        count: usize,
        seed: u64,
        params: &'a SiteSampleParams,
    },
}

impl Payload<'_> {
    pub fn command(&self) -> &'static str {
        match self {
            Payload::Analyze { .. } => "analyze",
            Payload::Sample { .. } => "sample",
        }
    }

    pub fn params(&self) -> Value {
        match self {
            Payload::Analyze {
                input,
                kinds,
                degrees,
                cfg,
                sites,
                failures,
            } => json!({
                "input": input,
                "variants": kinds.iter().map(|k| k.name()).collect::<Vec<_>>(),
                "angle_unit": if *degrees { "deg" } else { "rad" },
                "tolerances": Tolerances::from(*cfg),
                "sites": sites,
                "failures": failures
            }),
            Payload::Sample {
                count,
                seed,
                params,
            } => json!({
                "count": count,
                "seed": seed,
                "pyramidalization": [params.pyramidalization_min, params.pyramidalization_max],
                "bond_length": [params.bond_length_min, params.bond_length_max],
                "azimuth_jitter": params.azimuth_jitter,
                "random_orientation": params.random_orientation
            }),
        }
    }
}

/// Write `<artifact>.provenance.json` next to a POAV artifact.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: &Payload) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let provenance_path = provenance_path(artifact);
    if let Some(parent) = provenance_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }

    let callsite = Location::caller();
    let doc = json!({
        "code_rev": current_git_rev(),
        "poav_version": poav::VERSION,
        "callsite": {
            "file": callsite.file(),
            "line": callsite.line()
        },
        "command": payload.command(),
        "params": payload.params(),
        "outputs": [artifact.to_string_lossy()]
    });
    fs::write(&provenance_path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", provenance_path.display()))?;
    Ok(provenance_path)
}

fn provenance_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    let mut name = stem;
    name.push(".provenance.json");
    artifact.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(from_env) = option_env!("GIT_COMMIT") {
        if !from_env.is_empty() {
            return from_env.to_string();
        }
    }
    if let Ok(env_override) = std::env::var("GIT_COMMIT") {
        if !env_override.is_empty() {
            return env_override;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn provenance_path_rewrites_extension() {
        let base = Path::new("/tmp/output/sites.json");
        let derived = provenance_path(base);
        assert_eq!(derived, Path::new("/tmp/output/sites.provenance.json"));
    }

    #[test]
    fn analyze_sidecar_records_variants_and_tolerances() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("a.json");
        fs::write(&artifact, "[]").unwrap();
        let cfg = PoavCfg {
            eps_coplanar: 1e-8,
            ..PoavCfg::default()
        };
        let payload = Payload::Analyze {
            input: "sites.csv",
            kinds: &[PoavKind::Poav2, PoavKind::PoavR],
            degrees: true,
            cfg: &cfg,
            sites: 4,
            failures: 1,
        };
        let prov_path = write_sidecar(&artifact, &payload).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(prov_path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["command"], "analyze");
        assert_eq!(parsed["poav_version"], poav::VERSION);
        assert_eq!(parsed["params"]["variants"], json!(["POAV2", "POAVR"]));
        assert_eq!(parsed["params"]["angle_unit"], "deg");
        assert_eq!(parsed["params"]["tolerances"]["eps_coplanar"], 1e-8);
        assert_eq!(parsed["params"]["failures"], 1);
    }

    #[test]
    fn sample_sidecar_records_sampler_ranges() {
        let params = SiteSampleParams::default();
        let payload = Payload::Sample {
            count: 5,
            seed: 9,
            params: &params,
        };
        assert_eq!(payload.command(), "sample");
        let value = payload.params();
        assert_eq!(value["seed"], 9);
        assert_eq!(
            value["pyramidalization"][1].as_f64().unwrap(),
            params.pyramidalization_max
        );
    }
}
