use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Map, Value};
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

use poav::rand3::{SiteSampleParams, SiteSampler};
use poav::{analyze_sites, PoavCfg, PoavKind};

mod provenance;
mod table;

use provenance::{write_sidecar, Payload, Tolerances};

#[derive(Parser)]
#[command(name = "poav")]
#[command(about = "POAV analysis of three-coordinate carbon sites")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Variant {
    Poav1,
    Poav2,
    Poavr,
    All,
}

impl Variant {
    fn kinds(self) -> Vec<PoavKind> {
        match self {
            Variant::Poav1 => vec![PoavKind::Poav1],
            Variant::Poav2 => vec![PoavKind::Poav2],
            Variant::Poavr => vec![PoavKind::PoavR],
            Variant::All => PoavKind::ALL.to_vec(),
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Analyse a CSV site table and write one JSON record per site and variant
    Analyze {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
        #[arg(long, value_enum, default_value_t = Variant::All)]
        variant: Variant,
        /// Report angles in degrees
        #[arg(long)]
        degrees: bool,
        /// Override the relative coplanarity threshold
        #[arg(long)]
        eps_coplanar: Option<f64>,
        /// Override the hybridization denominator threshold
        #[arg(long)]
        eps_denominator: Option<f64>,
    },
    /// Write a CSV of randomly pyramidalized sites
    Sample {
        #[arg(long, default_value_t = 100)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: String,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Analyze {
            input,
            out,
            variant,
            degrees,
            eps_coplanar,
            eps_denominator,
        } => {
            let mut cfg = PoavCfg::default();
            if let Some(eps) = eps_coplanar {
                cfg.eps_coplanar = eps;
            }
            if let Some(eps) = eps_denominator {
                cfg.eps_denominator = eps;
            }
            analyze(&input, &out, variant, degrees, cfg)
        }
        Action::Sample { count, seed, out } => sample(count, seed, &out),
        Action::Report => report(),
    }
}

fn ensure_parent(out_path: &Path) -> Result<()> {
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn analyze(input: &str, out: &str, variant: Variant, degrees: bool, cfg: PoavCfg) -> Result<()> {
    tracing::info!(input, out, ?variant, degrees, "analyze");
    let sites = table::read_sites(input)?;

    let mut rows = Vec::new();
    let mut failures = 0usize;
    for kind in variant.kinds() {
        for (i, res) in analyze_sites(&sites, kind, &cfg).into_iter().enumerate() {
            let mut obj = Map::new();
            obj.insert("site".into(), json!(i));
            obj.insert("variant".into(), json!(kind.name()));
            match res.map_err(|e| e.error).and_then(|r| r.todict(degrees)) {
                Ok(record) => {
                    for (k, v) in record {
                        obj.insert(k.into(), json!(v));
                    }
                }
                Err(err) => {
                    failures += 1;
                    obj.insert("error".into(), json!(err.to_string()));
                }
            }
            rows.push(Value::Object(obj));
        }
    }
    tracing::info!(records = rows.len(), failures, "analyze_done");

    let out_path = Path::new(out);
    ensure_parent(out_path)?;
    std::fs::write(out_path, serde_json::to_vec_pretty(&rows)?)
        .with_context(|| format!("writing {out}"))?;
    write_sidecar(
        out_path,
        &Payload::Analyze {
            input,
            kinds: &variant.kinds(),
            degrees,
            cfg: &cfg,
            sites: sites.len(),
            failures,
        },
    )?;
    Ok(())
}

fn sample(count: usize, seed: u64, out: &str) -> Result<()> {
    tracing::info!(count, seed, out, "sample");
    let params = SiteSampleParams::default();
    let mut sampler = SiteSampler::new(params.clone(), seed)?;
    let samples = sampler.take_samples(count)?;
    let out_path = Path::new(out);
    ensure_parent(out_path)?;
    table::write_samples(out_path, &samples)?;
    write_sidecar(
        out_path,
        &Payload::Sample {
            count,
            seed,
            params: &params,
        },
    )?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = json!({
        "code_rev": provenance::current_git_rev(),
        "poav_version": poav::VERSION,
        "defaults": Tolerances::from(&PoavCfg::default()),
        "variants": PoavKind::ALL.map(|k| k.name())
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const CSV: &str = "\
b1x,b1y,b1z,b2x,b2y,b2z,b3x,b3y,b3z,n1,n2,n3
1.4,0.0,-0.15,-0.7,1.2124,-0.15,-0.7,-1.2124,-0.15,1,,
1.0,0.0,0.0,-0.5,0.8660254037844386,0.0,-0.5,-0.8660254037844386,0.0,0,,
";

    #[test]
    fn analyze_writes_records_and_errors() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("sites.csv");
        fs::write(&input, CSV).unwrap();
        let out = dir.path().join("out/records.json");
        analyze(
            input.to_str().unwrap(),
            out.to_str().unwrap(),
            Variant::Poav1,
            true,
            PoavCfg::default(),
        )
        .unwrap();

        let rows: Vec<Value> = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["variant"], "POAV1");
        assert!(rows[0]["n"].as_f64().unwrap() > 2.0);
        // neighbour 1 has no π axis, so the angle is not applicable
        assert!(rows[0]["misalignment_angle1"].is_null());
        assert!(rows[1]["error"]
            .as_str()
            .unwrap()
            .starts_with("degenerate geometry"));
        assert!(dir.path().join("out/records.provenance.json").exists());
    }

    #[test]
    fn sample_output_round_trips_through_analyze() {
        let dir = tempdir().unwrap();
        let csv = dir.path().join("samples.csv");
        sample(8, 3, csv.to_str().unwrap()).unwrap();
        let sites = table::read_sites(csv.to_str().unwrap()).unwrap();
        assert_eq!(sites.len(), 8);
        assert!(sites.iter().all(|s| s.neighbors == [None; 3]));

        let out = dir.path().join("records.json");
        analyze(
            csv.to_str().unwrap(),
            out.to_str().unwrap(),
            Variant::All,
            false,
            PoavCfg::default(),
        )
        .unwrap();
        let rows: Vec<Value> = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(rows.len(), 24);
    }

    #[test]
    fn missing_column_is_reported() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.csv");
        fs::write(&input, "b1x,b1y\n1.0,0.0\n").unwrap();
        let err = table::read_sites(input.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("b1z"));
    }
}
