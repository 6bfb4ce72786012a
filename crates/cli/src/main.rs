mod input;
mod provenance;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use geopath::api::{
    centroid, line_break, render_shapes, CentroidCfg, FieldFilter, PipelineCfg, PolarFix,
};
use provenance::{write_sidecar, Provenance};
use rand::{rngs::StdRng, SeedableRng};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser)]
#[command(name = "geopath")]
#[command(about = "Turn geographic shapes into SVG path elements")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Polar {
    None,
    Trim,
    Lengthen,
}

impl From<Polar> for PolarFix {
    fn from(p: Polar) -> Self {
        match p {
            Polar::None => PolarFix::None,
            Polar::Trim => PolarFix::Trim,
            Polar::Lengthen => PolarFix::Lengthen,
        }
    }
}

#[derive(Subcommand)]
enum Action {
    /// Write one `<path>` line per shape
    Render {
        /// JSON records or a `shape,part,x,y` CSV point table
        #[arg(long)]
        input: PathBuf,
        /// Output file; stdout when absent
        #[arg(long)]
        out: Option<PathBuf>,
        /// Skip shapes whose rank field exceeds this
        #[arg(long)]
        max_rank: Option<f64>,
        #[arg(long)]
        class: Option<String>,
        #[arg(long, value_enum, default_value_t = Polar::None)]
        polar: Polar,
        /// Add the `antarctic` class to shapes reaching below -60°
        #[arg(long)]
        mark_antarctic: bool,
        #[arg(long)]
        filter_field: Option<String>,
        /// Accepted values for `--filter-field` (default: empty string)
        #[arg(long, num_args = 1..)]
        filter_value: Vec<String>,
        /// Field whose value becomes the `id` attribute
        #[arg(long)]
        id_field: Option<String>,
        /// Oblique pole as `LAT,LON` in degrees
        #[arg(long, value_parser = parse_pole)]
        pole: Option<(f64, f64)>,
        #[arg(long, default_value_t = 3)]
        indent: usize,
    },
    /// Print one JSON line with a label anchor per shape
    Centroids {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Field holding the label text
        #[arg(long)]
        label_field: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Render {
            input,
            out,
            max_rank,
            class,
            polar,
            mark_antarctic,
            filter_field,
            filter_value,
            id_field,
            pole,
            indent,
        } => {
            let filter = filter_field.map(|field| {
                let mut f = FieldFilter::new(field);
                if !filter_value.is_empty() {
                    f.values = filter_value;
                }
                f
            });
            let cfg = PipelineCfg {
                max_rank,
                class,
                polar: polar.into(),
                mark_antarctic,
                filter,
                id_field,
                pole,
                indent,
                ..PipelineCfg::default()
            };
            render(&input, out.as_deref(), &cfg)
        }
        Action::Centroids {
            input,
            seed,
            label_field,
            out,
        } => centroids(&input, seed, label_field.as_deref(), out.as_deref()),
        Action::Report => report(),
    }
}

fn parse_pole(s: &str) -> Result<(f64, f64), String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got {s:?}"))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("latitude: {e}"))?;
    let lon: f64 = lon.trim().parse().map_err(|e| format!("longitude: {e}"))?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {lat} outside [-90, 90]"));
    }
    Ok((lat, lon))
}

fn open_output(out: Option<&Path>) -> Result<Box<dyn Write>> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn render(input: &Path, out: Option<&Path>, cfg: &PipelineCfg) -> Result<()> {
    let records = input::load_records(input)?;
    let mut sink = open_output(out)?;
    let stats = render_shapes(records, cfg, &mut sink)?;
    sink.flush()?;
    tracing::info!(
        seen = stats.seen,
        rendered = stats.rendered,
        filtered = stats.filtered,
        empty = stats.empty,
        over_rank = stats.over_rank,
        antarctic = stats.antarctic,
        "render"
    );

    if let Some(path) = out {
        let params = serde_json::json!({
            "input": input,
            "max_rank": cfg.max_rank,
            "class": cfg.class,
            "polar": format!("{:?}", cfg.polar).to_lowercase(),
            "mark_antarctic": cfg.mark_antarctic,
            "filter": cfg.filter.as_ref().map(|f| serde_json::json!({
                "field": f.field,
                "values": f.values,
            })),
            "id_field": cfg.id_field,
            "pole": cfg.pole,
            "indent": cfg.indent,
        });
        write_sidecar(path, Provenance::new("render", params))?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct Anchor {
    index: usize,
    lon: f64,
    lat: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

fn centroids(input: &Path, seed: u64, label_field: Option<&str>, out: Option<&Path>) -> Result<()> {
    let records = input::load_records(input)?;
    let cfg = CentroidCfg::default();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sink = open_output(out)?;
    let mut written = 0usize;
    for (index, record) in records.iter().enumerate() {
        let Some(c) = centroid(&record.shape.points, &record.shape.parts, &cfg, &mut rng) else {
            tracing::debug!(index, "centroid_skipped_empty");
            continue;
        };
        let label = label_field
            .and_then(|name| record.field(name))
            .and_then(|v| v.as_text())
            .map(|text| line_break(&text));
        let anchor = Anchor {
            index,
            lon: c.x,
            lat: c.y,
            label,
        };
        serde_json::to_writer(&mut sink, &anchor)?;
        writeln!(sink)?;
        written += 1;
    }
    sink.flush()?;
    tracing::info!(seed, shapes = records.len(), written, "centroids");

    if let Some(path) = out {
        let params = serde_json::json!({
            "input": input,
            "seed": seed,
            "label_field": label_field,
        });
        write_sidecar(path, Provenance::new("centroids", params))?;
    }
    Ok(())
}

fn report() -> Result<()> {
    let record = Provenance::new("report", serde_json::json!({}));
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pole_parses_lat_lon_pairs() {
        assert_eq!(parse_pole("30,-45.5").unwrap(), (30.0, -45.5));
        assert_eq!(parse_pole(" -90 , 0 ").unwrap(), (-90.0, 0.0));
        assert!(parse_pole("30").is_err());
        assert!(parse_pole("91,0").is_err());
        assert!(parse_pole("x,0").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cmd::command().debug_assert();
    }

    #[test]
    fn render_writes_paths_and_sidecar() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("shapes.json");
        fs::write(
            &input,
            r#"[{"points": [[0, 0], [10, 0], [10, 10], [0, 0]], "fields": {"name": "Box"}}]"#,
        )
        .unwrap();
        let out = dir.path().join("svg/land.svg");
        let cfg = PipelineCfg {
            class: Some("land".into()),
            indent: 0,
            ..PipelineCfg::default()
        };
        render(&input, Some(&out), &cfg).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.contains(r#"class="land""#));
        assert!(text.contains("M0,0 L10,0 L10,10 Z"));
        assert!(dir.path().join("svg/land.provenance.json").exists());
    }

    #[test]
    fn centroids_are_reproducible_per_seed() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("shapes.json");
        fs::write(
            &input,
            r#"[{"points": [[-60, -20], [60, -20], [60, 20], [-60, 20], [-60, -20]],
                 "fields": {"name": "Wide Band Of Land"}},
                {"points": []}]"#,
        )
        .unwrap();
        let a = dir.path().join("a.jsonl");
        let b = dir.path().join("b.jsonl");
        centroids(&input, 7, Some("name"), Some(&a)).unwrap();
        centroids(&input, 7, Some("name"), Some(&b)).unwrap();
        let text = fs::read_to_string(&a).unwrap();
        assert_eq!(text, fs::read_to_string(&b).unwrap());
        assert_eq!(text.lines().count(), 1);
        let anchor: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(anchor["index"], 0);
        assert_eq!(anchor["label"], "Wide Band\nOf Land");
        assert!(anchor["lon"].as_f64().unwrap().abs() < 60.0);
    }
}
