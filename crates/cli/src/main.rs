use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use crown::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod crs;
mod geojson;
mod input;
mod provenance;

use crs::Crs;
use input::FieldMap;

#[derive(Parser)]
#[command(name = "crown")]
#[command(about = "Tree crown polygons from four directional crown measurements")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build one crown polygon per tree in a CSV table and write GeoJSON
    Build(BuildArgs),
    /// Print a single crown from literal N/E/S/W values as a GeoJSON feature
    Ring(RingArgs),
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args)]
struct Shape {
    /// Values are radii (default: diameters, halved before use)
    #[arg(long)]
    radius: bool,
    /// Angular sampling step in degrees
    #[arg(long, default_value_t = 5.0)]
    step: f64,
}

impl Shape {
    fn cfg(&self) -> Result<CrownCfg> {
        Ok(CrownCfg {
            step: AngularStep::new(self.step)?,
            kind: if self.radius {
                MeasurementKind::Radius
            } else {
                MeasurementKind::Diameter
            },
        })
    }
}

#[derive(Args)]
struct BuildArgs {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    out: PathBuf,
    /// Target CRS of the input coordinates and the output, e.g. EPSG:25832
    #[arg(long)]
    crs: String,
    /// Accept a CRS whose unit is not in the built-in table
    #[arg(long)]
    assume_metric: bool,
    #[arg(long, default_value = "x")]
    x: String,
    #[arg(long, default_value = "y")]
    y: String,
    /// Integer id column (default: 1-based row number)
    #[arg(long)]
    id: Option<String>,
    #[arg(long, default_value = "crown_diameter_1")]
    north: String,
    #[arg(long, default_value = "crown_diameter_2")]
    east: String,
    #[arg(long, default_value = "crown_diameter_3")]
    south: String,
    #[arg(long, default_value = "crown_diameter_4")]
    west: String,
    /// Only process these ids (comma separated); all rows when omitted
    #[arg(long, value_delimiter = ',')]
    select: Vec<i64>,
    #[command(flatten)]
    shape: Shape,
}

impl BuildArgs {
    fn fields(&self) -> FieldMap {
        FieldMap {
            x: self.x.clone(),
            y: self.y.clone(),
            id: self.id.clone(),
            north: self.north.clone(),
            east: self.east.clone(),
            south: self.south.clone(),
            west: self.west.clone(),
        }
    }
}

#[derive(Args)]
struct RingArgs {
    #[arg(long)]
    north: f64,
    #[arg(long)]
    east: f64,
    #[arg(long)]
    south: f64,
    #[arg(long)]
    west: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    x: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    y: f64,
    #[command(flatten)]
    shape: Shape,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Build(args) => build(args),
        Action::Ring(args) => ring(args),
        Action::Report => report(),
    }
}

fn build(args: BuildArgs) -> Result<()> {
    let target = Crs::parse(&args.crs)?;
    target.ensure_metric(args.assume_metric)?;
    let cfg = args.shape.cfg()?;
    let fields = args.fields();
    tracing::info!(
        input = %args.input.display(),
        out = %args.out.display(),
        crs = %target,
        step = cfg.step.degrees(),
        "build"
    );

    let df = input::read_csv(&args.input)?;
    let records = input::records_from_frame(&df, &fields)?;
    let selection: HashSet<i64> = args.select.iter().copied().collect();
    let batch = build_crowns(select(&records, &selection), &cfg);
    for s in &batch.skipped {
        tracing::warn!(id = s.id, reason = %s.error, "skipped feature");
    }
    tracing::info!(
        rows = records.len(),
        crowns = batch.crowns.len(),
        skipped = batch.skipped.len(),
        "crowns built"
    );

    let fc = geojson::feature_collection(&batch.crowns, &target);
    write_output(&args.out, &serde_json::to_vec_pretty(&fc)?)?;

    let mut payload = provenance::Payload::new(serde_json::json!({
        "crs": target.authid(),
        "step_degrees": cfg.step.degrees(),
        "measurement": if args.shape.radius { "radius" } else { "diameter" },
        "fields": fields,
        "select": args.select,
    }));
    payload.inputs.push(args.input.to_string_lossy().into_owned());
    payload.crowns = batch.crowns.len();
    payload.skipped = batch.skipped.len();
    let prov = provenance::write_sidecar(&args.out, payload)?;
    tracing::info!(provenance = %prov.display(), "wrote");
    Ok(())
}

/// Selected records, or all of them when nothing is selected.
fn select<'a>(
    records: &'a [TreeRecord],
    selection: &'a HashSet<i64>,
) -> impl Iterator<Item = &'a TreeRecord> + 'a {
    records
        .iter()
        .filter(move |r| selection.is_empty() || selection.contains(&r.id))
}

fn write_output(out: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    std::fs::write(out, bytes).with_context(|| format!("writing {}", out.display()))
}

fn ring(args: RingArgs) -> Result<()> {
    let cfg = args.shape.cfg()?;
    let rec = TreeRecord {
        id: 1,
        position: Some(Vec2::new(args.x, args.y)),
        measurements: [args.north, args.east, args.south, args.west].map(FieldValue::Number),
    };
    let crown = build_crown(&rec, &cfg)?;
    tracing::info!(points = crown.polygon.len(), area = crown.polygon.area(), "ring");
    println!(
        "{}",
        serde_json::to_string_pretty(&geojson::crown_feature(&crown))?
    );
    Ok(())
}

fn report() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&provenance::header())?);
    Ok(())
}
