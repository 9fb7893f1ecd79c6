//! Tooth profile generator for a meshing pair of spur or internal gears.
//! Writes both full gear outlines, placed at their operating center distance, as CSV points.
use anyhow::{Context, Result};
use gearprofile::patterns::mesh_outlines;
use gearprofile::{generate_gear_pair, GearPair, GearSpec, SegmentCounts};
use nalgebra::geometry::Point2;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "gear_pair_gen",
    about = "Generates tooth profiles for a meshing gear pair"
)]
struct Opt {
    /// Gear module, in mm
    #[structopt(short, long, default_value = "1")]
    module: f64,

    /// Number of teeth on the first gear. Negative for an internal gear
    #[structopt(short, long, default_value = "20", allow_hyphen_values = true)]
    teeth: i32,

    /// Number of teeth on the second gear. Negative for an internal gear
    #[structopt(long, default_value = "40", allow_hyphen_values = true)]
    teeth2: i32,

    /// Pressure angle, in degrees
    #[structopt(long, default_value = "20")]
    pressure_angle: f64,

    /// Profile shift factor of the first gear
    #[structopt(long, default_value = "0", allow_hyphen_values = true)]
    shift: f64,

    /// Profile shift factor of the second gear
    #[structopt(long, default_value = "0", allow_hyphen_values = true)]
    shift2: f64,

    /// Backlash factor
    #[structopt(long, default_value = "0")]
    backlash: f64,

    /// Addendum factor
    #[structopt(long, default_value = "1")]
    addendum: f64,

    /// Dedendum factor
    #[structopt(long, default_value = "1.25")]
    dedendum: f64,

    /// Hob tip radius factor
    #[structopt(long, default_value = "0.25")]
    hob_tip_radius: f64,

    /// Tooth tip edge round factor
    #[structopt(long, default_value = "0.1")]
    edge_round: f64,

    /// Points along each involute flank
    #[structopt(long, default_value = "20")]
    seg_involute: usize,

    /// Points along each tip edge round
    #[structopt(long, default_value = "10")]
    seg_edge_round: usize,

    /// Points along each root fillet
    #[structopt(long, default_value = "10")]
    seg_root_round: usize,

    /// Points along each half of the addendum arc
    #[structopt(long, default_value = "5")]
    seg_outer: usize,

    /// Points along each half of the dedendum arc
    #[structopt(long, default_value = "5")]
    seg_root: usize,

    /// X offset of the first gear's center, in mm
    #[structopt(long, default_value = "0", allow_hyphen_values = true)]
    x_offset: f64,

    /// Y offset of the first gear's center, in mm
    #[structopt(long, default_value = "0", allow_hyphen_values = true)]
    y_offset: f64,

    /// Output file for the resulting outlines
    #[structopt(short, long, parse(from_os_str))]
    output: PathBuf,
}

impl Opt {
    fn gear(&self, teeth: i32, shift: f64) -> Result<GearSpec> {
        GearSpec::from_signed_teeth(
            self.module,
            teeth,
            self.pressure_angle,
            shift,
            self.backlash,
            self.addendum,
            self.dedendum,
            self.hob_tip_radius,
            self.edge_round,
        )
        .with_context(|| format!("Bad gear with {teeth} teeth"))
    }

    fn segments(&self) -> SegmentCounts {
        SegmentCounts {
            involute: self.seg_involute,
            edge_round: self.seg_edge_round,
            root_round: self.seg_root_round,
            outer: self.seg_outer,
            root: self.seg_root,
        }
    }
}

fn write_outline(file: &mut dyn Write, gear: usize, outline: &[Point2<f64>]) -> Result<()> {
    for p in outline {
        writeln!(file, "{gear},{:.6},{:.6}", p.x, p.y)?;
    }
    Ok(())
}

fn write_pair(opt: &Opt, pair: &GearPair, file: &mut dyn Write) -> Result<()> {
    writeln!(file, "gear,x,y")?;
    let (gear1, gear2) = mesh_outlines(
        &pair.gear1.profile,
        &pair.gear2.profile,
        pair.analysis.center_distance,
        opt.x_offset,
        opt.y_offset,
    );
    write_outline(file, 1, &gear1)?;
    write_outline(file, 2, &gear2)?;
    Ok(())
}

fn summary(pair: &GearPair) {
    let analysis = &pair.analysis;
    info!(
        "Contact ratio {:.4}, center distance {:.4}mm",
        analysis.contact_ratio, analysis.center_distance
    );
    if !analysis.operating_pressure_angle.converged() {
        warn!(
            "Operating pressure angle {:?}, residual {:e}",
            analysis.operating_pressure_angle.status, analysis.operating_pressure_angle.residual
        );
    }
    info!("Gear 1 undercut: {}", pair.gear1.undercut);
    info!("Gear 2 undercut: {}", pair.gear2.undercut);
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opt = Opt::from_args();
    let gear1 = opt.gear(opt.teeth, opt.shift)?;
    let gear2 = opt.gear(opt.teeth2, opt.shift2)?;
    let pair = generate_gear_pair(&gear1, &gear2, &opt.segments())?;
    summary(&pair);

    let file: File = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&opt.output)
        .with_context(|| format!("Failed to create {}", opt.output.display()))?;
    let mut file = BufWriter::new(file);
    write_pair(&opt, &pair, &mut file)?;
    file.flush()?;

    info!("Wrote {}", opt.output.display());
    Ok(())
}
