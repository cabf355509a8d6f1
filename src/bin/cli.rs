//! CLI adapter for the measurement engine.
//!
//! Usage:
//!   body-tape annotations.json                  # CSV to stdout
//!   body-tape annotations.json -o report.csv    # CSV to file
//!   body-tape annotations.json --json           # report as JSON
//!
//! The annotation file supplies completed point sets in capture order:
//!
//! ```json
//! {
//!   "height": 170.0,
//!   "gender": "Male",
//!   "front": [{ "label": "Top of Head", "x": 100.0, "y": 50.0 }, ...],
//!   "side":  [...],
//!   "arms":  [...]
//! }
//! ```

use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

use body_tape::{
    export, CoefficientTable, EngineConfig, FitFactors, Gender, MeasurementReport, Point,
    Subject, View, ViewKind,
};

#[derive(Parser, Debug)]
#[command(name = "body-tape")]
#[command(author, version, about = "Body measurements from annotated photos", long_about = None)]
struct Args {
    /// Annotation JSON file with subject data and per-view points
    #[arg(required = true)]
    annotations: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit the full report as JSON instead of CSV
    #[arg(short, long)]
    json: bool,

    /// Regression coefficient table (JSON); defaults to the built-in table
    #[arg(long)]
    coefficients: Option<PathBuf>,

    /// Garment fit factor table (JSON); defaults to the built-in factors
    #[arg(long)]
    fit_factors: Option<PathBuf>,

    /// Unit label for exported values
    #[arg(long, default_value = "cm")]
    unit: String,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Deserialize)]
struct LandmarkIn {
    label: String,
    x: f32,
    y: f32,
}

#[derive(Deserialize)]
struct AnnotationFile {
    height: f32,
    gender: Gender,
    front: Vec<LandmarkIn>,
    side: Vec<LandmarkIn>,
    #[serde(default)]
    arms: Option<Vec<LandmarkIn>>,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.verbose {
        eprintln!("Loading annotations from {:?}...", args.annotations);
    }
    let text = std::fs::read_to_string(&args.annotations)?;
    let annotations: AnnotationFile = serde_json::from_str(&text)?;

    let config = EngineConfig {
        coefficients: match &args.coefficients {
            Some(path) => {
                if args.verbose {
                    eprintln!("Loading coefficient table from {:?}...", path);
                }
                CoefficientTable::load(path)?
            }
            None => CoefficientTable::default(),
        },
        fit_factors: match &args.fit_factors {
            Some(path) => {
                if args.verbose {
                    eprintln!("Loading fit factors from {:?}...", path);
                }
                FitFactors::load(path)?
            }
            None => FitFactors::default(),
        },
    };

    let front = build_view(ViewKind::Front, &annotations.front)?;
    let side = build_view(ViewKind::Side, &annotations.side)?;
    let arms = annotations
        .arms
        .as_deref()
        .map(|points| build_view(ViewKind::Arms, points))
        .transpose()?;

    let subject = Subject {
        height: annotations.height,
        gender: annotations.gender,
    };

    if args.verbose {
        eprintln!("Computing measurements...");
    }
    let report = MeasurementReport::compute(subject, &front, &side, arms.as_ref(), &config)?;

    if args.verbose {
        eprintln!(
            "Scale factor: {:.4} {} per pixel; {} primaries, {} derived",
            report.scale_factor,
            args.unit,
            report.primaries.len(),
            report.derived.len()
        );
    }

    let output_str = if args.json {
        serde_json::to_string_pretty(&report)?
    } else {
        export::render_csv(&report, &args.unit)
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output_str)?;
        if args.verbose {
            eprintln!("Output written to {:?}", path);
        }
    } else {
        print!("{}", output_str);
    }

    Ok(())
}

fn build_view(kind: ViewKind, points: &[LandmarkIn]) -> Result<View, body_tape::Error> {
    let mut view = View::new(kind);
    for p in points {
        view.register_point(&p.label, Point::new(p.x, p.y))?;
    }
    Ok(view)
}
