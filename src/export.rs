//! CSV export of a measurement report.
//!
//! Layout: a subject block, one point block per view, the measured
//! circumferences, then the estimated measurements, blank-line separated.
//! Measurement values are fixed to two decimals; invalid measurements export
//! the literal `invalid` so partial failures never shrink the table.
//! Coordinates use the shortest exact float form, so a re-parsed export
//! reproduces the captured points bit-for-bit.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::report::MeasurementReport;
use crate::types::ViewKind;

const POINT_HEADER: &str = "Point Label,X Coordinate,Y Coordinate";
const INVALID: &str = "invalid";

fn view_title(kind: ViewKind) -> &'static str {
    match kind {
        ViewKind::Front => "Front Points",
        ViewKind::Side => "Side Points",
        ViewKind::Arms => "Arms Points",
    }
}

fn format_value(value: Option<f32>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => INVALID.to_string(),
    }
}

/// Render the report as CSV text.
pub fn render_csv(report: &MeasurementReport, unit: &str) -> String {
    let mut out = String::new();

    out.push_str("User Information\n");
    let _ = writeln!(out, "Gender,{}", report.subject.gender);
    let _ = writeln!(out, "Height ({unit}),{:.2}", report.subject.height);

    for view in &report.views {
        out.push('\n');
        let _ = writeln!(out, "{}", view_title(view.kind));
        out.push_str(POINT_HEADER);
        out.push('\n');
        for landmark in &view.landmarks {
            let _ = writeln!(out, "{},{},{}", landmark.label, landmark.point.x, landmark.point.y);
        }
    }

    out.push('\n');
    let _ = writeln!(out, "Measurement,Value ({unit})");
    for primary in &report.primaries {
        let _ = writeln!(out, "{},{}", primary.name, format_value(primary.value));
    }

    out.push('\n');
    let _ = writeln!(out, "Estimated Measurement,Value ({unit})");
    for derived in &report.derived {
        let _ = writeln!(out, "{},{}", derived.name, format_value(derived.value));
    }

    out
}

/// Write the CSV to any writer.
pub fn write_csv<W: Write>(report: &MeasurementReport, unit: &str, mut out: W) -> Result<()> {
    out.write_all(render_csv(report, unit).as_bytes())?;
    Ok(())
}

/// Write the CSV to a file. On failure the in-memory report is untouched and
/// the export can be retried against another destination.
pub fn export_csv<P: AsRef<Path>>(
    report: &MeasurementReport,
    unit: &str,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, render_csv(report, unit)).map_err(|source| Error::Export {
        path: path.display().to_string(),
        source,
    })
}

/// A re-parsed export, used to verify round-trip stability.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedExport {
    pub gender: String,
    pub height: f32,
    /// `(view title, [(label, x, y)])` blocks in file order.
    pub views: Vec<(String, Vec<(String, f32, f32)>)>,
    /// Primary measurements; `None` for `invalid` entries.
    pub measurements: Vec<(String, Option<f32>)>,
    pub estimated: Vec<(String, Option<f32>)>,
}

/// Parse CSV text previously produced by [`render_csv`].
pub fn parse_csv(text: &str) -> Result<ParsedExport> {
    let malformed = |msg: &str| Error::MalformedExport(msg.to_string());

    let mut parsed = ParsedExport::default();
    let mut lines = text.lines().peekable();

    while let Some(line) = lines.next() {
        if line.is_empty() {
            continue;
        }
        if line == "User Information" {
            while let Some(row) = lines.next_if(|l| !l.is_empty()) {
                let (key, value) = row
                    .split_once(',')
                    .ok_or_else(|| malformed("subject row without value"))?;
                if key == "Gender" {
                    parsed.gender = value.to_string();
                } else if key.starts_with("Height") {
                    parsed.height = value
                        .parse()
                        .map_err(|_| malformed("unparseable height"))?;
                }
            }
        } else if line.ends_with("Points") {
            let title = line.to_string();
            match lines.next() {
                Some(header) if header == POINT_HEADER => {}
                _ => return Err(malformed("point block without header")),
            }
            let mut points = Vec::new();
            while let Some(row) = lines.next_if(|l| !l.is_empty()) {
                let mut cells = row.splitn(3, ',');
                let label = cells.next().unwrap_or_default().to_string();
                let x = cells
                    .next()
                    .and_then(|c| c.parse().ok())
                    .ok_or_else(|| malformed("unparseable x coordinate"))?;
                let y = cells
                    .next()
                    .and_then(|c| c.parse().ok())
                    .ok_or_else(|| malformed("unparseable y coordinate"))?;
                points.push((label, x, y));
            }
            parsed.views.push((title, points));
        } else if line.starts_with("Measurement,") || line.starts_with("Estimated Measurement,") {
            let estimated = line.starts_with("Estimated");
            while let Some(row) = lines.next_if(|l| !l.is_empty()) {
                let (name, value) = row
                    .split_once(',')
                    .ok_or_else(|| malformed("measurement row without value"))?;
                let value = if value == INVALID {
                    None
                } else {
                    Some(
                        value
                            .parse()
                            .map_err(|_| malformed("unparseable measurement value"))?,
                    )
                };
                if estimated {
                    parsed.estimated.push((name.to_string(), value));
                } else {
                    parsed.measurements.push((name.to_string(), value));
                }
            }
        } else {
            return Err(malformed("unrecognized section"));
        }
    }

    Ok(parsed)
}
