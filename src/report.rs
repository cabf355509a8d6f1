//! Measurement computation and report assembly.
//!
//! [`MeasurementReport::compute`] is the single "calculate" action: it checks
//! that the required views are complete, snapshots their point lists,
//! calibrates, measures the named landmark pairs, runs the girths through the
//! ellipse estimator, and derives the secondary measurements. The produced
//! report is immutable; export is a separate, retryable step.

use serde::{Deserialize, Serialize};

use crate::calibrate::CalibrationContext;
use crate::ellipse::FitFactors;
use crate::error::Result;
use crate::regress::{CoefficientTable, DerivedMeasurement, RegressionInputs};
use crate::types::{Landmark, Point, Subject, ViewKind};
use crate::view::View;

/// A girth measured from a named landmark pair per view, never from raw
/// array positions, so capture-order quirks cannot swap measurements.
struct Girth {
    name: &'static str,
    /// Fit factor segment name.
    segment: &'static str,
    /// Front-view width pair.
    width: (&'static str, &'static str),
    /// Side-view depth pair.
    depth: (&'static str, &'static str),
}

const GIRTHS: &[Girth] = &[
    Girth {
        name: "Chest Circumference",
        segment: "chest",
        width: ("Left Chest", "Right Chest"),
        depth: ("Chest Front", "Chest Back"),
    },
    Girth {
        name: "Waist Circumference",
        segment: "waist",
        width: ("Left Waist", "Right Waist"),
        depth: ("Waist Front", "Waist Back"),
    },
];

/// Arms-apart girth supplement: the elbow span divided by this gives an arm
/// width, treated as a circular cross-section.
const ARM_SPAN_DIVISOR: f32 = 4.0;

/// A directly measured body dimension: a width/depth landmark-pair distance
/// pushed through the ellipse estimator. `value` is `None` when the inputs
/// were degenerate; the rest of the report still computes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryMeasurement {
    pub name: String,
    pub width_px: f32,
    pub depth_px: f32,
    pub width_unit: f32,
    pub depth_unit: f32,
    /// Fit-factored circumference in physical units.
    pub value: Option<f32>,
}

/// The point list of one view as captured at computation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRecord {
    pub kind: ViewKind,
    pub landmarks: Vec<Landmark>,
}

/// Everything the measurement engine is configured with. All of it is data:
/// swapping coefficient sets or fit factors never touches code.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub fit_factors: FitFactors,
    pub coefficients: CoefficientTable,
}

/// One subject's computed measurements, ready for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementReport {
    pub subject: Subject,
    pub scale_factor: f32,
    /// Captured point lists in view order (front, side, then arms if given).
    pub views: Vec<ViewRecord>,
    /// Primaries in measurement-table order.
    pub primaries: Vec<PrimaryMeasurement>,
    /// Derived measurements sorted by name.
    pub derived: Vec<DerivedMeasurement>,
}

impl MeasurementReport {
    /// Compute a report from completed front and side views (and an optional
    /// arms-apart view). Fails before any arithmetic when a view is
    /// incomplete or calibration inputs are invalid; individual degenerate
    /// measurements are recorded as invalid instead of aborting.
    pub fn compute(
        subject: Subject,
        front: &View,
        side: &View,
        arms: Option<&View>,
        config: &EngineConfig,
    ) -> Result<Self> {
        front.ensure_complete()?;
        side.ensure_complete()?;
        if let Some(arms) = arms {
            arms.ensure_complete()?;
        }

        // Snapshots decouple the computation from later view edits.
        let front_points = front.snapshot();
        let side_points = side.snapshot();
        let arms_points = arms.map(|v| v.snapshot());

        let calibration =
            CalibrationContext::from_views(&front_points, &side_points, subject.height)?;

        let mut primaries = Vec::with_capacity(GIRTHS.len() + 1);
        for girth in GIRTHS {
            primaries.push(measure_girth(
                girth,
                &front_points,
                &side_points,
                &calibration,
                &config.fit_factors,
            ));
        }
        if let Some(arms_points) = &arms_points {
            primaries.push(measure_arm_girth(
                arms_points,
                &calibration,
                &config.fit_factors,
            ));
        }

        let find = |name: &str| {
            primaries
                .iter()
                .find(|p| p.name == name)
                .and_then(|p| p.value)
        };
        let inputs = RegressionInputs {
            chest: find("Chest Circumference"),
            waist: find("Waist Circumference"),
            height: subject.height,
        };

        let mut derived = config.coefficients.derive(subject.gender, &inputs)?;
        derived.sort_by(|a, b| a.name.cmp(&b.name));

        let mut views = vec![
            ViewRecord {
                kind: ViewKind::Front,
                landmarks: front_points,
            },
            ViewRecord {
                kind: ViewKind::Side,
                landmarks: side_points,
            },
        ];
        if let Some(landmarks) = arms_points {
            views.push(ViewRecord {
                kind: ViewKind::Arms,
                landmarks,
            });
        }

        Ok(Self {
            subject,
            scale_factor: calibration.scale_factor,
            views,
            primaries,
            derived,
        })
    }
}

fn lookup(landmarks: &[Landmark], label: &str) -> Option<Point> {
    landmarks
        .iter()
        .find(|l| l.label == label)
        .map(|l| l.point)
}

fn pair_distance(landmarks: &[Landmark], pair: (&str, &str)) -> f32 {
    match (lookup(landmarks, pair.0), lookup(landmarks, pair.1)) {
        (Some(a), Some(b)) => a.distance(&b),
        // Unreachable for complete standard views; a zero extent is caught
        // by the ellipse estimator and marked invalid.
        _ => 0.0,
    }
}

fn measure_girth(
    girth: &Girth,
    front: &[Landmark],
    side: &[Landmark],
    calibration: &CalibrationContext,
    fit_factors: &FitFactors,
) -> PrimaryMeasurement {
    let width_px = pair_distance(front, girth.width);
    let depth_px = pair_distance(side, girth.depth);
    let width_unit = calibration.to_units(width_px);
    let depth_unit = calibration.to_units(depth_px);

    PrimaryMeasurement {
        name: girth.name.to_string(),
        width_px,
        depth_px,
        width_unit,
        depth_unit,
        value: fit_factors
            .fitted_estimate(girth.segment, width_unit, depth_unit)
            .ok(),
    }
}

/// Upper arm girth from the arms-apart view: elbow span / 4 as both width
/// and depth (circular cross-section).
fn measure_arm_girth(
    arms: &[Landmark],
    calibration: &CalibrationContext,
    fit_factors: &FitFactors,
) -> PrimaryMeasurement {
    let span_px = pair_distance(arms, ("Left Elbow", "Right Elbow"));
    let width_px = span_px / ARM_SPAN_DIVISOR;
    let width_unit = calibration.to_units(width_px);

    PrimaryMeasurement {
        name: "Upper Arm Circumference".to_string(),
        width_px,
        depth_px: width_px,
        width_unit,
        depth_unit: width_unit,
        value: fit_factors
            .fitted_estimate("upper arm", width_unit, width_unit)
            .ok(),
    }
}
