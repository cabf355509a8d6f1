//! # body-tape
//!
//! Body dimension estimation from landmark-annotated, height-calibrated
//! front/side photographs.
//!
//! This crate provides:
//! - **Landmark collection**: per-view ordered point sets with drag
//!   correction ([`View`])
//! - **Calibration**: pixel-to-physical-unit scale from a known subject
//!   height ([`CalibrationContext`])
//! - **Girth estimation**: elliptical cross-section circumferences with
//!   named garment fit factors ([`ellipse`], [`FitFactors`])
//! - **Regression**: secondary measurements from a gender-keyed coefficient
//!   table ([`CoefficientTable`])
//! - **Reporting**: deterministic report assembly and CSV export
//!   ([`MeasurementReport`], [`export`])
//!
//! Annotation capture, image handling, and pose estimation live outside this
//! crate; it consumes completed point sets and emits reports.
//!
//! ## Quick Start
//!
//! ```rust
//! use body_tape::{
//!     EngineConfig, Gender, MeasurementReport, Point, Subject, View, ViewKind,
//! };
//!
//! let mut front = View::new(ViewKind::Front);
//! let coords = [
//!     (100.0, 50.0), (70.0, 200.0), (130.0, 200.0),
//!     (75.0, 300.0), (125.0, 300.0), (100.0, 700.0),
//! ];
//! for (label, (x, y)) in ViewKind::Front.required_labels().iter().zip(coords) {
//!     front.register_point(label, Point::new(x, y)).unwrap();
//! }
//!
//! let mut side = View::new(ViewKind::Side);
//! let coords = [
//!     (100.0, 50.0), (80.0, 200.0), (120.0, 200.0),
//!     (85.0, 300.0), (115.0, 300.0), (100.0, 700.0),
//! ];
//! for (label, (x, y)) in ViewKind::Side.required_labels().iter().zip(coords) {
//!     side.register_point(label, Point::new(x, y)).unwrap();
//! }
//!
//! let subject = Subject { height: 170.0, gender: Gender::Male };
//! let report = MeasurementReport::compute(
//!     subject, &front, &side, None, &EngineConfig::default(),
//! ).unwrap();
//!
//! let csv = body_tape::export::render_csv(&report, "cm");
//! assert!(csv.contains("Chest Circumference"));
//! ```

pub mod calibrate;
pub mod ellipse;
mod error;
pub mod export;
mod regress;
mod report;
mod types;
mod view;

pub use calibrate::{compute_scale, CalibrationContext};
pub use ellipse::FitFactors;
pub use error::{Error, Result};
pub use regress::{
    Coefficient, CoefficientTable, DerivedMeasurement, RegressionInputs, RegressorInput,
};
pub use report::{EngineConfig, MeasurementReport, PrimaryMeasurement, ViewRecord};
pub use types::{Gender, Landmark, Point, Subject, ViewKind};
pub use view::{View, ViewState};
