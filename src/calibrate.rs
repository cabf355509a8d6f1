//! Pixel-to-physical-unit scale calibration.
//!
//! The scale factor comes from a reference segment of known physical length:
//! the subject's height measured between the top-of-head and bottom-of-feet
//! landmarks. When both front and side views are available the two reference
//! pixel lengths are averaged before dividing.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Landmark, Point};

const REFERENCE_TOP: &str = "Top of Head";
const REFERENCE_BOTTOM: &str = "Bottom of Feet";

/// Scale factor in physical units per pixel.
///
/// Stateless with respect to its inputs: recomputing with identical points
/// and height yields an identical factor.
pub fn compute_scale(p1: Point, p2: Point, known_height: f32) -> Result<f32> {
    if !(known_height > 0.0) {
        return Err(Error::Calibration(format!(
            "subject height must be positive, got {known_height}"
        )));
    }
    let reference_px = p1.distance(&p2);
    if reference_px == 0.0 {
        return Err(Error::Calibration(
            "reference landmarks coincide (zero-length segment)".into(),
        ));
    }
    Ok(known_height / reference_px)
}

/// A resolved calibration: reference pixel length and derived scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationContext {
    pub subject_height: f32,
    pub reference_px: f32,
    pub scale_factor: f32,
}

impl CalibrationContext {
    /// Calibrate from the reference landmark pair of a single view.
    pub fn from_points(p1: Point, p2: Point, subject_height: f32) -> Result<Self> {
        let scale_factor = compute_scale(p1, p2, subject_height)?;
        Ok(Self {
            subject_height,
            reference_px: p1.distance(&p2),
            scale_factor,
        })
    }

    /// Calibrate from front and side view snapshots, averaging the two
    /// reference pixel heights.
    pub fn from_views(
        front: &[Landmark],
        side: &[Landmark],
        subject_height: f32,
    ) -> Result<Self> {
        let front_px = reference_length(front, "front")?;
        let side_px = reference_length(side, "side")?;
        let reference_px = (front_px + side_px) / 2.0;
        if !(subject_height > 0.0) {
            return Err(Error::Calibration(format!(
                "subject height must be positive, got {subject_height}"
            )));
        }
        Ok(Self {
            subject_height,
            reference_px,
            scale_factor: subject_height / reference_px,
        })
    }

    /// Convert a pixel distance to physical units.
    pub fn to_units(&self, pixels: f32) -> f32 {
        pixels * self.scale_factor
    }
}

fn reference_length(landmarks: &[Landmark], which: &str) -> Result<f32> {
    let find = |label: &str| {
        landmarks
            .iter()
            .find(|l| l.label == label)
            .map(|l| l.point)
            .ok_or_else(|| {
                Error::Calibration(format!("{which} view is missing the \"{label}\" landmark"))
            })
    };
    let top = find(REFERENCE_TOP)?;
    let bottom = find(REFERENCE_BOTTOM)?;
    let length = top.distance(&bottom);
    if length == 0.0 {
        return Err(Error::Calibration(format!(
            "{which} view reference landmarks coincide (zero-length segment)"
        )));
    }
    Ok(length)
}
