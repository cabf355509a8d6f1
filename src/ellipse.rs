//! Elliptical cross-section circumference estimation.
//!
//! A body segment's girth is approximated as the circumference of an ellipse
//! whose axes are the segment's front-view width and side-view depth, using
//! Ramanujan's second approximation. Empirical garment fit factors are applied
//! on top, looked up by segment name from a [`FitFactors`] table.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Circumference of an ellipse with the given full width and depth
/// (Ramanujan's second approximation).
///
/// Both extents must be positive; the formula is undefined otherwise.
pub fn estimate(width: f32, depth: f32) -> Result<f32> {
    if !(width > 0.0 && depth > 0.0) {
        return Err(Error::Computation {
            name: "ellipse circumference".into(),
            reason: format!("width and depth must be positive, got {width} x {depth}"),
        });
    }
    let a = width / 2.0;
    let b = depth / 2.0;
    let h = ((a - b) / (a + b)).powi(2);
    let circumference =
        std::f32::consts::PI * (a + b) * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()));
    if circumference.is_finite() {
        Ok(circumference)
    } else {
        Err(Error::Computation {
            name: "ellipse circumference".into(),
            reason: format!("non-finite result for {width} x {depth}"),
        })
    }
}

/// Multiplicative garment fit factors keyed by segment name.
///
/// The defaults are empirical constants carried over from manual fitting
/// sessions (chest 1.1, waist 1.2); unknown segments get 1.0. Recalibrated
/// factors or new segments are a data change, loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitFactors {
    factors: BTreeMap<String, f32>,
}

impl FitFactors {
    /// Empty table: every segment gets factor 1.0.
    pub fn none() -> Self {
        Self {
            factors: BTreeMap::new(),
        }
    }

    pub fn set(&mut self, segment: impl Into<String>, factor: f32) {
        self.factors.insert(segment.into(), factor);
    }

    /// Fit factor for a segment; 1.0 when the segment has no entry.
    pub fn factor(&self, segment: &str) -> f32 {
        self.factors.get(segment).copied().unwrap_or(1.0)
    }

    /// Raw ellipse estimate with the segment's fit factor applied.
    pub fn fitted_estimate(&self, segment: &str, width: f32, depth: f32) -> Result<f32> {
        Ok(estimate(width, depth)? * self.factor(segment))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let table = serde_json::from_reader(BufReader::new(file))?;
        Ok(table)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}

impl Default for FitFactors {
    fn default() -> Self {
        let mut table = Self::none();
        table.set("chest", 1.1);
        table.set("waist", 1.2);
        table.set("upper arm", 1.0);
        table
    }
}
