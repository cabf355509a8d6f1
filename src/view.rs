//! Per-view landmark collection.
//!
//! A [`View`] tracks the landmarks placed on one photograph against the
//! ordered label list that view requires. Points are appended in label order
//! and may be moved afterwards (drag correction) but never reordered or
//! removed.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{Landmark, Point, ViewKind};

/// Collection progress of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Empty,
    Collecting,
    Complete,
}

/// The landmarks captured so far for one camera angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    kind: ViewKind,
    points: Vec<Landmark>,
}

impl View {
    /// New empty view requiring the standard labels for `kind`.
    pub fn new(kind: ViewKind) -> Self {
        Self {
            kind,
            points: Vec::with_capacity(kind.required_labels().len()),
        }
    }

    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    pub fn state(&self) -> ViewState {
        if self.points.is_empty() {
            ViewState::Empty
        } else if self.is_complete() {
            ViewState::Complete
        } else {
            ViewState::Collecting
        }
    }

    /// Label the next `register_point` call must supply, or `None` when the
    /// view is complete.
    pub fn next_label(&self) -> Option<&'static str> {
        self.kind.required_labels().get(self.points.len()).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn required(&self) -> usize {
        self.kind.required_labels().len()
    }

    pub fn is_complete(&self) -> bool {
        self.points.len() == self.required()
    }

    /// Append the next landmark. Fails without mutating when the view is
    /// already complete or `label` is not the next expected label.
    pub fn register_point(&mut self, label: &str, point: Point) -> Result<()> {
        let expected = match self.next_label() {
            Some(l) => l,
            None => return Err(Error::AllPointsPlaced(self.kind)),
        };
        if label != expected {
            return Err(Error::UnexpectedLabel {
                view: self.kind,
                expected: expected.to_string(),
                got: label.to_string(),
            });
        }
        self.points.push(Landmark::new(expected, point));
        Ok(())
    }

    /// Replace the coordinate of an already-placed landmark, preserving its
    /// label and position in the capture order.
    pub fn move_point(&mut self, index: usize, point: Point) -> Result<()> {
        match self.points.get_mut(index) {
            Some(landmark) => {
                landmark.point = point;
                Ok(())
            }
            None => Err(Error::NoSuchPoint {
                view: self.kind,
                index,
            }),
        }
    }

    /// Look up a placed landmark by label.
    pub fn point(&self, label: &str) -> Option<Point> {
        self.points
            .iter()
            .find(|l| l.label == label)
            .map(|l| l.point)
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.points
    }

    /// Owned copy of the point list, taken by the measurement engine before
    /// computing so later view mutation cannot skew an in-flight report.
    pub fn snapshot(&self) -> Vec<Landmark> {
        self.points.clone()
    }

    /// Error unless every required landmark has been placed.
    pub fn ensure_complete(&self) -> Result<()> {
        if self.is_complete() {
            Ok(())
        } else {
            Err(Error::Annotation {
                view: self.kind,
                placed: self.points.len(),
                required: self.required(),
            })
        }
    }
}
