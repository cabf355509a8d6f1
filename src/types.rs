use serde::{Deserialize, Serialize};

/// A 2D point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl std::ops::Mul<f32> for Point {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// Subject gender, used as a lookup key into the regression coefficient
/// table. Adding a category means adding a variant here and rows to the
/// table; no measurement logic branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// Camera angle a set of landmarks was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    Front,
    Side,
    /// Arms-apart auxiliary view, used for arm girth estimation.
    Arms,
}

impl ViewKind {
    /// The labels this view requires, in capture order.
    pub fn required_labels(&self) -> &'static [&'static str] {
        match self {
            ViewKind::Front => &[
                "Top of Head",
                "Left Chest",
                "Right Chest",
                "Left Waist",
                "Right Waist",
                "Bottom of Feet",
            ],
            ViewKind::Side => &[
                "Top of Head",
                "Chest Front",
                "Chest Back",
                "Waist Front",
                "Waist Back",
                "Bottom of Feet",
            ],
            ViewKind::Arms => &["Left Wrist", "Left Elbow", "Right Elbow", "Right Wrist"],
        }
    }
}

impl std::fmt::Display for ViewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewKind::Front => write!(f, "front"),
            ViewKind::Side => write!(f, "side"),
            ViewKind::Arms => write!(f, "arms"),
        }
    }
}

/// A labeled anatomical reference point on one photographic view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub label: String,
    pub point: Point,
}

impl Landmark {
    pub fn new(label: impl Into<String>, point: Point) -> Self {
        Self {
            label: label.into(),
            point,
        }
    }
}

/// Subject metadata needed for calibration and regression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Height in physical units (cm by convention); sets the output unit.
    pub height: f32,
    pub gender: Gender,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, 4.0);

        let sum = a + b;
        assert_eq!(sum.x, 4.0);
        assert_eq!(sum.y, 6.0);

        let diff = b - a;
        assert_eq!(diff.x, 2.0);
        assert_eq!(diff.y, 2.0);

        let scaled = a * 2.0;
        assert_eq!(scaled.x, 2.0);
        assert_eq!(scaled.y, 4.0);
    }

    #[test]
    fn distance_zero_on_identical_points() {
        let p = Point::new(12.5, -3.0);
        assert_eq!(p.distance(&p), 0.0);
    }

    #[test]
    fn distance_symmetric() {
        let a = Point::new(70.0, 200.0);
        let b = Point::new(130.0, 200.0);
        assert_eq!(a.distance(&b), b.distance(&a));
        assert!((a.distance(&b) - 60.0).abs() < 1e-6);
    }

    #[test]
    fn distance_pythagorean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn view_label_counts() {
        assert_eq!(ViewKind::Front.required_labels().len(), 6);
        assert_eq!(ViewKind::Side.required_labels().len(), 6);
        assert_eq!(ViewKind::Arms.required_labels().len(), 4);
    }
}
