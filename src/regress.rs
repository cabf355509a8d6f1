//! Gender-conditioned anthropometric regression.
//!
//! Secondary measurements (hip, shoulder width, sleeve length, ...) are
//! derived from the primary girths and the subject height through a
//! coefficient table keyed by `(gender, measurement name)`. Each entry names
//! the primary input it consumes and a single multiplier; one generic routine
//! evaluates the whole table, so recalibrating a coefficient or adding a body
//! category is a data change, never a control-flow change.
//!
//! The default coefficients are an approximation pending real anthropometric
//! calibration data; they were taken verbatim from one manual fitting
//! session and should not be read as authoritative. Alternative tables load
//! from JSON via [`CoefficientTable::load`].

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Gender;

/// Primary quantity a regression entry consumes, in physical units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegressorInput {
    /// Chest circumference.
    Chest,
    /// Waist circumference.
    Waist,
    /// Mean of chest and waist circumferences.
    ChestWaistMean,
    /// Subject height.
    Height,
}

/// One row of the coefficient table: `value = input * factor`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    pub name: String,
    pub gender: Gender,
    pub input: RegressorInput,
    pub factor: f32,
}

/// Available primary values for one derivation run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegressionInputs {
    pub chest: Option<f32>,
    pub waist: Option<f32>,
    pub height: f32,
}

impl RegressionInputs {
    fn resolve(&self, input: RegressorInput) -> Option<f32> {
        match input {
            RegressorInput::Chest => self.chest,
            RegressorInput::Waist => self.waist,
            RegressorInput::ChestWaistMean => match (self.chest, self.waist) {
                (Some(c), Some(w)) => Some((c + w) / 2.0),
                _ => None,
            },
            RegressorInput::Height => Some(self.height),
        }
    }
}

/// A measurement derived by regression. `value` is `None` when the entry's
/// primary input was itself invalid, leaving the rest of the report intact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMeasurement {
    pub name: String,
    pub gender: Gender,
    pub value: Option<f32>,
}

/// Regression coefficients keyed by `(gender, measurement name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientTable {
    entries: Vec<Coefficient>,
}

impl CoefficientTable {
    pub fn new(entries: Vec<Coefficient>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Coefficient] {
        &self.entries
    }

    /// Derive every measurement the table defines for `gender`, in table
    /// order. Deterministic: identical inputs yield identical output. A
    /// table with no rows for `gender` is an error, never an empty result.
    pub fn derive(
        &self,
        gender: Gender,
        inputs: &RegressionInputs,
    ) -> Result<Vec<DerivedMeasurement>> {
        let derived: Vec<_> = self
            .entries
            .iter()
            .filter(|c| c.gender == gender)
            .map(|c| DerivedMeasurement {
                name: c.name.clone(),
                gender,
                value: inputs.resolve(c.input).map(|v| v * c.factor),
            })
            .collect();
        if derived.is_empty() {
            return Err(Error::EmptyCoefficientTable(gender));
        }
        Ok(derived)
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

impl Default for CoefficientTable {
    /// Placeholder coefficients from a single manual fitting session.
    /// Composite factors are kept in their original factored form.
    fn default() -> Self {
        use Gender::{Female, Male};
        use RegressorInput::{Chest, ChestWaistMean, Height, Waist};

        let row = |name: &str, gender, input, factor| Coefficient {
            name: name.to_string(),
            gender,
            input,
            factor,
        };

        Self::new(vec![
            // Male
            row("Hip Circumference", Male, ChestWaistMean, 1.05),
            row("Shoulder Width", Male, Chest, 0.25 * 1.8),
            row("Sleeve Length", Male, Height, 0.25 * 1.4),
            row("Inseam Length", Male, Height, 0.45),
            row("Neck Circumference", Male, Chest, 0.37),
            row("Arm Length", Male, Height, 0.28),
            row("Thigh Circumference", Male, Waist, 0.68),
            row("Torso Length", Male, Height, 0.27),
            row("Leg Length", Male, Height, 0.53),
            // Female
            row("Hip Circumference", Female, ChestWaistMean, 1.15),
            row("Shoulder Width", Female, Chest, 0.25 * 1.6),
            row("Sleeve Length", Female, Height, 0.24 * 1.4),
            row("Inseam Length", Female, Height, 0.44),
            row("Neck Circumference", Female, Chest, 0.35),
            row("Arm Length", Female, Height, 0.27),
            row("Thigh Circumference", Female, Waist, 0.75),
            row("Torso Length", Female, Height, 0.28),
            row("Leg Length", Female, Height, 0.52),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs() -> RegressionInputs {
        RegressionInputs {
            chest: Some(100.0),
            waist: Some(80.0),
            height: 170.0,
        }
    }

    fn value(derived: &[DerivedMeasurement], name: &str) -> Option<f32> {
        derived.iter().find(|d| d.name == name).unwrap().value
    }

    #[test]
    fn male_defaults() {
        let table = CoefficientTable::default();
        let derived = table.derive(Gender::Male, &inputs()).unwrap();
        assert_eq!(derived.len(), 9);

        // hip = mean(100, 80) * 1.05
        assert!((value(&derived, "Hip Circumference").unwrap() - 94.5).abs() < 1e-3);
        // shoulder = 100 * 0.25 * 1.8
        assert!((value(&derived, "Shoulder Width").unwrap() - 45.0).abs() < 1e-3);
        // thigh = 80 * 0.68
        assert!((value(&derived, "Thigh Circumference").unwrap() - 54.4).abs() < 1e-3);
        // leg = 170 * 0.53
        assert!((value(&derived, "Leg Length").unwrap() - 90.1).abs() < 1e-3);
    }

    #[test]
    fn female_defaults_differ() {
        let table = CoefficientTable::default();
        let derived = table.derive(Gender::Female, &inputs()).unwrap();
        assert_eq!(derived.len(), 9);

        assert!((value(&derived, "Hip Circumference").unwrap() - 103.5).abs() < 1e-3);
        assert!((value(&derived, "Shoulder Width").unwrap() - 40.0).abs() < 1e-3);
        assert!((value(&derived, "Thigh Circumference").unwrap() - 60.0).abs() < 1e-3);
    }

    #[test]
    fn derivation_is_deterministic() {
        let table = CoefficientTable::default();
        let a = table.derive(Gender::Male, &inputs()).unwrap();
        let b = table.derive(Gender::Male, &inputs()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn missing_input_yields_invalid_value_only() {
        let table = CoefficientTable::default();
        let partial = RegressionInputs {
            chest: None,
            waist: Some(80.0),
            height: 170.0,
        };
        let derived = table.derive(Gender::Male, &partial).unwrap();

        // Chest-based entries are invalid; everything else still computes.
        assert!(value(&derived, "Shoulder Width").is_none());
        assert!(value(&derived, "Hip Circumference").is_none());
        assert!(value(&derived, "Thigh Circumference").is_some());
        assert!(value(&derived, "Leg Length").is_some());
        assert_eq!(derived.len(), 9);
    }

    #[test]
    fn gender_without_rows_is_an_error() {
        // A user-supplied table covering only one gender must surface a
        // signal for the other, never an empty derived list.
        let male_only = CoefficientTable::new(
            CoefficientTable::default()
                .entries()
                .iter()
                .filter(|c| c.gender == Gender::Male)
                .cloned()
                .collect(),
        );
        assert!(male_only.derive(Gender::Male, &inputs()).is_ok());
        assert!(matches!(
            male_only.derive(Gender::Female, &inputs()),
            Err(Error::EmptyCoefficientTable(Gender::Female))
        ));
    }

    #[test]
    fn table_round_trips_through_json() {
        let table = CoefficientTable::default();
        let path = std::env::temp_dir().join("body_tape_coefficients.json");
        table.save(&path).unwrap();
        let loaded = CoefficientTable::load(&path).unwrap();
        assert_eq!(loaded, table);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn recalibration_is_a_data_change() {
        let mut entries = CoefficientTable::default().entries().to_vec();
        for entry in &mut entries {
            if entry.name == "Thigh Circumference" && entry.gender == Gender::Male {
                entry.factor = 0.70;
            }
        }
        let table = CoefficientTable::new(entries);
        let derived = table.derive(Gender::Male, &inputs()).unwrap();
        assert!((value(&derived, "Thigh Circumference").unwrap() - 56.0).abs() < 1e-3);
    }
}
