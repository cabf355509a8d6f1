//! End-to-end tests: annotation through calibration, girth estimation,
//! regression, and CSV round-trip.

use body_tape::{
    export, CoefficientTable, EngineConfig, FitFactors, Gender, MeasurementReport, Point,
    Subject, View, ViewKind,
};

fn fill(kind: ViewKind, coords: &[(f32, f32)]) -> View {
    let mut view = View::new(kind);
    for (label, &(x, y)) in kind.required_labels().iter().zip(coords) {
        view.register_point(label, Point::new(x, y)).unwrap();
    }
    view
}

fn front_view() -> View {
    fill(
        ViewKind::Front,
        &[
            (100.0, 50.0),  // Top of Head
            (70.0, 200.0),  // Left Chest
            (130.0, 200.0), // Right Chest
            (75.0, 300.0),  // Left Waist
            (125.0, 300.0), // Right Waist
            (100.0, 700.0), // Bottom of Feet
        ],
    )
}

fn side_view() -> View {
    fill(
        ViewKind::Side,
        &[
            (100.0, 50.0),
            (80.0, 200.0),  // Chest Front
            (120.0, 200.0), // Chest Back: 40 px depth
            (85.0, 300.0),
            (115.0, 300.0),
            (100.0, 700.0),
        ],
    )
}

fn subject() -> Subject {
    Subject {
        height: 170.0,
        gender: Gender::Male,
    }
}

#[test]
fn scenario_scale_and_girths() {
    let report = MeasurementReport::compute(
        subject(),
        &front_view(),
        &side_view(),
        None,
        &EngineConfig::default(),
    )
    .unwrap();

    // Reference segment is 650 px in both views.
    assert!((report.scale_factor - 0.2615).abs() < 1e-3);

    let chest = &report.primaries[0];
    assert_eq!(chest.name, "Chest Circumference");
    assert!((chest.width_unit - 15.69).abs() < 0.01);
    assert!((chest.depth_unit - 10.46).abs() < 0.01);
    // Ramanujan on 15.69 x 10.46 ~= 41.49, chest fit factor 1.1.
    assert!((chest.value.unwrap() - 45.64).abs() < 0.01);

    let waist = &report.primaries[1];
    assert_eq!(waist.name, "Waist Circumference");
    assert!((waist.value.unwrap() - 40.06).abs() < 0.01);
}

#[test]
fn fit_factor_scales_girth_linearly() {
    let base = MeasurementReport::compute(
        subject(),
        &front_view(),
        &side_view(),
        None,
        &EngineConfig {
            fit_factors: FitFactors::none(),
            coefficients: CoefficientTable::default(),
        },
    )
    .unwrap();

    let mut doubled_factors = FitFactors::none();
    doubled_factors.set("chest", 2.0);
    let doubled = MeasurementReport::compute(
        subject(),
        &front_view(),
        &side_view(),
        None,
        &EngineConfig {
            fit_factors: doubled_factors,
            coefficients: CoefficientTable::default(),
        },
    )
    .unwrap();

    let raw = base.primaries[0].value.unwrap();
    let fitted = doubled.primaries[0].value.unwrap();
    assert!((fitted - raw * 2.0).abs() < 1e-3);
    // Waist has no factor in either config and is unchanged.
    assert_eq!(base.primaries[1].value, doubled.primaries[1].value);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let config = EngineConfig::default();
    let a = MeasurementReport::compute(subject(), &front_view(), &side_view(), None, &config)
        .unwrap();
    let b = MeasurementReport::compute(subject(), &front_view(), &side_view(), None, &config)
        .unwrap();
    assert_eq!(export::render_csv(&a, "cm"), export::render_csv(&b, "cm"));
}

#[test]
fn csv_round_trip() {
    let report = MeasurementReport::compute(
        subject(),
        &front_view(),
        &side_view(),
        None,
        &EngineConfig::default(),
    )
    .unwrap();

    let csv = export::render_csv(&report, "cm");
    let parsed = export::parse_csv(&csv).unwrap();

    assert_eq!(parsed.gender, "Male");
    assert_eq!(parsed.height, 170.0);

    // Point coordinates survive exactly.
    assert_eq!(parsed.views.len(), 2);
    for (record, (_, points)) in report.views.iter().zip(&parsed.views) {
        assert_eq!(record.landmarks.len(), points.len());
        for (landmark, (label, x, y)) in record.landmarks.iter().zip(points) {
            assert_eq!(&landmark.label, label);
            assert_eq!(landmark.point.x, *x);
            assert_eq!(landmark.point.y, *y);
        }
    }

    // Measurement values survive to the stored 2-decimal precision.
    for (primary, (name, value)) in report.primaries.iter().zip(&parsed.measurements) {
        assert_eq!(&primary.name, name);
        assert!((primary.value.unwrap() - value.unwrap()).abs() < 0.005 + 1e-4);
    }
    for (derived, (name, value)) in report.derived.iter().zip(&parsed.estimated) {
        assert_eq!(&derived.name, name);
        assert!((derived.value.unwrap() - value.unwrap()).abs() < 0.005 + 1e-4);
    }
}

#[test]
fn gender_changes_derived_but_not_primaries() {
    let male = MeasurementReport::compute(
        subject(),
        &front_view(),
        &side_view(),
        None,
        &EngineConfig::default(),
    )
    .unwrap();
    let female = MeasurementReport::compute(
        Subject {
            height: 170.0,
            gender: Gender::Female,
        },
        &front_view(),
        &side_view(),
        None,
        &EngineConfig::default(),
    )
    .unwrap();

    assert_eq!(male.primaries, female.primaries);

    let shoulder = |report: &MeasurementReport| {
        report
            .derived
            .iter()
            .find(|d| d.name == "Shoulder Width")
            .unwrap()
            .value
            .unwrap()
    };
    // Male 0.25 * 1.8 vs female 0.25 * 1.6 of chest circumference.
    assert!(shoulder(&male) > shoulder(&female));
}

#[test]
fn drag_correction_feeds_into_measurements() {
    let mut front = front_view();
    // Widen the chest by 10 px on each side.
    front.move_point(1, Point::new(60.0, 200.0)).unwrap();
    front.move_point(2, Point::new(140.0, 200.0)).unwrap();

    let report = MeasurementReport::compute(
        subject(),
        &front,
        &side_view(),
        None,
        &EngineConfig::default(),
    )
    .unwrap();

    assert!((report.primaries[0].width_px - 80.0).abs() < 1e-4);
}

#[test]
fn export_to_file_and_reparse() {
    let report = MeasurementReport::compute(
        subject(),
        &front_view(),
        &side_view(),
        None,
        &EngineConfig::default(),
    )
    .unwrap();

    let path = std::env::temp_dir().join("body_tape_pipeline_export.csv");
    export::export_csv(&report, "cm", &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(text, export::render_csv(&report, "cm"));
    assert!(export::parse_csv(&text).is_ok());
}
