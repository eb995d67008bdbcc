use odmr_spec::{
    resonance_lines, saturated_line, transition_centers, LineShapeParams, PhysicalParams,
};

#[test]
fn zero_field_collapses_onto_d() {
    let physics = PhysicalParams {
        field_tesla: 0.0,
        ..PhysicalParams::default()
    };
    let centers = transition_centers(&physics);
    assert_eq!(centers.f_minus, 2.870e9);
    assert_eq!(centers.f_plus, 2.870e9);
    assert_eq!(centers.splitting(), 0.0);
}

#[test]
fn aligned_field_splits_by_twice_zeeman_shift() {
    let physics = PhysicalParams {
        field_tesla: 2.0e-3,
        angle_degrees: 0.0,
        ..PhysicalParams::default()
    };
    let centers = transition_centers(&physics);
    assert!((centers.f_minus - (2.870e9 - 56.0e6)).abs() < 1e-3);
    assert!((centers.f_plus - (2.870e9 + 56.0e6)).abs() < 1e-3);
    assert!((centers.splitting() - 112.0e6).abs() < 1e-3);
}

#[test]
fn perpendicular_field_has_no_axial_shift() {
    let physics = PhysicalParams {
        field_tesla: 3.0e-3,
        angle_degrees: 90.0,
        ..PhysicalParams::default()
    };
    let centers = transition_centers(&physics);
    assert!(centers.splitting() < 1e-3);
}

#[test]
fn saturation_is_monotonic() {
    let mut previous = saturated_line(&LineShapeParams {
        saturation: 0.0,
        ..LineShapeParams::default()
    });
    assert_eq!(previous.contrast_on, 0.0);
    assert_eq!(previous.fwhm, 8.0e6);
    for s in [0.1, 0.5, 1.0, 2.0, 10.0, 100.0, 1.0e4] {
        let params = LineShapeParams {
            saturation: s,
            ..LineShapeParams::default()
        };
        let line = saturated_line(&params);
        assert!(line.contrast_on > previous.contrast_on);
        assert!(line.fwhm > previous.fwhm);
        assert!(line.contrast_on < params.max_contrast);
        previous = line;
    }
}

#[test]
fn unit_saturation_matches_reference_values() {
    let line = saturated_line(&LineShapeParams::default());
    assert!((line.contrast_on - 0.02).abs() < 1e-15);
    assert!((line.fwhm - 8.0e6 * 2f64.sqrt()).abs() < 1e-6);
}

#[test]
fn marker_lines_follow_hyperfine_flag() {
    let mut physics = PhysicalParams {
        field_tesla: 1.0e-3,
        ..PhysicalParams::default()
    };
    let centers = transition_centers(&physics);
    let lines = resonance_lines(&centers, &physics);
    assert_eq!(lines.len(), 6);
    assert!((lines[0] - (centers.f_minus - 2.16e6)).abs() < 1e-3);
    assert_eq!(lines[1], centers.f_minus);
    assert!((lines[5] - (centers.f_plus + 2.16e6)).abs() < 1e-3);

    physics.hyperfine = false;
    assert_eq!(
        resonance_lines(&centers, &physics),
        vec![centers.f_minus, centers.f_plus]
    );
}
