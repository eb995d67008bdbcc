use odmr_spec::{
    dip_profile, lorentzian, simulate, transition_centers, triplet, Readout, SimulationConfig,
    SweepConfig,
};

fn scenario_a() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.sweep = SweepConfig::new(2.60e9, 3.00e9, 400);
    config.physics.zero_field_splitting = 2.870e9;
    config.physics.gyromagnetic_ratio = 28.0e9;
    config.physics.field_tesla = 0.0;
    config.physics.hyperfine = false;
    config.line_shape.fwhm0 = 8.0e6;
    config.line_shape.saturation = 1.0;
    config.line_shape.max_contrast = 0.04;
    config.acquisition.noise = false;
    config
}

fn scenario_b() -> SimulationConfig {
    let mut config = scenario_a();
    config.physics.hyperfine = true;
    config.physics.hyperfine_splitting = 2.16e6;
    config
}

#[test]
fn scenario_a_single_coincident_dip() {
    let config = scenario_a();
    let result = simulate(&config).expect("simulate");
    assert_eq!(result.len(), 400);
    assert_eq!(result.centers.f_minus, 2.870e9);
    assert_eq!(result.centers.f_plus, 2.870e9);
    assert!((result.contrast_on - 0.02).abs() < 1e-12);
    assert_eq!(result.resonance_lines.len(), 2);

    // Coincident transitions add: the peak approaches 2·C_on.
    let peak = result.peak_referenced_contrast();
    assert!(peak > 0.0395 && peak <= 0.04 + 1e-12, "peak {peak}");
    let nearest = lorentzian(&result.frequencies, 2.870e9, result.fwhm, 1.0)
        .unwrap()
        .into_iter()
        .fold(0.0, f64::max);
    assert!((peak - 2.0 * result.contrast_on * nearest).abs() < 1e-12);
}

#[test]
fn frequencies_convert_to_ghz() {
    let result = simulate(&scenario_a()).expect("simulate");
    let ghz = result.frequencies_ghz();
    assert_eq!(ghz.len(), result.len());
    assert!((ghz[0] - 2.60).abs() < 1e-12);
    assert!((ghz[399] - 3.00).abs() < 1e-12);
    for (hz, ghz) in result.frequencies.iter().zip(&ghz) {
        assert!((hz / 1.0e9 - ghz).abs() < 1e-12);
    }
}

#[test]
fn noiseless_referenced_equals_scaled_dips() {
    let config = scenario_a();
    let result = simulate(&config).unwrap();
    let centers = transition_centers(&config.physics);
    let dips = dip_profile(&result.frequencies, &centers, result.fwhm, None).unwrap();
    for (r, d) in result.referenced.iter().zip(&dips) {
        assert!((r - result.contrast_on * d).abs() < 1e-12);
    }
}

#[test]
fn on_never_exceeds_off() {
    for mut config in [scenario_a(), scenario_b()] {
        config.physics.field_tesla = 1.5e-3;
        config.acquisition.baseline_slope = 0.3;
        let result = simulate(&config).unwrap();
        for (on, off) in result.intensity_on.iter().zip(&result.intensity_off) {
            assert!(on <= off);
        }
    }
}

#[test]
fn scenario_b_hyperfine_triplets() {
    let config = scenario_b();
    let result = simulate(&config).expect("simulate");
    assert_eq!(result.resonance_lines.len(), 6);
    for line in &result.resonance_lines {
        assert!((line - 2.870e9).abs() <= 2.16e6 + 1e-3);
    }

    let readout = Readout::from_result(&result, &config.sweep);
    assert!((readout.points_per_fwhm - 11.285).abs() < 0.01);
    assert!(readout.resolved);

    let peak = result.peak_referenced_contrast();
    assert!(peak > 0.039 && peak <= 0.04 + 1e-12, "peak {peak}");

    let single = triplet(&result.frequencies, 2.870e9, 2.16e6, result.fwhm).unwrap();
    for (r, t) in result.referenced.iter().zip(&single) {
        assert!((r - 2.0 * result.contrast_on * t).abs() < 1e-12);
    }
}

#[test]
fn hyperfine_broadens_the_dip() {
    let plain = simulate(&scenario_a()).unwrap();
    let split = simulate(&scenario_b()).unwrap();
    let above_half = |values: &[f64]| {
        let peak = values.iter().copied().fold(0.0, f64::max);
        values.iter().filter(|&&v| v >= 0.5 * peak).count()
    };
    assert!(above_half(&split.referenced) > above_half(&plain.referenced));
}

#[test]
fn floor_binds_at_saturated_centres() {
    let mut config = scenario_a();
    config.line_shape.max_contrast = 1.0;
    config.line_shape.saturation = 1.0e3;
    let result = simulate(&config).unwrap();
    let min_ratio = result
        .intensity_on
        .iter()
        .zip(&result.intensity_off)
        .map(|(on, off)| on / off)
        .fold(f64::INFINITY, f64::min);
    assert!((min_ratio - 0.02).abs() < 1e-12);
}

#[test]
fn readout_formats_report_lines() {
    let config = scenario_a();
    let result = simulate(&config).unwrap();
    let text = Readout::from_result(&result, &config.sweep).to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Transition freqs: 2.870000 GHz and 2.870000 GHz");
    assert_eq!(lines[1], "FWHM used: 11.31 MHz;  C_on=0.020");
    assert_eq!(lines[2], "Points per FWHM: 11.3 (aim >= 8)");
    assert!(lines[3].starts_with("Peak referenced contrast (approx): 0.039"));
}
