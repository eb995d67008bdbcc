//! Pipeline entry points, results and readouts.

use std::fmt;

use odmr_core::constants::{HZ_PER_GHZ, HZ_PER_MHZ};
use odmr_core::errors::OdmrError;
use odmr_core::provenance::{SchemaVersion, SpectrumProvenance};
use odmr_core::rng::RngHandle;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::axis::{frequency_axis, to_ghz};
use crate::config::{SimulationConfig, SweepConfig};
use crate::hash::stable_hash_string;
use crate::noise::{apply_shot_noise, referenced_contrast, without_noise};
use crate::resonance::{resonance_lines, saturated_line, transition_centers, ResonanceCenters};
use crate::synth::ideal_intensities;

/// Points per FWHM below which the hyperfine lines are not resolved.
pub const MIN_POINTS_PER_FWHM: f64 = 8.0;

/// Synthesized spectrum and the scalars it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumResult {
    /// Sweep grid in Hz.
    pub frequencies: Vec<f64>,
    /// MW-ON counts per point.
    pub intensity_on: Vec<f64>,
    /// MW-OFF counts per point.
    pub intensity_off: Vec<f64>,
    /// Referenced contrast `(OFF − ON)/OFF` per point.
    pub referenced: Vec<f64>,
    /// Zeeman-split transition centres.
    pub centers: ResonanceCenters,
    /// Marker positions: two centres, or six hyperfine lines.
    pub resonance_lines: Vec<f64>,
    /// Power-broadened FWHM in Hz.
    pub fwhm: f64,
    /// On-resonance contrast.
    pub contrast_on: f64,
    /// Seed, config hash and schema of the run.
    pub provenance: SpectrumProvenance,
}

impl SpectrumResult {
    /// Sweep grid in GHz.
    pub fn frequencies_ghz(&self) -> Vec<f64> {
        to_ghz(&self.frequencies)
    }

    /// Largest referenced contrast value.
    pub fn peak_referenced_contrast(&self) -> f64 {
        self.referenced
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Number of frequency points.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// True when the result holds no points.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// Synthesizes a spectrum drawing shot noise from the supplied generator.
///
/// Validation runs before any array is built. With noise enabled the OFF and
/// ON draws both come from `rng`, so a cloned or reseeded handle reproduces
/// the result exactly.
pub fn synthesize(
    config: &SimulationConfig,
    rng: &mut RngHandle,
) -> Result<SpectrumResult, OdmrError> {
    config.validate()?;
    let config_hash = stable_hash_string(config)?;
    let seed = rng.seed();

    let frequencies = frequency_axis(&config.sweep)?;
    let centers = transition_centers(&config.physics);
    let line = saturated_line(&config.line_shape);
    let spacing = config
        .physics
        .hyperfine
        .then_some(config.physics.hyperfine_splitting);
    debug!(
        f_minus = centers.f_minus,
        f_plus = centers.f_plus,
        fwhm = line.fwhm,
        hyperfine = config.physics.hyperfine,
        "resolved resonance model"
    );

    let points_per_fwhm = line.fwhm / config.sweep.step();
    if points_per_fwhm < MIN_POINTS_PER_FWHM {
        warn!(
            points_per_fwhm,
            "sweep under-samples the line; increase steps to resolve it"
        );
    }

    let ideal = ideal_intensities(
        &frequencies,
        &centers,
        &line,
        spacing,
        config.acquisition.baseline_slope,
        config.acquisition.photon_budget(),
    )?;
    let noise = config.acquisition.noise;
    let traces = if noise {
        apply_shot_noise(&ideal, rng)?
    } else {
        without_noise(&ideal)
    };
    let referenced = referenced_contrast(&traces.on, &traces.off, noise)?;

    Ok(SpectrumResult {
        frequencies,
        intensity_on: traces.on,
        intensity_off: traces.off,
        referenced,
        resonance_lines: resonance_lines(&centers, &config.physics),
        centers,
        fwhm: line.fwhm,
        contrast_on: line.contrast_on,
        provenance: SpectrumProvenance {
            schema_version: SchemaVersion::default(),
            config_hash,
            seed,
            noise,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        },
    })
}

/// Synthesizes a spectrum with a generator seeded from `acquisition.seed`.
pub fn simulate(config: &SimulationConfig) -> Result<SpectrumResult, OdmrError> {
    let mut rng = RngHandle::from_seed(config.acquisition.seed);
    synthesize(config, &mut rng)
}

/// Scalar diagnostics reported after a synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readout {
    /// Lower transition in Hz.
    pub f_minus: f64,
    /// Upper transition in Hz.
    pub f_plus: f64,
    /// FWHM used in Hz.
    pub fwhm: f64,
    /// On-resonance contrast.
    pub contrast_on: f64,
    /// FWHM divided by the sweep step.
    pub points_per_fwhm: f64,
    /// Largest referenced contrast value.
    pub peak_referenced_contrast: f64,
    /// Whether the line is sampled at least [`MIN_POINTS_PER_FWHM`] times.
    pub resolved: bool,
}

impl Readout {
    /// Derives the diagnostics from a result and its sweep.
    pub fn from_result(result: &SpectrumResult, sweep: &SweepConfig) -> Self {
        let points_per_fwhm = result.fwhm / sweep.step();
        Self {
            f_minus: result.centers.f_minus,
            f_plus: result.centers.f_plus,
            fwhm: result.fwhm,
            contrast_on: result.contrast_on,
            points_per_fwhm,
            peak_referenced_contrast: result.peak_referenced_contrast(),
            resolved: points_per_fwhm >= MIN_POINTS_PER_FWHM,
        }
    }
}

impl fmt::Display for Readout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Transition freqs: {:.6} GHz and {:.6} GHz",
            self.f_minus / HZ_PER_GHZ,
            self.f_plus / HZ_PER_GHZ
        )?;
        writeln!(
            f,
            "FWHM used: {:.2} MHz;  C_on={:.3}",
            self.fwhm / HZ_PER_MHZ,
            self.contrast_on
        )?;
        writeln!(
            f,
            "Points per FWHM: {:.1} (aim >= {:.0})",
            self.points_per_fwhm, MIN_POINTS_PER_FWHM
        )?;
        write!(
            f,
            "Peak referenced contrast (approx): {:.4}",
            self.peak_referenced_contrast
        )
    }
}
