//! Ideal ON/OFF intensity synthesis.

use odmr_core::constants::HZ_PER_GHZ;
use odmr_core::errors::OdmrError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::axis::axis_mean;
use crate::lineshape::{lorentzian, triplet};
use crate::resonance::{ResonanceCenters, SaturatedLine};

/// Minimum fraction of the OFF intensity the ON trace may drop to; models
/// residual fluorescence at saturated dip centres.
pub const RESIDUAL_FLUORESCENCE_FLOOR: f64 = 0.02;

/// Noiseless MW-ON and MW-OFF count expectations per frequency point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdealTraces {
    /// Expected counts with microwaves applied.
    pub on: Vec<f64>,
    /// Expected counts without microwaves.
    pub off: Vec<f64>,
}

/// Sum of both transitions' line shapes, unit height per line.
///
/// Coincident centres (B∥ = 0) add, so the composite dip is twice as deep.
pub fn dip_profile(
    frequencies: &[f64],
    centers: &ResonanceCenters,
    fwhm: f64,
    hyperfine_spacing: Option<f64>,
) -> Result<Vec<f64>, OdmrError> {
    let (lower, upper) = match hyperfine_spacing {
        Some(spacing) => (
            triplet(frequencies, centers.f_minus, spacing, fwhm)?,
            triplet(frequencies, centers.f_plus, spacing, fwhm)?,
        ),
        None => (
            lorentzian(frequencies, centers.f_minus, fwhm, 1.0)?,
            lorentzian(frequencies, centers.f_plus, fwhm, 1.0)?,
        ),
    };
    Ok(lower.into_iter().zip(upper).map(|(a, b)| a + b).collect())
}

/// Relative baseline `1 + slope·(f − mean f)/1 GHz`.
pub fn baseline(frequencies: &[f64], slope: f64) -> Vec<f64> {
    let mean = axis_mean(frequencies);
    frequencies
        .iter()
        .map(|f| 1.0 + slope * ((f - mean) / HZ_PER_GHZ))
        .collect()
}

/// Scales the dip profile and baseline by the photon budget.
///
/// `ON = I0·baseline·max(1 − C_on·dips, floor)` and `OFF = I0·baseline`.
pub fn ideal_intensities(
    frequencies: &[f64],
    centers: &ResonanceCenters,
    line: &SaturatedLine,
    hyperfine_spacing: Option<f64>,
    baseline_slope: f64,
    photon_budget: f64,
) -> Result<IdealTraces, OdmrError> {
    let dips = dip_profile(frequencies, centers, line.fwhm, hyperfine_spacing)?;
    let base = baseline(frequencies, baseline_slope);
    let mut on = Vec::with_capacity(frequencies.len());
    let mut off = Vec::with_capacity(frequencies.len());
    for (dip, level) in dips.iter().zip(&base) {
        let reference = photon_budget * level;
        off.push(reference);
        on.push(reference * (1.0 - line.contrast_on * dip).max(RESIDUAL_FLUORESCENCE_FLOOR));
    }
    debug!(
        points = frequencies.len(),
        photon_budget,
        contrast_on = line.contrast_on,
        "built ideal intensity traces"
    );
    Ok(IdealTraces { on, off })
}
