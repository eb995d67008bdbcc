//! Sweep grid construction.

use odmr_core::errors::OdmrError;

use crate::config::SweepConfig;

/// Builds the evenly spaced, endpoint-inclusive frequency grid of a sweep.
///
/// The last sample is pinned to `f_end` so the grid closes exactly on the
/// requested bound regardless of accumulated rounding.
pub fn frequency_axis(sweep: &SweepConfig) -> Result<Vec<f64>, OdmrError> {
    sweep.validate()?;
    let last = sweep.steps - 1;
    let step = sweep.step();
    let mut axis = Vec::with_capacity(sweep.steps);
    for idx in 0..last {
        axis.push(sweep.f_start + idx as f64 * step);
    }
    axis.push(sweep.f_end);
    Ok(axis)
}

/// Converts a frequency grid in Hz to GHz for plotting collaborators.
pub fn to_ghz(frequencies: &[f64]) -> Vec<f64> {
    frequencies
        .iter()
        .map(|f| f / odmr_core::constants::HZ_PER_GHZ)
        .collect()
}

/// Arithmetic mean of the grid, the pivot of the baseline tilt.
pub fn axis_mean(frequencies: &[f64]) -> f64 {
    if frequencies.is_empty() {
        return 0.0;
    }
    frequencies.iter().sum::<f64>() / frequencies.len() as f64
}
