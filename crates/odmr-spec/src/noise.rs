//! Poisson shot noise and the referenced contrast trace.

use odmr_core::errors::{ErrorInfo, OdmrError};
use odmr_core::rng::RngHandle;
use rand_distr::{Distribution, Poisson};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::synth::IdealTraces;

/// Photon counts after the optional shot-noise stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoisyTraces {
    /// MW-ON counts.
    pub on: Vec<f64>,
    /// MW-OFF counts.
    pub off: Vec<f64>,
}

fn sample_counts(means: &[f64], rng: &mut RngHandle, trace: &str) -> Result<Vec<f64>, OdmrError> {
    let mut counts = Vec::with_capacity(means.len());
    for (idx, &mean) in means.iter().enumerate() {
        if mean == 0.0 {
            counts.push(0.0);
            continue;
        }
        let poisson = Poisson::new(mean).map_err(|err| {
            OdmrError::NumericDegenerate(
                ErrorInfo::new("invalid-poisson-mean", err.to_string())
                    .with_context("trace", trace)
                    .with_context("index", idx)
                    .with_context("mean", mean)
                    .with_hint("keep the baseline tilt small enough that baseline(f) > 0"),
            )
        })?;
        counts.push(poisson.sample(rng));
    }
    Ok(counts)
}

/// Draws one Poisson sample per point and trace, OFF first then ON, from the
/// same generator.
pub fn apply_shot_noise(
    ideal: &IdealTraces,
    rng: &mut RngHandle,
) -> Result<NoisyTraces, OdmrError> {
    let off = sample_counts(&ideal.off, rng, "off")?;
    let on = sample_counts(&ideal.on, rng, "on")?;
    debug!(points = off.len(), seed = rng.seed(), "applied shot noise");
    Ok(NoisyTraces { on, off })
}

/// Passes the ideal traces through unchanged.
pub fn without_noise(ideal: &IdealTraces) -> NoisyTraces {
    NoisyTraces {
        on: ideal.on.clone(),
        off: ideal.off.clone(),
    }
}

/// Referenced contrast `(OFF − ON) / OFF`.
///
/// Noisy counts divide by `max(OFF, 1)`. Noiseless traces divide by the raw
/// OFF value and fail with [`OdmrError::NumericDegenerate`] when an OFF value
/// is not positive or a ratio is not finite.
pub fn referenced_contrast(on: &[f64], off: &[f64], noisy: bool) -> Result<Vec<f64>, OdmrError> {
    if on.len() != off.len() {
        return Err(OdmrError::InvalidConfig(
            ErrorInfo::new("trace-length-mismatch", "ON and OFF traces differ in length")
                .with_context("on", on.len())
                .with_context("off", off.len()),
        ));
    }
    let mut referenced = Vec::with_capacity(on.len());
    for (idx, (&on_value, &off_value)) in on.iter().zip(off).enumerate() {
        let denominator = if noisy {
            off_value.max(1.0)
        } else {
            if off_value <= 0.0 || off_value.is_nan() {
                return Err(OdmrError::NumericDegenerate(
                    ErrorInfo::new("non-positive-off", "noiseless OFF intensity must be positive")
                        .with_context("index", idx)
                        .with_context("off", off_value)
                        .with_hint("reduce baseline_slope so the baseline stays above zero"),
                ));
            }
            off_value
        };
        let value = (off_value - on_value) / denominator;
        if !value.is_finite() {
            return Err(OdmrError::NumericDegenerate(
                ErrorInfo::new("non-finite-contrast", "referenced contrast is not finite")
                    .with_context("index", idx)
                    .with_context("on", on_value)
                    .with_context("off", off_value),
            ));
        }
        referenced.push(value);
    }
    Ok(referenced)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noisy_reference_clamps_zero_off() {
        let values = referenced_contrast(&[3.0], &[0.0], true).unwrap();
        assert_eq!(values, vec![-3.0]);
    }

    #[test]
    fn zero_mean_draws_zero_counts() {
        let ideal = IdealTraces {
            on: vec![0.0],
            off: vec![0.0],
        };
        let noisy = apply_shot_noise(&ideal, &mut RngHandle::from_seed(1)).unwrap();
        assert_eq!(noisy.off, vec![0.0]);
    }
}
