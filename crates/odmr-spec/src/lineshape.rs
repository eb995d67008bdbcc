//! Lorentzian line shapes and ¹⁴N hyperfine triplets.

use odmr_core::errors::{ErrorInfo, OdmrError};

fn ensure_linewidth(fwhm: f64) -> Result<(), OdmrError> {
    if fwhm.is_finite() && fwhm > 0.0 {
        Ok(())
    } else {
        Err(OdmrError::InvalidConfig(
            ErrorInfo::new("non-positive-fwhm", "linewidth must be positive and finite")
                .with_context("fwhm", fwhm),
        ))
    }
}

/// Scalar Lorentzian, `amplitude·hwhm²/(hwhm² + (f − f0)²)`.
///
/// Callers are expected to have validated `fwhm > 0`.
#[inline]
pub fn lorentzian_at(f: f64, f0: f64, fwhm: f64, amplitude: f64) -> f64 {
    let hwhm = 0.5 * fwhm;
    let hwhm_sq = hwhm * hwhm;
    let detuning = f - f0;
    amplitude * hwhm_sq / (hwhm_sq + detuning * detuning)
}

/// Evaluates a Lorentzian of the given FWHM over the frequency grid.
pub fn lorentzian(
    frequencies: &[f64],
    f0: f64,
    fwhm: f64,
    amplitude: f64,
) -> Result<Vec<f64>, OdmrError> {
    ensure_linewidth(fwhm)?;
    Ok(frequencies
        .iter()
        .map(|&f| lorentzian_at(f, f0, fwhm, amplitude))
        .collect())
}

/// Normalization of a triplet: `L(0) + 2·L(A)` of one unit Lorentzian.
///
/// The divisor is the composite height sampled at the centre line, so the
/// triplet reaches 1 at `center` and the side lines sit lower, at
/// `(1 + L(A) + L(2A)) / norm`. A grid that misses `center` peaks below 1.
/// This convention fixes the contrast calibration and must not be replaced by
/// a search for the composite maximum.
pub fn triplet_norm(spacing: f64, fwhm: f64) -> f64 {
    lorentzian_at(0.0, 0.0, fwhm, 1.0) + 2.0 * lorentzian_at(spacing, 0.0, fwhm, 1.0)
}

/// Hyperfine triplet centred on `center`, lines at `center − A`, `center`,
/// `center + A`, divided by [`triplet_norm`].
pub fn triplet(
    frequencies: &[f64],
    center: f64,
    spacing: f64,
    fwhm: f64,
) -> Result<Vec<f64>, OdmrError> {
    ensure_linewidth(fwhm)?;
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(OdmrError::InvalidConfig(
            ErrorInfo::new(
                "degenerate-hyperfine",
                "hyperfine spacing must be positive for a triplet",
            )
            .with_context("spacing", spacing),
        ));
    }
    let norm = triplet_norm(spacing, fwhm);
    Ok(frequencies
        .iter()
        .map(|&f| {
            (lorentzian_at(f, center - spacing, fwhm, 1.0)
                + lorentzian_at(f, center, fwhm, 1.0)
                + lorentzian_at(f, center + spacing, fwhm, 1.0))
                / norm
        })
        .collect())
}
