//! Transition centres and saturation.

use serde::{Deserialize, Serialize};

use crate::config::{LineShapeParams, PhysicalParams};

/// Zeeman-split ms = 0 → ∓1 transition frequencies in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResonanceCenters {
    /// Lower transition, `D − γe·B∥`.
    pub f_minus: f64,
    /// Upper transition, `D + γe·B∥`.
    pub f_plus: f64,
}

impl ResonanceCenters {
    /// Separation between the transitions, `2·γe·|B∥|`.
    pub fn splitting(&self) -> f64 {
        (self.f_plus - self.f_minus).abs()
    }

    /// Both centres as `[f_minus, f_plus]`.
    pub fn as_array(&self) -> [f64; 2] {
        [self.f_minus, self.f_plus]
    }
}

/// Effective line parameters at the configured microwave power.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaturatedLine {
    /// Power-broadened FWHM in Hz.
    pub fwhm: f64,
    /// On-resonance fractional contrast.
    pub contrast_on: f64,
}

/// Computes the transition centres for the configured field and angle.
pub fn transition_centers(physics: &PhysicalParams) -> ResonanceCenters {
    let shift = physics.gyromagnetic_ratio * physics.axial_field();
    ResonanceCenters {
        f_minus: physics.zero_field_splitting - shift,
        f_plus: physics.zero_field_splitting + shift,
    }
}

/// Applies power broadening and contrast saturation.
pub fn saturated_line(line_shape: &LineShapeParams) -> SaturatedLine {
    SaturatedLine {
        fwhm: line_shape.effective_fwhm(),
        contrast_on: line_shape.contrast_on(),
    }
}

/// Every line position a plot overlays: the two centres, or with hyperfine
/// structure `fc − A, fc, fc + A` for each centre.
pub fn resonance_lines(centers: &ResonanceCenters, physics: &PhysicalParams) -> Vec<f64> {
    let mut lines = Vec::with_capacity(6);
    for fc in centers.as_array() {
        if physics.hyperfine {
            for k in [-1.0, 0.0, 1.0] {
                lines.push(fc + k * physics.hyperfine_splitting);
            }
        } else {
            lines.push(fc);
        }
    }
    lines
}
