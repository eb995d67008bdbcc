//! Serde-configurable parameters for a single spectrum synthesis.
//!
//! Every struct carries defaults matching a typical room-temperature NV
//! ensemble measurement so that a YAML file only needs to list the fields it
//! overrides.

use odmr_core::constants::{
    GYROMAGNETIC_RATIO_HZ_PER_T, HYPERFINE_SPLITTING_HZ, ZERO_FIELD_SPLITTING_HZ,
};
use odmr_core::errors::{ErrorInfo, OdmrError};
use serde::{Deserialize, Serialize};

fn config_error(code: &str, message: impl Into<String>) -> ErrorInfo {
    ErrorInfo::new(code, message)
}

fn ensure_finite(field: &str, value: f64) -> Result<(), OdmrError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(OdmrError::InvalidConfig(
            config_error("non-finite-parameter", format!("{field} must be finite"))
                .with_context("field", field)
                .with_context("value", value),
        ))
    }
}

fn default_f_start() -> f64 {
    2.60e9
}

fn default_f_end() -> f64 {
    3.00e9
}

fn default_steps() -> usize {
    400
}

/// Microwave frequency sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// First frequency of the sweep in Hz.
    #[serde(default = "default_f_start")]
    pub f_start: f64,
    /// Last frequency of the sweep in Hz (inclusive).
    #[serde(default = "default_f_end")]
    pub f_end: f64,
    /// Number of frequency points, at least two.
    #[serde(default = "default_steps")]
    pub steps: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            f_start: default_f_start(),
            f_end: default_f_end(),
            steps: default_steps(),
        }
    }
}

impl SweepConfig {
    /// Creates a sweep from its bounds and point count.
    pub fn new(f_start: f64, f_end: f64, steps: usize) -> Self {
        Self {
            f_start,
            f_end,
            steps,
        }
    }

    /// Spacing between neighbouring points, `(f_end - f_start) / (steps - 1)`.
    pub fn step(&self) -> f64 {
        (self.f_end - self.f_start) / (self.steps.saturating_sub(1).max(1)) as f64
    }

    /// Rejects sweeps with fewer than two points or a non-increasing range.
    ///
    /// The step must also stay a few ulps above the float spacing at the
    /// bounds so neighbouring points remain distinct.
    pub fn validate(&self) -> Result<(), OdmrError> {
        if self.steps < 2 {
            return Err(OdmrError::InvalidConfig(
                config_error("sweep-too-few-points", "a sweep needs at least two points")
                    .with_context("steps", self.steps),
            ));
        }
        ensure_finite("sweep.f_start", self.f_start)?;
        ensure_finite("sweep.f_end", self.f_end)?;
        if self.f_end <= self.f_start {
            return Err(OdmrError::InvalidConfig(
                config_error(
                    "sweep-non-increasing",
                    "end frequency must be greater than start frequency",
                )
                .with_context("f_start", self.f_start)
                .with_context("f_end", self.f_end),
            ));
        }
        let step = self.step();
        let resolution = unit_in_last_place(self.f_start.abs().max(self.f_end.abs()));
        if step < MIN_STEP_ULPS * resolution {
            return Err(OdmrError::InvalidConfig(
                config_error(
                    "sweep-unresolvable-step",
                    "sweep step is below the floating-point resolution of the range",
                )
                .with_context("step", step)
                .with_context("resolution", resolution)
                .with_hint("use fewer points or a wider range"),
            ));
        }
        Ok(())
    }
}

/// Smallest step, in ulps of the largest bound, that keeps the grid strictly increasing.
const MIN_STEP_ULPS: f64 = 4.0;

fn unit_in_last_place(value: f64) -> f64 {
    f64::from_bits(value.to_bits() + 1) - value
}

fn default_zero_field_splitting() -> f64 {
    ZERO_FIELD_SPLITTING_HZ
}

fn default_gyromagnetic_ratio() -> f64 {
    GYROMAGNETIC_RATIO_HZ_PER_T
}

fn default_hyperfine_splitting() -> f64 {
    HYPERFINE_SPLITTING_HZ
}

fn default_true() -> bool {
    true
}

/// Spin Hamiltonian and bias-field parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalParams {
    /// Zero-field splitting D in Hz.
    #[serde(default = "default_zero_field_splitting")]
    pub zero_field_splitting: f64,
    /// Electron gyromagnetic ratio γe in Hz/T.
    #[serde(default = "default_gyromagnetic_ratio")]
    pub gyromagnetic_ratio: f64,
    /// Bias field magnitude in tesla.
    #[serde(default)]
    pub field_tesla: f64,
    /// Angle between the field and the NV axis in degrees.
    #[serde(default)]
    pub angle_degrees: f64,
    /// ¹⁴N hyperfine splitting A∥ in Hz.
    #[serde(default = "default_hyperfine_splitting")]
    pub hyperfine_splitting: f64,
    /// Render each transition as a hyperfine triplet.
    #[serde(default = "default_true")]
    pub hyperfine: bool,
}

impl Default for PhysicalParams {
    fn default() -> Self {
        Self {
            zero_field_splitting: default_zero_field_splitting(),
            gyromagnetic_ratio: default_gyromagnetic_ratio(),
            field_tesla: 0.0,
            angle_degrees: 0.0,
            hyperfine_splitting: default_hyperfine_splitting(),
            hyperfine: true,
        }
    }
}

impl PhysicalParams {
    /// Projection of the bias field on the NV axis, `B·cos θ`, in tesla.
    pub fn axial_field(&self) -> f64 {
        self.field_tesla * self.angle_degrees.to_radians().cos()
    }

    /// Rejects non-finite inputs and a degenerate hyperfine triplet.
    pub fn validate(&self) -> Result<(), OdmrError> {
        ensure_finite("physics.zero_field_splitting", self.zero_field_splitting)?;
        ensure_finite("physics.gyromagnetic_ratio", self.gyromagnetic_ratio)?;
        ensure_finite("physics.field_tesla", self.field_tesla)?;
        ensure_finite("physics.angle_degrees", self.angle_degrees)?;
        ensure_finite("physics.hyperfine_splitting", self.hyperfine_splitting)?;
        if self.hyperfine && self.hyperfine_splitting <= 0.0 {
            return Err(OdmrError::InvalidConfig(
                config_error(
                    "degenerate-hyperfine",
                    "hyperfine splitting must be positive when hyperfine lines are enabled",
                )
                .with_context("hyperfine_splitting", self.hyperfine_splitting)
                .with_hint("disable hyperfine to render single Lorentzian dips"),
            ));
        }
        Ok(())
    }
}

fn default_fwhm0() -> f64 {
    8e6
}

fn default_saturation() -> f64 {
    1.0
}

fn default_max_contrast() -> f64 {
    0.04
}

/// Power-broadened line-shape parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineShapeParams {
    /// Low-power FWHM in Hz.
    #[serde(default = "default_fwhm0")]
    pub fwhm0: f64,
    /// Saturation parameter s (dimensionless, ≥ 0).
    #[serde(default = "default_saturation")]
    pub saturation: f64,
    /// Contrast reached in the high-power limit.
    #[serde(default = "default_max_contrast")]
    pub max_contrast: f64,
}

impl Default for LineShapeParams {
    fn default() -> Self {
        Self {
            fwhm0: default_fwhm0(),
            saturation: default_saturation(),
            max_contrast: default_max_contrast(),
        }
    }
}

impl LineShapeParams {
    /// Power-broadened FWHM, `fwhm0·√(1+s)`.
    pub fn effective_fwhm(&self) -> f64 {
        self.fwhm0 * (1.0 + self.saturation).sqrt()
    }

    /// On-resonance contrast, `C_max·s/(1+s)`.
    pub fn contrast_on(&self) -> f64 {
        self.max_contrast * (self.saturation / (1.0 + self.saturation))
    }

    /// Rejects non-positive linewidths, negative saturation and an
    /// out-of-range maximum contrast.
    pub fn validate(&self) -> Result<(), OdmrError> {
        ensure_finite("line_shape.fwhm0", self.fwhm0)?;
        ensure_finite("line_shape.saturation", self.saturation)?;
        ensure_finite("line_shape.max_contrast", self.max_contrast)?;
        if self.fwhm0 <= 0.0 {
            return Err(OdmrError::InvalidConfig(
                config_error("non-positive-fwhm", "linewidth must be positive")
                    .with_context("fwhm0", self.fwhm0),
            ));
        }
        if self.saturation < 0.0 {
            return Err(OdmrError::InvalidConfig(
                config_error("negative-saturation", "saturation parameter must be >= 0")
                    .with_context("saturation", self.saturation),
            ));
        }
        if self.max_contrast <= 0.0 || self.max_contrast > 1.0 {
            return Err(OdmrError::InvalidConfig(
                config_error("contrast-out-of-range", "max contrast must lie in (0, 1]")
                    .with_context("max_contrast", self.max_contrast),
            ));
        }
        Ok(())
    }
}

fn default_counts_per_second() -> f64 {
    200_000.0
}

fn default_read_time() -> f64 {
    2e-5
}

fn default_frames() -> u64 {
    10_000
}

fn default_averages() -> u64 {
    1
}

/// Photon-counting acquisition settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionParams {
    /// MW-off count rate of the setup in counts per second.
    #[serde(default = "default_counts_per_second")]
    pub counts_per_second: f64,
    /// Read gate duration in seconds.
    #[serde(default = "default_read_time")]
    pub read_time: f64,
    /// Repeats per frequency point.
    #[serde(default = "default_frames")]
    pub frames: u64,
    /// Outer averages of the whole sweep.
    #[serde(default = "default_averages")]
    pub averages: u64,
    /// Linear baseline tilt per GHz, centred on the sweep.
    #[serde(default)]
    pub baseline_slope: f64,
    /// Apply Poisson shot noise.
    #[serde(default = "default_true")]
    pub noise: bool,
    /// Seed for the shot-noise generator.
    #[serde(default)]
    pub seed: u64,
}

impl Default for AcquisitionParams {
    fn default() -> Self {
        Self {
            counts_per_second: default_counts_per_second(),
            read_time: default_read_time(),
            frames: default_frames(),
            averages: default_averages(),
            baseline_slope: 0.0,
            noise: true,
            seed: 0,
        }
    }
}

impl AcquisitionParams {
    /// Total photon budget per point, `cps · read_time · frames · averages`.
    pub fn photon_budget(&self) -> f64 {
        self.counts_per_second * self.read_time * self.frames as f64 * self.averages as f64
    }

    /// Rejects a non-positive photon budget.
    pub fn validate(&self) -> Result<(), OdmrError> {
        ensure_finite("acquisition.counts_per_second", self.counts_per_second)?;
        ensure_finite("acquisition.read_time", self.read_time)?;
        ensure_finite("acquisition.baseline_slope", self.baseline_slope)?;
        let budget = self.photon_budget();
        if !budget.is_finite() || budget <= 0.0 {
            return Err(OdmrError::InvalidConfig(
                config_error("non-positive-photon-budget", "photon budget must be positive")
                    .with_context("counts_per_second", self.counts_per_second)
                    .with_context("read_time", self.read_time)
                    .with_context("frames", self.frames)
                    .with_context("averages", self.averages),
            ));
        }
        Ok(())
    }
}

/// Complete input for one synthesis call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct SimulationConfig {
    /// Frequency sweep.
    #[serde(default)]
    pub sweep: SweepConfig,
    /// Spin and field parameters.
    #[serde(default)]
    pub physics: PhysicalParams,
    /// Line-shape and saturation parameters.
    #[serde(default)]
    pub line_shape: LineShapeParams,
    /// Acquisition and noise settings.
    #[serde(default)]
    pub acquisition: AcquisitionParams,
}

impl SimulationConfig {
    /// Runs every eager validation check, in pipeline order.
    pub fn validate(&self) -> Result<(), OdmrError> {
        self.sweep.validate()?;
        self.physics.validate()?;
        self.line_shape.validate()?;
        self.acquisition.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_measurement() {
        let config = SimulationConfig::default();
        assert_eq!(config.sweep.steps, 400);
        assert!((config.acquisition.photon_budget() - 40_000.0).abs() < 1e-6);
        assert!((config.line_shape.contrast_on() - 0.02).abs() < 1e-15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn axial_field_projects_on_nv_axis() {
        let physics = PhysicalParams {
            field_tesla: 2e-3,
            angle_degrees: 60.0,
            ..PhysicalParams::default()
        };
        assert!((physics.axial_field() - 1e-3).abs() < 1e-12);
    }

    #[test]
    fn zero_averages_is_rejected() {
        let acquisition = AcquisitionParams {
            averages: 0,
            ..AcquisitionParams::default()
        };
        let err = acquisition.validate().unwrap_err();
        assert_eq!(err.info().code, "non-positive-photon-budget");
    }
}
