//! Physical constants for the NV⁻ ground-state spin system.

/// Zero-field splitting D of the NV ground state (Hz).
pub const ZERO_FIELD_SPLITTING_HZ: f64 = 2.870e9;

/// Electron gyromagnetic ratio γe (Hz/T).
pub const GYROMAGNETIC_RATIO_HZ_PER_T: f64 = 28.0e9;

/// ¹⁴N axial hyperfine splitting A∥ (Hz).
pub const HYPERFINE_SPLITTING_HZ: f64 = 2.16e6;

/// Hertz per gigahertz, used for baseline tilt and axis labelling.
pub const HZ_PER_GHZ: f64 = 1e9;

/// Hertz per megahertz.
pub const HZ_PER_MHZ: f64 = 1e6;
