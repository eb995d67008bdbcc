#![deny(missing_docs)]
#![doc = "Deterministic ODMR spectrum synthesis for NV-centre ensembles."]

pub mod axis;
pub mod config;
pub mod hash;
pub mod lineshape;
pub mod noise;
pub mod report;
pub mod resonance;
pub mod serde;
pub mod sweep;
pub mod synth;

pub use axis::{frequency_axis, to_ghz};
pub use config::{
    AcquisitionParams, LineShapeParams, PhysicalParams, SimulationConfig, SweepConfig,
};
pub use hash::stable_hash_string;
pub use lineshape::{lorentzian, lorentzian_at, triplet, triplet_norm};
pub use noise::{apply_shot_noise, referenced_contrast, without_noise, NoisyTraces};
pub use report::{simulate, synthesize, Readout, SpectrumResult, MIN_POINTS_PER_FWHM};
pub use resonance::{
    resonance_lines, saturated_line, transition_centers, ResonanceCenters, SaturatedLine,
};
pub use crate::serde::{
    from_json_slice, from_yaml_slice, to_canonical_json_bytes, to_yaml_string,
};
pub use sweep::{run_sweep, SweepJobReport, SweepPlan, SweepReport};
pub use synth::{
    baseline, dip_profile, ideal_intensities, IdealTraces, RESIDUAL_FLUORESCENCE_FLOOR,
};
