//! Provenance and schema descriptors attached to synthesized spectra.

use serde::{Deserialize, Serialize};

/// Semantic version describing the schema of serialized payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}

/// Provenance information attached to every synthesized spectrum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SpectrumProvenance {
    /// Schema of the serialized result.
    pub schema_version: SchemaVersion,
    /// Hash of the canonical JSON form of the input configuration.
    pub config_hash: String,
    /// Seed of the generator used for the shot-noise draws.
    pub seed: u64,
    /// Whether shot noise was applied.
    pub noise: bool,
    /// Version of the crate that produced the data.
    pub tool_version: String,
}
