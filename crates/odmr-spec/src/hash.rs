//! SHA-256 digests of canonical JSON, used for config and result provenance.

use odmr_core::errors::OdmrError;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::serde::to_canonical_json_bytes;

/// SHA-256 of the canonical JSON encoding.
///
/// Feeds `SpectrumProvenance::config_hash`, the sweep plan hash and per-job
/// result hashes.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, OdmrError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(&bytes);
    Ok(format!("{:x}", digest))
}
