pub mod config;
pub mod simulate;
pub mod sweep;
pub mod version;

use std::error::Error;
use std::fs;
use std::path::Path;

use odmr_spec::{from_json_slice, from_yaml_slice, SimulationConfig};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Reads a YAML or JSON document, picking the decoder from the extension.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let bytes = fs::read(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    debug!(path = %path.display(), is_json, "loading document");
    let value = if is_json {
        from_json_slice(&bytes)?
    } else {
        from_yaml_slice(&bytes)?
    };
    Ok(value)
}

/// Loads a simulation config or falls back to the defaults.
pub fn load_config(path: Option<&Path>) -> Result<SimulationConfig, Box<dyn Error>> {
    match path {
        Some(path) => load_document(path),
        None => Ok(SimulationConfig::default()),
    }
}
