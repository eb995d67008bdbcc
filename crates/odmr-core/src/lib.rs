#![deny(missing_docs)]
#![doc = "Core error, randomness and provenance types shared by the ODMR simulator crates."]

pub mod constants;
pub mod errors;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, OdmrError};
pub use provenance::{SchemaVersion, SpectrumProvenance};
pub use rng::{derive_substream_seed, RngHandle};
