//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod bucket_name;
mod cloud;
mod estimate;
mod fingerprint;
mod lifecycle;

pub use bucket_name::{generate_bucket_name, normalize_bucket_name, ANIMAL_NAMES, FALLBACK_WORDS};
pub use cloud::{Cloud, REQUIRED_GCP_APIS};
pub use estimate::{EstimateBasis, TimeEstimate};
pub use fingerprint::Fingerprint;
pub use lifecycle::{LifecycleStep, Operation};
