//! Domain Services
//!
//! Pure business logic over domain entities. I/O only happens through the
//! ports handed in by the caller.

mod config_resolver;
pub mod output_normalizer;
pub mod progress;
pub mod progress_estimator;
mod template_renderer;

pub use config_resolver::{
    resolve_postgres_propagation, BucketResolution, BucketSource, ConfigResolver,
    ResolutionReport, MAX_BUCKET_NAME_ATTEMPTS,
};
pub use output_normalizer::{
    classify, normalize, normalize_json, parse_outputs, postgres_info, MatchStrength,
    OutputRecord, ServiceSlot,
};
pub use progress::{percent_complete, StageMessages};
pub use template_renderer::{RenderedArtifacts, TemplateRenderer, ARTIFACTS};
