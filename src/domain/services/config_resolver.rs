//! Stack config resolution
//!
//! Mutates a parsed [`StackConfig`] before rendering:
//! - postgres backend propagation across every tool
//! - artifact bucket naming for GCP, checked against object storage

use rand::Rng;
use tracing::debug;

use crate::domain::entities::{param_keys, StackConfig};
use crate::domain::ports::BucketRegistry;
use crate::domain::value_objects::{generate_bucket_name, Cloud};
use crate::error::{DeploymlError, DeploymlResult};

/// Generated names tried before giving up
pub const MAX_BUCKET_NAME_ATTEMPTS: usize = 10;

/// Backend value that turns on the managed database everywhere
const POSTGRES_BACKEND: &str = "postgresql";

/// How the artifact bucket was settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketSource {
    /// Name was generated after `attempts` existence checks
    Generated { attempts: usize },
    /// Caller named a bucket that already exists
    Existing,
    /// Caller named a bucket that still has to be created
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketResolution {
    pub bucket: String,
    pub source: BucketSource,
    /// Whether the creation flag was written by the resolver
    pub flag_written: bool,
}

/// What `resolve` changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    pub postgres_propagated: bool,
    pub bucket: Option<BucketResolution>,
}

/// If any tool uses the postgres backend, every tool does.
///
/// Returns true when propagation happened.
pub fn resolve_postgres_propagation(config: &mut StackConfig) -> bool {
    let wants_postgres = config.stack.iter().any(|binding| {
        binding.param_str(param_keys::BACKEND_STORE_URI) == Some(POSTGRES_BACKEND)
    });
    if !wants_postgres {
        return false;
    }
    for binding in &mut config.stack {
        binding.set_param(param_keys::BACKEND_STORE_URI, POSTGRES_BACKEND);
    }
    debug!("propagated postgres backend to {} tools", config.stack.len());
    true
}

pub struct ConfigResolver<'a, R> {
    registry: &'a dyn BucketRegistry,
    rng: R,
    max_attempts: usize,
}

impl<'a, R: Rng> ConfigResolver<'a, R> {
    pub fn new(registry: &'a dyn BucketRegistry, rng: R) -> Self {
        Self {
            registry,
            rng,
            max_attempts: MAX_BUCKET_NAME_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Propagation first, so `use_postgres` sees the propagated backend
    pub fn resolve(&mut self, config: &mut StackConfig) -> DeploymlResult<ResolutionReport> {
        let postgres_propagated = resolve_postgres_propagation(config);
        let bucket = self.resolve_artifact_bucket(config)?;
        Ok(ResolutionReport {
            postgres_propagated,
            bucket,
        })
    }

    /// Settle `artifact_bucket` on the GCP mlflow artifact store.
    ///
    /// Returns `None` when no binding qualifies.
    pub fn resolve_artifact_bucket(
        &mut self,
        config: &mut StackConfig,
    ) -> DeploymlResult<Option<BucketResolution>> {
        if config.provider.cloud != Cloud::Gcp {
            return Ok(None);
        }
        let project_id = config.project_id().unwrap_or_default().to_string();

        let mut resolution = None;
        for index in 0..config.stack.len() {
            if !config.stack[index].is_artifact_store() {
                continue;
            }

            let (bucket, source) = match config.stack[index]
                .param_str(param_keys::ARTIFACT_BUCKET)
                .map(str::to_string)
            {
                None => {
                    let (bucket, attempts) = self.generate_free_name(&project_id)?;
                    (bucket, BucketSource::Generated { attempts })
                }
                Some(bucket) => {
                    let exists = self.check(&bucket, &project_id)?;
                    let source = if exists {
                        BucketSource::Existing
                    } else {
                        BucketSource::Missing
                    };
                    (bucket, source)
                }
            };

            let binding = &mut config.stack[index];
            binding.set_param(param_keys::ARTIFACT_BUCKET, bucket.as_str());

            let flag_written = !binding.has_param(param_keys::CREATE_BUCKET)
                && !binding.has_param(param_keys::CREATE_ARTIFACT_BUCKET);
            if flag_written {
                let create = source != BucketSource::Existing;
                binding.set_param(param_keys::CREATE_ARTIFACT_BUCKET, create);
            }

            let use_postgres = binding
                .param_str(param_keys::BACKEND_STORE_URI)
                .is_some_and(|uri| uri.starts_with(POSTGRES_BACKEND));
            binding.set_param(param_keys::USE_POSTGRES, use_postgres);

            debug!(bucket = %bucket, ?source, flag_written, "resolved artifact bucket");
            resolution = Some(BucketResolution {
                bucket,
                source,
                flag_written,
            });
        }
        Ok(resolution)
    }

    fn generate_free_name(&mut self, project_id: &str) -> DeploymlResult<(String, usize)> {
        for attempt in 1..=self.max_attempts {
            let candidate = generate_bucket_name(project_id, &mut self.rng);
            if !self.check(&candidate, project_id)? {
                return Ok((candidate, attempt));
            }
            debug!(candidate = %candidate, attempt, "bucket name taken");
        }
        Err(DeploymlError::NamingCollisionExhausted {
            attempts: self.max_attempts,
        })
    }

    fn check(&self, bucket: &str, project_id: &str) -> DeploymlResult<bool> {
        self.registry
            .exists(bucket, project_id)
            .map_err(|e| DeploymlError::StorageCheckFailed {
                bucket: bucket.to_string(),
                message: e.to_string(),
            })
    }
}
