//! Object-storage existence check

use thiserror::Error;

/// The storage service could not answer; never read as "absent"
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StorageError(pub String);

pub trait BucketRegistry {
    fn exists(&self, bucket: &str, project_id: &str) -> Result<bool, StorageError>;
}
