use crate::domain::model::{AccessControl, Avu};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Write access to the metadata store holding experiment results
/// (iRODS in production, an in-memory map in tests).
#[async_trait]
pub trait AnnotationStore: Send + Sync {
    async fn add_metadata(&self, collection: &Path, avus: &[Avu]) -> Result<()>;

    async fn add_permissions(
        &self,
        collection: &Path,
        acl: &[AccessControl],
        recurse: bool,
    ) -> Result<()>;
}

/// A liveness check against one backing service.
#[async_trait]
pub trait ReadinessProbe: Send + Sync {
    fn name(&self) -> &str;

    async fn check(&self) -> Result<()>;
}
