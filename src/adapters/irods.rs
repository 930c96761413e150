use crate::adapters::command;
use crate::domain::model::{AccessControl, Avu};
use crate::domain::ports::{AnnotationStore, ReadinessProbe};
use crate::utils::error::{Result, SyncError};
use async_trait::async_trait;
use std::path::Path;

// iRODS reports this when an identical AVU is already attached.
const ALREADY_HAS_ITEM: &str = "CATALOG_ALREADY_HAS_ITEM_BY_THAT_NAME";

/// Authenticates against the iRODS catalog, caching the credential for
/// subsequent icommands. The password travels on stdin, not the argv.
pub async fn iinit(password: &str) -> Result<()> {
    command::run_checked_with_stdin("iinit", &[], password).await?;
    Ok(())
}

/// Returns the client environment report (`ienv`).
pub async fn ienv() -> Result<String> {
    command::run_checked("ienv", &[]).await
}

/// Lists a collection; an empty path lists the home collection.
pub async fn ils(path: &str) -> Result<String> {
    if path.is_empty() {
        command::run_checked("ils", &[]).await
    } else {
        command::run_checked("ils", &[path]).await
    }
}

fn collection_str(collection: &Path) -> Result<&str> {
    collection.to_str().ok_or_else(|| SyncError::ConfigError {
        message: format!("Non-UTF8 collection path: {}", collection.display()),
    })
}

/// [`AnnotationStore`] backed by the icommands CLI suite.
#[derive(Debug, Clone, Default)]
pub struct IcommandsStore;

impl IcommandsStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AnnotationStore for IcommandsStore {
    async fn add_metadata(&self, collection: &Path, avus: &[Avu]) -> Result<()> {
        let coll = collection_str(collection)?;

        for avu in avus {
            let result = command::run_checked(
                "imeta",
                &["add", "-C", coll, avu.attribute.as_str(), avu.value.as_str()],
            )
            .await;

            match result {
                Ok(_) => {}
                // Re-adding an existing AVU is not an error.
                Err(SyncError::CommandFailed { ref stderr, .. })
                    if stderr.contains(ALREADY_HAS_ITEM) =>
                {
                    tracing::debug!(collection = coll, %avu, "AVU already present");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }

    async fn add_permissions(
        &self,
        collection: &Path,
        acl: &[AccessControl],
        recurse: bool,
    ) -> Result<()> {
        let coll = collection_str(collection)?;

        for ac in acl {
            let mut args = vec![];
            if recurse {
                args.push("-r");
            }
            args.extend([ac.permission.as_str(), ac.subject.as_str(), coll]);

            command::run_checked("ichmod", &args).await?;
        }

        Ok(())
    }
}

/// Readiness probe that asks the catalog for a collection listing,
/// authenticating first when a password is supplied. Authentication sits
/// inside the probe so that an unreachable server is retried, not fatal.
pub struct IrodsProbe {
    collection: String,
    password: Option<String>,
}

impl IrodsProbe {
    /// An empty collection path probes the home collection.
    pub fn new(collection: impl Into<String>, password: Option<String>) -> Self {
        Self {
            collection: collection.into(),
            password,
        }
    }
}

#[async_trait]
impl ReadinessProbe for IrodsProbe {
    fn name(&self) -> &str {
        "iRODS"
    }

    async fn check(&self) -> Result<()> {
        if let Some(password) = &self.password {
            iinit(password).await?;
        }
        ils(&self.collection).await?;
        Ok(())
    }
}
