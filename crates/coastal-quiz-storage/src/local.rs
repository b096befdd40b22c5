//! Question sets on the local filesystem.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::instrument;

use crate::error::StorageError;
use crate::location::Location;
use crate::store::QuestionStore;

pub struct LocalStore {
    location: Location,
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            location: Location::Local(path.clone()),
            path,
        }
    }
}

#[async_trait]
impl QuestionStore for LocalStore {
    fn name(&self) -> &str {
        "local"
    }

    fn location(&self) -> &Location {
        &self.location
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn read_bytes(&self) -> Result<Vec<u8>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(self.location.to_string()).into())
            }
            Err(e) => Err(e).with_context(|| format!("failed to read {}", self.path.display())),
        }
    }

    #[instrument(skip(self, bytes), fields(path = %self.path.display(), len = bytes.len()))]
    async fn write_bytes(&self, bytes: Vec<u8>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        tokio::fs::write(&self.path, bytes)
            .await
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        tracing::info!("wrote question set");
        Ok(())
    }
}
