//! Azure-style blob container store.
//!
//! Speaks the minimal subset of the Blob REST API needed for whole-document
//! access: `GET` to download and `PUT` with `x-ms-blob-type: BlockBlob` to
//! upload, both authorised by a SAS token in the query string.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::instrument;

use crate::error::StorageError;
use crate::location::Location;
use crate::store::QuestionStore;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// A single blob in a storage container.
pub struct BlobStore {
    location: Location,
    /// `{endpoint}/{container}/{blob}`, without the token.
    url: String,
    sas_token: String,
    client: reqwest::Client,
}

impl BlobStore {
    pub fn new(endpoint: &str, sas_token: &str, container: &str, blob: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| StorageError::Network(e.to_string()))?;

        Ok(Self {
            location: Location::Blob {
                container: container.to_string(),
                blob: blob.to_string(),
            },
            url: format!("{}/{container}/{blob}", endpoint.trim_end_matches('/')),
            sas_token: sas_token.trim_start_matches('?').to_string(),
            client,
        })
    }

    fn signed_url(&self) -> String {
        format!("{}?{}", self.url, self.sas_token)
    }
}

#[async_trait]
impl QuestionStore for BlobStore {
    fn name(&self) -> &str {
        "blob"
    }

    fn location(&self) -> &Location {
        &self.location
    }

    #[instrument(skip(self), fields(location = %self.location))]
    async fn read_bytes(&self) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(self.signed_url())
            .send()
            .await
            .map_err(|e| StorageError::network(&self.location.to_string(), e))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::from_status(status, &self.location.to_string(), body).into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::network(&self.location.to_string(), e))?;
        tracing::info!(len = bytes.len(), "downloaded question set");
        Ok(bytes.to_vec())
    }

    #[instrument(skip(self, bytes), fields(location = %self.location, len = bytes.len()))]
    async fn write_bytes(&self, bytes: Vec<u8>) -> Result<()> {
        let response = self
            .client
            .put(self.signed_url())
            .header("x-ms-blob-type", "BlockBlob")
            .header("content-type", "application/json")
            .body(bytes)
            .send()
            .await
            .map_err(|e| StorageError::network(&self.location.to_string(), e))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::from_status(status, &self.location.to_string(), body).into());
        }

        tracing::info!("uploaded question set");
        Ok(())
    }
}
