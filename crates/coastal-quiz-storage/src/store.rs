//! The question-set store trait and store selection.

use anyhow::{Context, Result};
use async_trait::async_trait;

use coastal_quiz_core::record::{parse_question_set, question_set_to_json};
use coastal_quiz_core::QuestionSet;

use crate::blob::BlobStore;
use crate::config::StorageConfig;
use crate::http::HttpStore;
use crate::local::LocalStore;
use crate::location::Location;

/// A handle on one question-set document.
///
/// Reads and writes are whole-document; there is no partial update and no
/// atomicity beyond what the backend offers.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Human-readable backend name (e.g. "blob").
    fn name(&self) -> &str;

    /// The document this store reads and writes.
    fn location(&self) -> &Location;

    /// Fetch the raw document.
    async fn read_bytes(&self) -> Result<Vec<u8>>;

    /// Replace the document.
    async fn write_bytes(&self, bytes: Vec<u8>) -> Result<()>;

    /// Fetch and parse the question set.
    async fn read_set(&self) -> Result<QuestionSet> {
        let bytes = self.read_bytes().await?;
        let content = String::from_utf8(bytes)
            .with_context(|| format!("{} is not valid UTF-8", self.location()))?;
        parse_question_set(&content).with_context(|| format!("invalid question set: {}", self.location()))
    }

    /// Serialize and store the question set.
    async fn write_set(&self, set: &QuestionSet) -> Result<()> {
        let json = question_set_to_json(set)?;
        self.write_bytes(json.into_bytes()).await
    }
}

/// Create the store for a location.
///
/// Blob locations need credentials from `config`; local and HTTP locations
/// ignore it.
pub fn open_store(location: &Location, config: &StorageConfig) -> Result<Box<dyn QuestionStore>> {
    match location {
        Location::Local(path) => Ok(Box::new(LocalStore::new(path.clone()))),
        Location::Blob { container, blob } => {
            let (endpoint, token) = config.blob_credentials()?;
            Ok(Box::new(BlobStore::new(&endpoint, &token, container, blob)?))
        }
        Location::Http(url) => Ok(Box::new(HttpStore::new(url)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;

    #[test]
    fn open_store_picks_backend() {
        let config = StorageConfig {
            account_name: Some("coclico".into()),
            sas_token: Some("sig=abc".into()),
            endpoint: None,
        };
        let cases = [
            ("questions/q.json", "local"),
            ("az://coastal-dynamics/questions/q.json", "blob"),
            ("https://example.org/q.json", "http"),
        ];
        for (raw, expected) in cases {
            let store = open_store(&Location::parse(raw).unwrap(), &config).unwrap();
            assert_eq!(store.name(), expected);
        }
    }

    #[test]
    fn blob_without_credentials_is_rejected() {
        let location = Location::parse("az://c/q.json").unwrap();
        let err = open_store(&location, &StorageConfig::default()).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::MissingCredentials)
        ));
    }
}
