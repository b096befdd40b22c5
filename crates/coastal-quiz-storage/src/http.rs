//! Read-only access to published question sets over HTTP(S).

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::instrument;

use crate::error::StorageError;
use crate::location::Location;
use crate::store::QuestionStore;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct HttpStore {
    location: Location,
    url: String,
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| StorageError::Network(e.to_string()))?;

        Ok(Self {
            location: Location::Http(url.to_string()),
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl QuestionStore for HttpStore {
    fn name(&self) -> &str {
        "http"
    }

    fn location(&self) -> &Location {
        &self.location
    }

    #[instrument(skip(self), fields(location = %self.location))]
    async fn read_bytes(&self) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(&self.url)
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
        Ok(bytes.to_vec())
    }

    async fn write_bytes(&self, _bytes: Vec<u8>) -> Result<()> {
        Err(StorageError::ReadOnly(self.location.to_string()).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn fetch_published_set() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "q1": {
                "type": "multiple_choice",
                "name": "Q1",
                "question": "Which coastal system do you typically find in tide-dominated coasts?",
                "options": {"a": "Mudflats", "b": "Cliffed coasts"},
                "answer": "ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb",
                "feedback": {"correct": "Well done", "incorrect": "Not quite"}
            }
        });

        Mock::given(method("GET"))
            .and(path("/questions/week1_hashed.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let store = HttpStore::new(&format!("{}/questions/week1_hashed.json", server.uri())).unwrap();
        let set = store.read_set().await.unwrap();
        assert_eq!(set["q1"].name.as_deref(), Some("Q1"));
    }

    #[tokio::test]
    async fn server_error_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let store = HttpStore::new(&format!("{}/q.json", server.uri())).unwrap();
        let err = store.read_bytes().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::Http { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn writes_are_refused() {
        let store = HttpStore::new("https://example.org/q.json").unwrap();
        let err = store.write_bytes(Vec::new()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::ReadOnly(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_host_hides_query() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let store = HttpStore::new(&format!("http://{addr}/q.json?sig=SUPERSECRET")).unwrap();
        let err = store.read_bytes().await.unwrap_err();
        let msg = format!("{err:#}");
        assert!(matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::Network(_))
        ));
        assert!(!msg.contains("SUPERSECRET"), "{msg}");
    }
}
