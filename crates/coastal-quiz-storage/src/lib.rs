//! coastal-quiz-storage — where question sets live.
//!
//! Question sets are single JSON documents. They are authored locally,
//! published to a blob container and fetched by notebooks over HTTPS. This
//! crate implements the `QuestionStore` trait for each of those places and
//! resolves storage credentials.

pub mod blob;
pub mod config;
pub mod error;
pub mod http;
pub mod local;
pub mod location;
pub mod store;

pub use config::{load_config, load_config_from, QuizConfig, StorageConfig};
pub use error::StorageError;
pub use location::Location;
pub use store::{open_store, QuestionStore};
