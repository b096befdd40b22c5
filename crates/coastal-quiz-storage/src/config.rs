//! Storage configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

pub const ACCOUNT_NAME_VAR: &str = "AZURE_STORAGE_ACCOUNT_NAME";
pub const SAS_TOKEN_VAR: &str = "AZURE_STORAGE_SAS_TOKEN";
pub const ENDPOINT_VAR: &str = "AZURE_STORAGE_ENDPOINT";

/// Blob storage account settings.
///
/// Note: Custom Debug impl masks the SAS token to prevent accidental exposure in logs.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage account name, e.g. "coclico".
    #[serde(default)]
    pub account_name: Option<String>,
    /// Shared access signature, with or without the leading `?`.
    #[serde(default)]
    pub sas_token: Option<String>,
    /// Blob service endpoint override (emulators, tests). Defaults to
    /// `https://{account_name}.blob.core.windows.net`.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("account_name", &self.account_name)
            .field("sas_token", &self.sas_token.as_ref().map(|_| "***"))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl StorageConfig {
    /// Endpoint and SAS token needed for blob access.
    pub fn blob_credentials(&self) -> Result<(String, String), StorageError> {
        let token = self
            .sas_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(StorageError::MissingCredentials)?
            .trim_start_matches('?')
            .to_string();

        let endpoint = match (&self.endpoint, &self.account_name) {
            (Some(endpoint), _) if !endpoint.is_empty() => endpoint.trim_end_matches('/').to_string(),
            (_, Some(account)) if !account.is_empty() => {
                format!("https://{account}.blob.core.windows.net")
            }
            _ => return Err(StorageError::MissingCredentials),
        };

        Ok((endpoint, token))
    }

    /// Overwrite fields from environment-style lookups.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(account) = lookup(ACCOUNT_NAME_VAR) {
            self.account_name = Some(account);
        }
        if let Some(token) = lookup(SAS_TOKEN_VAR) {
            self.sas_token = Some(token);
        }
        if let Some(endpoint) = lookup(ENDPOINT_VAR) {
            self.endpoint = Some(endpoint);
        }
    }
}

/// Top-level coastal-quiz configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + end];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_storage_config(config: &StorageConfig) -> StorageConfig {
    let resolve = |field: &Option<String>| field.as_deref().map(resolve_env_vars);
    StorageConfig {
        account_name: resolve(&config.account_name),
        sas_token: resolve(&config.sas_token),
        endpoint: resolve(&config.endpoint),
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `coastal-quiz.toml` in the current directory
/// 2. `~/.config/coastal-quiz/config.toml`
///
/// Environment variable overrides: `AZURE_STORAGE_ACCOUNT_NAME`,
/// `AZURE_STORAGE_SAS_TOKEN`, `AZURE_STORAGE_ENDPOINT`.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("coastal-quiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    config.storage = resolve_storage_config(&config.storage);
    config
        .storage
        .apply_overrides(|var| std::env::var(var).ok().filter(|v| !v.is_empty()));

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("coastal-quiz"))
}
