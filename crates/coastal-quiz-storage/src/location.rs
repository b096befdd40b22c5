//! Addresses of question-set documents.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Where a question set lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// A file on the local filesystem.
    Local(PathBuf),
    /// A blob in a storage container, written `az://container/path/to/set.json`.
    Blob { container: String, blob: String },
    /// A plain HTTP(S) URL; read-only.
    Http(String),
}

impl Location {
    pub fn parse(s: &str) -> Result<Self, StorageError> {
        if let Some(rest) = s.strip_prefix("az://") {
            let (container, blob) = rest
                .split_once('/')
                .filter(|(c, b)| !c.is_empty() && !b.is_empty() && !b.ends_with('/'))
                .ok_or_else(|| StorageError::InvalidLocation(s.to_string()))?;
            return Ok(Location::Blob {
                container: container.to_string(),
                blob: blob.to_string(),
            });
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            return Ok(Location::Http(s.to_string()));
        }
        if s.is_empty() {
            return Err(StorageError::InvalidLocation(s.to_string()));
        }
        Ok(Location::Local(PathBuf::from(s)))
    }

    /// The location of the hashed counterpart: `<stem>_hashed.json` next to
    /// this document.
    pub fn hashed_sibling(&self) -> Location {
        match self {
            Location::Local(path) => {
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Location::Local(path.with_file_name(format!("{stem}_hashed.json")))
            }
            Location::Blob { container, blob } => Location::Blob {
                container: container.clone(),
                blob: hashed_name(blob),
            },
            Location::Http(url) => {
                let (base, query) = match url.split_once('?') {
                    Some((base, query)) => (base, Some(query)),
                    None => (url.as_str(), None),
                };
                let mut out = hashed_name(base);
                if let Some(query) = query {
                    out.push('?');
                    out.push_str(query);
                }
                Location::Http(out)
            }
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Location::Local(_))
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Location::Local(path) => Some(path),
            _ => None,
        }
    }
}

fn hashed_name(path: &str) -> String {
    let (dir, file) = match path.rsplit_once('/') {
        Some((dir, file)) => (Some(dir), file),
        None => (None, path),
    };
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
    match dir {
        Some(dir) => format!("{dir}/{stem}_hashed.json"),
        None => format!("{stem}_hashed.json"),
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Local(path) => write!(f, "{}", path.display()),
            Location::Blob { container, blob } => write!(f, "az://{container}/{blob}"),
            // query strings may carry tokens
            Location::Http(url) => f.write_str(url.split('?').next().unwrap_or(url)),
        }
    }
}

impl std::str::FromStr for Location {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::parse(s)
    }
}
