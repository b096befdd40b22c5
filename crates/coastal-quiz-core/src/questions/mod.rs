//! The four question kinds and the option list shared by the choice kinds.

mod multiple_choice;
mod multiple_selection;
mod numeric;
mod text;

pub use multiple_choice::MultipleChoice;
pub use multiple_selection::MultipleSelection;
pub use numeric::Numeric;
pub use text::Text;

use std::collections::BTreeMap;

use crate::error::QuizError;
use crate::hash::{hash_choice, Digest};

/// Option keys mapped to the labels students see.
///
/// Options are presented in key order. Students pick labels; a submitted
/// string that matches no label is tried as a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    entries: BTreeMap<String, String>,
}

impl Options {
    /// Minimum number of options a choice question must offer.
    pub const MIN: usize = 2;

    pub fn new(entries: BTreeMap<String, String>) -> Result<Self, QuizError> {
        if entries.len() < Self::MIN {
            return Err(QuizError::EmptyOptionSet {
                found: entries.len(),
            });
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn labels(&self) -> Vec<String> {
        self.entries.values().cloned().collect()
    }

    /// Resolve a submitted label (or, failing that, a key) to its key.
    pub fn resolve(&self, selected: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, label)| label.as_str() == selected)
            .map(|(key, _)| key.as_str())
            .or_else(|| {
                self.entries
                    .get_key_value(selected)
                    .map(|(key, _)| key.as_str())
            })
    }

    /// The key whose digest equals `digest`, if any.
    pub fn key_for(&self, digest: &Digest) -> Option<&str> {
        self.entries
            .keys()
            .find(|key| &hash_choice(key) == digest)
            .map(String::as_str)
    }
}
