//! Login handle derivation.

use serde::{Deserialize, Serialize};

/// Login identifier derived from the initials of an owner's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    /// Returns the handle text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `input` names this handle.
    ///
    /// Surrounding whitespace is ignored; everything else must match exactly.
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        self.0 == input.trim()
    }

    /// Returns true if the owner name produced no initials.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Handle {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Handle {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Derives the login handle for an owner name.
///
/// Lowercases the whole name, splits on whitespace and joins the first
/// character of every word: `"Steven Thomas Williams"` becomes `"stw"`.
#[must_use]
pub fn derive_handle(owner: &str) -> Handle {
    Handle(
        owner
            .to_lowercase()
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect(),
    )
}
