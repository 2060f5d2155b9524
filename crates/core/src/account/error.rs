//! Account directory errors.

use thiserror::Error;

use super::handle::Handle;

/// Errors raised while building or mutating an `AccountDirectory`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// Owner name is empty, so no handle can be derived.
    #[error("Account owner must not be empty")]
    EmptyOwner,

    /// Two owners collapse to the same handle.
    #[error("Handle '{0}' is already taken")]
    DuplicateHandle(Handle),

    /// No account uses the handle.
    #[error("No account with handle '{0}'")]
    NotFound(String),
}

impl DirectoryError {
    /// Returns the error code for the presentation layer.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyOwner => "EMPTY_OWNER",
            Self::DuplicateHandle(_) => "DUPLICATE_HANDLE",
            Self::NotFound(_) => "NOT_FOUND",
        }
    }
}
