//! Typed IDs for type-safe entity references.
//!
//! Handles are derived from owner names and get reused after an account is
//! closed, so anything that must outlive a request (scheduled loan credits,
//! countdowns) refers to accounts and sessions by these IDs instead.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

typed_id!(AccountId, "Unique identifier for a bank account.");
typed_id!(SessionId, "Unique identifier for an authenticated session.");
typed_id!(LoanId, "Unique identifier for an approved loan awaiting credit.");

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
