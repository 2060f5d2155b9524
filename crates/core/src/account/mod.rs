//! Accounts and the directory that owns them.
//!
//! - `handle` - Login handle derivation from owner names
//! - `model` - The account record and its movement history
//! - `directory` - Ordered account collection with unique handles
//! - `error` - Directory errors

pub mod directory;
pub mod error;
pub mod handle;
pub mod model;

pub use directory::AccountDirectory;
pub use error::DirectoryError;
pub use handle::{Handle, derive_handle};
pub use model::{Account, Movement, NewAccount};
