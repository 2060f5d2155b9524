//! Shared types, errors, and configuration for Bankist.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for accounts and sessions
//! - Currency and locale metadata carried on every account
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
