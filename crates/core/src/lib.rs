//! Core business logic for Bankist.
//!
//! This crate contains the in-memory ledger with ZERO presentation
//! dependencies. Accounts, sessions, transfers, loans and closures live
//! here, plus the async runtime that schedules loan credits and the
//! inactivity logout.
//!
//! # Modules
//!
//! - `account` - Account records, handles and the directory
//! - `ledger` - Summary math, validation and the `LedgerEngine`
//! - `session` - Session state, events and the inactivity countdown
//! - `bank` - Shared async handle over the engine
//! - `seed` - Demo accounts

pub mod account;
pub mod bank;
pub mod ledger;
pub mod seed;
pub mod session;
