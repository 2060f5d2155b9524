//! Account ledger: balances, transfers, loans, and closures.
//!
//! This module implements the core ledger functionality:
//! - Summary math (balance, income, outflow, qualifying interest)
//! - Raw input parsing for amounts and PINs
//! - The `LedgerEngine` state machine over a directory and a session
//! - Result types returned to the presentation layer
//! - A presentation-friendly view of the movement history

pub mod error;
pub mod service;
pub mod summary;
pub mod types;
pub mod validation;
pub mod view;

#[cfg(test)]
mod service_props;
#[cfg(test)]
mod summary_props;

pub use error::LedgerError;
pub use service::LedgerEngine;
pub use summary::{AccountSummary, checked_sum, compute_summary, summarize};
pub use types::{ClosedAccount, LoanApproval, LoanCredit, SessionSummary, TransferReceipt};
pub use validation::{ValidationError, parse_amount, parse_pin};
pub use view::{MovementDateLabel, MovementKind, MovementRow, days_passed, movement_rows};
