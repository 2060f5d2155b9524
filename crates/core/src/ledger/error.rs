//! Ledger error types.
//!
//! Every engine operation returns one of these instead of mutating state.
//! None of them leave an operation partially applied.

use bankist_shared::AppError;
use bankist_shared::types::AccountId;
use rust_decimal::Decimal;
use thiserror::Error;

use super::validation::ValidationError;
use crate::account::DirectoryError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // ========== Session Errors ==========
    /// Unknown handle or wrong PIN.
    #[error("Wrong username or PIN")]
    AuthenticationFailure,

    /// Operation needs a logged-in account.
    #[error("No account is logged in")]
    NoActiveSession,

    /// Handle/PIN do not belong to the logged-in account.
    #[error("You can only close your own account")]
    Authorization,

    // ========== Validation Errors ==========
    /// Malformed or non-positive input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ========== Transfer Errors ==========
    /// Transfer exceeds the sender's balance.
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        /// Amount requested.
        requested: Decimal,
        /// Sender balance.
        available: Decimal,
    },

    /// Target handle equals the sender's.
    #[error("Cannot transfer to your own account")]
    SelfTransfer,

    /// No account has the target handle.
    #[error("No account with handle '{0}'")]
    TargetNotFound(String),

    // ========== Loan Errors ==========
    /// No deposit is large enough to back the loan.
    #[error("Loan of {amount} needs a deposit of at least {required_deposit}")]
    LoanEligibility {
        /// Amount requested.
        amount: Decimal,
        /// Smallest deposit that would qualify.
        required_deposit: Decimal,
    },

    /// Account disappeared before a deferred operation ran.
    #[error("Account {0} no longer exists")]
    AccountNotFound(AccountId),

    /// A stored figure no longer fits a `Decimal`.
    #[error("Figures of account {0} are out of range")]
    Overflow(AccountId),

    // ========== Directory Errors ==========
    /// Directory mutation failed.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl LedgerError {
    /// Returns the error code for the presentation layer.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AuthenticationFailure => "AUTHENTICATION_FAILURE",
            Self::NoActiveSession => "NO_ACTIVE_SESSION",
            Self::Authorization => "AUTHORIZATION_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::SelfTransfer => "SELF_TRANSFER",
            Self::TargetNotFound(_) => "TARGET_NOT_FOUND",
            Self::LoanEligibility { .. } => "LOAN_ELIGIBILITY",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::Overflow(_) => "OVERFLOW",
            Self::Directory(err) => err.error_code(),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::AuthenticationFailure | LedgerError::NoActiveSession => {
                Self::Unauthorized(message)
            }
            LedgerError::Authorization => Self::Forbidden(message),
            LedgerError::Validation(_) | LedgerError::Directory(DirectoryError::EmptyOwner) => {
                Self::Validation(message)
            }
            LedgerError::InsufficientFunds { .. }
            | LedgerError::SelfTransfer
            | LedgerError::LoanEligibility { .. } => Self::BusinessRule(message),
            LedgerError::TargetNotFound(_)
            | LedgerError::AccountNotFound(_)
            | LedgerError::Directory(DirectoryError::NotFound(_)) => Self::NotFound(message),
            LedgerError::Directory(DirectoryError::DuplicateHandle(_)) => Self::Conflict(message),
            LedgerError::Overflow(_) => Self::Internal(message),
        }
    }
}
