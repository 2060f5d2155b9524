//! Results returned by `LedgerEngine` operations.

use bankist_shared::types::{AccountId, Currency, Locale, LoanId, SessionId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::summary::AccountSummary;
use crate::account::Handle;

/// Returned on successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// The new session.
    pub session_id: SessionId,
    /// The authenticated account.
    pub account_id: AccountId,
    /// Login handle.
    pub handle: Handle,
    /// Owner display name.
    pub owner: String,
    /// First word of the owner name, for the welcome banner.
    pub first_name: String,
    /// Display currency.
    pub currency: Currency,
    /// Display locale.
    pub locale: Locale,
    /// Figures at login time.
    pub summary: AccountSummary,
}

/// An applied transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReceipt {
    /// Sender handle.
    pub from: Handle,
    /// Receiver handle.
    pub to: Handle,
    /// Amount moved.
    pub amount: Decimal,
    /// Timestamp recorded on both movements.
    pub at: DateTime<Utc>,
    /// Sender balance after the transfer.
    pub sender_balance: Decimal,
}

/// A loan that passed the eligibility check and awaits crediting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanApproval {
    /// Loan ID.
    pub loan_id: LoanId,
    /// Account to credit.
    pub account_id: AccountId,
    /// Handle at approval time.
    pub handle: Handle,
    /// Amount to credit.
    pub amount: Decimal,
    /// When the loan was approved.
    pub approved_at: DateTime<Utc>,
}

/// A credited loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanCredit {
    /// Loan ID.
    pub loan_id: LoanId,
    /// Credited account.
    pub account_id: AccountId,
    /// Amount credited.
    pub amount: Decimal,
    /// When the movement was recorded.
    pub credited_at: DateTime<Utc>,
    /// Balance after crediting.
    pub balance: Decimal,
}

/// A closed account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClosedAccount {
    /// The removed account.
    pub account_id: AccountId,
    /// Its handle, now free for reuse.
    pub handle: Handle,
    /// Owner display name.
    pub owner: String,
    /// Balance at closure.
    pub final_balance: Decimal,
}
