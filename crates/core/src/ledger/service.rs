//! Ledger engine: the session state machine over an account directory.
//!
//! Every mutating operation validates everything first and then mutates in
//! one step, so a rejected operation leaves the directory untouched.

use bankist_shared::types::{AccountId, LoanId, SessionId};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info};

use super::error::LedgerError;
use super::summary::{AccountSummary, compute_summary, summary_after};
use super::types::{ClosedAccount, LoanApproval, LoanCredit, SessionSummary, TransferReceipt};
use super::validation::{ValidationError, parse_amount, parse_pin};
use super::view::{MovementRow, movement_rows};
use crate::account::{Account, AccountDirectory, NewAccount};
use crate::session::{ActiveSession, SessionState};

/// A loan needs one earlier movement of at least this fraction of its amount.
pub const LOAN_DEPOSIT_RATIO: Decimal = Decimal::from_parts(1, 0, 0, false, 1); // 0.1

const LOAN_FIELD: &str = "Loan amount";

/// Owns the account directory and the current session.
#[derive(Debug, Default)]
pub struct LedgerEngine {
    directory: AccountDirectory,
    session: SessionState,
}

impl LedgerEngine {
    /// Creates an engine over an initialized directory, with nobody logged in.
    #[must_use]
    pub fn new(directory: AccountDirectory) -> Self {
        Self {
            directory,
            session: SessionState::new(),
        }
    }

    /// Returns the directory.
    #[must_use]
    pub const fn directory(&self) -> &AccountDirectory {
        &self.directory
    }

    /// Returns the session state.
    #[must_use]
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    /// Returns the logged-in account.
    #[must_use]
    pub fn current_account(&self) -> Option<&Account> {
        self.session
            .current()
            .and_then(|s| self.directory.find_by_id(s.account_id))
    }

    /// Opens a new account.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Directory` if the owner is blank or the handle is taken.
    pub fn open_account(&mut self, input: NewAccount) -> Result<AccountId, LedgerError> {
        let id = self.directory.insert(input)?;
        info!(account_id = %id, "Account opened");
        Ok(id)
    }

    /// Logs in with a handle and PIN.
    ///
    /// Any previous session ends, whether or not the attempt succeeds.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AuthenticationFailure` for an unknown handle, a
    /// wrong PIN, or PIN text that is not a number, and `LedgerError::Overflow`
    /// if the account's figures cannot be computed.
    pub fn authenticate(&mut self, handle: &str, pin: &str) -> Result<SessionSummary, LedgerError> {
        let account = parse_pin(pin).and_then(|pin| {
            self.directory
                .find_by_handle(handle)
                .filter(|account| account.pin_matches(pin))
        });

        let Some(account) = account else {
            self.session.clear();
            debug!(handle = handle.trim(), "Login rejected");
            return Err(LedgerError::AuthenticationFailure);
        };

        let figures = match compute_summary(account) {
            Ok(figures) => figures,
            Err(err) => {
                self.session.clear();
                return Err(err);
            }
        };

        let account_id = account.id();
        let handle = account.handle().clone();
        let session_id = self.session.begin(account_id, handle.clone()).session_id;

        let summary = SessionSummary {
            session_id,
            account_id,
            handle,
            owner: account.owner().to_string(),
            first_name: account.first_name().to_string(),
            currency: account.currency(),
            locale: account.locale().clone(),
            summary: figures,
        };

        info!(session_id = %summary.session_id, handle = %summary.handle, "Logged in");
        Ok(summary)
    }

    /// Ends the current session.
    pub fn logout(&mut self) -> Option<ActiveSession> {
        let ended = self.session.clear();
        if let Some(session) = &ended {
            info!(session_id = %session.session_id, "Logged out");
        }
        ended
    }

    /// Ends the session if it is still `session_id`.
    ///
    /// Returns false when a newer session has replaced it or nobody is logged in.
    pub fn expire(&mut self, session_id: SessionId) -> bool {
        self.session.expire(session_id)
    }

    /// Moves money from the logged-in account to another account.
    ///
    /// Both movements share one timestamp and are recorded together.
    ///
    /// # Errors
    ///
    /// - `NoActiveSession` if nobody is logged in
    /// - `Validation` if the amount is malformed or not positive
    /// - `InsufficientFunds` if the amount exceeds the sender's balance
    /// - `TargetNotFound` if no account has the target handle
    /// - `SelfTransfer` if the target is the sender
    /// - `Validation` if either account could no longer be summarized afterwards
    pub fn transfer(&mut self, amount: &str, target: &str) -> Result<TransferReceipt, LedgerError> {
        const FIELD: &str = "Transfer amount";

        let sender = self.require_account()?;
        let amount = parse_amount(FIELD, amount)?;

        let available = sender.balance().ok_or(LedgerError::Overflow(sender.id()))?;
        if amount > available {
            debug!(%amount, %available, "Transfer rejected: insufficient funds");
            return Err(LedgerError::InsufficientFunds {
                requested: amount,
                available,
            });
        }

        let receiver = self
            .directory
            .find_by_handle(target)
            .ok_or_else(|| LedgerError::TargetNotFound(target.trim().to_string()))?;

        if receiver.id() == sender.id() {
            return Err(LedgerError::SelfTransfer);
        }

        let (Some(sender_after), Some(_)) =
            (summary_after(sender, -amount), summary_after(receiver, amount))
        else {
            debug!(%amount, "Transfer rejected: out of range");
            return Err(ValidationError::Overflow {
                field: FIELD,
                value: amount,
            }
            .into());
        };

        let (sender_id, receiver_id) = (sender.id(), receiver.id());
        let (sender, receiver) = self
            .directory
            .pair_mut(sender_id, receiver_id)
            .ok_or(LedgerError::AccountNotFound(receiver_id))?;

        let at = Utc::now();
        sender.record(-amount, at);
        receiver.record(amount, at);

        info!(from = %sender.handle(), to = %receiver.handle(), %amount, "Transfer applied");
        Ok(TransferReceipt {
            from: sender.handle().clone(),
            to: receiver.handle().clone(),
            amount,
            at,
            sender_balance: sender_after.balance,
        })
    }

    /// Decides a loan request for the logged-in account.
    ///
    /// Approval does not touch the ledger; pass the result to `apply_loan`
    /// once the loan should be credited.
    ///
    /// # Errors
    ///
    /// - `NoActiveSession` if nobody is logged in
    /// - `Validation` if the amount is malformed or not positive
    /// - `LoanEligibility` if no movement reaches 10% of the amount
    /// - `Validation` if crediting the loan would overflow the account
    pub fn request_loan(&self, amount: &str) -> Result<LoanApproval, LedgerError> {
        let account = self.require_account()?;
        let amount = parse_amount(LOAN_FIELD, amount)?;

        let required_deposit = amount * LOAN_DEPOSIT_RATIO;
        if !account.amounts().any(|m| m >= required_deposit) {
            debug!(%amount, %required_deposit, "Loan rejected");
            return Err(LedgerError::LoanEligibility {
                amount,
                required_deposit,
            });
        }

        if summary_after(account, amount).is_none() {
            debug!(%amount, "Loan rejected: out of range");
            return Err(ValidationError::Overflow {
                field: LOAN_FIELD,
                value: amount,
            }
            .into());
        }

        info!(handle = %account.handle(), %amount, "Loan approved");
        Ok(LoanApproval {
            loan_id: LoanId::new(),
            account_id: account.id(),
            handle: account.handle().clone(),
            amount,
            approved_at: Utc::now(),
        })
    }

    /// Credits an approved loan.
    ///
    /// Runs regardless of the current session, but only while the account
    /// still exists.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the account was closed in the meantime
    /// - `Validation` if other credits since approval leave no room for this one
    pub fn apply_loan(&mut self, approval: &LoanApproval) -> Result<LoanCredit, LedgerError> {
        let account = self
            .directory
            .find_by_id_mut(approval.account_id)
            .ok_or(LedgerError::AccountNotFound(approval.account_id))?;

        let Some(after) = summary_after(account, approval.amount) else {
            debug!(loan_id = %approval.loan_id, "Loan dropped: out of range");
            return Err(ValidationError::Overflow {
                field: LOAN_FIELD,
                value: approval.amount,
            }
            .into());
        };

        let credited_at = Utc::now();
        account.record(approval.amount, credited_at);

        info!(loan_id = %approval.loan_id, amount = %approval.amount, "Loan credited");
        Ok(LoanCredit {
            loan_id: approval.loan_id,
            account_id: approval.account_id,
            amount: approval.amount,
            credited_at,
            balance: after.balance,
        })
    }

    /// Closes the logged-in account and ends the session.
    ///
    /// # Errors
    ///
    /// - `NoActiveSession` if nobody is logged in
    /// - `Authorization` if the handle or PIN is not the logged-in account's
    pub fn close_account(&mut self, handle: &str, pin: &str) -> Result<ClosedAccount, LedgerError> {
        let account = self.require_account()?;

        let own = account.handle().matches(handle)
            && parse_pin(pin).is_some_and(|p| account.pin_matches(p));
        if !own {
            debug!(handle = handle.trim(), "Close rejected");
            return Err(LedgerError::Authorization);
        }

        let final_balance = account.balance().ok_or(LedgerError::Overflow(account.id()))?;
        let handle = account.handle().clone();
        let removed = self.directory.remove_by_handle(handle.as_str())?;
        self.session.clear();

        info!(%handle, "Account closed");
        Ok(ClosedAccount {
            account_id: removed.id(),
            final_balance,
            owner: removed.owner().to_string(),
            handle,
        })
    }

    /// Summary of the logged-in account.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveSession` if nobody is logged in.
    pub fn current_summary(&self) -> Result<AccountSummary, LedgerError> {
        self.require_account().and_then(compute_summary)
    }

    /// Movement rows of the logged-in account, optionally sorted by amount.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveSession` if nobody is logged in.
    pub fn current_movements(&self, sort: bool) -> Result<Vec<MovementRow>, LedgerError> {
        self.require_account().map(|account| movement_rows(account, sort))
    }

    fn require_account(&self) -> Result<&Account, LedgerError> {
        self.current_account().ok_or(LedgerError::NoActiveSession)
    }
}
