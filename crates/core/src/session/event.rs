//! Notifications published to the presentation layer.

use std::time::Duration;

use bankist_shared::types::{AccountId, LoanId, SessionId};

use crate::account::Handle;
use crate::ledger::LoanCredit;

/// Why a session ended without expiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// The user logged out.
    Manual,
    /// A login attempt failed.
    FailedLogin,
    /// The user closed their own account.
    AccountClosed,
}

/// Event broadcast by `Bank` to every subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A session started.
    LoggedIn {
        /// The new session.
        session_id: SessionId,
        /// Handle that logged in.
        handle: Handle,
    },
    /// The inactivity countdown advanced.
    Tick {
        /// Session the countdown belongs to.
        session_id: SessionId,
        /// Time left before the forced logout.
        remaining: Duration,
    },
    /// The countdown reached zero and the session was cleared.
    Expired {
        /// The session that was cleared.
        session_id: SessionId,
    },
    /// The session ended for another reason.
    LoggedOut {
        /// The session that ended.
        session_id: SessionId,
        /// Why it ended.
        reason: LogoutReason,
    },
    /// A scheduled loan was credited.
    LoanCredited(LoanCredit),
    /// A scheduled loan was dropped: its account was closed or has no room left.
    LoanVoided {
        /// The dropped loan.
        loan_id: LoanId,
        /// The account it was meant for.
        account_id: AccountId,
    },
}
