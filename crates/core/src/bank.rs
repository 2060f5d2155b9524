//! Async runtime around the ledger engine.
//!
//! `Bank` is a cheap handle shared by the presentation layer, the loan tasks
//! and the inactivity countdown. The engine lock is held for a whole
//! validate-then-mutate call and never across an `.await`.
//!
//! Lock order is engine, then timer slot. The countdown is only swapped
//! while the engine lock is held, so it always belongs to the session the
//! engine last settled on.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use bankist_shared::AppConfig;
use bankist_shared::config::{LoanConfig, SessionConfig};
use bankist_shared::types::{AccountId, LoanId, SessionId};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::account::NewAccount;
use crate::ledger::{
    AccountSummary, ClosedAccount, LedgerEngine, LedgerError, LoanApproval, LoanCredit,
    MovementRow, SessionSummary, TransferReceipt,
};
use crate::session::{ActiveSession, InactivityTimer, LogoutReason, SessionEvent};

const EVENT_CAPACITY: usize = 256;

/// How a scheduled loan ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanOutcome {
    /// The loan was credited.
    Credited(LoanCredit),
    /// The account was closed, or out of range, when the credit ran.
    Voided {
        /// The dropped loan.
        loan_id: LoanId,
        /// The account it was meant for.
        account_id: AccountId,
    },
}

/// An approved loan waiting for its credit delay.
///
/// The credit runs on its own task, so dropping this future does not cancel it.
#[derive(Debug)]
pub struct PendingLoan {
    approval: LoanApproval,
    task: JoinHandle<LoanOutcome>,
}

impl PendingLoan {
    /// The approval being credited.
    #[must_use]
    pub const fn approval(&self) -> &LoanApproval {
        &self.approval
    }
}

impl Future for PendingLoan {
    type Output = LoanOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match Pin::new(&mut this.task).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(LoanOutcome::Voided {
                loan_id: this.approval.loan_id,
                account_id: this.approval.account_id,
            }),
            Poll::Pending => Poll::Pending,
        }
    }
}

struct Inner {
    engine: Mutex<LedgerEngine>,
    timer: Mutex<Option<InactivityTimer>>,
    // Bumped on every countdown swap; a countdown only expires its own generation
    generation: AtomicU64,
    events: broadcast::Sender<SessionEvent>,
    session: SessionConfig,
    loan: LoanConfig,
}

/// Shared handle to the ledger, its session countdown and its event stream.
///
/// Methods that start background work must be called from within a Tokio
/// runtime.
#[derive(Clone)]
pub struct Bank {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for Bank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bank")
            .field("session", &self.inner.session)
            .field("loan", &self.inner.loan)
            .finish_non_exhaustive()
    }
}

impl Bank {
    /// Wraps an engine using the session and loan settings from `config`.
    #[must_use]
    pub fn new(engine: LedgerEngine, config: &AppConfig) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                engine: Mutex::new(engine),
                timer: Mutex::new(None),
                generation: AtomicU64::new(0),
                events,
                session: config.session.clone(),
                loan: config.loan.clone(),
            }),
        }
    }

    /// Subscribes to session and loan events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Logs in and restarts the inactivity countdown.
    ///
    /// A failed attempt ends any previous session and stops its countdown.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::AuthenticationFailure` for bad credentials.
    pub fn login(&self, handle: &str, pin: &str) -> Result<SessionSummary, LedgerError> {
        let mut engine = self.engine();
        let previous = current_session_id(&engine);
        let result = engine.authenticate(handle, pin);
        self.sync_timer(&engine);

        match &result {
            Ok(session) => {
                self.emit(SessionEvent::LoggedIn {
                    session_id: session.session_id,
                    handle: session.handle.clone(),
                });
            }
            Err(_) => {
                if let Some(session_id) = previous {
                    self.emit(SessionEvent::LoggedOut {
                        session_id,
                        reason: LogoutReason::FailedLogin,
                    });
                }
            }
        }
        result
    }

    /// Transfers from the logged-in account. Success resets the countdown.
    ///
    /// # Errors
    ///
    /// See [`LedgerEngine::transfer`].
    pub fn transfer(&self, amount: &str, target: &str) -> Result<TransferReceipt, LedgerError> {
        let mut engine = self.engine();
        let receipt = engine.transfer(amount, target)?;
        self.sync_timer(&engine);
        Ok(receipt)
    }

    /// Approves a loan and schedules its credit after the configured delay.
    ///
    /// Success resets the countdown. The credit runs whether or not the
    /// session is still active, and is voided if the account was closed.
    ///
    /// # Errors
    ///
    /// See [`LedgerEngine::request_loan`].
    pub fn request_loan(&self, amount: &str) -> Result<PendingLoan, LedgerError> {
        let approval = {
            let engine = self.engine();
            let approval = engine.request_loan(amount)?;
            self.sync_timer(&engine);
            approval
        };

        let inner = Arc::clone(&self.inner);
        let delay = self.inner.loan.credit_delay();
        let scheduled = approval.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let result = lock(&inner.engine).apply_loan(&scheduled);
            match result {
                Ok(credit) => {
                    let _ = inner.events.send(SessionEvent::LoanCredited(credit.clone()));
                    LoanOutcome::Credited(credit)
                }
                Err(err) => {
                    debug!(loan_id = %scheduled.loan_id, error = %err, "Loan voided");
                    let _ = inner.events.send(SessionEvent::LoanVoided {
                        loan_id: scheduled.loan_id,
                        account_id: scheduled.account_id,
                    });
                    LoanOutcome::Voided {
                        loan_id: scheduled.loan_id,
                        account_id: scheduled.account_id,
                    }
                }
            }
        });

        debug!(loan_id = %approval.loan_id, delay_ms = delay.as_millis(), "Loan scheduled");
        Ok(PendingLoan { approval, task })
    }

    /// Closes the logged-in account and stops the countdown.
    ///
    /// # Errors
    ///
    /// See [`LedgerEngine::close_account`].
    pub fn close_account(&self, handle: &str, pin: &str) -> Result<ClosedAccount, LedgerError> {
        let mut engine = self.engine();
        let session_id = current_session_id(&engine);
        let closed = engine.close_account(handle, pin)?;
        self.sync_timer(&engine);

        if let Some(session_id) = session_id {
            self.emit(SessionEvent::LoggedOut {
                session_id,
                reason: LogoutReason::AccountClosed,
            });
        }
        Ok(closed)
    }

    /// Ends the current session and stops the countdown.
    pub fn logout(&self) -> Option<ActiveSession> {
        let mut engine = self.engine();
        let ended = engine.logout();
        self.sync_timer(&engine);

        if let Some(session) = &ended {
            self.emit(SessionEvent::LoggedOut {
                session_id: session.session_id,
                reason: LogoutReason::Manual,
            });
        }
        ended
    }

    /// Opens a new account.
    ///
    /// # Errors
    ///
    /// See [`LedgerEngine::open_account`].
    pub fn open_account(&self, input: NewAccount) -> Result<AccountId, LedgerError> {
        self.engine().open_account(input)
    }

    /// Current session, if any.
    #[must_use]
    pub fn current_session(&self) -> Option<ActiveSession> {
        self.engine().session().current().cloned()
    }

    /// Summary of the logged-in account.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveSession` if nobody is logged in.
    pub fn summary(&self) -> Result<AccountSummary, LedgerError> {
        self.engine().current_summary()
    }

    /// Movement rows of the logged-in account.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveSession` if nobody is logged in.
    pub fn movements(&self, sort: bool) -> Result<Vec<MovementRow>, LedgerError> {
        self.engine().current_movements(sort)
    }

    /// Runs `f` with read access to the engine.
    pub fn with_engine<R>(&self, f: impl FnOnce(&LedgerEngine) -> R) -> R {
        f(&self.engine())
    }

    fn engine(&self) -> MutexGuard<'_, LedgerEngine> {
        lock(&self.inner.engine)
    }

    fn emit(&self, event: SessionEvent) {
        // No receivers is fine
        let _ = self.inner.events.send(event);
    }

    /// Replaces the countdown with a fresh one for the engine's current
    /// session, or stops it when nobody is logged in.
    ///
    /// Takes the engine so callers can only reach it with the lock held.
    fn sync_timer(&self, engine: &LedgerEngine) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let next = current_session_id(engine)
            .map(|session_id| self.start_timer(session_id, generation));
        let stopped = next.is_none();

        let previous = std::mem::replace(&mut *lock(&self.inner.timer), next);
        if let Some(timer) = previous {
            if stopped {
                info!(session_id = %timer.session_id(), "Inactivity countdown stopped");
            }
            timer.cancel();
        }
    }

    fn start_timer(&self, session_id: SessionId, generation: u64) -> InactivityTimer {
        let weak = Arc::downgrade(&self.inner);
        InactivityTimer::start(
            session_id,
            self.inner.session.timeout(),
            self.inner.session.tick(),
            self.inner.events.clone(),
            move |id| {
                weak.upgrade().is_some_and(|inner| {
                    let mut engine = lock(&inner.engine);
                    inner.generation.load(Ordering::SeqCst) == generation && engine.expire(id)
                })
            },
        )
    }
}

fn current_session_id(engine: &LedgerEngine) -> Option<SessionId> {
    engine.session().current().map(|s| s.session_id)
}

/// Every engine mutation validates before it writes, so a panic under the
/// lock cannot leave a half-applied change behind.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
