//! Inactivity countdown.
//!
//! A countdown ticks once per interval and broadcasts the remaining time.
//! When it reaches zero it asks the owner to expire the session. Dropping
//! the timer aborts the countdown.

use std::time::Duration;

use bankist_shared::types::SessionId;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info};

use super::event::SessionEvent;

/// Shortest tick a countdown will use; a zero tick is raised to this.
pub const MIN_TICK: Duration = Duration::from_millis(1);

/// Running inactivity countdown for one session.
#[derive(Debug)]
pub struct InactivityTimer {
    session_id: SessionId,
    task: JoinHandle<()>,
}

impl InactivityTimer {
    /// Starts a countdown from `timeout`, ticking every `tick`.
    ///
    /// A `Tick` event is sent immediately and after every interval. At zero,
    /// `on_expire` is called; if it reports that it cleared the session an
    /// `Expired` event follows. A zero `tick` counts down in `MIN_TICK` steps.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start<F>(
        session_id: SessionId,
        timeout: Duration,
        tick: Duration,
        events: broadcast::Sender<SessionEvent>,
        on_expire: F,
    ) -> Self
    where
        F: FnOnce(SessionId) -> bool + Send + 'static,
    {
        let tick = tick.max(MIN_TICK);
        let task = tokio::spawn(async move {
            let mut remaining = timeout;
            let mut ticker = interval_at(Instant::now() + tick, tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                // No receivers is fine
                let _ = events.send(SessionEvent::Tick {
                    session_id,
                    remaining,
                });
                if remaining.is_zero() {
                    break;
                }
                ticker.tick().await;
                remaining = remaining.saturating_sub(tick);
            }

            if on_expire(session_id) {
                info!(%session_id, "Session expired after inactivity");
                let _ = events.send(SessionEvent::Expired { session_id });
            } else {
                debug!(%session_id, "Countdown finished for a session that already ended");
            }
        });

        debug!(%session_id, timeout_secs = timeout.as_secs(), "Inactivity countdown started");
        Self { session_id, task }
    }

    /// Session this countdown belongs to.
    #[must_use]
    pub const fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Returns true once the countdown has run out or been aborted.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops the countdown.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for InactivityTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Formats a remaining duration as `mm:ss`.
#[must_use]
pub fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
