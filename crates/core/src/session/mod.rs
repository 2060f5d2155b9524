//! Session lifecycle.
//!
//! - `state` - Which account, if any, is currently authenticated
//! - `event` - Notifications published to the presentation layer
//! - `timer` - Inactivity countdown that forces a logout

pub mod event;
pub mod state;
pub mod timer;

pub use event::{LogoutReason, SessionEvent};
pub use state::{ActiveSession, SessionState};
pub use timer::{InactivityTimer, MIN_TICK, format_remaining};
