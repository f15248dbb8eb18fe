//! Application layer - Orchestrates the diagnostic session against its ports.
//!
//! - `controller` - Drives a session for the rendering layer
//! - `persistence` - Session record under a fixed key
//! - `log_dispatch` - Fire-and-forget analytics delivery

mod controller;
mod log_dispatch;
mod persistence;

pub use controller::{CompletionReport, DiagnosticController};
pub use log_dispatch::{LogDispatcher, LogOutcome};
pub use persistence::{SessionPersistence, DEFAULT_SESSION_KEY};
