//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, the state machine trait and error
//! types that the diagnostic domain is built from.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{LogEntryId, SessionId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
