//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence
//!
//! - `KeyValueStore` - Durable local key-value store holding the session record
//!
//! ## Analytics
//!
//! - `DiagnosticLogSink` - Receives the payload of a finished diagnostic
//!
//! ## Rendering
//!
//! - `DiagnosticObserver` - Callbacks the rendering layer registers for redraws

mod diagnostic_log_sink;
mod diagnostic_observer;
mod key_value_store;

pub use diagnostic_log_sink::{DiagnosticLogSink, LogReceipt, LogSinkError};
pub use diagnostic_observer::DiagnosticObserver;
pub use key_value_store::{KeyValueStore, KeyValueStoreError};
