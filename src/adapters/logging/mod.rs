//! Logging Adapters
//!
//! Implementations of the DiagnosticLogSink port.
//!
//! - **HttpLogSink** - POSTs the payload to the log endpoint with reqwest
//! - **InMemoryLogSink** - Captures payloads (testing/development)

mod http_log_sink;
mod in_memory_log_sink;

pub use http_log_sink::{HttpLogSink, HttpLogSinkConfig};
pub use in_memory_log_sink::InMemoryLogSink;
