//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Key-value stores for the session record (file, in-memory)
//! - `logging` - Analytics sinks (HTTP, in-memory)
//! - `http` - The log endpoint served by the binary

pub mod http;
pub mod logging;
pub mod storage;

pub use logging::{HttpLogSink, HttpLogSinkConfig, InMemoryLogSink};
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
