//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources a run
//! needs:
//! - Logger (plain or JSON, level from CLI or `RUST_LOG`)
//! - DNS resolver (timeouts, attempts, upstream configuration)
//!
//! All initialization functions return proper error types for error handling.

mod logger;
mod resolver;

// Re-export public API
pub use logger::init_logger_with;
pub use resolver::{init_resolver, resolver_opts};
