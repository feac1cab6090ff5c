//! Unit tests for launchkit
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod architecture;
mod service_parsing;
