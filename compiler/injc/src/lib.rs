//! Library side of the `inj` CLI.
//!
//! The binary only parses arguments; everything it runs lives here so
//! integration tests can drive it without spawning a process.

pub mod commands;
mod logging;

pub use logging::init_tracing;
