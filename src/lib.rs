#![deny(missing_docs)]

//! Core library for the student roster server.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Roster mutation counters.
pub mod metrics;
/// In-memory student and course registry.
pub mod roster;
