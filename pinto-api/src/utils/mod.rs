//! Utility modules.

/// Log sanitization utilities to keep payloads and secrets out of logs.
pub mod log_sanitizer;
