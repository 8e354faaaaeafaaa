//! Utility modules.

/// Serde helpers for the provider's loosely-typed JSON.
pub mod serde_helpers;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
