//! Error types for the TTCN value runtime
//!
//! This module defines all error types used throughout the runtime.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! ## Error Kinds
//!
//! Value types only ever raise two kinds of error:
//! - **Binding**: a read, comparison, log or marshal touched an unbound value
//! - **Marshalling**: a transfer buffer held data inconsistent with the
//!   expected type, or the type cannot be transferred at all
//!
//! The remaining variants belong to the runtime layer (configuration,
//! module lifecycle, I/O).

use std::io;
use thiserror::Error;

/// Result type alias for runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the TTCN value runtime
#[derive(Debug, Error)]
pub enum Error {
    /// A value was used while unbound
    #[error("Binding error: {0}")]
    Binding(String),

    /// Transfer buffer data was malformed, truncated or not transferable
    #[error("Marshalling error: {0}")]
    Marshalling(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Module lifecycle hook or execution failure
    #[error("Module error: {0}")]
    Module(String),

    /// I/O error (configuration file access)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create a binding error
    pub fn binding(msg: impl Into<String>) -> Self {
        Error::Binding(msg.into())
    }

    /// Create a marshalling error
    pub fn marshalling(msg: impl Into<String>) -> Self {
        Error::Marshalling(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a module error
    pub fn module(msg: impl Into<String>) -> Self {
        Error::Module(msg.into())
    }

    /// Check if this is a binding error
    pub fn is_binding(&self) -> bool {
        matches!(self, Error::Binding(_))
    }

    /// Check if this is a marshalling error
    pub fn is_marshalling(&self) -> bool {
        matches!(self, Error::Marshalling(_))
    }
}
