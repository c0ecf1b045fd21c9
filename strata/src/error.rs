//! Error types for Strata
//!
//! This module defines the error types used by the render target core and
//! its backends (native object creation, memory allocation, misuse).

use std::fmt;

/// Result type for Strata operations
pub type Result<T> = std::result::Result<T, Error>;

/// Strata errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (a native Vulkan call failed)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource request (bad layer count, bad parameters)
    InvalidResource(String),

    /// Backend initialization failed (no usable depth format, etc.)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an error and build an `Error::BackendError` from the same message
///
/// # Example
///
/// ```no_run
/// # fn create() -> Result<(), ()> { Err(()) }
/// let r = create().map_err(|e| strata::strata_err!("strata::vulkan", "Failed to create image: {:?}", e));
/// ```
#[macro_export]
macro_rules! strata_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        $crate::Error::BackendError(message)
    }};
}

/// Log an error and return `Err(Error::InvalidResource)` from the enclosing function
#[macro_export]
macro_rules! strata_bail {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            message.clone(),
            file!(),
            line!()
        );
        return Err($crate::Error::InvalidResource(message));
    }};
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
