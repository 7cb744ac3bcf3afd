//! Error context utilities
//!
//! Helpers for attaching context to foreign errors and for applying the
//! severity-based recovery policy in one place.

use crate::error::types::ErrorSeverity;
use crate::error::{DsmError, Result};
use std::path::Path;

/// Extension trait for Result to add context to errors
pub trait ResultExt<T, E> {
    /// Add context to an error with a custom message
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;

    /// Add file context to an error; a permission problem anywhere in the
    /// source chain becomes `PermissionDenied`
    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|err| DsmError::Analysis {
            message: format!("{}: {}", context(), err),
        })
    }

    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|err| {
            let mut current: Option<&(dyn std::error::Error + 'static)> = Some(&err);
            while let Some(cause) = current {
                if let Some(io_err) = cause.downcast_ref::<std::io::Error>() {
                    if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                        return DsmError::permission_denied(path.as_ref());
                    }
                }
                current = cause.source();
            }

            DsmError::discovery_error(path.as_ref(), err.to_string())
        })
    }
}

/// Handle an error based on its severity
///
/// - Warning: log and return None
/// - Error: log and return None
/// - Critical: log and return Some(error)
pub fn handle_error(err: DsmError) -> Option<DsmError> {
    let message = err.user_message();

    match err.severity() {
        ErrorSeverity::Warning => {
            tracing::warn!("{}", message);
            None
        }
        ErrorSeverity::Error => {
            tracing::error!("{}", message);
            None
        }
        ErrorSeverity::Critical => {
            tracing::error!("critical: {}", message);
            Some(err)
        }
    }
}

/// Extension trait for Option to convert to Result with a custom error
pub trait OptionExt<T> {
    /// Convert Option to Result with a custom error
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> DsmError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> DsmError,
    {
        self.ok_or_else(err_fn)
    }
}
