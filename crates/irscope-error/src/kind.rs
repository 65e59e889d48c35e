//! Error kinds for irscope operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on this to decide whether to show an empty view, ask for a
/// different input, or bail out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// Invalid configuration file or values
    ConfigInvalid,

    /// Invalid argument passed to a function or on the command line
    InvalidArgument,

    // =========================================================================
    // Dump errors
    // =========================================================================
    /// The dump is not well-formed JSON or misses required fields
    ParseFailed,

    /// The requested pass does not exist in the dump
    PassNotFound,

    /// The selected pass carries no data for the requested view
    ViewUnavailable,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Output errors
    // =========================================================================
    /// Serialization of a display graph failed
    SerializationFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Whether the error stems from user input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ErrorKind::ConfigInvalid
                | ErrorKind::InvalidArgument
                | ErrorKind::ParseFailed
                | ErrorKind::PassNotFound
                | ErrorKind::ViewUnavailable
        )
    }
}
