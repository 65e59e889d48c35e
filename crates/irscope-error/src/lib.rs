//! # irscope-error
//!
//! Unified error handling for irscope.
//!
//! The graph transformation core never fails on malformed graph content: unknown
//! kinds, missing references and absent roots all degrade to partial output. Errors
//! only exist at the edges of the system, i.e. reading a dump, decoding its JSON,
//! reading a config file or picking a pass/view that does not exist.
//!
//! - **ErrorKind**: what went wrong (e.g. ParseFailed, PassNotFound)
//! - **Context**: operation name plus key/value pairs that locate the cause
//! - **Source**: the wrapped underlying error, never leaked as a raw type
//!
//! ## Usage
//!
//! ```rust
//! use irscope_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::ParseFailed, "expected value at line 1")
//!         .with_operation("load::from_json")
//!         .with_context("path", "dump.json"))
//! }
//! ```

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using irscope Error
pub type Result<T> = std::result::Result<T, Error>;
