//! # mindmap-error
//!
//! Unified error handling for mindmap.
//!
//! - **ErrorKind**: what went wrong (e.g. `InvalidColorFormat`, `InvalidDocumentShape`)
//! - **Operation**: where it went wrong (e.g. `color::hex_to_rgb`)
//! - **Context**: key/value pairs that help locate the cause
//! - **Source**: the wrapped underlying error, if any
//!
//! ## Usage
//!
//! ```rust
//! use mindmap_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::InvalidColorFormat, "expected 6 hex digits")
//!         .with_operation("color::hex_to_rgb")
//!         .with_context("color", "#12345"))
//! }
//! ```
//!
//! Every failure is fatal to the operation that raised it; there is no retry
//! or partial-result policy. Callers only append context while propagating.

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using mindmap Error
pub type Result<T> = std::result::Result<T, Error>;
