//! Error kinds for mindmap operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Match on `ErrorKind` to tell a bad palette entry apart from a bad input
/// document or a failed render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// Invalid configuration or parameters
    ConfigInvalid,

    // =========================================================================
    // Core errors
    // =========================================================================
    /// A color string is not `#RRGGBB`
    InvalidColorFormat,

    /// The top level of a document is not a mapping
    InvalidDocumentShape,

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
    // Serialization errors
    // =========================================================================
    /// Deserialization of an input document or config failed
    DeserializationFailed,

    /// Input file has an extension no loader understands
    UnsupportedFormat,

    // =========================================================================
    // Rendering errors
    // =========================================================================
    /// The external renderer failed or could not be started
    RenderFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}
