//! Custom error types for the rip-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
///
/// Every variant is terminal for the current file's import: the pipeline
/// surfaces the first error encountered and aborts that file. A batch driver
/// catches per-file errors and continues with the next file.
#[derive(Debug, Error)]
pub enum RipError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The file's magic number does not match the RIP signature.
    #[error("Bad signature: expected {expected:#010x}, got {actual:#010x}")]
    BadSignature { expected: u32, actual: u32 },

    /// The declared format version is not the one supported revision.
    #[error("Unsupported RIP version: expected {expected}, got {actual}")]
    UnsupportedVersion { expected: u32, actual: u32 },

    /// A vertex-attribute descriptor is structurally invalid.
    #[error("Malformed vertex attribute: {0}")]
    MalformedAttribute(String),

    /// A read ran past the end of the byte source.
    #[error(
        "Truncated input: needed {needed} bytes at offset {offset}, only {available} available"
    )]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The decoded buffers do not form a complete renderable mesh.
    #[error("Incomplete geometry: {0}")]
    IncompleteGeometry(String),
}

/// A convenience `Result` type alias using the crate's `RipError` type.
pub type Result<T> = std::result::Result<T, RipError>;
