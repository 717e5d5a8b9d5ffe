//! Error types for the bibliographic conversion pipeline.
//!
//! This module provides the [`BiblError`] type for all library operations
//! and the [`Result`] convenience type. Non-fatal parse warnings are *not*
//! modeled here — see [`crate::diagnostics`] for those; this enum is
//! reserved for the conditions in spec §7 that actually abort an operation.

use thiserror::Error;

/// Error type for all bibliographic conversion operations.
#[derive(Error, Debug)]
pub enum BiblError {
    /// An input or output format id did not resolve to a known reftype
    /// table. In practice only reachable via an internal table gap, since
    /// format identifiers are a closed enum; retained for parity with the
    /// source contract's `BadInput`.
    #[error("bad input: {0}")]
    BadInput(String),

    /// A file-backed source or sink could not be opened.
    #[error("cannot open {path}: {source}")]
    CantOpen {
        /// Path that failed to open.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Reserved for allocation-style failures. Safe Rust growth aborts the
    /// process rather than returning this, but the variant is kept for
    /// parity with the source's `MemErr` and for any future fallible-alloc
    /// entry point.
    #[error("allocation failed: {0}")]
    MemErr(String),

    /// A reference's structure could not be parsed at all (as opposed to
    /// a recoverable per-field warning, which goes through
    /// [`crate::diagnostics`] instead).
    #[error("parse error: {0}")]
    ParseError(String),

    /// IO error from the underlying source/destination.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience alias for [`std::result::Result`] with [`BiblError`].
pub type Result<T> = std::result::Result<T, BiblError>;
