//! Error types for instrument file operations.
//!
//! This module defines the [`Error`] enum which represents all possible failures
//! that can occur when decoding or encoding instrument files.
//!
//! Two failure families are deliberately *not* errors and never appear here:
//! a tag or field that is simply absent from a block is reported as `None` by
//! the block accessors, and best-effort enrichment (embedded metadata, excess
//! constituent values) degrades with a warning instead of failing the
//! surrounding operation.

use core::fmt;

#[cfg(feature = "alloc")]
use alloc::string::String;

/// Errors that can occur while decoding or encoding instrument files.
///
/// Only unexpected *structure* is fatal: buffers shorter than a fixed layout
/// requires, unsupported mode bytes, mismatched array shapes. Unexpected byte
/// *content* always decodes to some value and is passed through.
#[derive(Debug)]
pub enum Error {
    /// Buffer provided for parsing was too small.
    ///
    /// This typically indicates a truncated file or an incomplete read.
    TooShortBuffer {
        /// Actual number of bytes available
        actual: usize,
        /// Minimum number of bytes required
        expected: usize,
        /// Source file where the error was detected
        file: &'static str,
        /// Line number where the error was detected
        line: u32,
    },

    /// The standardization file's segment-count byte selects a layout this
    /// library does not know.
    ///
    /// Only one- and two-segment files exist in the wild; anything else is
    /// rejected rather than guessed at.
    UnsupportedSegmentCount(u8),

    /// An input array did not match the shape of the calibration table.
    ///
    /// `standardize`/`unstandardize` refuse to produce a partially computed
    /// result when the raw spectrum and the coefficient arrays disagree.
    LengthMismatch {
        /// Number of elements the table expects
        expected: usize,
        /// Number of elements that were supplied
        actual: usize,
    },

    /// An embedded metadata string is structurally malformed (missing
    /// parentheses, brackets or braces).
    ///
    /// Callers that treat metadata as optional enrichment should go through
    /// [`EmbeddedMetadata::extract`](crate::opus::metadata::EmbeddedMetadata::extract),
    /// which downgrades this to a logged warning.
    MetadataSyntax(String),

    /// Failed to serialize a file summary.
    ///
    /// Only available with the `std` feature.
    #[cfg(feature = "std")]
    SummarySerializationError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TooShortBuffer {
                actual,
                expected,
                file,
                line,
            } => write!(
                f,
                "Buffer too small at {file}:{line}: need at least {expected} bytes, got {actual}"
            ),
            Error::UnsupportedSegmentCount(n) => {
                write!(f, "Unsupported segment count: expected 1 or 2, found {n}")
            }
            Error::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "Array length mismatch: table holds {expected} datapoints, input holds {actual}"
                )
            }
            Error::MetadataSyntax(s) => write!(f, "Malformed embedded metadata: {s}"),
            #[cfg(feature = "std")]
            Error::SummarySerializationError(s) => {
                write!(f, "Summary serialization error: {s}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A specialized Result type for instrument file operations.
///
/// This is defined as `core::result::Result<T, Error>` for convenience.
pub type Result<T> = core::result::Result<T, Error>;
