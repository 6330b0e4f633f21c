// opus/directory.rs
//! Parsing of the block directory at the head of an OPUS file.

use crate::{Error, bytes::read_u32_le};
use alloc::vec::Vec;

/// Byte offset where the block directory starts.
pub const DIRECTORY_OFFSET: usize = 36;

/// Default upper bound on the directory scan, in bytes from the start of the
/// buffer.
///
/// This is a conservative safety bound, not a format guarantee; files with
/// unusually long directories can be parsed with
/// [`BlockDirectory::parse_with_limit`].
pub const DEFAULT_MAX_HEADER_LEN: usize = 500;

/// Size of one directory entry: three little-endian u32 values.
pub const DIRECTORY_ENTRY_SIZE: usize = 12;

/// Reserved block type marking a placeholder directory entry. Dummy entries
/// occupy a directory slot but describe no block.
pub const DUMMY_BLOCK_TYPE: u32 = 0;

/// One entry of the block directory.
///
/// Lengths are stored in 4-byte units on disk; `length_in_bytes` is the
/// pre-multiplied convenience value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockDefinition {
    /// Type code of the described block.
    pub block_type: u32,
    /// Block length in 4-byte units, as stored.
    pub length_in_units: u32,
    /// Block length in bytes (`length_in_units * 4`).
    pub length_in_bytes: u32,
    /// Byte offset of the block inside the file buffer.
    pub offset: u32,
}

/// The parsed block directory: every accepted definition, plus any structural
/// errors hit along the way.
///
/// The scan is best-effort by design: a directory that ends mid-entry still
/// yields the definitions parsed before the damage, with the failure recorded
/// in `errors` for the caller to log or escalate.
#[derive(Debug, Default)]
pub struct BlockDirectory {
    /// Accepted entries, in directory order (dummy entries included).
    pub definitions: Vec<BlockDefinition>,
    /// Structural failures encountered during the scan.
    pub errors: Vec<Error>,
}

impl BlockDirectory {
    /// Parse the directory with the default scan bound.
    pub fn parse(buf: &[u8]) -> Self {
        Self::parse_with_limit(buf, DEFAULT_MAX_HEADER_LEN)
    }

    /// Parse the directory, scanning entries from [`DIRECTORY_OFFSET`] up to
    /// `max_header_len` bytes from the start of the buffer.
    ///
    /// Twelve-byte entries are read until the first zero-length entry (the
    /// terminator, accepted silently) or until the cursor reaches the bound.
    /// A buffer that ends mid-directory without a terminator records a
    /// [`Error::TooShortBuffer`] and stops.
    pub fn parse_with_limit(buf: &[u8], max_header_len: usize) -> Self {
        let mut definitions = Vec::new();
        let mut errors = Vec::new();

        let mut cursor = DIRECTORY_OFFSET;
        while cursor < max_header_len {
            let (Some(block_type), Some(length), Some(offset)) = (
                read_u32_le(buf, cursor),
                read_u32_le(buf, cursor + 4),
                read_u32_le(buf, cursor + 8),
            ) else {
                errors.push(Error::TooShortBuffer {
                    actual: buf.len(),
                    expected: cursor + DIRECTORY_ENTRY_SIZE,
                    file: file!(),
                    line: line!(),
                });
                break;
            };

            let length_in_units = length as u32;
            if length_in_units == 0 {
                break;
            }

            definitions.push(BlockDefinition {
                block_type: block_type as u32,
                length_in_units,
                // Hostile lengths cap instead of overflowing; block ends are
                // clamped to the buffer when instantiated anyway.
                length_in_bytes: length_in_units.saturating_mul(4),
                offset: offset as u32,
            });
            cursor += DIRECTORY_ENTRY_SIZE;
        }

        Self {
            definitions,
            errors,
        }
    }

    /// Number of accepted definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
