// opus/block.rs
//! Borrowed block views and tagged field lookup.

use crate::bytes::{find_tag, read_cstr, read_f64, read_u8, read_u32_le};
use crate::opus::directory::{BlockDirectory, DUMMY_BLOCK_TYPE};
use alloc::string::String;
use alloc::vec::Vec;
use log::warn;

/// A logical block: a read-only view over a sub-range of the shared file
/// buffer.
///
/// Blocks never copy the buffer; the only owning operation is
/// [`extract`](Self::extract). Field access is by 3-letter ASCII tag
/// (terminated by NUL on disk) or by explicit offset relative to the block
/// start. Absence of a tag is an expected, common case and is reported as
/// `None`, never as an error.
#[derive(Debug, Clone, Copy)]
pub struct Block<'a> {
    data: &'a [u8],
    /// Position of this block's definition in the original directory,
    /// including skipped dummy entries.
    pub definition_index: usize,
    /// First byte of the block (inclusive).
    pub start: usize,
    /// Last byte of the block (inclusive), clamped to the buffer.
    pub end: usize,
    /// Type code from the directory entry.
    pub block_type: u32,
    /// Three-letter block name, when the block starts with one.
    pub name: Option<[u8; 3]>,
}

impl BlockDirectory {
    /// Instantiate blocks over `buf` for every non-dummy definition.
    ///
    /// Each block spans `[offset, offset + length_in_bytes - 1]`, clamped so
    /// the end never exceeds the buffer. The definition's position in the
    /// original list is preserved as `definition_index` so callers can
    /// correlate blocks back to directory order. Definitions placed entirely
    /// past the end of the buffer are skipped with a warning.
    pub fn instantiate<'a>(&self, buf: &'a [u8]) -> Vec<Block<'a>> {
        let mut blocks = Vec::new();
        for (definition_index, def) in self.definitions.iter().enumerate() {
            if def.block_type == DUMMY_BLOCK_TYPE {
                continue;
            }
            let start = def.offset as usize;
            if start >= buf.len() {
                warn!(
                    "block {definition_index} (type {}) starts at {start}, past end of {}-byte buffer",
                    def.block_type,
                    buf.len()
                );
                continue;
            }
            let end = core::cmp::min(
                start.saturating_add(def.length_in_bytes as usize) - 1,
                buf.len() - 1,
            );
            blocks.push(Block {
                data: buf,
                definition_index,
                start,
                end,
                block_type: def.block_type,
                name: block_name(buf, start),
            });
        }
        blocks
    }
}

/// The three bytes at `start`, when all of them are ASCII letters.
fn block_name(buf: &[u8], start: usize) -> Option<[u8; 3]> {
    match buf.get(start..start + 3) {
        Some(&[a, b, c]) if [a, b, c].iter().all(u8::is_ascii_alphabetic) => Some([a, b, c]),
        _ => None,
    }
}

impl<'a> Block<'a> {
    /// Block size in bytes.
    pub fn size(&self) -> usize {
        self.end - self.start + 1
    }

    /// Owned copy of the block's byte range.
    pub fn extract(&self) -> Vec<u8> {
        self.data[self.start..=self.end].to_vec()
    }

    /// Locate `tag` inside this block.
    ///
    /// Delegates to the buffer-wide scan starting at the block start; a hit
    /// beyond the block's own end belongs to a later block and is reported as
    /// "not present here".
    pub fn find_tag(&self, tag: &[u8]) -> Option<usize> {
        let pos = find_tag(self.data, tag, self.start)?;
        if pos > self.end { None } else { Some(pos) }
    }

    /// Absolute buffer offset for a position relative to the block start, or
    /// `None` when it falls beyond the block's end.
    fn absolute(&self, relative: usize) -> Option<usize> {
        let pos = self.start.checked_add(relative)?;
        if pos > self.end { None } else { Some(pos) }
    }

    /// Byte at `relative` from the block start.
    pub fn u8_at(&self, relative: usize) -> Option<u8> {
        read_u8(self.data, self.absolute(relative)?)
    }

    /// Little-endian u32 (widened to u64) at `relative` from the block start.
    pub fn u32_at(&self, relative: usize) -> Option<u64> {
        read_u32_le(self.data, self.absolute(relative)?)
    }

    /// Double at `relative` from the block start.
    pub fn f64_at(&self, relative: usize) -> Option<f64> {
        read_f64(self.data, self.absolute(relative)?)
    }

    /// Zero-terminated text at `relative` from the block start.
    pub fn text_at(&self, relative: usize) -> Option<String> {
        Some(read_cstr(self.data, self.absolute(relative)?))
    }

    /// Byte at a fixed distance past `tag`.
    pub fn u8_after_tag(&self, tag: &[u8], delta: usize) -> Option<u8> {
        read_u8(self.data, self.find_tag(tag)? + delta)
    }

    /// Little-endian u32 (widened to u64) at a fixed distance past `tag`.
    pub fn u32_after_tag(&self, tag: &[u8], delta: usize) -> Option<u64> {
        read_u32_le(self.data, self.find_tag(tag)? + delta)
    }

    /// Double at a fixed distance past `tag`.
    pub fn f64_after_tag(&self, tag: &[u8], delta: usize) -> Option<f64> {
        read_f64(self.data, self.find_tag(tag)? + delta)
    }

    /// Zero-terminated text at a fixed distance past `tag`.
    pub fn text_after_tag(&self, tag: &[u8], delta: usize) -> Option<String> {
        Some(read_cstr(self.data, self.find_tag(tag)? + delta))
    }
}
