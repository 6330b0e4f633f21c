// opus/summary.rs
//! Lightweight serializable digest of a block-directory file.
//!
//! A [`FileSummary`] records where every block sits and what it is, without
//! retaining any payload bytes. Archives of instrument files can be
//! catalogued from summaries alone and the expensive buffers re-read only
//! when a block's contents are actually needed.

use crate::opus::block::Block;
use crate::opus::directory::BlockDirectory;
use crate::{Error, Result};

/// Position and identity of one block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockSummary {
    /// Position of the block's definition in the directory, dummies included.
    pub definition_index: usize,
    /// Type code from the directory entry.
    pub block_type: u32,
    /// Three-letter block name, when the block starts with one.
    pub name: Option<String>,
    /// First byte of the block inside the file.
    pub offset: usize,
    /// Block size in bytes (after clamping to the file).
    pub size: usize,
}

/// Digest of every instantiable block in a file buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FileSummary {
    pub blocks: Vec<BlockSummary>,
}

impl FileSummary {
    /// Parse the directory in `buf` and summarize its blocks.
    ///
    /// Directory scan errors are not fatal to the summary; the blocks parsed
    /// before any damage are still reported.
    pub fn from_buffer(buf: &[u8]) -> Self {
        let directory = BlockDirectory::parse(buf);
        Self::from_blocks(&directory.instantiate(buf))
    }

    /// Summarize already-instantiated blocks.
    pub fn from_blocks(blocks: &[Block<'_>]) -> Self {
        let blocks = blocks
            .iter()
            .map(|block| BlockSummary {
                definition_index: block.definition_index,
                block_type: block.block_type,
                name: block
                    .name
                    .map(|name| name.iter().map(|&b| b as char).collect()),
                offset: block.start,
                size: block.size(),
            })
            .collect();
        Self { blocks }
    }

    /// Serialize the summary to a JSON string.
    ///
    /// Requires the `serde` and `serde_json` features.
    #[cfg(feature = "serde_json")]
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::SummarySerializationError(e.to_string()))
    }

    /// Deserialize a summary from a JSON string.
    ///
    /// Requires the `serde` and `serde_json` features.
    #[cfg(feature = "serde_json")]
    pub fn from_json_string(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::SummarySerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opus::directory::DIRECTORY_OFFSET;

    #[test]
    fn summary_mirrors_blocks() {
        let offset = DIRECTORY_OFFSET + 2 * 12;
        let mut buf = vec![0u8; DIRECTORY_OFFSET];
        buf.extend_from_slice(&4u32.to_le_bytes());
        buf.extend_from_slice(&1u32.to_le_bytes());
        buf.extend_from_slice(&(offset as u32).to_le_bytes());
        buf.extend_from_slice(&[0u8; 12]);
        buf.extend_from_slice(b"AWL\0");

        let summary = FileSummary::from_buffer(&buf);
        assert_eq!(summary.blocks.len(), 1);
        let block = &summary.blocks[0];
        assert_eq!(block.block_type, 4);
        assert_eq!(block.name.as_deref(), Some("AWL"));
        assert_eq!(block.offset, offset);
        assert_eq!(block.size, 4);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn json_roundtrip() {
        let summary = FileSummary {
            blocks: vec![BlockSummary {
                definition_index: 2,
                block_type: 7,
                name: None,
                offset: 96,
                size: 16,
            }],
        };
        let json = summary.to_json_string().unwrap();
        assert_eq!(FileSummary::from_json_string(&json).unwrap(), summary);
    }
}
