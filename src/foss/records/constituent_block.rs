// foss/records/constituent_block.rs
use super::check_record_len;
use crate::Result;
use crate::bytes::f32_be_bytes;
use alloc::vec;
use alloc::vec::Vec;
use log::warn;

/// Constituent-values block size (128 bytes).
pub const CONSTITUENT_BLOCK_SIZE: usize = 128;

/// Maximum number of constituent values one block can hold.
pub const MAX_CONSTITUENTS: usize = 32;

/// Constituent values - reference analysis results for one sample.
///
/// Up to 32 MSB-first 32-bit floats packed into a fixed 128-byte block.
/// Supplying more than 32 values is not an error: the extras are dropped
/// with a warning and the first 32 are written.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstituentValues {
    pub values: Vec<f32>,
}

impl ConstituentValues {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    /// Serialize to the fixed 128-byte on-disk form.
    pub fn to_bytes(&self) -> Vec<u8> {
        if self.values.len() > MAX_CONSTITUENTS {
            warn!(
                "constituent block holds {MAX_CONSTITUENTS} values, dropping {}",
                self.values.len() - MAX_CONSTITUENTS
            );
        }
        let mut buf = vec![0u8; CONSTITUENT_BLOCK_SIZE];
        for (i, value) in self.values.iter().take(MAX_CONSTITUENTS).enumerate() {
            buf[i * 4..i * 4 + 4].copy_from_slice(&f32_be_bytes(*value));
        }
        buf
    }

    /// Parse the first `count` values of a block.
    pub fn from_bytes(bytes: &[u8], count: usize) -> Result<Self> {
        check_record_len(bytes, CONSTITUENT_BLOCK_SIZE)?;
        let count = core::cmp::min(count, MAX_CONSTITUENTS);
        let values = bytes[..count * 4]
            .chunks_exact(4)
            .map(|chunk| f32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        Ok(Self { values })
    }
}
