// foss/records/data_block.rs
use super::check_record_len;
use crate::Result;
use crate::bytes::f32_be_bytes;
use alloc::vec::Vec;

/// Spectral data blocks are padded with trailing zeros to this alignment.
pub const DATA_BLOCK_ALIGN: usize = 128;

/// Spectral data block - the amplitudes of one spectrum.
///
/// Amplitudes are encoded as MSB-first 32-bit floats, concatenated, then
/// zero-padded up to the next multiple of 128 bytes. The point count is not
/// stored in the block itself; it lives in the general header, so decoding
/// needs it passed back in.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpectralData {
    pub amplitudes: Vec<f32>,
}

impl SpectralData {
    pub fn new(amplitudes: Vec<f32>) -> Self {
        Self { amplitudes }
    }

    /// Size of the encoded block for `point_count` amplitudes, padding
    /// included.
    pub fn encoded_len(point_count: usize) -> usize {
        (point_count * 4).div_ceil(DATA_BLOCK_ALIGN) * DATA_BLOCK_ALIGN
    }

    /// Serialize the amplitudes, zero-padded to the block alignment.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(Self::encoded_len(self.amplitudes.len()));
        for amplitude in &self.amplitudes {
            buf.extend_from_slice(&f32_be_bytes(*amplitude));
        }
        buf.resize(Self::encoded_len(self.amplitudes.len()), 0);
        buf
    }

    /// Parse a block of `point_count` amplitudes.
    ///
    /// `bytes` must hold at least the padded block; trailing padding is
    /// ignored.
    pub fn from_bytes(bytes: &[u8], point_count: usize) -> Result<Self> {
        check_record_len(bytes, Self::encoded_len(point_count))?;
        let amplitudes = bytes[..point_count * 4]
            .chunks_exact(4)
            .map(|chunk| f32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        Ok(Self { amplitudes })
    }
}
