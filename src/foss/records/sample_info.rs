// foss/records/sample_info.rs
use super::check_record_len;
use crate::Result;
use crate::bytes::{put_cstr, read_cstr};
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// Sample info record size (16 bytes).
pub const SAMPLE_INFO_SIZE: usize = 16;

/// Sample info - the compact companion record to a [`SampleHeader`].
///
/// One record per sample, small enough to scan an archive's index without
/// touching the spectra. Layout: sample id (12 bytes, zero-terminated),
/// sequence number (2 bytes), deleted flag (2 bytes).
///
/// [`SampleHeader`]: super::SampleHeader
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleInfo {
    pub sample_id: String,
    pub sequence: u16,
    pub deleted: bool,
}

impl SampleInfo {
    /// Serialize to the fixed 16-byte on-disk form.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; SAMPLE_INFO_SIZE];
        put_cstr(&mut buf, 0, 12, &self.sample_id);
        buf[12..14].copy_from_slice(&self.sequence.to_le_bytes());
        buf[14..16].copy_from_slice(&(self.deleted as u16).to_le_bytes());
        buf
    }

    /// Parse from the fixed 16-byte on-disk form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_record_len(bytes, SAMPLE_INFO_SIZE)?;
        Ok(Self {
            sample_id: read_cstr(&bytes[..12], 0),
            sequence: u16::from_le_bytes([bytes[12], bytes[13]]),
            deleted: u16::from_le_bytes([bytes[14], bytes[15]]) != 0,
        })
    }
}
