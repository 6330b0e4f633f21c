// foss/records/general_header.rs
use super::check_record_len;
use crate::Result;
use crate::bytes::{PackedDate, epoch_seconds_le, put_cstr, read_cstr};
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// General header size (128 bytes) - file-level counts and identity at offset 0.
pub const GENERAL_HEADER_SIZE: usize = 128;

/// General header - the first record of an instrument data file.
///
/// # Structure (128 bytes total):
/// - File type code: 2 bytes
/// - Live spectrum count: 2 bytes
/// - Deleted spectrum count: 2 bytes
/// - Datapoint count: 2 bytes
/// - Constituent count: 2 bytes
/// - Packed creation date: 2 bytes
/// - Epoch-seconds timestamp: 4 bytes
/// - Most-recent flag: 2 bytes
/// - File id: 71 bytes, zero-terminated
/// - Serial number: 9 bytes, zero-terminated
/// - Comment: 30 bytes, zero-terminated
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneralHeader {
    pub file_type: u16,
    /// Number of live (non-deleted) spectra in the file.
    pub live_count: u16,
    /// Number of spectra flagged deleted but still on disk.
    pub deleted_count: u16,
    pub point_count: u16,
    pub constituent_count: u16,
    pub created: PackedDate,
    /// Whole seconds since the Unix epoch.
    pub timestamp: u32,
    /// Set when this file is the most recent of its product line.
    pub most_recent: bool,
    pub file_id: String,
    pub serial_number: String,
    pub comment: String,
}

impl GeneralHeader {
    /// Serialize to the fixed 128-byte on-disk form.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; GENERAL_HEADER_SIZE];
        buf[0..2].copy_from_slice(&self.file_type.to_le_bytes());
        buf[2..4].copy_from_slice(&self.live_count.to_le_bytes());
        buf[4..6].copy_from_slice(&self.deleted_count.to_le_bytes());
        buf[6..8].copy_from_slice(&self.point_count.to_le_bytes());
        buf[8..10].copy_from_slice(&self.constituent_count.to_le_bytes());
        buf[10..12].copy_from_slice(&self.created.to_bytes());
        buf[12..16].copy_from_slice(&epoch_seconds_le(self.timestamp));
        buf[16..18].copy_from_slice(&(self.most_recent as u16).to_le_bytes());
        put_cstr(&mut buf, 18, 71, &self.file_id);
        put_cstr(&mut buf, 89, 9, &self.serial_number);
        put_cstr(&mut buf, 98, 30, &self.comment);
        debug_assert_eq!(buf.len(), GENERAL_HEADER_SIZE);
        buf
    }

    /// Parse from the fixed 128-byte on-disk form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_record_len(bytes, GENERAL_HEADER_SIZE)?;
        let bytes = &bytes[..GENERAL_HEADER_SIZE];
        Ok(Self {
            file_type: u16::from_le_bytes([bytes[0], bytes[1]]),
            live_count: u16::from_le_bytes([bytes[2], bytes[3]]),
            deleted_count: u16::from_le_bytes([bytes[4], bytes[5]]),
            point_count: u16::from_le_bytes([bytes[6], bytes[7]]),
            constituent_count: u16::from_le_bytes([bytes[8], bytes[9]]),
            created: PackedDate::from_bytes([bytes[10], bytes[11]]),
            timestamp: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
            most_recent: u16::from_le_bytes([bytes[16], bytes[17]]) != 0,
            file_id: read_cstr(bytes, 18),
            serial_number: read_cstr(bytes, 89),
            comment: read_cstr(bytes, 98),
        })
    }
}
