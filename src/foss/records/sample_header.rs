// foss/records/sample_header.rs
use super::check_record_len;
use crate::Result;
use crate::bytes::{PackedDate, epoch_seconds_le, put_cstr, read_cstr};
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// Sample header size (256 bytes) - per-sample identity and bookkeeping.
pub const SAMPLE_HEADER_SIZE: usize = 256;

/// Sample header - one per spectrum in an instrument data file.
///
/// # Structure (256 bytes total):
/// - Sample number: 13 bytes, zero-terminated
/// - Sequence number: 2 bytes
/// - Deleted flag: 2 bytes
/// - Packed date: 2 bytes
/// - Product code: 2 bytes
/// - Client: 8 bytes, zero-terminated
/// - Sample id 1/2/3: 51 bytes each at offsets 29/79/129
/// - Operator: 21 bytes, zero-terminated
/// - Standardized flag: 2 bytes
/// - Epoch-seconds timestamp: 4 bytes
/// - Padding to 256 bytes
///
/// The three ID fields overlap by one byte each: 51-byte fields laid out at
/// 29/79/129. Writing them in order lets each field's first byte overwrite
/// the previous field's forced terminator, so an ID that fills its field runs
/// straight into the next one when read back. That is the on-disk layout of
/// the format and is reproduced here, not repaired.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleHeader {
    pub sample_number: String,
    pub sequence: u16,
    pub deleted: bool,
    pub date: PackedDate,
    pub product_code: u16,
    pub client: String,
    pub sample_id1: String,
    pub sample_id2: String,
    pub sample_id3: String,
    pub operator: String,
    /// Set when the spectrum has been through the standardization transform.
    pub standardized: bool,
    /// Whole seconds since the Unix epoch.
    pub timestamp: u32,
}

impl SampleHeader {
    /// Serialize to the fixed 256-byte on-disk form.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; SAMPLE_HEADER_SIZE];
        put_cstr(&mut buf, 0, 13, &self.sample_number);
        buf[13..15].copy_from_slice(&self.sequence.to_le_bytes());
        buf[15..17].copy_from_slice(&(self.deleted as u16).to_le_bytes());
        buf[17..19].copy_from_slice(&self.date.to_bytes());
        buf[19..21].copy_from_slice(&self.product_code.to_le_bytes());
        put_cstr(&mut buf, 21, 8, &self.client);
        // The overlapping ID fields, in layout order.
        put_cstr(&mut buf, 29, 51, &self.sample_id1);
        put_cstr(&mut buf, 79, 51, &self.sample_id2);
        put_cstr(&mut buf, 129, 51, &self.sample_id3);
        put_cstr(&mut buf, 180, 21, &self.operator);
        buf[201..203].copy_from_slice(&(self.standardized as u16).to_le_bytes());
        buf[203..207].copy_from_slice(&epoch_seconds_le(self.timestamp));
        debug_assert_eq!(buf.len(), SAMPLE_HEADER_SIZE);
        buf
    }

    /// Parse from the fixed 256-byte on-disk form.
    ///
    /// The ID fields are read as plain zero-terminated strings, so an
    /// un-terminated ID written by the overlap quirk reads back with the next
    /// field's text appended - exactly what the format's native readers see.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_record_len(bytes, SAMPLE_HEADER_SIZE)?;
        let bytes = &bytes[..SAMPLE_HEADER_SIZE];
        Ok(Self {
            sample_number: read_cstr(&bytes[..13], 0),
            sequence: u16::from_le_bytes([bytes[13], bytes[14]]),
            deleted: u16::from_le_bytes([bytes[15], bytes[16]]) != 0,
            date: PackedDate::from_bytes([bytes[17], bytes[18]]),
            product_code: u16::from_le_bytes([bytes[19], bytes[20]]),
            client: read_cstr(&bytes[..29], 21),
            sample_id1: read_cstr(bytes, 29),
            sample_id2: read_cstr(bytes, 79),
            sample_id3: read_cstr(bytes, 129),
            operator: read_cstr(&bytes[..201], 180),
            standardized: u16::from_le_bytes([bytes[201], bytes[202]]) != 0,
            timestamp: u32::from_le_bytes([bytes[203], bytes[204], bytes[205], bytes[206]]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn header() -> SampleHeader {
        SampleHeader {
            sample_number: "000123".to_string(),
            sequence: 7,
            deleted: false,
            date: PackedDate::new(2004, 12, 1),
            product_code: 42,
            client: "lab 3".to_string(),
            sample_id1: "wheat hrw".to_string(),
            sample_id2: "bin 17".to_string(),
            sample_id3: "rep 2".to_string(),
            operator: "jdoe".to_string(),
            standardized: true,
            timestamp: 1_101_900_000,
        }
    }

    #[test]
    fn roundtrip_with_short_ids() {
        let original = header();
        let parsed = SampleHeader::from_bytes(&original.to_bytes()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn id_fields_overlap_by_one_byte() {
        let mut h = header();
        // 50 characters exactly fill id1's usable space; its forced
        // terminator at offset 79 is then overwritten by id2's first byte.
        h.sample_id1 = "x".repeat(50);
        h.sample_id2 = "SECOND".to_string();
        let bytes = h.to_bytes();
        assert_eq!(bytes[78], b'x');
        assert_eq!(bytes[79], b'S');

        let parsed = SampleHeader::from_bytes(&bytes).unwrap();
        let mut expected = h.sample_id1.clone();
        expected.push_str("SECOND");
        assert_eq!(parsed.sample_id1, expected);
        assert_eq!(parsed.sample_id2, "SECOND");
    }

    #[test]
    fn flags_encode_as_u16() {
        let mut h = header();
        h.deleted = true;
        let bytes = h.to_bytes();
        assert_eq!(u16::from_le_bytes([bytes[15], bytes[16]]), 1);
        assert_eq!(u16::from_le_bytes([bytes[201], bytes[202]]), 1);
    }

    #[test]
    fn short_buffer_is_rejected() {
        assert!(SampleHeader::from_bytes(&[0u8; 255]).is_err());
    }
}
