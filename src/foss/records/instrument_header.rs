// foss/records/instrument_header.rs
use super::check_record_len;
use crate::Result;
use crate::bytes::{f32_be_bytes, put_cstr, read_cstr};
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use log::warn;

/// Instrument header size (256 + 512 bytes) - instrument geometry followed by
/// the constituent-name table.
pub const INSTRUMENT_HEADER_SIZE: usize = 768;

/// Number of per-segment point-count slots.
pub const SEGMENT_SLOTS: usize = 20;

/// Number of wavelength values: start/increment/end triples for up to seven
/// segments.
pub const WAVELENGTH_SLOTS: usize = 21;

/// Number of fixed-width constituent-name slots.
pub const CONSTITUENT_NAME_SLOTS: usize = 32;

/// Width of one constituent-name slot, terminator included.
pub const CONSTITUENT_NAME_SIZE: usize = 16;

/// Instrument header - the second record of an instrument data file.
///
/// The first 256 bytes describe the instrument and its wavelength geometry;
/// the following 512 bytes are the constituent-name table
/// (32 slots x 16 bytes, each zero-terminated).
///
/// # Structure (first 256 bytes):
/// - Instrument type code: 2 bytes
/// - Instrument name: 30 bytes, zero-terminated
/// - Serial number: 9 bytes, zero-terminated
/// - Software version: 13 bytes, zero-terminated
/// - Segment count: 2 bytes
/// - Per-segment point counts: 20 x 2 bytes
/// - Spacing mode code: 2 bytes
/// - Wavelength start/increment/end triples: 21 x 4 bytes, MSB-first floats
/// - End-of-curve count: 2 bytes
/// - Padding to 256 bytes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstrumentHeader {
    pub instrument_type: u16,
    pub name: String,
    pub serial_number: String,
    pub software_version: String,
    pub segment_count: u16,
    /// Datapoints per segment; unused slots stay zero.
    pub segment_points: [u16; SEGMENT_SLOTS],
    pub spacing_mode: u16,
    /// Wavelength start/increment/end triples; unused slots stay zero.
    pub wavelengths: [f32; WAVELENGTH_SLOTS],
    pub end_of_curve: u16,
    /// Constituent names, at most [`CONSTITUENT_NAME_SLOTS`]; extras are
    /// dropped with a warning when encoding.
    pub constituent_names: Vec<String>,
}

impl Default for InstrumentHeader {
    fn default() -> Self {
        Self {
            instrument_type: 0,
            name: String::new(),
            serial_number: String::new(),
            software_version: String::new(),
            segment_count: 0,
            segment_points: [0; SEGMENT_SLOTS],
            spacing_mode: 0,
            wavelengths: [0.0; WAVELENGTH_SLOTS],
            end_of_curve: 0,
            constituent_names: Vec::new(),
        }
    }
}

impl InstrumentHeader {
    /// Serialize to the fixed 768-byte on-disk form.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = vec![0u8; INSTRUMENT_HEADER_SIZE];
        buf[0..2].copy_from_slice(&self.instrument_type.to_le_bytes());
        put_cstr(&mut buf, 2, 30, &self.name);
        put_cstr(&mut buf, 32, 9, &self.serial_number);
        put_cstr(&mut buf, 41, 13, &self.software_version);
        buf[54..56].copy_from_slice(&self.segment_count.to_le_bytes());
        for (i, points) in self.segment_points.iter().enumerate() {
            let at = 56 + i * 2;
            buf[at..at + 2].copy_from_slice(&points.to_le_bytes());
        }
        buf[96..98].copy_from_slice(&self.spacing_mode.to_le_bytes());
        for (i, wavelength) in self.wavelengths.iter().enumerate() {
            let at = 98 + i * 4;
            buf[at..at + 4].copy_from_slice(&f32_be_bytes(*wavelength));
        }
        buf[182..184].copy_from_slice(&self.end_of_curve.to_le_bytes());

        if self.constituent_names.len() > CONSTITUENT_NAME_SLOTS {
            warn!(
                "instrument header holds {CONSTITUENT_NAME_SLOTS} constituent names, dropping {}",
                self.constituent_names.len() - CONSTITUENT_NAME_SLOTS
            );
        }
        for (i, name) in self
            .constituent_names
            .iter()
            .take(CONSTITUENT_NAME_SLOTS)
            .enumerate()
        {
            put_cstr(&mut buf, 256 + i * CONSTITUENT_NAME_SIZE, CONSTITUENT_NAME_SIZE, name);
        }

        debug_assert_eq!(buf.len(), INSTRUMENT_HEADER_SIZE);
        buf
    }

    /// Parse from the fixed 768-byte on-disk form.
    ///
    /// Trailing empty constituent-name slots are dropped so a header written
    /// with three names parses back with three.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        check_record_len(bytes, INSTRUMENT_HEADER_SIZE)?;
        let bytes = &bytes[..INSTRUMENT_HEADER_SIZE];

        let mut segment_points = [0u16; SEGMENT_SLOTS];
        for (i, points) in segment_points.iter_mut().enumerate() {
            let at = 56 + i * 2;
            *points = u16::from_le_bytes([bytes[at], bytes[at + 1]]);
        }
        let mut wavelengths = [0.0f32; WAVELENGTH_SLOTS];
        for (i, wavelength) in wavelengths.iter_mut().enumerate() {
            let at = 98 + i * 4;
            *wavelength =
                f32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
        }

        let mut constituent_names: Vec<String> = (0..CONSTITUENT_NAME_SLOTS)
            .map(|i| read_cstr(&bytes[..256 + (i + 1) * CONSTITUENT_NAME_SIZE], 256 + i * CONSTITUENT_NAME_SIZE))
            .collect();
        while constituent_names.last().is_some_and(|name| name.is_empty()) {
            constituent_names.pop();
        }

        Ok(Self {
            instrument_type: u16::from_le_bytes([bytes[0], bytes[1]]),
            name: read_cstr(&bytes[..32], 2),
            serial_number: read_cstr(&bytes[..41], 32),
            software_version: read_cstr(&bytes[..54], 41),
            segment_count: u16::from_le_bytes([bytes[54], bytes[55]]),
            segment_points,
            spacing_mode: u16::from_le_bytes([bytes[96], bytes[97]]),
            wavelengths,
            end_of_curve: u16::from_le_bytes([bytes[182], bytes[183]]),
            constituent_names,
        })
    }
}
