// foss/records/mod.rs
//! The fixed-size binary records that make up an instrument data file.
//!
//! Every record is a stateless value type: construct it, call
//! [`to_bytes`](GeneralHeader::to_bytes), discard it. Byte-level encoding
//! never fails — any in-range field value encodes — so the encoders return
//! plain `Vec<u8>`; the single degradable case (more constituent values than
//! the block can hold) truncates with a warning. Each record also parses
//! back from bytes, where a short buffer is the only structural failure.

mod constituent_block;
mod data_block;
mod general_header;
mod instrument_header;
mod sample_header;
mod sample_info;

pub use constituent_block::{CONSTITUENT_BLOCK_SIZE, ConstituentValues, MAX_CONSTITUENTS};
pub use data_block::{DATA_BLOCK_ALIGN, SpectralData};
pub use general_header::{GENERAL_HEADER_SIZE, GeneralHeader};
pub use instrument_header::{
    CONSTITUENT_NAME_SIZE, CONSTITUENT_NAME_SLOTS, INSTRUMENT_HEADER_SIZE, InstrumentHeader,
    SEGMENT_SLOTS, WAVELENGTH_SLOTS,
};
pub use sample_header::{SAMPLE_HEADER_SIZE, SampleHeader};
pub use sample_info::{SAMPLE_INFO_SIZE, SampleInfo};

use crate::{Error, Result};

/// Reject buffers shorter than a record's fixed size.
#[inline]
pub(crate) fn check_record_len(bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() < expected {
        return Err(Error::TooShortBuffer {
            actual: bytes.len(),
            expected,
            file: file!(),
            line: line!(),
        });
    }
    Ok(())
}
