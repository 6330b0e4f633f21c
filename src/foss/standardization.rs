// foss/standardization.rs
//! Reader for standardization (calibration) files and the per-wavelength
//! linear transform they describe.
//!
//! A standardization file maps every datapoint of an instrument to a
//! `(coefficient, intercept)` pair; standardizing a raw spectrum is the
//! elementwise linear transform `y = x * coefficient + intercept`, and
//! unstandardizing is its inverse. The file's defining quirk is how the
//! pairs are stored: each value is a 4-byte little-endian *integer* whose bit
//! pattern is an IEEE-754 single — reading the bytes directly as a float
//! would apply the wrong byte order.

use crate::bytes::{f32_from_u32_bits, read_u8, read_u16_le, read_u32_le};
use crate::{Error, Result};
use alloc::vec::Vec;

/// Offset of the 2-byte little-endian datapoint count.
pub const DATAPOINT_COUNT_OFFSET: usize = 0x18;

/// Offset of the segment-count byte.
pub const SEGMENT_COUNT_OFFSET: usize = 0x280;

/// Base offset of the calibration data for single-segment instruments.
pub const SINGLE_SEGMENT_BASE: usize = 0x2a0;

/// Base offset of the calibration data for dual-segment instruments.
pub const DUAL_SEGMENT_BASE: usize = 0x2b4;

/// A parsed standardization table.
///
/// Constructed once from a file buffer and immutable thereafter; the
/// coefficient and intercept arrays always have `datapoint_count` elements.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StandardizationTable {
    /// Segment-count byte from the file (1 or 2).
    pub segment_count: u8,
    /// Number of datapoints per spectrum.
    pub datapoint_count: u16,
    /// Per-datapoint multiplier.
    pub coefficients: Vec<f64>,
    /// Per-datapoint offset.
    pub intercepts: Vec<f64>,
}

impl StandardizationTable {
    /// Parse a standardization file.
    ///
    /// The segment-count byte selects which of two fixed layouts locates the
    /// calibration data; any value other than 1 or 2 is
    /// [`Error::UnsupportedSegmentCount`] — no silent fallback. Intercepts
    /// start at `base + datapoint_count * 4 + 16` and coefficients follow
    /// immediately after.
    pub fn read(buf: &[u8]) -> Result<Self> {
        let datapoint_count = read_u16_le(buf, DATAPOINT_COUNT_OFFSET)
            .ok_or_else(|| too_short(buf, DATAPOINT_COUNT_OFFSET + 2))?;
        let segment_count =
            read_u8(buf, SEGMENT_COUNT_OFFSET).ok_or_else(|| too_short(buf, SEGMENT_COUNT_OFFSET + 1))?;

        let base = match segment_count {
            1 => SINGLE_SEGMENT_BASE,
            2 => DUAL_SEGMENT_BASE,
            n => return Err(Error::UnsupportedSegmentCount(n)),
        };

        let count = datapoint_count as usize;
        let intercept_offset = base + count * 4 + 16;
        let coefficient_offset = intercept_offset + count * 4;

        let intercepts = read_encoded_floats(buf, intercept_offset, count)?;
        let coefficients = read_encoded_floats(buf, coefficient_offset, count)?;

        Ok(Self {
            segment_count,
            datapoint_count,
            coefficients,
            intercepts,
        })
    }

    /// Apply the forward transform: `raw[i] * coefficients[i] + intercepts[i]`.
    ///
    /// Fails with [`Error::LengthMismatch`] when `raw` does not match the
    /// table; no partial result is produced.
    pub fn standardize(&self, raw: &[f64]) -> Result<Vec<f64>> {
        self.check_shape(raw.len())?;
        Ok(raw
            .iter()
            .zip(self.coefficients.iter().zip(&self.intercepts))
            .map(|(x, (a, b))| x * a + b)
            .collect())
    }

    /// Apply the inverse transform: `(values[i] - intercepts[i]) / coefficients[i]`.
    ///
    /// A zero coefficient divides to ±infinity or NaN per ordinary IEEE-754
    /// semantics; that is passed through, not guarded.
    pub fn unstandardize(&self, values: &[f64]) -> Result<Vec<f64>> {
        self.check_shape(values.len())?;
        Ok(values
            .iter()
            .zip(self.coefficients.iter().zip(&self.intercepts))
            .map(|(y, (a, b))| (y - b) / a)
            .collect())
    }

    fn check_shape(&self, actual: usize) -> Result<()> {
        let expected = self.coefficients.len();
        if actual != expected {
            return Err(Error::LengthMismatch { expected, actual });
        }
        Ok(())
    }
}

/// Read `count` calibration values: 4-byte LE integers bit-reinterpreted as
/// IEEE-754 singles, widened to `f64`.
fn read_encoded_floats(buf: &[u8], offset: usize, count: usize) -> Result<Vec<f64>> {
    let mut values = Vec::with_capacity(count);
    for i in 0..count {
        let position = offset + i * 4;
        let bits = read_u32_le(buf, position).ok_or_else(|| too_short(buf, position + 4))?;
        values.push(f32_from_u32_bits(bits));
    }
    Ok(values)
}

fn too_short(buf: &[u8], expected: usize) -> Error {
    Error::TooShortBuffer {
        actual: buf.len(),
        expected,
        file: file!(),
        line: line!(),
    }
}
