//! FOSS-style fixed-offset calibration and instrument data files.
//!
//! Unlike the OPUS family, these files have no directory: every field lives
//! at a fixed byte offset. Two file kinds are covered:
//!
//! - the **standardization file**, a small calibration artifact holding
//!   per-wavelength coefficient/intercept pairs ([`standardization`]), and
//! - the **instrument data file**, assembled on the write side from a family
//!   of fixed-size records ([`records`], composed by [`writer`]).

pub mod records;
pub mod standardization;
pub mod writer;

pub use records::{
    ConstituentValues, GeneralHeader, InstrumentHeader, SampleHeader, SampleInfo, SpectralData,
};
pub use standardization::StandardizationTable;
pub use writer::{InstrumentFile, Sample};
