#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

//! # nirfile-rs
//!
//! A Rust library for reading and writing NIR spectrometer instrument files.
//!
//! Near-infrared instruments ship their measurements in proprietary binary
//! files. This crate covers the two format families that matter in practice:
//!
//! - **OPUS-style block-directory files**: a table at a fixed offset lists
//!   typed blocks inside the buffer; blocks carry ASCII-tagged fields and
//!   sometimes an embedded command-line metadata string.
//! - **FOSS-style fixed-offset files**: standardization (calibration) files
//!   holding per-wavelength coefficient/intercept pairs, and instrument data
//!   files assembled from a family of fixed-size records.
//!
//! The crate is a pure byte-buffer transformation library: no I/O happens
//! here. Callers materialize the file into memory, hand over a slice, and
//! get structured records back (or hand over records and get bytes back).
//! Every operation is a pure function, so independent buffers can be
//! processed concurrently without locking.
//!
//! ## Quick Start
//!
//! ### Reading a block-directory file
//!
//! ```
//! use nirfile_rs::BlockDirectory;
//!
//! // A minimal file: one directory entry describing a four-byte block.
//! let mut buf = vec![0u8; 36];
//! buf.extend_from_slice(&1u32.to_le_bytes()); // block type
//! buf.extend_from_slice(&1u32.to_le_bytes()); // length in 4-byte units
//! buf.extend_from_slice(&60u32.to_le_bytes()); // offset
//! buf.extend_from_slice(&[0u8; 12]); // zero-length terminator entry
//! buf.extend_from_slice(b"DPF\0");
//!
//! let directory = BlockDirectory::parse(&buf);
//! let blocks = directory.instantiate(&buf);
//! assert_eq!(blocks.len(), 1);
//! assert_eq!(blocks[0].name, Some(*b"DPF"));
//! assert_eq!(blocks[0].size(), 4);
//! ```
//!
//! ### Writing an instrument data file
//!
//! ```
//! use nirfile_rs::{ConstituentValues, InstrumentFile, Sample, SampleHeader, SpectralData};
//!
//! let mut file = InstrumentFile::default();
//! file.general.file_id = "wheat survey".into();
//! file.samples.push(Sample {
//!     header: SampleHeader {
//!         sample_number: "000001".into(),
//!         ..SampleHeader::default()
//!     },
//!     data: SpectralData::new(vec![0.52, 0.48, 0.47]),
//!     constituents: ConstituentValues::new(vec![11.5]),
//! });
//!
//! let bytes = file.to_bytes(); // main data file
//! let index = file.sample_info_bytes(); // 16-byte-per-sample sidecar
//! assert_eq!(index.len(), 16);
//! assert!(bytes.len() > 0);
//! ```
//!
//! ### Standardizing a spectrum
//!
//! ```no_run
//! use nirfile_rs::{Result, StandardizationTable};
//!
//! fn calibrate(file: &[u8], raw: &[f64]) -> Result<Vec<f64>> {
//!     let table = StandardizationTable::read(file)?;
//!     table.standardize(raw)
//! }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`opus`] | Block directory, borrowed block views, embedded metadata |
//! | [`foss`] | Standardization tables and instrument-file records |
//! | [`bytes`] | Shared byte primitives (endianness, packed dates, tags) |
//! | [`error`] | Error types and [`Result`] alias |
//!
//! ## Error Handling
//!
//! Fallible operations return [`Result<T>`], an alias for
//! `core::result::Result<T, Error>`. Only structural damage is an error;
//! an absent tag or field is `None`, and best-effort enrichment (embedded
//! metadata, excess constituent values) degrades with a `log` warning
//! instead of failing.

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod bytes;
pub mod error;
pub mod foss;
pub mod opus;

// Re-export commonly used types at the crate root
pub use bytes::{PackedDate, find_tag};
pub use error::{Error, Result};
pub use foss::records::{
    ConstituentValues, GeneralHeader, InstrumentHeader, SampleHeader, SampleInfo, SpectralData,
};
pub use foss::standardization::StandardizationTable;
pub use foss::writer::{InstrumentFile, Sample};
pub use opus::block::Block;
pub use opus::directory::{BlockDefinition, BlockDirectory};
pub use opus::metadata::EmbeddedMetadata;
#[cfg(feature = "std")]
pub use opus::summary::FileSummary;
