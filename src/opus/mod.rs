//! OPUS-style block-directory files.
//!
//! An OPUS spectrometer file opens with a directory: a fixed-offset table of
//! `(type, length, offset)` triples, each describing one typed block inside
//! the same buffer. Blocks carry short ASCII-tagged fields (3 letters + NUL)
//! holding integers, doubles or zero-terminated text, and certain text blocks
//! embed a command-line-like metadata string of their own.
//!
//! Reading is strictly layered: [`directory`] turns the table into
//! definitions, [`block`] instantiates borrowed views with typed field
//! lookup, and [`metadata`] tokenizes the embedded command line when a caller
//! asks for it.

pub mod block;
pub mod directory;
pub mod metadata;
#[cfg(feature = "std")]
pub mod summary;

pub use block::Block;
pub use directory::{BlockDefinition, BlockDirectory};
pub use metadata::EmbeddedMetadata;
#[cfg(feature = "std")]
pub use summary::FileSummary;
