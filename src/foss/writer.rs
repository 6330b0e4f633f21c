// foss/writer.rs
//! Assembly of complete instrument data files from in-memory spectra.
//!
//! The on-disk layout is general header, instrument header, then one
//! (sample header, spectral data, constituent values) group per sample. The
//! 16-byte sample-info records are not interleaved: they form the sidecar
//! index file the surrounding application writes next to the data file, and
//! are produced separately by [`InstrumentFile::sample_info_bytes`].

use crate::Result;
use crate::foss::records::{
    CONSTITUENT_BLOCK_SIZE, ConstituentValues, GENERAL_HEADER_SIZE, GeneralHeader,
    INSTRUMENT_HEADER_SIZE, InstrumentHeader, MAX_CONSTITUENTS, SAMPLE_HEADER_SIZE,
    SAMPLE_INFO_SIZE, SampleHeader, SampleInfo, SpectralData,
};
use alloc::vec::Vec;

/// One spectrum plus its bookkeeping records.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub header: SampleHeader,
    pub data: SpectralData,
    pub constituents: ConstituentValues,
}

/// An instrument data file ready to be encoded.
///
/// A fresh value is built per output file and discarded after encoding;
/// nothing is retained between files.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstrumentFile {
    pub general: GeneralHeader,
    pub instrument: InstrumentHeader,
    pub samples: Vec<Sample>,
}

impl InstrumentFile {
    /// Encode the complete file.
    ///
    /// The general header's spectrum counts, datapoint count and constituent
    /// count are refreshed from the sample list before encoding, so the
    /// header can never disagree with the records that follow it. Writing
    /// the returned buffer to disk is the caller's business.
    pub fn to_bytes(&self) -> Vec<u8> {
        let general = self.refreshed_general();
        let point_count = general.point_count as usize;

        let sample_bytes = SAMPLE_HEADER_SIZE
            + SpectralData::encoded_len(point_count)
            + CONSTITUENT_BLOCK_SIZE;
        let mut buf = Vec::with_capacity(
            GENERAL_HEADER_SIZE + INSTRUMENT_HEADER_SIZE + self.samples.len() * sample_bytes,
        );

        buf.extend_from_slice(&general.to_bytes());
        buf.extend_from_slice(&self.instrument.to_bytes());
        for sample in &self.samples {
            buf.extend_from_slice(&sample.header.to_bytes());
            buf.extend_from_slice(&sample.data.to_bytes());
            buf.extend_from_slice(&sample.constituents.to_bytes());
        }
        buf
    }

    /// Encode the sidecar index: one 16-byte [`SampleInfo`] per sample, in
    /// file order, carrying the sample number, sequence and deleted flag from
    /// each sample header.
    pub fn sample_info_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.samples.len() * SAMPLE_INFO_SIZE);
        for sample in &self.samples {
            let info = SampleInfo {
                sample_id: sample.header.sample_number.clone(),
                sequence: sample.header.sequence,
                deleted: sample.header.deleted,
            };
            buf.extend_from_slice(&info.to_bytes());
        }
        buf
    }

    /// Parse a complete file back into its records.
    ///
    /// Sample groups are read until the buffer is exhausted; the datapoint
    /// and constituent counts come from the general header, as they do for
    /// the format's native readers.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let general = GeneralHeader::from_bytes(bytes)?;
        let instrument = InstrumentHeader::from_bytes(&bytes[GENERAL_HEADER_SIZE..])?;

        let point_count = general.point_count as usize;
        let constituent_count = general.constituent_count as usize;
        let data_len = SpectralData::encoded_len(point_count);
        let group_len = SAMPLE_HEADER_SIZE + data_len + CONSTITUENT_BLOCK_SIZE;

        let mut samples = Vec::new();
        let mut cursor = GENERAL_HEADER_SIZE + INSTRUMENT_HEADER_SIZE;
        while bytes.len() - cursor >= group_len {
            let header = SampleHeader::from_bytes(&bytes[cursor..])?;
            let data =
                SpectralData::from_bytes(&bytes[cursor + SAMPLE_HEADER_SIZE..], point_count)?;
            let constituents = ConstituentValues::from_bytes(
                &bytes[cursor + SAMPLE_HEADER_SIZE + data_len..],
                constituent_count,
            )?;
            samples.push(Sample {
                header,
                data,
                constituents,
            });
            cursor += group_len;
        }

        Ok(Self {
            general,
            instrument,
            samples,
        })
    }

    fn refreshed_general(&self) -> GeneralHeader {
        let mut general = self.general.clone();
        if !self.samples.is_empty() {
            general.live_count =
                self.samples.iter().filter(|s| !s.header.deleted).count() as u16;
            general.deleted_count =
                self.samples.iter().filter(|s| s.header.deleted).count() as u16;
            general.point_count = self.samples[0].data.amplitudes.len() as u16;
            general.constituent_count = self
                .samples
                .iter()
                .map(|s| core::cmp::min(s.constituents.values.len(), MAX_CONSTITUENTS))
                .max()
                .unwrap_or(0) as u16;
        }
        general
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytes::PackedDate;
    use alloc::string::ToString;
    use alloc::vec;

    fn sample(number: &str, deleted: bool, amplitudes: Vec<f32>) -> Sample {
        Sample {
            header: SampleHeader {
                sample_number: number.to_string(),
                sequence: 1,
                deleted,
                date: PackedDate::new(2005, 3, 14),
                ..SampleHeader::default()
            },
            data: SpectralData::new(amplitudes),
            constituents: ConstituentValues::new(vec![11.5, 3.25]),
        }
    }

    fn file() -> InstrumentFile {
        InstrumentFile {
            general: GeneralHeader {
                file_type: 1,
                file_id: "survey".to_string(),
                ..GeneralHeader::default()
            },
            instrument: InstrumentHeader {
                segment_count: 1,
                ..InstrumentHeader::default()
            },
            samples: vec![
                sample("000001", false, vec![0.5; 33]),
                sample("000002", true, vec![0.25; 33]),
            ],
        }
    }

    #[test]
    fn layout_is_header_header_then_sample_groups() {
        let bytes = file().to_bytes();
        let group = SAMPLE_HEADER_SIZE + SpectralData::encoded_len(33) + CONSTITUENT_BLOCK_SIZE;
        assert_eq!(
            bytes.len(),
            GENERAL_HEADER_SIZE + INSTRUMENT_HEADER_SIZE + 2 * group
        );
        // First sample header sits right after the two file headers.
        let at = GENERAL_HEADER_SIZE + INSTRUMENT_HEADER_SIZE;
        assert_eq!(&bytes[at..at + 6], b"000001");
    }

    #[test]
    fn general_header_counts_are_refreshed() {
        let bytes = file().to_bytes();
        let general = GeneralHeader::from_bytes(&bytes).unwrap();
        assert_eq!(general.live_count, 1);
        assert_eq!(general.deleted_count, 1);
        assert_eq!(general.point_count, 33);
        assert_eq!(general.constituent_count, 2);
        // User identity fields survive the refresh.
        assert_eq!(general.file_id, "survey");
    }

    #[test]
    fn file_roundtrip() {
        let original = file();
        let parsed = InstrumentFile::from_bytes(&original.to_bytes()).unwrap();
        assert_eq!(parsed.samples, original.samples);
        assert_eq!(parsed.instrument, original.instrument);
        assert_eq!(parsed.general.live_count, 1);
    }

    #[test]
    fn sample_info_sidecar_matches_headers() {
        let bytes = file().sample_info_bytes();
        assert_eq!(bytes.len(), 32);
        let first = SampleInfo::from_bytes(&bytes[..16]).unwrap();
        assert_eq!(first.sample_id, "000001");
        assert!(!first.deleted);
        let second = SampleInfo::from_bytes(&bytes[16..]).unwrap();
        assert_eq!(second.sample_id, "000002");
        assert!(second.deleted);
    }

    #[test]
    fn empty_file_is_just_the_headers() {
        let file = InstrumentFile::default();
        let bytes = file.to_bytes();
        assert_eq!(bytes.len(), GENERAL_HEADER_SIZE + INSTRUMENT_HEADER_SIZE);
        let parsed = InstrumentFile::from_bytes(&bytes).unwrap();
        assert!(parsed.samples.is_empty());
    }
}
