use nirfile_rs::foss::standardization::{
    DATAPOINT_COUNT_OFFSET, SEGMENT_COUNT_OFFSET, SINGLE_SEGMENT_BASE,
};
use nirfile_rs::{
    ConstituentValues, GeneralHeader, InstrumentFile, InstrumentHeader, PackedDate, Sample,
    SampleHeader, SpectralData, StandardizationTable,
};

fn standardization_file(coefficients: &[f32], intercepts: &[f32]) -> Vec<u8> {
    let count = coefficients.len();
    let intercept_offset = SINGLE_SEGMENT_BASE + count * 4 + 16;
    let mut buf = vec![0u8; intercept_offset + count * 8];
    buf[DATAPOINT_COUNT_OFFSET..DATAPOINT_COUNT_OFFSET + 2]
        .copy_from_slice(&(count as u16).to_le_bytes());
    buf[SEGMENT_COUNT_OFFSET] = 1;
    for (i, value) in intercepts.iter().chain(coefficients).enumerate() {
        let at = intercept_offset + i * 4;
        buf[at..at + 4].copy_from_slice(&value.to_bits().to_le_bytes());
    }
    buf
}

fn survey_file() -> InstrumentFile {
    let mut instrument = InstrumentHeader {
        instrument_type: 5,
        name: "NIRSystems 6500".into(),
        serial_number: "6500-123".into(),
        segment_count: 1,
        constituent_names: vec!["Moisture".into(), "Protein".into()],
        ..InstrumentHeader::default()
    };
    instrument.segment_points[0] = 100;
    instrument.wavelengths[..3].copy_from_slice(&[400.0, 2.0, 598.0]);

    InstrumentFile {
        general: GeneralHeader {
            file_type: 1,
            created: PackedDate::new(2005, 6, 21),
            timestamp: 1_119_312_000,
            file_id: "barley survey 2005".into(),
            serial_number: "6500-123".into(),
            comment: "transport cell".into(),
            ..GeneralHeader::default()
        },
        instrument,
        samples: (1..=3)
            .map(|i| Sample {
                header: SampleHeader {
                    sample_number: format!("{i:06}"),
                    sequence: i,
                    date: PackedDate::new(2005, 6, 21),
                    sample_id1: format!("plot {i}"),
                    operator: "jdoe".into(),
                    ..SampleHeader::default()
                },
                data: SpectralData::new((0..100).map(|p| (p as f32 + i as f32) / 256.0).collect()),
                constituents: ConstituentValues::new(vec![11.5 + i as f32, 2.0]),
            })
            .collect(),
    }
}

#[test]
fn instrument_file_roundtrip() {
    let original = survey_file();
    let bytes = original.to_bytes();
    let parsed = InstrumentFile::from_bytes(&bytes).unwrap();

    assert_eq!(parsed.general.live_count, 3);
    assert_eq!(parsed.general.deleted_count, 0);
    assert_eq!(parsed.general.point_count, 100);
    assert_eq!(parsed.general.constituent_count, 2);
    assert_eq!(parsed.instrument, original.instrument);
    assert_eq!(parsed.samples, original.samples);
}

#[test]
fn data_blocks_are_aligned_inside_the_file() {
    let bytes = survey_file().to_bytes();
    // 100 points = 400 data bytes, padded to 512.
    let group = 256 + 512 + 128;
    assert_eq!(bytes.len(), 128 + 768 + 3 * group);
}

#[test]
fn sidecar_index_lists_every_sample() {
    let file = survey_file();
    let index = file.sample_info_bytes();
    assert_eq!(index.len(), 3 * 16);
    assert_eq!(&index[0..6], b"000001");
    assert_eq!(&index[16..22], b"000002");
    assert_eq!(&index[32..38], b"000003");
}

#[test]
fn standardize_then_unstandardize_recovers_the_spectrum() {
    let coefficients: Vec<f32> = (1..=100).map(|i| 0.5 + (i as f32) * 0.01).collect();
    let intercepts: Vec<f32> = (1..=100).map(|i| (i as f32) * -0.002).collect();
    let buf = standardization_file(&coefficients, &intercepts);
    let table = StandardizationTable::read(&buf).unwrap();
    assert_eq!(table.datapoint_count, 100);

    let raw: Vec<f64> = (0..100).map(|i| (i as f64) / 7.0).collect();
    let standardized = table.standardize(&raw).unwrap();
    let recovered = table.unstandardize(&standardized).unwrap();
    for (got, want) in recovered.iter().zip(&raw) {
        assert!((got - want).abs() < 1e-9);
    }
}

#[test]
fn standardized_spectra_can_flow_into_an_instrument_file() {
    let buf = standardization_file(&[2.0, 2.0, 2.0], &[1.0, 1.0, 1.0]);
    let table = StandardizationTable::read(&buf).unwrap();
    let standardized = table.standardize(&[0.1, 0.2, 0.3]).unwrap();

    let mut file = InstrumentFile::default();
    file.samples.push(Sample {
        header: SampleHeader {
            sample_number: "000001".into(),
            standardized: true,
            ..SampleHeader::default()
        },
        data: SpectralData::new(standardized.iter().map(|&v| v as f32).collect()),
        constituents: ConstituentValues::default(),
    });

    let parsed = InstrumentFile::from_bytes(&file.to_bytes()).unwrap();
    assert!(parsed.samples[0].header.standardized);
    assert_eq!(parsed.samples[0].data.amplitudes, vec![1.2f32, 1.4, 1.6]);
}
