//! End-to-end extraction tests against synthetic directory fixtures.

mod common;

use std::io::Write;

use bicdir_core::api::high_level::{
    extract_table_from_binary, extract_table_from_path, headers,
};
use bicdir_core::error::BicError;
use common::{cell_x, PageSpec, BOUNDARIES, TABLE_BOTTOM, TABLE_TOP};

#[test]
fn headers_are_the_directory_schema() {
    assert_eq!(
        headers(),
        [
            "Record creation date",
            "Last Update date",
            "BIC",
            "Brch Code",
            "Full legal name",
            "Registered address",
            "Operational address",
            "Branch description",
            "Branch address",
            "Instit. Type",
        ]
    );
}

#[test]
fn extracts_the_reference_fixture() {
    let records = extract_table_from_binary(&common::sample_directory()).unwrap();

    assert_eq!(records.len(), 4);
    assert_eq!(records[0], common::yettel_record());
    assert_eq!(records, common::sample_records());
}

#[test]
fn every_record_has_ten_fields() {
    let records = extract_table_from_binary(&common::sample_directory()).unwrap();
    for record in &records {
        assert_eq!(record.len(), 10, "bad arity in {record:?}");
    }
}

#[test]
fn date_columns_are_iso_8601() {
    let date = regex::Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    let records = extract_table_from_binary(&common::sample_directory()).unwrap();
    for record in &records {
        assert!(date.is_match(&record[0]), "creation date: {}", record[0]);
        assert!(date.is_match(&record[1]), "update date: {}", record[1]);
    }
}

#[test]
fn path_and_binary_extraction_agree() {
    let pdf = common::sample_directory();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&pdf).unwrap();
    file.flush().unwrap();

    let from_path = extract_table_from_path(file.path()).unwrap();
    let from_bytes = extract_table_from_binary(&pdf).unwrap();
    assert_eq!(from_path, from_bytes);
}

#[test]
fn missing_file_reports_the_documented_message() {
    let err = extract_table_from_path("/no/such/dir/ISOBIC.pdf").unwrap_err();
    assert_eq!(err.to_string(), "Failed to open PDF file");
    assert!(matches!(err, BicError::OpenFile(_)));
}

#[test]
fn corrupt_file_on_disk_reports_the_open_message() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"not a pdf").unwrap();
    file.flush().unwrap();

    let err = extract_table_from_path(file.path()).unwrap_err();
    assert_eq!(err.to_string(), "Failed to open PDF file");
}

#[test]
fn non_pdf_bytes_report_the_documented_message() {
    let err = extract_table_from_binary(b"not a pdf").unwrap_err();
    assert_eq!(err.to_string(), "Failed to load PDF from bytes");
    assert!(matches!(err, BicError::LoadBytes(_)));
}

#[test]
fn non_ascii_names_survive_utf16_decoding() {
    let records = extract_table_from_binary(&common::sample_directory()).unwrap();
    assert_eq!(records[2][4], "BANQUE D\u{c9}FINITIVE");
}

#[test]
fn wrapped_rows_merge_into_one_record() {
    let records = extract_table_from_binary(&common::sample_directory()).unwrap();
    assert_eq!(
        records[0][5],
        "88 OMLADINSKIH BRIGADA BEOGRAD 11070 SERBIA"
    );
    assert_eq!(
        records[0][6],
        "88 OMLADINSKIH BRIGADA BEOGRAD 11070 BEOGRAD SERBIA"
    );
}

#[test]
fn optional_columns_default_to_empty() {
    let records = extract_table_from_binary(&common::sample_directory()).unwrap();
    assert_eq!(records[0][7], "");
    assert_eq!(records[0][8], "");
    // ...but are populated when the directory fills them
    assert_eq!(records[3][7], "TREASURY DESK");
    assert_eq!(records[3][8], "1 HARBOUR ROAD");
}

#[test]
fn cover_only_document_yields_no_records() {
    let records = extract_table_from_binary(&common::build_pdf(&[])).unwrap();
    assert!(records.is_empty());
}

#[test]
fn missing_rulings_fail_calibration() {
    let page = PageSpec {
        rulings: false,
        ..PageSpec::data()
    }
    .row(&[(0, "1997-03-01"), (1, "2024-06-06"), (2, "AAAARSBG")]);

    let err = extract_table_from_binary(&common::build_pdf(&[page])).unwrap_err();
    match err {
        BicError::Calibration { expected, found } => {
            assert_eq!(expected, 11);
            assert_eq!(found, 0);
        }
        other => panic!("expected Calibration, got {other:?}"),
    }
}

#[test]
fn malformed_date_rows_are_skipped() {
    let page = PageSpec::data()
        .row(&[
            (0, "1997-03-01"),
            (1, "2024-06-06"),
            (2, "AAAARSBG"),
            (3, "XXX"),
            (4, "GOOD BANK"),
            (9, "FIIN"),
        ])
        .row(&[
            (0, "1997-02-30"), // February 30th does not exist
            (1, "2024-06-06"),
            (2, "BADDRSBG"),
            (3, "XXX"),
            (4, "BROKEN ROW BANK"),
            (9, "FIIN"),
        ]);

    let records = extract_table_from_binary(&common::build_pdf(&[page])).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0][2], "AAAARSBG");
}

#[test]
fn tj_adjustments_become_word_spaces() {
    // One row whose legal-name cell is emitted as a kerned TJ array
    let mut content = String::from("0.5 w\n");
    for x in BOUNDARIES {
        content.push_str(&format!(
            "{x:.1} {TABLE_BOTTOM:.1} m {x:.1} {TABLE_TOP:.1} l S\n"
        ));
    }
    content.push_str("BT\n/F1 8 Tf\n");
    for (col, text) in [
        (0usize, "1997-03-01"),
        (1, "2024-06-06"),
        (2, "AAAARSBG"),
        (3, "XXX"),
        (9, "FIIN"),
    ] {
        content.push_str(&format!(
            "1 0 0 1 {:.1} 520.0 Tm ({text}) Tj\n",
            cell_x(col)
        ));
    }
    // -12 is kerning (kept inside the word), -300 is a word gap
    content.push_str(&format!(
        "1 0 0 1 {:.1} 520.0 Tm [(YET) -12 (TEL) -300 (BANK) -300 (AD)] TJ\n",
        cell_x(4)
    ));
    content.push_str("ET\n");

    let pdf = common::build_pdf_with_streams(&[String::from("BT (cover) Tj ET\n"), content]);
    let records = extract_table_from_binary(&pdf).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0][4], "YETTEL BANK AD");
}

#[test]
fn repeated_page_headers_are_not_records() {
    // Headers are on both data pages of the sample fixture; none may
    // leak into the output
    let records = extract_table_from_binary(&common::sample_directory()).unwrap();
    for record in &records {
        assert!(!record[0].to_lowercase().contains("record creation"));
        assert!(!record[4].to_lowercase().contains("full legal name"));
    }
}

#[test]
fn single_threaded_extraction_matches_parallel() {
    use bicdir_core::api::high_level::{extract_table_from_binary_with, ExtractOptions};

    let pdf = common::sample_directory();
    let sequential = extract_table_from_binary_with(
        &pdf,
        &ExtractOptions {
            threads: Some(1),
            ..ExtractOptions::default()
        },
    )
    .unwrap();
    let parallel = extract_table_from_binary_with(
        &pdf,
        &ExtractOptions {
            threads: Some(4),
            ..ExtractOptions::default()
        },
    )
    .unwrap();

    assert_eq!(sequential, parallel);
    assert_eq!(sequential, common::sample_records());
}
