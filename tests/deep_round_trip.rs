#![cfg(feature = "deep_tests")]

mod common;

use common::{Sample, samples};
use rust_excel_records::codec::{CodecOptions, read, write};
use rust_excel_records::validation::NoValidation;

#[test]
fn hundred_thousand_rows_round_trip() {
    let template = samples();
    let records: Vec<Sample> = (0..100_000)
        .map(|i| {
            let mut s = template[i % template.len()].clone();
            s.int = i as i32;
            s.text = format!("row-{i}");
            s
        })
        .collect();

    let options = CodecOptions::default();
    let bytes = write(&records, &options).unwrap();
    let report = read::<Sample>(&bytes, "deep.xlsx", &NoValidation, &options).unwrap();

    assert!(report.is_clean(), "{}", report.diagnostic_text());
    let back = report.records.unwrap();
    assert_eq!(back.len(), records.len());
    assert_eq!(back[99_999], records[99_999]);
}
