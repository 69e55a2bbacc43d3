mod common;

use std::sync::{Arc, Mutex};

use common::{Person, tmp_file};
use rust_excel_records::CodecError;
use rust_excel_records::codec::{
    CodecOptions, ConversionContext, ConversionObserver, ConversionSeverity, ReadStats,
    SpreadsheetCodec, WorkbookCodec, WriteStats, read, read_path,
};
use rust_excel_records::header::HeaderError;
use rust_excel_records::mapping::RowDiagnostic;
use rust_excel_records::validation::{NoValidation, ValidationError};

#[derive(Default)]
struct RecordingObserver {
    reads: Mutex<Vec<ReadStats>>,
    writes: Mutex<Vec<WriteStats>>,
    rows: Mutex<Vec<usize>>,
    headers: Mutex<Vec<String>>,
    failures: Mutex<Vec<ConversionSeverity>>,
    alerts: Mutex<Vec<ConversionSeverity>>,
}

impl ConversionObserver for RecordingObserver {
    fn on_read(&self, _ctx: &ConversionContext, stats: ReadStats) {
        self.reads.lock().unwrap().push(stats);
    }

    fn on_write(&self, _ctx: &ConversionContext, stats: WriteStats) {
        self.writes.lock().unwrap().push(stats);
    }

    fn on_row_diagnostics(&self, _ctx: &ConversionContext, row: &RowDiagnostic) {
        self.rows.lock().unwrap().push(row.row);
    }

    fn on_header_rejected(&self, _ctx: &ConversionContext, error: &HeaderError) {
        self.headers.lock().unwrap().push(error.to_string());
    }

    fn on_failure(&self, _ctx: &ConversionContext, severity: ConversionSeverity, _error: &CodecError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &ConversionContext, severity: ConversionSeverity, _error: &CodecError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn options(obs: &Arc<RecordingObserver>, alert_at_or_above: ConversionSeverity) -> CodecOptions {
    CodecOptions {
        observer: Some(obs.clone()),
        alert_at_or_above,
        ..Default::default()
    }
}

fn people() -> Vec<Person> {
    vec![
        Person {
            name: "Ann".into(),
            age: 30,
            email: None,
        },
        Person {
            name: String::new(),
            age: 41,
            email: None,
        },
    ]
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options(&obs, ConversionSeverity::Critical);

    let missing = tmp_file("does-not-exist", "xlsx");
    let _ = read_path::<Person>(&missing, &NoValidation, &opts).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![ConversionSeverity::Critical]);
    assert_eq!(*obs.alerts.lock().unwrap(), vec![ConversionSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_non_critical_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options(&obs, ConversionSeverity::Critical);

    let _ = read::<Person>(b"", "people.ods", &NoValidation, &opts).unwrap_err();

    assert_eq!(*obs.failures.lock().unwrap(), vec![ConversionSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn lower_threshold_alerts_on_errors() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options(&obs, ConversionSeverity::Error);

    let _ = read::<Person>(b"", "people.txt", &NoValidation, &opts).unwrap_err();

    assert_eq!(*obs.alerts.lock().unwrap(), vec![ConversionSeverity::Error]);
}

#[test]
fn codec_reports_writes_reads_and_flagged_rows() {
    let obs = Arc::new(RecordingObserver::default());
    let validator = |p: &Person| {
        if p.name.is_empty() {
            vec![ValidationError::new("name", "The Name field is required.")]
        } else {
            Vec::new()
        }
    };
    let codec = WorkbookCodec::with_validator(validator, options(&obs, ConversionSeverity::Critical));

    let bytes = codec.write(&people()).unwrap();
    let report = codec.read(&bytes, "people.xlsx").unwrap();

    assert_eq!(report.diagnostic_text(), "Row:2 The Name field is required.");
    assert_eq!(obs.writes.lock().unwrap()[0].records, 2);
    assert_eq!(obs.writes.lock().unwrap()[0].bytes, bytes.len());
    assert_eq!(
        *obs.reads.lock().unwrap(),
        vec![ReadStats {
            records: 2,
            flagged_rows: 1
        }]
    );
    assert_eq!(*obs.rows.lock().unwrap(), vec![2]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn header_rejection_is_reported_but_not_a_failure() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = options(&obs, ConversionSeverity::Info);

    let mut wb = rust_xlsxwriter::Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "Name").unwrap();
    ws.write_string(0, 1, "Nickname").unwrap();
    let bytes = wb.save_to_buffer().unwrap();

    let report = read::<Person>(&bytes, "people.xlsx", &NoValidation, &opts).unwrap();
    assert!(report.records.is_none());
    assert_eq!(
        *obs.headers.lock().unwrap(),
        vec!["invalid Header text detacted: Nickname".to_string()]
    );
    assert!(obs.failures.lock().unwrap().is_empty());
    assert!(obs.alerts.lock().unwrap().is_empty());
}
