use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::CodecError;
use crate::header::HeaderError;
use crate::mapping::RowDiagnostic;

use super::excel::ContainerFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConversionSeverity {
    /// Informational event.
    Info,
    /// Recoverable problem (a row diagnostic or a rejected header).
    Warning,
    /// The conversion failed.
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Which way a conversion runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Sheet → records.
    Read,
    /// Records → sheet.
    Write,
}

/// Context about a conversion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionContext {
    pub direction: Direction,
    /// File name (or path) of the workbook, when there is one.
    pub file_name: Option<String>,
    /// Container format, once it is known.
    pub format: Option<ContainerFormat>,
}

impl ConversionContext {
    fn source(&self) -> &str {
        self.file_name.as_deref().unwrap_or("<memory>")
    }
}

/// Stats reported after a successful read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadStats {
    /// Number of records produced.
    pub records: usize,
    /// Number of rows with at least one diagnostic.
    pub flagged_rows: usize,
}

/// Stats reported after a successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteStats {
    /// Number of records written.
    pub records: usize,
    /// Size of the encoded workbook.
    pub bytes: usize,
}

/// Observer interface for conversion outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts. Every method has a no-op default.
pub trait ConversionObserver: Send + Sync {
    /// Called when a read completes (including reads whose header was rejected).
    fn on_read(&self, _ctx: &ConversionContext, _stats: ReadStats) {}

    /// Called when a write completes.
    fn on_write(&self, _ctx: &ConversionContext, _stats: WriteStats) {}

    /// Called once per flagged row of a read.
    fn on_row_diagnostics(&self, _ctx: &ConversionContext, _row: &RowDiagnostic) {}

    /// Called when the header row did not match the schema.
    fn on_header_rejected(&self, _ctx: &ConversionContext, _error: &HeaderError) {}

    /// Called when a conversion fails.
    fn on_failure(&self, _ctx: &ConversionContext, _severity: ConversionSeverity, _error: &CodecError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &CodecError) {
        self.on_failure(ctx, severity, error)
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ConversionObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn ConversionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ConversionObserver for CompositeObserver {
    fn on_read(&self, ctx: &ConversionContext, stats: ReadStats) {
        for o in &self.observers {
            o.on_read(ctx, stats);
        }
    }

    fn on_write(&self, ctx: &ConversionContext, stats: WriteStats) {
        for o in &self.observers {
            o.on_write(ctx, stats);
        }
    }

    fn on_row_diagnostics(&self, ctx: &ConversionContext, row: &RowDiagnostic) {
        for o in &self.observers {
            o.on_row_diagnostics(ctx, row);
        }
    }

    fn on_header_rejected(&self, ctx: &ConversionContext, error: &HeaderError) {
        for o in &self.observers {
            o.on_header_rejected(ctx, error);
        }
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &CodecError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &CodecError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs conversion events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ConversionObserver for StdErrObserver {
    fn on_read(&self, ctx: &ConversionContext, stats: ReadStats) {
        eprintln!(
            "[excel][read][ok] format={:?} file={} records={} flagged_rows={}",
            ctx.format,
            ctx.source(),
            stats.records,
            stats.flagged_rows
        );
    }

    fn on_write(&self, ctx: &ConversionContext, stats: WriteStats) {
        eprintln!(
            "[excel][write][ok] file={} records={} bytes={}",
            ctx.source(),
            stats.records,
            stats.bytes
        );
    }

    fn on_row_diagnostics(&self, ctx: &ConversionContext, row: &RowDiagnostic) {
        eprintln!("[excel][{:?}] file={} {row}", ConversionSeverity::Warning, ctx.source());
    }

    fn on_header_rejected(&self, ctx: &ConversionContext, error: &HeaderError) {
        eprintln!("[excel][{:?}] file={} {error}", ConversionSeverity::Warning, ctx.source());
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &CodecError) {
        eprintln!(
            "[excel][{:?}] direction={:?} file={} err={}",
            severity,
            ctx.direction,
            ctx.source(),
            error
        );
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &CodecError) {
        eprintln!(
            "[ALERT][excel][{:?}] direction={:?} file={} err={}",
            severity,
            ctx.direction,
            ctx.source(),
            error
        );
    }
}

/// Appends conversion events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ConversionObserver for FileObserver {
    fn on_read(&self, ctx: &ConversionContext, stats: ReadStats) {
        self.append_line(&format!(
            "{} read ok format={:?} file={} records={} flagged_rows={}",
            unix_ts(),
            ctx.format,
            ctx.source(),
            stats.records,
            stats.flagged_rows
        ));
    }

    fn on_write(&self, ctx: &ConversionContext, stats: WriteStats) {
        self.append_line(&format!(
            "{} write ok file={} records={} bytes={}",
            unix_ts(),
            ctx.source(),
            stats.records,
            stats.bytes
        ));
    }

    fn on_row_diagnostics(&self, ctx: &ConversionContext, row: &RowDiagnostic) {
        self.append_line(&format!("{} warn file={} {row}", unix_ts(), ctx.source()));
    }

    fn on_header_rejected(&self, ctx: &ConversionContext, error: &HeaderError) {
        self.append_line(&format!("{} warn file={} {error}", unix_ts(), ctx.source()));
    }

    fn on_failure(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &CodecError) {
        self.append_line(&format!(
            "{} fail severity={:?} direction={:?} file={} err={}",
            unix_ts(),
            severity,
            ctx.direction,
            ctx.source(),
            error
        ));
    }

    fn on_alert(&self, ctx: &ConversionContext, severity: ConversionSeverity, error: &CodecError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} direction={:?} file={} err={}",
            unix_ts(),
            severity,
            ctx.direction,
            ctx.source(),
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::Diagnostic;

    fn ctx() -> ConversionContext {
        ConversionContext {
            direction: Direction::Read,
            file_name: Some("people.xlsx".into()),
            format: Some(ContainerFormat::Xlsx),
        }
    }

    #[test]
    fn severities_are_ordered() {
        assert!(ConversionSeverity::Critical > ConversionSeverity::Error);
        assert!(ConversionSeverity::Error > ConversionSeverity::Warning);
        assert!(ConversionSeverity::Warning > ConversionSeverity::Info);
    }

    #[test]
    fn file_observer_appends_lines() {
        let path = std::env::temp_dir().join(format!(
            "rust_excel_records_observer_{}.log",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let obs = FileObserver::new(&path);
        obs.on_read(
            &ctx(),
            ReadStats {
                records: 3,
                flagged_rows: 1,
            },
        );
        obs.on_row_diagnostics(
            &ctx(),
            &RowDiagnostic {
                row: 2,
                diagnostics: vec![Diagnostic::Coercion {
                    field: "age".into(),
                    message: "'abc' is not a valid value for type:Int32".into(),
                }],
            },
        );
        let err = CodecError::UnsupportedExtension { ext: ".csv".into() };
        obs.on_alert(&ctx(), ConversionSeverity::Error, &err);

        let log = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("read ok format=Some(Xlsx) file=people.xlsx records=3"));
        assert!(lines[1].ends_with("Row:2 'abc' is not a valid value for type:Int32"));
        assert!(lines[2].contains("ALERT severity=Error"));
        let _ = std::fs::remove_file(&path);
    }
}
