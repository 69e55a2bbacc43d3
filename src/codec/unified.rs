//! Unified read/write entrypoints.
//!
//! - [`read`] decodes a workbook's first sheet into records, collecting per-row diagnostics in a
//!   [`ConversionReport`].
//! - [`write`] encodes records as a single-sheet `.xlsx` workbook.
//! - If an [`super::observability::ConversionObserver`] is configured, outcomes, row diagnostics
//!   and failures are reported to it.

use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;

use crate::coercion::CoercionOptions;
use crate::error::{CodecError, CodecResult};
use crate::mapping::{ConversionReport, map_rows};
use crate::schema::resolve;
use crate::sheet_writer::write_sheet;
use crate::types::Record;
use crate::validation::{NoValidation, RecordValidator};

use super::excel::{ContainerFormat, read_first_sheet};
use super::observability::{
    ConversionContext, ConversionObserver, ConversionSeverity, Direction, ReadStats, WriteStats,
};
use super::xlsx::encode_xlsx;

/// Options controlling reads and writes.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct CodecOptions {
    /// Name of the written sheet.
    pub sheet_name: String,
    /// Font family of the written header row; the workbook default when `None`.
    pub header_font: Option<String>,
    /// Number format applied to native date/time cells on write.
    pub date_num_format: String,
    /// Read-direction coercion knobs.
    pub coercion: CoercionOptions,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn ConversionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ConversionSeverity,
}

impl fmt::Debug for CodecOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecOptions")
            .field("sheet_name", &self.sheet_name)
            .field("header_font", &self.header_font)
            .field("date_num_format", &self.date_num_format)
            .field("coercion", &self.coercion)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            header_font: None,
            date_num_format: "yyyy-mm-dd hh:mm:ss".to_string(),
            coercion: CoercionOptions::default(),
            observer: None,
            alert_at_or_above: ConversionSeverity::Critical,
        }
    }
}

/// Read the first sheet of a workbook into records of type `T`.
///
/// The container is chosen from `file_name`'s extension: `.xlsx` or `.xls`, compared
/// case-insensitively. Anything else fails with [`CodecError::UnsupportedExtension`].
///
/// A header row that does not match `T`'s schema is not an error: the report comes back with
/// `records == None` and the header message as its diagnostic text. Cell mismatches and
/// validator messages never drop a row; they are collected per row.
///
/// When an observer is configured, this function reports:
///
/// - `on_read` on completion, plus `on_row_diagnostics` per flagged row or `on_header_rejected`
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use rust_excel_records::codec::{read, CodecOptions};
/// use rust_excel_records::types::{Field, LogicalType, Record, Schema, Value};
/// use rust_excel_records::validation::NoValidation;
///
/// #[derive(Default)]
/// struct Row {
///     id: i64,
/// }
///
/// impl Record for Row {
///     fn schema() -> Schema {
///         Schema::new(vec![Field::new("id", LogicalType::Int64).with_display_name("Id")])
///     }
///     fn field(&self, _name: &str) -> Value {
///         self.id.into()
///     }
///     fn set_field(&mut self, _name: &str, value: Value) {
///         self.id = value.get().unwrap_or_default();
///     }
/// }
///
/// # fn main() -> Result<(), rust_excel_records::CodecError> {
/// let bytes = std::fs::read("rows.xlsx")?;
/// let report = read::<Row>(&bytes, "rows.xlsx", &NoValidation, &CodecOptions::default())?;
/// if !report.is_clean() {
///     eprintln!("{}", report.diagnostic_text());
/// }
/// # Ok(())
/// # }
/// ```
pub fn read<T: Record>(
    bytes: &[u8],
    file_name: &str,
    validator: &dyn RecordValidator<T>,
    options: &CodecOptions,
) -> CodecResult<ConversionReport<T>> {
    let mut ctx = ConversionContext {
        direction: Direction::Read,
        file_name: Some(file_name.to_string()),
        format: None,
    };
    let result = read_with_context(bytes, file_name, validator, options, &mut ctx);
    report_read(&ctx, &result, options);
    result
}

/// Read a workbook from disk, see [`read`].
///
/// The container is chosen from the path's file name.
pub fn read_path<T: Record>(
    path: impl AsRef<Path>,
    validator: &dyn RecordValidator<T>,
    options: &CodecOptions,
) -> CodecResult<ConversionReport<T>> {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut ctx = ConversionContext {
        direction: Direction::Read,
        file_name: Some(path.display().to_string()),
        format: None,
    };
    let result = fs::read(path)
        .map_err(CodecError::from)
        .and_then(|bytes| read_with_context(&bytes, &file_name, validator, options, &mut ctx));
    report_read(&ctx, &result, options);
    result
}

fn read_with_context<T: Record>(
    bytes: &[u8],
    file_name: &str,
    validator: &dyn RecordValidator<T>,
    options: &CodecOptions,
    ctx: &mut ConversionContext,
) -> CodecResult<ConversionReport<T>> {
    let format = ContainerFormat::from_file_name(file_name)?;
    ctx.format = Some(format);
    let grid = read_first_sheet(bytes, format)?;
    let fields = resolve(&T::schema());
    Ok(map_rows(&grid, &fields, validator, &options.coercion))
}

/// Encode records as a single-sheet `.xlsx` workbook.
///
/// The header row holds each field's display name; each record becomes one row. Numbers and
/// date/times with a format directive are written as formatted text, booleans as `1`/`0`, and
/// null values leave their cell empty. The only failures are encoder errors.
///
/// ```rust
/// use rust_excel_records::codec::{write, CodecOptions};
/// use rust_excel_records::types::{Field, LogicalType, Record, Schema, Value};
///
/// #[derive(Default)]
/// struct Price {
///     amount: f64,
/// }
///
/// impl Record for Price {
///     fn schema() -> Schema {
///         Schema::new(vec![Field::new("amount", LogicalType::Float64).with_format("{0:N2}")])
///     }
///     fn field(&self, _name: &str) -> Value {
///         self.amount.into()
///     }
///     fn set_field(&mut self, _name: &str, value: Value) {
///         self.amount = value.get().unwrap_or_default();
///     }
/// }
///
/// let bytes = write(&[Price { amount: 1234.5 }], &CodecOptions::default()).unwrap();
/// assert!(!bytes.is_empty());
/// ```
pub fn write<T: Record>(records: &[T], options: &CodecOptions) -> CodecResult<Vec<u8>> {
    let ctx = ConversionContext {
        direction: Direction::Write,
        file_name: None,
        format: Some(ContainerFormat::Xlsx),
    };
    let result = encode_records(records, options);
    report_write(&ctx, records.len(), &result, options);
    result
}

/// Encode records and write the workbook to `path`, see [`write`].
pub fn write_path<T: Record>(
    path: impl AsRef<Path>,
    records: &[T],
    options: &CodecOptions,
) -> CodecResult<()> {
    let path = path.as_ref();
    let ctx = ConversionContext {
        direction: Direction::Write,
        file_name: Some(path.display().to_string()),
        format: Some(ContainerFormat::Xlsx),
    };
    let result = encode_records(records, options)
        .and_then(|bytes| fs::write(path, &bytes).map(|()| bytes).map_err(CodecError::from));
    report_write(&ctx, records.len(), &result, options);
    result.map(|_| ())
}

fn encode_records<T: Record>(records: &[T], options: &CodecOptions) -> CodecResult<Vec<u8>> {
    let fields = resolve(&T::schema());
    let sheet = write_sheet(records, &fields);
    encode_xlsx(&sheet, options)
}

fn report_read<T>(
    ctx: &ConversionContext,
    result: &CodecResult<ConversionReport<T>>,
    options: &CodecOptions,
) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(report) => {
            if let Some(err) = &report.header_error {
                obs.on_header_rejected(ctx, err);
            }
            for row in &report.rows {
                obs.on_row_diagnostics(ctx, row);
            }
            obs.on_read(
                ctx,
                ReadStats {
                    records: report.records.as_ref().map_or(0, Vec::len),
                    flagged_rows: report.rows.len(),
                },
            );
        }
        Err(e) => report_failure(obs.as_ref(), ctx, e, options),
    }
}

fn report_write(
    ctx: &ConversionContext,
    records: usize,
    result: &CodecResult<Vec<u8>>,
    options: &CodecOptions,
) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(bytes) => obs.on_write(
            ctx,
            WriteStats {
                records,
                bytes: bytes.len(),
            },
        ),
        Err(e) => report_failure(obs.as_ref(), ctx, e, options),
    }
}

fn report_failure(
    obs: &dyn ConversionObserver,
    ctx: &ConversionContext,
    error: &CodecError,
    options: &CodecOptions,
) {
    let sev = severity_for_error(error);
    obs.on_failure(ctx, sev, error);
    if sev >= options.alert_at_or_above {
        obs.on_alert(ctx, sev, error);
    }
}

fn severity_for_error(e: &CodecError) -> ConversionSeverity {
    match e {
        CodecError::Io(_) => ConversionSeverity::Critical,
        CodecError::Excel(calamine::Error::Io(_)) => ConversionSeverity::Critical,
        // Container errors often wrap I/O without a dedicated variant.
        CodecError::Excel(err) if error_chain_contains_io(err) => ConversionSeverity::Critical,
        CodecError::XlsxWrite(err) if error_chain_contains_io(err) => ConversionSeverity::Critical,
        CodecError::Excel(_)
        | CodecError::XlsxWrite(_)
        | CodecError::Json(_)
        | CodecError::UnsupportedExtension { .. }
        | CodecError::SchemaMismatch { .. } => ConversionSeverity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

/// A configured reader/writer for one record type.
pub trait SpreadsheetCodec<T> {
    /// Decode a workbook, see [`read`].
    fn read(&self, bytes: &[u8], file_name: &str) -> CodecResult<ConversionReport<T>>;

    /// Encode records, see [`write`].
    fn write(&self, records: &[T]) -> CodecResult<Vec<u8>>;
}

/// [`SpreadsheetCodec`] that owns its validator and options.
pub struct WorkbookCodec<T> {
    validator: Box<dyn RecordValidator<T> + Send + Sync>,
    options: CodecOptions,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> WorkbookCodec<T> {
    /// A codec that accepts every record.
    pub fn new(options: CodecOptions) -> Self {
        Self::with_validator(NoValidation, options)
    }

    /// A codec that runs `validator` on every read record.
    pub fn with_validator(
        validator: impl RecordValidator<T> + Send + Sync + 'static,
        options: CodecOptions,
    ) -> Self {
        Self {
            validator: Box::new(validator),
            options,
            _record: PhantomData,
        }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }
}

impl<T> fmt::Debug for WorkbookCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkbookCodec")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<T: Record> SpreadsheetCodec<T> for WorkbookCodec<T> {
    fn read(&self, bytes: &[u8], file_name: &str) -> CodecResult<ConversionReport<T>> {
        read(bytes, file_name, self.validator.as_ref(), &self.options)
    }

    fn write(&self, records: &[T]) -> CodecResult<Vec<u8>> {
        write(records, &self.options)
    }
}
