//! Workbook entrypoints and container adapters.
//!
//! Most callers should use [`read`] / [`write`] (from [`unified`]) which:
//!
//! - select the container from the file extension (`.xlsx` / `.xls`)
//! - convert between the first sheet and a collection of [`crate::types::Record`]s
//! - optionally report outcomes, row diagnostics and failures to a [`ConversionObserver`]
//!
//! Container-specific functions are also available under:
//! - [`excel`] (decoding, via `calamine`)
//! - [`xlsx`] (encoding, via `rust_xlsxwriter`)

pub mod excel;
pub mod observability;
pub mod unified;
pub mod xlsx;

pub use excel::ContainerFormat;
pub use observability::{
    CompositeObserver, ConversionContext, ConversionObserver, ConversionSeverity, Direction,
    FileObserver, ReadStats, StdErrObserver, WriteStats,
};
pub use unified::{
    CodecOptions, SpreadsheetCodec, WorkbookCodec, read, read_path, write, write_path,
};
