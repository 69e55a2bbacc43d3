//! `.xlsx` encoding of an [`OutputSheet`].

use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet};

use crate::coercion::serial::datetime_to_serial;
use crate::error::{CodecError, CodecResult};
use crate::grid::{CellContent, OutputSheet};

use super::unified::CodecOptions;

/// Encode `sheet` as a single-sheet `.xlsx` workbook.
///
/// The header row is bold and centered; native date/time cells use
/// [`CodecOptions::date_num_format`]. `None` slots are not written at all.
pub fn encode_xlsx(sheet: &OutputSheet, options: &CodecOptions) -> CodecResult<Vec<u8>> {
    let mut header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    if let Some(font) = &options.header_font {
        header_format = header_format.set_font_name(font);
    }
    let date_format = Format::new().set_num_format(&options.date_num_format);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&options.sheet_name)?;

    for (col, text) in sheet.header.iter().enumerate() {
        worksheet.write_string_with_format(0, column(col)?, text, &header_format)?;
    }

    for (idx, cells) in sheet.rows.iter().enumerate() {
        let row = row_number(idx + 1)?;
        for (col, content) in cells.iter().enumerate() {
            if let Some(content) = content {
                write_cell(worksheet, row, column(col)?, content, &date_format)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    content: &CellContent,
    date_format: &Format,
) -> CodecResult<()> {
    match content {
        CellContent::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        CellContent::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        CellContent::DateTime(dt) => {
            worksheet.write_number_with_format(row, col, datetime_to_serial(dt), date_format)?;
        }
    }
    Ok(())
}

fn row_number(idx: usize) -> CodecResult<u32> {
    u32::try_from(idx).map_err(|_| CodecError::SchemaMismatch {
        message: format!("row {idx} exceeds the worksheet row limit"),
    })
}

fn column(idx: usize) -> CodecResult<u16> {
    u16::try_from(idx).map_err(|_| CodecError::SchemaMismatch {
        message: format!("column {idx} exceeds the worksheet column limit"),
    })
}
