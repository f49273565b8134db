use crate::error::Result;
use crate::layout::{self, Sheet, COMBINED_SHEET};
use roster_core::Submission;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::fs::File;

/// Writes one worksheet per [`Sheet`], headers in bold on the first row.
pub fn write_workbook(file: File, sheets: &[Sheet]) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet().set_name(sheet.name)?;
        write_row(worksheet, 0, sheet.headers, Some(&header_format))?;
        for (index, row) in sheet.rows.iter().enumerate() {
            write_row(worksheet, sheet_row(index + 1), row.as_slice(), None)?;
        }
        worksheet.set_freeze_panes(1, 0)?;
        worksheet.autofit();
    }

    workbook.save_to_writer(file)?;
    Ok(())
}

/// Writes the single-sheet layout; section markers and headers are bold.
pub fn write_combined(file: File, submission: &Submission) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet().set_name(COMBINED_SHEET)?;

    let mut previous_was_marker = false;
    for (index, row) in layout::combined_rows(submission).iter().enumerate() {
        let is_marker = row.len() == 1;
        let emphasis = if is_marker || previous_was_marker {
            Some(&bold)
        } else {
            None
        };
        write_row(worksheet, sheet_row(index), row.as_slice(), emphasis)?;
        previous_was_marker = is_marker;
    }
    worksheet.autofit();

    workbook.save_to_writer(file)?;
    Ok(())
}

fn write_row<S: AsRef<str>>(
    worksheet: &mut Worksheet,
    row: u32,
    cells: &[S],
    format: Option<&Format>,
) -> Result<()> {
    for (col, cell) in cells.iter().enumerate() {
        let col = u16::try_from(col).unwrap_or(u16::MAX);
        match format {
            Some(format) => {
                worksheet.write_string_with_format(row, col, cell.as_ref(), format)?;
            }
            None => {
                worksheet.write_string(row, col, cell.as_ref())?;
            }
        }
    }
    Ok(())
}

fn sheet_row(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}
