use crate::error::Result;
use crate::layout::Sheet;
use std::io::Write;

/// Writes one sheet as CSV with its header row.
pub fn write_sheet<W: Write>(out: W, sheet: &Sheet) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(sheet.headers)?;
    for row in &sheet.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
