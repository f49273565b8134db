use crate::domain::RawRow;

/// True when a cell counts as unset: missing, whitespace only, or the placeholder.
pub fn is_blank(value: Option<&str>, placeholder: &str) -> bool {
    match value {
        None => true,
        Some(raw) => {
            let trimmed = raw.trim();
            trimmed.is_empty() || trimmed == placeholder.trim()
        }
    }
}

pub fn clean_cell(value: Option<&str>, placeholder: &str) -> String {
    if is_blank(value, placeholder) {
        return String::new();
    }
    value.map(|raw| raw.trim().to_string()).unwrap_or_default()
}

/// A row is present when any of its columns holds a real value.
pub fn is_present(row: &RawRow, columns: &[&str], placeholder: &str) -> bool {
    columns
        .iter()
        .any(|column| !is_blank(row.get(column), placeholder))
}

pub fn normalize_row(row: &RawRow, columns: &[&str], placeholder: &str) -> RawRow {
    RawRow::from_pairs(
        columns
            .iter()
            .map(|column| (*column, clean_cell(row.get(column), placeholder))),
    )
}

/// Cleans every cell and drops rows left with no value. Keeps row order.
pub fn normalize(rows: &[RawRow], columns: &[&str], placeholder: &str) -> Vec<RawRow> {
    rows.iter()
        .filter(|row| is_present(row, columns, placeholder))
        .map(|row| normalize_row(row, columns, placeholder))
        .collect()
}
