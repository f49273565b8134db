use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// One workbook with Team, Players and Staff sheets.
    Workbook,
    /// One workbook with a single sheet split by section markers.
    Combined,
    /// Separate CSV files per record type.
    Csv,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileNaming {
    #[default]
    SlugFirst,
    TimestampFirst,
}
