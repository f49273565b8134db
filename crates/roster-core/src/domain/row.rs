use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One submitted form row: column name to raw cell text. A column without an
/// entry is a missing cell; explicit nulls are read the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawRow(BTreeMap<String, String>);

impl<'de> Deserialize<'de> for RawRow {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let cells = BTreeMap::<String, Option<String>>::deserialize(deserializer)?;
        Ok(Self(
            cells
                .into_iter()
                .filter_map(|(column, value)| value.map(|value| (column, value)))
                .collect(),
        ))
    }
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }

    /// Cell text, with missing cells read as empty.
    pub fn cell(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }
}
