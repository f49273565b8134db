//! Submission input: TOML, JSON, or the urlencoded body posted by the web form.

use crate::error::{invalid_input, not_found};
use anyhow::{Context as _, Result};
use roster_core::rules::schema::{player, staff};
use roster_core::{RawRow, SubmissionForm, TeamForm};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const TEAM_NAME_FIELD: &str = "team_name";
pub const TEAM_SEX_FIELD: &str = "team_sex";
pub const TEAM_CATEGORY_FIELD: &str = "team_category";

/// Repeating form fields and the row column each one fills.
const PLAYER_FIELDS: &[(&str, &str)] = &[
    ("jugador_numero", player::NUMBER),
    ("jugador_dorsal", player::JERSEY_NUMBER),
    ("jugador_nom", player::FIRST_NAME),
    ("jugador_cognoms", player::LAST_NAME),
    ("jugador_nom_samarreta", player::JERSEY_NAME),
    ("jugador_posicio", player::POSITION),
];

const STAFF_FIELDS: &[(&str, &str)] = &[
    ("staff_nom", staff::FIRST_NAME),
    ("staff_cognoms", staff::LAST_NAME),
    (STAFF_ROLE_FIELD, staff::ROLE),
];

const STAFF_ROLE_FIELD: &str = "staff_carrec";
const LEGACY_STAFF_ROLE_FIELD: &str = "staff_carrecs";

pub fn read_form(path: &Path) -> Result<SubmissionForm> {
    if !path.exists() {
        return Err(not_found(format!("submission file {}", path.display())));
    }
    let bytes =
        fs::read(path).with_context(|| format!("read submission file {}", path.display()))?;
    let data = String::from_utf8(bytes).map_err(|err| {
        invalid_input(format!(
            "submission file {} is not UTF-8: {err}",
            path.display()
        ))
    })?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("toml") => toml::from_str(&data)
            .map_err(|err| invalid_input(format!("invalid TOML submission: {err}"))),
        Some("json") => serde_json::from_str(&data)
            .map_err(|err| invalid_input(format!("invalid JSON submission: {err}"))),
        _ => Ok(parse_form_body(&data)),
    }
}

/// Decodes an `application/x-www-form-urlencoded` body. Repeated fields are
/// zipped by position; a shorter field list leaves later cells missing.
pub fn parse_form_body(body: &str) -> SubmissionForm {
    let mut fields: HashMap<String, Vec<String>> = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(body.trim().as_bytes()) {
        fields
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    if !fields.contains_key(STAFF_ROLE_FIELD) {
        if let Some(values) = fields.remove(LEGACY_STAFF_ROLE_FIELD) {
            fields.insert(STAFF_ROLE_FIELD.to_string(), values);
        }
    }

    let first = |key: &str| {
        fields
            .get(key)
            .and_then(|values| values.first())
            .cloned()
            .unwrap_or_default()
    };

    SubmissionForm {
        team: TeamForm {
            name: first(TEAM_NAME_FIELD),
            sex: first(TEAM_SEX_FIELD),
            category: first(TEAM_CATEGORY_FIELD),
        },
        players: zip_rows(&fields, PLAYER_FIELDS),
        staff: zip_rows(&fields, STAFF_FIELDS),
    }
}

fn zip_rows(fields: &HashMap<String, Vec<String>>, mapping: &[(&str, &str)]) -> Vec<RawRow> {
    let count = mapping
        .iter()
        .filter_map(|(field, _)| fields.get(*field).map(Vec::len))
        .max()
        .unwrap_or(0);

    (0..count)
        .map(|index| {
            let mut row = RawRow::new();
            for (field, column) in mapping {
                if let Some(value) = fields.get(*field).and_then(|values| values.get(index)) {
                    row.set(*column, value.as_str());
                }
            }
            row
        })
        .collect()
}
