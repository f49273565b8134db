//! Shared append-only CSV log: one line per player or staff member across all
//! submissions.

use crate::error::Result;
use chrono::{DateTime, Local, Utc};
use roster_core::Submission;
use std::fs::OpenOptions;
use std::path::Path;

pub const HEADERS: &[&str] = &[
    "Timestamp",
    "Type",
    "Number",
    "JerseyNumber",
    "FirstName",
    "LastName",
    "Position/Role",
];

pub const PLAYER_TYPE: &str = "Jugador";
pub const STAFF_TYPE: &str = "Staff";

pub fn append(path: &Path, submission: &Submission) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let needs_header = file.metadata()?.len() == 0;
    let mut writer = csv::Writer::from_writer(file);

    if needs_header {
        writer.write_record(HEADERS)?;
    }

    let stamp = format_timestamp(submission.submitted_at);
    for player in &submission.players {
        writer.write_record([
            stamp.as_str(),
            PLAYER_TYPE,
            player.number.as_str(),
            player.jersey_number.as_str(),
            player.first_name.as_str(),
            player.last_name.as_str(),
            player.position.label(),
        ])?;
    }
    for member in &submission.staff {
        writer.write_record([
            stamp.as_str(),
            STAFF_TYPE,
            "",
            "",
            member.first_name.as_str(),
            member.last_name.as_str(),
            member.role.label(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn format_timestamp(ts: i64) -> String {
    DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_default()
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
