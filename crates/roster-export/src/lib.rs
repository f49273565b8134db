pub mod error;
pub mod flat;
pub mod layout;
pub mod legacy;
pub mod naming;
pub mod workbook;

use roster_core::rules::{ExportFormat, FileNaming};
use roster_core::Submission;
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub use error::{ExportError, Result};
pub use naming::{slugify, FALLBACK_SLUG};

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    pub formats: Vec<ExportFormat>,
    pub naming: FileNaming,
    pub legacy_log: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a best-effort export: every file that was written and every
/// file that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<ExportFailure>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Files written by this export that can be attached to a notification.
    /// The shared legacy log is excluded.
    pub fn attachments<'a>(&'a self, legacy_log: Option<&'a Path>) -> Vec<&'a Path> {
        self.written
            .iter()
            .map(PathBuf::as_path)
            .filter(|path| Some(*path) != legacy_log)
            .collect()
    }

    fn record(&mut self, path: PathBuf, result: Result<()>) {
        match result {
            Ok(()) => {
                debug!(path = %path.display(), "export file written");
                self.written.push(path);
            }
            Err(err) => self.fail(path, err.to_string()),
        }
    }

    fn fail(&mut self, path: PathBuf, message: String) {
        warn!(path = %path.display(), error = %message, "export file failed");
        self.failures.push(ExportFailure { path, message });
    }
}

/// Writes the submission in every configured format. A failing file never
/// stops the others. Output names are claimed before writing, so concurrent
/// exports of the same team never share a file.
pub fn export(submission: &Submission, options: &ExportOptions) -> ExportReport {
    let mut report = ExportReport::default();

    if let Err(err) = fs::create_dir_all(&options.output_dir) {
        warn!(
            path = %options.output_dir.display(),
            error = %err,
            "could not create export directory"
        );
    }

    let base = naming::base_name(
        submission.team.name(),
        submission.submitted_at,
        options.naming,
    );
    let outputs = planned_outputs(submission, &options.formats);
    let suffixes: Vec<&str> = outputs.iter().map(|output| output.suffix()).collect();

    match naming::reserve(&options.output_dir, &base, &suffixes) {
        Ok(reservation) => {
            for (output, (path, file)) in outputs.into_iter().zip(reservation.files) {
                let result = output.write(file, submission);
                if result.is_err() {
                    let _ = fs::remove_file(&path);
                }
                report.record(path, result);
            }
        }
        Err(err) => {
            let message = ExportError::from(err).to_string();
            for suffix in suffixes {
                let path = options.output_dir.join(format!("{base}{suffix}"));
                report.fail(path, message.clone());
            }
        }
    }

    if let Some(log) = options.legacy_log.as_ref() {
        let result = legacy::append(log, submission);
        report.record(log.clone(), result);
    }

    report
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    Workbook,
    Combined,
    TeamCsv,
    PlayersCsv,
    StaffCsv,
}

impl Output {
    fn suffix(self) -> &'static str {
        match self {
            Output::Workbook => ".xlsx",
            Output::Combined => "_combined.xlsx",
            Output::TeamCsv => "_team.csv",
            Output::PlayersCsv => "_players.csv",
            Output::StaffCsv => "_staff.csv",
        }
    }

    fn write(self, file: File, submission: &Submission) -> Result<()> {
        match self {
            Output::Workbook => workbook::write_workbook(file, &layout::workbook_sheets(submission)),
            Output::Combined => workbook::write_combined(file, submission),
            Output::TeamCsv => flat::write_sheet(file, &layout::team_sheet(submission)),
            Output::PlayersCsv => flat::write_sheet(file, &layout::player_sheet(submission)),
            Output::StaffCsv => flat::write_sheet(file, &layout::staff_sheet(submission)),
        }
    }
}

/// Files to write, in format order. CSV skips empty record sets.
fn planned_outputs(submission: &Submission, formats: &[ExportFormat]) -> Vec<Output> {
    let mut outputs = Vec::new();
    for format in formats {
        let wanted: &[Output] = match format {
            ExportFormat::Workbook => &[Output::Workbook],
            ExportFormat::Combined => &[Output::Combined],
            ExportFormat::Csv => &[Output::TeamCsv, Output::PlayersCsv, Output::StaffCsv],
        };
        for output in wanted {
            let empty = match output {
                Output::PlayersCsv => submission.players.is_empty(),
                Output::StaffCsv => submission.staff.is_empty(),
                _ => false,
            };
            if !empty && !outputs.contains(output) {
                outputs.push(*output);
            }
        }
    }
    outputs
}
