mod summary;

use crate::commands::{print_json, Context};
use crate::error::CliError;
use crate::form::read_form;
use crate::notify::{notify, NotifyOutcome};
use crate::util::now_utc;
use anyhow::{anyhow, Result};
use clap::{Args, ValueEnum};
use roster_core::rules::{
    validate_submission, ExportFormat, PipelineRules, ValidationErrors, ValidationIssue,
};
use roster_core::{Submission, SubmissionForm, SubmissionId, Team};
use roster_export::{export, ExportFailure, ExportOptions, ExportReport};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, warn};

use summary::{email_body, email_subject};

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Submission file (.toml, .json, or an urlencoded form body)
    pub file: PathBuf,
    /// Directory for the exported files
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    /// Export format; repeat to write several
    #[arg(long = "format", value_enum)]
    pub formats: Vec<FormatArg>,
    /// Append rows to a shared CSV log
    #[arg(long)]
    pub legacy_log: Option<PathBuf>,
    /// Skip the notification email
    #[arg(long)]
    pub no_notify: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Submission file (.toml, .json, or an urlencoded form body)
    pub file: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Workbook,
    Combined,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Workbook => ExportFormat::Workbook,
            FormatArg::Combined => ExportFormat::Combined,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum SubmitReport<'a> {
    Rejected {
        issues: &'a [ValidationIssue],
    },
    Valid {
        team: &'a Team,
        players: usize,
        staff: usize,
    },
    Saved {
        submission_id: SubmissionId,
        team: &'a Team,
        players: usize,
        staff: usize,
        files: &'a [PathBuf],
        failures: &'a [ExportFailure],
        email: &'a NotifyOutcome,
    },
}

pub fn submit(ctx: &Context<'_>, args: SubmitArgs) -> Result<()> {
    let form = read_form(&args.file)?;
    let submission = validate_or_report(ctx, &form)?;
    debug!(
        id = %submission.id,
        players = submission.players.len(),
        staff = submission.staff.len(),
        "submission accepted"
    );

    let options = export_options(ctx, &args);
    let report = export(&submission, &options);
    if report.written.is_empty() {
        print_failures(ctx, &report)?;
        return Err(anyhow!(
            "no export file could be written to {}",
            options.output_dir.display()
        ));
    }

    let email = if args.no_notify {
        NotifyOutcome::not_sent("notification skipped")
    } else if !ctx.config.email.enabled {
        NotifyOutcome::not_sent("email notifications disabled")
    } else {
        let attachments = report.attachments(options.legacy_log.as_deref());
        let subject = email_subject(&submission, &ctx.config.email.subject_prefix);
        let body = email_body(&submission, &attachments);
        let outcome = notify(&ctx.config.email, &attachments, &subject, &body);
        if !outcome.sent {
            warn!(reason = %outcome.message, "notification not sent");
        }
        outcome
    };

    if ctx.json {
        print_json(&SubmitReport::Saved {
            submission_id: submission.id,
            team: &submission.team,
            players: submission.players.len(),
            staff: submission.staff.len(),
            files: &report.written,
            failures: &report.failures,
            email: &email,
        })?;
    } else {
        print_saved(&submission, &report, &email);
    }
    Ok(())
}

pub fn check(ctx: &Context<'_>, args: CheckArgs) -> Result<()> {
    let form = read_form(&args.file)?;
    let submission = validate_or_report(ctx, &form)?;
    if ctx.json {
        print_json(&SubmitReport::Valid {
            team: &submission.team,
            players: submission.players.len(),
            staff: submission.staff.len(),
        })?;
    } else {
        println!(
            "valid: {} ({} players, {} staff)",
            submission.team.name(),
            submission.players.len(),
            submission.staff.len()
        );
    }
    Ok(())
}

fn validate_or_report(ctx: &Context<'_>, form: &SubmissionForm) -> Result<Submission> {
    let rules = PipelineRules {
        placeholder: ctx.config.placeholder.clone(),
    };
    match validate_submission(form, &rules, now_utc()) {
        Ok(submission) => Ok(submission),
        Err(errors) => {
            if ctx.json {
                print_json(&SubmitReport::Rejected {
                    issues: &errors.issues,
                })?;
            } else {
                print_rejected(&errors);
            }
            Err(CliError::InvalidInput(format!(
                "submission has {} error(s); nothing was saved",
                errors.issues.len()
            ))
            .into())
        }
    }
}

fn export_options(ctx: &Context<'_>, args: &SubmitArgs) -> ExportOptions {
    let defaults = &ctx.config.export;
    let formats = if args.formats.is_empty() {
        defaults.formats.clone()
    } else {
        let mut formats: Vec<ExportFormat> = Vec::with_capacity(args.formats.len());
        for format in args.formats.iter().copied().map(ExportFormat::from) {
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        formats
    };
    ExportOptions {
        output_dir: args
            .out_dir
            .clone()
            .unwrap_or_else(|| defaults.output_dir.clone()),
        formats,
        naming: defaults.naming,
        legacy_log: args
            .legacy_log
            .clone()
            .or_else(|| defaults.legacy_log.clone()),
    }
}

fn print_rejected(errors: &ValidationErrors) {
    println!("rejected ({} error(s)):", errors.issues.len());
    for issue in &errors.issues {
        println!("  {issue}");
    }
}

fn print_failures(ctx: &Context<'_>, report: &ExportReport) -> Result<()> {
    if ctx.json {
        return print_json(report);
    }
    for failure in &report.failures {
        eprintln!("failed: {}: {}", failure.path.display(), failure.message);
    }
    Ok(())
}

fn print_saved(submission: &Submission, report: &ExportReport, email: &NotifyOutcome) {
    println!(
        "saved: {} ({} players, {} staff)",
        submission.team.name(),
        submission.players.len(),
        submission.staff.len()
    );
    println!("id: {}", submission.id);
    for path in &report.written {
        println!("  wrote {}", path.display());
    }
    for failure in &report.failures {
        println!("  failed {}: {}", failure.path.display(), failure.message);
    }
    if email.sent {
        println!("email: {}", email.message);
    } else {
        println!("warning: email not sent: {}", email.message);
    }
}
