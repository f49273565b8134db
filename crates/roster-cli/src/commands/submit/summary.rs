use crate::notify::EmailBody;
use crate::util::format_timestamp_local;
use roster_core::text::escape_html;
use roster_core::{PlayerRow, StaffRow, Submission};
use std::path::Path;

const DEFAULT_SUBJECT: &str = "Inscripció d'equip";

pub(crate) fn email_subject(submission: &Submission, prefix: &str) -> String {
    let trimmed = prefix.trim();
    let prefix = if trimmed.is_empty() {
        DEFAULT_SUBJECT
    } else {
        trimmed
    };
    let team = &submission.team;
    format!(
        "{prefix}: {} ({}, {})",
        team.name(),
        team.sex(),
        team.category()
    )
}

pub(crate) fn email_body(submission: &Submission, files: &[&Path]) -> EmailBody {
    EmailBody {
        text: text_body(submission, files),
        html: html_body(submission, files),
    }
}

fn player_line(player: &PlayerRow) -> String {
    format!(
        "{} - {} - {} ({})",
        dash_if_empty(&player.number),
        dash_if_empty(&player.jersey_number),
        player.full_name(),
        player.position
    )
}

fn staff_line(member: &StaffRow) -> String {
    format!("{} - {}", member.full_name(), member.role)
}

fn dash_if_empty(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

fn file_names<'a>(files: &'a [&'a Path]) -> impl Iterator<Item = String> + 'a {
    files.iter().map(|path| {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    })
}

fn text_body(submission: &Submission, files: &[&Path]) -> String {
    let team = &submission.team;
    let mut lines = vec![
        "S'ha rebut una nova inscripció d'equip.".to_string(),
        String::new(),
        format!("Equip: {}", team.name()),
        format!("Sexe: {}", team.sex()),
        format!(
            "Categoria: {} ({})",
            team.category(),
            team.category().name()
        ),
        format!("Data: {}", format_timestamp_local(submission.submitted_at)),
        String::new(),
        format!("Jugadors ({})", submission.players.len()),
    ];
    lines.extend(submission.players.iter().map(|p| format!("- {}", player_line(p))));
    lines.push(String::new());
    lines.push(format!("Staff ({})", submission.staff.len()));
    lines.extend(submission.staff.iter().map(|s| format!("- {}", staff_line(s))));

    if !files.is_empty() {
        lines.push(String::new());
        lines.push("Fitxers adjunts:".to_string());
        lines.extend(file_names(files).map(|name| format!("- {name}")));
    }
    lines.join("\n")
}

fn html_body(submission: &Submission, files: &[&Path]) -> String {
    let team = &submission.team;
    let mut html = String::new();
    html.push_str("<p>S'ha rebut una nova inscripció d'equip.</p>\n<ul>\n");
    html.push_str(&format!(
        "<li><strong>Equip:</strong> {}</li>\n",
        escape_html(team.name())
    ));
    html.push_str(&format!(
        "<li><strong>Sexe:</strong> {}</li>\n",
        escape_html(team.sex().label())
    ));
    html.push_str(&format!(
        "<li><strong>Categoria:</strong> {} ({})</li>\n",
        escape_html(team.category().label()),
        escape_html(team.category().name())
    ));
    html.push_str(&format!(
        "<li><strong>Data:</strong> {}</li>\n</ul>\n",
        format_timestamp_local(submission.submitted_at)
    ));

    push_html_list(
        &mut html,
        &format!("Jugadors ({})", submission.players.len()),
        submission.players.iter().map(player_line),
    );
    push_html_list(
        &mut html,
        &format!("Staff ({})", submission.staff.len()),
        submission.staff.iter().map(staff_line),
    );
    if !files.is_empty() {
        push_html_list(&mut html, "Fitxers adjunts", file_names(files));
    }
    html
}

fn push_html_list(html: &mut String, title: &str, items: impl Iterator<Item = String>) {
    html.push_str(&format!("<h3>{}</h3>\n", escape_html(title)));
    let items: Vec<String> = items
        .map(|item| format!("<li>{}</li>", escape_html(&item)))
        .collect();
    if items.is_empty() {
        html.push_str("<p>-</p>\n");
        return;
    }
    html.push_str("<ul>\n");
    for item in items {
        html.push_str(&item);
        html.push('\n');
    }
    html.push_str("</ul>\n");
}
