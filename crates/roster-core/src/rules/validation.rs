use crate::domain::{
    Category, PlayerRow, Position, RawRow, Sex, StaffRole, StaffRow, Submission, SubmissionForm,
    SubmissionId, Team,
};
use crate::rules::normalize::{clean_cell, is_blank, is_present, normalize_row};
use crate::rules::schema::{PipelineRules, RecordKind, RecordSchema, PLAYER_SCHEMA, STAFF_SCHEMA};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A present row whose required choice column is unset. `row` is 1-based and
/// counts every submitted row, blank ones included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    pub row: usize,
    pub field: String,
}

pub fn validate(
    rows: &[RawRow],
    columns: &[&str],
    required_field: &str,
    placeholder: &str,
) -> Vec<RowError> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| is_present(row, columns, placeholder))
        .filter(|(_, row)| is_blank(row.get(required_field), placeholder))
        .map(|(index, _)| RowError {
            row: index + 1,
            field: required_field.to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationIssue {
    MissingTeamName,
    MissingSex,
    InvalidSex {
        value: String,
    },
    MissingCategory,
    InvalidCategory {
        value: String,
    },
    MissingChoice {
        set: RecordKind,
        row: usize,
        field: String,
    },
    InvalidChoice {
        set: RecordKind,
        row: usize,
        field: String,
        value: String,
    },
}

impl ValidationIssue {
    /// Record set and 1-based row of a row issue. Team issues have none.
    pub fn row_position(&self) -> Option<(RecordKind, usize)> {
        match self {
            ValidationIssue::MissingChoice { set, row, .. }
            | ValidationIssue::InvalidChoice { set, row, .. } => Some((*set, *row)),
            _ => None,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingTeamName => write!(f, "team name is required"),
            ValidationIssue::MissingSex => write!(f, "team sex is required"),
            ValidationIssue::InvalidSex { value } => write!(f, "unknown team sex \"{value}\""),
            ValidationIssue::MissingCategory => write!(f, "team category is required"),
            ValidationIssue::InvalidCategory { value } => {
                write!(f, "unknown team category \"{value}\"")
            }
            ValidationIssue::MissingChoice { set, row, field } => {
                write!(f, "{} row {row}: {field} is required", set.label())
            }
            ValidationIssue::InvalidChoice {
                set,
                row,
                field,
                value,
            } => write!(f, "{} row {row}: unknown {field} \"{value}\"", set.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("submission rejected: {}", summarize(.issues))]
pub struct ValidationErrors {
    pub issues: Vec<ValidationIssue>,
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Checks one record set and labels each row error with the set it came from.
pub fn validate_record_set(
    schema: &RecordSchema,
    rows: &[RawRow],
    placeholder: &str,
) -> Vec<ValidationIssue> {
    validate(rows, schema.columns, schema.required, placeholder)
        .into_iter()
        .map(|error| ValidationIssue::MissingChoice {
            set: schema.kind,
            row: error.row,
            field: error.field,
        })
        .collect()
}

/// Validates a whole form, reporting every problem at once. Only a fully valid
/// form yields a [`Submission`].
pub fn validate_submission(
    form: &SubmissionForm,
    rules: &PipelineRules,
    now_utc: i64,
) -> Result<Submission, ValidationErrors> {
    let placeholder = rules.placeholder.as_str();
    let mut issues = Vec::new();

    let team = validate_team(form, placeholder, &mut issues);

    let mut row_issues = validate_record_set(&PLAYER_SCHEMA, &form.players, placeholder);
    row_issues.extend(validate_record_set(&STAFF_SCHEMA, &form.staff, placeholder));

    let players = typed_rows(&PLAYER_SCHEMA, &form.players, placeholder, &mut row_issues, |row, raw| {
        raw.parse::<Position>()
            .ok()
            .map(|position| PlayerRow::from_clean(row, position))
    });
    let staff = typed_rows(&STAFF_SCHEMA, &form.staff, placeholder, &mut row_issues, |row, raw| {
        raw.parse::<StaffRole>()
            .ok()
            .map(|role| StaffRow::from_clean(row, role))
    });

    // Form order: players before staff, rows ascending.
    row_issues.sort_by_key(ValidationIssue::row_position);
    issues.extend(row_issues);

    match team {
        Some(team) if issues.is_empty() => Ok(Submission {
            id: SubmissionId::new(),
            submitted_at: now_utc,
            team,
            players,
            staff,
        }),
        _ => Err(ValidationErrors { issues }),
    }
}

fn validate_team(
    form: &SubmissionForm,
    placeholder: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Team> {
    let name = clean_cell(Some(form.team.name.as_str()), placeholder);
    if name.is_empty() {
        issues.push(ValidationIssue::MissingTeamName);
    }

    let sex = clean_cell(Some(form.team.sex.as_str()), placeholder);
    let sex = if sex.is_empty() {
        issues.push(ValidationIssue::MissingSex);
        None
    } else {
        match sex.parse::<Sex>() {
            Ok(sex) => Some(sex),
            Err(_) => {
                issues.push(ValidationIssue::InvalidSex { value: sex });
                None
            }
        }
    };

    let category = clean_cell(Some(form.team.category.as_str()), placeholder);
    let category = if category.is_empty() {
        issues.push(ValidationIssue::MissingCategory);
        None
    } else {
        match category.parse::<Category>() {
            Ok(category) => Some(category),
            Err(_) => {
                issues.push(ValidationIssue::InvalidCategory { value: category });
                None
            }
        }
    };

    Team::new(&name, sex?, category?).ok()
}

/// Converts present rows to typed rows, recording unknown choice values.
/// Rows with a blank choice are skipped here; `validate` already reported them.
fn typed_rows<T>(
    schema: &RecordSchema,
    rows: &[RawRow],
    placeholder: &str,
    issues: &mut Vec<ValidationIssue>,
    build: impl Fn(&RawRow, &str) -> Option<T>,
) -> Vec<T> {
    let mut typed = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        if !is_present(row, schema.columns, placeholder) {
            continue;
        }
        let clean = normalize_row(row, schema.columns, placeholder);
        let choice = clean.cell(schema.required);
        if choice.is_empty() {
            continue;
        }
        match build(&clean, choice) {
            Some(value) => typed.push(value),
            None => issues.push(ValidationIssue::InvalidChoice {
                set: schema.kind,
                row: index + 1,
                field: schema.required.to_string(),
                value: choice.to_string(),
            }),
        }
    }
    typed
}

#[cfg(test)]
mod tests {
    use super::{validate, validate_submission, ValidationIssue};
    use crate::domain::{Position, RawRow, SubmissionForm, TeamForm};
    use crate::rules::schema::{player, PipelineRules, RecordKind};

    const PLACEHOLDER: &str = "— Tria —";

    fn player_row(first: &str, last: &str, position: &str) -> RawRow {
        RawRow::from_pairs([
            (player::NUMBER, "1"),
            (player::JERSEY_NUMBER, "10"),
            (player::FIRST_NAME, first),
            (player::LAST_NAME, last),
            (player::JERSEY_NAME, ""),
            (player::POSITION, position),
        ])
    }

    fn team_form() -> TeamForm {
        TeamForm {
            name: "Vòlei Test".to_string(),
            sex: "Femení".to_string(),
            category: "1C".to_string(),
        }
    }

    #[test]
    fn validate_reports_one_error_per_row_with_one_based_index() {
        let rows = vec![
            player_row("Anna", "Puig", "Opost"),
            RawRow::from_pairs([(player::FIRST_NAME, "Laia")]),
            RawRow::new(),
            player_row("Marta", "", PLACEHOLDER),
        ];
        let errors = validate(&rows, player::COLUMNS, player::POSITION, PLACEHOLDER);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].row, 2);
        assert_eq!(errors[0].field, "position");
        assert_eq!(errors[1].row, 4);
    }

    #[test]
    fn validate_ignores_blank_rows() {
        let rows = vec![player_row("", "", PLACEHOLDER), RawRow::new()];
        let rows: Vec<RawRow> = rows
            .into_iter()
            .map(|mut row| {
                row.set(player::NUMBER, "");
                row.set(player::JERSEY_NUMBER, " ");
                row
            })
            .collect();
        assert!(validate(&rows, player::COLUMNS, player::POSITION, PLACEHOLDER).is_empty());
    }

    #[test]
    fn submission_with_incomplete_player_is_rejected() {
        let form = SubmissionForm {
            team: team_form(),
            players: vec![
                player_row("Anna", "Puig", "Opost"),
                RawRow::from_pairs([(player::FIRST_NAME, "Laia"), (player::POSITION, "")]),
            ],
            staff: vec![],
        };
        let err = validate_submission(&form, &PipelineRules::default(), 0).unwrap_err();
        assert_eq!(
            err.issues,
            vec![ValidationIssue::MissingChoice {
                set: RecordKind::Players,
                row: 2,
                field: "position".to_string(),
            }]
        );
        assert!(err.to_string().contains("Players row 2: position is required"));
    }

    #[test]
    fn submission_aggregates_team_and_row_errors() {
        let form = SubmissionForm {
            team: TeamForm {
                name: "  ".to_string(),
                sex: PLACEHOLDER.to_string(),
                category: "Lliga Lunar".to_string(),
            },
            players: vec![player_row("Anna", "Puig", "Porter")],
            staff: vec![RawRow::from_pairs([("first_name", "Jordi"), ("role", PLACEHOLDER)])],
        };
        let err = validate_submission(&form, &PipelineRules::default(), 0).unwrap_err();
        assert_eq!(
            err.issues,
            vec![
                ValidationIssue::MissingTeamName,
                ValidationIssue::MissingSex,
                ValidationIssue::InvalidCategory {
                    value: "Lliga Lunar".to_string()
                },
                ValidationIssue::InvalidChoice {
                    set: RecordKind::Players,
                    row: 1,
                    field: "position".to_string(),
                    value: "Porter".to_string(),
                },
                ValidationIssue::MissingChoice {
                    set: RecordKind::Staff,
                    row: 1,
                    field: "role".to_string(),
                },
            ]
        );
    }

    #[test]
    fn row_issues_follow_form_order() {
        let form = SubmissionForm {
            team: team_form(),
            players: vec![
                player_row("Anna", "Puig", "Porter"),
                player_row("Berta", "Roca", "Opost"),
                player_row("Clara", "Vila", PLACEHOLDER),
            ],
            staff: vec![],
        };
        let err = validate_submission(&form, &PipelineRules::default(), 0).unwrap_err();
        let rows: Vec<_> = err
            .issues
            .iter()
            .filter_map(ValidationIssue::row_position)
            .collect();
        assert_eq!(rows, vec![(RecordKind::Players, 1), (RecordKind::Players, 3)]);
    }

    #[test]
    fn valid_submission_keeps_order_and_drops_blank_rows() {
        let form = SubmissionForm {
            team: team_form(),
            players: vec![
                RawRow::from_pairs([(player::POSITION, PLACEHOLDER), (player::NUMBER, " ")]),
                player_row("Anna", "Puig", "Opost"),
                player_row("Berta", "Roca", "libero"),
            ],
            staff: vec![],
        };
        let submission = validate_submission(&form, &PipelineRules::default(), 42).unwrap();
        assert_eq!(submission.submitted_at, 42);
        assert_eq!(submission.team.name(), "Vòlei Test");
        assert_eq!(submission.players.len(), 2);
        assert_eq!(submission.players[0].first_name, "Anna");
        assert_eq!(submission.players[1].position, Position::Libero);
        assert!(submission.staff.is_empty());
    }

    #[test]
    fn custom_placeholder_is_honoured() {
        let rules = PipelineRules {
            placeholder: "---".to_string(),
        };
        let form = SubmissionForm {
            team: team_form(),
            players: vec![player_row("Anna", "Puig", "---")],
            staff: vec![],
        };
        let err = validate_submission(&form, &rules, 0).unwrap_err();
        assert_eq!(err.issues.len(), 1);
    }
}
