//! Tabular layout shared by the workbook and CSV writers.

use roster_core::{PlayerRow, StaffRow, Submission};

pub const TEAM_SHEET: &str = "Team";
pub const PLAYERS_SHEET: &str = "Players";
pub const STAFF_SHEET: &str = "Staff";
pub const COMBINED_SHEET: &str = "Roster";

pub const TEAM_HEADERS: &[&str] = &["Name", "Sex", "Category"];
pub const PLAYER_HEADERS: &[&str] = &[
    "Team",
    "Sex",
    "Category",
    "Number",
    "JerseyNumber",
    "FirstName",
    "LastName",
    "JerseyName",
    "Position",
];
pub const STAFF_HEADERS: &[&str] = &["Team", "Sex", "Category", "FirstName", "LastName", "Role"];

pub const TEAM_MARKER: &str = "TEAM";
pub const PLAYERS_MARKER: &str = "PLAYERS";
pub const STAFF_MARKER: &str = "STAFF";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: &'static str,
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
}

pub fn team_sheet(submission: &Submission) -> Sheet {
    Sheet {
        name: TEAM_SHEET,
        headers: TEAM_HEADERS,
        rows: vec![owned(&submission.team.leading_columns())],
    }
}

pub fn player_sheet(submission: &Submission) -> Sheet {
    Sheet {
        name: PLAYERS_SHEET,
        headers: PLAYER_HEADERS,
        rows: submission
            .players
            .iter()
            .map(|player| with_team(submission, &player_cells(player)))
            .collect(),
    }
}

pub fn staff_sheet(submission: &Submission) -> Sheet {
    Sheet {
        name: STAFF_SHEET,
        headers: STAFF_HEADERS,
        rows: submission
            .staff
            .iter()
            .map(|member| with_team(submission, &staff_cells(member)))
            .collect(),
    }
}

/// Team, Players and Staff sheets; record sheets are present even when empty.
pub fn workbook_sheets(submission: &Submission) -> Vec<Sheet> {
    vec![
        team_sheet(submission),
        player_sheet(submission),
        staff_sheet(submission),
    ]
}

/// Rows of the single-sheet layout: each section is a marker row, a header
/// row and its data rows, separated by a blank row.
pub fn combined_rows(submission: &Submission) -> Vec<Vec<String>> {
    let sections = [
        (TEAM_MARKER, team_sheet(submission)),
        (PLAYERS_MARKER, player_sheet(submission)),
        (STAFF_MARKER, staff_sheet(submission)),
    ];
    let mut rows = Vec::new();
    for (index, (marker, sheet)) in sections.into_iter().enumerate() {
        if index > 0 {
            rows.push(Vec::new());
        }
        rows.push(vec![marker.to_string()]);
        rows.push(owned(sheet.headers));
        rows.extend(sheet.rows);
    }
    rows
}

pub fn player_cells(player: &PlayerRow) -> [&str; 6] {
    [
        player.number.as_str(),
        player.jersey_number.as_str(),
        player.first_name.as_str(),
        player.last_name.as_str(),
        player.jersey_name.as_str(),
        player.position.label(),
    ]
}

pub fn staff_cells(member: &StaffRow) -> [&str; 3] {
    [
        member.first_name.as_str(),
        member.last_name.as_str(),
        member.role.label(),
    ]
}

fn with_team(submission: &Submission, cells: &[&str]) -> Vec<String> {
    submission
        .team
        .leading_columns()
        .iter()
        .chain(cells.iter())
        .map(|cell| cell.to_string())
        .collect()
}

fn owned(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| cell.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::{combined_rows, player_sheet, staff_sheet, workbook_sheets};
    use roster_core::{
        Category, PlayerRow, Position, Sex, StaffRole, StaffRow, Submission, SubmissionId, Team,
    };

    fn submission() -> Submission {
        Submission {
            id: SubmissionId::new(),
            submitted_at: 0,
            team: Team::new("CV Vic", Sex::Male, Category::TerceraCatalana).unwrap(),
            players: vec![PlayerRow {
                number: "1".to_string(),
                jersey_number: "12".to_string(),
                first_name: "Nil".to_string(),
                last_name: "Soler".to_string(),
                jersey_name: "SOLER".to_string(),
                position: Position::MiddleBlocker,
            }],
            staff: vec![StaffRow {
                first_name: "Eva".to_string(),
                last_name: "Mas".to_string(),
                role: StaffRole::HeadCoach,
            }],
        }
    }

    #[test]
    fn data_rows_lead_with_team_metadata() {
        let sheet = player_sheet(&submission());
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(
            sheet.rows[0],
            vec!["CV Vic", "Masculí", "3C", "1", "12", "Nil", "Soler", "SOLER", "Central"]
        );
        assert_eq!(sheet.rows[0].len(), sheet.headers.len());

        let staff = staff_sheet(&submission());
        assert_eq!(
            staff.rows[0],
            vec!["CV Vic", "Masculí", "3C", "Eva", "Mas", "Entrenador/a"]
        );
    }

    #[test]
    fn workbook_keeps_empty_record_sheets() {
        let mut submission = submission();
        submission.staff.clear();
        let sheets = workbook_sheets(&submission);
        let names: Vec<&str> = sheets.iter().map(|sheet| sheet.name).collect();
        assert_eq!(names, vec!["Team", "Players", "Staff"]);
        assert!(sheets[2].rows.is_empty());
        assert_eq!(sheets[2].headers.len(), 6);
    }

    #[test]
    fn combined_rows_mark_each_section() {
        let rows = combined_rows(&submission());
        let markers: Vec<&str> = rows
            .iter()
            .filter(|row| row.len() == 1)
            .map(|row| row[0].as_str())
            .collect();
        assert_eq!(markers, vec!["TEAM", "PLAYERS", "STAFF"]);
        assert_eq!(rows[0], vec!["TEAM"]);
        assert_eq!(rows[2], vec!["CV Vic", "Masculí", "3C"]);
        assert!(rows[3].is_empty());
        assert_eq!(rows[4], vec!["PLAYERS"]);
    }
}
