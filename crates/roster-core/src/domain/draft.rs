use crate::domain::row::RawRow;
use crate::domain::submission::{SubmissionForm, TeamForm};
use crate::error::CoreError;
use crate::rules::schema::{RecordKind, RecordSchema};
use serde::{Deserialize, Serialize};

/// Editing-session state for one roster: the row sets a user is filling in
/// before submitting. Owned by the session, never shared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterDraft {
    form: SubmissionForm,
    placeholder: String,
}

impl RosterDraft {
    pub fn new(placeholder: &str) -> Self {
        Self {
            form: SubmissionForm::default(),
            placeholder: placeholder.to_string(),
        }
    }

    /// A draft pre-filled with blank rows, choice cells showing the placeholder.
    pub fn with_blank_rows(placeholder: &str, players: usize, staff: usize) -> Self {
        let mut draft = Self::new(placeholder);
        draft.form.team = TeamForm {
            name: String::new(),
            sex: placeholder.to_string(),
            category: placeholder.to_string(),
        };
        for _ in 0..players {
            draft.add_row(RecordKind::Players);
        }
        for _ in 0..staff {
            draft.add_row(RecordKind::Staff);
        }
        draft
    }

    pub fn rows(&self, kind: RecordKind) -> &[RawRow] {
        match kind {
            RecordKind::Players => &self.form.players,
            RecordKind::Staff => &self.form.staff,
        }
    }

    /// Appends a blank row and returns its 0-based index.
    pub fn add_row(&mut self, kind: RecordKind) -> usize {
        let schema = RecordSchema::for_kind(kind);
        let row = RawRow::from_pairs(schema.columns.iter().map(|column| {
            let value = if *column == schema.required {
                self.placeholder.clone()
            } else {
                String::new()
            };
            (*column, value)
        }));
        let rows = self.rows_mut(kind);
        rows.push(row);
        rows.len() - 1
    }

    pub fn remove_row(&mut self, kind: RecordKind, index: usize) -> Result<RawRow, CoreError> {
        let rows = self.rows_mut(kind);
        if index >= rows.len() {
            return Err(CoreError::RowOutOfRange {
                index,
                len: rows.len(),
            });
        }
        Ok(rows.remove(index))
    }

    pub fn set_cell(
        &mut self,
        kind: RecordKind,
        index: usize,
        column: &str,
        value: &str,
    ) -> Result<(), CoreError> {
        let schema = RecordSchema::for_kind(kind);
        if !schema.columns.contains(&column) {
            return Err(CoreError::UnknownColumn(column.to_string()));
        }
        let rows = self.rows_mut(kind);
        let len = rows.len();
        let row = rows
            .get_mut(index)
            .ok_or(CoreError::RowOutOfRange { index, len })?;
        row.set(column, value);
        Ok(())
    }

    pub fn form(&self) -> &SubmissionForm {
        &self.form
    }

    fn rows_mut(&mut self, kind: RecordKind) -> &mut Vec<RawRow> {
        match kind {
            RecordKind::Players => &mut self.form.players,
            RecordKind::Staff => &mut self.form.staff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RosterDraft;
    use crate::error::CoreError;
    use crate::rules::schema::{player, RecordKind};

    #[test]
    fn blank_rows_show_placeholder_in_choice_column() {
        let draft = RosterDraft::with_blank_rows("— Tria —", 2, 1);
        let players = draft.rows(RecordKind::Players);
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].cell(player::POSITION), "— Tria —");
        assert_eq!(players[0].cell(player::FIRST_NAME), "");
        assert_eq!(draft.rows(RecordKind::Staff).len(), 1);
    }

    #[test]
    fn set_cell_rejects_unknown_column_and_index() {
        let mut draft = RosterDraft::with_blank_rows("-", 1, 0);
        assert_eq!(
            draft.set_cell(RecordKind::Players, 0, "shoe_size", "44"),
            Err(CoreError::UnknownColumn("shoe_size".to_string()))
        );
        assert_eq!(
            draft.set_cell(RecordKind::Players, 3, player::FIRST_NAME, "Anna"),
            Err(CoreError::RowOutOfRange { index: 3, len: 1 })
        );
        draft
            .set_cell(RecordKind::Players, 0, player::FIRST_NAME, "Anna")
            .unwrap();
        assert_eq!(draft.form().players[0].cell(player::FIRST_NAME), "Anna");
    }

    #[test]
    fn remove_row_keeps_order_of_remaining_rows() {
        let mut draft = RosterDraft::new("-");
        for name in ["A", "B", "C"] {
            let index = draft.add_row(RecordKind::Staff);
            draft
                .set_cell(RecordKind::Staff, index, "first_name", name)
                .unwrap();
        }
        let removed = draft.remove_row(RecordKind::Staff, 1).unwrap();
        assert_eq!(removed.cell("first_name"), "B");
        let names: Vec<&str> = draft
            .rows(RecordKind::Staff)
            .iter()
            .map(|row| row.cell("first_name"))
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }
}
