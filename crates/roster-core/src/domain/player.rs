use crate::domain::choice::choice_type;
use crate::domain::row::RawRow;
use crate::rules::schema::player;
use serde::Serialize;

choice_type! {
    Position, InvalidPosition {
        Setter => "Col·locador/a" | "Colocador" | "Colocadora" | "Setter",
        Opposite => "Opost" | "Opuesto" | "Opposite",
        MiddleBlocker => "Central" | "Middle",
        OutsideHitter => "Receptor/a" | "Receptor" | "Receptora" | "Punta",
        Libero => "Líbero" | "Lliure",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerRow {
    pub number: String,
    pub jersey_number: String,
    pub first_name: String,
    pub last_name: String,
    pub jersey_name: String,
    pub position: Position,
}

impl PlayerRow {
    /// Builds a typed row from an already normalized raw row.
    pub fn from_clean(row: &RawRow, position: Position) -> Self {
        Self {
            number: row.cell(player::NUMBER).to_string(),
            jersey_number: row.cell(player::JERSEY_NUMBER).to_string(),
            first_name: row.cell(player::FIRST_NAME).to_string(),
            last_name: row.cell(player::LAST_NAME).to_string(),
            jersey_name: row.cell(player::JERSEY_NAME).to_string(),
            position,
        }
    }

    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }
}

pub(crate) fn join_name(first: &str, last: &str) -> String {
    match (first.is_empty(), last.is_empty()) {
        (false, false) => format!("{first} {last}"),
        (false, true) => first.to_string(),
        (true, false) => last.to_string(),
        (true, true) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayerRow, Position};
    use crate::domain::RawRow;

    #[test]
    fn position_accepts_common_spellings() {
        assert_eq!("colocadora".parse::<Position>().unwrap(), Position::Setter);
        assert_eq!("LIBERO".parse::<Position>().unwrap(), Position::Libero);
        assert_eq!("receptor/a".parse::<Position>().unwrap(), Position::OutsideHitter);
        assert!("porter".parse::<Position>().is_err());
    }

    #[test]
    fn from_clean_copies_cells() {
        let raw = RawRow::from_pairs([
            ("number", "1"),
            ("jersey_number", "7"),
            ("first_name", "Marta"),
            ("last_name", "Vila"),
            ("jersey_name", "VILA"),
        ]);
        let row = PlayerRow::from_clean(&raw, Position::Opposite);
        assert_eq!(row.jersey_number, "7");
        assert_eq!(row.full_name(), "Marta Vila");
        assert_eq!(row.position.label(), "Opost");
    }
}
