use crate::domain::choice::choice_type;
use crate::domain::player::join_name;
use crate::domain::row::RawRow;
use crate::rules::schema::staff;
use serde::Serialize;

choice_type! {
    StaffRole, InvalidStaffRole {
        HeadCoach => "Entrenador/a" | "Entrenador" | "Entrenadora",
        AssistantCoach => "Segon/a entrenador/a" | "Segon entrenador" | "Segona entrenadora" | "Ajudant",
        Delegate => "Delegat/da" | "Delegat" | "Delegada",
        Physio => "Fisioterapeuta" | "Fisio",
        FitnessCoach => "Preparador/a físic/a" | "Preparador físic" | "Preparadora física",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffRow {
    pub first_name: String,
    pub last_name: String,
    pub role: StaffRole,
}

impl StaffRow {
    pub fn from_clean(row: &RawRow, role: StaffRole) -> Self {
        Self {
            first_name: row.cell(staff::FIRST_NAME).to_string(),
            last_name: row.cell(staff::LAST_NAME).to_string(),
            role,
        }
    }

    pub fn full_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }
}
