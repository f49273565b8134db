use crate::domain::choice::choice_type;
use crate::error::CoreError;
use serde::Serialize;

choice_type! {
    Sex, InvalidSex {
        Male => "Masculí" | "M",
        Female => "Femení" | "F",
    }
}

choice_type! {
    /// League codes; the label is the short code printed in exports.
    Category, InvalidCategory {
        Superlliga => "SL" | "Superlliga",
        Superlliga2 => "SL2" | "Superlliga 2",
        PrimeraNacional => "1N" | "Primera Nacional",
        PrimeraCatalana => "1C" | "Primera Catalana",
        SegonaCatalana => "2C" | "Segona Catalana",
        TerceraCatalana => "3C" | "Tercera Catalana",
        Junior => "JUN" | "Júnior",
        Cadet => "CAD" | "Cadet",
        Infantil => "INF" | "Infantil",
        Alevi => "ALE" | "Aleví",
    }
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Superlliga => "Superlliga",
            Category::Superlliga2 => "Superlliga 2",
            Category::PrimeraNacional => "Primera Nacional",
            Category::PrimeraCatalana => "Primera Catalana",
            Category::SegonaCatalana => "Segona Catalana",
            Category::TerceraCatalana => "Tercera Catalana",
            Category::Junior => "Júnior",
            Category::Cadet => "Cadet",
            Category::Infantil => "Infantil",
            Category::Alevi => "Aleví",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    name: String,
    sex: Sex,
    category: Category,
}

impl Team {
    pub fn new(name: &str, sex: Sex, category: Category) -> Result<Self, CoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::EmptyTeamName);
        }
        Ok(Self {
            name: name.to_string(),
            sex,
            category,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Leading columns prepended to every exported data row.
    pub fn leading_columns(&self) -> [&str; 3] {
        [self.name.as_str(), self.sex.label(), self.category.label()]
    }
}
