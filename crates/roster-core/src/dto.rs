use crate::domain::{Category, Position, Sex, StaffRole};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryDto {
    pub code: &'static str,
    pub name: &'static str,
}

/// Every value the form dropdowns accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoicesDto {
    pub placeholder: String,
    pub sexes: Vec<&'static str>,
    pub categories: Vec<CategoryDto>,
    pub positions: Vec<&'static str>,
    pub roles: Vec<&'static str>,
}

impl ChoicesDto {
    pub fn new(placeholder: &str) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            sexes: Sex::ALL.iter().map(|sex| sex.label()).collect(),
            categories: Category::ALL
                .iter()
                .map(|category| CategoryDto {
                    code: category.label(),
                    name: category.name(),
                })
                .collect(),
            positions: Position::ALL.iter().map(|position| position.label()).collect(),
            roles: StaffRole::ALL.iter().map(|role| role.label()).collect(),
        }
    }
}
