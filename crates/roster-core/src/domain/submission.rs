use crate::domain::ids::SubmissionId;
use crate::domain::player::PlayerRow;
use crate::domain::row::RawRow;
use crate::domain::staff::StaffRow;
use crate::domain::team::Team;
use serde::{Deserialize, Deserializer, Serialize};

/// Team fields exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TeamForm {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sex: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
}

/// Raw form submission, before normalization and validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubmissionForm {
    #[serde(deserialize_with = "null_as_default")]
    pub team: TeamForm,
    #[serde(deserialize_with = "null_as_default")]
    pub players: Vec<RawRow>,
    #[serde(deserialize_with = "null_as_default")]
    pub staff: Vec<RawRow>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A validated submission: cleaned rows in submission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub submitted_at: i64,
    pub team: Team,
    pub players: Vec<PlayerRow>,
    pub staff: Vec<StaffRow>,
}
