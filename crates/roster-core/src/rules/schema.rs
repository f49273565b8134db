use serde::{Deserialize, Serialize};

pub const DEFAULT_PLACEHOLDER: &str = "— Tria —";

pub mod player {
    pub const NUMBER: &str = "number";
    pub const JERSEY_NUMBER: &str = "jersey_number";
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const JERSEY_NAME: &str = "jersey_name";
    pub const POSITION: &str = "position";

    pub const COLUMNS: &[&str] = &[
        NUMBER,
        JERSEY_NUMBER,
        FIRST_NAME,
        LAST_NAME,
        JERSEY_NAME,
        POSITION,
    ];
}

pub mod staff {
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const ROLE: &str = "role";

    pub const COLUMNS: &[&str] = &[FIRST_NAME, LAST_NAME, ROLE];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Players,
    Staff,
}

impl RecordKind {
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Players => "Players",
            RecordKind::Staff => "Staff",
        }
    }
}

/// Column layout of one repeating record set and the choice column that must
/// be filled on every present row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    pub kind: RecordKind,
    pub columns: &'static [&'static str],
    pub required: &'static str,
}

pub const PLAYER_SCHEMA: RecordSchema = RecordSchema {
    kind: RecordKind::Players,
    columns: player::COLUMNS,
    required: player::POSITION,
};

pub const STAFF_SCHEMA: RecordSchema = RecordSchema {
    kind: RecordKind::Staff,
    columns: staff::COLUMNS,
    required: staff::ROLE,
};

impl RecordSchema {
    pub fn for_kind(kind: RecordKind) -> &'static RecordSchema {
        match kind {
            RecordKind::Players => &PLAYER_SCHEMA,
            RecordKind::Staff => &STAFF_SCHEMA,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRules {
    pub placeholder: String,
}

impl Default for PipelineRules {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}
