use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("team name is required")]
    EmptyTeamName,
    #[error("invalid sex: {0}")]
    InvalidSex(String),
    #[error("invalid category: {0}")]
    InvalidCategory(String),
    #[error("invalid position: {0}")]
    InvalidPosition(String),
    #[error("invalid staff role: {0}")]
    InvalidStaffRole(String),
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("row {index} out of range (rows: {len})")]
    RowOutOfRange { index: usize, len: usize },
}
