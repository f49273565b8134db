pub mod export;
pub mod normalize;
pub mod schema;
pub mod validation;

pub use export::{ExportFormat, FileNaming};
pub use normalize::{clean_cell, is_blank, is_present, normalize, normalize_row};
pub use schema::{
    PipelineRules, RecordKind, RecordSchema, DEFAULT_PLACEHOLDER, PLAYER_SCHEMA, STAFF_SCHEMA,
};
pub use validation::{
    validate, validate_record_set, validate_submission, RowError, ValidationErrors,
    ValidationIssue,
};
