mod choice;
pub mod draft;
pub mod ids;
pub mod player;
pub mod row;
pub mod staff;
pub mod submission;
pub mod team;

pub use draft::RosterDraft;
pub use ids::SubmissionId;
pub use player::{PlayerRow, Position};
pub use row::RawRow;
pub use staff::{StaffRole, StaffRow};
pub use submission::{Submission, SubmissionForm, TeamForm};
pub use team::{Category, Sex, Team};
