pub mod domain;
pub mod dto;
pub mod error;
pub mod rules;
pub mod text;

pub use domain::*;
pub use dto::*;
pub use error::CoreError;
pub use rules::*;
