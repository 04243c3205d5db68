pub mod error;
pub mod registry;

pub use error::UnknownSchemeError;
pub use registry::{get, list_grades, list_scheme_ids, GradingScheme, SchemeId};
