mod camp;
mod validation;

pub use camp::{ApiErrorBody, ApiErrorObject, CampError, Entity};
pub use validation::ValidationError;
