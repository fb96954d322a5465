use thiserror::Error as ThisError;

/// A field that failed its domain constraint before a write was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    #[error("Campers must have a name that is a string.")]
    InvalidName,

    #[error("Age must be a number between 8 & 18.")]
    InvalidAge,

    #[error("Time must be a number smaller than 24.")]
    InvalidTime,
}

impl ValidationError {
    /// Request field the failure is reported against.
    pub fn field(self) -> &'static str {
        match self {
            ValidationError::InvalidName => "name",
            ValidationError::InvalidAge => "age",
            ValidationError::InvalidTime => "time",
        }
    }
}
