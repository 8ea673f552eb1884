//! Database error types.

use crate::error::ErrorLocation;
use derive_more::{Display, Error};

/// Failure reading or writing game history.
#[derive(Debug, Clone, Display, Error)]
#[display("Database error: {} at {}", message, location)]
pub struct DbError {
    /// What went wrong.
    pub message: String,
    /// Where it was raised.
    pub location: ErrorLocation,
}

impl DbError {
    /// Creates an error at the caller's location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Diesel error: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Connection error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_records_call_site() {
        let expected_line = line!() + 1;
        let err = DbError::from(diesel::result::Error::NotFound);
        assert_eq!(err.location.file, file!());
        assert_eq!(err.location.line, expected_line);
        assert!(err.message.starts_with("Diesel error:"));
        assert!(err.to_string().ends_with(&format!("at {}:{}", file!(), expected_line)));
    }
}
