use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Generation limit reached: {used} of {max} generations used")]
    QuotaExceeded { used: u32, max: u32 },
    #[error("A generation is already in progress")]
    Busy,
    #[error("{0}")]
    GenerationFailed(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl StudioError {
    /// Errors raised before any provider call is attempted.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            StudioError::InvalidInput(_) | StudioError::QuotaExceeded { .. } | StudioError::Busy
        )
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(e: serde_json::Error) -> Self {
        StudioError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for StudioError {
    fn from(e: std::io::Error) -> Self {
        StudioError::StorageError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_failed_displays_provider_message() {
        let err = StudioError::GenerationFailed("bad request".into());
        assert_eq!(err.to_string(), "bad request");
    }

    #[test]
    fn test_precondition_classification() {
        assert!(StudioError::Busy.is_precondition());
        assert!(StudioError::QuotaExceeded { used: 2, max: 2 }.is_precondition());
        assert!(StudioError::InvalidInput("empty".into()).is_precondition());
        assert!(!StudioError::GenerationFailed("x".into()).is_precondition());
        assert!(!StudioError::StorageError("x".into()).is_precondition());
    }
}
