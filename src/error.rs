use crate::trip::TripId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TripError>;

#[derive(Debug, Error)]
pub enum TripError {
    #[error("No trip with id {0}")]
    NotFound(TripId),
    #[error("Trip collection is empty")]
    EmptyCollection,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid command: {0}")]
    Command(String),
    #[error("Invalid trip {id}: {reason}")]
    InvalidTrip { id: TripId, reason: String },
    #[error("{0}")]
    Generic(String),
}

impl From<String> for TripError {
    fn from(error: String) -> Self {
        TripError::Generic(error)
    }
}

impl From<&str> for TripError {
    fn from(error: &str) -> Self {
        TripError::Generic(error.to_string())
    }
}
