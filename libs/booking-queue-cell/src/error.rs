use thiserror::Error;

use doctor_cell::{DoctorError, DoctorId, TokenId, TokenStatus};
use shared_database::StoreError;
use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("No active doctors available")]
    NoActiveDoctor,

    #[error("Doctor not found: {0}")]
    DoctorNotFound(DoctorId),

    #[error("Session completed for doctor {doctor_id}. Sorry, book next time")]
    SessionComplete { doctor_id: DoctorId },

    #[error("Waiting list is full ({waiting} waiting) for doctor {doctor_id}. Sorry, book next time")]
    WaitingListFull { doctor_id: DoctorId, waiting: usize },

    #[error("Queue type invalid: {0}")]
    QueueTypeInvalid(String),

    #[error("Token {token_id} not found for doctor {doctor_id}")]
    TokenNotFound { doctor_id: DoctorId, token_id: TokenId },

    #[error("Invalid status transition for token {token_id} from {from:?} to {to:?}")]
    InvalidStatusTransition {
        token_id: TokenId,
        from: TokenStatus,
        to: TokenStatus,
    },

    #[error("Invalid doctor: {0}")]
    InvalidDoctor(#[from] DoctorError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<QueueError> for AppError {
    fn from(err: QueueError) -> Self {
        let message = err.to_string();
        match err {
            QueueError::NoActiveDoctor
            | QueueError::DoctorNotFound(_)
            | QueueError::TokenNotFound { .. } => AppError::NotFound(message),
            QueueError::SessionComplete { .. }
            | QueueError::WaitingListFull { .. }
            | QueueError::InvalidStatusTransition { .. } => AppError::Conflict(message),
            QueueError::QueueTypeInvalid(_)
            | QueueError::InvalidDoctor(_)
            | QueueError::ValidationError(_) => AppError::BadRequest(message),
            QueueError::Persistence(_) | QueueError::SerializationError(_) => {
                AppError::Storage(message)
            }
        }
    }
}
