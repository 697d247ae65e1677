use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Floor number {0} already exists")]
    DuplicateFloorNumber(u32),

    #[error("Room number {0} already exists on this floor")]
    DuplicateRoomNumber(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("{device} is not allowed in a {room_type} room")]
    IncompatibleType { room_type: String, device: String },

    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Date {0} is in the past")]
    PastDate(String),

    #[error("Sensor is not operational (status: {0})")]
    NotOperational(String),

    #[error("Version conflict: expected {expected}, found {actual}")]
    ConcurrencyConflict { expected: u64, actual: u64 },
}

impl DomainError {
    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
