use crate::models::{BookingAction, BookingStatus, Notice};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Rejected(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("cannot {action} a booking that is {from}")]
    IllegalTransition {
        from: BookingStatus,
        action: BookingAction,
    },

    #[error("a request for booking {0} is already in flight")]
    InFlight(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("local store error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// True when the failure happened before anything was sent to the backend.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            AppError::Validation(_)
                | AppError::IllegalTransition { .. }
                | AppError::InFlight(_)
                | AppError::NotFound(_)
        )
    }
}

impl From<&AppError> for Notice {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::Validation(msg) | AppError::Rejected(msg) => Notice::error("Error", msg),
            AppError::Transport(_) | AppError::InvalidResponse(_) => {
                Notice::error("Error", "Server error.")
            }
            AppError::IllegalTransition { .. } | AppError::InFlight(_) | AppError::NotFound(_) => {
                Notice::error("Error", err.to_string())
            }
            AppError::Database(_) | AppError::Config(_) => Notice::error("Error", err.to_string()),
        }
    }
}
