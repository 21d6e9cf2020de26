pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod employee;

use std::fmt;

use crate::errors::AppError;
use crate::models::Notice;

/// What a screen shows after an operation: an optional alert and the
/// rendered screen the flow lands on.
#[derive(Debug, Clone, Default)]
pub struct Output {
    pub notice: Option<Notice>,
    pub body: String,
}

impl Output {
    pub fn screen(body: impl Into<String>) -> Self {
        Self {
            notice: None,
            body: body.into(),
        }
    }

    pub fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            body: String::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn is_error(&self) -> bool {
        self.notice.as_ref().is_some_and(Notice::is_error)
    }
}

impl From<AppError> for Output {
    fn from(err: AppError) -> Self {
        if err.is_client_side() {
            tracing::debug!(error = %err, "refused before any request");
        } else {
            tracing::warn!(error = %err, "operation failed");
        }
        Output::notice(Notice::from(&err))
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(notice) = &self.notice {
            writeln!(f, "{notice}")?;
        }
        f.write_str(&self.body)
    }
}
