use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub date_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub otp: Option<String>,
}

/// Payload of `POST /api/bookings`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub user_email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub date_time: String,
    pub description: String,
    pub employee_id: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum BookingStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Confirmed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum BookingAction {
    Accept,
    Reject,
    ConfirmOtp,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Accepted => "Accepted",
            BookingStatus::Rejected => "Rejected",
            BookingStatus::Confirmed => "Confirmed",
        }
    }

    /// The only place legal transitions are defined.
    pub fn next(self, action: BookingAction) -> Option<BookingStatus> {
        match (self, action) {
            (BookingStatus::Pending, BookingAction::Accept) => Some(BookingStatus::Accepted),
            (BookingStatus::Pending, BookingAction::Reject) => Some(BookingStatus::Rejected),
            (BookingStatus::Accepted, BookingAction::ConfirmOtp) => Some(BookingStatus::Confirmed),
            _ => None,
        }
    }

    pub fn allowed_actions(self) -> Vec<BookingAction> {
        BookingAction::ALL
            .into_iter()
            .filter(|action| self.next(*action).is_some())
            .collect()
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_actions().is_empty()
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl BookingAction {
    pub const ALL: [BookingAction; 3] = [
        BookingAction::Accept,
        BookingAction::Reject,
        BookingAction::ConfirmOtp,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BookingAction::Accept => "Accept",
            BookingAction::Reject => "Reject",
            BookingAction::ConfirmOtp => "Validate OTP",
        }
    }
}

impl fmt::Display for BookingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingAction::Accept => f.write_str("accept"),
            BookingAction::Reject => f.write_str("reject"),
            BookingAction::ConfirmOtp => f.write_str("confirm"),
        }
    }
}
