//! Response envelopes of the booking backend.

use serde::{Deserialize, Serialize};

use super::{Booking, Employee, EmployeeSummary};

/// Common `{ success, message }` acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeesEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub employees: Vec<EmployeeSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub employee: Option<Employee>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingsEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub booking: Option<Booking>,
}

/// `/api/authRoutes/{login,signup}` reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeAuthEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// `/api/auth/{login,signup}` reply. Success is signalled by the HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserAuthEnvelope {
    #[serde(default)]
    pub ok: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusUpdate {
    pub status: super::BookingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OtpSubmission {
    pub otp: String,
}
