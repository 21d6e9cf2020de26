use std::fmt::Write;

use crate::models::{Booking, Session};
use crate::services::backend::Backend;

pub const EMPTY_STATE: &str = "No bookings found.";

#[derive(Debug, Clone, Default)]
pub struct MyBookings {
    pub bookings: Vec<Booking>,
}

impl MyBookings {
    /// Re-fetched every time the screen is shown; a failed read shows the
    /// empty state.
    pub async fn load(backend: &dyn Backend, session: &Session) -> Self {
        let bookings = match backend.bookings_for_user(&session.user_email).await {
            Ok(bookings) => bookings,
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch bookings");
                Vec::new()
            }
        };
        Self { bookings }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("My Bookings\n");
        if self.bookings.is_empty() {
            out.push_str(EMPTY_STATE);
            out.push('\n');
            return out;
        }
        for b in &self.bookings {
            let _ = writeln!(out, "- Service: {}", b.employee_name.as_deref().unwrap_or("N/A"));
            let _ = writeln!(out, "  Date & Time: {}", b.date_time);
            let _ = writeln!(out, "  Address: {}", b.address);
            let _ = writeln!(out, "  Description: {}", b.description);
            let _ = writeln!(out, "  Status: {}", b.status);
            let _ = writeln!(out, "  OTP: {}", b.otp.as_deref().unwrap_or("N/A"));
        }
        out
    }
}
