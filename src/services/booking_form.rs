use chrono::NaiveDate;

use crate::errors::AppError;
use crate::models::{EmployeeSummary, NewBooking, Notice, Route, Session};
use crate::services::backend::Backend;
use crate::services::validation::{self, BookingFields, SCHEDULE_FORMAT};

/// Booking form pre-bound to the worker it was opened for.
#[derive(Debug, Clone)]
pub struct BookingForm {
    pub employee: EmployeeSummary,
    pub service_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub date_time: String,
    pub description: String,
}

/// Shown for any refusal of a booking, whatever the server said.
pub const BOOKING_FAILED: &str = "Booking failed. Try again.";

#[derive(Debug)]
pub struct Submitted {
    pub notice: Notice,
    pub route: Route,
}

impl BookingForm {
    pub fn open(employee: EmployeeSummary, service_name: impl Into<String>) -> Self {
        Self {
            employee,
            service_name: service_name.into(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            pincode: String::new(),
            date_time: String::new(),
            description: String::new(),
        }
    }

    pub fn title(&self) -> String {
        format!("Book Service - {} ({})", self.employee.name, self.service_name)
    }

    pub fn reset(&mut self) {
        self.phone.clear();
        self.address.clear();
        self.city.clear();
        self.pincode.clear();
        self.date_time.clear();
        self.description.clear();
    }

    /// Validates the form, then builds the creation payload.
    pub fn payload(&self, session: &Session, today: NaiveDate) -> Result<NewBooking, AppError> {
        let scheduled = validation::validate_booking(
            &BookingFields {
                phone: &self.phone,
                address: &self.address,
                city: &self.city,
                pincode: &self.pincode,
                date_time: &self.date_time,
                description: &self.description,
            },
            today,
        )?;

        Ok(NewBooking {
            user_email: session.user_email.clone(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            pincode: self.pincode.trim().to_string(),
            date_time: scheduled.format(SCHEDULE_FORMAT).to_string(),
            description: self.description.trim().to_string(),
            employee_id: self.employee.id.clone(),
        })
    }

    /// Sends exactly one creation request when the form is valid. On success
    /// the form is cleared and the flow moves to the user's bookings.
    pub async fn submit(
        &mut self,
        backend: &dyn Backend,
        session: &Session,
        today: NaiveDate,
    ) -> Result<Submitted, AppError> {
        let payload = self.payload(session, today)?;

        backend.create_booking(&payload).await.map_err(|e| match e {
            AppError::Rejected(reason) => {
                tracing::warn!(employee_id = %payload.employee_id, %reason, "booking rejected");
                AppError::Rejected(BOOKING_FAILED.to_string())
            }
            other => {
                tracing::error!(error = %other, "booking request failed");
                other
            }
        })?;

        tracing::info!(
            employee_id = %payload.employee_id,
            date_time = %payload.date_time,
            "booking created"
        );
        self.reset();

        Ok(Submitted {
            notice: Notice::success("Success", "Booking confirmed!"),
            route: Route::MyBookings,
        })
    }
}
