pub mod http;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::{
    Booking, BookingStatus, Credentials, Employee, EmployeeSignup, EmployeeSummary, FieldOfWork,
    NewBooking,
};

/// The booking backend. Every method is one request; nothing is retried.
///
/// An application-level refusal (`success: false`, or a non-2xx status on the
/// end-user auth surface) comes back as [`AppError::Rejected`] carrying the
/// server's message when it sent one.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn user_login(&self, credentials: &Credentials) -> Result<(), AppError>;

    async fn user_signup(&self, credentials: &Credentials) -> Result<(), AppError>;

    /// Returns the employee's display name when the backend includes it.
    async fn employee_login(&self, credentials: &Credentials) -> Result<Option<String>, AppError>;

    async fn employee_signup(&self, signup: &EmployeeSignup) -> Result<(), AppError>;

    async fn employees_by_field(&self, field: FieldOfWork)
        -> Result<Vec<EmployeeSummary>, AppError>;

    async fn employee_by_email(&self, email: &str) -> Result<Employee, AppError>;

    async fn create_booking(&self, booking: &NewBooking) -> Result<Option<Booking>, AppError>;

    async fn bookings_for_user(&self, user_email: &str) -> Result<Vec<Booking>, AppError>;

    async fn bookings_for_employee(&self, employee_id: &str) -> Result<Vec<Booking>, AppError>;

    async fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
    ) -> Result<(), AppError>;

    async fn validate_otp(&self, booking_id: &str, otp: &str) -> Result<(), AppError>;
}
