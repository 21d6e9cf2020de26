use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::Instrument;
use uuid::Uuid;

use super::Backend;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::api::{
    Ack, BookingEnvelope, BookingsEnvelope, EmployeeAuthEnvelope, EmployeeEnvelope,
    EmployeesEnvelope, OtpSubmission, StatusUpdate, UserAuthEnvelope,
};
use crate::models::{
    Booking, BookingStatus, Credentials, Employee, EmployeeSignup, EmployeeSummary, FieldOfWork,
    NewBooking,
};

pub struct HttpBackend {
    base_url: Url,
    client: Client,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::Config(format!("invalid API_URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!("API_URL {base_url} cannot be a base URL")));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::new(
            &config.api_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, AppError> {
        let request_id = Uuid::new_v4();
        let request = request.header("x-request-id", request_id.to_string());

        let result: Result<T, AppError> = async move {
            let resp = request.send().await.map_err(|e| {
                tracing::error!(error = %e, "backend request failed");
                AppError::Transport(e)
            })?;

            let status = resp.status();
            tracing::debug!(url = %resp.url(), %status, "backend responded");

            let text = resp.text().await?;
            let body = serde_json::from_str(&text).map_err(|e| {
                tracing::error!(%status, error = %e, "undecodable backend response");
                AppError::InvalidResponse(format!("{status}: {e}"))
            })?;

            Ok(body)
        }
        .instrument(tracing::debug_span!("backend_request", %request_id))
        .await;
        result
    }

    async fn send_user_auth(&self, path: &str, credentials: &Credentials) -> Result<(), AppError> {
        let request_id = Uuid::new_v4();
        let request = self
            .client
            .post(self.url(&["api", "auth", path]))
            .header("x-request-id", request_id.to_string())
            .json(credentials);

        let result: Result<(), AppError> = async move {
            let resp = request.send().await?;
            let status = resp.status();
            tracing::debug!(%status, "auth/{path} responded");

            // success is decided by the status code; the body is only read for its error text
            let text = resp.text().await?;
            let body: UserAuthEnvelope = serde_json::from_str(&text).unwrap_or_default();

            if !status.is_success() || body.ok == Some(false) {
                return Err(AppError::Rejected(
                    body.error.unwrap_or_else(|| "Authentication failed".to_string()),
                ));
            }
            Ok(())
        }
        .instrument(tracing::debug_span!("backend_request", %request_id))
        .await;
        result
    }
}

fn rejected(message: Option<String>, default: &str) -> AppError {
    AppError::Rejected(
        message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default.to_string()),
    )
}

#[async_trait]
impl Backend for HttpBackend {
    async fn user_login(&self, credentials: &Credentials) -> Result<(), AppError> {
        self.send_user_auth("login", credentials).await
    }

    async fn user_signup(&self, credentials: &Credentials) -> Result<(), AppError> {
        self.send_user_auth("signup", credentials).await
    }

    async fn employee_login(&self, credentials: &Credentials) -> Result<Option<String>, AppError> {
        let body: EmployeeAuthEnvelope = self
            .send(
                self.client
                    .post(self.url(&["api", "authRoutes", "login"]))
                    .json(credentials),
            )
            .await?;

        if !body.success {
            return Err(rejected(body.message, "Invalid credentials"));
        }
        Ok(body.name)
    }

    async fn employee_signup(&self, signup: &EmployeeSignup) -> Result<(), AppError> {
        let body: EmployeeAuthEnvelope = self
            .send(
                self.client
                    .post(self.url(&["api", "authRoutes", "signup"]))
                    .json(signup),
            )
            .await?;

        if !body.success {
            return Err(rejected(body.message, "Something went wrong"));
        }
        Ok(())
    }

    async fn employees_by_field(
        &self,
        field: FieldOfWork,
    ) -> Result<Vec<EmployeeSummary>, AppError> {
        let body: EmployeesEnvelope = self
            .send(
                self.client
                    .get(self.url(&["api", "authRoutes", "employeesByField"]))
                    .query(&[("fieldOfWork", field.as_str())]),
            )
            .await?;

        if !body.success {
            return Err(rejected(body.message, "Failed to fetch employees"));
        }
        Ok(body.employees)
    }

    async fn employee_by_email(&self, email: &str) -> Result<Employee, AppError> {
        let body: EmployeeEnvelope = self
            .send(
                self.client
                    .get(self.url(&["api", "authRoutes", "employee"]))
                    .query(&[("email", email)]),
            )
            .await?;

        if !body.success {
            return Err(rejected(body.message, "Failed to fetch employee data"));
        }
        body.employee
            .ok_or_else(|| AppError::InvalidResponse("employee missing from response".into()))
    }

    async fn create_booking(&self, booking: &NewBooking) -> Result<Option<Booking>, AppError> {
        let body: BookingEnvelope = self
            .send(self.client.post(self.url(&["api", "bookings"])).json(booking))
            .await?;

        if !body.success {
            return Err(rejected(body.message, "Booking failed. Try again."));
        }
        Ok(body.booking)
    }

    async fn bookings_for_user(&self, user_email: &str) -> Result<Vec<Booking>, AppError> {
        let body: BookingsEnvelope = self
            .send(
                self.client
                    .get(self.url(&["api", "bookings"]))
                    .query(&[("userEmail", user_email)]),
            )
            .await?;

        if !body.success {
            return Err(rejected(body.message, "Failed to fetch bookings"));
        }
        Ok(body.bookings)
    }

    async fn bookings_for_employee(&self, employee_id: &str) -> Result<Vec<Booking>, AppError> {
        let body: BookingsEnvelope = self
            .send(
                self.client
                    .get(self.url(&["api", "bookings", "employee", employee_id])),
            )
            .await?;

        if !body.success {
            return Err(rejected(body.message, "Failed to fetch orders"));
        }
        Ok(body.bookings)
    }

    async fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
    ) -> Result<(), AppError> {
        let body: Ack = self
            .send(
                self.client
                    .patch(self.url(&["api", "bookings", booking_id, "status"]))
                    .json(&StatusUpdate { status }),
            )
            .await?;

        if !body.success {
            return Err(rejected(body.message, "Failed to update status"));
        }
        Ok(())
    }

    async fn validate_otp(&self, booking_id: &str, otp: &str) -> Result<(), AppError> {
        let body: Ack = self
            .send(
                self.client
                    .patch(self.url(&["api", "bookings", booking_id, "validate-otp"]))
                    .json(&OtpSubmission {
                        otp: otp.to_string(),
                    }),
            )
            .await?;

        if !body.success {
            return Err(rejected(body.message, "Invalid OTP"));
        }
        Ok(())
    }
}
