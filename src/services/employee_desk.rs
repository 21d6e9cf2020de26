//! The employee's order screen: the booking state machine plus the OTP dialog.
//!
//! Every action is checked against [`BookingStatus::next`] before a request is
//! made, and a booking with a request in flight refuses further actions until
//! that request settles. Local state changes only after the backend confirms,
//! so a failed request leaves nothing to roll back.

use std::collections::HashSet;
use std::fmt::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::DateTime;

use crate::errors::AppError;
use crate::models::{Booking, BookingAction, BookingStatus, Employee, Notice};
use crate::services::backend::Backend;

pub const EMPTY_STATE: &str = "No orders found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpDialog {
    pub booking_id: String,
    pub entered: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpOutcome {
    /// Booking is now confirmed and the dialog has closed.
    Confirmed(Notice),
    /// Dialog stays open showing this inline error.
    Retry { error: String },
}

struct DeskState {
    employee: Employee,
    orders: Vec<Booking>,
    in_flight: HashSet<String>,
    otp: Option<OtpDialog>,
}

pub struct EmployeeDesk {
    backend: Arc<dyn Backend>,
    state: Mutex<DeskState>,
}

/// Releases a booking's in-flight slot however the request ends.
struct InFlightGuard<'a> {
    state: &'a Mutex<DeskState>,
    booking_id: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.in_flight.remove(&self.booking_id);
    }
}

impl EmployeeDesk {
    /// Fetches the employee record, then the bookings assigned to them.
    pub async fn load(backend: Arc<dyn Backend>, email: Option<&str>) -> Result<Self, AppError> {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::Validation("No user email provided".into()))?;

        let employee = backend.employee_by_email(email).await?;
        let orders = backend.bookings_for_employee(&employee.id).await?;
        tracing::info!(employee_id = %employee.id, orders = orders.len(), "loaded employee orders");

        Ok(Self {
            backend,
            state: Mutex::new(DeskState {
                employee,
                orders,
                in_flight: HashSet::new(),
                otp: None,
            }),
        })
    }

    fn state(&self) -> MutexGuard<'_, DeskState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn employee(&self) -> Employee {
        self.state().employee.clone()
    }

    pub fn orders(&self) -> Vec<Booking> {
        self.state().orders.clone()
    }

    pub fn status_of(&self, booking_id: &str) -> Option<BookingStatus> {
        self.state()
            .orders
            .iter()
            .find(|b| b.id == booking_id)
            .map(|b| b.status)
    }

    pub fn otp_dialog(&self) -> Option<OtpDialog> {
        self.state().otp.clone()
    }

    pub async fn accept(&self, booking_id: &str) -> Result<Notice, AppError> {
        self.transition(booking_id, BookingAction::Accept, None).await?;
        // the code is issued server-side; the employee opens the dialog when they have it
        Ok(Notice::success(
            "Success",
            "Booking accepted! Please validate OTP to confirm.",
        ))
    }

    pub async fn reject(&self, booking_id: &str) -> Result<Notice, AppError> {
        self.transition(booking_id, BookingAction::Reject, None).await?;
        Ok(Notice::success("Success", "Booking rejected!"))
    }

    pub fn open_otp(&self, booking_id: &str) -> Result<(), AppError> {
        let mut state = self.state();
        let from = find(&state.orders, booking_id)?.status;
        if from.next(BookingAction::ConfirmOtp).is_none() {
            return Err(AppError::IllegalTransition {
                from,
                action: BookingAction::ConfirmOtp,
            });
        }
        state.otp = Some(OtpDialog {
            booking_id: booking_id.to_string(),
            entered: String::new(),
            error: None,
        });
        Ok(())
    }

    pub fn enter_otp(&self, code: &str) {
        if let Some(dialog) = self.state().otp.as_mut() {
            dialog.entered = code.trim().to_string();
        }
    }

    pub fn close_otp(&self) {
        self.state().otp = None;
    }

    pub async fn submit_otp(&self) -> Result<OtpOutcome, AppError> {
        let (booking_id, code) = {
            let mut state = self.state();
            let dialog = state
                .otp
                .as_mut()
                .ok_or_else(|| AppError::Validation("No OTP dialog is open".into()))?;
            if dialog.entered.is_empty() {
                let error = "Please enter the OTP".to_string();
                dialog.error = Some(error.clone());
                return Ok(OtpOutcome::Retry { error });
            }
            (dialog.booking_id.clone(), dialog.entered.clone())
        };

        match self
            .transition(&booking_id, BookingAction::ConfirmOtp, Some(&code))
            .await
        {
            Ok(()) => {
                self.close_otp();
                Ok(OtpOutcome::Confirmed(Notice::success(
                    "Success",
                    "OTP validated successfully. Booking confirmed!",
                )))
            }
            Err(
                e @ (AppError::Rejected(_)
                | AppError::Transport(_)
                | AppError::InvalidResponse(_)),
            ) => {
                let error = e.to_string();
                if let Some(dialog) = self.state().otp.as_mut() {
                    if dialog.booking_id == booking_id {
                        dialog.error = Some(error.clone());
                    }
                }
                Ok(OtpOutcome::Retry { error })
            }
            Err(e) => Err(e),
        }
    }

    async fn transition(
        &self,
        booking_id: &str,
        action: BookingAction,
        otp: Option<&str>,
    ) -> Result<(), AppError> {
        let (next, _guard) = {
            let mut state = self.state();
            let from = find(&state.orders, booking_id)?.status;
            let next = from
                .next(action)
                .ok_or(AppError::IllegalTransition { from, action })?;
            if !state.in_flight.insert(booking_id.to_string()) {
                return Err(AppError::InFlight(booking_id.to_string()));
            }
            (
                next,
                InFlightGuard {
                    state: &self.state,
                    booking_id: booking_id.to_string(),
                },
            )
        };

        let result = match action {
            BookingAction::ConfirmOtp => {
                self.backend
                    .validate_otp(booking_id, otp.unwrap_or_default())
                    .await
            }
            BookingAction::Accept | BookingAction::Reject => {
                self.backend.update_booking_status(booking_id, next).await
            }
        };

        if let Err(e) = result {
            tracing::warn!(booking_id, %action, error = %e, "booking transition failed");
            return Err(e);
        }

        {
            let mut state = self.state();
            if let Some(booking) = state.orders.iter_mut().find(|b| b.id == booking_id) {
                booking.status = next;
            }
        }
        tracing::info!(booking_id, status = %next, "booking status updated");
        Ok(())
    }

    pub fn render(&self) -> String {
        let state = self.state();
        let employee = &state.employee;

        let mut out = String::new();
        let _ = writeln!(out, "Hi, {}", employee.name);
        let _ = writeln!(out, "Username: {}", employee.name);
        let _ = writeln!(out, "Field of Work: {}", employee.field_of_work);
        let _ = writeln!(out, "Email: {}", employee.email);
        let _ = writeln!(
            out,
            "Phone Number: {}",
            employee.phone.as_deref().unwrap_or("Not provided")
        );
        out.push_str("\nMy Orders\n");

        if state.orders.is_empty() {
            out.push_str(EMPTY_STATE);
            out.push('\n');
            return out;
        }

        for order in &state.orders {
            let _ = writeln!(
                out,
                "- [{}] {}, {} - {}",
                order.id, order.address, order.city, order.pincode
            );
            let _ = writeln!(out, "  Date & Time: {}", display_date_time(&order.date_time));
            let _ = writeln!(out, "  Description: {}", order.description);
            let _ = writeln!(out, "  Phone: {}", order.phone);
            let _ = writeln!(out, "  Status: {}", order.status);
            let actions = order.status.allowed_actions();
            if !actions.is_empty() {
                let labels: Vec<_> = actions.iter().map(BookingAction::label).collect();
                let _ = writeln!(out, "  Actions: {}", labels.join(" | "));
            }
        }
        out
    }
}

fn find<'a>(orders: &'a [Booking], booking_id: &str) -> Result<&'a Booking, AppError> {
    orders
        .iter()
        .find(|b| b.id == booking_id)
        .ok_or_else(|| AppError::NotFound(format!("booking {booking_id}")))
}

/// Backend timestamps arrive as RFC 3339; bookings created by this client use
/// the plain schedule format and are shown as-is.
fn display_date_time(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}
