use chrono::NaiveDate;

use crate::models::{FieldOfWork, Session};
use crate::services::catalog;
use crate::services::my_bookings::MyBookings;
use crate::state::AppState;

use super::Output;

/// Booking form input as entered by the user.
#[derive(Debug, Clone, Default)]
pub struct BookingInput {
    pub phone: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub date_time: String,
    pub description: String,
}

pub async fn my_bookings(state: &AppState, session: &Session) -> Output {
    let screen = MyBookings::load(state.backend.as_ref(), session).await;
    Output::screen(screen.render())
}

/// Opens the form for one worker of `field`, submits it, and on success lands
/// on the refreshed bookings list.
pub async fn book(
    state: &AppState,
    session: &Session,
    field: FieldOfWork,
    employee_id: &str,
    input: BookingInput,
    today: NaiveDate,
) -> Output {
    // the worker must come from a successful read, not the empty fallback
    let listing = match catalog::fetch_category(state.backend.as_ref(), field).await {
        Ok(listing) => listing,
        Err(e) => {
            tracing::error!(field = %field, error = %e, "failed to fetch employees");
            return e.into();
        }
    };
    let mut form = match listing.open_booking(employee_id) {
        Ok(form) => form,
        Err(e) => return e.into(),
    };
    tracing::debug!(title = %form.title(), "booking form opened");

    form.phone = input.phone;
    form.address = input.address;
    form.city = input.city;
    form.pincode = input.pincode;
    form.date_time = input.date_time;
    form.description = input.description;

    match form.submit(state.backend.as_ref(), session, today).await {
        Ok(submitted) => {
            let bookings = MyBookings::load(state.backend.as_ref(), session).await;
            Output::notice(submitted.notice).with_body(bookings.render())
        }
        Err(e) => e.into(),
    }
}
