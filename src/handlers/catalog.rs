use std::fmt::Write;

use crate::models::FieldOfWork;
use crate::services::{auth, catalog};
use crate::state::AppState;

use super::Output;

/// The home screen: every category, plus whether an employee is signed in on
/// this device.
pub fn categories(state: &AppState) -> Output {
    let mut body = String::from("Categories\n");
    for field in FieldOfWork::ALL {
        let _ = writeln!(body, "- {field}");
    }
    match auth::logged_in_employee(&state.store) {
        Ok(Some(email)) => {
            let _ = writeln!(body, "\nEmployee signed in: {email}");
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "could not read employee marker"),
    }
    Output::screen(body)
}

pub async fn workers(state: &AppState, field: FieldOfWork) -> Output {
    let screen = catalog::list_category(state.backend.as_ref(), field).await;
    Output::screen(screen.render())
}
