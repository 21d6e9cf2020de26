use crate::models::Route;
use crate::services::auth::{self, EmployeeRegistration};
use crate::state::AppState;

use super::{catalog, employee, Output};

pub async fn user_login(state: &AppState, email: &str, password: &str) -> Output {
    match auth::user_login(state.backend.as_ref(), email, password).await {
        Ok(signed_in) => follow(state, signed_in.route, Output::notice(signed_in.notice)).await,
        Err(e) => e.into(),
    }
}

pub async fn user_signup(
    state: &AppState,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Output {
    match auth::user_signup(state.backend.as_ref(), email, password, confirm_password).await {
        Ok(signed_in) => follow(state, signed_in.route, Output::notice(signed_in.notice)).await,
        Err(e) => e.into(),
    }
}

pub async fn employee_login(state: &AppState, email: &str, password: &str) -> Output {
    match auth::employee_login(state.backend.as_ref(), &state.store, email, password).await {
        Ok(signed_in) => follow(state, signed_in.route, Output::notice(signed_in.notice)).await,
        Err(e) => e.into(),
    }
}

pub async fn employee_signup(state: &AppState, registration: &EmployeeRegistration) -> Output {
    match auth::employee_signup(state.backend.as_ref(), &state.store, registration).await {
        Ok(signed_in) => follow(state, signed_in.route, Output::notice(signed_in.notice)).await,
        Err(e) => e.into(),
    }
}

pub fn employee_logout(state: &AppState) -> Output {
    match auth::employee_logout(&state.store) {
        Ok(_) => Output::screen("Logged out.\n"),
        Err(e) => e.into(),
    }
}

/// Where this client points and who is signed in on this device.
pub fn status(state: &AppState) -> Output {
    let mut body = format!(
        "Backend: {}\nLocal store: {}\n",
        state.config.api_url, state.config.database_url
    );
    match auth::employee_marker(&state.store) {
        Ok(Some(marker)) => body.push_str(&format!(
            "Employee signed in: {} (since {} UTC)\n",
            marker.email,
            marker.logged_in_at.format("%Y-%m-%d %H:%M")
        )),
        Ok(None) => body.push_str("No employee signed in.\n"),
        Err(e) => return e.into(),
    }
    Output::screen(body)
}

/// Lands on the screen a successful sign-in routes to.
async fn follow(state: &AppState, route: Route, out: Output) -> Output {
    let landed = match &route {
        Route::EmployeeHome { email } => employee::orders(state, Some(email)).await,
        Route::MyBookings | Route::Homepage => catalog::categories(state),
    };
    // a failed landing screen replaces the sign-in notice with its own error
    if landed.is_error() {
        return landed;
    }
    out.with_body(landed.body)
}
