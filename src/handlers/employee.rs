use crate::errors::AppError;
use crate::models::Notice;
use crate::services::employee_desk::{EmployeeDesk, OtpOutcome};
use crate::state::AppState;

use super::Output;

async fn open_desk(state: &AppState, email: Option<&str>) -> Result<EmployeeDesk, Output> {
    EmployeeDesk::load(state.backend.clone(), email)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to load employee screen");
            Output::notice(Notice::error("Error", load_error_message(&e)))
                .with_body("Go to Login\n")
        })
}

/// The order screen shows the server's reason rather than a generic alert.
fn load_error_message(err: &AppError) -> String {
    match err {
        AppError::Transport(_) | AppError::InvalidResponse(_) => "Something went wrong".into(),
        other => other.to_string(),
    }
}

pub async fn orders(state: &AppState, email: Option<&str>) -> Output {
    match open_desk(state, email).await {
        Ok(desk) => Output::screen(desk.render()),
        Err(out) => out,
    }
}

pub async fn accept(state: &AppState, email: Option<&str>, booking_id: &str) -> Output {
    let desk = match open_desk(state, email).await {
        Ok(desk) => desk,
        Err(out) => return out,
    };
    match desk.accept(booking_id).await {
        Ok(notice) => Output::notice(notice).with_body(desk.render()),
        Err(e) => Output::from(e).with_body(desk.render()),
    }
}

pub async fn reject(state: &AppState, email: Option<&str>, booking_id: &str) -> Output {
    let desk = match open_desk(state, email).await {
        Ok(desk) => desk,
        Err(out) => return out,
    };
    match desk.reject(booking_id).await {
        Ok(notice) => Output::notice(notice).with_body(desk.render()),
        Err(e) => Output::from(e).with_body(desk.render()),
    }
}

pub async fn validate_otp(
    state: &AppState,
    email: Option<&str>,
    booking_id: &str,
    otp: &str,
) -> Output {
    let desk = match open_desk(state, email).await {
        Ok(desk) => desk,
        Err(out) => return out,
    };
    if let Err(e) = desk.open_otp(booking_id) {
        return Output::from(e).with_body(desk.render());
    }
    desk.enter_otp(otp);

    match desk.submit_otp().await {
        Ok(OtpOutcome::Confirmed(notice)) => Output::notice(notice).with_body(desk.render()),
        // the dialog stays open, but the confirmation itself failed
        Ok(OtpOutcome::Retry { error }) => Output::notice(Notice::error("Error", error.as_str()))
            .with_body(format!("Enter OTP to confirm booking\n{error}\n")),
        Err(e) => Output::from(e).with_body(desk.render()),
    }
}
