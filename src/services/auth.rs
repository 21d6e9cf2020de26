//! Sign-in for both roles. End users and employees authenticate against
//! separate backend surfaces and are treated as separate identity spaces.

use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;

use crate::db::queries::{self, EmployeeMarker};
use crate::errors::AppError;
use crate::models::{Credentials, EmployeeSignup, FieldOfWork, Notice, Route};
use crate::services::backend::Backend;
use crate::services::validation::{self, mask_digits, EmployeeSignupFields};

#[derive(Debug)]
pub struct SignedIn {
    pub notice: Notice,
    pub route: Route,
}

pub async fn user_login(
    backend: &dyn Backend,
    email: &str,
    password: &str,
) -> Result<SignedIn, AppError> {
    validation::validate_user_auth(email, password, None)?;
    let credentials = Credentials {
        email: email.to_string(),
        password: password.to_string(),
    };
    backend.user_login(&credentials).await?;
    tracing::info!(email, "user logged in");

    Ok(SignedIn {
        notice: Notice::success("Login Successful", format!("Welcome, {email}")),
        route: Route::Homepage,
    })
}

pub async fn user_signup(
    backend: &dyn Backend,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<SignedIn, AppError> {
    validation::validate_user_auth(email, password, Some(confirm_password))?;
    let credentials = Credentials {
        email: email.to_string(),
        password: password.to_string(),
    };
    backend.user_signup(&credentials).await?;
    tracing::info!(email, "user account created");

    Ok(SignedIn {
        notice: Notice::success("Account Created", format!("Welcome, {email}")),
        route: Route::Homepage,
    })
}

pub async fn employee_login(
    backend: &dyn Backend,
    store: &Mutex<Connection>,
    email: &str,
    password: &str,
) -> Result<SignedIn, AppError> {
    validation::validate_employee_login(email, password)?;
    let email = email.trim();
    let credentials = Credentials {
        email: email.to_string(),
        password: password.trim().to_string(),
    };
    let name = backend.employee_login(&credentials).await?;

    mark_employee_logged_in(store, email)?;
    tracing::info!(email, "employee logged in");

    Ok(SignedIn {
        notice: Notice::success(
            "Login Successful",
            format!("Welcome back, {}", name.as_deref().unwrap_or(email)),
        ),
        route: Route::EmployeeHome {
            email: email.to_string(),
        },
    })
}

/// Raw employee registration input as typed on the signup screen.
#[derive(Debug, Clone, Default)]
pub struct EmployeeRegistration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub aadhar: String,
    pub bank_account: String,
    pub password: String,
    pub confirm_password: String,
    pub field_of_work: Option<String>,
}

pub async fn employee_signup(
    backend: &dyn Backend,
    store: &Mutex<Connection>,
    registration: &EmployeeRegistration,
) -> Result<SignedIn, AppError> {
    validation::validate_employee_signup(&EmployeeSignupFields {
        name: &registration.name,
        email: &registration.email,
        phone: &registration.phone,
        aadhar: &registration.aadhar,
        bank_account: &registration.bank_account,
        password: &registration.password,
        confirm_password: &registration.confirm_password,
        field_of_work: registration.field_of_work.as_deref(),
    })?;

    let field_of_work: FieldOfWork = registration
        .field_of_work
        .as_deref()
        .unwrap_or_default()
        .parse()
        .map_err(AppError::Validation)?;

    let signup = EmployeeSignup {
        name: registration.name.trim().to_string(),
        email: registration.email.trim().to_string(),
        phone: registration.phone.trim().to_string(),
        aadhar: registration.aadhar.trim().to_string(),
        bank_account: registration.bank_account.trim().to_string(),
        password: registration.password.trim().to_string(),
        field_of_work,
    };

    tracing::info!(
        email = %signup.email,
        field = %signup.field_of_work,
        aadhar = %mask_digits(&signup.aadhar),
        bank_account = %mask_digits(&signup.bank_account),
        "registering employee"
    );
    backend.employee_signup(&signup).await?;

    mark_employee_logged_in(store, &signup.email)?;

    // a new employee goes straight to their (empty) order screen
    Ok(SignedIn {
        notice: Notice::success("Registration Successful", format!("Welcome, {}", signup.name)),
        route: Route::EmployeeHome {
            email: signup.email,
        },
    })
}

pub fn employee_logout(store: &Mutex<Connection>) -> Result<Route, AppError> {
    let conn = lock(store)?;
    if queries::clear_employee_marker(&conn)? {
        tracing::info!("employee logged out");
    }
    Ok(Route::Homepage)
}

pub fn logged_in_employee(store: &Mutex<Connection>) -> Result<Option<String>, AppError> {
    Ok(employee_marker(store)?.map(|m| m.email))
}

pub fn employee_marker(store: &Mutex<Connection>) -> Result<Option<EmployeeMarker>, AppError> {
    let conn = lock(store)?;
    Ok(queries::get_employee_marker(&conn)?)
}

fn lock(store: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, AppError> {
    store
        .lock()
        .map_err(|_| AppError::Config("local store lock poisoned".into()))
}

fn mark_employee_logged_in(store: &Mutex<Connection>, email: &str) -> Result<(), AppError> {
    let conn = lock(store)?;
    queries::set_employee_marker(&conn, email)?;
    Ok(())
}
