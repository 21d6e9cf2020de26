use chrono::{NaiveDate, NaiveDateTime};

use crate::errors::AppError;

/// Wire format of a booking's schedule.
pub const SCHEDULE_FORMAT: &str = "%Y-%m-%d %H:%M";

const PASSWORD_SPECIALS: &str = "@$!%*?&";

pub fn is_digits(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_valid_phone(phone: &str) -> bool {
    is_digits(phone, 10, 10)
}

pub fn is_valid_pincode(pincode: &str) -> bool {
    is_digits(pincode, 6, 6)
}

pub fn is_valid_aadhar(aadhar: &str) -> bool {
    is_digits(aadhar, 12, 12)
}

pub fn is_valid_bank_account(account: &str) -> bool {
    is_digits(account, 9, 18)
}

/// `local@domain.tld` with no whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // some '.' in the domain with text on both sides
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// At least three characters, letters and spaces only.
pub fn is_valid_name(name: &str) -> bool {
    let name = name.trim();
    name.chars().count() >= 3 && name.chars().all(|c| c.is_ascii_alphabetic() || c == ' ')
}

pub fn is_strong_password(password: &str) -> bool {
    password.len() >= 8
        && password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(c))
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Accepts `YYYY-MM-DD HH:MM` and the `T`-separated form a date picker emits.
pub fn parse_schedule(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, SCHEDULE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Mask every digit except the last four, e.g. `********9012`.
pub fn mask_digits(value: &str) -> String {
    let total = value.chars().filter(|c| c.is_ascii_digit()).count();
    let mut seen = 0;
    value
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                seen += 1;
                if total - seen >= 4 {
                    return '*';
                }
            }
            c
        })
        .collect()
}

/// Raw booking form input, checked in the order the form reports problems.
pub struct BookingFields<'a> {
    pub phone: &'a str,
    pub address: &'a str,
    pub city: &'a str,
    pub pincode: &'a str,
    pub date_time: &'a str,
    pub description: &'a str,
}

pub fn validate_booking(
    fields: &BookingFields<'_>,
    today: NaiveDate,
) -> Result<NaiveDateTime, AppError> {
    let required = [
        fields.phone,
        fields.address,
        fields.city,
        fields.pincode,
        fields.date_time,
        fields.description,
    ];
    if required.iter().any(|f| f.trim().is_empty()) {
        return Err(AppError::Validation("Please fill all the fields.".into()));
    }
    if !is_valid_phone(fields.phone.trim()) {
        return Err(AppError::Validation("Phone number must be 10 digits.".into()));
    }
    if !is_valid_pincode(fields.pincode.trim()) {
        return Err(AppError::Validation("Pincode must be 6 digits.".into()));
    }
    let scheduled = parse_schedule(fields.date_time).ok_or_else(|| {
        AppError::Validation("Date and time must look like YYYY-MM-DD HH:MM.".into())
    })?;
    if scheduled.date() < today {
        return Err(AppError::Validation("Scheduled date cannot be in the past.".into()));
    }
    Ok(scheduled)
}

pub struct EmployeeSignupFields<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub aadhar: &'a str,
    pub bank_account: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
    pub field_of_work: Option<&'a str>,
}

pub fn validate_employee_signup(fields: &EmployeeSignupFields<'_>) -> Result<(), AppError> {
    let required = [
        fields.name,
        fields.email,
        fields.phone,
        fields.aadhar,
        fields.bank_account,
        fields.password,
        fields.confirm_password,
    ];
    if required.iter().any(|f| f.trim().is_empty()) {
        return Err(AppError::Validation("Please fill in all fields.".into()));
    }
    if !is_valid_email(fields.email) {
        return Err(AppError::Validation("Please enter a valid email address.".into()));
    }
    if !is_valid_name(fields.name) {
        return Err(AppError::Validation(
            "Name must be at least 3 letters and contain only letters and spaces.".into(),
        ));
    }
    if !is_valid_phone(fields.phone.trim()) {
        return Err(AppError::Validation("Phone number must be exactly 10 digits.".into()));
    }
    if !is_valid_aadhar(fields.aadhar.trim()) {
        return Err(AppError::Validation("Aadhar number must be exactly 12 digits.".into()));
    }
    if !is_valid_bank_account(fields.bank_account.trim()) {
        return Err(AppError::Validation(
            "Bank account number must be between 9 and 18 digits.".into(),
        ));
    }
    if !is_strong_password(fields.password.trim()) {
        return Err(weak_password());
    }
    if fields.password.trim() != fields.confirm_password.trim() {
        return Err(AppError::Validation("Passwords do not match.".into()));
    }
    if fields.field_of_work.map_or(true, |f| f.trim().is_empty()) {
        return Err(AppError::Validation("Please select a field of work.".into()));
    }
    Ok(())
}

pub fn validate_employee_login(email: &str, password: &str) -> Result<(), AppError> {
    if email.trim().is_empty() || password.trim().is_empty() {
        return Err(AppError::Validation("Please fill in all fields.".into()));
    }
    if !is_valid_email(email) {
        return Err(AppError::Validation("Please enter a valid email address.".into()));
    }
    if !is_strong_password(password.trim()) {
        return Err(weak_password());
    }
    Ok(())
}

pub fn validate_user_auth(
    email: &str,
    password: &str,
    confirm_password: Option<&str>,
) -> Result<(), AppError> {
    let missing_confirmation = confirm_password.is_some_and(|c| c.is_empty());
    if email.is_empty() || password.is_empty() || missing_confirmation {
        return Err(AppError::Validation("Please fill in all fields.".into()));
    }
    if confirm_password.is_some_and(|c| c != password) {
        return Err(AppError::Validation("Passwords do not match.".into()));
    }
    Ok(())
}

fn weak_password() -> AppError {
    AppError::Validation(
        "Password must be at least 8 characters and include uppercase, lowercase, number, and special character."
            .into(),
    )
}
