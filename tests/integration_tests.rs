use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Notify;

use homecare::config::AppConfig;
use homecare::db;
use homecare::errors::AppError;
use homecare::handlers;
use homecare::handlers::bookings::BookingInput;
use homecare::models::{
    Booking, BookingStatus, Credentials, Employee, EmployeeSignup, EmployeeSummary, FieldOfWork,
    NewBooking, NoticeKind, Session,
};
use homecare::services::auth::{self, EmployeeRegistration};
use homecare::services::backend::Backend;
use homecare::services::employee_desk::{EmployeeDesk, OtpOutcome};
use homecare::state::AppState;

const ISSUED_OTP: &str = "4821";

// ── Mock Backend ──

#[derive(Default)]
struct MockBackend {
    listings: Mutex<HashMap<FieldOfWork, Vec<EmployeeSummary>>>,
    employees: Mutex<Vec<Employee>>,
    bookings: Mutex<Vec<Booking>>,
    calls: Mutex<Vec<String>>,
    /// When set, status updates wait here before answering.
    status_gate: Option<Arc<Notify>>,
    fail_listings: bool,
    fail_create: bool,
    fail_status: bool,
}

impl MockBackend {
    fn new() -> Self {
        Self::default()
    }

    fn with_worker(self, field: FieldOfWork, id: &str, name: &str) -> Self {
        self.listings
            .lock()
            .unwrap()
            .entry(field)
            .or_default()
            .push(EmployeeSummary {
                id: id.to_string(),
                name: name.to_string(),
                phone: Some("9123456780".to_string()),
                email: Some(format!("{}@example.com", name.to_lowercase())),
            });
        self.employees.lock().unwrap().push(Employee {
            id: id.to_string(),
            name: name.to_string(),
            field_of_work: field,
            email: format!("{}@example.com", name.to_lowercase()),
            phone: Some("9123456780".to_string()),
        });
        self
    }

    fn with_booking(self, id: &str, employee_id: &str, status: BookingStatus) -> Self {
        self.bookings.lock().unwrap().push(Booking {
            id: id.to_string(),
            user_email: "asha@example.com".to_string(),
            employee_id: employee_id.to_string(),
            employee_name: None,
            phone: "9876543210".to_string(),
            address: "12 MG Road".to_string(),
            city: "Pune".to_string(),
            pincode: "411001".to_string(),
            date_time: "2025-06-16 10:00".to_string(),
            description: "Leaking tap".to_string(),
            otp: (status == BookingStatus::Accepted).then(|| ISSUED_OTP.to_string()),
            status,
        });
        self
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls_starting_with(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn user_login(&self, credentials: &Credentials) -> Result<(), AppError> {
        self.record(format!("user_login:{}", credentials.email));
        Ok(())
    }

    async fn user_signup(&self, credentials: &Credentials) -> Result<(), AppError> {
        self.record(format!("user_signup:{}", credentials.email));
        Ok(())
    }

    async fn employee_login(&self, credentials: &Credentials) -> Result<Option<String>, AppError> {
        self.record(format!("employee_login:{}", credentials.email));
        self.employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.email == credentials.email)
            .map(|e| Some(e.name.clone()))
            .ok_or_else(|| AppError::Rejected("Invalid credentials".into()))
    }

    async fn employee_signup(&self, signup: &EmployeeSignup) -> Result<(), AppError> {
        self.record(format!("employee_signup:{}", signup.email));
        let mut employees = self.employees.lock().unwrap();
        let id = format!("emp-{}", employees.len() + 1);
        employees.push(Employee {
            id,
            name: signup.name.clone(),
            field_of_work: signup.field_of_work,
            email: signup.email.clone(),
            phone: Some(signup.phone.clone()),
        });
        Ok(())
    }

    async fn employees_by_field(
        &self,
        field: FieldOfWork,
    ) -> Result<Vec<EmployeeSummary>, AppError> {
        self.record(format!("employees_by_field:{field}"));
        if self.fail_listings {
            return Err(AppError::Rejected("Failed to fetch employees".into()));
        }
        Ok(self
            .listings
            .lock()
            .unwrap()
            .get(&field)
            .cloned()
            .unwrap_or_default())
    }

    async fn employee_by_email(&self, email: &str) -> Result<Employee, AppError> {
        self.record(format!("employee_by_email:{email}"));
        self.employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.email == email)
            .cloned()
            .ok_or_else(|| AppError::Rejected("Employee not found".into()))
    }

    async fn create_booking(&self, booking: &NewBooking) -> Result<Option<Booking>, AppError> {
        self.record(format!("create_booking:{}", booking.employee_id));
        if self.fail_create {
            return Err(AppError::Rejected("Employee is on leave".into()));
        }
        let employee_name = self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == booking.employee_id)
            .map(|e| e.name.clone());
        let mut bookings = self.bookings.lock().unwrap();
        let created = Booking {
            id: format!("b{}", bookings.len() + 1),
            user_email: booking.user_email.clone(),
            employee_id: booking.employee_id.clone(),
            employee_name,
            phone: booking.phone.clone(),
            address: booking.address.clone(),
            city: booking.city.clone(),
            pincode: booking.pincode.clone(),
            date_time: booking.date_time.clone(),
            description: booking.description.clone(),
            status: BookingStatus::Pending,
            otp: None,
        };
        bookings.push(created.clone());
        Ok(Some(created))
    }

    async fn bookings_for_user(&self, user_email: &str) -> Result<Vec<Booking>, AppError> {
        self.record(format!("bookings_for_user:{user_email}"));
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.user_email == user_email)
            .cloned()
            .collect())
    }

    async fn bookings_for_employee(&self, employee_id: &str) -> Result<Vec<Booking>, AppError> {
        self.record(format!("bookings_for_employee:{employee_id}"));
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn update_booking_status(
        &self,
        booking_id: &str,
        status: BookingStatus,
    ) -> Result<(), AppError> {
        self.record(format!("status:{booking_id}:{status}"));
        if let Some(gate) = &self.status_gate {
            gate.notified().await;
        }
        if self.fail_status {
            return Err(AppError::Rejected("Failed to update status".into()));
        }
        let mut bookings = self.bookings.lock().unwrap();
        if let Some(b) = bookings.iter_mut().find(|b| b.id == booking_id) {
            b.status = status;
            if status == BookingStatus::Accepted {
                b.otp = Some(ISSUED_OTP.to_string());
            }
        }
        Ok(())
    }

    async fn validate_otp(&self, booking_id: &str, otp: &str) -> Result<(), AppError> {
        self.record(format!("otp:{booking_id}:{otp}"));
        let mut bookings = self.bookings.lock().unwrap();
        match bookings.iter_mut().find(|b| b.id == booking_id) {
            Some(b) if b.otp.as_deref() == Some(otp) => {
                b.status = BookingStatus::Confirmed;
                Ok(())
            }
            _ => Err(AppError::Rejected("Invalid OTP".into())),
        }
    }
}

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        api_url: "http://localhost:5000".to_string(),
        database_url: ":memory:".to_string(),
        request_timeout_secs: 5,
    }
}

fn test_state(backend: Arc<MockBackend>) -> AppState {
    let conn = db::init_db(":memory:").unwrap();
    AppState {
        config: test_config(),
        backend,
        store: Arc::new(Mutex::new(conn)),
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn booking_input(phone: &str) -> BookingInput {
    BookingInput {
        phone: phone.to_string(),
        address: "12 MG Road".to_string(),
        city: "Pune".to_string(),
        pincode: "411001".to_string(),
        date_time: "2025-06-16 10:00".to_string(),
        description: "Leaking kitchen tap".to_string(),
    }
}

async fn desk_for(backend: Arc<MockBackend>, email: &str) -> EmployeeDesk {
    EmployeeDesk::load(backend, Some(email)).await.unwrap()
}

// ── Category listing ──

#[tokio::test]
async fn test_empty_category_shows_empty_state_and_no_list() {
    let backend = Arc::new(MockBackend::new());
    let state = test_state(backend.clone());

    for field in FieldOfWork::ALL {
        let out = handlers::catalog::workers(&state, field).await;
        assert!(out.body.contains(field.empty_state()), "{field}: {}", out.body);
        assert!(!out.body.contains("\n- "), "{field} rendered a list");
    }
    assert_eq!(backend.calls_starting_with("employees_by_field:"), 8);
}

#[tokio::test]
async fn test_category_lists_workers_of_that_field_only() {
    let backend = Arc::new(
        MockBackend::new()
            .with_worker(FieldOfWork::Plumbers, "emp-1", "Ravi")
            .with_worker(FieldOfWork::Painters, "emp-2", "Meena"),
    );
    let state = test_state(backend);

    let out = handlers::catalog::workers(&state, FieldOfWork::Plumbers).await;
    assert!(out.body.contains("- Ravi [emp-1]"));
    assert!(!out.body.contains("Meena"));
    assert!(!out.body.contains("No plumbers found."));
}

#[tokio::test]
async fn test_failed_listing_falls_back_to_empty_state() {
    let backend = Arc::new(MockBackend {
        fail_listings: true,
        ..MockBackend::new()
    });
    let state = test_state(backend);

    let out = handlers::catalog::workers(&state, FieldOfWork::Autos).await;
    assert!(!out.is_error());
    assert!(out.body.contains("No autos employees found."));
}

// ── Booking creation ──

#[tokio::test]
async fn test_short_phone_is_blocked_before_any_request() {
    let backend = Arc::new(MockBackend::new().with_worker(FieldOfWork::Plumbers, "emp-1", "Ravi"));
    let state = test_state(backend.clone());
    let session = Session::new("asha@example.com");

    let out = handlers::bookings::book(
        &state,
        &session,
        FieldOfWork::Plumbers,
        "emp-1",
        booking_input("98765432"),
        today(),
    )
    .await;

    assert!(out.is_error());
    let notice = out.notice.unwrap();
    assert_eq!(notice.message, "Phone number must be 10 digits.");
    assert_eq!(backend.calls_starting_with("create_booking"), 0);
}

#[tokio::test]
async fn test_empty_field_is_blocked_before_any_request() {
    let backend = Arc::new(MockBackend::new().with_worker(FieldOfWork::Plumbers, "emp-1", "Ravi"));
    let state = test_state(backend.clone());
    let mut input = booking_input("9876543210");
    input.description = String::new();

    let out = handlers::bookings::book(
        &state,
        &Session::new("asha@example.com"),
        FieldOfWork::Plumbers,
        "emp-1",
        input,
        today(),
    )
    .await;

    assert_eq!(out.notice.unwrap().message, "Please fill all the fields.");
    assert_eq!(backend.calls_starting_with("create_booking"), 0);
}

#[tokio::test]
async fn test_successful_booking_lands_on_my_bookings() {
    let backend = Arc::new(MockBackend::new().with_worker(FieldOfWork::Plumbers, "emp-1", "Ravi"));
    let state = test_state(backend.clone());
    let session = Session::new("asha@example.com");

    let out = handlers::bookings::book(
        &state,
        &session,
        FieldOfWork::Plumbers,
        "emp-1",
        booking_input("9876543210"),
        today(),
    )
    .await;

    let notice = out.notice.clone().unwrap();
    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, "Booking confirmed!");
    assert!(out.body.starts_with("My Bookings"));
    assert!(out.body.contains("Service: Ravi"));
    assert!(out.body.contains("Status: Pending"));
    assert_eq!(backend.calls_starting_with("create_booking:emp-1"), 1);
}

#[tokio::test]
async fn test_backend_refusal_surfaces_generic_alert() {
    let backend = Arc::new(MockBackend {
        fail_create: true,
        ..MockBackend::new().with_worker(FieldOfWork::Saloon, "emp-9", "Kiran")
    });
    let state = test_state(backend.clone());

    let out = handlers::bookings::book(
        &state,
        &Session::new("asha@example.com"),
        FieldOfWork::Saloon,
        "emp-9",
        booking_input("9876543210"),
        today(),
    )
    .await;

    assert!(out.is_error());
    assert_eq!(out.notice.unwrap().message, "Booking failed. Try again.");
    assert_eq!(backend.calls_starting_with("create_booking"), 1);
}

#[tokio::test]
async fn test_failed_listing_blocks_booking_with_its_own_error() {
    let backend = Arc::new(MockBackend {
        fail_listings: true,
        ..MockBackend::new().with_worker(FieldOfWork::Plumbers, "emp-1", "Ravi")
    });
    let state = test_state(backend.clone());

    let out = handlers::bookings::book(
        &state,
        &Session::new("asha@example.com"),
        FieldOfWork::Plumbers,
        "emp-1",
        booking_input("9876543210"),
        today(),
    )
    .await;

    assert!(out.is_error());
    assert_eq!(out.notice.unwrap().message, "Failed to fetch employees");
    assert_eq!(backend.calls_starting_with("create_booking"), 0);
}

#[tokio::test]
async fn test_booking_unknown_worker() {
    let backend = Arc::new(MockBackend::new());
    let state = test_state(backend.clone());

    let out = handlers::bookings::book(
        &state,
        &Session::new("asha@example.com"),
        FieldOfWork::Painters,
        "nobody",
        booking_input("9876543210"),
        today(),
    )
    .await;

    assert!(out.is_error());
    assert_eq!(backend.calls_starting_with("create_booking"), 0);
}

#[tokio::test]
async fn test_booking_appears_for_user_and_employee() {
    let backend = Arc::new(MockBackend::new().with_worker(FieldOfWork::Plumbers, "emp-1", "Ravi"));
    let state = test_state(backend.clone());
    let session = Session::new("asha@example.com");

    handlers::bookings::book(
        &state,
        &session,
        FieldOfWork::Plumbers,
        "emp-1",
        booking_input("9876543210"),
        today(),
    )
    .await;

    let mine = handlers::bookings::my_bookings(&state, &session).await;
    assert!(mine.body.contains("Leaking kitchen tap"));

    let orders = handlers::employee::orders(&state, Some("ravi@example.com")).await;
    assert!(orders.body.contains("[b1] 12 MG Road, Pune - 411001"));
    assert!(orders.body.contains("Actions: Accept | Reject"));
}

#[tokio::test]
async fn test_my_bookings_empty_state() {
    let backend = Arc::new(MockBackend::new());
    let state = test_state(backend);

    let out = handlers::bookings::my_bookings(&state, &Session::new("new@example.com")).await;
    assert!(out.body.contains("No bookings found."));
}

// ── Employee status workflow ──

#[tokio::test]
async fn test_accept_twice_sends_one_request() {
    let backend = Arc::new(
        MockBackend::new()
            .with_worker(FieldOfWork::Plumbers, "emp-1", "Ravi")
            .with_booking("b1", "emp-1", BookingStatus::Pending),
    );
    let desk = desk_for(backend.clone(), "ravi@example.com").await;

    let notice = desk.accept("b1").await.unwrap();
    assert_eq!(
        notice.message,
        "Booking accepted! Please validate OTP to confirm."
    );
    assert_eq!(desk.status_of("b1"), Some(BookingStatus::Accepted));
    // accepting does not open the OTP dialog by itself
    assert_eq!(desk.otp_dialog(), None);

    let err = desk.accept("b1").await.unwrap_err();
    assert!(matches!(
        err,
        AppError::IllegalTransition {
            from: BookingStatus::Accepted,
            ..
        }
    ));
    assert_eq!(backend.calls_starting_with("status:b1"), 1);
}

#[tokio::test]
async fn test_concurrent_accept_is_rejected_while_in_flight() {
    let gate = Arc::new(Notify::new());
    let backend = Arc::new(MockBackend {
        status_gate: Some(gate.clone()),
        ..MockBackend::new()
            .with_worker(FieldOfWork::Plumbers, "emp-1", "Ravi")
            .with_booking("b1", "emp-1", BookingStatus::Pending)
    });
    let desk = desk_for(backend.clone(), "ravi@example.com").await;

    let (first, second, _) = tokio::join!(desk.accept("b1"), desk.accept("b1"), async {
        gate.notify_one();
    });

    assert!(first.is_ok());
    assert!(matches!(second, Err(AppError::InFlight(id)) if id == "b1"));
    assert_eq!(backend.calls_starting_with("status:b1"), 1);
    assert_eq!(desk.status_of("b1"), Some(BookingStatus::Accepted));
}

#[tokio::test]
async fn test_reject_is_terminal() {
    let backend = Arc::new(
        MockBackend::new()
            .with_worker(FieldOfWork::Painters, "emp-2", "Meena")
            .with_booking("b7", "emp-2", BookingStatus::Pending),
    );
    let desk = desk_for(backend.clone(), "meena@example.com").await;

    assert_eq!(desk.reject("b7").await.unwrap().message, "Booking rejected!");
    assert_eq!(desk.status_of("b7"), Some(BookingStatus::Rejected));

    assert!(matches!(
        desk.accept("b7").await,
        Err(AppError::IllegalTransition { .. })
    ));
    assert!(matches!(
        desk.open_otp("b7"),
        Err(AppError::IllegalTransition { .. })
    ));
    assert_eq!(backend.calls_starting_with("status:b7"), 1);
    assert!(!desk.render().contains("Actions:"));
}

#[tokio::test]
async fn test_failed_status_update_keeps_local_state_and_allows_retry() {
    let backend = Arc::new(MockBackend {
        fail_status: true,
        ..MockBackend::new()
            .with_worker(FieldOfWork::Plumbers, "emp-1", "Ravi")
            .with_booking("b1", "emp-1", BookingStatus::Pending)
    });
    let desk = desk_for(backend.clone(), "ravi@example.com").await;

    for _ in 0..2 {
        let err = desk.accept("b1").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to update status");
        assert_eq!(desk.status_of("b1"), Some(BookingStatus::Pending));
    }
    assert_eq!(backend.calls_starting_with("status:b1"), 2);
}

#[tokio::test]
async fn test_unknown_booking_is_not_sent() {
    let backend = Arc::new(MockBackend::new().with_worker(FieldOfWork::Plumbers, "emp-1", "Ravi"));
    let desk = desk_for(backend.clone(), "ravi@example.com").await;

    assert!(matches!(desk.accept("ghost").await, Err(AppError::NotFound(_))));
    assert_eq!(backend.calls_starting_with("status:"), 0);
}

// ── OTP validation ──

#[tokio::test]
async fn test_correct_otp_confirms_and_closes_dialog() {
    let backend = Arc::new(
        MockBackend::new()
            .with_worker(FieldOfWork::Plumbers, "emp-1", "Ravi")
            .with_booking("b1", "emp-1", BookingStatus::Pending),
    );
    let desk = desk_for(backend.clone(), "ravi@example.com").await;
    desk.accept("b1").await.unwrap();

    desk.open_otp("b1").unwrap();
    desk.enter_otp(ISSUED_OTP);
    let outcome = desk.submit_otp().await.unwrap();

    match outcome {
        OtpOutcome::Confirmed(notice) => {
            assert_eq!(notice.message, "OTP validated successfully. Booking confirmed!")
        }
        other => panic!("expected confirmation, got {other:?}"),
    }
    assert_eq!(desk.status_of("b1"), Some(BookingStatus::Confirmed));
    assert_eq!(desk.otp_dialog(), None);
}

#[tokio::test]
async fn test_wrong_otp_keeps_dialog_open_with_inline_error() {
    let backend = Arc::new(
        MockBackend::new()
            .with_worker(FieldOfWork::Plumbers, "emp-1", "Ravi")
            .with_booking("b1", "emp-1", BookingStatus::Accepted),
    );
    let desk = desk_for(backend.clone(), "ravi@example.com").await;

    desk.open_otp("b1").unwrap();
    desk.enter_otp("0000");
    let outcome = desk.submit_otp().await.unwrap();

    assert_eq!(
        outcome,
        OtpOutcome::Retry {
            error: "Invalid OTP".to_string()
        }
    );
    assert_eq!(desk.status_of("b1"), Some(BookingStatus::Accepted));
    let dialog = desk.otp_dialog().unwrap();
    assert_eq!(dialog.error.as_deref(), Some("Invalid OTP"));

    // retry in the same dialog
    desk.enter_otp(ISSUED_OTP);
    assert!(matches!(
        desk.submit_otp().await.unwrap(),
        OtpOutcome::Confirmed(_)
    ));
    assert_eq!(desk.status_of("b1"), Some(BookingStatus::Confirmed));
    assert_eq!(backend.calls_starting_with("otp:b1"), 2);
}

#[tokio::test]
async fn test_empty_otp_is_not_sent() {
    let backend = Arc::new(
        MockBackend::new()
            .with_worker(FieldOfWork::Plumbers, "emp-1", "Ravi")
            .with_booking("b1", "emp-1", BookingStatus::Accepted),
    );
    let desk = desk_for(backend.clone(), "ravi@example.com").await;

    desk.open_otp("b1").unwrap();
    let outcome = desk.submit_otp().await.unwrap();
    assert_eq!(
        outcome,
        OtpOutcome::Retry {
            error: "Please enter the OTP".to_string()
        }
    );
    assert_eq!(backend.calls_starting_with("otp:"), 0);
}

#[tokio::test]
async fn test_wrong_otp_through_handler_is_an_error() {
    let backend = Arc::new(
        MockBackend::new()
            .with_worker(FieldOfWork::Plumbers, "emp-1", "Ravi")
            .with_booking("b1", "emp-1", BookingStatus::Accepted),
    );
    let state = test_state(backend.clone());

    let out =
        handlers::employee::validate_otp(&state, Some("ravi@example.com"), "b1", "0000").await;

    assert!(out.is_error());
    assert_eq!(out.notice.clone().unwrap().message, "Invalid OTP");
    assert_eq!(out.body, "Enter OTP to confirm booking\nInvalid OTP\n");

    let ok = handlers::employee::validate_otp(&state, Some("ravi@example.com"), "b1", ISSUED_OTP)
        .await;
    assert!(!ok.is_error());
    assert!(ok.body.contains("Status: Confirmed"));
}

#[tokio::test]
async fn test_otp_on_pending_booking_is_refused_before_request() {
    let backend = Arc::new(
        MockBackend::new()
            .with_worker(FieldOfWork::Plumbers, "emp-1", "Ravi")
            .with_booking("b1", "emp-1", BookingStatus::Pending),
    );
    let state = test_state(backend.clone());

    let out =
        handlers::employee::validate_otp(&state, Some("ravi@example.com"), "b1", ISSUED_OTP).await;
    assert!(out.is_error());
    assert_eq!(backend.calls_starting_with("otp:"), 0);
}

// ── Sign-in flows ──

#[tokio::test]
async fn test_plumber_signup_lands_on_empty_order_screen() {
    let backend = Arc::new(MockBackend::new());
    let state = test_state(backend.clone());

    let registration = EmployeeRegistration {
        name: "Ravi Kumar".to_string(),
        email: "ravi@example.com".to_string(),
        phone: "9876543210".to_string(),
        aadhar: "123456789012".to_string(),
        bank_account: "001234567890".to_string(),
        password: "Plumb3r@work".to_string(),
        confirm_password: "Plumb3r@work".to_string(),
        field_of_work: Some("Plumbers".to_string()),
    };
    let out = handlers::auth::employee_signup(&state, &registration).await;

    let notice = out.notice.clone().unwrap();
    assert_eq!(notice.title, "Registration Successful");
    assert!(out.body.contains("Field of Work: Plumbers"));
    assert!(out.body.contains("No orders found."));
    assert_eq!(
        auth::logged_in_employee(&state.store).unwrap().as_deref(),
        Some("ravi@example.com")
    );
}

#[tokio::test]
async fn test_invalid_signup_sends_nothing() {
    let backend = Arc::new(MockBackend::new());
    let state = test_state(backend.clone());

    let registration = EmployeeRegistration {
        name: "Ravi Kumar".to_string(),
        email: "ravi@example.com".to_string(),
        phone: "9876543210".to_string(),
        aadhar: "1234".to_string(),
        bank_account: "001234567890".to_string(),
        password: "Plumb3r@work".to_string(),
        confirm_password: "Plumb3r@work".to_string(),
        field_of_work: Some("Plumbers".to_string()),
    };
    let out = handlers::auth::employee_signup(&state, &registration).await;

    assert!(out.is_error());
    assert!(backend.calls.lock().unwrap().is_empty());
    assert_eq!(auth::logged_in_employee(&state.store).unwrap(), None);
}

#[tokio::test]
async fn test_employee_login_and_logout() {
    let backend = Arc::new(MockBackend::new().with_worker(FieldOfWork::Autos, "emp-3", "Kabir"));
    let state = test_state(backend);

    let out = handlers::auth::employee_login(&state, "kabir@example.com", "Aut0s@2025").await;
    assert_eq!(out.notice.clone().unwrap().message, "Welcome back, Kabir");
    assert!(out.body.contains("Hi, Kabir"));

    handlers::auth::employee_logout(&state);
    assert_eq!(auth::logged_in_employee(&state.store).unwrap(), None);
}

#[tokio::test]
async fn test_unknown_employee_login_is_refused() {
    let backend = Arc::new(MockBackend::new());
    let state = test_state(backend);

    let out = handlers::auth::employee_login(&state, "ghost@example.com", "Gh0st@home").await;
    assert!(out.is_error());
    assert_eq!(out.notice.unwrap().message, "Invalid credentials");
    assert_eq!(auth::logged_in_employee(&state.store).unwrap(), None);
}

#[tokio::test]
async fn test_order_screen_without_email() {
    let backend = Arc::new(MockBackend::new());
    let state = test_state(backend.clone());

    let out = handlers::employee::orders(&state, None).await;
    assert!(out.is_error());
    assert_eq!(out.notice.unwrap().message, "No user email provided");
    assert!(out.body.contains("Go to Login"));
    assert!(backend.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_user_login_opens_homepage() {
    let backend = Arc::new(MockBackend::new());
    let state = test_state(backend.clone());

    let out = handlers::auth::user_login(&state, "asha@example.com", "secret").await;
    assert_eq!(out.notice.clone().unwrap().message, "Welcome, asha@example.com");
    assert!(out.body.contains("Categories"));
    assert!(out.body.contains("- Diagonistic"));
    assert_eq!(backend.calls_starting_with("user_login:asha@example.com"), 1);
}

#[tokio::test]
async fn test_user_signup_password_mismatch() {
    let backend = Arc::new(MockBackend::new());
    let state = test_state(backend.clone());

    let out = handlers::auth::user_signup(&state, "asha@example.com", "secret", "secrte").await;
    assert_eq!(out.notice.unwrap().message, "Passwords do not match.");
    assert!(backend.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_status_reports_signed_in_employee() {
    let backend = Arc::new(MockBackend::new().with_worker(FieldOfWork::Autos, "emp-3", "Kabir"));
    let state = test_state(backend);

    let before = handlers::auth::status(&state);
    assert!(before.body.contains("Backend: http://localhost:5000"));
    assert!(before.body.contains("No employee signed in."));

    handlers::auth::employee_login(&state, "kabir@example.com", "Aut0s@2025").await;
    let after = handlers::auth::status(&state);
    assert!(after.body.contains("Employee signed in: kabir@example.com"));

    let home = handlers::catalog::categories(&state);
    assert!(home.body.contains("Employee signed in: kabir@example.com"));
}
