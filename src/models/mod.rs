pub mod api;
pub mod booking;
pub mod employee;
pub mod notice;
pub mod session;

pub use booking::{Booking, BookingAction, BookingStatus, NewBooking};
pub use employee::{Employee, EmployeeSignup, EmployeeSummary, FieldOfWork};
pub use notice::{Notice, NoticeKind, Route};
pub use session::{Credentials, Session};
