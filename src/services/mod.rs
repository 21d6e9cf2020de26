pub mod auth;
pub mod backend;
pub mod booking_form;
pub mod catalog;
pub mod employee_desk;
pub mod my_bookings;
pub mod validation;
