use std::fmt::Write;

use crate::errors::AppError;
use crate::models::{EmployeeSummary, FieldOfWork};
use crate::services::backend::Backend;
use crate::services::booking_form::BookingForm;

/// Workers available in one service category.
#[derive(Debug, Clone)]
pub struct CategoryScreen {
    pub field: FieldOfWork,
    pub employees: Vec<EmployeeSummary>,
}

/// One read per screen.
pub async fn fetch_category(
    backend: &dyn Backend,
    field: FieldOfWork,
) -> Result<CategoryScreen, AppError> {
    let employees = backend.employees_by_field(field).await?;
    Ok(CategoryScreen { field, employees })
}

/// Like [`fetch_category`], but a failed read shows the empty state.
pub async fn list_category(backend: &dyn Backend, field: FieldOfWork) -> CategoryScreen {
    fetch_category(backend, field).await.unwrap_or_else(|e| {
        tracing::error!(field = %field, error = %e, "failed to fetch employees");
        CategoryScreen {
            field,
            employees: Vec::new(),
        }
    })
}

impl CategoryScreen {
    pub fn select(&self, employee_id: &str) -> Result<&EmployeeSummary, AppError> {
        self.employees
            .iter()
            .find(|e| e.id == employee_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("no {} worker with id {employee_id}", self.field))
            })
    }

    /// The per-item "Book Now" action.
    pub fn open_booking(&self, employee_id: &str) -> Result<BookingForm, AppError> {
        let employee = self.select(employee_id)?;
        Ok(BookingForm::open(employee.clone(), self.field.as_str()))
    }

    pub fn render(&self) -> String {
        let mut out = format!("{}\n", self.field);
        if self.employees.is_empty() {
            out.push_str(self.field.empty_state());
            out.push('\n');
            return out;
        }
        for employee in &self.employees {
            let _ = writeln!(out, "- {} [{}]", employee.name, employee.id);
            let _ = writeln!(out, "  Phone: {}", employee.phone.as_deref().unwrap_or("N/A"));
            let _ = writeln!(out, "  Email: {}", employee.email.as_deref().unwrap_or("N/A"));
        }
        out
    }
}
