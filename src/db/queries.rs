use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

/// Marker recording which employee is logged in on this device. It only
/// gates a UI affordance and is not a credential.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeMarker {
    pub email: String,
    pub logged_in_at: NaiveDateTime,
}

pub fn set_employee_marker(conn: &Connection, email: &str) -> rusqlite::Result<()> {
    let now = Utc::now().naive_utc().format("%Y-%m-%d %H:%M:%S").to_string();
    conn.execute(
        "INSERT INTO employee_session (id, email, logged_in_at) VALUES (1, ?1, ?2)
         ON CONFLICT(id) DO UPDATE SET
           email = excluded.email,
           logged_in_at = excluded.logged_in_at",
        params![email, now],
    )?;
    Ok(())
}

pub fn get_employee_marker(conn: &Connection) -> rusqlite::Result<Option<EmployeeMarker>> {
    let row = conn
        .query_row(
            "SELECT email, logged_in_at FROM employee_session WHERE id = 1",
            [],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        )
        .optional()?;

    Ok(row.map(|(email, logged_in_at)| EmployeeMarker {
        email,
        logged_in_at: NaiveDateTime::parse_from_str(&logged_in_at, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_else(|_| Utc::now().naive_utc()),
    }))
}

pub fn clear_employee_marker(conn: &Connection) -> rusqlite::Result<bool> {
    let count = conn.execute("DELETE FROM employee_session WHERE id = 1", [])?;
    Ok(count > 0)
}
