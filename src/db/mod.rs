pub mod migrations;
pub mod queries;

use std::time::Duration;

use anyhow::Context;
use rusqlite::Connection;

pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open local store")?;

    // two CLI invocations may touch the store at once
    conn.busy_timeout(Duration::from_secs(5))
        .context("failed to configure local store")?;

    migrations::run_migrations(&conn)?;

    Ok(conn)
}
