use crate::error::Result;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

const BUSY_TIMEOUT_MS: i64 = 2000;

pub fn open(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    restrict_db_permissions(path)?;
    configure(&conn, true)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn, false)?;
    Ok(conn)
}

// Link rows rely on ON DELETE CASCADE, so foreign keys must be on for every
// connection.
fn configure(conn: &Connection, on_disk: bool) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")?;
    if on_disk {
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
    }
    conn.pragma_update(None, "busy_timeout", BUSY_TIMEOUT_MS)?;
    register_casefold(conn)?;
    Ok(())
}

/// `casefold(text)` lowercases with full Unicode rules, so searches can
/// compare `casefold(column) LIKE casefold(?)`. SQLite's own `LIKE` only
/// folds ASCII. NULL stays NULL.
fn register_casefold(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "casefold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value = ctx.get::<Option<String>>(0)?;
            Ok(value.map(|text| text.to_lowercase()))
        },
    )?;
    Ok(())
}

#[cfg(unix)]
fn restrict_db_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    if path.exists() {
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn restrict_db_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
