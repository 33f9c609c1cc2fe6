pub mod contacts;
pub mod notes;

pub use contacts::{ContactNew, ContactUpdate, ContactsRepo};
pub use notes::{LinkOutcome, NoteNew, NoteUpdate, NotesRepo, UnlinkOutcome};

use crate::error::Result;
use rusqlite::Connection;

/// Runs `op` in its own transaction, or inside the caller's when one is
/// already open.
pub(crate) fn in_transaction<T>(
    conn: &Connection,
    op: impl FnOnce(&Connection) -> Result<T>,
) -> Result<T> {
    if conn.is_autocommit() {
        let tx = conn.unchecked_transaction()?;
        let value = op(&tx)?;
        tx.commit()?;
        Ok(value)
    } else {
        op(conn)
    }
}
