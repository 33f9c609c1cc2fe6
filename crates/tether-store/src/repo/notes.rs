use crate::error::{Entity, Result, StoreError};
use crate::repo::contacts::{exists as contact_exists, last_contacted, set_last_contacted};
use crate::repo::in_transaction;
use rusqlite::{params, Connection, OptionalExtension};
use tether_core::domain::{ContactId, Note, NoteId};
use tether_core::rules::{effective_is_group, last_contacted_on_create, last_contacted_on_link};
use tether_core::Page;

const NOTE_COLUMNS: &str = "id, title, content, interaction_type, interaction_date, is_group, refined_content, created_at, updated_at";
pub(crate) const NOTE_COLUMNS_QUALIFIED: &str = "notes.id, notes.title, notes.content, notes.interaction_type, notes.interaction_date, notes.is_group, notes.refined_content, notes.created_at, notes.updated_at";

#[derive(Debug, Clone)]
pub struct NoteNew {
    pub title: Option<String>,
    pub content: String,
    pub interaction_type: String,
    /// Defaults to the creation time when absent.
    pub interaction_date: Option<i64>,
    pub is_group: bool,
    pub contact_ids: Vec<ContactId>,
}

/// Partial update of a note's own columns. Links, `is_group` derivation and
/// contacts' `last_contacted` are never touched by an update.
#[derive(Debug, Clone, Default)]
pub struct NoteUpdate {
    pub title: Option<Option<String>>,
    pub content: Option<String>,
    pub interaction_type: Option<String>,
    pub interaction_date: Option<i64>,
    pub is_group: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    Linked,
    AlreadyLinked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlinkOutcome {
    Unlinked,
    NotLinked,
}

pub struct NotesRepo<'a> {
    conn: &'a Connection,
}

impl<'a> NotesRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn list(&self, page: Page) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes ORDER BY id ASC LIMIT ?1 OFFSET ?2;"
        ))?;
        let mut rows = stmt.query(params![i64::from(page.limit), i64::from(page.offset)])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(note_from_row(row)?);
        }
        Ok(notes)
    }

    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM notes;", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Creates the note, links every contact id that resolves and stamps
    /// those contacts' `last_contacted` with the interaction date. Ids that do
    /// not resolve are dropped; if none resolve nothing is written.
    pub fn create(&self, now_utc: i64, input: NoteNew) -> Result<Note> {
        in_transaction(self.conn, |conn| create_inner(conn, now_utc, input))
    }

    pub fn get(&self, id: NoteId) -> Result<Option<Note>> {
        get_inner(self.conn, id)
    }

    pub fn require(&self, id: NoteId) -> Result<Note> {
        get_inner(self.conn, id)?.ok_or_else(|| StoreError::not_found(Entity::Note, id.as_i64()))
    }

    pub fn contact_ids(&self, id: NoteId) -> Result<Vec<ContactId>> {
        let mut stmt = self.conn.prepare(
            "SELECT contact_id FROM contact_notes WHERE note_id = ?1 ORDER BY contact_id ASC;",
        )?;
        let mut rows = stmt.query([id.as_i64()])?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            ids.push(ContactId(row.get(0)?));
        }
        Ok(ids)
    }

    pub fn update(&self, now_utc: i64, id: NoteId, update: NoteUpdate) -> Result<Note> {
        in_transaction(self.conn, |conn| update_inner(conn, now_utc, id, update))
    }

    /// Removes the note and its links. Contacts keep whatever
    /// `last_contacted` the note gave them.
    pub fn delete(&self, id: NoteId) -> Result<()> {
        in_transaction(self.conn, |conn| {
            let deleted = conn.execute("DELETE FROM notes WHERE id = ?1;", [id.as_i64()])?;
            if deleted == 0 {
                return Err(StoreError::not_found(Entity::Note, id.as_i64()));
            }
            Ok(())
        })
    }

    pub fn add_contact(&self, note_id: NoteId, contact_id: ContactId) -> Result<LinkOutcome> {
        in_transaction(self.conn, |conn| add_contact_inner(conn, note_id, contact_id))
    }

    pub fn remove_contact(&self, note_id: NoteId, contact_id: ContactId) -> Result<UnlinkOutcome> {
        in_transaction(self.conn, |conn| {
            if get_inner(conn, note_id)?.is_none() {
                return Err(StoreError::not_found(Entity::Note, note_id.as_i64()));
            }
            if !contact_exists(conn, contact_id)? {
                return Err(StoreError::not_found(Entity::Contact, contact_id.as_i64()));
            }

            let removed = conn.execute(
                "DELETE FROM contact_notes WHERE contact_id = ?1 AND note_id = ?2;",
                params![contact_id.as_i64(), note_id.as_i64()],
            )?;
            if removed == 0 {
                Ok(UnlinkOutcome::NotLinked)
            } else {
                Ok(UnlinkOutcome::Unlinked)
            }
        })
    }
}

fn create_inner(conn: &Connection, now_utc: i64, input: NoteNew) -> Result<Note> {
    let mut resolved: Vec<ContactId> = Vec::new();
    for contact_id in input.contact_ids {
        if resolved.contains(&contact_id) {
            continue;
        }
        if contact_exists(conn, contact_id)? {
            resolved.push(contact_id);
        }
    }
    if resolved.is_empty() {
        return Err(StoreError::NoValidContacts);
    }

    let interaction_date = input.interaction_date.unwrap_or(now_utc);
    let is_group = effective_is_group(input.is_group, resolved.len());

    conn.execute(
        "INSERT INTO notes (title, content, interaction_type, interaction_date, is_group, refined_content, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, NULL, ?6, NULL);",
        params![
            input.title,
            input.content,
            input.interaction_type,
            interaction_date,
            is_group,
            now_utc,
        ],
    )?;
    let note = Note {
        id: NoteId(conn.last_insert_rowid()),
        title: input.title,
        content: input.content,
        interaction_type: input.interaction_type,
        interaction_date,
        is_group,
        refined_content: None,
        created_at: now_utc,
        updated_at: None,
    };

    let last_contacted = last_contacted_on_create(interaction_date);
    for contact_id in &resolved {
        link(conn, *contact_id, note.id)?;
        set_last_contacted(conn, *contact_id, last_contacted)?;
    }

    Ok(note)
}

fn add_contact_inner(
    conn: &Connection,
    note_id: NoteId,
    contact_id: ContactId,
) -> Result<LinkOutcome> {
    let note = get_inner(conn, note_id)?
        .ok_or_else(|| StoreError::not_found(Entity::Note, note_id.as_i64()))?;
    let current = last_contacted(conn, contact_id)?
        .ok_or_else(|| StoreError::not_found(Entity::Contact, contact_id.as_i64()))?;

    if is_linked(conn, contact_id, note_id)? {
        return Ok(LinkOutcome::AlreadyLinked);
    }

    link(conn, contact_id, note_id)?;
    if let Some(value) = last_contacted_on_link(current, note.interaction_date) {
        set_last_contacted(conn, contact_id, value)?;
    }
    Ok(LinkOutcome::Linked)
}

fn update_inner(conn: &Connection, now_utc: i64, id: NoteId, update: NoteUpdate) -> Result<Note> {
    let mut note =
        get_inner(conn, id)?.ok_or_else(|| StoreError::not_found(Entity::Note, id.as_i64()))?;

    if let Some(value) = update.title {
        note.title = value;
    }
    if let Some(value) = update.content {
        note.content = value;
    }
    if let Some(value) = update.interaction_type {
        note.interaction_type = value;
    }
    if let Some(value) = update.interaction_date {
        note.interaction_date = value;
    }
    if let Some(value) = update.is_group {
        note.is_group = value;
    }

    note.updated_at = Some(now_utc);

    conn.execute(
        "UPDATE notes SET title = ?2, content = ?3, interaction_type = ?4, interaction_date = ?5, is_group = ?6, updated_at = ?7
         WHERE id = ?1;",
        params![
            note.id.as_i64(),
            note.title,
            note.content,
            note.interaction_type,
            note.interaction_date,
            note.is_group,
            note.updated_at,
        ],
    )?;

    Ok(note)
}

fn get_inner(conn: &Connection, id: NoteId) -> Result<Option<Note>> {
    let mut stmt = conn.prepare(&format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1;"))?;
    let mut rows = stmt.query([id.as_i64()])?;
    if let Some(row) = rows.next()? {
        Ok(Some(note_from_row(row)?))
    } else {
        Ok(None)
    }
}

fn is_linked(conn: &Connection, contact_id: ContactId, note_id: NoteId) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM contact_notes WHERE contact_id = ?1 AND note_id = ?2;",
            params![contact_id.as_i64(), note_id.as_i64()],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

fn link(conn: &Connection, contact_id: ContactId, note_id: NoteId) -> Result<()> {
    conn.execute(
        "INSERT INTO contact_notes (contact_id, note_id) VALUES (?1, ?2);",
        params![contact_id.as_i64(), note_id.as_i64()],
    )?;
    Ok(())
}

pub(crate) fn note_from_row(row: &rusqlite::Row<'_>) -> Result<Note> {
    Ok(Note {
        id: NoteId(row.get(0)?),
        title: row.get(1)?,
        content: row.get(2)?,
        interaction_type: row.get(3)?,
        interaction_date: row.get(4)?,
        is_group: row.get(5)?,
        refined_content: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}
