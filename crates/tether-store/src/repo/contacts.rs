use crate::error::{Entity, Result, StoreError};
use crate::query::{ContactQuery, CONTACT_COLUMNS};
use crate::repo::in_transaction;
use crate::repo::notes::{note_from_row, NOTE_COLUMNS_QUALIFIED};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use tether_core::domain::{validate_names, Contact, ContactId, Note};
use tether_core::{ContactSearch, Page};

#[derive(Debug, Clone)]
pub struct ContactNew {
    pub first_name: String,
    pub last_name: String,
    pub nickname: Option<String>,
    pub city: Option<String>,
    pub how_we_met: Option<String>,
    pub linkedin_url: Option<String>,
}

/// Partial update. `None` leaves a field alone; for the optional columns
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default)]
pub struct ContactUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub nickname: Option<Option<String>>,
    pub city: Option<Option<String>>,
    pub how_we_met: Option<Option<String>>,
    pub linkedin_url: Option<Option<String>>,
}

pub struct ContactsRepo<'a> {
    conn: &'a Connection,
}

impl<'a> ContactsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: ContactNew) -> Result<Contact> {
        validate_names(&input.first_name, &input.last_name)?;

        self.conn.execute(
            "INSERT INTO contacts (first_name, last_name, nickname, city, how_we_met, linkedin_url, last_contacted, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL, ?7, NULL);",
            params![
                input.first_name,
                input.last_name,
                input.nickname,
                input.city,
                input.how_we_met,
                input.linkedin_url,
                now_utc,
            ],
        )?;

        Ok(Contact {
            id: ContactId(self.conn.last_insert_rowid()),
            first_name: input.first_name,
            last_name: input.last_name,
            nickname: input.nickname,
            city: input.city,
            how_we_met: input.how_we_met,
            linkedin_url: input.linkedin_url,
            last_contacted: None,
            created_at: now_utc,
            updated_at: None,
        })
    }

    pub fn get(&self, id: ContactId) -> Result<Option<Contact>> {
        get_inner(self.conn, id)
    }

    pub fn require(&self, id: ContactId) -> Result<Contact> {
        get_inner(self.conn, id)?.ok_or_else(|| StoreError::not_found(Entity::Contact, id.as_i64()))
    }

    pub fn list(&self, search: &ContactSearch, page: Page) -> Result<Vec<Contact>> {
        let compiled = ContactQuery::new(search.clone(), page).to_sql();
        let mut stmt = self.conn.prepare(&compiled.sql)?;
        let mut rows = stmt.query(params_from_iter(compiled.params))?;
        let mut contacts = Vec::new();
        while let Some(row) = rows.next()? {
            contacts.push(contact_from_row(row)?);
        }
        Ok(contacts)
    }

    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts;", [], |row| row.get(0))?;
        Ok(count)
    }

    pub fn update(&self, now_utc: i64, id: ContactId, update: ContactUpdate) -> Result<Contact> {
        in_transaction(self.conn, |conn| update_inner(conn, now_utc, id, update))
    }

    /// Removes the contact and, through the foreign key cascade, its links to
    /// notes. The notes themselves stay even when this was their last link.
    pub fn delete(&self, id: ContactId) -> Result<()> {
        in_transaction(self.conn, |conn| {
            let deleted = conn.execute("DELETE FROM contacts WHERE id = ?1;", [id.as_i64()])?;
            if deleted == 0 {
                return Err(StoreError::not_found(Entity::Contact, id.as_i64()));
            }
            Ok(())
        })
    }

    /// Notes linked to the contact, oldest first. The page is applied after
    /// loading every link.
    pub fn notes_for(&self, id: ContactId, page: Page) -> Result<Vec<Note>> {
        if !exists(self.conn, id)? {
            return Err(StoreError::not_found(Entity::Contact, id.as_i64()));
        }

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {NOTE_COLUMNS_QUALIFIED}
             FROM notes
             INNER JOIN contact_notes ON contact_notes.note_id = notes.id
             WHERE contact_notes.contact_id = ?1
             ORDER BY notes.id ASC;"
        ))?;
        let mut rows = stmt.query([id.as_i64()])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(note_from_row(row)?);
        }
        Ok(page.slice(notes))
    }
}

pub(crate) fn get_inner(conn: &Connection, id: ContactId) -> Result<Option<Contact>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1;"
    ))?;
    let mut rows = stmt.query([id.as_i64()])?;
    if let Some(row) = rows.next()? {
        Ok(Some(contact_from_row(row)?))
    } else {
        Ok(None)
    }
}

pub(crate) fn exists(conn: &Connection, id: ContactId) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM contacts WHERE id = ?1;",
            [id.as_i64()],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

/// `None` when the contact does not exist, otherwise its cached
/// `last_contacted` value.
pub(crate) fn last_contacted(conn: &Connection, id: ContactId) -> Result<Option<Option<i64>>> {
    let value = conn
        .query_row(
            "SELECT last_contacted FROM contacts WHERE id = ?1;",
            [id.as_i64()],
            |row| row.get::<_, Option<i64>>(0),
        )
        .optional()?;
    Ok(value)
}

pub(crate) fn set_last_contacted(conn: &Connection, id: ContactId, value: i64) -> Result<()> {
    conn.execute(
        "UPDATE contacts SET last_contacted = ?2 WHERE id = ?1;",
        params![id.as_i64(), value],
    )?;
    Ok(())
}

fn update_inner(
    conn: &Connection,
    now_utc: i64,
    id: ContactId,
    update: ContactUpdate,
) -> Result<Contact> {
    let mut contact = get_inner(conn, id)?
        .ok_or_else(|| StoreError::not_found(Entity::Contact, id.as_i64()))?;

    if let Some(value) = update.first_name {
        contact.first_name = value;
    }
    if let Some(value) = update.last_name {
        contact.last_name = value;
    }
    if let Some(value) = update.nickname {
        contact.nickname = value;
    }
    if let Some(value) = update.city {
        contact.city = value;
    }
    if let Some(value) = update.how_we_met {
        contact.how_we_met = value;
    }
    if let Some(value) = update.linkedin_url {
        contact.linkedin_url = value;
    }

    contact.updated_at = Some(now_utc);

    conn.execute(
        "UPDATE contacts SET first_name = ?2, last_name = ?3, nickname = ?4, city = ?5, how_we_met = ?6, linkedin_url = ?7, updated_at = ?8
         WHERE id = ?1;",
        params![
            contact.id.as_i64(),
            contact.first_name,
            contact.last_name,
            contact.nickname,
            contact.city,
            contact.how_we_met,
            contact.linkedin_url,
            contact.updated_at,
        ],
    )?;

    Ok(contact)
}

fn contact_from_row(row: &rusqlite::Row<'_>) -> Result<Contact> {
    Ok(Contact {
        id: ContactId(row.get(0)?),
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        nickname: row.get(3)?,
        city: row.get(4)?,
        how_we_met: row.get(5)?,
        linkedin_url: row.get(6)?,
        last_contacted: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}
