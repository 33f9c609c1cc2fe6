use crate::domain::{Contact, ContactId, Note, NoteId};
use crate::time::to_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDto {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub nickname: Option<String>,
    pub city: Option<String>,
    pub how_we_met: Option<String>,
    pub linkedin_url: Option<String>,
    pub last_contacted: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDto {
    pub id: NoteId,
    pub title: Option<String>,
    pub content: String,
    pub interaction_type: String,
    pub interaction_date: DateTime<Utc>,
    pub is_group: bool,
    pub refined_content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteWithContactsDto {
    #[serde(flatten)]
    pub note: NoteDto,
    pub contact_ids: Vec<ContactId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<Contact> for ContactDto {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            nickname: contact.nickname,
            city: contact.city,
            how_we_met: contact.how_we_met,
            linkedin_url: contact.linkedin_url,
            last_contacted: contact.last_contacted.map(to_datetime),
            created_at: to_datetime(contact.created_at),
            updated_at: contact.updated_at.map(to_datetime),
        }
    }
}

impl From<Note> for NoteDto {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            interaction_type: note.interaction_type,
            interaction_date: to_datetime(note.interaction_date),
            is_group: note.is_group,
            refined_content: note.refined_content,
            created_at: to_datetime(note.created_at),
            updated_at: note.updated_at.map(to_datetime),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteDto, NoteWithContactsDto};
    use crate::domain::{ContactId, Note, NoteId};

    #[test]
    fn note_with_contacts_flattens_note_fields() {
        let note = Note {
            id: NoteId(3),
            title: Some("Coffee".to_string()),
            content: "Met for coffee".to_string(),
            interaction_type: "coffee".to_string(),
            interaction_date: 1_700_000_000_250_000,
            is_group: false,
            refined_content: None,
            created_at: 1_700_000_000_000_000,
            updated_at: None,
        };
        let dto = NoteWithContactsDto {
            note: NoteDto::from(note),
            contact_ids: vec![ContactId(1), ContactId(2)],
        };
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["id"], 3);
        assert_eq!(value["title"], "Coffee");
        assert_eq!(value["contact_ids"], serde_json::json!([1, 2]));
        assert_eq!(value["interaction_date"], "2023-11-14T22:13:20.250Z");
        assert_eq!(value["created_at"], "2023-11-14T22:13:20Z");
        assert!(value["updated_at"].is_null());
    }
}
