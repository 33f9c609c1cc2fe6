//! Request bodies and query strings.

use serde::{Deserialize, Deserializer};
use tether_core::domain::{ContactId, DEFAULT_INTERACTION_TYPE};
use tether_core::time::parse_timestamp;
use tether_store::repo::{ContactNew, ContactUpdate, NoteNew, NoteUpdate};

use crate::api::error::ApiError;

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn required<T>(value: Option<Option<T>>, field: &str) -> Result<Option<T>, ApiError> {
    match value {
        Some(None) => Err(ApiError::Validation(format!("{field} may not be null"))),
        Some(Some(value)) => Ok(Some(value)),
        None => Ok(None),
    }
}

fn default_interaction_type() -> String {
    DEFAULT_INTERACTION_TYPE.to_string()
}

/// A timestamp as sent by clients, resolved to UTC seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireTimestamp(pub i64);

impl<'de> Deserialize<'de> for WireTimestamp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .map(WireTimestamp)
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub skip: u32,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ContactListQuery {
    pub search: Option<String>,
    #[serde(default)]
    pub skip: u32,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ContactCreate {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub how_we_met: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

impl From<ContactCreate> for ContactNew {
    fn from(body: ContactCreate) -> Self {
        ContactNew {
            first_name: body.first_name,
            last_name: body.last_name,
            nickname: body.nickname,
            city: body.city,
            how_we_met: body.how_we_met,
            linkedin_url: body.linkedin_url,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactPatch {
    #[serde(default, deserialize_with = "present")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub nickname: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub how_we_met: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub linkedin_url: Option<Option<String>>,
}

impl ContactPatch {
    pub fn into_update(self) -> Result<ContactUpdate, ApiError> {
        Ok(ContactUpdate {
            first_name: required(self.first_name, "first_name")?,
            last_name: required(self.last_name, "last_name")?,
            nickname: self.nickname,
            city: self.city,
            how_we_met: self.how_we_met,
            linkedin_url: self.linkedin_url,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct NoteCreate {
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default = "default_interaction_type")]
    pub interaction_type: String,
    #[serde(default)]
    pub interaction_date: Option<WireTimestamp>,
    #[serde(default)]
    pub is_group: Option<bool>,
    pub contact_ids: Vec<ContactId>,
}

impl From<NoteCreate> for NoteNew {
    fn from(body: NoteCreate) -> Self {
        NoteNew {
            title: body.title,
            content: body.content,
            interaction_type: body.interaction_type,
            interaction_date: body.interaction_date.map(|ts| ts.0),
            is_group: body.is_group.unwrap_or(false),
            contact_ids: body.contact_ids,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NotePatch {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub content: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub interaction_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub interaction_date: Option<Option<WireTimestamp>>,
    #[serde(default, deserialize_with = "present")]
    pub is_group: Option<Option<bool>>,
}

impl NotePatch {
    pub fn into_update(self) -> Result<NoteUpdate, ApiError> {
        Ok(NoteUpdate {
            title: self.title,
            content: required(self.content, "content")?,
            interaction_type: required(self.interaction_type, "interaction_type")?,
            interaction_date: required(self.interaction_date, "interaction_date")?
                .map(|ts| ts.0),
            is_group: required(self.is_group, "is_group")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactPatch, NoteCreate, NotePatch};
    use serde_json::json;
    use tether_core::domain::ContactId;

    #[test]
    fn contact_patch_separates_absent_from_null() {
        let patch: ContactPatch =
            serde_json::from_value(json!({ "city": null, "nickname": "Bob" })).expect("patch");
        let update = patch.into_update().expect("update");
        assert_eq!(update.city, Some(None));
        assert_eq!(update.nickname, Some(Some("Bob".to_string())));
        assert_eq!(update.first_name, None);
        assert_eq!(update.how_we_met, None);
    }

    #[test]
    fn contact_patch_rejects_null_name() {
        let patch: ContactPatch =
            serde_json::from_value(json!({ "first_name": null })).expect("patch");
        let err = patch.into_update().unwrap_err();
        assert_eq!(err.to_string(), "first_name may not be null");
    }

    #[test]
    fn note_create_applies_defaults() {
        let body: NoteCreate = serde_json::from_value(json!({
            "content": "Coffee",
            "contact_ids": [1, 2]
        }))
        .expect("body");
        assert_eq!(body.interaction_type, "meeting");
        assert!(body.interaction_date.is_none());
        assert_eq!(body.contact_ids, vec![ContactId(1), ContactId(2)]);

        let note = tether_store::repo::NoteNew::from(body);
        assert!(!note.is_group);
    }

    #[test]
    fn note_create_parses_naive_dates_as_utc() {
        let body: NoteCreate = serde_json::from_value(json!({
            "content": "Lunch",
            "interaction_date": "2024-01-15T14:30:00",
            "contact_ids": [1]
        }))
        .expect("body");
        assert_eq!(body.interaction_date.map(|ts| ts.0), Some(1_705_329_000_000_000));

        let body: NoteCreate = serde_json::from_value(json!({
            "content": "Lunch",
            "interaction_date": "2024-01-15T14:30:00.123456",
            "contact_ids": [1]
        }))
        .expect("body");
        assert_eq!(
            body.interaction_date.map(|ts| ts.0),
            Some(1_705_329_000_123_456)
        );

        let bad = serde_json::from_value::<NoteCreate>(json!({
            "content": "Lunch",
            "interaction_date": "yesterday",
            "contact_ids": [1]
        }));
        assert!(bad.is_err());
    }

    #[test]
    fn note_patch_allows_clearing_title_only() {
        let patch: NotePatch = serde_json::from_value(json!({ "title": null })).expect("patch");
        let update = patch.into_update().expect("update");
        assert_eq!(update.title, Some(None));

        let patch: NotePatch =
            serde_json::from_value(json!({ "interaction_date": null })).expect("patch");
        assert!(patch.into_update().is_err());
    }
}
