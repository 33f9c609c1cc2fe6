use crate::domain::ids::NoteId;
use serde::{Deserialize, Serialize};

pub const DEFAULT_INTERACTION_TYPE: &str = "meeting";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: Option<String>,
    pub content: String,
    pub interaction_type: String,
    pub interaction_date: i64,
    pub is_group: bool,
    pub refined_content: Option<String>,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}
