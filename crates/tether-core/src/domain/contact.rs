use crate::domain::ids::ContactId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub nickname: Option<String>,
    pub city: Option<String>,
    pub how_we_met: Option<String>,
    pub linkedin_url: Option<String>,
    /// Cached time of the most recent known interaction. Refreshed when notes
    /// are created or linked, never reconciled when they are removed.
    pub last_contacted: Option<i64>,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

/// Names must be non-blank when a contact is created. Later edits only
/// require the fields to be present.
pub fn validate_names(first_name: &str, last_name: &str) -> Result<(), CoreError> {
    if first_name.trim().is_empty() {
        return Err(CoreError::EmptyFirstName);
    }
    if last_name.trim().is_empty() {
        return Err(CoreError::EmptyLastName);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_names;
    use crate::error::CoreError;

    #[test]
    fn names_must_not_be_blank() {
        assert_eq!(validate_names(" ", "Doe"), Err(CoreError::EmptyFirstName));
        assert_eq!(validate_names("John", ""), Err(CoreError::EmptyLastName));
        assert!(validate_names("John", "Doe").is_ok());
    }
}
