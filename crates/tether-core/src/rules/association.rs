//! `last_contacted` is a best-effort cache of the latest known interaction.
//! It is refreshed when a note is created or linked and is left alone when
//! notes or links are deleted, so it may point at an interaction that no
//! longer exists.

/// New value for every contact linked by a freshly created note. Creation
/// overwrites whatever was cached, even a later timestamp.
pub fn last_contacted_on_create(interaction_date: i64) -> i64 {
    interaction_date
}

/// New value for a contact linked to an existing note, or `None` when the
/// cached value must stay. Only a strictly later interaction replaces it.
pub fn last_contacted_on_link(current: Option<i64>, interaction_date: i64) -> Option<i64> {
    match current {
        None => Some(interaction_date),
        Some(existing) if interaction_date > existing => Some(interaction_date),
        Some(_) => None,
    }
}

pub fn effective_is_group(requested: bool, linked_contacts: usize) -> bool {
    requested || linked_contacts > 1
}

#[cfg(test)]
mod tests {
    use super::{effective_is_group, last_contacted_on_create, last_contacted_on_link};

    #[test]
    fn create_always_overwrites() {
        assert_eq!(
            last_contacted_on_create(1_700_000_000_000_000),
            1_700_000_000_000_000
        );
    }

    #[test]
    fn link_fills_unset_value() {
        assert_eq!(last_contacted_on_link(None, 100), Some(100));
    }

    #[test]
    fn link_keeps_latest() {
        assert_eq!(last_contacted_on_link(Some(100), 200), Some(200));
        assert_eq!(last_contacted_on_link(Some(200), 100), None);
        assert_eq!(last_contacted_on_link(Some(200), 200), None);
        // Same second, 0.7s apart.
        let early = 1_705_329_000_200_000;
        assert_eq!(
            last_contacted_on_link(Some(early), early + 700_000),
            Some(early + 700_000)
        );
    }

    #[test]
    fn group_flag_follows_contact_count() {
        assert!(!effective_is_group(false, 1));
        assert!(effective_is_group(false, 2));
        assert!(effective_is_group(true, 1));
    }
}
