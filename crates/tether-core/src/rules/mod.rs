pub mod association;

pub use association::{effective_is_group, last_contacted_on_create, last_contacted_on_link};
