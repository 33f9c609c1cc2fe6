pub mod contact;
pub mod ids;
pub mod note;

pub use contact::{validate_names, Contact};
pub use ids::{ContactId, NoteId};
pub use note::{Note, DEFAULT_INTERACTION_TYPE};
