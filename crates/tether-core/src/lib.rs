pub mod domain;
pub mod dto;
pub mod error;
pub mod page;
pub mod rules;
pub mod search;
pub mod time;

pub use domain::*;
pub use dto::*;
pub use error::CoreError;
pub use page::{Page, DEFAULT_PAGE_LIMIT};
pub use search::{parse_search, ContactSearch};
