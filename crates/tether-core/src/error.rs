use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("first_name is required")]
    EmptyFirstName,
    #[error("last_name is required")]
    EmptyLastName,
}
