pub mod api;
pub mod server;
pub mod state;

pub use server::{router, serve};
pub use state::AppState;
