use std::sync::Arc;

use parking_lot::Mutex;
use tether_config::PaginationConfig;
use tether_core::Page;
use tether_store::error::StoreError;
use tether_store::Store;

use crate::api::error::ApiError;

/// Shared handler state. The store sits behind a mutex and every call into
/// it runs on the blocking pool.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<Store>>,
    title: Arc<str>,
    pagination: PaginationConfig,
}

impl AppState {
    pub fn new(store: Store, title: impl Into<String>, pagination: PaginationConfig) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            title: Arc::from(title.into()),
            pagination,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn page(&self, skip: u32, limit: Option<u32>) -> Page {
        Page::new(skip, self.pagination.effective_limit(limit))
    }

    pub async fn with_store<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Store) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let joined = tokio::task::spawn_blocking(move || {
            let guard = store.lock();
            op(&guard)
        })
        .await;

        match joined {
            Ok(result) => result.map_err(ApiError::from),
            Err(err) => Err(ApiError::Internal(format!("store task failed: {err}"))),
        }
    }
}
