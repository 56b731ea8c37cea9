//! Shared application state for all routes.

use crate::store::Store;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        AppState { store }
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
}
