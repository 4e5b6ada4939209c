use crate::repository::InMemoryStore;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub store: Arc<InMemoryStore>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
