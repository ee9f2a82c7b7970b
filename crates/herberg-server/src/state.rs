use std::sync::Arc;

use herberg_core::Directory;
use herberg_db::FileStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<Directory<FileStore>>,
}

impl AppState {
    pub fn new(directory: Directory<FileStore>) -> Self {
        Self {
            directory: Arc::new(directory),
        }
    }
}
