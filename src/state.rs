use crate::storage::GoalStore;
use std::{path::PathBuf, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub store: GoalStore,
    pub upload_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(store: GoalStore, upload_dir: PathBuf) -> Self {
        Self {
            store,
            upload_dir: Arc::new(upload_dir),
        }
    }
}
