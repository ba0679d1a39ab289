use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Listing entry for a generated clip. The bytes live in [`PreviewStore`]
/// under `id` until the handle is released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewItem {
    pub id: Uuid,
    pub source_word: String,
    pub display_name: String,
    pub size_bytes: usize,
}

/// Owner of preview clip bytes.
///
/// Every registered handle stays alive until it is released, either one by
/// one or all at once when a new run starts or the results are cleared.
/// Releasing is idempotent, and dropping the store frees whatever is left.
#[derive(Debug, Default)]
pub struct PreviewStore {
    clips: Mutex<HashMap<Uuid, Arc<Vec<u8>>>>,
}

impl PreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, source_word: &str, display_name: &str, bytes: Vec<u8>) -> PreviewItem {
        let id = Uuid::new_v4();
        let size_bytes = bytes.len();
        self.clips.lock().insert(id, Arc::new(bytes));

        PreviewItem {
            id,
            source_word: source_word.to_string(),
            display_name: display_name.to_string(),
            size_bytes,
        }
    }

    /// Bytes behind a live handle
    pub fn get(&self, id: Uuid) -> Option<Arc<Vec<u8>>> {
        self.clips.lock().get(&id).cloned()
    }

    /// Returns whether the handle was still live
    pub fn release(&self, id: Uuid) -> bool {
        self.clips.lock().remove(&id).is_some()
    }

    /// Release every live handle, returning how many were freed
    pub fn release_all(&self) -> usize {
        let mut clips = self.clips.lock();
        let released = clips.len();
        clips.clear();
        released
    }

    pub fn live_count(&self) -> usize {
        self.clips.lock().len()
    }
}
