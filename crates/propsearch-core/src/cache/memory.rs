use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use anyhow::Result;

use super::Persistence;
use crate::store::DatasetId;

/// In-process persistence. Share one instance between store generations to
/// simulate a restart.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<DatasetId, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: DatasetId) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&id)
    }
}

impl Persistence for MemoryCache {
    fn load(&self, id: DatasetId) -> Result<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(&id).cloned())
    }

    fn save(&self, id: DatasetId, contents: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(id, contents.to_string());
        Ok(())
    }
}
