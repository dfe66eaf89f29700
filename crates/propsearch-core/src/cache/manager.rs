use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Persistence;
use crate::store::DatasetId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        age_minutes(self.cached_at)
    }

    pub fn age_display(&self) -> String {
        age_display(self.cached_at)
    }
}

pub fn age_minutes(at: DateTime<Utc>) -> i64 {
    (Utc::now() - at).num_minutes()
}

/// Human-readable age of a timestamp: "just now", "5m ago", "2h ago", "3d ago".
pub fn age_display(at: DateTime<Utc>) -> String {
    let minutes = age_minutes(at);
    if minutes < 1 {
        // Includes negative ages from clock skew
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        let hours = minutes / 60;
        let remaining_mins = minutes % 60;
        if remaining_mins >= 30 {
            // Round up: 1h 30m+ becomes 2h
            format!("{}h ago", hours + 1)
        } else {
            format!("{}h ago", hours)
        }
    } else {
        let days = minutes / 1440;
        let remaining_hours = (minutes % 1440) / 60;
        if remaining_hours >= 12 {
            // Round up: 1d 12h+ becomes 2d
            format!("{}d ago", days + 1)
        } else {
            format!("{}d ago", days)
        }
    }
}

/// File-backed persistence: `<cache_dir>/<dataset>.json`.
pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache directory: {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn cache_path(&self, id: DatasetId) -> PathBuf {
        self.cache_dir.join(format!("{}.json", id.key()))
    }

    /// Remove every cached snapshot
    pub fn clear(&self) -> Result<()> {
        for id in DatasetId::ALL {
            let path = self.cache_path(id);
            if path.exists() {
                std::fs::remove_file(&path)
                    .with_context(|| format!("Failed to remove cache file: {}", id))?;
            }
        }
        Ok(())
    }
}

impl Persistence for CacheManager {
    fn load(&self, id: DatasetId) -> Result<Option<String>> {
        let path = self.cache_path(id);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", id))?;
        debug!(dataset = %id, bytes = contents.len(), "Cache file read");
        Ok(Some(contents))
    }

    fn save(&self, id: DatasetId, contents: &str) -> Result<()> {
        let path = self.cache_path(id);
        // Readers only ever see a complete snapshot
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, contents)
            .with_context(|| format!("Failed to write cache file: {}", id))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace cache file: {}", id))?;
        debug!(dataset = %id, bytes = contents.len(), "Cache file written");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_cached_data_age_display_just_now() {
        let cached = CachedData::new(vec![1, 2, 3]);
        assert_eq!(cached.age_display(), "just now");
    }

    #[test]
    fn test_age_display_rounding() {
        let now = Utc::now();
        assert_eq!(age_display(now - Duration::minutes(5)), "5m ago");
        assert_eq!(age_display(now - Duration::minutes(90)), "2h ago");
        assert_eq!(age_display(now - Duration::minutes(70)), "1h ago");
        assert_eq!(age_display(now - Duration::hours(36)), "2d ago");
        assert_eq!(age_display(now - Duration::hours(30)), "1d ago");
        assert_eq!(age_display(now + Duration::minutes(10)), "just now");
    }

    #[test]
    fn test_cached_data_age_minutes() {
        let cached = CachedData::new(vec![1]);
        assert!(cached.age_minutes() <= 1);
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(dir.path().join("nested")).unwrap();
        assert!(cache.cache_dir().exists());
        assert!(cache.load(DatasetId::School).unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();

        cache.save(DatasetId::Transit, r#"{"data":[]}"#).unwrap();
        assert!(dir.path().join("transit.json").exists());
        assert!(!dir.path().join("transit.json.tmp").exists());
        assert_eq!(
            cache.load(DatasetId::Transit).unwrap().as_deref(),
            Some(r#"{"data":[]}"#)
        );

        // Other datasets are untouched
        assert!(cache.load(DatasetId::Metadata).unwrap().is_none());
    }

    #[test]
    fn test_clear_removes_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheManager::new(dir.path().to_path_buf()).unwrap();
        cache.save(DatasetId::School, "[]").unwrap();
        cache.save(DatasetId::Metadata, "[]").unwrap();

        cache.clear().unwrap();
        assert!(cache.load(DatasetId::School).unwrap().is_none());
        assert!(cache.load(DatasetId::Metadata).unwrap().is_none());
    }
}
