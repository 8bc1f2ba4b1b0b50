//! Application collection
//!
//! The collection owns the application models. Callers get clones and write
//! changes back with [`LocalAppCollection::save`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use studio_core::prelude::*;
use studio_core::{AppId, AppModel};
use tokio::sync::RwLock;

/// Application collection operations
#[trait_variant::make(AppCollection: Send)]
pub trait LocalAppCollection {
    /// All known applications
    async fn available_apps(&self) -> Result<Vec<AppModel>>;

    /// Look up an application by id
    async fn by_id(&self, id: &AppId) -> Result<Option<AppModel>>;

    /// Remove an application, returning whether it existed
    async fn remove_by_id(&self, id: &AppId) -> Result<bool>;

    /// Insert or replace an application
    async fn save(&self, app: &AppModel) -> Result<()>;
}

/// In-memory collection, optionally persisted to a JSON file
#[derive(Debug, Clone, Default)]
pub struct MemoryAppCollection {
    apps: Arc<RwLock<Vec<AppModel>>>,
    store_path: Option<PathBuf>,
}

impl MemoryAppCollection {
    pub fn new(apps: Vec<AppModel>) -> Self {
        Self {
            apps: Arc::new(RwLock::new(apps)),
            store_path: None,
        }
    }

    /// Load from a JSON array file; a missing file yields an empty store.
    /// Every save/remove rewrites the file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let apps = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| Error::store(format!("Failed to read {:?}: {}", path, e)))?;
            serde_json::from_str(&content)?
        } else {
            debug!("No application store at {:?}, starting empty", path);
            Vec::new()
        };

        Ok(Self {
            apps: Arc::new(RwLock::new(apps)),
            store_path: Some(path),
        })
    }

    async fn persist(&self, apps: &[AppModel]) -> Result<()> {
        let Some(path) = &self.store_path else {
            return Ok(());
        };
        let content = serde_json::to_string_pretty(apps)?;
        write_atomic(path, content).await
    }
}

/// Write through a temp file + rename
pub(crate) async fn write_atomic(path: &Path, content: String) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");
    let temp = PathBuf::from(temp);

    tokio::fs::write(&temp, content)
        .await
        .map_err(|e| Error::store(format!("Failed to write {:?}: {}", temp, e)))?;
    tokio::fs::rename(&temp, path)
        .await
        .map_err(|e| Error::store(format!("Failed to replace {:?}: {}", path, e)))?;
    Ok(())
}

impl AppCollection for MemoryAppCollection {
    async fn available_apps(&self) -> Result<Vec<AppModel>> {
        Ok(self.apps.read().await.clone())
    }

    async fn by_id(&self, id: &AppId) -> Result<Option<AppModel>> {
        Ok(self.apps.read().await.iter().find(|a| &a.id == id).cloned())
    }

    async fn remove_by_id(&self, id: &AppId) -> Result<bool> {
        let mut apps = self.apps.write().await;
        if !apps.iter().any(|a| &a.id == id) {
            return Ok(false);
        }
        let updated: Vec<AppModel> = apps.iter().filter(|a| &a.id != id).cloned().collect();
        self.persist(&updated).await?;
        *apps = updated;
        Ok(true)
    }

    async fn save(&self, app: &AppModel) -> Result<()> {
        let mut apps = self.apps.write().await;
        let mut updated = apps.clone();
        match updated.iter_mut().find(|a| a.id == app.id) {
            Some(existing) => *existing = app.clone(),
            None => updated.push(app.clone()),
        }
        // Memory only changes once the store file is written
        self.persist(&updated).await?;
        *apps = updated;
        trace!("Saved application {}", app.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AppCollection, AppId, AppModel, Error, MemoryAppCollection};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_inserts_then_replaces() {
        let apps = MemoryAppCollection::default();
        let mut app = AppModel::new("a1", "One");
        apps.save(&app).await.unwrap();

        app.content.name = "Renamed".to_string();
        apps.save(&app).await.unwrap();

        let all = apps.available_apps().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name(), "Renamed");
    }

    #[tokio::test]
    async fn test_by_id_and_remove() {
        let apps = MemoryAppCollection::new(vec![
            AppModel::new("a1", "One"),
            AppModel::new("a2", "Two"),
        ]);

        let found = apps.by_id(&AppId::new("a2")).await.unwrap();
        assert_eq!(found.map(|a| a.content.name), Some("Two".to_string()));

        assert!(apps.remove_by_id(&AppId::new("a2")).await.unwrap());
        assert!(!apps.remove_by_id(&AppId::new("a2")).await.unwrap());
        assert!(apps.by_id(&AppId::new("a2")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("data").join("apps.json");

        let apps = MemoryAppCollection::open(&path).unwrap();
        assert!(apps.available_apps().await.unwrap().is_empty());
        apps.save(&AppModel::new("a1", "One")).await.unwrap();

        let reopened = MemoryAppCollection::open(&path).unwrap();
        let all = reopened.available_apps().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id.as_str(), "a1");
        assert!(!temp.path().join("data").join("apps.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_memory_unchanged() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join("blocker"), "").unwrap();
        let apps = MemoryAppCollection::open(temp.path().join("blocker").join("apps.json"))
            .unwrap();

        assert!(apps.save(&AppModel::new("a1", "One")).await.is_err());
        assert!(apps.available_apps().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_remove_keeps_app() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("apps.json");
        let apps = MemoryAppCollection::open(&path).unwrap();
        apps.save(&AppModel::new("a1", "One")).await.unwrap();

        // Swap the store file for a directory so the rename fails
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), "").unwrap();

        assert!(apps.remove_by_id(&AppId::new("a1")).await.is_err());
        assert!(apps.by_id(&AppId::new("a1")).await.unwrap().is_some());
    }

    #[test]
    fn test_open_rejects_corrupt_store() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("apps.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = MemoryAppCollection::open(&path).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
