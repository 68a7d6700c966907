//! Store backend that keeps the whole document in one JSON file.

use async_trait::async_trait;
use chrono::Utc;
use std::path::Path;
use tokio::sync::Mutex;

use super::{CutlistStore, StoreDocument};
use crate::config::StoreConfig;
use crate::error::{CutlistError, Result};
use crate::model::{CutlistFolder, ProjectUpdate, SavedCutlistData, SavedCutlistProject};

/// Store backed by a single pretty-printed JSON document on disk.
///
/// A missing file reads as an empty store. Writes go to a sibling `.tmp`
/// file which is then renamed over the document.
pub struct JsonFileStore {
    config: StoreConfig,
    /// Serialises read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    async fn read(&self) -> Result<StoreDocument> {
        let content = match tokio::fs::read_to_string(&self.config.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No store at {}, starting empty", self.config.path.display());
                return Ok(StoreDocument::default());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(StoreDocument::default());
        }

        serde_json::from_str(&content).map_err(|source| CutlistError::CorruptStore {
            path: self.config.path.clone(),
            source,
        })
    }

    async fn write(&self, document: &StoreDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        let temp = self.config.temp_path();
        tokio::fs::write(&temp, json).await?;
        tokio::fs::rename(&temp, &self.config.path).await?;
        tracing::debug!(
            "Wrote {} folder(s), {} project(s) to {}",
            document.folders.len(),
            document.projects.len(),
            self.config.path.display()
        );
        Ok(())
    }

    async fn load(&self) -> Result<StoreDocument> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    async fn mutate<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut StoreDocument) -> Result<T> + Send,
        T: Send,
    {
        let _guard = self.lock.lock().await;
        let mut document = self.read().await?;
        let value = f(&mut document)?;
        self.write(&document).await?;
        Ok(value)
    }
}

#[async_trait]
impl CutlistStore for JsonFileStore {
    fn backend_tag(&self) -> &'static str {
        "json-file"
    }

    async fn load_folders(&self) -> Result<Vec<CutlistFolder>> {
        Ok(self.load().await?.folders)
    }

    async fn load_projects(&self) -> Result<Vec<SavedCutlistProject>> {
        Ok(self.load().await?.projects_newest_first())
    }

    async fn save_project(
        &self,
        name: &str,
        data: &SavedCutlistData,
        folder_id: Option<&str>,
    ) -> Result<SavedCutlistProject> {
        self.mutate(|doc| doc.save_project(name, data, folder_id, Utc::now()))
            .await
    }

    async fn update_project(&self, id: &str, update: &ProjectUpdate) -> Result<()> {
        self.mutate(|doc| doc.update_project(id, update, Utc::now()))
            .await
    }

    async fn delete_project(&self, id: &str) -> Result<()> {
        self.mutate(|doc| doc.delete_project(id)).await
    }

    async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<CutlistFolder> {
        self.mutate(|doc| doc.create_folder(name, parent_id)).await
    }

    async fn rename_folder(&self, id: &str, name: &str) -> Result<()> {
        self.mutate(|doc| doc.rename_folder(id, name)).await
    }

    async fn delete_folder(&self, id: &str) -> Result<()> {
        self.mutate(|doc| doc.delete_folder(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonFileStore {
        JsonFileStore::new(StoreConfig::new(dir.path().join("projects.json")))
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load_folders().await.unwrap().is_empty());
        assert!(store.load_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_changes_persist_across_instances() {
        let dir = TempDir::new().unwrap();
        let folder = {
            let store = store_in(&dir);
            let folder = store.create_folder("Kitchen", None).await.unwrap();
            store
                .save_project("Base units", &SavedCutlistData::default(), Some(&folder.id))
                .await
                .unwrap();
            folder
        };

        let reopened = store_in(&dir);
        assert_eq!(reopened.load_folders().await.unwrap(), vec![folder.clone()]);
        let projects = reopened.load_projects().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].folder_id.as_deref(), Some(folder.id.as_str()));
        assert!(!dir.path().join("projects.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.create_folder("Kitchen", None).await.unwrap();
        let before = std::fs::read_to_string(store.path()).unwrap();

        let err = store.rename_folder("missing", "X").await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
    }

    #[tokio::test]
    async fn test_corrupt_file_reports_serialization_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();

        let err = store.load_folders().await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::Serialization);
    }
}
