//! In-memory store backend with failure injection, used as a test double.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::Mutex;

use super::{CutlistStore, StoreDocument};
use crate::error::{CutlistError, Result};
use crate::model::{CutlistFolder, ProjectUpdate, SavedCutlistData, SavedCutlistProject};

/// In-process store. Also serves as the fake in repository tests.
#[derive(Default)]
pub struct MemoryStore {
    document: Mutex<StoreDocument>,
    failing: AtomicBool,
    calls: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing document.
    pub fn with_document(document: StoreDocument) -> Self {
        Self {
            document: Mutex::new(document),
            ..Default::default()
        }
    }

    /// Make every subsequent call fail with `Unavailable`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of store calls made so far.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    /// Copy of the stored document.
    pub async fn snapshot(&self) -> StoreDocument {
        self.document.lock().await.clone()
    }

    fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(CutlistError::Unavailable {
                message: "memory store set to fail".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CutlistStore for MemoryStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn load_folders(&self) -> Result<Vec<CutlistFolder>> {
        self.enter()?;
        Ok(self.document.lock().await.folders.clone())
    }

    async fn load_projects(&self) -> Result<Vec<SavedCutlistProject>> {
        self.enter()?;
        Ok(self.document.lock().await.projects_newest_first())
    }

    async fn save_project(
        &self,
        name: &str,
        data: &SavedCutlistData,
        folder_id: Option<&str>,
    ) -> Result<SavedCutlistProject> {
        self.enter()?;
        self.document
            .lock()
            .await
            .save_project(name, data, folder_id, Utc::now())
    }

    async fn update_project(&self, id: &str, update: &ProjectUpdate) -> Result<()> {
        self.enter()?;
        self.document
            .lock()
            .await
            .update_project(id, update, Utc::now())
    }

    async fn delete_project(&self, id: &str) -> Result<()> {
        self.enter()?;
        self.document.lock().await.delete_project(id)
    }

    async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<CutlistFolder> {
        self.enter()?;
        self.document.lock().await.create_folder(name, parent_id)
    }

    async fn rename_folder(&self, id: &str, name: &str) -> Result<()> {
        self.enter()?;
        self.document.lock().await.rename_folder(id, name)
    }

    async fn delete_folder(&self, id: &str) -> Result<()> {
        self.enter()?;
        self.document.lock().await.delete_folder(id)
    }
}
