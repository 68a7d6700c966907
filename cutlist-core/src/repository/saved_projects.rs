//! Saved-project repository with an in-memory mirror of the store.
//!
//! The mirror is only touched after the store confirms an operation. Overlapping
//! operations may be in flight at once; whichever resolves last wins in the
//! mirror. A call that never resolves leaves the mirror stale until the next
//! [`SavedProjectRepository::refresh`].

use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::model::{
    orphan_folder, CutlistFolder, FolderTree, ProjectUpdate, SavedCutlistData,
    SavedCutlistProject,
};
use crate::store::CutlistStore;

/// Last known persisted state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mirror {
    pub folders: Vec<CutlistFolder>,
    pub projects: Vec<SavedCutlistProject>,
}

/// Folder and project CRUD over an injected [`CutlistStore`].
///
/// Failures never escape: creating calls return `None`, the rest return `false`,
/// and the reason is logged.
pub struct SavedProjectRepository<S> {
    store: S,
    mirror: RwLock<Mirror>,
}

impl<S: CutlistStore> SavedProjectRepository<S> {
    /// Create a repository with an empty mirror. Call [`refresh`](Self::refresh) to load.
    pub fn new(store: S) -> Self {
        Self {
            store,
            mirror: RwLock::new(Mirror::default()),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reload folders and projects together and replace the mirror.
    ///
    /// The mirror is left as it was if either load fails.
    pub async fn refresh(&self) -> bool {
        let (folders, projects) =
            tokio::join!(self.store.load_folders(), self.store.load_projects());

        let loaded = match (folders, projects) {
            (Ok(folders), Ok(projects)) => Mirror { folders, projects },
            (Err(e), _) | (_, Err(e)) => {
                self.report("refresh", &e);
                return false;
            }
        };

        tracing::debug!(
            "Loaded {} folder(s), {} project(s) from {}",
            loaded.folders.len(),
            loaded.projects.len(),
            self.store.backend_tag()
        );
        *self.mirror.write().await = loaded;
        true
    }

    /// Save a new project. On success it is placed first in the mirror.
    pub async fn save_project(
        &self,
        name: &str,
        data: &SavedCutlistData,
        folder_id: Option<&str>,
    ) -> Option<SavedCutlistProject> {
        let result = self.store.save_project(name, data, folder_id).await;
        let project = self.settle("save project", result)?;
        self.mirror.write().await.projects.insert(0, project.clone());
        Some(project)
    }

    /// Apply a partial update. Only the provided fields change in the mirror.
    pub async fn update_project(&self, id: &str, update: &ProjectUpdate) -> bool {
        let result = self.store.update_project(id, update).await;
        if self.settle("update project", result).is_none() {
            return false;
        }

        let mut mirror = self.mirror.write().await;
        if let Some(project) = mirror.projects.iter_mut().find(|p| p.id == id) {
            update.normalized().apply_to(project, Utc::now());
        }
        true
    }

    pub async fn delete_project(&self, id: &str) -> bool {
        let result = self.store.delete_project(id).await;
        if self.settle("delete project", result).is_none() {
            return false;
        }
        self.mirror.write().await.projects.retain(|p| p.id != id);
        true
    }

    pub async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Option<CutlistFolder> {
        let result = self.store.create_folder(name, parent_id).await;
        let folder = self.settle("create folder", result)?;
        self.mirror.write().await.folders.push(folder.clone());
        Some(folder)
    }

    pub async fn rename_folder(&self, id: &str, name: &str) -> bool {
        let result = self.store.rename_folder(id, name).await;
        if self.settle("rename folder", result).is_none() {
            return false;
        }

        let mut mirror = self.mirror.write().await;
        if let Some(folder) = mirror.folders.iter_mut().find(|f| f.id == id) {
            folder.name = name.trim().to_string();
        }
        true
    }

    /// Delete a folder and move its projects (and sub-folders) to the root.
    pub async fn delete_folder(&self, id: &str) -> bool {
        let result = self.store.delete_folder(id).await;
        if self.settle("delete folder", result).is_none() {
            return false;
        }

        let mut mirror = self.mirror.write().await;
        let Mirror { folders, projects } = &mut *mirror;
        orphan_folder(folders, projects, id);
        true
    }

    pub async fn folders(&self) -> Vec<CutlistFolder> {
        self.mirror.read().await.folders.clone()
    }

    pub async fn projects(&self) -> Vec<SavedCutlistProject> {
        self.mirror.read().await.projects.clone()
    }

    pub async fn project(&self, id: &str) -> Option<SavedCutlistProject> {
        self.mirror
            .read()
            .await
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn snapshot(&self) -> Mirror {
        self.mirror.read().await.clone()
    }

    /// Nested folder view of the mirror.
    pub async fn tree(&self) -> FolderTree {
        let mirror = self.mirror.read().await;
        FolderTree::build(&mirror.folders, &mirror.projects)
    }

    fn settle<T>(&self, operation: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.report(operation, &e);
                None
            }
        }
    }

    fn report(&self, operation: &str, error: &crate::error::CutlistError) {
        tracing::warn!(
            "Failed to {} ({} store): {}",
            operation,
            self.store.backend_tag(),
            error
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_new_repository_starts_empty() {
        let repo = SavedProjectRepository::new(MemoryStore::new());
        assert_eq!(repo.snapshot().await, Mirror::default());
        assert_eq!(repo.store().call_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_issues_both_loads() {
        let repo = SavedProjectRepository::new(MemoryStore::new());
        assert!(repo.refresh().await);
        assert_eq!(repo.store().call_count(), 2);
    }

    #[tokio::test]
    async fn test_rename_folder_trims_like_the_store() {
        let repo = SavedProjectRepository::new(MemoryStore::new());
        let folder = repo.create_folder("Kitchen", None).await.unwrap();

        assert!(repo.rename_folder(&folder.id, "  Pantry ").await);

        assert_eq!(repo.folders().await[0].name, "Pantry");
        assert!(repo.refresh().await);
        assert_eq!(repo.folders().await[0].name, "Pantry");
    }
}
