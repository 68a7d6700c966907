//! Persistence collaborator for saved projects and folders.
//!
//! Backends return a tagged [`Result`](crate::error::Result); the repository
//! turns failures into sentinel values at its public boundary.

mod document;
mod json_file;
mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{CutlistFolder, ProjectUpdate, SavedCutlistData, SavedCutlistProject};

pub use document::StoreDocument;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Storage for cutlist folders and saved projects.
#[async_trait]
pub trait CutlistStore: Send + Sync {
    /// Short name used in log lines.
    fn backend_tag(&self) -> &'static str;

    async fn load_folders(&self) -> Result<Vec<CutlistFolder>>;

    /// All projects, newest first.
    async fn load_projects(&self) -> Result<Vec<SavedCutlistProject>>;

    async fn save_project(
        &self,
        name: &str,
        data: &SavedCutlistData,
        folder_id: Option<&str>,
    ) -> Result<SavedCutlistProject>;

    async fn update_project(&self, id: &str, update: &ProjectUpdate) -> Result<()>;

    async fn delete_project(&self, id: &str) -> Result<()>;

    async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<CutlistFolder>;

    async fn rename_folder(&self, id: &str, name: &str) -> Result<()>;

    /// Delete a folder. Projects inside it must end up with `folder_id = None`.
    async fn delete_folder(&self, id: &str) -> Result<()>;
}
