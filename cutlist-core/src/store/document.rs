//! The folder/project document shared by the store backends.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CutlistError, Result};
use crate::model::{
    orphan_folder, CutlistFolder, ProjectUpdate, SavedCutlistData, SavedCutlistProject,
};

/// Everything a store persists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub folders: Vec<CutlistFolder>,
    #[serde(default)]
    pub projects: Vec<SavedCutlistProject>,
}

impl StoreDocument {
    /// Projects ordered newest first.
    pub fn projects_newest_first(&self) -> Vec<SavedCutlistProject> {
        let mut projects = self.projects.clone();
        projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        projects
    }

    pub fn save_project(
        &mut self,
        name: &str,
        data: &SavedCutlistData,
        folder_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<SavedCutlistProject> {
        let name = required_name(name, "project name")?;
        if let Some(folder_id) = folder_id {
            self.require_folder(folder_id)?;
        }

        let project = SavedCutlistProject {
            id: Uuid::new_v4().to_string(),
            name,
            folder_id: folder_id.map(str::to_string),
            data: data.clone(),
            updated_at: now,
        };
        self.projects.insert(0, project.clone());
        Ok(project)
    }

    pub fn update_project(
        &mut self,
        id: &str,
        update: &ProjectUpdate,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if let Some(name) = &update.name {
            required_name(name, "project name")?;
        }
        if let Some(Some(folder_id)) = &update.folder_id {
            self.require_folder(folder_id)?;
        }

        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CutlistError::ProjectNotFound { id: id.to_string() })?;

        update.normalized().apply_to(project, now);
        Ok(())
    }

    pub fn delete_project(&mut self, id: &str) -> Result<()> {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.projects.len() == before {
            return Err(CutlistError::ProjectNotFound { id: id.to_string() });
        }
        Ok(())
    }

    pub fn create_folder(&mut self, name: &str, parent_id: Option<&str>) -> Result<CutlistFolder> {
        let name = required_name(name, "folder name")?;
        if let Some(parent_id) = parent_id {
            self.require_folder(parent_id)?;
        }

        let folder = CutlistFolder {
            id: Uuid::new_v4().to_string(),
            name,
            parent_id: parent_id.map(str::to_string),
        };
        self.folders.push(folder.clone());
        Ok(folder)
    }

    pub fn rename_folder(&mut self, id: &str, name: &str) -> Result<()> {
        let name = required_name(name, "folder name")?;
        let folder = self
            .folders
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| CutlistError::FolderNotFound { id: id.to_string() })?;
        folder.name = name;
        Ok(())
    }

    /// Delete a folder, moving its projects and sub-folders to the root.
    pub fn delete_folder(&mut self, id: &str) -> Result<()> {
        if !orphan_folder(&mut self.folders, &mut self.projects, id) {
            return Err(CutlistError::FolderNotFound { id: id.to_string() });
        }
        Ok(())
    }

    fn require_folder(&self, id: &str) -> Result<()> {
        if self.folders.iter().any(|f| f.id == id) {
            Ok(())
        } else {
            Err(CutlistError::FolderNotFound { id: id.to_string() })
        }
    }
}

fn required_name(name: &str, field: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CutlistError::blank_name(field));
    }
    Ok(trimmed.to_string())
}
