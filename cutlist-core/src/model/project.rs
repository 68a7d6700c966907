//! Saved cutlist projects and the folders that organise them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::part::CompactPart;
use crate::config::DEFAULT_KERF_MM;

/// A node in the folder tree. `parent_id = None` is a root folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutlistFolder {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

/// Stock sheet available to the optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockSheetSpec {
    pub id: String,
    pub length_mm: f64,
    pub width_mm: f64,
    pub quantity: u32,
    pub kerf_mm: f64,
}

impl Default for StockSheetSpec {
    fn default() -> Self {
        Self {
            id: String::new(),
            length_mm: 2750.0,
            width_mm: 1830.0,
            quantity: 1,
            kerf_mm: DEFAULT_KERF_MM,
        }
    }
}

/// Editable cutlist state captured by a saved project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedCutlistData {
    pub parts: Vec<CompactPart>,
    pub stock: Vec<StockSheetSpec>,
    pub kerf_mm: f64,
    pub allow_rotation: bool,
    /// UI state this crate does not interpret, kept verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Default for SavedCutlistData {
    fn default() -> Self {
        Self {
            parts: Vec::new(),
            stock: Vec::new(),
            kerf_mm: DEFAULT_KERF_MM,
            allow_rotation: true,
            extra: serde_json::Map::new(),
        }
    }
}

impl SavedCutlistData {
    /// Create a snapshot holding only parts.
    pub fn with_parts(parts: Vec<CompactPart>) -> Self {
        Self {
            parts,
            ..Default::default()
        }
    }
}

/// A named, folder-scoped snapshot of editable cutlist state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCutlistProject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub folder_id: Option<String>,
    pub data: SavedCutlistData,
    pub updated_at: DateTime<Utc>,
}

/// Partial update to a saved project. Absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `Some(None)` moves the project to the root.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub folder_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SavedCutlistData>,
}

impl ProjectUpdate {
    /// Update that only renames.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Update that only moves to a folder (or the root with `None`).
    pub fn move_to(folder_id: Option<String>) -> Self {
        Self {
            folder_id: Some(folder_id),
            ..Default::default()
        }
    }

    /// Check if the update changes anything.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.folder_id.is_none() && self.data.is_none()
    }

    /// Copy with the new name trimmed, as stores persist it.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.as_ref().map(|n| n.trim().to_string()),
            ..self.clone()
        }
    }

    /// Patch the provided fields onto a project and stamp `updated_at`.
    pub fn apply_to(&self, project: &mut SavedCutlistProject, updated_at: DateTime<Utc>) {
        if let Some(name) = &self.name {
            project.name = name.clone();
        }
        if let Some(folder_id) = &self.folder_id {
            project.folder_id = folder_id.clone();
        }
        if let Some(data) = &self.data {
            project.data = data.clone();
        }
        project.updated_at = updated_at;
    }
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Remove a folder and send everything that lived in it to the root.
///
/// Projects in the folder get `folder_id = None`; direct child folders get
/// `parent_id = None`. A server-side store must apply the same rule to child
/// folders or the mirror drifts until the next refresh. Returns `false` when
/// the folder did not exist.
pub fn orphan_folder(
    folders: &mut Vec<CutlistFolder>,
    projects: &mut [SavedCutlistProject],
    folder_id: &str,
) -> bool {
    let before = folders.len();
    folders.retain(|f| f.id != folder_id);
    let removed = folders.len() != before;

    for folder in folders.iter_mut() {
        if folder.parent_id.as_deref() == Some(folder_id) {
            folder.parent_id = None;
        }
    }
    for project in projects.iter_mut() {
        if project.folder_id.as_deref() == Some(folder_id) {
            project.folder_id = None;
        }
    }

    removed
}
