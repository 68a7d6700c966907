//! Configuration constants and settings for cutlist storage and rendering.

use std::path::{Path, PathBuf};

/// Number of entries in the part color palette.
pub const PALETTE_SIZE: usize = 12;

/// Separator between a part name and its instance number in placement ids.
pub const INSTANCE_SEPARATOR: char = '#';

/// Default saw kerf in mm for new snapshots.
pub const DEFAULT_KERF_MM: f64 = 3.0;

/// Default file name for the JSON project store.
pub const DEFAULT_STORE_FILE: &str = "cutlist-projects.json";

/// Environment variable the CLI reads the store path from.
pub const STORE_ENV_VAR: &str = "CUTLIST_STORE";

/// Display names for regrouped boards.
pub mod group_names {
    pub const PANELS_16MM: &str = "Panels (16mm)";
    pub const LAMINATED_32MM: &str = "Laminated (32mm)";
    pub const LAMINATED_BACKER_32MM: &str = "Laminated w/ Backer (32mm)";
}

/// Where saved projects and folders are persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the JSON store document.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_FILE),
        }
    }
}

impl StoreConfig {
    /// Create a store configuration for the given document path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sibling path used for atomic writes.
    pub fn temp_path(&self) -> PathBuf {
        temp_path_for(&self.path)
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| DEFAULT_STORE_FILE.into());
    name.push(".tmp");
    path.with_file_name(name)
}
