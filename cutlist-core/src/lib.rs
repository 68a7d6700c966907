//! cutlist-core - Bookkeeping layer for the cutlist optimizer.
//!
//! This library converts between persisted board groups and the flat part list
//! used for editing, assigns stable colors to part families on packed sheets,
//! and keeps named cutlist snapshots in a folder hierarchy.
//!
//! # Example
//!
//! ```no_run
//! use cutlist_core::{flatten, regroup, DatabaseCutlistGroup};
//!
//! let groups: Vec<DatabaseCutlistGroup> = serde_json::from_str("[]").unwrap();
//! let mut parts = flatten(&groups);
//! parts.retain(|p| p.quantity > 0);
//! let to_save = regroup(&parts);
//! println!("{}", serde_json::to_string_pretty(&to_save).unwrap());
//! ```

pub mod color;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod repository;
pub mod store;
pub mod validation;

// Re-exports for convenience
pub use color::{base_part_name, build_color_map, color_for, ColorEntry, ColorMap, PALETTE, WASTE_COLOR};
pub use config::StoreConfig;
pub use convert::{flatten, flatten_group, regroup};
pub use error::{CutlistError, ErrorCode, Result};
pub use model::{
    ApiCutlistGroup, BandEdges, BoardType, CompactPart, CutlistFolder, CutlistPart,
    DatabaseCutlistGroup, FolderNode, FolderTree, Grain, LaminationType, Placement,
    ProjectUpdate, SavedCutlistData, SavedCutlistProject, StockSheetSpec,
};
pub use repository::{Mirror, SavedProjectRepository};
pub use store::{CutlistStore, JsonFileStore, MemoryStore, StoreDocument};
pub use validation::{validate_groups, validate_parts, ValidationResult};

/// Flatten stored groups, edit them with `edit`, and regroup for saving.
///
/// Convenience for callers that apply a batch edit to a product's cutlist.
pub fn edit_groups<F>(groups: &[DatabaseCutlistGroup], edit: F) -> Vec<ApiCutlistGroup>
where
    F: FnOnce(&mut Vec<CompactPart>),
{
    let mut parts = flatten(groups);
    edit(&mut parts);

    let validation = validate_parts(&parts);
    for warning in &validation.warnings {
        tracing::warn!("{}", warning);
    }
    for error in &validation.errors {
        tracing::warn!("{}", error);
    }

    regroup(&parts)
}
