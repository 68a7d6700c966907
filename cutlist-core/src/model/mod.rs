//! Data model for cutlist groups, parts, placements and saved projects.

mod group;
mod part;
mod placement;
mod project;
mod tree;

pub use group::{ApiCutlistGroup, BoardType, DatabaseCutlistGroup};
pub use part::{BandEdges, CompactPart, CutlistPart, Grain, LaminationType};
pub use placement::Placement;
pub use project::{
    orphan_folder, CutlistFolder, ProjectUpdate, SavedCutlistData, SavedCutlistProject,
    StockSheetSpec,
};
pub use tree::{folder_path, FolderNode, FolderTree};
