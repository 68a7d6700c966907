//! Board groups: the persisted and the save-endpoint shapes.

use serde::{Deserialize, Serialize};

use super::part::{CutlistPart, LaminationType};
use crate::config::group_names;

/// Physical board construction of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BoardType {
    /// Single 16mm board.
    #[default]
    #[serde(rename = "16mm")]
    Panels16,
    /// Two primary boards laminated to 32mm.
    #[serde(rename = "32mm-both")]
    Laminated32Both,
    /// Primary board on a backer, 32mm total.
    #[serde(rename = "32mm-backer")]
    Laminated32Backer,
}

impl BoardType {
    /// Lamination implied for parts of a group with this board type.
    pub fn lamination_type(&self) -> LaminationType {
        match self {
            BoardType::Panels16 => LaminationType::None,
            BoardType::Laminated32Both => LaminationType::SameBoard,
            BoardType::Laminated32Backer => LaminationType::WithBacker,
        }
    }

    /// Generated group name used when regrouping.
    pub fn display_name(&self) -> &'static str {
        match self {
            BoardType::Panels16 => group_names::PANELS_16MM,
            BoardType::Laminated32Both => group_names::LAMINATED_32MM,
            BoardType::Laminated32Backer => group_names::LAMINATED_BACKER_32MM,
        }
    }

    /// Wire string for this board type.
    pub fn as_str(&self) -> &'static str {
        match self {
            BoardType::Panels16 => "16mm",
            BoardType::Laminated32Both => "32mm-both",
            BoardType::Laminated32Backer => "32mm-backer",
        }
    }
}

impl std::fmt::Display for BoardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A group as read from storage, scoped to one product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseCutlistGroup {
    pub group_id: i64,
    pub product_id: i64,
    pub name: String,
    /// `None` when the stored value is missing or unrecognised.
    #[serde(deserialize_with = "lenient_board_type")]
    pub board_type: Option<BoardType>,
    pub primary_material_id: Option<i64>,
    pub primary_material_name: Option<String>,
    pub backer_material_id: Option<i64>,
    pub backer_material_name: Option<String>,
    pub parts: Vec<CutlistPart>,
    pub sort_order: i32,
}

/// A group in the shape accepted by the save endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiCutlistGroup {
    pub name: String,
    pub board_type: BoardType,
    pub primary_material_id: Option<String>,
    pub primary_material_name: Option<String>,
    pub backer_material_id: Option<String>,
    pub backer_material_name: Option<String>,
    pub parts: Vec<CutlistPart>,
    pub sort_order: i32,
}

fn lenient_board_type<'de, D>(deserializer: D) -> Result<Option<BoardType>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}
