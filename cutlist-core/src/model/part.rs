//! Part definitions: the cuttable pieces of a cutlist.

use serde::{Deserialize, Serialize};

use super::group::BoardType;

/// How a part's faces are laminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaminationType {
    /// Single 16mm board.
    #[default]
    None,
    /// Two boards of the same material glued together.
    SameBoard,
    /// Primary board laminated onto a backer board.
    WithBacker,
    /// Free-form layer configuration (see `lamination_config`).
    Custom,
}

impl LaminationType {
    /// Board type a part with this lamination is regrouped under.
    ///
    /// `Custom` has no board slot of its own and collapses to 16mm.
    pub fn board_type(&self) -> BoardType {
        match self {
            LaminationType::None => BoardType::Panels16,
            LaminationType::SameBoard => BoardType::Laminated32Both,
            LaminationType::WithBacker => BoardType::Laminated32Backer,
            LaminationType::Custom => BoardType::Panels16,
        }
    }

    /// Wire string for this lamination type.
    pub fn as_str(&self) -> &'static str {
        match self {
            LaminationType::None => "none",
            LaminationType::SameBoard => "same-board",
            LaminationType::WithBacker => "with-backer",
            LaminationType::Custom => "custom",
        }
    }
}

impl std::fmt::Display for LaminationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grain orientation constraint for a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grain {
    /// Part may be rotated freely.
    Any,
    /// Grain runs along the part length.
    #[default]
    Length,
    /// Grain runs along the part width.
    Width,
}

/// Which edges of a part receive edge banding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BandEdges {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

/// One cuttable piece as stored inside a group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CutlistPart {
    pub id: String,
    pub name: String,
    pub length_mm: f64,
    pub width_mm: f64,
    pub quantity: u32,
    pub grain: Grain,
    pub band_edges: BandEdges,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lamination_type: Option<LaminationType>,
    /// Layer setup for `custom` lamination; opaque to this crate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lamination_config: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edging_material_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lamination_group: Option<String>,
}

impl CutlistPart {
    /// Create a new part with the given dimensions.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        length_mm: f64,
        width_mm: f64,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            length_mm,
            width_mm,
            quantity,
            ..Default::default()
        }
    }
}

/// A part in the flat editing list.
///
/// Same as [`CutlistPart`] except that `lamination_type` is always resolved.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactPart {
    pub id: String,
    pub name: String,
    pub length_mm: f64,
    pub width_mm: f64,
    pub quantity: u32,
    pub grain: Grain,
    pub band_edges: BandEdges,
    pub lamination_type: LaminationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lamination_config: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edging_material_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lamination_group: Option<String>,
}

impl CompactPart {
    /// Build an editable part from a stored part and its resolved fields.
    pub fn from_part(
        part: &CutlistPart,
        lamination_type: LaminationType,
        material_id: Option<String>,
    ) -> Self {
        Self {
            id: part.id.clone(),
            name: part.name.clone(),
            length_mm: part.length_mm,
            width_mm: part.width_mm,
            quantity: part.quantity,
            grain: part.grain,
            band_edges: part.band_edges,
            lamination_type,
            lamination_config: part.lamination_config.clone(),
            material_id,
            material_label: part.material_label.clone(),
            edging_material_id: part.edging_material_id.clone(),
            lamination_group: part.lamination_group.clone(),
        }
    }

    /// Material id used as a grouping key (empty when unset).
    pub fn material_key(&self) -> &str {
        self.material_id.as_deref().unwrap_or("")
    }

    /// Convert back to a stored part inside a group of the given lamination and material.
    ///
    /// Values the group already supplies are dropped so that the part inherits
    /// them again. `custom` lamination has no board type of its own and is kept.
    pub fn into_group_part(
        self,
        group_lamination: LaminationType,
        group_material_id: Option<&str>,
    ) -> CutlistPart {
        let lamination_type = Some(self.lamination_type).filter(|l| *l != group_lamination);
        let material_id = self
            .material_id
            .filter(|id| Some(id.as_str()) != group_material_id);

        CutlistPart {
            id: self.id,
            name: self.name,
            length_mm: self.length_mm,
            width_mm: self.width_mm,
            quantity: self.quantity,
            grain: self.grain,
            band_edges: self.band_edges,
            lamination_type,
            lamination_config: self.lamination_config,
            material_id,
            material_label: self.material_label,
            edging_material_id: self.edging_material_id,
            lamination_group: self.lamination_group,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lamination_wire_names() {
        let json = serde_json::to_string(&LaminationType::WithBacker).unwrap();
        assert_eq!(json, "\"with-backer\"");
        let parsed: LaminationType = serde_json::from_str("\"same-board\"").unwrap();
        assert_eq!(parsed, LaminationType::SameBoard);
    }

    #[test]
    fn test_lamination_to_board_type() {
        assert_eq!(LaminationType::None.board_type(), BoardType::Panels16);
        assert_eq!(
            LaminationType::SameBoard.board_type(),
            BoardType::Laminated32Both
        );
        assert_eq!(
            LaminationType::WithBacker.board_type(),
            BoardType::Laminated32Backer
        );
        assert_eq!(LaminationType::Custom.board_type(), BoardType::Panels16);
    }

    #[test]
    fn test_part_deserializes_with_missing_fields() {
        let part: CutlistPart =
            serde_json::from_str(r#"{"id":"p1","name":"Shelf","length_mm":600,"width_mm":300,"quantity":2}"#)
                .unwrap();
        assert_eq!(part.grain, Grain::Length);
        assert_eq!(part.band_edges, BandEdges::default());
        assert_eq!(part.lamination_type, None);
    }

    #[test]
    fn test_into_group_part_drops_inherited_values() {
        let source = CutlistPart::new("p1", "Side", 720.0, 560.0, 2);
        let compact = CompactPart::from_part(&source, LaminationType::SameBoard, Some("7".into()));
        let part = compact.into_group_part(LaminationType::SameBoard, Some("7"));
        assert_eq!(part, source);
    }

    #[test]
    fn test_into_group_part_keeps_values_the_group_lacks() {
        let source = CutlistPart::new("p1", "Side", 720.0, 560.0, 2);
        let compact = CompactPart::from_part(&source, LaminationType::Custom, Some("7".into()));
        let part = compact.into_group_part(LaminationType::None, None);
        assert_eq!(part.lamination_type, Some(LaminationType::Custom));
        assert_eq!(part.material_id.as_deref(), Some("7"));
    }
}
