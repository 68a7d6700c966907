//! Conversion between persisted board groups and the flat editing list.
//!
//! Flattening resolves each part's lamination and material from its enclosing
//! group. Regrouping buckets parts by `(lamination_type, material_id)` in
//! first-seen order. The key ignores backer material and custom group names, so
//! two source groups sharing a key merge into one on save.

use crate::model::{ApiCutlistGroup, CompactPart, DatabaseCutlistGroup, LaminationType};

/// Flatten persisted groups into editable parts, in group then part order.
pub fn flatten(groups: &[DatabaseCutlistGroup]) -> Vec<CompactPart> {
    let parts: Vec<CompactPart> = groups.iter().flat_map(flatten_group).collect();
    tracing::debug!("Flattened {} group(s) into {} part(s)", groups.len(), parts.len());
    parts
}

/// Flatten a single group.
pub fn flatten_group(group: &DatabaseCutlistGroup) -> Vec<CompactPart> {
    let group_lamination = group
        .board_type
        .map(|b| b.lamination_type())
        .unwrap_or_default();
    let group_material = group.primary_material_id.map(|id| id.to_string());

    group
        .parts
        .iter()
        .map(|part| {
            let lamination_type = part.lamination_type.unwrap_or(group_lamination);
            let material_id = part
                .material_id
                .clone()
                .or_else(|| group_material.clone());
            CompactPart::from_part(part, lamination_type, material_id)
        })
        .collect()
}

/// Bucket of parts sharing a grouping key.
struct Bucket {
    lamination_type: LaminationType,
    material_key: String,
    parts: Vec<CompactPart>,
}

/// Regroup editable parts into the save-endpoint shape.
pub fn regroup(parts: &[CompactPart]) -> Vec<ApiCutlistGroup> {
    let mut buckets: Vec<Bucket> = Vec::new();

    for part in parts {
        let key = part.material_key();
        match buckets
            .iter_mut()
            .find(|b| b.lamination_type == part.lamination_type && b.material_key == key)
        {
            Some(bucket) => bucket.parts.push(part.clone()),
            None => buckets.push(Bucket {
                lamination_type: part.lamination_type,
                material_key: key.to_string(),
                parts: vec![part.clone()],
            }),
        }
    }

    let groups: Vec<ApiCutlistGroup> = buckets
        .into_iter()
        .enumerate()
        .map(|(index, bucket)| build_group(index, bucket))
        .collect();
    tracing::debug!("Regrouped {} part(s) into {} group(s)", parts.len(), groups.len());
    groups
}

fn build_group(index: usize, bucket: Bucket) -> ApiCutlistGroup {
    let board_type = bucket.lamination_type.board_type();
    let primary_material_name = bucket
        .parts
        .iter()
        .find_map(|p| p.material_label.clone());
    let primary_material_id = if bucket.material_key.is_empty() {
        None
    } else {
        Some(bucket.material_key)
    };
    let group_lamination = board_type.lamination_type();
    let parts = bucket
        .parts
        .into_iter()
        .map(|p| p.into_group_part(group_lamination, primary_material_id.as_deref()))
        .collect();

    ApiCutlistGroup {
        name: board_type.display_name().to_string(),
        board_type,
        primary_material_id,
        primary_material_name,
        backer_material_id: None,
        backer_material_name: None,
        parts,
        sort_order: i32::try_from(index).unwrap_or(i32::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoardType, CutlistPart};
    use pretty_assertions::assert_eq;

    fn part(id: &str) -> CutlistPart {
        CutlistPart::new(id, id, 600.0, 300.0, 1)
    }

    fn group(board_type: Option<BoardType>, material: Option<i64>, parts: Vec<CutlistPart>) -> DatabaseCutlistGroup {
        DatabaseCutlistGroup {
            name: "Group".to_string(),
            board_type,
            primary_material_id: material,
            parts,
            ..Default::default()
        }
    }

    fn compact(id: &str, lamination_type: LaminationType, material: Option<&str>) -> CompactPart {
        CompactPart::from_part(&part(id), lamination_type, material.map(str::to_string))
    }

    // ==================== flatten tests ====================

    #[test]
    fn test_flatten_empty() {
        assert!(flatten(&[]).is_empty());
    }

    #[test]
    fn test_flatten_resolves_from_group() {
        let groups = vec![group(
            Some(BoardType::Laminated32Both),
            Some(42),
            vec![part("a"), part("b")],
        )];
        let parts = flatten(&groups);
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|p| p.lamination_type == LaminationType::SameBoard));
        assert!(parts.iter().all(|p| p.material_id.as_deref() == Some("42")));
    }

    #[test]
    fn test_flatten_part_values_take_precedence() {
        let mut own = part("a");
        own.lamination_type = Some(LaminationType::Custom);
        own.material_id = Some("m-9".to_string());
        let groups = vec![group(Some(BoardType::Laminated32Backer), Some(5), vec![own])];

        let parts = flatten(&groups);

        assert_eq!(parts[0].lamination_type, LaminationType::Custom);
        assert_eq!(parts[0].material_id.as_deref(), Some("m-9"));
    }

    #[test]
    fn test_flatten_defaults_without_board_type_or_material() {
        let groups = vec![group(None, None, vec![part("a")])];
        let parts = flatten(&groups);
        assert_eq!(parts[0].lamination_type, LaminationType::None);
        assert_eq!(parts[0].material_id, None);
    }

    #[test]
    fn test_flatten_keeps_group_then_part_order() {
        let groups = vec![
            group(Some(BoardType::Panels16), None, vec![part("a"), part("b")]),
            group(Some(BoardType::Laminated32Both), None, vec![part("c")]),
        ];
        let ids: Vec<_> = flatten(&groups).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_flatten_backer_groups_with_distinct_materials() {
        let groups = vec![
            group(Some(BoardType::Laminated32Backer), Some(10), vec![part("a")]),
            group(Some(BoardType::Laminated32Backer), Some(20), vec![part("b")]),
        ];
        let parts = flatten(&groups);
        assert_eq!(parts[0].lamination_type, LaminationType::WithBacker);
        assert_eq!(parts[0].material_id.as_deref(), Some("10"));
        assert_eq!(parts[1].lamination_type, LaminationType::WithBacker);
        assert_eq!(parts[1].material_id.as_deref(), Some("20"));

        let regrouped = regroup(&parts);
        assert_eq!(regrouped.len(), 2);
        assert_eq!(regrouped[0].primary_material_id.as_deref(), Some("10"));
        assert_eq!(regrouped[1].primary_material_id.as_deref(), Some("20"));
    }

    // ==================== regroup tests ====================

    #[test]
    fn test_regroup_empty() {
        assert!(regroup(&[]).is_empty());
    }

    #[test]
    fn test_regroup_buckets_in_first_seen_order() {
        let parts = vec![
            compact("a", LaminationType::SameBoard, Some("1")),
            compact("b", LaminationType::None, None),
            compact("c", LaminationType::SameBoard, Some("1")),
            compact("d", LaminationType::None, Some("2")),
        ];

        let groups = regroup(&parts);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].name, "Laminated (32mm)");
        assert_eq!(groups[0].board_type, BoardType::Laminated32Both);
        assert_eq!(groups[0].sort_order, 0);
        assert_eq!(groups[0].parts.len(), 2);
        assert_eq!(groups[1].name, "Panels (16mm)");
        assert_eq!(groups[1].primary_material_id, None);
        assert_eq!(groups[1].sort_order, 1);
        assert_eq!(groups[2].primary_material_id.as_deref(), Some("2"));
        assert_eq!(groups[2].sort_order, 2);
    }

    #[test]
    fn test_regroup_custom_collapses_to_16mm() {
        let parts = vec![
            compact("a", LaminationType::Custom, None),
            compact("b", LaminationType::None, None),
        ];
        let groups = regroup(&parts);
        // different lamination keeps separate buckets even on the same board type
        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.board_type == BoardType::Panels16));
        assert_eq!(groups[0].parts[0].lamination_type, Some(LaminationType::Custom));
    }

    #[test]
    fn test_regroup_backer_name() {
        let groups = regroup(&[compact("a", LaminationType::WithBacker, Some("3"))]);
        assert_eq!(groups[0].name, "Laminated w/ Backer (32mm)");
        assert_eq!(groups[0].board_type, BoardType::Laminated32Backer);
        assert_eq!(groups[0].backer_material_id, None);
    }

    #[test]
    fn test_regroup_uses_material_label_as_group_material_name() {
        let mut labelled = compact("a", LaminationType::None, Some("3"));
        labelled.material_label = Some("White Melamine".to_string());
        let groups = regroup(&[compact("b", LaminationType::None, Some("3")), labelled]);
        assert_eq!(groups[0].primary_material_name.as_deref(), Some("White Melamine"));
    }

    // ==================== round-trip tests ====================

    fn sorted_ids(parts: &[CutlistPart]) -> Vec<String> {
        let mut ids: Vec<_> = parts.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids
    }

    fn sorted_parts(groups: impl IntoIterator<Item = Vec<CutlistPart>>) -> Vec<CutlistPart> {
        let mut parts: Vec<_> = groups.into_iter().flatten().collect();
        parts.sort_by(|a, b| a.id.cmp(&b.id));
        parts
    }

    #[test]
    fn test_round_trip_preserves_parts_with_distinct_keys() {
        let mut custom = part("c");
        custom.lamination_type = Some(LaminationType::Custom);
        custom.lamination_config = Some(serde_json::json!({"layers": 3}));
        let mut labelled = part("d");
        labelled.material_label = Some("Oak".to_string());
        let groups = vec![
            group(Some(BoardType::Panels16), Some(12), vec![part("a"), part("b")]),
            group(Some(BoardType::Panels16), None, vec![custom]),
            group(Some(BoardType::Laminated32Both), Some(7), vec![labelled]),
            group(Some(BoardType::Laminated32Backer), None, vec![part("e")]),
        ];

        let regrouped = regroup(&flatten(&groups));

        assert_eq!(regrouped.len(), 4);
        assert_eq!(
            sorted_parts(regrouped.into_iter().map(|g| g.parts)),
            sorted_parts(groups.into_iter().map(|g| g.parts))
        );
    }

    #[test]
    fn test_round_trip_drops_values_matching_the_group() {
        let mut explicit = part("a");
        explicit.lamination_type = Some(LaminationType::SameBoard);
        explicit.material_id = Some("7".to_string());
        let groups = vec![group(Some(BoardType::Laminated32Both), Some(7), vec![explicit])];

        let regrouped = regroup(&flatten(&groups));

        assert_eq!(regrouped[0].parts, vec![part("a")]);
        assert_eq!(regrouped[0].primary_material_id.as_deref(), Some("7"));
    }

    #[test]
    fn test_round_trip_merges_groups_sharing_a_key() {
        let mut first = group(Some(BoardType::Laminated32Backer), Some(10), vec![part("a")]);
        first.backer_material_id = Some(100);
        first.name = "Doors".to_string();
        let mut second = group(Some(BoardType::Laminated32Backer), Some(10), vec![part("b")]);
        second.backer_material_id = Some(200);
        second.name = "Drawer fronts".to_string();

        let regrouped = regroup(&flatten(&[first, second]));

        assert_eq!(regrouped.len(), 1);
        assert_eq!(regrouped[0].name, "Laminated w/ Backer (32mm)");
        assert_eq!(regrouped[0].backer_material_id, None);
        assert_eq!(sorted_ids(&regrouped[0].parts), ["a", "b"]);
    }
}
