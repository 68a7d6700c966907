//! Deterministic part-family color assignment.

use lexical_sort::lexical_cmp;
use std::collections::{BTreeMap, BTreeSet};

use super::palette::{ColorEntry, PALETTE};
use crate::config::INSTANCE_SEPARATOR;
use crate::model::Placement;

/// Colors keyed by base part name.
pub type ColorMap = BTreeMap<String, ColorEntry>;

/// Strip a trailing `#<digits>` instance suffix from a part id.
///
/// Ids without `#`, or whose suffix is not purely numeric, are returned unchanged.
pub fn base_part_name(part_id: &str) -> &str {
    match part_id.rsplit_once(INSTANCE_SEPARATOR) {
        Some((base, suffix)) if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) => {
            base
        }
        _ => part_id,
    }
}

/// Assign a palette entry to every distinct base name in `placements`.
///
/// Names are sorted case-insensitively and colored round-robin by sorted index,
/// so the result depends only on the set of names present.
pub fn build_color_map(placements: &[Placement]) -> ColorMap {
    let names: BTreeSet<&str> = placements
        .iter()
        .map(|p| base_part_name(&p.part_id))
        .collect();

    let mut sorted: Vec<&str> = names.into_iter().collect();
    sorted.sort_by(|a, b| lexical_cmp(a, b));

    sorted
        .into_iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), PALETTE[index % PALETTE.len()]))
        .collect()
}

/// Color for a placement id, falling back to the first palette entry.
pub fn color_for(map: &ColorMap, part_id: &str) -> ColorEntry {
    map.get(base_part_name(part_id))
        .copied()
        .unwrap_or(PALETTE[0])
}
