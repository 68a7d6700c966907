//! Color palette for rendering packed sheets.
//!
//! Parts are drawn with a translucent fill, a saturated stroke and a dark text
//! color from the same hue. Waste is muted red and never handed out to a part.

use serde::Serialize;

use crate::config::PALETTE_SIZE;

/// Fill, stroke and label colors for one part family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorEntry {
    pub fill: &'static str,
    pub stroke: &'static str,
    pub text: &'static str,
}

impl ColorEntry {
    const fn new(fill: &'static str, stroke: &'static str, text: &'static str) -> Self {
        Self { fill, stroke, text }
    }
}

// =============================================================================
// PART FAMILIES - assigned round-robin in sorted name order
// =============================================================================
pub const PALETTE: [ColorEntry; PALETTE_SIZE] = [
    ColorEntry::new("#dbeafe", "#2563eb", "#1e3a8a"), // blue
    ColorEntry::new("#dcfce7", "#16a34a", "#14532d"), // green
    ColorEntry::new("#fef3c7", "#d97706", "#78350f"), // amber
    ColorEntry::new("#fce7f3", "#db2777", "#831843"), // pink
    ColorEntry::new("#ede9fe", "#7c3aed", "#4c1d95"), // violet
    ColorEntry::new("#cffafe", "#0891b2", "#164e63"), // cyan
    ColorEntry::new("#ffedd5", "#ea580c", "#7c2d12"), // orange
    ColorEntry::new("#e0e7ff", "#4f46e5", "#312e81"), // indigo
    ColorEntry::new("#ecfccb", "#65a30d", "#365314"), // lime
    ColorEntry::new("#fae8ff", "#c026d3", "#701a75"), // fuchsia
    ColorEntry::new("#ccfbf1", "#0d9488", "#134e4a"), // teal
    ColorEntry::new("#f1f5f9", "#475569", "#0f172a"), // slate
];

// =============================================================================
// WASTE REGIONS - reserved, outside the round-robin
// =============================================================================
pub const WASTE_COLOR: ColorEntry = ColorEntry::new("#fee2e2", "#f87171", "#991b1b");

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_palette_entries_are_distinct() {
        let unique: HashSet<_> = PALETTE.iter().collect();
        assert_eq!(unique.len(), PALETTE_SIZE);
    }

    #[test]
    fn test_waste_not_in_palette() {
        assert!(!PALETTE.contains(&WASTE_COLOR));
    }
}
