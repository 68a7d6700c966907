//! Placement of a part instance on a stock sheet, as produced by the packer.

use serde::{Deserialize, Serialize};

/// A positioned instance of a part on a stock sheet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    /// Part id, optionally suffixed with `#<n>` for repeated copies.
    pub part_id: String,
    /// X origin on the sheet.
    pub x: f64,
    /// Y origin on the sheet.
    pub y: f64,
    /// Placed width.
    pub w: f64,
    /// Placed height.
    pub h: f64,
    /// Rotation in degrees (0 or 90).
    pub rot: u16,
}

impl Placement {
    /// Create a new unrotated placement.
    pub fn new(part_id: impl Into<String>, x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            part_id: part_id.into(),
            x,
            y,
            w,
            h,
            rot: 0,
        }
    }
}
