//! Stable colors for part families on packed sheets.

mod assign;
mod palette;

pub use assign::{base_part_name, build_color_map, color_for, ColorMap};
pub use palette::{ColorEntry, PALETTE, WASTE_COLOR};
