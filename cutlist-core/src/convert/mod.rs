//! Group/flat conversion for the cutlist editor.

mod groups;

pub use groups::{flatten, flatten_group, regroup};
