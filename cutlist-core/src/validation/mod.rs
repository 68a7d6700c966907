//! Non-fatal checks over cutlist parts and groups.

mod validate;

pub use validate::{validate_groups, validate_parts, ValidationResult};
