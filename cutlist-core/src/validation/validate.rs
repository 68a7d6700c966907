//! Validation of cutlist parts and groups.
//!
//! Reports problems without rejecting input; conversion accepts anything.

use std::collections::HashSet;

use crate::model::{CompactPart, CutlistPart, DatabaseCutlistGroup, LaminationType};

/// Problems found in a cutlist.
///
/// Errors mark parts the optimizer cannot cut; warnings are informational.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// No errors were recorded.
    pub passed: bool,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Record an uncuttable part; fails the result.
    fn reject(&mut self, message: String) {
        self.errors.push(message);
        self.passed = false;
    }
}

/// Fields shared by stored and editable parts that validation looks at.
struct PartView<'a> {
    id: &'a str,
    name: &'a str,
    length_mm: f64,
    width_mm: f64,
    quantity: u32,
    lamination_type: Option<LaminationType>,
    has_config: bool,
}

impl<'a> From<&'a CutlistPart> for PartView<'a> {
    fn from(p: &'a CutlistPart) -> Self {
        Self {
            id: &p.id,
            name: &p.name,
            length_mm: p.length_mm,
            width_mm: p.width_mm,
            quantity: p.quantity,
            lamination_type: p.lamination_type,
            has_config: p.lamination_config.is_some(),
        }
    }
}

impl<'a> From<&'a CompactPart> for PartView<'a> {
    fn from(p: &'a CompactPart) -> Self {
        Self {
            id: &p.id,
            name: &p.name,
            length_mm: p.length_mm,
            width_mm: p.width_mm,
            quantity: p.quantity,
            lamination_type: Some(p.lamination_type),
            has_config: p.lamination_config.is_some(),
        }
    }
}

/// Validate a flat list of editable parts.
pub fn validate_parts(parts: &[CompactPart]) -> ValidationResult {
    validate_views(parts.iter().map(PartView::from), "")
}

/// Validate persisted groups, part ids must be unique across all groups.
pub fn validate_groups(groups: &[DatabaseCutlistGroup]) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let mut seen = HashSet::new();

    for (idx, group) in groups.iter().enumerate() {
        let label = format!("Group {} ({}), ", idx + 1, group.name);
        if group.board_type.is_none() {
            result.warn(format!(
                "Group {} ({}): Unknown board type, parts default to no lamination",
                idx + 1,
                group.name
            ));
        }
        for part in &group.parts {
            check_part(&PartView::from(part), &label, &mut seen, &mut result);
        }
    }

    result
}

fn validate_views<'a>(parts: impl Iterator<Item = PartView<'a>>, label: &str) -> ValidationResult {
    let mut result = ValidationResult::ok();
    let mut seen = HashSet::new();
    for part in parts {
        check_part(&part, label, &mut seen, &mut result);
    }
    result
}

fn check_part<'a>(
    part: &PartView<'a>,
    label: &str,
    seen: &mut HashSet<&'a str>,
    result: &mut ValidationResult,
) {
    if part.length_mm <= 0.0 || part.width_mm <= 0.0 {
        result.reject(format!(
            "{}Part {}: Invalid dimensions ({}x{})",
            label, part.id, part.length_mm, part.width_mm
        ));
    }

    if part.quantity == 0 {
        result.reject(format!("{}Part {}: Quantity must be positive", label, part.id));
    }

    if part.name.trim().is_empty() {
        result.warn(format!("{}Part {}: Missing name", label, part.id));
    }

    if !seen.insert(part.id) {
        result.warn(format!("{}Part {}: Duplicate id", label, part.id));
    }

    if part.lamination_type == Some(LaminationType::Custom) && !part.has_config {
        result.warn(format!(
            "{}Part {}: Custom lamination without a layer configuration",
            label, part.id
        ));
    }
}
