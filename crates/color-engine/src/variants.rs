//! Role variant generation
//!
//! Given an anchor (family, step) into an existing ramp, derive the alias
//! references for the brand color roles by offsetting along the step lattice.
//! Offsets are expressed in step-name units even though the rungs are not
//! evenly spaced; the result is clamped into the lattice range and snapped to
//! the nearest rung. This module never touches color values.

use serde::{Deserialize, Serialize};

use token_model::{Reference, StepLattice};

/// Role offset table: (role name, offset in step-name units).
type OffsetTable = &'static [(&'static str, i32)];

const PRIMARY_OFFSETS: OffsetTable = &[
    ("main", 0),
    ("soft", -75),
    ("light", -50),
    ("dark", 330),
    ("faded", -40),
];

const SECONDARY_OFFSETS: OffsetTable = &[
    ("main", 0),
    ("soft", -70),
    ("light", -50),
    ("dark", 300),
];

const ACCENT_OFFSETS: OffsetTable = &[
    ("main", 0),
    ("soft", -60),
    ("light", -30),
    ("dark", 250),
];

/// An anchor into an existing color family ramp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSelection {
    /// Color family name, e.g. `teal`
    pub family: String,
    /// Anchor lattice step, e.g. `70`
    pub step: u16,
}

impl ColorSelection {
    /// Create a selection.
    pub fn new(family: impl Into<String>, step: u16) -> Self {
        Self { family: family.into(), step }
    }
}

/// The derived references for one role, keyed by sub-variant name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleVariants {
    /// (sub-variant name, alias reference) pairs in table order
    pub entries: Vec<(String, String)>,
}

impl RoleVariants {
    /// The alias for a sub-variant name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(variant, _)| variant == name)
            .map(|(_, alias)| alias.as_str())
    }
}

/// All generated brand color references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedBrandColors {
    /// Primary role: main, soft, light, dark, faded
    pub primary: RoleVariants,
    /// Secondary role: main, soft, light, dark
    pub secondary: RoleVariants,
    /// Accent role: main, soft, light, dark
    pub accent: RoleVariants,
}

/// Offset an anchor step and land on the lattice: clamp the target into
/// range, then snap to the nearest rung (ties favor the smaller rung).
pub fn resolve_variant_step(anchor: u16, offset: i32) -> u16 {
    StepLattice::clamp_and_snap(i32::from(anchor) + offset)
}

fn generate_role(selection: &ColorSelection, offsets: OffsetTable) -> RoleVariants {
    let entries = offsets
        .iter()
        .map(|&(role, offset)| {
            let step = resolve_variant_step(selection.step, offset);
            (role.to_string(), Reference::color_step(&selection.family, step).to_string())
        })
        .collect();
    RoleVariants { entries }
}

/// Generate the five primary variants.
pub fn generate_primary_variants(selection: &ColorSelection) -> RoleVariants {
    generate_role(selection, PRIMARY_OFFSETS)
}

/// Generate the four secondary variants.
pub fn generate_secondary_variants(selection: &ColorSelection) -> RoleVariants {
    generate_role(selection, SECONDARY_OFFSETS)
}

/// Generate the four accent variants.
pub fn generate_accent_variants(selection: &ColorSelection) -> RoleVariants {
    generate_role(selection, ACCENT_OFFSETS)
}

/// Generate all brand color references from the three role anchors.
pub fn generate_brand_colors(
    primary: &ColorSelection,
    secondary: &ColorSelection,
    accent: &ColorSelection,
) -> GeneratedBrandColors {
    GeneratedBrandColors {
        primary: generate_primary_variants(primary),
        secondary: generate_secondary_variants(secondary),
        accent: generate_accent_variants(accent),
    }
}
