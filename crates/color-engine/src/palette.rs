//! 16-step palette ramp generation
//!
//! A ramp is derived from a single base color: its hue and chroma are kept,
//! its lightness is discarded in favor of a fixed per-step lightness table
//! calibrated so that step 70 approximates the visual role of a typical
//! input base color. Generation is fully deterministic.

use serde::{Deserialize, Serialize};

use token_model::lattice::STEPS;
use token_model::{SingleToken, TokenGroup, TokenNode, TokenType};

use crate::oklch::{hex_to_oklch, oklch_to_hex, Oklch, Result};

/// Target lightness for each lattice step, light end first.
///
/// Calibrated against the existing orbit-tokens.json color families.
const STEP_LIGHTNESS: [f64; 16] = [
    95.0, // 5
    92.0, // 10
    88.0, // 20
    80.0, // 30
    70.0, // 40
    60.0, // 50
    52.0, // 60
    45.0, // 70
    40.0, // 80
    36.0, // 90
    32.0, // 100
    28.0, // 200
    24.0, // 300
    20.0, // 400
    16.0, // 500
    13.0, // 600
];

/// Easing applied to the hue shift across the ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Identity
    #[default]
    Linear,
    /// t * t
    EaseIn,
    /// 1 - (1 - t)^2
    EaseOut,
    /// Symmetric quadratic blend
    EaseInOut,
}

impl Easing {
    fn apply(self, t: f64) -> f64 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Shaping configuration for palette generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Base color hex, `#RRGGBB`
    pub base_color: String,
    /// New family name (used when the palette is committed)
    pub family_name: String,
    /// Hue shift across the ramp in degrees, -30..30
    pub hue_shift: f64,
    /// Easing applied to the hue shift
    pub easing: Easing,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            base_color: "#0072ef".to_string(),
            family_name: String::new(),
            hue_shift: 0.0,
            easing: Easing::Linear,
        }
    }
}

/// One generated ramp entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteStep {
    /// Lattice step name, `"5"` through `"600"`
    pub name: String,
    /// Target lightness used for this step
    pub lightness: f64,
    /// Generated color
    pub hex: String,
}

/// Hue for one step: the shift ramps from -shift/2 at the light end to
/// +shift/2 at the dark end, through the configured easing.
fn step_hue(base_hue: f64, shift: f64, index: usize, total: usize, easing: Easing) -> f64 {
    let t = index as f64 / (total - 1) as f64;
    let eased = easing.apply(t);
    (base_hue + shift * (eased - 0.5)).rem_euclid(360.0)
}

/// Chroma for one step: suppressed toward both lightness extremes, peaking
/// at mid lightness, never below 30% of the base chroma.
fn step_chroma(base_chroma: f64, lightness: f64) -> f64 {
    let ln = lightness / 100.0;
    base_chroma * (4.0 * ln * (1.0 - ln)).max(0.3)
}

/// Generate the full 16-step ramp for a base color.
///
/// Fails only if the base color is not a valid `#RRGGBB` string.
pub fn generate_palette(config: &PaletteConfig) -> Result<Vec<PaletteStep>> {
    let base = hex_to_oklch(&config.base_color)?;
    let mut steps = Vec::with_capacity(STEPS.len());

    for (index, step) in STEPS.iter().enumerate() {
        let lightness = STEP_LIGHTNESS[index];
        let hue = step_hue(base.h, config.hue_shift, index, STEPS.len(), config.easing);
        let chroma = step_chroma(base.c, lightness);

        steps.push(PaletteStep {
            name: step.to_string(),
            lightness,
            hex: oklch_to_hex(Oklch { l: lightness, c: chroma, h: hue }),
        });
    }

    Ok(steps)
}

/// Convert generated steps into storable single-value color tokens, in
/// lattice order, ready to commit under `global.colors.<family>`.
pub fn palette_to_tokens(steps: &[PaletteStep]) -> TokenGroup {
    let mut tokens = TokenGroup::with_capacity(steps.len());
    for step in steps {
        tokens.insert(
            step.name.clone(),
            TokenNode::Single(SingleToken::new(step.hex.clone(), TokenType::Color)),
        );
    }
    tokens
}

/// Validate a new color family name against the naming rules and the
/// existing families. Returns a human-readable violation, or `None` when the
/// name is acceptable.
pub fn validate_family_name(name: &str, existing: &[String]) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Some("Name is required".to_string());
    }

    let mut bytes = name.bytes();
    let starts_with_letter = bytes.next().is_some_and(|b| b.is_ascii_alphabetic());
    if !starts_with_letter || !name.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Some(
            "Name must start with a letter and contain only letters and numbers".to_string(),
        );
    }

    let lowered = name.to_lowercase();
    if existing.iter().any(|family| family.to_lowercase() == lowered) {
        return Some("A color family with this name already exists".to_string());
    }

    if lowered == "neutral" {
        return Some("Cannot use \"neutral\" as a family name".to_string());
    }

    None
}
