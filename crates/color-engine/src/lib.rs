//! Color derivation engine for Orbit Theme Studio
//!
//! This crate provides the perceptual color math (hex to OKLCH and back), the 16-step
//! palette ramp generator, and the role-variant generator that derives brand
//! color references by offsetting along the step lattice.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod oklch;
pub mod palette;
pub mod variants;

pub use oklch::{hex_to_oklch, oklch_to_hex, ColorError, Oklch};
pub use palette::{
    generate_palette, palette_to_tokens, validate_family_name, Easing, PaletteConfig, PaletteStep,
};
pub use variants::{
    generate_brand_colors, resolve_variant_step, ColorSelection, GeneratedBrandColors,
    RoleVariants,
};
