//! Orbit Theme Studio
//!
//! A multi-brand design token editor backend: a two-tier token document
//! with per-brand values and `{dot.path}` aliases, OKLCH palette ramps,
//! brand variant generation, JSON export/import, and sled persistence.
//!
//! This crate is a facade; the functionality lives in the workspace members
//! and is re-exported here for embedding into a UI shell.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use app_state::{ThemeWorkspace, WorkspaceError};
pub use color_engine::{
    generate_brand_colors, generate_palette, hex_to_oklch, oklch_to_hex, ColorSelection, Easing,
    GeneratedBrandColors, Oklch, PaletteConfig, PaletteStep,
};
pub use storage::{BrandRecord, StoreConfig, TokenStore};
pub use token_core::{
    export_tokens, merge_brand_import, resolve, AliasSuggestion, EditError, ExportFormat,
    ExportOptions, ExportResult, FlattenedToken, RadiusSize,
};
pub use token_model::{Reference, StepLattice, TokenDocument, TokenNode, TokenType};
