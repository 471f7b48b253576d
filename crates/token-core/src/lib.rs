//! Core token operations for Orbit Theme Studio
//!
//! This crate contains the alias resolver, autocomplete alias enumeration,
//! the per-brand flattened table view, the pure document mutations, and the
//! JSON export/import pipeline.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aliases;
pub mod editor;
pub mod export;
pub mod flatten;
pub mod resolver;

pub use aliases::AliasSuggestion;
pub use editor::{ColorFamily, EditError, RadiusSize};
pub use export::{
    export_tokens, merge_brand_import, ExportError, ExportFile, ExportFormat, ExportOptions,
    ExportResult, ImportError, ImportOutcome,
};
pub use flatten::{FlattenedToken, TokenCategory};
pub use resolver::{resolve, resolve_with_depth, DEFAULT_MAX_DEPTH};
