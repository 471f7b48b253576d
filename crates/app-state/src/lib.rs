//! Shared editor state for Orbit Theme Studio
//!
//! The workspace owns the current token document behind a lock, applies the
//! pure mutations from `token-core`, and keeps the sled store in sync. Every
//! mutation swaps in a fresh snapshot, so readers observe change through
//! pointer identity alone.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod workspace;

pub use workspace::{Result, ThemeWorkspace, WorkspaceError};
