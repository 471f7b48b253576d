//! The theme workspace
//!
//! A `ThemeWorkspace` is the single mutable surface the UI talks to. The
//! document lives behind a `parking_lot::RwLock` as an `Arc` snapshot;
//! reads clone the `Arc`, mutations build a new document through the pure
//! operations in `token-core` and swap it in. Edits mark the workspace
//! dirty; `save` persists the document and reconciles the brand registry.

use std::sync::Arc;

use parking_lot::RwLock;

use color_engine::{ColorSelection, PaletteConfig};
use storage::{StoreError, TokenStore};
use token_core::{
    aliases, editor, export, flatten, resolver, AliasSuggestion, ColorFamily, EditError,
    ExportError, ExportOptions, ExportResult, FlattenedToken, ImportError, RadiusSize,
};
use token_model::{DocumentError, TokenDocument, TokenType};

/// Workspace errors
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    /// Persistence error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The document could not be parsed
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// A mutation was rejected
    #[error("Edit error: {0}")]
    Edit(#[from] EditError),

    /// Export failed
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Import failed
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// No document has been loaded yet
    #[error("No document loaded")]
    NotLoaded,

    /// The named brand does not exist in the document
    #[error("Unknown brand: {0}")]
    UnknownBrand(String),
}

/// Result type for workspace operations
pub type Result<T> = std::result::Result<T, WorkspaceError>;

#[derive(Default)]
struct WorkspaceState {
    document: Option<Arc<TokenDocument>>,
    selected_brand: Option<String>,
    dirty: bool,
}

/// Shared editor state over a persistent store
pub struct ThemeWorkspace {
    state: RwLock<WorkspaceState>,
    store: TokenStore,
}

impl ThemeWorkspace {
    /// Create a workspace over a store. No document is loaded yet.
    pub fn new(store: TokenStore) -> Self {
        Self { state: RwLock::new(WorkspaceState::default()), store }
    }

    /// Load the stored document, falling back to the given seed JSON on
    /// first run. The first brand becomes the selection.
    pub fn initialize(&self, seed_json: &str) -> Result<()> {
        let document = match self.store.get_document()? {
            Some(document) => document,
            None => {
                let document = TokenDocument::parse_str(seed_json)?;
                self.store.set_document(&document)?;
                tracing::info!("seeded token store with default document");
                document
            }
        };
        self.store.replace_brands(&document.brand_names())?;

        let mut state = self.state.write();
        state.selected_brand = document.brand_names().into_iter().next();
        state.document = Some(Arc::new(document));
        state.dirty = false;
        Ok(())
    }

    /// Load a whole new document from JSON and persist it immediately,
    /// selecting its first brand.
    pub fn load_document(&self, json: &str) -> Result<()> {
        let document = TokenDocument::parse_str(json)?;
        self.store.set_document(&document)?;
        self.store.replace_brands(&document.brand_names())?;

        let mut state = self.state.write();
        state.selected_brand = document.brand_names().into_iter().next();
        state.document = Some(Arc::new(document));
        state.dirty = false;
        Ok(())
    }

    /// Replace the in-memory document from JSON without persisting, e.g. a
    /// raw-JSON view commit. The selection survives when its brand does.
    pub fn replace_from_json(&self, json: &str) -> Result<()> {
        let document = TokenDocument::parse_str(json)?;
        let brands = document.brand_names();
        self.store.replace_brands(&brands)?;
        let mut state = self.state.write();
        let keep = state
            .selected_brand
            .as_ref()
            .filter(|b| brands.iter().any(|n| n == *b))
            .cloned();
        state.selected_brand = keep.or_else(|| brands.into_iter().next());
        state.document = Some(Arc::new(document));
        state.dirty = true;
        Ok(())
    }

    /// The current document snapshot
    pub fn document(&self) -> Result<Arc<TokenDocument>> {
        self.state
            .read()
            .document
            .clone()
            .ok_or(WorkspaceError::NotLoaded)
    }

    /// Unsaved changes?
    pub fn is_dirty(&self) -> bool {
        self.state.read().dirty
    }

    /// The brand the UI is editing
    pub fn selected_brand(&self) -> Option<String> {
        self.state.read().selected_brand.clone()
    }

    /// Brand names in document order
    pub fn brands(&self) -> Result<Vec<String>> {
        Ok(self.document()?.brand_names())
    }

    /// Switch the editing selection to another brand
    pub fn select_brand(&self, name: &str) -> Result<()> {
        let document = self.document()?;
        if !document.brand_names().iter().any(|b| b == name) {
            return Err(WorkspaceError::UnknownBrand(name.to_string()));
        }
        self.state.write().selected_brand = Some(name.to_string());
        Ok(())
    }

    fn selected(&self) -> Result<String> {
        self.state
            .read()
            .selected_brand
            .clone()
            .ok_or(WorkspaceError::NotLoaded)
    }

    fn commit(&self, document: TokenDocument) {
        let mut state = self.state.write();
        state.document = Some(Arc::new(document));
        state.dirty = true;
    }

    /// Persist the current document and reconcile the brand registry
    pub fn save(&self) -> Result<()> {
        let document = self.document()?;
        self.store.set_document(&document)?;
        self.store.replace_brands(&document.brand_names())?;
        self.state.write().dirty = false;
        tracing::debug!("workspace saved");
        Ok(())
    }

    // Token edits

    /// Set one brand's value on a semantic token
    pub fn update_token(&self, path: &str, brand: &str, value: &str) -> Result<()> {
        let document = self.document()?;
        let next = editor::update_token(&document, path, brand, value)?;
        self.commit(next);
        Ok(())
    }

    /// Insert or overwrite a global token
    pub fn set_global_token(&self, path: &str, value: &str, token_type: TokenType) -> Result<()> {
        let document = self.document()?;
        let next = editor::set_global_token(&document, path, value, token_type)?;
        self.commit(next);
        Ok(())
    }

    /// Update an existing global token's value
    pub fn update_global_token(&self, path: &str, value: &str) -> Result<()> {
        let document = self.document()?;
        let next = editor::update_global_token(&document, path, value)?;
        self.commit(next);
        Ok(())
    }

    /// Remove a global token
    pub fn remove_global_token(&self, path: &str) -> Result<()> {
        let document = self.document()?;
        let next = editor::remove_global_token(&document, path)?;
        self.commit(next);
        Ok(())
    }

    // Brand management

    /// Add a brand cloned from a template brand (or the first brand).
    /// Brand membership changes are persisted immediately.
    pub fn add_brand(&self, name: &str, template: Option<&str>) -> Result<()> {
        let document = self.document()?;
        let next = editor::add_brand(&document, name, template)?;
        self.commit(next);
        self.state.write().selected_brand = Some(name.to_string());
        self.save()
    }

    /// Add a brand with generated role colors and an optional radius preset
    pub fn add_brand_with_colors(
        &self,
        name: &str,
        template: Option<&str>,
        primary: &ColorSelection,
        secondary: &ColorSelection,
        accent: &ColorSelection,
        radius: Option<RadiusSize>,
    ) -> Result<()> {
        let colors = color_engine::generate_brand_colors(primary, secondary, accent);
        let document = self.document()?;
        let next = editor::add_brand_with_colors(&document, name, template, &colors, radius)?;
        self.commit(next);
        self.state.write().selected_brand = Some(name.to_string());
        self.save()
    }

    /// Rename a brand, following the selection if it pointed at it
    pub fn rename_brand(&self, from: &str, to: &str) -> Result<()> {
        let document = self.document()?;
        let next = editor::rename_brand(&document, from, to)?;
        self.commit(next);
        {
            let mut state = self.state.write();
            if state.selected_brand.as_deref() == Some(from) {
                state.selected_brand = Some(to.to_string());
            }
        }
        self.save()
    }

    /// Delete a brand, moving the selection off it if needed
    pub fn delete_brand(&self, name: &str) -> Result<()> {
        let document = self.document()?;
        let next = editor::remove_brand(&document, name)?;
        let fallback = next.brand_names().into_iter().next();
        self.commit(next);
        {
            let mut state = self.state.write();
            if state.selected_brand.as_deref() == Some(name) {
                state.selected_brand = fallback;
            }
        }
        self.save()
    }

    // Color families

    /// Generate and install a new color ramp
    pub fn add_color_family(&self, config: &PaletteConfig) -> Result<()> {
        let document = self.document()?;
        let next = editor::add_color_family(&document, config)?;
        self.commit(next);
        Ok(())
    }

    /// Remove a color ramp
    pub fn remove_color_family(&self, name: &str) -> Result<()> {
        let document = self.document()?;
        let next = editor::remove_color_family(&document, name)?;
        self.commit(next);
        Ok(())
    }

    /// Families available for brand anchoring
    pub fn color_families(&self) -> Result<Vec<ColorFamily>> {
        let document = self.document()?;
        Ok(editor::color_families(&document))
    }

    // Views

    /// Resolve a stored value for the selected brand
    pub fn resolve(&self, value: &str) -> Result<String> {
        let document = self.document()?;
        let brand = self.selected()?;
        Ok(resolver::resolve(value, &document, &brand))
    }

    /// Flattened semantic rows for the selected brand
    pub fn flattened_tokens(&self) -> Result<Vec<FlattenedToken>> {
        let document = self.document()?;
        let brand = self.selected()?;
        Ok(flatten::flatten_semantic(&document, &brand))
    }

    /// Autocomplete suggestions, optionally narrowed to a token type
    pub fn alias_suggestions(
        &self,
        token_type: Option<&TokenType>,
    ) -> Result<Vec<AliasSuggestion>> {
        let document = self.document()?;
        let brand = self.selected()?;
        Ok(match token_type {
            Some(token_type) => aliases::all_aliases_by_type(&document, &brand, token_type),
            None => aliases::all_aliases(&document, &brand),
        })
    }

    // Export / import

    /// Produce export files for the current document
    pub fn export(&self, options: &ExportOptions) -> Result<ExportResult> {
        let document = self.document()?;
        Ok(export::export_tokens(&document, options)?)
    }

    /// Export the complete document as a single file
    pub fn export_complete(&self) -> Result<ExportResult> {
        self.export(&ExportOptions::complete())
    }

    /// Merge a per-brand file into the document, returning the brand it
    /// carried
    pub fn import_brand(&self, json: &str) -> Result<String> {
        let document = self.document()?;
        let outcome = export::merge_brand_import(&document, json)?;
        self.commit(outcome.document);
        Ok(outcome.brand)
    }
}
