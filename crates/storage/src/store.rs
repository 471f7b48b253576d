//! Sled-backed token store
//!
//! One database holds two kinds of entries: brand registry records under
//! the `brand:` prefix and the token document blob under a fixed key. Values
//! are JSON so the store can be inspected and migrated by hand.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use sled::Db;
use thiserror::Error;
use token_model::TokenDocument;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A brand with this name is already registered
    #[error("Brand already exists: {0}")]
    DuplicateBrand(String),

    /// No registered brand has this name
    #[error("Brand not found: {0}")]
    BrandNotFound(String),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

pub(crate) const BRAND_PREFIX: &str = "brand:";
pub(crate) const DOCUMENT_KEY: &str = "tokens:document";

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Database path
    pub path: String,
    /// Cache capacity in bytes
    pub cache_capacity: u64,
    /// Enable compression
    pub use_compression: bool,
    /// Flush interval in milliseconds (None for immediate flush)
    pub flush_every_ms: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "orbit_tokens.db".to_string(),
            cache_capacity: 16 * 1024 * 1024, // 16MB
            use_compression: true,
            flush_every_ms: Some(500),
        }
    }
}

impl StoreConfig {
    /// Create a new configuration with a custom path
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), ..Default::default() }
    }

    /// Set cache capacity in bytes
    pub fn cache_capacity(mut self, bytes: u64) -> Self {
        self.cache_capacity = bytes;
        self
    }

    /// Enable or disable compression
    pub fn use_compression(mut self, enabled: bool) -> Self {
        self.use_compression = enabled;
        self
    }

    /// Set flush interval in milliseconds
    pub fn flush_every_ms(mut self, ms: Option<u64>) -> Self {
        self.flush_every_ms = ms;
        self
    }
}

/// The persistent token store
pub struct TokenStore {
    pub(crate) db: Arc<Db>,
}

impl TokenStore {
    /// Open (or create) a store at the configured path
    pub fn open(config: StoreConfig) -> Result<Self> {
        let mut db_config = sled::Config::new()
            .path(&config.path)
            .cache_capacity(config.cache_capacity)
            .use_compression(config.use_compression);

        if let Some(ms) = config.flush_every_ms {
            db_config = db_config.flush_every_ms(Some(ms));
        }

        let db = db_config.open()?;
        tracing::debug!(path = %config.path, "token store opened");

        Ok(Self { db: Arc::new(db) })
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;

        Ok(Self { db: Arc::new(db) })
    }

    pub(crate) fn get_json<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        match self.db.get(key.as_bytes())? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    pub(crate) fn set_json<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec(value)?;
        self.db.insert(key.as_bytes(), bytes)?;
        Ok(())
    }

    /// Load the stored token document, if one has been saved
    pub fn get_document(&self) -> Result<Option<TokenDocument>> {
        self.get_json(DOCUMENT_KEY)
    }

    /// Persist the token document
    pub fn set_document(&self, document: &TokenDocument) -> Result<()> {
        self.set_json(DOCUMENT_KEY, document)
    }

    /// Remove the stored token document
    pub fn clear_document(&self) -> Result<bool> {
        Ok(self.db.remove(DOCUMENT_KEY.as_bytes())?.is_some())
    }

    /// Clear all data, registry and document alike
    pub fn clear(&self) -> Result<()> {
        self.db.clear()?;
        Ok(())
    }

    /// Flush pending writes to disk
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Whether the store holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> TokenDocument {
        TokenDocument::from_value(json!({
            "global": {
                "colors": { "blue": { "70": { "$value": "#0072ef", "$type": "color" } } }
            },
            "semantic": {
                "brand": {
                    "theme": { "$value": { "acme": "acme" }, "$type": "string" }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_document_roundtrip_in_memory() {
        let store = TokenStore::in_memory().unwrap();
        assert!(store.get_document().unwrap().is_none());

        let doc = document();
        store.set_document(&doc).unwrap();
        let loaded = store.get_document().unwrap().unwrap();
        assert_eq!(loaded, doc);

        assert!(store.clear_document().unwrap());
        assert!(store.get_document().unwrap().is_none());
    }

    #[test]
    fn test_document_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.db");
        let config = StoreConfig::new(path.to_string_lossy()).flush_every_ms(None);

        {
            let store = TokenStore::open(config.clone()).unwrap();
            store.set_document(&document()).unwrap();
            store.flush().unwrap();
        }

        let store = TokenStore::open(config).unwrap();
        let loaded = store.get_document().unwrap().unwrap();
        assert_eq!(loaded, document());
    }

    #[test]
    fn test_clear_empties_store() {
        let store = TokenStore::in_memory().unwrap();
        store.set_document(&document()).unwrap();
        assert!(!store.is_empty());
        store.clear().unwrap();
        assert!(store.is_empty());
    }
}
