//! Brand registry
//!
//! Each brand gets a stable id and creation/update timestamps, stored as one
//! record per key under the `brand:` prefix. The registry is kept in step
//! with the document's brand list via [`TokenStore::replace_brands`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::{Result, StoreError, TokenStore, BRAND_PREFIX};

/// A registered brand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandRecord {
    /// Stable identifier, assigned at registration
    pub id: Uuid,
    /// Brand name as it appears in the token document
    pub name: String,
    /// When the brand was registered
    pub created_at: DateTime<Utc>,
    /// When the record last changed
    pub updated_at: DateTime<Utc>,
}

impl BrandRecord {
    fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    fn key(&self) -> String {
        format!("{BRAND_PREFIX}{}", self.id)
    }
}

impl TokenStore {
    /// All registered brands, oldest first
    pub fn list_brands(&self) -> Result<Vec<BrandRecord>> {
        let mut records = Vec::new();
        for item in self.db.scan_prefix(BRAND_PREFIX.as_bytes()) {
            let (_, bytes) = item?;
            let record: BrandRecord = serde_json::from_slice(&bytes)?;
            records.push(record);
        }
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }

    /// The record for a brand name, if registered
    pub fn find_brand(&self, name: &str) -> Result<Option<BrandRecord>> {
        Ok(self.list_brands()?.into_iter().find(|r| r.name == name))
    }

    /// Register a new brand. Names are unique.
    pub fn add_brand(&self, name: &str) -> Result<BrandRecord> {
        if self.find_brand(name)?.is_some() {
            return Err(StoreError::DuplicateBrand(name.to_string()));
        }
        let record = BrandRecord::new(name);
        self.set_json(&record.key(), &record)?;
        tracing::debug!(brand = name, id = %record.id, "brand registered");
        Ok(record)
    }

    /// Rename a registered brand, keeping its id and creation time
    pub fn rename_brand(&self, from: &str, to: &str) -> Result<BrandRecord> {
        if self.find_brand(to)?.is_some() {
            return Err(StoreError::DuplicateBrand(to.to_string()));
        }
        let mut record = self
            .find_brand(from)?
            .ok_or_else(|| StoreError::BrandNotFound(from.to_string()))?;
        record.name = to.to_string();
        record.updated_at = Utc::now();
        self.set_json(&record.key(), &record)?;
        Ok(record)
    }

    /// Remove a brand's record
    pub fn remove_brand(&self, name: &str) -> Result<BrandRecord> {
        let record = self
            .find_brand(name)?
            .ok_or_else(|| StoreError::BrandNotFound(name.to_string()))?;
        self.db.remove(record.key().as_bytes())?;
        Ok(record)
    }

    /// Drop every brand record, leaving the document blob alone
    pub fn clear_brands(&self) -> Result<usize> {
        let records = self.list_brands()?;
        for record in &records {
            self.db.remove(record.key().as_bytes())?;
        }
        Ok(records.len())
    }

    /// Reconcile the registry against the document's brand list: register
    /// names that are missing and drop records whose brand no longer exists.
    /// Existing records keep their ids and timestamps.
    pub fn replace_brands(&self, names: &[String]) -> Result<Vec<BrandRecord>> {
        for record in self.list_brands()? {
            if !names.iter().any(|n| *n == record.name) {
                self.db.remove(record.key().as_bytes())?;
            }
        }
        for name in names {
            if self.find_brand(name)?.is_none() {
                let record = BrandRecord::new(name.clone());
                self.set_json(&record.key(), &record)?;
            }
        }
        self.list_brands()
    }
}
