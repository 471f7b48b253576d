//! The two-tier token document
//!
//! A document has a `global` section (concrete palettes, spacing, radii,
//! typography primitives) and a `semantic` section whose leaves carry one
//! value per brand. Loading validates only the presence of the two sections;
//! absent categories are tolerated and treated as empty by consuming code.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use crate::types::{MultiToken, TokenGroup, TokenNode};

/// Document load/serialize error types
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The input was not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top level was not a JSON object
    #[error("Token file must be a JSON object")]
    NotAnObject,

    /// A required top-level section is absent or not an object
    #[error("Token file is missing the \"{0}\" section")]
    MissingSection(&'static str),
}

/// Result type for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

/// The in-memory token document.
///
/// Edit operations never mutate a shared document in place; they copy the
/// tree and return a new one, so change notification can rely on snapshot
/// identity.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDocument {
    /// The `global` section: concrete single-value tokens
    pub global: TokenGroup,
    /// The `semantic` section: multi-brand leaves under named groups
    pub semantic: TokenGroup,
    /// Additional top-level sections (e.g. `textStyles`), preserved as-is
    pub extra: IndexMap<String, TokenNode>,
}

impl TokenDocument {
    /// Parse a document from JSON text.
    pub fn parse_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Build a document from an already-parsed JSON value.
    ///
    /// Fails unless both `global` and `semantic` are present and are objects.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(DocumentError::NotAnObject);
        };

        let mut global = None;
        let mut semantic = None;
        let mut extra = IndexMap::new();
        for (key, section) in map {
            match key.as_str() {
                "global" => global = section_group(section, "global")?,
                "semantic" => semantic = section_group(section, "semantic")?,
                _ => {
                    extra.insert(key, TokenNode::from_value(section));
                }
            }
        }

        Ok(Self {
            global: global.ok_or(DocumentError::MissingSection("global"))?,
            semantic: semantic.ok_or(DocumentError::MissingSection("semantic"))?,
            extra,
        })
    }

    /// Serialize to pretty-printed JSON, the shape token files are stored in.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a node under the `global` tree by path segments.
    pub fn get_global(&self, segments: &[String]) -> Option<&TokenNode> {
        lookup(&self.global, segments)
    }

    /// Look up a node under the `semantic` tree by path segments.
    pub fn get_semantic(&self, segments: &[String]) -> Option<&TokenNode> {
        lookup(&self.semantic, segments)
    }

    /// Mutable lookup under the `semantic` tree.
    pub fn get_semantic_mut(&mut self, segments: &[String]) -> Option<&mut TokenNode> {
        lookup_mut(&mut self.semantic, segments)
    }

    /// The brand names this document defines.
    ///
    /// `semantic.brand.theme` is the canonical source of truth: it holds one
    /// entry per brand, keyed by brand name. Falls back to
    /// `semantic.brand.primary.main` for documents without a theme token.
    pub fn brand_names(&self) -> Vec<String> {
        for path in [["brand", "theme"].as_slice(), ["brand", "primary", "main"].as_slice()] {
            let segments: Vec<String> = path.iter().map(|s| s.to_string()).collect();
            if let Some(TokenNode::Multi(token)) = self.get_semantic(&segments) {
                return token.values.keys().cloned().collect();
            }
        }
        Vec::new()
    }

    /// Every brand name appearing in any multi-brand leaf, in first-seen order.
    pub fn collect_brand_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        self.visit_semantic_multi(&mut |token| {
            for brand in token.values.keys() {
                if !names.iter().any(|known| known == brand) {
                    names.push(brand.clone());
                }
            }
        });
        names
    }

    /// Visit every multi-brand leaf under `semantic`.
    pub fn visit_semantic_multi(&self, visit: &mut impl FnMut(&MultiToken)) {
        fn walk(group: &TokenGroup, visit: &mut impl FnMut(&MultiToken)) {
            for node in group.values() {
                match node {
                    TokenNode::Multi(token) => visit(token),
                    TokenNode::Group(children) => walk(children, visit),
                    _ => {}
                }
            }
        }
        walk(&self.semantic, visit);
    }

    /// Visit every multi-brand leaf under `semantic`, mutably.
    pub fn visit_semantic_multi_mut(&mut self, visit: &mut impl FnMut(&mut MultiToken)) {
        fn walk(group: &mut TokenGroup, visit: &mut impl FnMut(&mut MultiToken)) {
            for node in group.values_mut() {
                match node {
                    TokenNode::Multi(token) => visit(token),
                    TokenNode::Group(children) => walk(children, visit),
                    _ => {}
                }
            }
        }
        walk(&mut self.semantic, visit);
    }
}

fn section_group(value: Value, name: &'static str) -> Result<Option<TokenGroup>> {
    match TokenNode::from_value(value) {
        TokenNode::Group(children) => Ok(Some(children)),
        _ => Err(DocumentError::MissingSection(name)),
    }
}

fn lookup<'a>(group: &'a TokenGroup, segments: &[String]) -> Option<&'a TokenNode> {
    let (first, rest) = segments.split_first()?;
    let node = group.get(first)?;
    if rest.is_empty() {
        return Some(node);
    }
    lookup(node.as_group()?, rest)
}

fn lookup_mut<'a>(group: &'a mut TokenGroup, segments: &[String]) -> Option<&'a mut TokenNode> {
    let (first, rest) = segments.split_first()?;
    let node = group.get_mut(first)?;
    if rest.is_empty() {
        return Some(node);
    }
    lookup_mut(node.as_group_mut()?, rest)
}

/// Serializes a group by reference, without wrapping it in a `TokenNode`.
struct GroupRef<'a>(&'a TokenGroup);

impl Serialize for GroupRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, child) in self.0 {
            map.serialize_entry(key, child)?;
        }
        map.end()
    }
}

impl Serialize for TokenDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + self.extra.len()))?;
        map.serialize_entry("global", &GroupRef(&self.global))?;
        map.serialize_entry("semantic", &GroupRef(&self.semantic))?;
        for (key, section) in &self.extra {
            map.serialize_entry(key, section)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TokenDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        TokenDocument::from_value(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> TokenDocument {
        TokenDocument::from_value(json!({
            "global": {
                "colors": {
                    "blue": { "70": { "$value": "#0072ef", "$type": "color" } }
                }
            },
            "semantic": {
                "brand": {
                    "primary": {
                        "main": {
                            "$value": { "acme": "{colors.blue.70}", "globex": "#222222" },
                            "$type": "color"
                        }
                    },
                    "theme": {
                        "$value": { "acme": "acme", "globex": "globex" },
                        "$type": "string"
                    }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_missing_sections_are_fatal() {
        assert!(matches!(
            TokenDocument::from_value(json!({ "global": {} })),
            Err(DocumentError::MissingSection("semantic"))
        ));
        assert!(matches!(
            TokenDocument::from_value(json!({ "semantic": {} })),
            Err(DocumentError::MissingSection("global"))
        ));
        assert!(matches!(
            TokenDocument::from_value(json!([1, 2])),
            Err(DocumentError::NotAnObject)
        ));
    }

    #[test]
    fn test_section_must_be_object() {
        let result = TokenDocument::from_value(json!({ "global": "nope", "semantic": {} }));
        assert!(matches!(result, Err(DocumentError::MissingSection("global"))));
    }

    #[test]
    fn test_path_lookup() {
        let doc = sample();
        let segments: Vec<String> =
            ["colors", "blue", "70"].iter().map(|s| s.to_string()).collect();
        let node = doc.get_global(&segments).unwrap();
        assert_eq!(node.literal(), Some("#0072ef".to_string()));

        let missing: Vec<String> = ["colors", "red", "70"].iter().map(|s| s.to_string()).collect();
        assert!(doc.get_global(&missing).is_none());
    }

    #[test]
    fn test_brand_names_from_theme_token() {
        assert_eq!(sample().brand_names(), vec!["acme", "globex"]);
    }

    #[test]
    fn test_brand_names_fallback_without_theme() {
        let doc = TokenDocument::from_value(json!({
            "global": {},
            "semantic": {
                "brand": {
                    "primary": {
                        "main": { "$value": { "acme": "#111111" }, "$type": "color" }
                    }
                }
            }
        }))
        .unwrap();
        assert_eq!(doc.brand_names(), vec!["acme"]);
    }

    #[test]
    fn test_json_round_trip() {
        let doc = sample();
        let text = doc.to_json_pretty().unwrap();
        let reparsed = TokenDocument::parse_str(&text).unwrap();
        assert_eq!(doc, reparsed);
    }

    #[test]
    fn test_extra_sections_survive() {
        let doc = TokenDocument::from_value(json!({
            "global": {},
            "semantic": {},
            "textStyles": {
                "body": {
                    "$value": { "fontFamily": "Inter" },
                    "$type": "typography"
                }
            }
        }))
        .unwrap();
        assert!(doc.extra.contains_key("textStyles"));
        let reparsed = TokenDocument::parse_str(&doc.to_json_pretty().unwrap()).unwrap();
        assert_eq!(doc, reparsed);
    }
}
