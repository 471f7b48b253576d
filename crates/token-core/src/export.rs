//! JSON export and import
//!
//! Export produces downloadable token files: either the complete document or
//! per-brand files whose multi-brand leaves are narrowed to a single-key map
//! for the selected brand. Import merges a previously exported per-brand file
//! back into the document, detecting the brand from the file itself.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Map, Value};
use token_model::{MultiToken, TokenDocument, TokenGroup, TokenNode};

/// Text style properties kept by default when text styles are exported.
pub const DEFAULT_TEXT_STYLE_PROPERTIES: [&str; 5] = [
    "fontFamily",
    "fontSize",
    "fontWeight",
    "lineHeight",
    "letterSpacing",
];

/// Export failures.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The requested options were rejected; every violation is listed
    #[error("invalid export options: {}", .0.join("; "))]
    InvalidOptions(Vec<String>),

    /// Serialization failed
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Import failures.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// The file is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The file has no `semantic` object
    #[error("imported file has no semantic section")]
    MissingSemanticSection,

    /// No single-brand leaf was found, so the brand cannot be identified
    #[error("could not detect a brand in the imported file")]
    BrandNotDetected,
}

/// Shape of the produced files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormat {
    /// One file with all brands
    Complete,
    /// One file per selected brand, narrowed to that brand
    PerBrand,
}

/// Export request.
#[derive(Debug, Clone, Serialize, serde::Deserialize)]
pub struct ExportOptions {
    /// Output shape
    pub format: ExportFormat,
    /// Brands to export in per-brand mode; ignored for complete exports
    pub brands: Vec<String>,
    /// Include the global tier in per-brand files
    pub include_global: bool,
    /// Include the `textStyles` section
    pub include_text_styles: bool,
    /// Properties kept inside each text style when included
    pub text_style_properties: Vec<String>,
}

impl ExportOptions {
    /// A complete export with text styles and default property filtering.
    pub fn complete() -> Self {
        Self {
            format: ExportFormat::Complete,
            brands: Vec::new(),
            include_global: true,
            include_text_styles: true,
            text_style_properties: DEFAULT_TEXT_STYLE_PROPERTIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// A per-brand export for the given brands, without the global tier.
    pub fn per_brand(brands: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            format: ExportFormat::PerBrand,
            brands: brands.into_iter().map(Into::into).collect(),
            include_global: false,
            include_text_styles: false,
            text_style_properties: DEFAULT_TEXT_STYLE_PROPERTIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// One produced file.
#[derive(Debug, Clone, Serialize)]
pub struct ExportFile {
    /// Suggested download filename
    pub filename: String,
    /// Pretty-printed JSON content
    pub content: String,
    /// Content length in bytes
    pub size: usize,
}

/// Export outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    /// Produced files in brand order
    pub files: Vec<ExportFile>,
    /// Human-readable summary
    pub message: String,
}

fn validate(document: &TokenDocument, options: &ExportOptions) -> Vec<String> {
    let mut problems = Vec::new();
    if options.format == ExportFormat::PerBrand {
        if options.brands.is_empty() {
            problems.push("per-brand export requires at least one brand".to_string());
        }
        let known = document.brand_names();
        for brand in &options.brands {
            if !known.iter().any(|b| b == brand) {
                problems.push(format!("unknown brand '{brand}'"));
            }
        }
    }
    if options.include_text_styles && options.text_style_properties.is_empty() {
        problems.push("text style export requires at least one property".to_string());
    }
    problems
}

/// Run an export. All option violations are collected and reported together.
pub fn export_tokens(
    document: &TokenDocument,
    options: &ExportOptions,
) -> std::result::Result<ExportResult, ExportError> {
    let problems = validate(document, options);
    if !problems.is_empty() {
        return Err(ExportError::InvalidOptions(problems));
    }

    let files = match options.format {
        ExportFormat::Complete => vec![complete_file(document, options)?],
        ExportFormat::PerBrand => {
            let single = options.brands.len() == 1;
            options
                .brands
                .iter()
                .map(|brand| per_brand_file(document, brand, single, options))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let message = match files.len() {
        1 => format!("Exported {}", files[0].filename),
        n => format!("Exported {n} files"),
    };
    tracing::info!(files = files.len(), "token export complete");
    Ok(ExportResult { files, message })
}

fn make_file(filename: String, root: Value) -> std::result::Result<ExportFile, ExportError> {
    let content = serde_json::to_string_pretty(&root)?;
    let size = content.len();
    Ok(ExportFile { filename, content, size })
}

fn group_value(group: &TokenGroup) -> Value {
    let mut map = Map::new();
    for (key, node) in group {
        map.insert(key.clone(), node.to_value());
    }
    Value::Object(map)
}

fn complete_file(
    document: &TokenDocument,
    options: &ExportOptions,
) -> std::result::Result<ExportFile, ExportError> {
    let mut root = Map::new();
    root.insert("global".to_string(), group_value(&document.global));
    root.insert("semantic".to_string(), group_value(&document.semantic));
    if options.include_text_styles {
        if let Some(styles) = document.extra.get("textStyles") {
            root.insert(
                "textStyles".to_string(),
                filter_text_styles(styles, &options.text_style_properties),
            );
        }
    }
    make_file("orbit-tokens.json".to_string(), Value::Object(root))
}

fn per_brand_file(
    document: &TokenDocument,
    brand: &str,
    single: bool,
    options: &ExportOptions,
) -> std::result::Result<ExportFile, ExportError> {
    let mut root = Map::new();
    if options.include_global {
        root.insert("global".to_string(), group_value(&document.global));
    }
    let narrowed = narrow_group(&document.semantic, brand);
    root.insert("semantic".to_string(), group_value(&narrowed));
    if options.include_text_styles {
        if let Some(styles) = document.extra.get("textStyles") {
            root.insert(
                "textStyles".to_string(),
                filter_text_styles(styles, &options.text_style_properties),
            );
        }
    }

    // A single-brand download gets the short name; batch downloads follow
    // the tokens.json naming convention
    let filename = if single {
        format!("semantic-{brand}.json")
    } else {
        format!("{brand}-semantic.tokens.json")
    };
    make_file(filename, Value::Object(root))
}

/// Narrow every multi-brand leaf to a single-key map for one brand. A leaf
/// missing the brand keeps its first entry so the exported file stays
/// complete.
fn narrow_group(group: &TokenGroup, brand: &str) -> TokenGroup {
    group
        .iter()
        .map(|(key, node)| (key.clone(), narrow_node(node, brand)))
        .collect()
}

fn narrow_node(node: &TokenNode, brand: &str) -> TokenNode {
    match node {
        TokenNode::Group(children) => TokenNode::Group(narrow_group(children, brand)),
        TokenNode::Multi(token) => {
            let mut values = IndexMap::new();
            if let Some(value) = token.brand_value(brand) {
                values.insert(brand.to_string(), value.to_string());
            } else if let Some((key, value)) = token.values.first() {
                values.insert(key.clone(), value.clone());
            }
            TokenNode::Multi(MultiToken {
                values,
                token_type: token.token_type.clone(),
                extras: token.extras.clone(),
            })
        }
        other => other.clone(),
    }
}

/// Keep only the requested properties inside each text style payload.
/// Non-style values pass through untouched.
fn filter_text_styles(node: &TokenNode, properties: &[String]) -> Value {
    match node {
        TokenNode::Group(children) => {
            let mut map = Map::new();
            for (key, child) in children {
                map.insert(key.clone(), filter_text_styles(child, properties));
            }
            Value::Object(map)
        }
        TokenNode::Composite(token) => {
            let mut leaf = token.extras.clone();
            let value = match &token.value {
                Value::Object(payload) => {
                    let filtered: Map<String, Value> = payload
                        .iter()
                        .filter(|(key, _)| properties.iter().any(|p| p == key.as_str()))
                        .map(|(key, value)| (key.clone(), value.clone()))
                        .collect();
                    Value::Object(filtered)
                }
                other => other.clone(),
            };
            let mut map = Map::new();
            map.insert("$value".to_string(), value);
            map.insert("$type".to_string(), json!(token.token_type.as_str()));
            for (key, extra) in leaf.drain(..) {
                map.insert(key, extra);
            }
            Value::Object(map)
        }
        // A style payload whose properties are all strings parses as a
        // multi-brand leaf; under textStyles its keys are style properties,
        // not brands, so it is filtered the same way.
        TokenNode::Multi(token) => {
            let filtered: Map<String, Value> = token
                .values
                .iter()
                .filter(|(key, _)| properties.iter().any(|p| p == key.as_str()))
                .map(|(key, value)| (key.clone(), json!(value)))
                .collect();
            let mut map = Map::new();
            map.insert("$value".to_string(), Value::Object(filtered));
            map.insert("$type".to_string(), json!(token.token_type.as_str()));
            for (key, extra) in token.extras.iter() {
                map.insert(key.clone(), extra.clone());
            }
            Value::Object(map)
        }
        other => other.to_value(),
    }
}

/// A successful brand import.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// The merged document
    pub document: TokenDocument,
    /// The brand detected in the imported file
    pub brand: String,
}

/// Merge a per-brand export back into a document.
///
/// The brand is detected from the file's first single-key multi-brand leaf.
/// Only paths already present in the document are merged; unknown paths in
/// the file are skipped, so an import can never change the document's shape.
pub fn merge_brand_import(
    document: &TokenDocument,
    json: &str,
) -> std::result::Result<ImportOutcome, ImportError> {
    let root: Value = serde_json::from_str(json)?;
    let semantic_value = root
        .get("semantic")
        .filter(|v| v.is_object())
        .cloned()
        .ok_or(ImportError::MissingSemanticSection)?;
    let incoming = match TokenNode::from_value(semantic_value) {
        TokenNode::Group(group) => group,
        _ => return Err(ImportError::MissingSemanticSection),
    };

    let brand = detect_brand(&incoming).ok_or(ImportError::BrandNotDetected)?;

    let mut merged = document.clone();
    let mut applied = 0usize;
    merge_groups(&mut merged.semantic, &incoming, &brand, &mut applied);
    tracing::info!(brand, applied, "brand import merged");
    Ok(ImportOutcome { document: merged, brand })
}

/// Depth-first search for the first multi-brand leaf that names exactly one
/// brand. That key identifies the file's brand.
fn detect_brand(group: &TokenGroup) -> Option<String> {
    for node in group.values() {
        match node {
            TokenNode::Multi(token) if token.values.len() == 1 => {
                return token.values.keys().next().cloned();
            }
            TokenNode::Group(children) => {
                if let Some(brand) = detect_brand(children) {
                    return Some(brand);
                }
            }
            _ => {}
        }
    }
    None
}

fn merge_groups(target: &mut TokenGroup, incoming: &TokenGroup, brand: &str, applied: &mut usize) {
    for (key, incoming_node) in incoming {
        let Some(target_node) = target.get_mut(key) else { continue };
        match (target_node, incoming_node) {
            (TokenNode::Group(target_children), TokenNode::Group(incoming_children)) => {
                merge_groups(target_children, incoming_children, brand, applied);
            }
            (TokenNode::Multi(target_token), TokenNode::Multi(incoming_token)) => {
                if let Some(value) = incoming_token.brand_value(brand) {
                    target_token.values.insert(brand.to_string(), value.to_string());
                    *applied += 1;
                }
            }
            _ => {}
        }
    }
}
