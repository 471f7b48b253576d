//! Flattened per-brand table view
//!
//! Walks the semantic tier and emits one row per multi-brand leaf with the
//! selected brand's value resolved. The table groups rows by top-level
//! section and sorts size-named tokens (`xs`, `sm`, `md`...) in garment
//! order rather than alphabetically.

use serde::Serialize;
use token_model::{TokenDocument, TokenGroup, TokenNode, TokenType};

use crate::resolver;

/// Top-level grouping for the flattened table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    /// Rows under `semantic.brand`
    Brand,
    /// Rows under `semantic.colors`
    Colors,
    /// Everything else in the semantic tier
    Other,
}

impl TokenCategory {
    fn from_section(section: &str) -> Self {
        match section {
            "brand" => Self::Brand,
            "colors" => Self::Colors,
            _ => Self::Other,
        }
    }
}

/// One table row: a semantic token with its value for the selected brand.
#[derive(Debug, Clone, Serialize)]
pub struct FlattenedToken {
    /// Dotted path within the semantic tier, e.g. `brand.primary.main`.
    pub path: String,
    /// Fully qualified path including the tier, e.g. `semantic.brand.primary.main`.
    pub full_path: String,
    /// Stored value for the brand (may still be an alias).
    pub value: String,
    /// Resolved concrete value for the brand.
    pub resolved_value: String,
    /// Declared token type.
    pub token_type: TokenType,
    /// Table grouping derived from the top-level section.
    pub category: TokenCategory,
    /// Second path segment when present, used as a sub-heading.
    pub subcategory: Option<String>,
}

/// Flatten the semantic tier into rows for one brand, in document order.
pub fn flatten_semantic(document: &TokenDocument, brand: &str) -> Vec<FlattenedToken> {
    let mut rows = Vec::new();
    for (section, node) in &document.semantic {
        let category = TokenCategory::from_section(section);
        match node {
            TokenNode::Group(children) => {
                collect_rows(children, section, category, document, brand, &mut rows);
            }
            TokenNode::Multi(token) => {
                if let Some(row) = row_for(section, token, category, None, document, brand) {
                    rows.push(row);
                }
            }
            _ => {}
        }
    }
    rows
}

fn collect_rows(
    group: &TokenGroup,
    prefix: &str,
    category: TokenCategory,
    document: &TokenDocument,
    brand: &str,
    rows: &mut Vec<FlattenedToken>,
) {
    for (key, node) in group {
        let path = format!("{prefix}.{key}");
        match node {
            TokenNode::Group(children) => {
                collect_rows(children, &path, category, document, brand, rows);
            }
            TokenNode::Multi(token) => {
                let subcategory = path.split('.').nth(1).map(str::to_string);
                if let Some(row) = row_for(&path, token, category, subcategory, document, brand) {
                    rows.push(row);
                }
            }
            _ => {}
        }
    }
}

fn row_for(
    path: &str,
    token: &token_model::MultiToken,
    category: TokenCategory,
    subcategory: Option<String>,
    document: &TokenDocument,
    brand: &str,
) -> Option<FlattenedToken> {
    let value = token.brand_value(brand)?.to_string();
    let resolved_value = resolver::resolve(&value, document, brand);
    Some(FlattenedToken {
        full_path: format!("semantic.{path}"),
        path: path.to_string(),
        value,
        resolved_value,
        token_type: token.token_type.clone(),
        category,
        subcategory,
    })
}

/// Group rows by category, preserving the flattening order within each and
/// emitting categories in their fixed display order.
pub fn group_by_category(
    rows: Vec<FlattenedToken>,
) -> Vec<(TokenCategory, Vec<FlattenedToken>)> {
    let mut grouped: Vec<(TokenCategory, Vec<FlattenedToken>)> = Vec::new();
    for category in [TokenCategory::Brand, TokenCategory::Colors, TokenCategory::Other] {
        grouped.push((category, Vec::new()));
    }
    for row in rows {
        if let Some((_, bucket)) = grouped.iter_mut().find(|(c, _)| *c == row.category) {
            bucket.push(row);
        }
    }
    grouped.retain(|(_, bucket)| !bucket.is_empty());
    grouped
}

/// Garment-size rank for the final path segment. Sizes sort from smallest to
/// largest; anything unrecognized falls back to alphabetical after them.
fn size_rank(segment: &str) -> Option<usize> {
    const ORDER: [&str; 13] = [
        "none", "5xs", "4xs", "3xs", "2xs", "xs", "sm", "md", "lg", "xl", "2xl", "3xl", "4xl",
    ];
    ORDER.iter().position(|s| *s == segment)
}

/// Comparator for token paths that sorts size-suffixed siblings in garment
/// order.
pub fn compare_size_paths(a: &str, b: &str) -> std::cmp::Ordering {
    let last = |path: &str| path.rsplit('.').next().unwrap_or(path).to_string();
    let (a_last, b_last) = (last(a), last(b));
    match (size_rank(&a_last), size_rank(&b_last)) {
        (Some(ra), Some(rb)) => ra.cmp(&rb),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
