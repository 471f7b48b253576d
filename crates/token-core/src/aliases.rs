//! Alias enumeration for autocomplete
//!
//! Produces the list of `{dot.path}` suggestions an editor can offer while
//! the user types a token value. Global color families and the brand's
//! semantic color tokens are always available; the type-filtered variants
//! narrow the list to the categories a token of that type may reference.

use serde::Serialize;
use token_model::{TokenDocument, TokenGroup, TokenNode, TokenType};

use crate::resolver;

/// One autocomplete entry: the alias text plus enough context to render a
/// swatch or preview next to it.
#[derive(Debug, Clone, Serialize)]
pub struct AliasSuggestion {
    /// The insertable alias, braces included.
    pub alias: String,
    /// Concrete value the alias resolves to for the selected brand.
    pub resolved_value: String,
    /// Dotted path without braces.
    pub path: String,
    /// Top-level category the alias came from, e.g. `colors` or `radius`.
    pub category: String,
}

fn push_group_leaves(
    group: &TokenGroup,
    prefix: &str,
    category: &str,
    colors_only: bool,
    document: &TokenDocument,
    brand: &str,
    out: &mut Vec<AliasSuggestion>,
) {
    for (key, node) in group {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match node {
            TokenNode::Group(children) => push_group_leaves(
                children, &path, category, colors_only, document, brand, out,
            ),
            _ => {
                if colors_only && !node.token_type().is_some_and(TokenType::is_color) {
                    continue;
                }
                let Some(stored) = node.literal() else { continue };
                let mut resolved = resolver::resolve(&stored, document, brand);
                // Bare-numeric spacing tokens preview as pixel lengths
                if node.token_type() == Some(&TokenType::Spacing)
                    && resolved.parse::<f64>().is_ok()
                {
                    resolved.push_str("px");
                }
                out.push(AliasSuggestion {
                    alias: format!("{{{path}}}"),
                    resolved_value: resolved,
                    path,
                    category: category.to_string(),
                });
            }
        }
    }
}

/// All global color tokens as suggestions. Values are taken verbatim from
/// the tokens since global color leaves hold literal hex values.
pub fn global_aliases(document: &TokenDocument, brand: &str) -> Vec<AliasSuggestion> {
    let mut out = Vec::new();
    for (category, node) in &document.global {
        if let TokenNode::Group(children) = node {
            push_group_leaves(
                children, category, category, true, document, brand, &mut out,
            );
        }
    }
    out
}

/// Semantic brand color tokens, resolved through the alias chain for the
/// given brand.
pub fn semantic_aliases(document: &TokenDocument, brand: &str) -> Vec<AliasSuggestion> {
    let mut out = Vec::new();
    let Some(TokenNode::Group(brand_group)) = document.semantic.get("brand") else {
        return out;
    };
    collect_semantic(brand_group, "brand", document, brand, &mut out);
    out
}

fn collect_semantic(
    group: &TokenGroup,
    prefix: &str,
    document: &TokenDocument,
    brand: &str,
    out: &mut Vec<AliasSuggestion>,
) {
    for (key, node) in group {
        let path = format!("{prefix}.{key}");
        match node {
            TokenNode::Group(children) => {
                collect_semantic(children, &path, document, brand, out);
            }
            TokenNode::Multi(token) if token.token_type.is_color() => {
                let Some(stored) = token.brand_value(brand) else { continue };
                out.push(AliasSuggestion {
                    alias: format!("{{{path}}}"),
                    resolved_value: resolver::resolve(stored, document, brand),
                    path,
                    category: "brand".to_string(),
                });
            }
            _ => {}
        }
    }
}

/// Global plus semantic color suggestions, global first.
pub fn all_aliases(document: &TokenDocument, brand: &str) -> Vec<AliasSuggestion> {
    let mut out = global_aliases(document, brand);
    out.extend(semantic_aliases(document, brand));
    out
}

/// Which top-level global categories a token of this type may alias into.
fn categories_for(token_type: &TokenType) -> &'static [&'static str] {
    match token_type {
        TokenType::Color => &["colors"],
        TokenType::Spacing => &["spacing"],
        TokenType::BorderRadius => &["radius"],
        TokenType::Number => &["spacing", "radius"],
        _ => &["colors"],
    }
}

/// Global suggestions narrowed to the categories relevant for a token type.
///
/// Within a relevant category every leaf counts, not only colors; leaves
/// whose own type is spacing and whose value is bare-numeric get a `px`
/// suffix on the preview so "4" reads as "4px".
pub fn global_aliases_by_type(
    document: &TokenDocument,
    brand: &str,
    token_type: &TokenType,
) -> Vec<AliasSuggestion> {
    let mut out = Vec::new();
    for category in categories_for(token_type) {
        if let Some(TokenNode::Group(children)) = document.global.get(*category) {
            push_group_leaves(
                children, category, category, false, document, brand, &mut out,
            );
        }
    }
    out
}

/// Type-filtered suggestions across both tiers. Semantic brand tokens only
/// join the list for color-typed targets.
pub fn all_aliases_by_type(
    document: &TokenDocument,
    brand: &str,
    token_type: &TokenType,
) -> Vec<AliasSuggestion> {
    let mut out = global_aliases_by_type(document, brand, token_type);
    if token_type.is_color() {
        out.extend(semantic_aliases(document, brand));
    }
    out
}
