//! Alias resolution
//!
//! Turns a stored token value (literal or `{alias}`) into a concrete value
//! for one brand by following reference chains across both document tiers.
//! Resolution is deliberately lenient: an unresolvable reference is returned
//! unchanged with a warning, so a live-editing UI can render a placeholder
//! instead of failing. A depth budget bounds cyclic reference graphs.

use token_model::{Reference, TokenDocument, TokenNode};

/// Default depth budget: tolerates deep but finite alias chains (two or
/// three hops is typical) while guaranteeing termination on cycles.
pub const DEFAULT_MAX_DEPTH: u32 = 10;

/// Resolve a stored value for a brand with the default depth budget.
pub fn resolve(value: &str, document: &TokenDocument, brand: &str) -> String {
    resolve_with_depth(value, document, brand, DEFAULT_MAX_DEPTH)
}

/// Resolve a stored value for a brand with an explicit depth budget.
///
/// Non-aliases come back unchanged. Global lookups win over semantic ones;
/// at a multi-brand leaf the brand's entry is selected. When the path cannot
/// be resolved the original reference is returned; when the budget runs out
/// the current, partially resolved value is returned. Both cases log a
/// warning and neither is an error.
pub fn resolve_with_depth(
    value: &str,
    document: &TokenDocument,
    brand: &str,
    depth: u32,
) -> String {
    if depth == 0 {
        tracing::warn!(value, "token resolution exceeded max depth, returning current value");
        return value.to_string();
    }

    let Some(reference) = Reference::parse(value) else {
        return value.to_string();
    };
    let segments = reference.segments();

    // Global tokens first: paths like colors.blue.70 or radius.md
    if let Some(node) = document.get_global(segments) {
        if let Some(stored) = node.literal() {
            return resolve_with_depth(&stored, document, brand, depth - 1);
        }
    }

    // Then semantic tokens: brand.primary.main, colors.background.page
    if let Some(node) = document.get_semantic(segments) {
        match node {
            TokenNode::Multi(token) => {
                if let Some(brand_value) = token.brand_value(brand) {
                    let stored = brand_value.to_string();
                    return resolve_with_depth(&stored, document, brand, depth - 1);
                }
            }
            _ => {
                if let Some(stored) = node.literal() {
                    return resolve_with_depth(&stored, document, brand, depth - 1);
                }
            }
        }
    }

    tracing::warn!(value, brand, "could not resolve token alias");
    value.to_string()
}

/// Whether an alias points at an existing token leaf in either tier.
pub fn is_valid_alias(value: &str, document: &TokenDocument) -> bool {
    let Some(reference) = Reference::parse(value) else {
        return false;
    };
    let segments = reference.segments();

    let is_leaf = |node: &TokenNode| node.is_leaf();
    document.get_global(segments).is_some_and(is_leaf)
        || document.get_semantic(segments).is_some_and(is_leaf)
}
