//! Pure document mutations
//!
//! Every operation takes the current document by reference and returns a new
//! one, leaving the input untouched. Callers swap the returned snapshot into
//! shared state; nothing here performs I/O.

use color_engine::{
    generate_palette, palette_to_tokens, validate_family_name, ColorError, ColorSelection,
    GeneratedBrandColors, PaletteConfig,
};
use token_model::{SingleToken, StepLattice, TokenDocument, TokenNode, TokenType};

/// Errors from document mutations.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// A brand with this name already exists
    #[error("brand '{0}' already exists")]
    BrandExists(String),

    /// The named brand is not present in the document
    #[error("unknown brand '{0}'")]
    UnknownBrand(String),

    /// The final brand cannot be removed
    #[error("cannot remove the last remaining brand")]
    LastBrand,

    /// The proposed color family name was rejected
    #[error("invalid family name: {0}")]
    InvalidFamilyName(String),

    /// The named color family is not present under `global.colors`
    #[error("unknown color family '{0}'")]
    UnknownFamily(String),

    /// The dotted path does not lead to a token
    #[error("no token at path '{0}'")]
    UnknownPath(String),

    /// The token at the path does not hold per-brand values
    #[error("token at '{0}' is not a multi-brand token")]
    NotMultiBrand(String),

    /// Ramp generation failed
    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Result alias for mutations.
pub type Result<T> = std::result::Result<T, EditError>;

/// Border radius preset selected in the brand wizard, mapped onto the
/// shared radius scale one size down (a "md" brand radius reads `radius.sm`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadiusSize {
    /// Small
    Sm,
    /// Medium
    Md,
    /// Large
    Lg,
    /// Extra large
    Xl,
}

impl RadiusSize {
    /// The alias this preset stores into the brand radius tokens.
    pub fn alias(self) -> &'static str {
        match self {
            Self::Sm => "{radius.xs}",
            Self::Md => "{radius.sm}",
            Self::Lg => "{radius.md}",
            Self::Xl => "{radius.lg}",
        }
    }
}

fn semantic_path(path: &str) -> Vec<String> {
    let trimmed = path.strip_prefix("semantic.").unwrap_or(path);
    trimmed.split('.').map(str::to_string).collect()
}

/// Set one brand's value on a semantic multi-brand token.
pub fn update_token(
    document: &TokenDocument,
    path: &str,
    brand: &str,
    value: &str,
) -> Result<TokenDocument> {
    if !document.brand_names().iter().any(|b| b == brand) {
        return Err(EditError::UnknownBrand(brand.to_string()));
    }
    let mut next = document.clone();
    let segments = semantic_path(path);
    let node = next
        .get_semantic_mut(&segments)
        .ok_or_else(|| EditError::UnknownPath(path.to_string()))?;
    match node {
        TokenNode::Multi(token) => {
            token.values.insert(brand.to_string(), value.to_string());
            Ok(next)
        }
        _ => Err(EditError::NotMultiBrand(path.to_string())),
    }
}

/// Add a brand by cloning another brand's values across every semantic
/// multi-brand token. `template` selects the source brand; when absent, or
/// when a particular token lacks the template's entry, the token's first
/// entry is used. The new brand's theme token carries its own name.
pub fn add_brand(
    document: &TokenDocument,
    name: &str,
    template: Option<&str>,
) -> Result<TokenDocument> {
    let brands = document.brand_names();
    if brands.iter().any(|b| b == name) {
        return Err(EditError::BrandExists(name.to_string()));
    }
    if let Some(template) = template {
        if !brands.iter().any(|b| b == template) {
            return Err(EditError::UnknownBrand(template.to_string()));
        }
    }

    let mut next = document.clone();
    next.visit_semantic_multi_mut(&mut |token| {
        let source = template
            .and_then(|t| token.brand_value(t))
            .or_else(|| token.values.values().next().map(String::as_str));
        if let Some(value) = source {
            let value = value.to_string();
            token.values.insert(name.to_string(), value);
        }
    });

    // The theme token identifies the brand, never the template
    let theme_path = ["brand".to_string(), "theme".to_string()];
    if let Some(TokenNode::Multi(token)) = next.get_semantic_mut(&theme_path) {
        token.values.insert(name.to_string(), name.to_string());
    }
    Ok(next)
}

fn overwrite_role(
    document: &mut TokenDocument,
    brand: &str,
    role: &str,
    variants: &[(String, String)],
) {
    for (variant, alias) in variants {
        let path = ["brand".to_string(), role.to_string(), variant.clone()];
        if let Some(TokenNode::Multi(token)) = document.get_semantic_mut(&path) {
            token.values.insert(brand.to_string(), alias.clone());
        }
    }
}

/// Add a brand and immediately point its color roles at generated ramp
/// references, optionally setting the brand radius preset.
pub fn add_brand_with_colors(
    document: &TokenDocument,
    name: &str,
    template: Option<&str>,
    colors: &GeneratedBrandColors,
    radius: Option<RadiusSize>,
) -> Result<TokenDocument> {
    let mut next = add_brand(document, name, template)?;

    overwrite_role(&mut next, name, "primary", &colors.primary.entries);
    overwrite_role(&mut next, name, "secondary", &colors.secondary.entries);
    overwrite_role(&mut next, name, "accent", &colors.accent.entries);

    if let Some(radius) = radius {
        let radius_path = ["brand".to_string(), "radius".to_string()];
        if let Some(TokenNode::Group(group)) = next.get_semantic_mut(&radius_path) {
            for node in group.values_mut() {
                if let TokenNode::Multi(token) = node {
                    token.values.insert(name.to_string(), radius.alias().to_string());
                }
            }
        }
    }
    Ok(next)
}

/// Remove a brand's entry from every semantic multi-brand token. The last
/// brand is protected.
pub fn remove_brand(document: &TokenDocument, name: &str) -> Result<TokenDocument> {
    let brands = document.brand_names();
    if !brands.iter().any(|b| b == name) {
        return Err(EditError::UnknownBrand(name.to_string()));
    }
    if brands.len() <= 1 {
        return Err(EditError::LastBrand);
    }
    let mut next = document.clone();
    next.visit_semantic_multi_mut(&mut |token| {
        token.values.shift_remove(name);
    });
    Ok(next)
}

/// Rename a brand across every semantic multi-brand token, keeping each
/// token's entry position.
pub fn rename_brand(document: &TokenDocument, from: &str, to: &str) -> Result<TokenDocument> {
    let brands = document.brand_names();
    if !brands.iter().any(|b| b == from) {
        return Err(EditError::UnknownBrand(from.to_string()));
    }
    if brands.iter().any(|b| b == to) {
        return Err(EditError::BrandExists(to.to_string()));
    }
    let mut next = document.clone();
    next.visit_semantic_multi_mut(&mut |token| {
        if let Some(index) = token.values.get_index_of(from) {
            let value = token.values[index].clone();
            token.values.shift_remove(from);
            token.values.shift_insert(index, to.to_string(), value);
        }
    });
    let theme_path = ["brand".to_string(), "theme".to_string()];
    if let Some(TokenNode::Multi(token)) = next.get_semantic_mut(&theme_path) {
        if token.values.get(to).is_some_and(|v| v == from) {
            token.values.insert(to.to_string(), to.to_string());
        }
    }
    Ok(next)
}

/// Generate a 16-step ramp and install it as a new family under
/// `global.colors`.
pub fn add_color_family(
    document: &TokenDocument,
    config: &PaletteConfig,
) -> Result<TokenDocument> {
    let existing = color_family_names(document);
    if let Some(message) = validate_family_name(&config.family_name, &existing) {
        return Err(EditError::InvalidFamilyName(message));
    }
    let steps = generate_palette(config)?;
    let tokens = palette_to_tokens(&steps);

    let mut next = document.clone();
    let colors = next
        .global
        .entry("colors".to_string())
        .or_insert_with(TokenNode::empty_group);
    if let Some(group) = colors.as_group_mut() {
        group.insert(config.family_name.clone(), TokenNode::Group(tokens));
    }
    Ok(next)
}

/// Remove a color family from `global.colors`. Semantic aliases into the
/// removed ramp are left as-is and surface as unresolved references.
pub fn remove_color_family(document: &TokenDocument, name: &str) -> Result<TokenDocument> {
    let mut next = document.clone();
    let removed = next
        .global
        .get_mut("colors")
        .and_then(TokenNode::as_group_mut)
        .and_then(|group| group.shift_remove(name));
    if removed.is_none() {
        return Err(EditError::UnknownFamily(name.to_string()));
    }
    Ok(next)
}

fn global_path(path: &str) -> Vec<String> {
    let trimmed = path.strip_prefix("global.").unwrap_or(path);
    trimmed.split('.').map(str::to_string).collect()
}

/// Insert or overwrite a single-value token at a dotted path under the
/// global tier, creating intermediate groups as needed.
pub fn set_global_token(
    document: &TokenDocument,
    path: &str,
    value: &str,
    token_type: TokenType,
) -> Result<TokenDocument> {
    let segments = global_path(path);
    let Some((leaf, parents)) = segments.split_last() else {
        return Err(EditError::UnknownPath(path.to_string()));
    };
    let mut next = document.clone();
    let mut group = &mut next.global;
    for segment in parents {
        let node = group
            .entry(segment.clone())
            .or_insert_with(TokenNode::empty_group);
        group = node
            .as_group_mut()
            .ok_or_else(|| EditError::UnknownPath(path.to_string()))?;
    }
    group.insert(
        leaf.clone(),
        TokenNode::Single(SingleToken::new(value, token_type)),
    );
    Ok(next)
}

/// Update the value of an existing global single-value token.
pub fn update_global_token(
    document: &TokenDocument,
    path: &str,
    value: &str,
) -> Result<TokenDocument> {
    let segments = global_path(path);
    let mut next = document.clone();
    match lookup_global_mut(&mut next, &segments) {
        Some(TokenNode::Single(token)) => {
            token.value = value.to_string();
            Ok(next)
        }
        _ => Err(EditError::UnknownPath(path.to_string())),
    }
}

/// Remove a global token at a dotted path.
pub fn remove_global_token(document: &TokenDocument, path: &str) -> Result<TokenDocument> {
    let segments = global_path(path);
    let Some((leaf, parents)) = segments.split_last() else {
        return Err(EditError::UnknownPath(path.to_string()));
    };
    let mut next = document.clone();
    let mut group = &mut next.global;
    for segment in parents {
        group = group
            .get_mut(segment)
            .and_then(TokenNode::as_group_mut)
            .ok_or_else(|| EditError::UnknownPath(path.to_string()))?;
    }
    if group.shift_remove(leaf).is_none() {
        return Err(EditError::UnknownPath(path.to_string()));
    }
    Ok(next)
}

fn lookup_global_mut<'a>(
    document: &'a mut TokenDocument,
    segments: &[String],
) -> Option<&'a mut TokenNode> {
    let (first, rest) = segments.split_first()?;
    let mut node = document.global.get_mut(first)?;
    for segment in rest {
        node = node.as_group_mut()?.get_mut(segment)?;
    }
    Some(node)
}

/// A color family summary for pickers: its name, available steps, and a
/// representative swatch.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ColorFamily {
    /// Family name under `global.colors`
    pub name: String,
    /// Available lattice steps, ascending
    pub steps: Vec<u16>,
    /// Hex value of step 70 when present, otherwise 80, otherwise the
    /// family's first step
    pub sample_hex: String,
}

fn color_family_names(document: &TokenDocument) -> Vec<String> {
    document
        .global
        .get("colors")
        .and_then(TokenNode::as_group)
        .map(|group| group.keys().cloned().collect())
        .unwrap_or_default()
}

/// Families available for brand anchoring, name-sorted, excluding the
/// reserved neutral ramp.
pub fn color_families(document: &TokenDocument) -> Vec<ColorFamily> {
    let Some(colors) = document.global.get("colors").and_then(TokenNode::as_group) else {
        return Vec::new();
    };
    let mut families: Vec<ColorFamily> = colors
        .iter()
        .filter(|(name, _)| name.as_str() != "neutral")
        .filter_map(|(name, node)| {
            let group = node.as_group()?;
            let mut steps: Vec<u16> = group
                .keys()
                .filter_map(|k| k.parse::<u16>().ok())
                .collect();
            steps.sort_unstable();
            let sample = [70u16, 80]
                .into_iter()
                .find(|s| steps.contains(s))
                .or_else(|| steps.first().copied())?;
            let sample_hex = group
                .get(&sample.to_string())
                .and_then(TokenNode::literal)?;
            Some(ColorFamily { name: name.clone(), steps, sample_hex })
        })
        .collect();
    families.sort_by(|a, b| a.name.cmp(&b.name));
    families
}

/// The ascending steps of one family.
pub fn family_steps(document: &TokenDocument, family: &str) -> Vec<u16> {
    color_families(document)
        .into_iter()
        .find(|f| f.name == family)
        .map(|f| f.steps)
        .unwrap_or_default()
}

/// The stored hex at (family, step), if present.
pub fn color_value(document: &TokenDocument, family: &str, step: u16) -> Option<String> {
    document
        .global
        .get("colors")?
        .as_group()?
        .get(family)?
        .as_group()?
        .get(&step.to_string())?
        .literal()
}

/// Whether a selection points at an existing ramp step on the lattice.
pub fn is_valid_color_selection(document: &TokenDocument, selection: &ColorSelection) -> bool {
    StepLattice::contains(selection.step)
        && color_value(document, &selection.family, selection.step).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_engine::generate_brand_colors;
    use serde_json::json;

    fn document() -> TokenDocument {
        TokenDocument::from_value(json!({
            "global": {
                "colors": {
                    "blue": {
                        "5": { "$value": "#f2f8ff", "$type": "color" },
                        "70": { "$value": "#0072ef", "$type": "color" },
                        "80": { "$value": "#005ac2", "$type": "color" }
                    },
                    "neutral": {
                        "70": { "$value": "#4a4a4a", "$type": "color" }
                    }
                },
                "radius": {
                    "sm": { "$value": "4px", "$type": "borderRadius" }
                }
            },
            "semantic": {
                "brand": {
                    "primary": {
                        "main": {
                            "$value": { "acme": "{colors.blue.70}", "globex": "#aa0000" },
                            "$type": "color"
                        }
                    },
                    "radius": {
                        "interactive": {
                            "$value": { "acme": "{radius.sm}", "globex": "{radius.sm}" },
                            "$type": "borderRadius"
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
    fn test_update_token_replaces_one_brand_only() {
        let doc = document();
        let next = update_token(&doc, "brand.primary.main", "acme", "#123456").unwrap();
        let node = next
            .get_semantic(&["brand".into(), "primary".into(), "main".into()])
            .unwrap();
        let token = node.as_multi().unwrap();
        assert_eq!(token.brand_value("acme"), Some("#123456"));
        assert_eq!(token.brand_value("globex"), Some("#aa0000"));
        // Input untouched
        assert_eq!(
            doc.get_semantic(&["brand".into(), "primary".into(), "main".into()])
                .unwrap()
                .as_multi()
                .unwrap()
                .brand_value("acme"),
            Some("{colors.blue.70}")
        );
    }

    #[test]
    fn test_update_token_rejects_unknown_targets() {
        let doc = document();
        assert!(matches!(
            update_token(&doc, "brand.primary.main", "initech", "#fff"),
            Err(EditError::UnknownBrand(_))
        ));
        assert!(matches!(
            update_token(&doc, "brand.primary.missing", "acme", "#fff"),
            Err(EditError::UnknownPath(_))
        ));
        assert!(matches!(
            update_token(&doc, "brand.primary", "acme", "#fff"),
            Err(EditError::NotMultiBrand(_))
        ));
    }

    #[test]
    fn test_add_brand_clones_template_and_owns_theme() {
        let doc = document();
        let next = add_brand(&doc, "initech", Some("globex")).unwrap();
        assert_eq!(next.brand_names(), vec!["acme", "globex", "initech"]);
        let main = next
            .get_semantic(&["brand".into(), "primary".into(), "main".into()])
            .unwrap()
            .as_multi()
            .unwrap();
        assert_eq!(main.brand_value("initech"), Some("#aa0000"));
        let theme = next
            .get_semantic(&["brand".into(), "theme".into()])
            .unwrap()
            .as_multi()
            .unwrap();
        assert_eq!(theme.brand_value("initech"), Some("initech"));
    }

    #[test]
    fn test_add_brand_defaults_to_first_entry() {
        let doc = document();
        let next = add_brand(&doc, "initech", None).unwrap();
        let main = next
            .get_semantic(&["brand".into(), "primary".into(), "main".into()])
            .unwrap()
            .as_multi()
            .unwrap();
        assert_eq!(main.brand_value("initech"), Some("{colors.blue.70}"));
    }

    #[test]
    fn test_add_brand_rejects_duplicate() {
        let doc = document();
        assert!(matches!(
            add_brand(&doc, "acme", None),
            Err(EditError::BrandExists(_))
        ));
    }

    #[test]
    fn test_add_brand_with_colors_points_roles_at_ramp() {
        let doc = document();
        let colors = generate_brand_colors(
            &ColorSelection::new("blue", 70),
            &ColorSelection::new("blue", 80),
            &ColorSelection::new("blue", 70),
        );
        let next =
            add_brand_with_colors(&doc, "initech", None, &colors, Some(RadiusSize::Md)).unwrap();
        let main = next
            .get_semantic(&["brand".into(), "primary".into(), "main".into()])
            .unwrap()
            .as_multi()
            .unwrap();
        assert_eq!(main.brand_value("initech"), Some("{colors.blue.70}"));
        let radius = next
            .get_semantic(&["brand".into(), "radius".into(), "interactive".into()])
            .unwrap()
            .as_multi()
            .unwrap();
        assert_eq!(radius.brand_value("initech"), Some("{radius.sm}"));
    }

    #[test]
    fn test_remove_brand_guards_last() {
        let doc = document();
        let next = remove_brand(&doc, "globex").unwrap();
        assert_eq!(next.brand_names(), vec!["acme"]);
        assert!(matches!(
            remove_brand(&next, "acme"),
            Err(EditError::LastBrand)
        ));
        assert!(matches!(
            remove_brand(&doc, "initech"),
            Err(EditError::UnknownBrand(_))
        ));
    }

    #[test]
    fn test_rename_brand_keeps_position_and_theme() {
        let doc = document();
        let next = rename_brand(&doc, "acme", "umbrella").unwrap();
        assert_eq!(next.brand_names(), vec!["umbrella", "globex"]);
        let theme = next
            .get_semantic(&["brand".into(), "theme".into()])
            .unwrap()
            .as_multi()
            .unwrap();
        assert_eq!(theme.brand_value("umbrella"), Some("umbrella"));
    }

    #[test]
    fn test_add_color_family_installs_sixteen_steps() {
        let doc = document();
        // Invalid hex surfaces as a color error after name validation
        let bad = PaletteConfig {
            base_color: "#zz8787".to_string(),
            family_name: "teal".to_string(),
            ..PaletteConfig::default()
        };
        assert!(matches!(
            add_color_family(&doc, &bad),
            Err(EditError::Color(_))
        ));

        let config = PaletteConfig {
            base_color: "#218787".to_string(),
            family_name: "teal".to_string(),
            ..PaletteConfig::default()
        };
        let next = add_color_family(&doc, &config).unwrap();
        let steps = family_steps(&next, "teal");
        assert_eq!(steps.len(), 16);
        assert_eq!(steps.first().copied(), Some(5));
        assert_eq!(steps.last().copied(), Some(600));
    }

    #[test]
    fn test_add_color_family_rejects_bad_names() {
        let doc = document();
        for name in ["", "Blue", "neutral", "1teal", "has space"] {
            let config = PaletteConfig {
                base_color: "#218787".to_string(),
                family_name: name.to_string(),
                ..PaletteConfig::default()
            };
            assert!(
                matches!(add_color_family(&doc, &config), Err(EditError::InvalidFamilyName(_))),
                "expected rejection for {name:?}"
            );
        }
    }

    #[test]
    fn test_remove_color_family() {
        let doc = document();
        let next = remove_color_family(&doc, "blue").unwrap();
        assert!(family_steps(&next, "blue").is_empty());
        assert!(matches!(
            remove_color_family(&next, "blue"),
            Err(EditError::UnknownFamily(_))
        ));
    }

    #[test]
    fn test_global_token_crud() {
        let doc = document();
        let next =
            set_global_token(&doc, "spacing.sm", "8", TokenType::Number).unwrap();
        assert_eq!(
            next.get_global(&["spacing".into(), "sm".into()]).unwrap().literal(),
            Some("8".to_string())
        );

        let next = update_global_token(&next, "spacing.sm", "10").unwrap();
        assert_eq!(
            next.get_global(&["spacing".into(), "sm".into()]).unwrap().literal(),
            Some("10".to_string())
        );

        let next = remove_global_token(&next, "spacing.sm").unwrap();
        assert!(next.get_global(&["spacing".into(), "sm".into()]).is_none());

        assert!(matches!(
            update_global_token(&doc, "spacing.missing", "1"),
            Err(EditError::UnknownPath(_))
        ));
    }

    #[test]
    fn test_color_families_skip_neutral_and_sample_seventy() {
        let doc = document();
        let families = color_families(&doc);
        assert_eq!(families.len(), 1);
        assert_eq!(families[0].name, "blue");
        assert_eq!(families[0].steps, vec![5, 70, 80]);
        assert_eq!(families[0].sample_hex, "#0072ef");
    }

    #[test]
    fn test_color_selection_validity() {
        let doc = document();
        assert!(is_valid_color_selection(&doc, &ColorSelection::new("blue", 70)));
        // On the lattice but not in the ramp
        assert!(!is_valid_color_selection(&doc, &ColorSelection::new("blue", 90)));
        // Off the lattice entirely
        assert!(!is_valid_color_selection(&doc, &ColorSelection::new("blue", 75)));
        assert!(!is_valid_color_selection(&doc, &ColorSelection::new("teal", 70)));
    }
}
