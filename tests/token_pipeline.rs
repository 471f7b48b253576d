//! Token Pipeline Integration Tests
//!
//! End-to-end coverage of the document model, color engine, alias
//! resolution, brand mutations, and the export/import cycle, all on an
//! in-memory document.

use color_engine::{
    generate_brand_colors, generate_palette, hex_to_oklch, oklch_to_hex, ColorSelection,
    PaletteConfig,
};
use serde_json::{json, Value};
use token_core::{editor, export, resolver, ExportOptions, RadiusSize};
use token_model::{StepLattice, TokenDocument};

fn seed_document() -> TokenDocument {
    TokenDocument::from_value(json!({
        "global": {
            "colors": {
                "blue": {
                    "5": { "$value": "#f2f8ff", "$type": "color" },
                    "70": { "$value": "#0072ef", "$type": "color" },
                    "80": { "$value": "#005ac2", "$type": "color" },
                    "400": { "$value": "#002f66", "$type": "color" }
                }
            },
            "radius": {
                "xs": { "$value": "2px", "$type": "borderRadius" },
                "sm": { "$value": "4px", "$type": "borderRadius" }
            }
        },
        "semantic": {
            "brand": {
                "primary": {
                    "main": {
                        "$value": { "acme": "{colors.blue.70}", "globex": "#aa0000" },
                        "$type": "color"
                    },
                    "dark": {
                        "$value": { "acme": "{colors.blue.400}", "globex": "#330000" },
                        "$type": "color"
                    }
                },
                "theme": {
                    "$value": { "acme": "acme", "globex": "globex" },
                    "$type": "string"
                }
            },
            "colors": {
                "background": {
                    "accent": {
                        "$value": { "acme": "{brand.primary.main}", "globex": "#ffffff" },
                        "$type": "color"
                    }
                }
            }
        }
    }))
    .unwrap()
}

/// Hex -> OKLCH -> hex is lossless for representable colors
#[test]
fn test_color_space_round_trip() {
    for hex in ["#0072ef", "#218787", "#aa0000", "#ffffff", "#000000", "#7f7f7f"] {
        let color = hex_to_oklch(hex).unwrap();
        assert_eq!(oklch_to_hex(color), hex, "round trip failed for {hex}");
    }
}

/// Palettes are 16 deterministic steps with strictly descending lightness
#[test]
fn test_palette_shape_and_determinism() {
    let config = PaletteConfig {
        base_color: "#218787".to_string(),
        family_name: "teal".to_string(),
        ..PaletteConfig::default()
    };
    let first = generate_palette(&config).unwrap();
    let second = generate_palette(&config).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 16);
    assert_eq!(first[0].name, "5");
    assert_eq!(first[15].name, "600");
    for pair in first.windows(2) {
        assert!(pair[0].lightness > pair[1].lightness);
    }
}

/// Offsets clamp into the lattice and snap to the nearest rung, with ties
/// going to the smaller rung
#[test]
fn test_lattice_snapping() {
    assert_eq!(StepLattice::clamp_and_snap(-5), 5);
    assert_eq!(StepLattice::clamp_and_snap(1000), 600);
    assert_eq!(StepLattice::nearest(150), 100);
    assert_eq!(StepLattice::nearest(15), 10);

    let colors = generate_brand_colors(
        &ColorSelection::new("blue", 70),
        &ColorSelection::new("blue", 70),
        &ColorSelection::new("blue", 70),
    );
    // 70 - 75 clamps to the bottom rung, 70 + 330 lands on 400
    assert_eq!(colors.primary.get("soft"), Some("{colors.blue.5}"));
    assert_eq!(colors.primary.get("dark"), Some("{colors.blue.400}"));
    assert_eq!(colors.primary.get("main"), Some("{colors.blue.70}"));
}

/// Aliases resolve globally first, then per brand through the semantic tier
#[test]
fn test_alias_resolution_per_brand() {
    let doc = seed_document();
    assert_eq!(resolver::resolve("{colors.blue.70}", &doc, "acme"), "#0072ef");
    assert_eq!(resolver::resolve("{brand.primary.main}", &doc, "acme"), "#0072ef");
    assert_eq!(resolver::resolve("{brand.primary.main}", &doc, "globex"), "#aa0000");
    // Two semantic hops
    assert_eq!(
        resolver::resolve("{colors.background.accent}", &doc, "acme"),
        "#0072ef"
    );
    // Unresolvable references come back unchanged
    assert_eq!(
        resolver::resolve("{colors.missing.70}", &doc, "acme"),
        "{colors.missing.70}"
    );
}

/// Reference cycles terminate at the depth budget instead of recursing
#[test]
fn test_alias_cycles_terminate() {
    let doc = TokenDocument::from_value(json!({
        "global": {
            "colors": {
                "a": { "5": { "$value": "{colors.b.5}", "$type": "color" } },
                "b": { "5": { "$value": "{colors.a.5}", "$type": "color" } }
            }
        },
        "semantic": {}
    }))
    .unwrap();
    let resolved = resolver::resolve("{colors.a.5}", &doc, "any");
    assert!(resolved.starts_with("{colors."));
}

/// Brand lifecycle: clone, rename, guard the last brand
#[test]
fn test_brand_lifecycle() {
    let doc = seed_document();

    // Add clones the template; theme identifies the new brand
    let doc = editor::add_brand(&doc, "initech", Some("globex")).unwrap();
    assert_eq!(doc.brand_names(), vec!["acme", "globex", "initech"]);
    assert_eq!(resolver::resolve("{brand.primary.main}", &doc, "initech"), "#aa0000");
    assert_eq!(resolver::resolve("{brand.theme}", &doc, "initech"), "initech");

    // Remove is fine while more than one brand remains
    let doc = editor::remove_brand(&doc, "globex").unwrap();
    let doc = editor::remove_brand(&doc, "initech").unwrap();
    assert!(matches!(
        editor::remove_brand(&doc, "acme"),
        Err(token_core::EditError::LastBrand)
    ));
}

/// The wizard path: generated ramp, generated role colors, radius preset
#[test]
fn test_brand_wizard_pipeline() {
    let doc = seed_document();
    let config = PaletteConfig {
        base_color: "#218787".to_string(),
        family_name: "teal".to_string(),
        ..PaletteConfig::default()
    };
    let doc = editor::add_color_family(&doc, &config).unwrap();
    assert_eq!(editor::family_steps(&doc, "teal").len(), 16);

    let colors = generate_brand_colors(
        &ColorSelection::new("teal", 70),
        &ColorSelection::new("teal", 80),
        &ColorSelection::new("teal", 70),
    );
    let doc =
        editor::add_brand_with_colors(&doc, "initech", None, &colors, Some(RadiusSize::Lg))
            .unwrap();

    // The generated main alias resolves into the new ramp
    let resolved = resolver::resolve("{brand.primary.main}", &doc, "initech");
    assert!(resolved.starts_with('#'), "expected a hex value, got {resolved}");
    assert_eq!(resolved, editor::color_value(&doc, "teal", 70).unwrap());
}

/// Per-brand exports narrow every multi-brand leaf to a single-key map
#[test]
fn test_per_brand_export_narrowing() {
    let doc = seed_document();
    let result = export::export_tokens(&doc, &ExportOptions::per_brand(["acme"])).unwrap();
    assert_eq!(result.files.len(), 1);
    assert_eq!(result.files[0].filename, "semantic-acme.json");

    let parsed: Value = serde_json::from_str(&result.files[0].content).unwrap();
    let value = parsed["semantic"]["brand"]["primary"]["main"]["$value"]
        .as_object()
        .unwrap();
    assert_eq!(value.len(), 1);
    assert_eq!(value["acme"], "{colors.blue.70}");
}

/// Export then import round-trips a brand's edits without touching others
#[test]
fn test_export_import_round_trip() {
    let doc = seed_document();
    let exported = export::export_tokens(&doc, &ExportOptions::per_brand(["acme"])).unwrap();
    let edited = exported.files[0]
        .content
        .replace("{colors.blue.70}", "{colors.blue.80}");

    let outcome = export::merge_brand_import(&doc, &edited).unwrap();
    assert_eq!(outcome.brand, "acme");
    assert_eq!(
        resolver::resolve("{brand.primary.main}", &outcome.document, "acme"),
        "#005ac2"
    );
    assert_eq!(
        resolver::resolve("{brand.primary.main}", &outcome.document, "globex"),
        "#aa0000"
    );
}

/// Serialization preserves key order and the $-prefixed leaf shape
#[test]
fn test_document_wire_fidelity() {
    let doc = seed_document();
    let serialized = doc.to_json_pretty().unwrap();
    let reparsed = TokenDocument::parse_str(&serialized).unwrap();
    assert_eq!(reparsed, doc);

    let value: Value = serde_json::from_str(&serialized).unwrap();
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["global", "semantic"]);
    let leaf = value["semantic"]["brand"]["primary"]["main"].as_object().unwrap();
    let leaf_keys: Vec<&String> = leaf.keys().collect();
    assert_eq!(leaf_keys, ["$value", "$type"]);
}
