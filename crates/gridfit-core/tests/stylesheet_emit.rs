//! Integration tests: JSON configuration → declaration blocks → CSS text.

use gridfit_core::{
    BreakpointMode, EmitConfig, LayoutConfig, TierSize, declaration_blocks, emit_stylesheet,
};
use pretty_assertions::assert_eq;

fn dashboard() -> LayoutConfig {
    LayoutConfig::from_json(include_str!("fixtures/dashboard.json")).unwrap()
}

fn emit() -> EmitConfig {
    EmitConfig {
        container_selector: "#dash".into(),
        item_selector: "#dash > .{id}".into(),
        ..Default::default()
    }
}

#[test]
fn cascade_blocks_follow_tier_order() {
    let blocks = declaration_blocks(&dashboard(), &emit());
    let summary: Vec<(&str, Option<TierSize>)> = blocks
        .iter()
        .map(|b| (b.selector.as_str(), b.tier))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("#dash", None),
            ("#dash > .header", None),
            ("#dash > .main", None),
            ("#dash > .aside", None),
            ("#dash > .footer", None),
            ("#dash", Some(TierSize::Md)),
            ("#dash > .aside", Some(TierSize::Md)),
            ("#dash", Some(TierSize::Lg)),
        ]
    );

    let md = &blocks[5];
    assert_eq!(md.min_width, Some(768));
    assert_eq!(md.max_width, None);
    // Cascade blocks only carry what the tier sets.
    assert!(!md.declarations.contains_key("display"));
    assert!(!md.declarations.contains_key("align-items"));
    assert_eq!(md.declarations["gap"], "16px");

    let aside = &blocks[6];
    assert_eq!(aside.declarations["grid-column-start"], "2");
    assert_eq!(aside.declarations["grid-column-end"], "auto");
    assert_eq!(aside.declarations["grid-row-end"], "span 2");
}

#[test]
fn exact_blocks_are_bounded_and_complete() {
    let mut config = dashboard();
    config.breakpoint_mode = BreakpointMode::Exact;
    let blocks = declaration_blocks(&config, &emit());

    let lg_container = blocks
        .iter()
        .find(|b| b.tier == Some(TierSize::Lg) && b.selector == "#dash")
        .unwrap();
    assert_eq!(
        lg_container.media_query().as_deref(),
        Some("(min-width: 1024px) and (max-width: 1279px)")
    );
    assert_eq!(lg_container.declarations["display"], "grid");
    assert_eq!(lg_container.declarations["align-items"], "start");
    assert_eq!(lg_container.declarations["gap"], "24px");

    // In exact mode the md placement for `aside` does not reach lg.
    let lg_items: Vec<_> = blocks
        .iter()
        .filter(|b| b.tier == Some(TierSize::Lg) && b.selector != "#dash")
        .collect();
    assert!(lg_items.is_empty());
}

#[test]
fn stylesheet_text() {
    let css = emit_stylesheet(&dashboard(), &emit());
    assert!(css.starts_with("#dash {\n  display: grid;\n"));
    assert!(css.contains("#dash > .main {\n  grid-area: main;\n  z-index: 1;\n}\n"));
    assert!(css.contains(
        "@media (min-width: 768px) {\n  #dash {\n    gap: 16px;\n"
    ));
    assert!(css.contains("  #dash > .aside {\n    grid-column-end: auto;\n"));
    assert!(css.contains(
        "@media (min-width: 1024px) {\n  #dash {\n    gap: 24px;\n    grid-template-areas: \"header header header\" \"main main aside\" \"footer footer footer\";\n"
    ));
    assert!(css.ends_with("  }\n}\n"));
    assert_eq!(css.matches("@media").count(), 2);
}
