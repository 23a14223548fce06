//! Stylesheet emission: configuration → width-gated declaration blocks.
//!
//! The base block carries no width gate. Each tier with enabled content
//! adds blocks after it, narrowest first. In cascade mode a tier block
//! only holds what the tier itself sets and is gated by `min-width`; in
//! exact mode it holds the fully merged values and is also bounded by
//! `max-width`, so blocks never overlap.
//!
//! Item blocks at a tier always state all four grid lines (through
//! `grid-area`, the four longhands, or both shorthands) so a placement
//! from an earlier block cannot leak into a different variant.

use crate::breakpoint::{TierSize, TierTable};
use crate::model::{BreakpointMode, ContainerProperty, LayoutConfig, StyleMap};
use crate::placement::{ResolvedPlacement, resolve_placement};
use crate::resolve::{container_declarations, item_declarations, resolve_layout};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt::Write;

// ─── Config ───────────────────────────────────────────────────────────────

/// Configuration for [`emit_stylesheet`].
#[derive(Debug, Clone)]
pub struct EmitConfig {
    /// Selector for the grid container. Default: `.grid`.
    pub container_selector: String,

    /// Selector for one item; `{id}` is replaced by the item id.
    /// Default: `.grid > [data-grid-item="{id}"]`.
    pub item_selector: String,

    /// Tier table to gate blocks with. `None` uses the configuration's own.
    pub tiers: Option<TierTable>,
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            container_selector: ".grid".to_string(),
            item_selector: ".grid > [data-grid-item=\"{id}\"]".to_string(),
            tiers: None,
        }
    }
}

impl EmitConfig {
    pub fn item_selector_for(&self, id: &str) -> String {
        self.item_selector.replace("{id}", id)
    }
}

// ─── Blocks ──────────────────────────────────────────────────────────────

/// One selector's declarations, optionally gated by viewport width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationBlock {
    pub selector: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<TierSize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    pub declarations: StyleMap,
}

impl DeclarationBlock {
    /// The `@media` condition, or `None` for an ungated block.
    pub fn media_query(&self) -> Option<String> {
        let mut parts = Vec::with_capacity(2);
        if let Some(min) = self.min_width {
            parts.push(format!("(min-width: {min}px)"));
        }
        if let Some(max) = self.max_width {
            parts.push(format!("(max-width: {max}px)"));
        }
        (!parts.is_empty()).then(|| parts.join(" and "))
    }
}

/// Build every declaration block for `config`, base first.
#[must_use]
pub fn declaration_blocks(config: &LayoutConfig, emit: &EmitConfig) -> Vec<DeclarationBlock> {
    let config: Cow<'_, LayoutConfig> = match emit.tiers {
        Some(table) if table != config.tier_table => {
            let mut owned = config.clone();
            owned.tier_table = table;
            Cow::Owned(owned)
        }
        _ => Cow::Borrowed(config),
    };
    let mode = config.breakpoint_mode;
    let mut blocks = Vec::new();

    // Base: no gate, base values only.
    let base = config.container.normalized();
    let base_named = config.use_named_areas
        && base
            .get(ContainerProperty::Areas)
            .and_then(crate::areas::parse_areas)
            .is_some();
    blocks.push(DeclarationBlock {
        selector: emit.container_selector.clone(),
        tier: None,
        min_width: None,
        max_width: None,
        declarations: container_declarations(&base, config.use_named_areas, true),
    });

    let base_placements: Vec<ResolvedPlacement> = config
        .items
        .iter()
        .map(|item| resolve_placement(&item.placement.to_placement(), base_named))
        .collect();
    for (item, placement) in config.items.iter().zip(&base_placements) {
        let declarations = item_declarations(item, placement);
        if !declarations.is_empty() {
            blocks.push(DeclarationBlock {
                selector: emit.item_selector_for(&item.id),
                tier: None,
                min_width: None,
                max_width: None,
                declarations,
            });
        }
    }

    // Placement in effect just below the current tier, per item.
    let mut effective = base_placements.clone();

    for tier in config.tiers() {
        let container_on = config.tier_enabled(tier.size);
        let item_on = |i: usize| {
            config.items[i]
                .breakpoints
                .get(&tier.size)
                .is_some_and(|o| o.enabled)
        };
        if !container_on && !(0..config.items.len()).any(item_on) {
            continue;
        }

        let min_width = (tier.min_width > 0).then_some(tier.min_width);
        let max_width = match mode {
            BreakpointMode::Exact => tier.max_width,
            BreakpointMode::Cascade => None,
        };
        let gated = |selector: String, declarations: StyleMap| DeclarationBlock {
            selector,
            tier: Some(tier.size),
            min_width,
            max_width,
            declarations,
        };

        if let Some(over) = config.breakpoints.get(&tier.size).filter(|o| o.enabled) {
            let (props, with_defaults) = match mode {
                BreakpointMode::Cascade => (over.props.normalized(), false),
                BreakpointMode::Exact => {
                    let mut merged = base.clone();
                    merged.apply(&over.props);
                    (merged, true)
                }
            };
            let mut declarations =
                container_declarations(&props, config.use_named_areas, with_defaults);
            let areas_css = ContainerProperty::Areas.css_name();
            if config.use_named_areas
                && props.get(ContainerProperty::Areas).is_some()
                && !declarations.contains_key(areas_css)
            {
                declarations.insert(areas_css, "none".to_string());
            }
            if !declarations.is_empty() {
                blocks.push(gated(emit.container_selector.clone(), declarations));
            }
        }

        let at_tier = resolve_layout(&config, tier.min_width);
        for (i, (item, resolved)) in config.items.iter().zip(at_tier.items).enumerate() {
            let previous = match mode {
                BreakpointMode::Exact => &base_placements[i],
                BreakpointMode::Cascade => &effective[i],
            };
            if item_on(i) || resolved.placement != *previous {
                log::trace!("item {:?} gets a {} block", item.id, tier.size);
                blocks.push(gated(
                    emit.item_selector_for(&item.id),
                    placement_reset_style(&resolved.placement),
                ));
            }
            effective[i] = resolved.placement;
        }
    }

    log::debug!("built {} declaration blocks", blocks.len());
    blocks
}

/// Declarations that fully determine an item's four grid lines.
fn placement_reset_style(placement: &ResolvedPlacement) -> StyleMap {
    let auto = |v: &Option<String>| v.clone().unwrap_or_else(|| "auto".to_string());
    let mut style = StyleMap::new();
    match placement {
        ResolvedPlacement::Empty => {
            style.insert("grid-area", "auto".to_string());
        }
        ResolvedPlacement::Area { name } => {
            style.insert("grid-area", name.clone());
        }
        ResolvedPlacement::Lines {
            column_start,
            column_end,
            row_start,
            row_end,
        } => {
            style.insert("grid-column-start", auto(column_start));
            style.insert("grid-column-end", auto(column_end));
            style.insert("grid-row-start", auto(row_start));
            style.insert("grid-row-end", auto(row_end));
        }
        ResolvedPlacement::Shorthand { column, row } => {
            style.insert("grid-column", auto(column));
            style.insert("grid-row", auto(row));
        }
    }
    style
}

// ─── Text ────────────────────────────────────────────────────────────────

/// Render `config` as stylesheet text.
///
/// Consecutive blocks that share a width gate are grouped into one
/// `@media` rule.
#[must_use]
pub fn emit_stylesheet(config: &LayoutConfig, emit: &EmitConfig) -> String {
    let blocks = declaration_blocks(config, emit);
    let mut out = String::new();
    let mut open_media: Option<String> = None;

    for block in &blocks {
        let media = block.media_query();
        if media != open_media {
            if open_media.is_some() {
                out.push_str("}\n");
            }
            if !out.is_empty() {
                out.push('\n');
            }
            if let Some(query) = &media {
                let _ = writeln!(out, "@media {query} {{");
            }
            open_media = media;
        } else if !out.is_empty() {
            out.push('\n');
        }
        let depth = usize::from(open_media.is_some());
        emit_rule(&mut out, &block.selector, &block.declarations, depth);
    }
    if open_media.is_some() {
        out.push_str("}\n");
    }
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn emit_rule(out: &mut String, selector: &str, declarations: &StyleMap, depth: usize) {
    indent(out, depth);
    let _ = writeln!(out, "{selector} {{");
    // `display` leads so the block reads naturally.
    if let Some(display) = declarations.get("display") {
        indent(out, depth + 1);
        let _ = writeln!(out, "display: {display};");
    }
    for (name, value) in declarations.iter().filter(|(k, _)| **k != "display") {
        indent(out, depth + 1);
        let _ = writeln!(out, "{name}: {value};");
    }
    indent(out, depth);
    out.push_str("}\n");
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GridItem, ItemTierOverride, TierOverrides};
    use crate::placement::{PlacementType, RawPlacement};
    use pretty_assertions::assert_eq;

    fn with_tiers(mode: BreakpointMode) -> LayoutConfig {
        let mut config = LayoutConfig {
            breakpoint_mode: mode,
            ..Default::default()
        };
        config.container.set(ContainerProperty::Columns, "1fr");
        config.container.set(ContainerProperty::Gap, "4px");
        let mut md = TierOverrides {
            enabled: true,
            ..Default::default()
        };
        md.props.set(ContainerProperty::Columns, "repeat(2, 1fr)");
        config.breakpoints.insert(TierSize::Md, md);
        config
    }

    #[test]
    fn cascade_stylesheet() {
        let css = emit_stylesheet(&with_tiers(BreakpointMode::Cascade), &EmitConfig::default());
        assert_eq!(
            css,
            ".grid {\n  display: grid;\n  gap: 4px;\n  grid-template-columns: 1fr;\n}\n\n\
             @media (min-width: 768px) {\n  .grid {\n    grid-template-columns: 1fr 1fr;\n  }\n}\n"
        );
    }

    #[test]
    fn exact_blocks_are_merged_and_bounded() {
        let blocks = declaration_blocks(&with_tiers(BreakpointMode::Exact), &EmitConfig::default());
        assert_eq!(blocks.len(), 2);
        let md = &blocks[1];
        assert_eq!(md.tier, Some(TierSize::Md));
        assert_eq!(md.media_query().as_deref(), Some("(min-width: 768px) and (max-width: 1023px)"));
        assert_eq!(md.declarations["gap"], "4px");
        assert_eq!(md.declarations["grid-template-columns"], "1fr 1fr");
        assert_eq!(md.declarations["display"], "grid");
    }

    #[test]
    fn disabled_tiers_emit_nothing() {
        let mut config = with_tiers(BreakpointMode::Cascade);
        config.breakpoints.get_mut(&TierSize::Md).unwrap().enabled = false;
        let blocks = declaration_blocks(&config, &EmitConfig::default());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].media_query(), None);
    }

    #[test]
    fn item_tier_block_states_every_line() {
        let mut config = with_tiers(BreakpointMode::Cascade);
        let mut item = GridItem {
            id: "card".into(),
            placement: RawPlacement {
                placement_type: PlacementType::Coordinates,
                column_start: Some("1".into()),
                row_start: Some("2".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        item.breakpoints.insert(
            TierSize::Lg,
            ItemTierOverride {
                enabled: true,
                placement: RawPlacement {
                    placement_type: PlacementType::Span,
                    column_start: Some("span 2".into()),
                    ..Default::default()
                },
            },
        );
        config.items.push(item);

        let emit = EmitConfig {
            item_selector: "#{id}".into(),
            ..Default::default()
        };
        let blocks = declaration_blocks(&config, &emit);
        let item_blocks: Vec<_> = blocks.iter().filter(|b| b.selector == "#card").collect();
        assert_eq!(item_blocks.len(), 2);
        assert_eq!(item_blocks[0].declarations["grid-row-start"], "2");
        assert_eq!(item_blocks[1].tier, Some(TierSize::Lg));
        assert_eq!(item_blocks[1].declarations["grid-column"], "span 2");
        assert_eq!(item_blocks[1].declarations["grid-row"], "auto");
    }

    #[test]
    fn tier_with_broken_areas_resets_the_template() {
        let mut config = with_tiers(BreakpointMode::Cascade);
        config.use_named_areas = true;
        config.container.set(ContainerProperty::Areas, "\"a b\"");
        config
            .breakpoints
            .get_mut(&TierSize::Md)
            .unwrap()
            .props
            .set(ContainerProperty::Areas, "\"a b\" \"c\"");
        config.items.push(GridItem {
            id: "x".into(),
            placement: RawPlacement {
                placement_type: PlacementType::Area,
                grid_area: Some("a".into()),
                ..Default::default()
            },
            ..Default::default()
        });

        let blocks = declaration_blocks(&config, &EmitConfig::default());
        let md: Vec<_> = blocks.iter().filter(|b| b.tier == Some(TierSize::Md)).collect();
        assert_eq!(md[0].declarations["grid-template-areas"], "none");
        // The item loses its area once named areas switch off.
        assert_eq!(md[1].declarations["grid-area"], "auto");
    }

    #[test]
    fn device_tiers_override() {
        let mut config = LayoutConfig::default();
        config.breakpoints.insert(
            TierSize::Xxxl,
            TierOverrides {
                enabled: true,
                props: {
                    let mut p = crate::model::ContainerProps::default();
                    p.set(ContainerProperty::MaxWidth, "1800px");
                    p
                },
            },
        );
        assert_eq!(declaration_blocks(&config, &EmitConfig::default()).len(), 1);

        let emit = EmitConfig {
            tiers: Some(TierTable::Device),
            ..Default::default()
        };
        let blocks = declaration_blocks(&config, &emit);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].min_width, Some(1920));
        assert_eq!(blocks[1].declarations["max-width"], "1800px");
    }
}
