//! Width → concrete container and item styles.
//!
//! Resolution never fails: malformed tracks degrade to `1fr`, unparseable
//! area text switches named areas off, and invalid placement lines are
//! dropped. [`crate::validate`] reports all of these separately.

use crate::areas::{AreaGrid, parse_areas};
use crate::breakpoint::TierSize;
use crate::cascade::{resolve_container_props, resolve_item_placement};
use crate::model::{ContainerProperty, ContainerProps, GridItem, LayoutConfig, StyleMap};
use crate::placement::ResolvedPlacement;
use crate::template::{Track, join_tracks, parse_template};
use serde::Serialize;

/// Container state at one width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedContainer {
    pub tier: TierSize,
    /// Tiers whose overrides were applied, narrowest first.
    pub sources: Vec<TierSize>,
    #[serde(skip)]
    pub props: ContainerProps,
    pub columns: Vec<Track>,
    /// Empty when no row template is configured.
    pub rows: Vec<Track>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub areas: Option<AreaGrid>,
    pub named_areas_active: bool,
    pub style: StyleMap,
}

/// One item at one width.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedItem {
    pub id: String,
    /// Tier whose placement was used; `None` for the base placement.
    pub source: Option<TierSize>,
    pub placement: ResolvedPlacement,
    pub style: StyleMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLayout {
    pub width: u32,
    pub container: ResolvedContainer,
    pub items: Vec<ResolvedItem>,
}

/// CSS declarations for a set of container properties.
///
/// With `with_defaults`, `display: grid` and a column template are always
/// present (the template falling back to `1fr`). Area text is only emitted
/// when `use_named_areas` is on and the text parses.
pub fn container_declarations(
    props: &ContainerProps,
    use_named_areas: bool,
    with_defaults: bool,
) -> StyleMap {
    let mut style = StyleMap::new();
    if with_defaults {
        style.insert("display", "grid".to_string());
        let columns = parse_template(props.get(ContainerProperty::Columns).unwrap_or(""));
        style.insert(ContainerProperty::Columns.css_name(), join_tracks(&columns));
    }

    for (prop, value) in props.iter() {
        let css = prop.css_name();
        match prop {
            ContainerProperty::Columns | ContainerProperty::Rows => {
                style.insert(css, join_tracks(&parse_template(value)));
            }
            ContainerProperty::Areas => {
                if !use_named_areas {
                    continue;
                }
                match parse_areas(value) {
                    Some(grid) => {
                        style.insert(css, grid.to_css());
                    }
                    None => log::debug!("area text does not parse; omitting {css}"),
                }
            }
            _ => {
                style.insert(css, value.to_string());
            }
        }
    }
    style
}

/// Resolve the container at `width`.
pub fn resolve_container(config: &LayoutConfig, width: u32) -> ResolvedContainer {
    let resolved = resolve_container_props(config, config.tiers(), width);
    let props = resolved.props;

    let columns = parse_template(props.get(ContainerProperty::Columns).unwrap_or(""));
    let rows = props
        .get(ContainerProperty::Rows)
        .map(parse_template)
        .unwrap_or_default();
    let areas = if config.use_named_areas {
        props.get(ContainerProperty::Areas).and_then(parse_areas)
    } else {
        None
    };
    let named_areas_active = areas.is_some();
    let style = container_declarations(&props, config.use_named_areas, true);

    log::debug!(
        "container at {width}px: tier {}, {} columns, named areas {}",
        resolved.tier,
        columns.len(),
        if named_areas_active { "on" } else { "off" }
    );

    ResolvedContainer {
        tier: resolved.tier,
        sources: resolved.sources.into_vec(),
        props,
        columns,
        rows,
        areas,
        named_areas_active,
        style,
    }
}

/// Style for an item given its resolved placement.
pub fn item_declarations(item: &GridItem, placement: &ResolvedPlacement) -> StyleMap {
    let mut style = placement.to_style_map();
    if let Some(z) = item.z_index {
        style.insert("z-index", z.to_string());
    }
    let mut put = |key: &'static str, value: &Option<String>| {
        if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            style.insert(key, v.to_string());
        }
    };
    put("justify-self", &item.justify_self);
    put("align-self", &item.align_self);
    style
}

/// Resolve one item at `width`.
pub fn resolve_item(
    config: &LayoutConfig,
    item: &GridItem,
    width: u32,
    named_areas_active: bool,
) -> ResolvedItem {
    let (raw, source) =
        resolve_item_placement(item, config.tiers(), config.breakpoint_mode, width);
    let placement = crate::placement::resolve_placement(&raw.to_placement(), named_areas_active);
    log::trace!("item {:?} at {width}px: {placement:?}", item.id);
    let style = item_declarations(item, &placement);
    ResolvedItem {
        id: item.id.clone(),
        source,
        placement,
        style,
    }
}

/// Resolve the container and every item at `width`.
pub fn resolve_layout(config: &LayoutConfig, width: u32) -> ResolvedLayout {
    let container = resolve_container(config, width);
    let items = config
        .items
        .iter()
        .map(|item| resolve_item(config, item, width, container.named_areas_active))
        .collect();
    ResolvedLayout {
        width,
        container,
        items,
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BreakpointMode, TierOverrides};
    use crate::placement::{PlacementType, RawPlacement};
    use pretty_assertions::assert_eq;

    fn config() -> LayoutConfig {
        let mut config = LayoutConfig {
            use_named_areas: true,
            ..Default::default()
        };
        config.container.set(ContainerProperty::Columns, "repeat(2, 1fr)");
        config.container.set(ContainerProperty::Areas, "\"head head\" \"side main\"");
        config.container.set(ContainerProperty::Gap, "8px");
        config.items.push(GridItem {
            id: "header".into(),
            placement: RawPlacement {
                placement_type: PlacementType::Area,
                grid_area: Some("head".into()),
                ..Default::default()
            },
            z_index: Some(2),
            ..Default::default()
        });
        config
    }

    #[test]
    fn container_style_has_display_and_tracks() {
        let c = resolve_container(&config(), 400);
        assert_eq!(c.tier, TierSize::Xs);
        assert_eq!(c.columns, vec!["1fr", "1fr"]);
        assert!(c.rows.is_empty());
        assert!(c.named_areas_active);
        assert_eq!(c.style["display"], "grid");
        assert_eq!(c.style["grid-template-columns"], "1fr 1fr");
        assert_eq!(c.style["grid-template-areas"], "\"head head\" \"side main\"");
        assert_eq!(c.style["gap"], "8px");
        assert!(!c.style.contains_key("grid-template-rows"));
    }

    #[test]
    fn missing_columns_default_to_one_fraction() {
        let c = resolve_container(&LayoutConfig::default(), 400);
        assert_eq!(c.columns, vec!["1fr"]);
        assert_eq!(c.style["grid-template-columns"], "1fr");
        assert_eq!(c.style.len(), 2);
    }

    #[test]
    fn broken_areas_switch_named_areas_off() {
        let mut cfg = config();
        cfg.container.set(ContainerProperty::Areas, "\"a b\" \"c\"");
        let layout = resolve_layout(&cfg, 400);
        assert!(!layout.container.named_areas_active);
        assert!(!layout.container.style.contains_key("grid-template-areas"));
        assert_eq!(layout.items[0].placement, ResolvedPlacement::Empty);
        assert_eq!(layout.items[0].style["z-index"], "2");
    }

    #[test]
    fn items_use_named_areas_when_active() {
        let layout = resolve_layout(&config(), 400);
        assert_eq!(
            layout.items[0].placement,
            ResolvedPlacement::Area { name: "head".into() }
        );
        assert_eq!(layout.items[0].style["grid-area"], "head");
        assert_eq!(layout.items[0].source, None);
    }

    #[test]
    fn tier_areas_turn_named_areas_on() {
        let mut cfg = config();
        cfg.container.areas = None;
        cfg.breakpoint_mode = BreakpointMode::Cascade;
        let mut over = TierOverrides {
            enabled: true,
            ..Default::default()
        };
        over.props.set(ContainerProperty::Areas, "head head\nside main");
        cfg.breakpoints.insert(TierSize::Md, over);

        assert!(!resolve_container(&cfg, 700).named_areas_active);
        let wide = resolve_layout(&cfg, 800);
        assert!(wide.container.named_areas_active);
        assert_eq!(wide.container.sources, vec![TierSize::Md]);
        assert_eq!(wide.items[0].style["grid-area"], "head");
    }

    #[test]
    fn self_alignment_is_emitted_trimmed() {
        let mut cfg = config();
        cfg.items[0].justify_self = Some(" center ".into());
        cfg.items[0].align_self = Some("  ".into());
        let item = resolve_item(&cfg, &cfg.items[0], 400, true);
        assert_eq!(item.style["justify-self"], "center");
        assert!(!item.style.contains_key("align-self"));
    }
}
