//! Combining base values with per-tier overrides.
//!
//! In `exact` mode only the active tier may contribute. In `cascade` mode
//! every enabled tier at or below the width contributes, narrowest first,
//! each overwriting only the properties it sets.

use crate::breakpoint::{BreakpointTier, TierSize, active_breakpoint};
use crate::model::{BreakpointMode, ContainerProps, GridItem, LayoutConfig};
use crate::placement::RawPlacement;
use smallvec::SmallVec;

/// Tiers that contributed to a resolution, narrowest first.
pub type Sources = SmallVec<[TierSize; 8]>;

/// Container properties in effect at one width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProps {
    pub tier: TierSize,
    pub props: ContainerProps,
    pub sources: Sources,
}

/// Resolve container properties for `width` under the configured mode.
pub fn resolve_container_props(
    config: &LayoutConfig,
    tiers: &[BreakpointTier],
    width: u32,
) -> ResolvedProps {
    let mut props = config.container.normalized();
    let mut sources = Sources::new();
    let tier = active_breakpoint(tiers, width).map_or(TierSize::Xs, |t| t.size);

    match config.breakpoint_mode {
        BreakpointMode::Exact => {
            if let Some(over) = config.breakpoints.get(&tier).filter(|o| o.enabled) {
                props.apply(&over.props);
                sources.push(tier);
            }
        }
        BreakpointMode::Cascade => {
            for t in contributing_tiers(config, tiers, width) {
                if let Some(over) = config.breakpoints.get(&t) {
                    props.apply(&over.props);
                    sources.push(t);
                }
            }
        }
    }

    log::trace!("container at {width}px: tier {tier}, sources {sources:?}");
    ResolvedProps {
        tier,
        props,
        sources,
    }
}

/// Enabled tiers at or below `width`, narrowest first.
pub fn contributing_tiers(config: &LayoutConfig, tiers: &[BreakpointTier], width: u32) -> Sources {
    tiers
        .iter()
        .filter(|t| t.min_width <= width && config.tier_enabled(t.size))
        .map(|t| t.size)
        .collect()
}

/// The placement record in effect for `item` at `width`, and the tier it
/// came from (`None` for the base placement). Variants never mix.
pub fn resolve_item_placement<'a>(
    item: &'a GridItem,
    tiers: &[BreakpointTier],
    mode: BreakpointMode,
    width: u32,
) -> (&'a RawPlacement, Option<TierSize>) {
    let enabled = move |size: TierSize| item.breakpoints.get(&size).filter(|o| o.enabled);

    let chosen = match mode {
        BreakpointMode::Exact => active_breakpoint(tiers, width)
            .and_then(|t| enabled(t.size).map(|o| (&o.placement, t.size))),
        BreakpointMode::Cascade => tiers
            .iter()
            .rev()
            .filter(|t| t.min_width <= width)
            .find_map(|t| enabled(t.size).map(|o| (&o.placement, t.size))),
    };

    match chosen {
        Some((placement, size)) => (placement, Some(size)),
        None => (&item.placement, None),
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
