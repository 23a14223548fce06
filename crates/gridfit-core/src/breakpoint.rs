//! Viewport-width tiers.
//!
//! Two static tables exist: the six-tier standard set used for resolution
//! and an eight-tier device set. Both start at 0, so every non-negative
//! width falls into exactly one tier.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Tier identifier. Ordered narrowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierSize {
    Xxs,
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
    Xxl,
    Xxxl,
}

impl TierSize {
    pub fn as_str(self) -> &'static str {
        match self {
            TierSize::Xxs => "xxs",
            TierSize::Xs => "xs",
            TierSize::Sm => "sm",
            TierSize::Md => "md",
            TierSize::Lg => "lg",
            TierSize::Xl => "xl",
            TierSize::Xxl => "xxl",
            TierSize::Xxxl => "xxxl",
        }
    }
}

impl fmt::Display for TierSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tier: an inclusive width range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointTier {
    pub size: TierSize,
    pub min_width: u32,
    /// `None` for the widest tier.
    pub max_width: Option<u32>,
    pub label: &'static str,
}

impl BreakpointTier {
    pub fn contains(&self, width: u32) -> bool {
        width >= self.min_width && self.max_width.is_none_or(|max| width <= max)
    }
}

const fn tier(
    size: TierSize,
    min_width: u32,
    max_width: Option<u32>,
    label: &'static str,
) -> BreakpointTier {
    BreakpointTier {
        size,
        min_width,
        max_width,
        label,
    }
}

pub static STANDARD_TIERS: [BreakpointTier; 6] = [
    tier(TierSize::Xs, 0, Some(639), "Extra small"),
    tier(TierSize::Sm, 640, Some(767), "Small"),
    tier(TierSize::Md, 768, Some(1023), "Medium"),
    tier(TierSize::Lg, 1024, Some(1279), "Large"),
    tier(TierSize::Xl, 1280, Some(1535), "Extra large"),
    tier(TierSize::Xxl, 1536, None, "2x large"),
];

pub static DEVICE_TIERS: [BreakpointTier; 8] = [
    tier(TierSize::Xxs, 0, Some(359), "Small phone"),
    tier(TierSize::Xs, 360, Some(639), "Phone"),
    tier(TierSize::Sm, 640, Some(767), "Large phone"),
    tier(TierSize::Md, 768, Some(1023), "Tablet"),
    tier(TierSize::Lg, 1024, Some(1279), "Laptop"),
    tier(TierSize::Xl, 1280, Some(1535), "Desktop"),
    tier(TierSize::Xxl, 1536, Some(1919), "Wide desktop"),
    tier(TierSize::Xxxl, 1920, None, "Ultra wide"),
];

/// Which static table a configuration resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierTable {
    #[default]
    Standard,
    Device,
}

impl TierTable {
    pub fn tiers(self) -> &'static [BreakpointTier] {
        match self {
            TierTable::Standard => &STANDARD_TIERS,
            TierTable::Device => &DEVICE_TIERS,
        }
    }

    /// The active tier for `width`. Total because both tables start at 0.
    pub fn active(self, width: u32) -> &'static BreakpointTier {
        let tiers = self.tiers();
        active_breakpoint(tiers, width).unwrap_or(&tiers[0])
    }

    pub fn get(self, size: TierSize) -> Option<&'static BreakpointTier> {
        self.tiers().iter().find(|t| t.size == size)
    }
}

// ─── Active tier ─────────────────────────────────────────────────────────

/// Widest tier whose `min_width` is at most `width`.
pub fn active_breakpoint(tiers: &[BreakpointTier], width: u32) -> Option<&BreakpointTier> {
    tiers.iter().rev().find(|t| t.min_width <= width)
}

/// Extra width on each side of the current tier before a switch happens.
pub const HYSTERESIS_PX: u32 = 16;

/// Active tier with a dead band around the current one, so a width
/// oscillating near a boundary does not flip tiers on every change.
///
/// Stays on `current` while `width` is within its range widened by
/// [`HYSTERESIS_PX`]; otherwise moves to the tier that contains `width`.
/// If no tier contains it, `current` is kept.
pub fn active_breakpoint_with_hysteresis(
    tiers: &[BreakpointTier],
    width: u32,
    current: TierSize,
) -> TierSize {
    if let Some(cur) = tiers.iter().find(|t| t.size == current) {
        let lo = cur.min_width.saturating_sub(HYSTERESIS_PX);
        let hi = cur.max_width.map(|m| m.saturating_add(HYSTERESIS_PX));
        if width >= lo && hi.is_none_or(|h| width <= h) {
            return current;
        }
    }
    match tiers.iter().find(|t| t.contains(width)) {
        Some(next) => {
            log::trace!("tier {current} -> {} at {width}px", next.size);
            next.size
        }
        None => current,
    }
}

/// Marker classes for `width`: the active tier, `-up` for every tier that
/// starts at or below it, `-down` for every tier at or above it, and
/// `-only` for the active tier.
pub fn breakpoint_classes(
    tiers: &[BreakpointTier],
    width: u32,
    prefix: &str,
) -> SmallVec<[String; 16]> {
    let mut classes = SmallVec::new();
    let Some(active) = active_breakpoint(tiers, width) else {
        return classes;
    };
    classes.push(format!("{prefix}{}", active.size));
    for t in tiers.iter().filter(|t| t.min_width <= width) {
        classes.push(format!("{prefix}{}-up", t.size));
    }
    for t in tiers.iter().filter(|t| t.min_width >= active.min_width) {
        classes.push(format!("{prefix}{}-down", t.size));
    }
    classes.push(format!("{prefix}{}-only", active.size));
    classes
}

// ─── Custom tiers ────────────────────────────────────────────────────────

/// Free-form tier from the legacy breakpoint list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomBreakpoint {
    pub label: String,
    pub min_width: u32,
}

/// Each `min_width` shared by more than one entry, ascending, once.
pub fn duplicate_min_widths(list: &[CustomBreakpoint]) -> Vec<u32> {
    let mut widths: Vec<u32> = list.iter().map(|b| b.min_width).collect();
    widths.sort_unstable();
    let mut dups: Vec<u32> = widths.windows(2).filter(|w| w[0] == w[1]).map(|w| w[0]).collect();
    dups.dedup();
    dups
}

/// Entry with the largest `min_width` at most `width`; first entry wins ties.
pub fn active_custom_breakpoint(list: &[CustomBreakpoint], width: u32) -> Option<&CustomBreakpoint> {
    list.iter()
        .filter(|b| b.min_width <= width)
        .fold(None, |best: Option<&CustomBreakpoint>, b| match best {
            Some(cur) if cur.min_width >= b.min_width => Some(cur),
            _ => Some(b),
        })
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn size_at(width: u32) -> TierSize {
        TierTable::Standard.active(width).size
    }

    #[test]
    fn zero_is_extra_small() {
        assert_eq!(size_at(0), TierSize::Xs);
        assert_eq!(TierTable::Device.active(0).size, TierSize::Xxs);
    }

    #[test]
    fn width_at_max_belongs_to_that_tier() {
        assert_eq!(size_at(767), TierSize::Sm);
        assert_eq!(size_at(768), TierSize::Md);
        assert_eq!(size_at(1023), TierSize::Md);
        assert_eq!(size_at(1024), TierSize::Lg);
        assert_eq!(size_at(1536), TierSize::Xxl);
        assert_eq!(size_at(100_000), TierSize::Xxl);
    }

    #[test]
    fn tables_are_contiguous() {
        for table in [TierTable::Standard, TierTable::Device] {
            let tiers = table.tiers();
            assert_eq!(tiers[0].min_width, 0);
            for pair in tiers.windows(2) {
                assert_eq!(pair[0].max_width, Some(pair[1].min_width - 1));
                assert!(pair[0].size < pair[1].size);
            }
            assert_eq!(tiers.last().unwrap().max_width, None);
        }
    }

    #[test]
    fn hysteresis_holds_inside_the_dead_band() {
        let tiers = &STANDARD_TIERS;
        // md is 768..=1023; lg starts at 1024.
        assert_eq!(active_breakpoint_with_hysteresis(tiers, 1030, TierSize::Md), TierSize::Md);
        assert_eq!(active_breakpoint_with_hysteresis(tiers, 1039, TierSize::Md), TierSize::Md);
        assert_eq!(active_breakpoint_with_hysteresis(tiers, 1040, TierSize::Md), TierSize::Lg);
        assert_eq!(active_breakpoint_with_hysteresis(tiers, 1010, TierSize::Lg), TierSize::Lg);
        assert_eq!(active_breakpoint_with_hysteresis(tiers, 1007, TierSize::Lg), TierSize::Md);
    }

    #[test]
    fn hysteresis_jumps_across_several_tiers() {
        assert_eq!(
            active_breakpoint_with_hysteresis(&STANDARD_TIERS, 2000, TierSize::Xs),
            TierSize::Xxl
        );
    }

    #[test]
    fn hysteresis_is_sticky_when_nothing_contains_the_width() {
        let gapped = [
            tier(TierSize::Sm, 100, Some(199), "a"),
            tier(TierSize::Lg, 500, None, "b"),
        ];
        assert_eq!(active_breakpoint_with_hysteresis(&gapped, 300, TierSize::Sm), TierSize::Sm);
        assert_eq!(active_breakpoint_with_hysteresis(&gapped, 10, TierSize::Lg), TierSize::Lg);
    }

    #[test]
    fn classes_for_medium() {
        let classes = breakpoint_classes(&STANDARD_TIERS, 800, "bp-");
        assert_eq!(
            classes.to_vec(),
            vec![
                "bp-md", "bp-xs-up", "bp-sm-up", "bp-md-up", "bp-md-down", "bp-lg-down",
                "bp-xl-down", "bp-xxl-down", "bp-md-only",
            ]
        );
    }

    #[test]
    fn classes_for_smallest_width() {
        let classes = breakpoint_classes(&STANDARD_TIERS, 0, "");
        assert_eq!(classes[0], "xs");
        assert_eq!(classes.iter().filter(|c| c.ends_with("-up")).count(), 1);
        assert_eq!(classes.iter().filter(|c| c.ends_with("-down")).count(), 6);
    }

    #[test]
    fn custom_breakpoint_lookup() {
        let list = vec![
            CustomBreakpoint { label: "phone".into(), min_width: 0 },
            CustomBreakpoint { label: "desk".into(), min_width: 900 },
            CustomBreakpoint { label: "tab".into(), min_width: 600 },
            CustomBreakpoint { label: "desk2".into(), min_width: 900 },
        ];
        assert_eq!(active_custom_breakpoint(&list, 650).map(|b| b.label.as_str()), Some("tab"));
        assert_eq!(active_custom_breakpoint(&list, 950).map(|b| b.label.as_str()), Some("desk"));
        assert_eq!(duplicate_min_widths(&list), vec![900]);
        assert_eq!(active_custom_breakpoint(&list[1..2], 10), None);
    }

    #[test]
    fn tier_size_serde_names() {
        let json = serde_json::to_string(&TierSize::Xxl).unwrap();
        assert_eq!(json, "\"xxl\"");
        let size: TierSize = serde_json::from_str("\"md\"").unwrap();
        assert_eq!(size, TierSize::Md);
    }
}
