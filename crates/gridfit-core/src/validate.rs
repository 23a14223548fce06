//! Configuration diagnostics.
//!
//! Reports problems without changing anything; resolution runs the same
//! regardless. Diagnostics come out in a fixed order: base container,
//! tier overrides, base item placements, per-tier item placements, then
//! summary checks.

use crate::areas::{parse_areas, unique_area_names};
use crate::breakpoint::duplicate_min_widths;
use crate::model::{ContainerProperty, ContainerProps, GridItem, LayoutConfig};
use crate::placement::{PlacementField, PlacementType, RawPlacement, set_value};
use crate::resolve::{ResolvedContainer, resolve_container};
use crate::syntax::{
    GridLine, TrackToken, classify_track, is_auto_flow, is_content_alignment, is_gap,
    is_items_alignment, is_self_alignment, is_size_value, is_valid_area_name, parse_grid_line,
    parse_span,
};
use crate::template::parse_template;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Allowed `z-index` range.
pub const Z_INDEX_RANGE: std::ops::RangeInclusive<i64> = -999..=999;
pub const MIN_VIRTUALIZATION_THRESHOLD: u32 = 10;
pub const MAX_VIRTUALIZATION_THRESHOLD: u32 = 1000;

// ─── Diagnostic types ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The configuration cannot do what it asks for.
    Error,
    /// Likely a mistake; resolution degrades around it.
    Warning,
    /// Worth knowing, nothing is wrong.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        })
    }
}

/// A single finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Path of the offending value, e.g. `items[2].breakpoints.md.columnStart`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    pub severity: Severity,
    pub message: String,
    /// Short rule identifier (e.g. "track-syntax", "unknown-area").
    pub rule: &'static str,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.severity, self.rule)?;
        if let Some(path) = &self.property {
            write!(f, " {path}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// `true` if any diagnostic is an error.
pub fn has_errors(diags: &[Diagnostic]) -> bool {
    diags.iter().any(|d| d.severity == Severity::Error)
}

struct Report {
    diags: Vec<Diagnostic>,
}

impl Report {
    fn push(
        &mut self,
        severity: Severity,
        rule: &'static str,
        property: Option<String>,
        message: String,
    ) {
        self.diags.push(Diagnostic {
            property,
            severity,
            message,
            rule,
        });
    }

    fn error(&mut self, rule: &'static str, path: String, message: String) {
        self.push(Severity::Error, rule, Some(path), message);
    }

    fn warn(&mut self, rule: &'static str, path: String, message: String) {
        self.push(Severity::Warning, rule, Some(path), message);
    }

    fn info(&mut self, rule: &'static str, path: Option<String>, message: String) {
        self.push(Severity::Info, rule, path, message);
    }
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run every check over `config`.
#[must_use]
pub fn validate_config(config: &LayoutConfig) -> Vec<Diagnostic> {
    let mut report = Report { diags: Vec::new() };

    let base = resolve_container(config, 0);
    check_container(config, &config.container, "container", true, &mut report);
    check_area_tracks(&base, "container", &config.container, &mut report);

    check_tier_overrides(config, &mut report);
    check_custom_breakpoints(config, &mut report);

    let base_grid = GridContext::from_base(config);
    let mut seen_ids = HashSet::new();
    for (i, item) in config.items.iter().enumerate() {
        let path = format!("items[{i}]");
        check_placement(config, &item.placement, &path, &base_grid, &mut report);
        check_item_fields(item, &path, &mut seen_ids, &mut report);
    }

    for (i, item) in config.items.iter().enumerate() {
        check_item_tiers(config, item, i, &mut report);
    }

    check_summary(config, &mut report);

    log::debug!("validation produced {} diagnostics", report.diags.len());
    report.diags
}

// ─── Container ───────────────────────────────────────────────────────────

fn check_container(
    config: &LayoutConfig,
    props: &ContainerProps,
    prefix: &str,
    is_base: bool,
    report: &mut Report,
) {
    for prop in [ContainerProperty::Columns, ContainerProperty::Rows] {
        if let Some(value) = props.get(prop) {
            check_tracks(value, &format!("{prefix}.{}", prop.key()), report);
        }
    }

    for (prop, value) in props.iter() {
        let path = format!("{prefix}.{}", prop.key());
        let (ok, expected) = match prop {
            ContainerProperty::Gap => (is_gap(value), "one or two lengths"),
            ContainerProperty::ColumnGap | ContainerProperty::RowGap => {
                (crate::syntax::is_length(value), "a length")
            }
            ContainerProperty::MinHeight
            | ContainerProperty::MaxHeight
            | ContainerProperty::MinWidth
            | ContainerProperty::MaxWidth => (is_size_value(value), "a length or size keyword"),
            ContainerProperty::AutoFlow => (is_auto_flow(value), "row, column and/or dense"),
            ContainerProperty::JustifyItems | ContainerProperty::AlignItems => {
                (is_items_alignment(value), "an alignment keyword")
            }
            ContainerProperty::JustifyContent | ContainerProperty::AlignContent => {
                (is_content_alignment(value), "a content-distribution keyword")
            }
            ContainerProperty::AutoColumns | ContainerProperty::AutoRows => {
                let ok = parse_template(value)
                    .iter()
                    .all(|t| classify_track(t) == TrackToken::Size);
                (ok, "track sizes")
            }
            ContainerProperty::Columns | ContainerProperty::Rows | ContainerProperty::Areas => {
                continue;
            }
        };
        if !ok {
            let rule = match prop {
                ContainerProperty::AutoFlow
                | ContainerProperty::JustifyItems
                | ContainerProperty::AlignItems
                | ContainerProperty::JustifyContent
                | ContainerProperty::AlignContent => "keyword-value",
                ContainerProperty::AutoColumns | ContainerProperty::AutoRows => "track-syntax",
                _ => "length-syntax",
            };
            report.warn(rule, path, format!("`{value}` is not {expected}"));
        }
    }

    let areas_path = format!("{prefix}.areas");
    match props.get(ContainerProperty::Areas) {
        None if is_base && config.use_named_areas => {
            report.warn(
                "areas-missing",
                areas_path,
                "named areas are enabled but no area text is set".to_string(),
            );
        }
        None => {}
        Some(text) if config.use_named_areas => check_areas(text, &areas_path, report),
        Some(_) => report.info(
            "areas-disabled",
            Some(areas_path),
            "area text is ignored because named areas are disabled".to_string(),
        ),
    }
}

fn check_tracks(value: &str, path: &str, report: &mut Report) {
    for token in parse_template(value) {
        match classify_track(&token) {
            TrackToken::Size | TrackToken::LineNames(_) | TrackToken::AutoRepeat => {}
            TrackToken::BrokenRepeat => report.warn(
                "repeat-syntax",
                path.to_string(),
                format!("`{token}` could not be expanded"),
            ),
            TrackToken::Unknown => report.warn(
                "track-syntax",
                path.to_string(),
                format!("unrecognized track `{token}`"),
            ),
        }
    }
}

fn check_areas(text: &str, path: &str, report: &mut Report) {
    let Some(grid) = parse_areas(text) else {
        report.error(
            "areas-structure",
            path.to_string(),
            "area rows are missing, unterminated, or of unequal length; named areas are disabled"
                .to_string(),
        );
        return;
    };
    for name in unique_area_names(&grid) {
        if !is_valid_area_name(name.as_str()) {
            report.error(
                "area-name",
                path.to_string(),
                format!("`{name}` is not a valid area name"),
            );
        }
    }
}

/// Area grid dimensions against the explicit track counts at one width.
fn check_area_tracks(
    resolved: &ResolvedContainer,
    prefix: &str,
    own: &ContainerProps,
    report: &mut Report,
) {
    let Some(grid) = &resolved.areas else {
        return;
    };
    let touches = |p| own.get(p).is_some();
    if !(touches(ContainerProperty::Areas)
        || touches(ContainerProperty::Columns)
        || touches(ContainerProperty::Rows))
    {
        return;
    }
    if let Some(columns) = explicit_count(&resolved.columns) {
        if columns != grid.column_count() {
            report.warn(
                "areas-track-mismatch",
                format!("{prefix}.areas"),
                format!(
                    "areas have {} columns but the template defines {columns}",
                    grid.column_count()
                ),
            );
        }
    }
    if let Some(rows) = explicit_count(&resolved.rows) {
        if rows != grid.row_count() {
            report.warn(
                "areas-track-mismatch",
                format!("{prefix}.areas"),
                format!(
                    "areas have {} rows but the template defines {rows}",
                    grid.row_count()
                ),
            );
        }
    }
}

/// Number of sizing tracks, or `None` if unknown (empty or auto-repeat).
fn explicit_count(tracks: &[String]) -> Option<usize> {
    let mut count = 0;
    for token in tracks {
        match classify_track(token) {
            TrackToken::AutoRepeat => return None,
            TrackToken::LineNames(_) => {}
            _ => count += 1,
        }
    }
    (count > 0).then_some(count)
}

// ─── Breakpoints ─────────────────────────────────────────────────────────

fn check_tier_overrides(config: &LayoutConfig, report: &mut Report) {
    for (size, over) in &config.breakpoints {
        let prefix = format!("breakpoints.{size}");
        let Some(tier) = config.tier_table.get(*size) else {
            report.info(
                "tier-unknown",
                Some(prefix),
                format!("tier `{size}` is not part of the active tier table and is never applied"),
            );
            continue;
        };
        if !over.enabled {
            if !over.props.is_empty() {
                report.info(
                    "tier-disabled",
                    Some(prefix),
                    format!("tier `{size}` is disabled; its values are ignored"),
                );
            }
            continue;
        }
        check_container(config, &over.props, &prefix, false, report);
        let at_tier = resolve_container(config, tier.min_width);
        check_area_tracks(&at_tier, &prefix, &over.props, report);
    }
}

fn check_custom_breakpoints(config: &LayoutConfig, report: &mut Report) {
    let list = &config.custom_breakpoints;
    for width in duplicate_min_widths(list) {
        report.error(
            "duplicate-breakpoint",
            "customBreakpoints".to_string(),
            format!("more than one breakpoint starts at {width}px"),
        );
    }
    for (i, bp) in list.iter().enumerate() {
        if bp.label.trim().is_empty() {
            report.warn(
                "breakpoint-label",
                format!("customBreakpoints[{i}].label"),
                "breakpoint has no label".to_string(),
            );
        }
    }
}

// ─── Items ───────────────────────────────────────────────────────────────

/// What item placements are checked against.
struct GridContext {
    /// Area text is configured and parses.
    named_areas: bool,
    areas: BTreeSet<String>,
    line_names: BTreeSet<String>,
    columns: Option<usize>,
    rows: Option<usize>,
}

impl GridContext {
    fn from_base(config: &LayoutConfig) -> Self {
        Self::from_container(&resolve_container(config, 0))
    }

    fn from_container(c: &ResolvedContainer) -> Self {
        let areas: BTreeSet<String> = c
            .areas
            .as_ref()
            .map(|g| {
                unique_area_names(g)
                    .into_iter()
                    .map(|n| n.as_str().to_string())
                    .collect()
            })
            .unwrap_or_default();

        let mut line_names = BTreeSet::new();
        for area in &areas {
            line_names.insert(area.clone());
            line_names.insert(format!("{area}-start"));
            line_names.insert(format!("{area}-end"));
        }
        for token in c.columns.iter().chain(&c.rows) {
            if let TrackToken::LineNames(names) = classify_track(token) {
                line_names.extend(names);
            }
        }

        Self {
            named_areas: c.named_areas_active,
            areas,
            line_names,
            columns: explicit_count(&c.columns),
            rows: explicit_count(&c.rows),
        }
    }
}

fn check_placement(
    config: &LayoutConfig,
    raw: &RawPlacement,
    prefix: &str,
    ctx: &GridContext,
    report: &mut Report,
) {
    let field_path = |f: PlacementField| format!("{prefix}.{f}");

    match raw.placement_type {
        PlacementType::Auto => {}
        PlacementType::Area => {
            let area = set_value(raw.field(PlacementField::GridArea)).filter(|a| a != ".");
            let path = field_path(PlacementField::GridArea);
            match area {
                _ if !ctx.named_areas => {
                    let why = if config.use_named_areas {
                        "the area text does not parse"
                    } else {
                        "named areas are disabled"
                    };
                    report.error(
                        "area-without-named-areas",
                        path,
                        format!("area placement has no effect because {why}"),
                    );
                }
                None => report.warn(
                    "area-missing-name",
                    path,
                    "area placement has no area name".to_string(),
                ),
                Some(name) if !is_valid_area_name(&name) => report.error(
                    "area-name",
                    path,
                    format!("`{name}` is not a valid area name"),
                ),
                Some(name) if !ctx.areas.contains(&name) => report.warn(
                    "unknown-area",
                    path,
                    format!("area `{name}` is not defined in the area text"),
                ),
                Some(_) => {}
            }
        }
        PlacementType::Coordinates => {
            for field in &PlacementField::ALL[1..] {
                if let Some(value) = set_value(raw.field(*field)) {
                    check_line(&value, *field, &field_path(*field), ctx, report);
                }
            }
        }
        PlacementType::Span => {
            let axes = [
                (PlacementField::ColumnStart, PlacementField::ColumnEnd),
                (PlacementField::RowStart, PlacementField::RowEnd),
            ];
            for (start_field, end_field) in axes {
                let start = set_value(raw.field(start_field));
                let end = set_value(raw.field(end_field));
                match &start {
                    Some(s) if s.contains("span") => {
                        if parse_span(s).is_none() {
                            report.warn(
                                "span-syntax",
                                field_path(start_field),
                                format!("`{s}` is not `span N` with N ≥ 1"),
                            );
                        }
                        if end.is_some() {
                            report.info(
                                "span-end-ignored",
                                Some(field_path(end_field)),
                                format!("`{end_field}` is ignored when `{start_field}` is a span"),
                            );
                        }
                    }
                    Some(s) => check_line(s, start_field, &field_path(start_field), ctx, report),
                    None => {}
                }
                if let (Some(e), Some(s)) = (&end, &start) {
                    if !s.contains("span") {
                        check_line(e, end_field, &field_path(end_field), ctx, report);
                    }
                }
            }
        }
    }

    for field in raw.ignored_fields() {
        report.info(
            "ignored-field",
            Some(field_path(field)),
            format!(
                "`{field}` is not used by {} placement and is ignored",
                placement_name(raw.placement_type)
            ),
        );
    }
}

fn placement_name(t: PlacementType) -> &'static str {
    match t {
        PlacementType::Auto => "auto",
        PlacementType::Area => "area",
        PlacementType::Coordinates => "coordinate",
        PlacementType::Span => "span",
    }
}

fn check_line(
    value: &str,
    field: PlacementField,
    path: &str,
    ctx: &GridContext,
    report: &mut Report,
) {
    match parse_grid_line(value) {
        None => report.warn(
            "grid-line",
            path.to_string(),
            format!("`{value}` is not a valid grid line"),
        ),
        Some(GridLine::Name(name)) if !ctx.line_names.contains(&name) => report.warn(
            "undefined-line-name",
            path.to_string(),
            format!("line `{name}` is not defined by any area or line-name group"),
        ),
        Some(GridLine::Number(n)) => {
            let tracks = match field {
                PlacementField::ColumnStart | PlacementField::ColumnEnd => ctx.columns,
                PlacementField::RowStart | PlacementField::RowEnd | PlacementField::GridArea => {
                    ctx.rows
                }
            };
            if let Some(tracks) = tracks {
                let lines = tracks as u64 + 1;
                if n.unsigned_abs() > lines {
                    report.info(
                        "implicit-line",
                        Some(path.to_string()),
                        format!(
                            "line {n} is outside the explicit grid ({lines} lines); implicit tracks are created"
                        ),
                    );
                }
            }
        }
        Some(_) => {}
    }
}

fn check_item_fields(
    item: &GridItem,
    prefix: &str,
    seen_ids: &mut HashSet<String>,
    report: &mut Report,
) {
    if let Some(z) = item.z_index {
        if !Z_INDEX_RANGE.contains(&z) {
            report.warn(
                "z-index-range",
                format!("{prefix}.zIndex"),
                format!(
                    "z-index {z} is outside {}..={}",
                    Z_INDEX_RANGE.start(),
                    Z_INDEX_RANGE.end()
                ),
            );
        }
    }
    for (key, value) in [("justifySelf", &item.justify_self), ("alignSelf", &item.align_self)] {
        if let Some(v) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            if !is_self_alignment(v) {
                report.warn(
                    "keyword-value",
                    format!("{prefix}.{key}"),
                    format!("`{v}` is not an alignment keyword"),
                );
            }
        }
    }
    if !item.id.is_empty() && !seen_ids.insert(item.id.clone()) {
        report.warn(
            "duplicate-item-id",
            format!("{prefix}.id"),
            format!("item id `{}` is used more than once", item.id),
        );
    }
}

fn check_item_tiers(config: &LayoutConfig, item: &GridItem, index: usize, report: &mut Report) {
    for (size, over) in &item.breakpoints {
        let prefix = format!("items[{index}].breakpoints.{size}");
        let Some(tier) = config.tier_table.get(*size) else {
            report.info(
                "tier-unknown",
                Some(prefix),
                format!("tier `{size}` is not part of the active tier table and is never applied"),
            );
            continue;
        };
        if !over.enabled {
            if over.placement.has_values() {
                report.info(
                    "tier-disabled",
                    Some(prefix),
                    format!("tier `{size}` is disabled; its placement is ignored"),
                );
            }
            continue;
        }
        let ctx = GridContext::from_container(&resolve_container(config, tier.min_width));
        check_placement(config, &over.placement, &prefix, &ctx, report);
    }
}

// ─── Summary ─────────────────────────────────────────────────────────────

fn check_summary(config: &LayoutConfig, report: &mut Report) {
    let count = config.items.len();
    if count == 0 {
        report.info("no-items", None, "the grid has no items".to_string());
    }

    let virt = &config.virtualization;
    if !virt.enabled {
        if count > virt.threshold as usize {
            report.info(
                "virtualization-advised",
                Some("virtualization.enabled".to_string()),
                format!(
                    "{count} items exceed the threshold of {}; consider enabling virtualization",
                    virt.threshold
                ),
            );
        }
    } else if virt.threshold < MIN_VIRTUALIZATION_THRESHOLD {
        report.warn(
            "virtualization-threshold",
            "virtualization.threshold".to_string(),
            format!("threshold {} is below {MIN_VIRTUALIZATION_THRESHOLD}", virt.threshold),
        );
    } else if virt.threshold > MAX_VIRTUALIZATION_THRESHOLD {
        report.warn(
            "virtualization-threshold",
            "virtualization.threshold".to_string(),
            format!("threshold {} is above {MAX_VIRTUALIZATION_THRESHOLD}", virt.threshold),
        );
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
