//! Per-item placement: raw fields → tagged variant → resolved output.
//!
//! The external record is flat (`placementType` plus five optional
//! strings). It is converted into [`ItemPlacement`], which only carries the
//! fields its variant uses, and resolved into exactly one
//! [`ResolvedPlacement`] shape.

use crate::model::StyleMap;
use crate::syntax::parse_grid_line;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Input ───────────────────────────────────────────────────────────────

/// The placement variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementType {
    #[default]
    Auto,
    Area,
    Coordinates,
    Span,
}

/// One of the five raw placement fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementField {
    GridArea,
    ColumnStart,
    ColumnEnd,
    RowStart,
    RowEnd,
}

impl PlacementField {
    pub const ALL: [PlacementField; 5] = [
        PlacementField::GridArea,
        PlacementField::ColumnStart,
        PlacementField::ColumnEnd,
        PlacementField::RowStart,
        PlacementField::RowEnd,
    ];

    /// Field name as it appears in configuration documents.
    pub fn key(self) -> &'static str {
        match self {
            PlacementField::GridArea => "gridArea",
            PlacementField::ColumnStart => "columnStart",
            PlacementField::ColumnEnd => "columnEnd",
            PlacementField::RowStart => "rowStart",
            PlacementField::RowEnd => "rowEnd",
        }
    }
}

impl fmt::Display for PlacementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Placement as stored in configuration: a tag plus every field, whether
/// or not the tag uses it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPlacement {
    pub placement_type: PlacementType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_end: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_end: Option<String>,
}

/// A placement carrying only the fields relevant to its variant.
/// Every field is already normalised: `None` for blank or `auto`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ItemPlacement {
    #[default]
    Auto,
    Area {
        grid_area: Option<String>,
    },
    Coordinates {
        column_start: Option<String>,
        column_end: Option<String>,
        row_start: Option<String>,
        row_end: Option<String>,
    },
    Span {
        column_start: Option<String>,
        column_end: Option<String>,
        row_start: Option<String>,
        row_end: Option<String>,
    },
}

/// `None` for absent, blank, or `auto`; otherwise the trimmed value.
pub fn set_value(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() || value == "auto" {
        None
    } else {
        Some(value.to_string())
    }
}

impl RawPlacement {
    /// The raw (untrimmed) value of one field.
    pub fn field(&self, field: PlacementField) -> Option<&str> {
        match field {
            PlacementField::GridArea => self.grid_area.as_deref(),
            PlacementField::ColumnStart => self.column_start.as_deref(),
            PlacementField::ColumnEnd => self.column_end.as_deref(),
            PlacementField::RowStart => self.row_start.as_deref(),
            PlacementField::RowEnd => self.row_end.as_deref(),
        }
    }

    /// `true` if any field holds a value other than blank/`auto`.
    pub fn has_values(&self) -> bool {
        self.placement_type != PlacementType::Auto
            || PlacementField::ALL
                .iter()
                .any(|f| set_value(self.field(*f)).is_some())
    }

    /// Convert into the tagged variant, dropping fields the tag ignores.
    pub fn to_placement(&self) -> ItemPlacement {
        let get = |f| set_value(self.field(f));
        match self.placement_type {
            PlacementType::Auto => ItemPlacement::Auto,
            PlacementType::Area => ItemPlacement::Area {
                grid_area: get(PlacementField::GridArea).filter(|a| a != "."),
            },
            PlacementType::Coordinates => ItemPlacement::Coordinates {
                column_start: get(PlacementField::ColumnStart),
                column_end: get(PlacementField::ColumnEnd),
                row_start: get(PlacementField::RowStart),
                row_end: get(PlacementField::RowEnd),
            },
            PlacementType::Span => ItemPlacement::Span {
                column_start: get(PlacementField::ColumnStart),
                column_end: get(PlacementField::ColumnEnd),
                row_start: get(PlacementField::RowStart),
                row_end: get(PlacementField::RowEnd),
            },
        }
    }

    /// Fields that carry a value but are discarded by the current tag.
    pub fn ignored_fields(&self) -> Vec<PlacementField> {
        let used: &[PlacementField] = match self.placement_type {
            PlacementType::Auto => &[],
            PlacementType::Area => &[PlacementField::GridArea],
            PlacementType::Coordinates | PlacementType::Span => &[
                PlacementField::ColumnStart,
                PlacementField::ColumnEnd,
                PlacementField::RowStart,
                PlacementField::RowEnd,
            ],
        };
        PlacementField::ALL
            .into_iter()
            .filter(|f| !used.contains(f) && set_value(self.field(*f)).is_some())
            .collect()
    }
}

// ─── Output ──────────────────────────────────────────────────────────────

/// Concrete placement output. Exactly one shape, never a mix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(
    tag = "kind",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum ResolvedPlacement {
    /// No explicit placement; the item is auto-placed.
    #[default]
    Empty,
    /// `grid-area: <name>`.
    Area { name: String },
    /// Up to four individual line properties.
    Lines {
        column_start: Option<String>,
        column_end: Option<String>,
        row_start: Option<String>,
        row_end: Option<String>,
    },
    /// `grid-column` / `grid-row` shorthands.
    Shorthand {
        column: Option<String>,
        row: Option<String>,
    },
}

impl ResolvedPlacement {
    pub fn is_empty(&self) -> bool {
        matches!(self, ResolvedPlacement::Empty)
    }

    /// Style properties for this placement.
    pub fn to_style_map(&self) -> StyleMap {
        let mut map = StyleMap::new();
        let mut put = |key: &'static str, value: &Option<String>| {
            if let Some(v) = value {
                map.insert(key, v.clone());
            }
        };
        match self {
            ResolvedPlacement::Empty => {}
            ResolvedPlacement::Area { name } => put("grid-area", &Some(name.clone())),
            ResolvedPlacement::Lines {
                column_start,
                column_end,
                row_start,
                row_end,
            } => {
                put("grid-column-start", column_start);
                put("grid-column-end", column_end);
                put("grid-row-start", row_start);
                put("grid-row-end", row_end);
            }
            ResolvedPlacement::Shorthand { column, row } => {
                put("grid-column", column);
                put("grid-row", row);
            }
        }
        map
    }
}

// ─── Resolution ──────────────────────────────────────────────────────────

/// `true` for `""`, `auto`, `span N`, nonzero integers, and identifiers.
pub fn validate_grid_line(value: &str) -> bool {
    parse_grid_line(value).is_some()
}

/// Resolve one placement.
///
/// An `Area` placement only produces output when named areas are active;
/// reporting the mismatch is left to validation.
#[must_use]
pub fn resolve_placement(placement: &ItemPlacement, use_named_areas: bool) -> ResolvedPlacement {
    match placement {
        ItemPlacement::Auto => ResolvedPlacement::Empty,
        ItemPlacement::Area { grid_area } => match grid_area {
            Some(name) if use_named_areas => ResolvedPlacement::Area { name: name.clone() },
            _ => ResolvedPlacement::Empty,
        },
        ItemPlacement::Coordinates {
            column_start,
            column_end,
            row_start,
            row_end,
        } => {
            let line = |v: &Option<String>| v.clone().filter(|v| validate_grid_line(v));
            let lines = ResolvedPlacement::Lines {
                column_start: line(column_start),
                column_end: line(column_end),
                row_start: line(row_start),
                row_end: line(row_end),
            };
            if lines.to_style_map().is_empty() {
                ResolvedPlacement::Empty
            } else {
                lines
            }
        }
        ItemPlacement::Span {
            column_start,
            column_end,
            row_start,
            row_end,
        } => {
            let column = span_axis(column_start.as_deref(), column_end.as_deref());
            let row = span_axis(row_start.as_deref(), row_end.as_deref());
            if column.is_none() && row.is_none() {
                ResolvedPlacement::Empty
            } else {
                ResolvedPlacement::Shorthand { column, row }
            }
        }
    }
}

/// Shorthand for one axis of a span placement.
fn span_axis(start: Option<&str>, end: Option<&str>) -> Option<String> {
    let start = start?;
    if start.contains("span") {
        return Some(start.to_string());
    }
    Some(match end {
        Some(end) => format!("{start} / {end}"),
        None => start.to_string(),
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────
