//! Configuration data model for a grid container and its items.
//!
//! Every per-tier override is a struct of optionals keyed by [`TierSize`];
//! properties are addressed through [`ContainerProperty`], never by
//! building key strings. Blank values are treated exactly like absent ones.

use crate::breakpoint::{BreakpointTier, CustomBreakpoint, TierSize, TierTable};
use crate::error::ConfigError;
use crate::placement::RawPlacement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Resolved CSS property name → value, in a stable order.
pub type StyleMap = BTreeMap<&'static str, String>;

// ─── Container properties ────────────────────────────────────────────────

/// Logical container properties that can be set on the base configuration
/// and overridden per tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContainerProps {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub areas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_gap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_gap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_flow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_columns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_rows: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_items: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<String>,
}

/// Key for one logical container property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContainerProperty {
    Columns,
    Rows,
    Areas,
    Gap,
    ColumnGap,
    RowGap,
    AutoFlow,
    AutoColumns,
    AutoRows,
    JustifyItems,
    AlignItems,
    JustifyContent,
    AlignContent,
    MinHeight,
    MaxHeight,
    MinWidth,
    MaxWidth,
}

impl ContainerProperty {
    pub const ALL: [ContainerProperty; 17] = [
        ContainerProperty::Columns,
        ContainerProperty::Rows,
        ContainerProperty::Areas,
        ContainerProperty::Gap,
        ContainerProperty::ColumnGap,
        ContainerProperty::RowGap,
        ContainerProperty::AutoFlow,
        ContainerProperty::AutoColumns,
        ContainerProperty::AutoRows,
        ContainerProperty::JustifyItems,
        ContainerProperty::AlignItems,
        ContainerProperty::JustifyContent,
        ContainerProperty::AlignContent,
        ContainerProperty::MinHeight,
        ContainerProperty::MaxHeight,
        ContainerProperty::MinWidth,
        ContainerProperty::MaxWidth,
    ];

    /// Field name in configuration documents and diagnostic paths.
    pub fn key(self) -> &'static str {
        match self {
            ContainerProperty::Columns => "columns",
            ContainerProperty::Rows => "rows",
            ContainerProperty::Areas => "areas",
            ContainerProperty::Gap => "gap",
            ContainerProperty::ColumnGap => "columnGap",
            ContainerProperty::RowGap => "rowGap",
            ContainerProperty::AutoFlow => "autoFlow",
            ContainerProperty::AutoColumns => "autoColumns",
            ContainerProperty::AutoRows => "autoRows",
            ContainerProperty::JustifyItems => "justifyItems",
            ContainerProperty::AlignItems => "alignItems",
            ContainerProperty::JustifyContent => "justifyContent",
            ContainerProperty::AlignContent => "alignContent",
            ContainerProperty::MinHeight => "minHeight",
            ContainerProperty::MaxHeight => "maxHeight",
            ContainerProperty::MinWidth => "minWidth",
            ContainerProperty::MaxWidth => "maxWidth",
        }
    }

    /// CSS property the value is emitted as.
    pub fn css_name(self) -> &'static str {
        match self {
            ContainerProperty::Columns => "grid-template-columns",
            ContainerProperty::Rows => "grid-template-rows",
            ContainerProperty::Areas => "grid-template-areas",
            ContainerProperty::Gap => "gap",
            ContainerProperty::ColumnGap => "column-gap",
            ContainerProperty::RowGap => "row-gap",
            ContainerProperty::AutoFlow => "grid-auto-flow",
            ContainerProperty::AutoColumns => "grid-auto-columns",
            ContainerProperty::AutoRows => "grid-auto-rows",
            ContainerProperty::JustifyItems => "justify-items",
            ContainerProperty::AlignItems => "align-items",
            ContainerProperty::JustifyContent => "justify-content",
            ContainerProperty::AlignContent => "align-content",
            ContainerProperty::MinHeight => "min-height",
            ContainerProperty::MaxHeight => "max-height",
            ContainerProperty::MinWidth => "min-width",
            ContainerProperty::MaxWidth => "max-width",
        }
    }
}

impl ContainerProps {
    fn slot(&self, prop: ContainerProperty) -> &Option<String> {
        match prop {
            ContainerProperty::Columns => &self.columns,
            ContainerProperty::Rows => &self.rows,
            ContainerProperty::Areas => &self.areas,
            ContainerProperty::Gap => &self.gap,
            ContainerProperty::ColumnGap => &self.column_gap,
            ContainerProperty::RowGap => &self.row_gap,
            ContainerProperty::AutoFlow => &self.auto_flow,
            ContainerProperty::AutoColumns => &self.auto_columns,
            ContainerProperty::AutoRows => &self.auto_rows,
            ContainerProperty::JustifyItems => &self.justify_items,
            ContainerProperty::AlignItems => &self.align_items,
            ContainerProperty::JustifyContent => &self.justify_content,
            ContainerProperty::AlignContent => &self.align_content,
            ContainerProperty::MinHeight => &self.min_height,
            ContainerProperty::MaxHeight => &self.max_height,
            ContainerProperty::MinWidth => &self.min_width,
            ContainerProperty::MaxWidth => &self.max_width,
        }
    }

    fn slot_mut(&mut self, prop: ContainerProperty) -> &mut Option<String> {
        match prop {
            ContainerProperty::Columns => &mut self.columns,
            ContainerProperty::Rows => &mut self.rows,
            ContainerProperty::Areas => &mut self.areas,
            ContainerProperty::Gap => &mut self.gap,
            ContainerProperty::ColumnGap => &mut self.column_gap,
            ContainerProperty::RowGap => &mut self.row_gap,
            ContainerProperty::AutoFlow => &mut self.auto_flow,
            ContainerProperty::AutoColumns => &mut self.auto_columns,
            ContainerProperty::AutoRows => &mut self.auto_rows,
            ContainerProperty::JustifyItems => &mut self.justify_items,
            ContainerProperty::AlignItems => &mut self.align_items,
            ContainerProperty::JustifyContent => &mut self.justify_content,
            ContainerProperty::AlignContent => &mut self.align_content,
            ContainerProperty::MinHeight => &mut self.min_height,
            ContainerProperty::MaxHeight => &mut self.max_height,
            ContainerProperty::MinWidth => &mut self.min_width,
            ContainerProperty::MaxWidth => &mut self.max_width,
        }
    }

    /// The value of `prop`, or `None` if it is absent or blank.
    pub fn get(&self, prop: ContainerProperty) -> Option<&str> {
        self.slot(prop)
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, prop: ContainerProperty, value: impl Into<String>) {
        *self.slot_mut(prop) = Some(value.into());
    }

    /// Set properties in property order.
    pub fn iter(&self) -> impl Iterator<Item = (ContainerProperty, &str)> {
        ContainerProperty::ALL
            .into_iter()
            .filter_map(|p| self.get(p).map(|v| (p, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Copy every non-blank value of `src` over `self`; blanks never clear.
    pub fn apply(&mut self, src: &ContainerProps) {
        for (prop, value) in src.iter() {
            self.set(prop, value);
        }
    }

    /// A copy with blank values removed and the rest trimmed.
    pub fn normalized(&self) -> ContainerProps {
        let mut out = ContainerProps::default();
        out.apply(self);
        out
    }
}

// ─── Breakpoint overrides ────────────────────────────────────────────────

/// How per-tier overrides combine with the base configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakpointMode {
    /// Only the active tier contributes.
    Exact,
    /// Every enabled tier at or below the width contributes, narrowest first.
    #[default]
    Cascade,
}

/// Container overrides for one tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TierOverrides {
    pub enabled: bool,
    #[serde(flatten)]
    pub props: ContainerProps,
}

/// Item placement override for one tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemTierOverride {
    pub enabled: bool,
    #[serde(flatten)]
    pub placement: RawPlacement,
}

// ─── Items ───────────────────────────────────────────────────────────────

/// One grid item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridItem {
    pub id: String,
    #[serde(flatten)]
    pub placement: RawPlacement,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify_self: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_self: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub breakpoints: BTreeMap<TierSize, ItemTierOverride>,
}

// ─── Virtualization ──────────────────────────────────────────────────────

/// Item-count gate for offscreen virtualization (performed by the host).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VirtualizationConfig {
    pub enabled: bool,
    pub threshold: u32,
}

impl Default for VirtualizationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: 100,
        }
    }
}

// ─── Layout configuration ────────────────────────────────────────────────

/// The full configuration snapshot for one grid container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub container: ContainerProps,
    pub use_named_areas: bool,
    pub breakpoint_mode: BreakpointMode,
    pub tier_table: TierTable,
    pub breakpoints: BTreeMap<TierSize, TierOverrides>,
    /// Legacy free-form tier list; only checked for distinct widths.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_breakpoints: Vec<CustomBreakpoint>,
    pub items: Vec<GridItem>,
    pub virtualization: VirtualizationConfig,
}

impl LayoutConfig {
    /// Parse a JSON configuration document.
    ///
    /// # Errors
    /// `ConfigError::NotAnObject` if the document is not a JSON object,
    /// `ConfigError::Json` if it is malformed or has mistyped fields.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Accept an already-parsed JSON value.
    ///
    /// # Errors
    /// See [`LayoutConfig::from_json`].
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        if !value.is_object() {
            return Err(ConfigError::NotAnObject);
        }
        let config: LayoutConfig = serde_json::from_value(value)?;
        log::debug!(
            "loaded configuration: {} items, {} tier overrides, mode {:?}",
            config.items.len(),
            config.breakpoints.len(),
            config.breakpoint_mode
        );
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`LayoutConfig::from_json`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// The tier table this configuration resolves against.
    pub fn tiers(&self) -> &'static [BreakpointTier] {
        self.tier_table.tiers()
    }

    /// Value of `prop` stored for `tier`, regardless of the enabled flag.
    /// Blank values read as `None`.
    pub fn tier_value(&self, tier: TierSize, prop: ContainerProperty) -> Option<&str> {
        self.breakpoints.get(&tier).and_then(|o| o.props.get(prop))
    }

    /// `true` when the tier has overrides and they are switched on.
    pub fn tier_enabled(&self, tier: TierSize) -> bool {
        self.breakpoints.get(&tier).is_some_and(|o| o.enabled)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
