pub mod areas;
pub mod breakpoint;
pub mod cascade;
pub mod emitter;
pub mod error;
pub mod model;
pub mod name;
pub mod placement;
pub mod resolve;
pub mod syntax;
pub mod template;
pub mod validate;

pub use areas::{AreaBounds, AreaGrid, compute_area_bounds, parse_areas, unique_area_names};
pub use breakpoint::{
    BreakpointTier, CustomBreakpoint, DEVICE_TIERS, HYSTERESIS_PX, STANDARD_TIERS, TierSize,
    TierTable, active_breakpoint, active_breakpoint_with_hysteresis, breakpoint_classes,
};
pub use emitter::{DeclarationBlock, EmitConfig, declaration_blocks, emit_stylesheet};
pub use error::ConfigError;
pub use model::*;
pub use name::AreaName;
pub use placement::{
    ItemPlacement, PlacementType, RawPlacement, ResolvedPlacement, resolve_placement,
    validate_grid_line,
};
pub use resolve::{
    ResolvedContainer, ResolvedItem, ResolvedLayout, resolve_container, resolve_item,
    resolve_layout,
};
pub use template::{Track, expand_repeats, parse_template};
pub use validate::{Diagnostic, Severity, has_errors, validate_config};
