//! gridfit: resolve a grid layout configuration at a viewport width.
//!
//! Reads a JSON configuration and prints either the stylesheet, the
//! resolved layout as JSON, the breakpoint marker classes, or the
//! validation report.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use gridfit_core::{
    BreakpointMode, EmitConfig, LayoutConfig, TierTable, breakpoint_classes, emit_stylesheet,
    has_errors, resolve_layout, validate_config,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "gridfit",
    version,
    about = "Resolve a responsive grid layout configuration"
)]
struct Cli {
    /// Layout configuration (JSON object)
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Viewport width in CSS pixels
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Override the configuration's breakpoint mode
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// What to print
    #[arg(long, value_enum, default_value_t = Format::Css)]
    format: Format,

    /// Container selector for stylesheet output
    #[arg(long, default_value = ".grid")]
    selector: String,

    /// Item selector for stylesheet output; `{id}` is replaced by the item id
    #[arg(long, default_value = ".grid > [data-grid-item=\"{id}\"]")]
    item_selector: String,

    /// Prefix for breakpoint marker classes
    #[arg(long, default_value = "bp-")]
    class_prefix: String,

    /// Resolve against the eight-tier device table
    #[arg(long, action = ArgAction::SetTrue)]
    device_tiers: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Exact,
    Cascade,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Stylesheet text for every tier
    Css,
    /// Resolved container and items at --width
    Json,
    /// Breakpoint marker classes at --width
    Classes,
    /// Validation report; exits 1 if any error is found
    Diagnostics,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = LayoutConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(mode) = cli.mode {
        config.breakpoint_mode = match mode {
            ModeArg::Exact => BreakpointMode::Exact,
            ModeArg::Cascade => BreakpointMode::Cascade,
        };
    }
    if cli.device_tiers {
        config.tier_table = TierTable::Device;
    }
    log::debug!(
        "{}: {} items, mode {:?}, width {}",
        cli.config.display(),
        config.items.len(),
        config.breakpoint_mode,
        cli.width
    );

    match cli.format {
        Format::Css => {
            let emit = EmitConfig {
                container_selector: cli.selector,
                item_selector: cli.item_selector,
                tiers: None,
            };
            print!("{}", emit_stylesheet(&config, &emit));
        }
        Format::Json => {
            let layout = resolve_layout(&config, cli.width);
            let text =
                serde_json::to_string_pretty(&layout).context("serializing resolved layout")?;
            println!("{text}");
        }
        Format::Classes => {
            let classes = breakpoint_classes(config.tiers(), cli.width, &cli.class_prefix);
            println!("{}", classes.join(" "));
        }
        Format::Diagnostics => {
            let diags = validate_config(&config);
            for d in &diags {
                println!("{d}");
            }
            if has_errors(&diags) {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
