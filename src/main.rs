//! hadley - a static chart renderer for gridded climate datasets
//!
//! This is the main entry point for the hadley application.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use hadley::config::{Args, ChartConfig};
use hadley::logging::{init_tracing, time_stage};
use hadley::recipes;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_tracing(&args.log_level);

    info!("Starting hadley v{}", env!("CARGO_PKG_VERSION"));

    if args.list {
        for name in recipes::recipe_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let (config, default_output) = resolve_config(&args)?;
    let output = args.output.clone().unwrap_or(default_output);

    time_stage("render_chart", || {
        hadley::render_chart_to_file(&config, &output)
    })
    .with_context(|| format!("Failed to render chart to {}", output.display()))?;

    Ok(())
}

/// Resolve the chart configuration from a recipe name or a config file.
fn resolve_config(args: &Args) -> anyhow::Result<(ChartConfig, PathBuf)> {
    match (&args.recipe, &args.config) {
        (Some(name), None) => {
            let config = recipes::get_recipe(name)
                .with_context(|| format!("Unknown recipe: {}", name))?;
            Ok((config, PathBuf::from(format!("{}.png", name))))
        }
        (None, Some(path)) => {
            let config = ChartConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?;
            Ok((config, PathBuf::from("chart.png")))
        }
        (Some(_), Some(_)) => {
            anyhow::bail!("Pass either a recipe name or --config, not both")
        }
        (None, None) => {
            anyhow::bail!(
                "Nothing to render: pass a recipe name (one of: {}) or --config",
                recipes::recipe_names().join(", ")
            )
        }
    }
}
