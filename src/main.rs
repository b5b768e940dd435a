//! fingerbox - CLI tool to generate cut drawings for finger-jointed boxes.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fingerbox::{build_drawing_from, presets, quick_validate, BoxConfig, OutputFormat};

/// Generate laser/CNC cut drawings for finger-jointed plywood boxes.
#[derive(Parser, Debug)]
#[command(name = "fingerbox")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON parameter file
    #[arg(short, long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Named preset (storage, crate, toybox)
    #[arg(short, long)]
    preset: Option<String>,

    /// Output file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (dxf or svg)
    #[arg(short, long, default_value = "dxf")]
    format: OutputFormat,

    /// Validate only, don't generate output
    #[arg(long)]
    validate: bool,

    /// Output the drawing as JSON
    #[arg(long)]
    debug: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Load parameters
    let (config, source) = match (&args.config, &args.preset) {
        (Some(path), _) => (
            BoxConfig::from_json_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            path.file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("box")
                .to_string(),
        ),
        (None, Some(name)) => (
            presets::preset(name).with_context(|| format!("Failed to load preset {}", name))?,
            name.trim().to_lowercase(),
        ),
        (None, None) => (presets::storage(), "storage".to_string()),
    };

    info!("Processing: {}", source);

    let params = config.resolve().context("Invalid box parameters")?;
    let drawing = build_drawing_from(&params).context("Failed to build drawing")?;

    // Validate
    if let Err(err) = quick_validate(&params, &drawing) {
        error!("{}", err);
        anyhow::bail!("Validation failed");
    }

    // Debug output
    if args.debug {
        let json = serde_json::to_string_pretty(&drawing)?;
        println!("{}", json);
        return Ok(());
    }

    // Validate-only mode
    if args.validate {
        info!("Validation passed");
        return Ok(());
    }

    // Write output
    let output_path = args.output.unwrap_or_else(|| {
        let mut path = PathBuf::from(&source);
        path.set_extension(args.format.extension());
        path
    });

    if output_path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| !e.eq_ignore_ascii_case(args.format.extension()))
        .unwrap_or(true)
    {
        warn!(
            "Output {} does not have a .{} extension",
            output_path.display(),
            args.format
        );
    }

    let content = args.format.render(&drawing);
    std::fs::write(&output_path, &content)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    info!(
        "Generated: {} ({} panels, {} paths)",
        output_path.display(),
        drawing.panels.len(),
        drawing.path_count()
    );

    Ok(())
}
