//! Tintype CLI: decode an image, grade it on the GPU, write a PNG snapshot.

mod args;
mod error;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tintype_core::{GradeSession, ParameterSet, PresetCatalog, PresetCategory, SourceImage};
use tintype_gpu::{GpuConfig, RenderEngine, SurfaceSize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::Args;
use crate::error::CliError;

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, filtered by `TINTYPE_LOG` (default `info`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("TINTYPE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), CliError> {
    let mut session = match &args.catalog {
        Some(path) => GradeSession::with_catalog(Arc::new(load_catalog(path)?)),
        None => GradeSession::new(),
    };

    if args.list_presets {
        print_presets(session.catalog());
        return Ok(());
    }

    if let Some(id) = &args.preset {
        session.apply_preset(id)?;
    }
    if let Some(path) = &args.params {
        session.replace_params(load_params(path)?);
    }
    for &(field, value) in &args.set {
        session.update_field(field, value);
    }

    if args.dump_params {
        println!("{}", serde_json::to_string_pretty(session.params())?);
        return Ok(());
    }

    let input = args.input.as_deref().ok_or(CliError::MissingInput)?;
    let source = decode(input)?.to_working_resolution();
    info!(look = session.label(), "grading {}", input.display());

    let mut engine = RenderEngine::initialize(SurfaceSize::of(&source), &GpuConfig::default())?;
    engine.load_image(&source)?;
    engine.render(session.params(), args.time)?;
    let png = engine.export_snapshot()?;
    engine.dispose();

    let output = args.output_path(input);
    std::fs::write(&output, png).map_err(|source| CliError::Write {
        path: output.clone(),
        source,
    })?;
    info!("wrote {}", output.display());
    Ok(())
}

fn decode(path: &Path) -> Result<SourceImage, CliError> {
    let img = image::open(path).map_err(|source| CliError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(SourceImage::from(img.to_rgba8()))
}

fn read_to_string(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_catalog(path: &Path) -> Result<PresetCatalog, CliError> {
    let catalog = PresetCatalog::from_json(&read_to_string(path)?)?;
    info!(presets = catalog.len(), "loaded catalog {}", path.display());
    Ok(catalog)
}

fn load_params(path: &Path) -> Result<ParameterSet, CliError> {
    serde_json::from_str(&read_to_string(path)?).map_err(|source| CliError::Params {
        path: path.to_path_buf(),
        source,
    })
}

fn print_presets(catalog: &PresetCatalog) {
    for &category in PresetCategory::all() {
        let mut presets = catalog.by_category(category).peekable();
        if presets.peek().is_none() {
            continue;
        }
        println!("{}", category.label());
        for preset in presets {
            println!("  {:<22} {:<16} {}", preset.id, preset.name, preset.description);
        }
    }
}
