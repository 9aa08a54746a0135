//! compview-inspect - offline component report for a glTF model
//!
//! Loads a glTF/GLB file, groups its meshes into components the same way the
//! viewer does, and prints them farthest-first together with the minimum
//! zoom distance for the chosen set of visible components.

mod flatten;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use compview_core::glam::Vec3;
use compview_core::ViewerConfig;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::report::ReportOptions;

#[derive(Parser, Debug)]
#[command(name = "compview-inspect")]
#[command(about = "List a glTF model's components by distance and compute its zoom limit")]
#[command(version)]
struct Args {
    /// glTF or GLB file to inspect
    model: PathBuf,

    /// Viewer configuration file (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Camera position as x,y,z (defaults to the configured camera)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    camera: Option<Vec<f32>>,

    /// Uniform model scale (defaults to the configured scale)
    #[arg(short, long)]
    scale: Option<f32>,

    /// Hide a component before computing the zoom limit (repeatable)
    #[arg(long = "hide", value_name = "COMPONENT")]
    hidden: Vec<String>,

    /// Print each component's description
    #[arg(short, long)]
    describe: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over --log-level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = match &args.config {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ViewerConfig::default(),
    };

    let camera = match args.camera.as_deref() {
        Some([x, y, z]) => Vec3::new(*x, *y, *z),
        Some(_) => anyhow::bail!("--camera takes exactly three values"),
        None => Vec3::from_array(config.camera.position),
    };
    let scale = args.scale.unwrap_or(config.model.scale);

    let (document, buffers, _images) = gltf::import(&args.model)
        .with_context(|| format!("failed to import glTF {}", args.model.display()))?;
    let mut scene = flatten::flatten(&document, &buffers, scale);
    info!(
        "Loaded {} ({} mesh primitives, scale {})",
        args.model.display(),
        scene.len(),
        scale
    );

    let options = ReportOptions {
        camera,
        zoom: &config.controls.zoom,
        hidden: &args.hidden,
        descriptions: args.describe.then_some(&config.descriptions),
    };
    print!("{}", report::render(&mut scene, &options));

    Ok(())
}
