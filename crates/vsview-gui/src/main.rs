mod app;
mod input;
mod panels;
mod textures;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use vsview_core::config::ViewerConfig;
use vsview_core::engine::{DecodeEngine, VsPipeEngine};
use vsview_core::error::ViewerError;
use vsview_core::io::fs::resolve_temp_dir;
use vsview_core::script::FilterChain;
use vsview_core::source::SourceSet;

#[derive(Parser)]
#[command(name = "vsview", about = "Full-screen image viewer fed by a VapourSynth filter chain")]
#[command(version)]
struct Cli {
    /// Image to display
    source: Option<PathBuf>,

    /// Filter chain appended to the generated script
    #[arg(short, long)]
    chain: Option<PathBuf>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Some(source) = cli.source else {
        eprintln!("usage: vsview <source-image-path>");
        return Err(ViewerError::Argument.into());
    };

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(chain) = cli.chain {
        config.chain_path = chain;
    }

    let set = SourceSet::classify(&source)?;
    let chain = FilterChain::load(&config.chain_path)?;
    let engine: Arc<dyn DecodeEngine> =
        Arc::new(VsPipeEngine::new(&config.engine).context("Couldn't start the decode engine")?);
    let temp_dir = resolve_temp_dir();
    let staged = set
        .stage(0, temp_dir.as_deref())
        .with_context(|| format!("Couldn't stage {}", source.display()))?;

    let fatal = Arc::new(OnceLock::new());
    let session = app::Session {
        engine,
        staged,
        chain: Arc::new(chain),
        config,
        fatal: Arc::clone(&fatal),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title("vsview"),
        ..Default::default()
    };

    eframe::run_native(
        "vsview",
        options,
        Box::new(|cc| Ok(Box::new(app::ViewerApp::new(cc, session)))),
    )
    .map_err(|e| ViewerError::Init(e.to_string()))?;

    if let Some(message) = fatal.get() {
        anyhow::bail!("{message}");
    }
    info!("Viewer closed");
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
    match path {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("Couldn't load config {}", path.display())),
        None => Ok(ViewerConfig::default()),
    }
}
