pub mod config;
pub mod export;
pub mod info;
pub mod script;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use vsview_core::config::ViewerConfig;
use vsview_core::script::{FilterChain, FilterScript, ScriptParams};

/// Options shared by every command that composes a script.
#[derive(Args)]
pub struct SourceArgs {
    /// Source image
    pub file: PathBuf,

    /// Filter chain appended to the script header
    #[arg(short, long)]
    pub chain: Option<PathBuf>,

    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Target width exposed to the chain
    #[arg(long, default_value = "1920")]
    pub width: u32,

    /// Target height exposed to the chain
    #[arg(long, default_value = "1080")]
    pub height: u32,
}

impl SourceArgs {
    pub fn load_config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => ViewerConfig::default(),
        };
        if let Some(chain) = &self.chain {
            config.chain_path = chain.clone();
        }
        Ok(config)
    }

    /// Compose the script for `source`, which may differ from `self.file`
    /// once the image has been staged.
    pub fn build_script(&self, config: &ViewerConfig, source: &Path) -> Result<FilterScript> {
        let chain = FilterChain::load(&config.chain_path)?;
        let params = ScriptParams {
            target_width: self.width,
            target_height: self.height,
            source: std::path::absolute(source)?,
            plugin: config.plugin_path.clone(),
        };
        Ok(FilterScript::build(&params, &chain)?)
    }
}

pub fn spinner(message: &str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}
