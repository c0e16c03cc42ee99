use anyhow::{Context, Result};
use clap::Args;
use vsview_core::engine::{self, VsPipeEngine};
use vsview_core::io::fs::resolve_temp_dir;
use vsview_core::source::SourceSet;

use super::{spinner, SourceArgs};
use crate::summary::print_info_summary;

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let config = args.source.load_config()?;
    let set = SourceSet::classify(&args.source.file)?;
    let engine = VsPipeEngine::new(&config.engine).context("Failed to start vspipe")?;
    let temp_dir = resolve_temp_dir();
    let staged = set.stage(0, temp_dir.as_deref())?;
    let script = args.source.build_script(&config, staged.path())?;

    let pb = spinner("Evaluating script")?;
    let node = engine::probe(&engine, &script);
    pb.finish_and_clear();
    let node = node?;

    print_info_summary(&args.source.file, &config.chain_path, &node);
    Ok(())
}
