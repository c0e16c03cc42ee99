use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vsview_core::convert::convert;
use vsview_core::engine::{self, VsPipeEngine};
use vsview_core::frame::PixelLayout;
use vsview_core::io::fs::resolve_temp_dir;
use vsview_core::io::image_io::save_pixels;
use vsview_core::source::SourceSet;

use super::{spinner, SourceArgs};

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output image (PNG, TIFF or JPEG by extension)
    #[arg(short, long, default_value = "frame.png")]
    pub output: PathBuf,
}

pub fn run(args: &ExportArgs) -> Result<()> {
    let config = args.source.load_config()?;
    let set = SourceSet::classify(&args.source.file)?;
    let engine = VsPipeEngine::new(&config.engine).context("Failed to start vspipe")?;
    let temp_dir = resolve_temp_dir();
    let staged = set.stage(0, temp_dir.as_deref())?;
    let script = args.source.build_script(&config, staged.path())?;

    let pb = spinner("Decoding")?;
    let frame = engine::decode(&engine, &script);
    pb.finish_and_clear();
    let frame = frame?;

    let pixels = convert(&frame, PixelLayout::Rgb24)?;
    drop(frame);
    save_pixels(&pixels, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    println!(
        "Saved {}x{} image to {}",
        pixels.width(),
        pixels.height(),
        args.output.display()
    );
    Ok(())
}
