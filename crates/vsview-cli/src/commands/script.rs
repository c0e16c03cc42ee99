use anyhow::Result;
use clap::Args;
use vsview_core::io::fs::require_file;

use super::SourceArgs;

#[derive(Args)]
pub struct ScriptArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run(args: &ScriptArgs) -> Result<()> {
    require_file(&args.source.file)?;
    let config = args.source.load_config()?;
    let script = args.source.build_script(&config, &args.source.file)?;
    print!("{}", script.as_str());
    Ok(())
}
