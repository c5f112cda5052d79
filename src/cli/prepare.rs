use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::info;

use crate::input::path_display;
use crate::pipeline::stage1_prepare::run_stage1_prepare;

#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Corpus directory holding `phenopackets/` and `vcf/`
    #[arg(long)]
    pub(crate) testdata: PathBuf,

    /// Tool input commands directory
    #[arg(long)]
    pub(crate) out: PathBuf,
}

pub fn handle(args: PrepareArgs) -> anyhow::Result<()> {
    std::fs::create_dir_all(&args.out)?;

    let start = Instant::now();
    info!(stage = "stage1_prepare", "starting stage");
    let (path, parameters) = run_stage1_prepare(&args.testdata, &args.out)?;
    info!(
        stage = "stage1_prepare",
        elapsed_ms = start.elapsed().as_millis(),
        patients = parameters.len(),
        path = %path_display(&path),
        "finished stage"
    );
    Ok(())
}
