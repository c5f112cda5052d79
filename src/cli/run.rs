use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::info;

use crate::config::loader::load_config_or_default;
use crate::input::path_display;
use crate::pipeline::stage1_prepare::{read_parameters, run_stage1_prepare};
use crate::pipeline::stage2_request::{HttpScoringClient, run_requests};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Corpus directory holding `phenopackets/` and `vcf/`
    #[arg(long)]
    pub(crate) testdata: PathBuf,

    /// Directory for `<corpus>_parameters.json`
    #[arg(long)]
    pub(crate) tool_input_commands: PathBuf,

    /// Directory for raw service responses
    #[arg(long)]
    pub(crate) raw_results: PathBuf,

    /// Optional TOML run configuration
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Override the service endpoint
    #[arg(long)]
    pub(crate) url: Option<String>,
}

pub fn handle(args: RunArgs) -> anyhow::Result<()> {
    let mut config = load_config_or_default(args.config.as_deref())?;
    if let Some(url) = args.url {
        config.service.url = url;
    }
    std::fs::create_dir_all(&args.tool_input_commands)?;
    std::fs::create_dir_all(&args.raw_results)?;

    let start = Instant::now();
    info!(stage = "stage1_prepare", "starting stage");
    let (parameters_path, _) = run_stage1_prepare(&args.testdata, &args.tool_input_commands)?;
    info!(
        stage = "stage1_prepare",
        elapsed_ms = start.elapsed().as_millis(),
        path = %path_display(&parameters_path),
        "finished stage"
    );

    let start = Instant::now();
    info!(stage = "stage2_request", url = %config.service.url, "starting stage");
    let parameters = read_parameters(&parameters_path)?;
    let client = HttpScoringClient::new(&config.service)?;
    let written = run_requests(&client, &parameters, &config.request, &args.raw_results)?;
    info!(
        stage = "stage2_request",
        elapsed_ms = start.elapsed().as_millis(),
        responses = written.len(),
        "finished stage"
    );
    Ok(())
}
