use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use tracing::{info, warn};

use crate::config::loader::load_config_or_default;
use crate::genes::resolver::HgncResolver;
use crate::input::path_display;
use crate::model::identifier::GeneIdentifierKind;
use crate::pipeline::stage3_standardize::run_stage3_standardize;
use crate::report::json::{PostProcessSummary, write_summary};

#[derive(Args, Debug)]
pub struct PostProcessArgs {
    /// Directory of raw service responses
    #[arg(long)]
    pub(crate) raw_results: PathBuf,

    /// Output directory
    #[arg(long)]
    pub(crate) out: PathBuf,

    /// HGNC complete set TSV (optionally .gz)
    #[arg(long)]
    pub(crate) hgnc: PathBuf,

    /// Optional TOML run configuration
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,

    /// Identifier written for each gene (ensembl_id, hgnc_id, entrez_id, refseq_accession)
    #[arg(long)]
    pub(crate) gene_identifier: Option<GeneIdentifierKind>,
}

pub fn handle(args: PostProcessArgs) -> anyhow::Result<()> {
    let config = load_config_or_default(args.config.as_deref())?;
    let kind = args
        .gene_identifier
        .unwrap_or(config.post_process.gene_identifier);
    std::fs::create_dir_all(&args.out)?;

    let start = Instant::now();
    let resolver = HgncResolver::from_path(&args.hgnc, kind)?;
    info!(
        genes = resolver.len(),
        gene_identifier = %resolver.kind(),
        elapsed_ms = start.elapsed().as_millis(),
        "loaded HGNC resolver"
    );
    if resolver.is_empty() {
        warn!(
            path = %path_display(&args.hgnc),
            "HGNC table has no genes; every symbol will be NA"
        );
    }

    let start = Instant::now();
    info!(stage = "stage3_standardize", "starting stage");
    let stats = run_stage3_standardize(&args.raw_results, &args.out, &resolver)?;
    info!(
        stage = "stage3_standardize",
        elapsed_ms = start.elapsed().as_millis(),
        files = stats.files,
        genes = stats.genes,
        unresolved = stats.unresolved_symbols,
        "finished stage"
    );

    write_summary(&args.out, &PostProcessSummary::new(&stats, resolver.kind()))?;
    Ok(())
}
