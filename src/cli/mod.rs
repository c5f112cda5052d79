use clap::{Parser, Subcommand};

mod post_process;
mod prepare;
mod run;

#[derive(Parser, Debug)]
#[command(name = "pheval-amelie", version, about = "AMELIE benchmark runner")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write per-patient request parameters for a corpus
    Prepare(prepare::PrepareArgs),
    /// Prepare parameters and submit one request per patient
    Run(run::RunArgs),
    /// Convert raw service responses into ranked gene results
    PostProcess(post_process::PostProcessArgs),
}

impl Cli {
    pub fn dispatch(self) -> anyhow::Result<()> {
        match self.command {
            Command::Prepare(args) => prepare::handle(args),
            Command::Run(args) => run::handle(args),
            Command::PostProcess(args) => post_process::handle(args),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/cli/mod.rs"]
mod tests;
