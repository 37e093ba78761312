use std::path::PathBuf;

use clap::Args;

use crate::aligner::autoindex;
use crate::aligner::bwa::Bwa;
use crate::cli::BwaArgs;
use crate::diagnostics::TracingDiagnostics;

#[derive(Args)]
pub struct IndexArgs {
    /// Reference genome FASTA (optionally gzipped)
    #[arg(required = true)]
    pub reference: PathBuf,

    #[command(flatten)]
    pub bwa: BwaArgs,
}

/// Execute index subcommand
///
/// # Errors
///
/// Returns an error if `bwa index` cannot be run or fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: IndexArgs, verbose: bool) -> anyhow::Result<()> {
    let aligner = Bwa::new((&args.bwa).into());
    autoindex(&aligner, &args.reference, &TracingDiagnostics)?;

    if verbose {
        eprintln!(
            "BWA index ready: {}",
            Bwa::index_path(&args.reference).display()
        );
    }

    Ok(())
}
