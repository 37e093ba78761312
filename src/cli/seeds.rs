use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::cli::open_output;
use crate::core::seeds::{SeedQuery, DEFAULT_SEED_SIZE};
use crate::parsing;
use crate::utils::validation::check_seed_size;

#[derive(Args)]
pub struct SeedsArgs {
    /// Contigs (FASTA or FASTQ, optionally gzipped); '-' for stdin
    #[arg(required = true)]
    pub contigs: PathBuf,

    /// Seed length
    #[arg(short = 'z', long, default_value_t = DEFAULT_SEED_SIZE)]
    pub seed_size: usize,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Execute seeds subcommand
///
/// # Errors
///
/// Returns an error if the seed size is invalid or the contigs cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: SeedsArgs, verbose: bool) -> anyhow::Result<()> {
    if let Some(message) = check_seed_size(args.seed_size) {
        anyhow::bail!(message);
    }

    let contigs = parsing::contigs::read_contigs(&args.contigs)
        .with_context(|| format!("Failed to read contigs from {}", args.contigs.display()))?;
    let query = SeedQuery::from_records(contigs, args.seed_size);

    let mut out = open_output(args.out.as_deref())?;
    out.write_all(query.fasta.as_bytes())?;
    out.flush()?;

    if verbose {
        eprintln!("Wrote {} unique {}-mer seeds", query.count, args.seed_size);
    }

    Ok(())
}
