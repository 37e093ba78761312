//! Command-line interface for contig-localizer.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **localize**: Find and extract candidate reference regions for contigs
//! - **seeds**: Write the unique seed query document for contigs
//! - **index**: Build the BWA index for a reference if it is missing
//!
//! ## Usage
//!
//! ```text
//! # Localize contigs and write candidate regions as FASTA
//! contig-localizer localize contigs.fa hg38.fa.gz -o regions.fa
//!
//! # Tabular summary of the regions
//! contig-localizer localize contigs.fa hg38.fa.gz --format tsv
//!
//! # Inspect the seeds sent to the aligner
//! contig-localizer seeds contigs.fa --seed-size 25
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::aligner::bwa::{BwaConfig, DEFAULT_PROGRAM};

pub mod index;
pub mod localize;
pub mod seeds;

#[derive(Parser)]
#[command(name = "contig-localizer")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Localize assembled contigs to candidate reference regions")]
#[command(
    long_about = "contig-localizer finds where assembled contigs come from in a reference genome.\n\nContigs are broken into unique exact-match seeds, the seeds are placed with `bwa mem`, and nearby placements are clustered into spans. Each span, padded on both sides, is cut out of the reference as a candidate target for alignment and variant calling."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract candidate reference regions for a set of contigs
    Localize(localize::LocalizeArgs),

    /// Write the unique seeds of a set of contigs as FASTA
    Seeds(seeds::SeedsArgs),

    /// Build the BWA index for a reference if it does not exist
    Index(index::IndexArgs),
}

/// Options for locating the aligner
#[derive(clap::Args, Debug, Clone)]
pub struct BwaArgs {
    /// Path to the bwa executable
    #[arg(long = "bwa", env = "CONTIG_LOCALIZER_BWA", default_value = DEFAULT_PROGRAM)]
    pub program: PathBuf,
}

impl From<&BwaArgs> for BwaConfig {
    fn from(args: &BwaArgs) -> Self {
        Self {
            program: args.program.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Open the output destination: a file, or stdout when `path` is None or `-`.
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn open_output(path: Option<&Path>) -> io::Result<Box<dyn Write>> {
    match path {
        Some(path) if path != Path::new("-") => {
            Ok(Box::new(BufWriter::new(File::create(path)?)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
