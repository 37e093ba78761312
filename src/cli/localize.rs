use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;

use crate::aligner::bwa::Bwa;
use crate::cli::{open_output, BwaArgs, OutputFormat};
use crate::core::matches::DEFAULT_MAX_DIFF;
use crate::core::region::{Region, DEFAULT_DELTA};
use crate::core::seeds::DEFAULT_SEED_SIZE;
use crate::diagnostics::TracingDiagnostics;
use crate::localize::{LocalizeConfig, Localizer};
use crate::parsing;

#[derive(Args)]
pub struct LocalizeArgs {
    /// Contigs to localize (FASTA or FASTQ, optionally gzipped); '-' for stdin
    #[arg(required = true)]
    pub contigs: PathBuf,

    /// Reference genome FASTA (optionally gzipped); indexed with bwa if needed
    #[arg(required = true)]
    pub reference: PathBuf,

    /// Seed length for exact matching
    #[arg(short = 'z', long, default_value_t = DEFAULT_SEED_SIZE)]
    pub seed_size: usize,

    /// Number of bases to extend each region on both sides
    #[arg(short, long, default_value_t = DEFAULT_DELTA)]
    pub delta: usize,

    /// Maximum distance between seed matches in one region; 0 makes one
    /// region per reference sequence
    #[arg(short = 'x', long, default_value_t = DEFAULT_MAX_DIFF)]
    pub max_diff: usize,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    #[command(flatten)]
    pub bwa: BwaArgs,
}

#[derive(Serialize)]
struct JsonRegion {
    id: String,
    seqid: String,
    start: usize,
    end: usize,
    sequence: String,
}

impl From<Region> for JsonRegion {
    fn from(region: Region) -> Self {
        Self {
            id: region.id(),
            sequence: String::from_utf8_lossy(&region.sequence).into_owned(),
            seqid: region.seqid,
            start: region.start,
            end: region.end,
        }
    }
}

/// Execute localize subcommand
///
/// # Errors
///
/// Returns an error if the inputs cannot be read, the aligner fails, or the
/// reference does not contain every matched sequence.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: LocalizeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let contigs = parsing::contigs::read_contigs(&args.contigs)
        .with_context(|| format!("Failed to read contigs from {}", args.contigs.display()))?;

    if verbose {
        eprintln!("Read {} contigs from input", contigs.len());
    }

    let config = LocalizeConfig {
        seed_size: args.seed_size,
        delta: args.delta,
        max_diff: args.max_diff,
    };
    let aligner = Bwa::new((&args.bwa).into());
    let diagnostics = TracingDiagnostics;
    let localizer = Localizer::new(&aligner, &diagnostics, config);
    if verbose {
        let config = localizer.config();
        eprintln!(
            "Seed size {}, delta {}, max diff {}",
            config.seed_size, config.delta, config.max_diff
        );
    }

    let localization = localizer.localize(contigs, &args.reference)?;
    let mut out = open_output(args.out.as_deref())?;
    let mut count = 0usize;

    match format {
        OutputFormat::Text => {
            for record in localization.records() {
                parsing::fasta::write_record(&mut out, &record?)?;
                count += 1;
            }
        }
        OutputFormat::Tsv => {
            writeln!(out, "id\tseqid\tstart\tend\tlength")?;
            for region in localization {
                let region = region?;
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{}",
                    region.id(),
                    region.seqid,
                    region.start,
                    region.end,
                    region.len()
                )?;
                count += 1;
            }
        }
        OutputFormat::Json => {
            let regions = localization
                .map(|region| region.map(JsonRegion::from))
                .collect::<Result<Vec<_>, _>>()?;
            count = regions.len();
            serde_json::to_writer_pretty(&mut out, &regions)?;
            writeln!(out)?;
        }
    }
    out.flush()?;

    if verbose {
        eprintln!("Wrote {count} candidate regions");
    }

    Ok(())
}
