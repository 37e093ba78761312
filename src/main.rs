use clap::Parser;
use tracing_subscriber::EnvFilter;

use contig_localizer::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("contig_localizer=debug,info")
    } else {
        EnvFilter::new("contig_localizer=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Localize(args) => {
            cli::localize::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Seeds(args) => {
            cli::seeds::run(args, cli.verbose)?;
        }
        cli::Commands::Index(args) => {
            cli::index::run(args, cli.verbose)?;
        }
    }

    Ok(())
}
