use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use config::Config;

#[derive(Parser)]
#[command(name = "pepstack")]
#[command(about = "pepstack - wrapped-axis peptide coverage layout")]
#[command(version)]
#[command(long_about = "
pepstack lays out peptide coverage over a protein sequence as stacked
horizontal line segments on a wrapped, multi-row sequence axis, and
emits the positioned segments as JSON for a rendering frontend.

Examples:
  pepstack layout --proteins proteins.json --peptides peptides.tsv --out layout.json
  pepstack layout --proteins proteins.tsv --peptides peptides.tsv --protein P02666 --row-width 50
  pepstack check --proteins proteins.json --peptides peptides.json
  pepstack config > pepstack.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute a layout and emit positioned segments as JSON
    Layout {
        /// Protein table (JSON or TSV with id/sequence columns)
        #[arg(long, required = true)]
        proteins: PathBuf,

        /// Peptide table (JSON or TSV with protein_id/peptide columns)
        #[arg(long, required = true)]
        peptides: PathBuf,

        /// Lay out only this protein id (default: every protein with
        /// at least one peptide)
        #[arg(long)]
        protein: Option<String>,

        /// Maximum ticks per display row
        #[arg(long)]
        row_width: Option<usize>,

        /// Residues trimmed from the start of every sequence before
        /// locating peptides
        #[arg(long)]
        mature_offset: Option<usize>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Locate every peptide and report found/skipped/duplicate counts
    Check {
        /// Protein table (JSON or TSV)
        #[arg(long, required = true)]
        proteins: PathBuf,

        /// Peptide table (JSON or TSV)
        #[arg(long, required = true)]
        peptides: PathBuf,

        /// Residues trimmed from the start of every sequence before
        /// locating peptides
        #[arg(long)]
        mature_offset: Option<usize>,
    },

    /// Print an example configuration file to stdout
    Config,
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    if quiet {
        std::env::set_var("RUST_LOG", "error");
    } else {
        let level = match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        std::env::set_var("RUST_LOG", level);
    }

    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet)?;

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Layout {
            proteins,
            peptides,
            protein,
            row_width,
            mature_offset,
            out,
            pretty,
        } => {
            commands::layout::execute(
                &config,
                proteins,
                peptides,
                protein,
                row_width,
                mature_offset,
                out,
                pretty,
            )?;
        }

        Commands::Check {
            proteins,
            peptides,
            mature_offset,
        } => {
            commands::check::execute(&config, proteins, peptides, mature_offset)?;
        }

        Commands::Config => {
            print!("{}", Config::example_toml());
        }
    }

    Ok(())
}
