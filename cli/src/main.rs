//! dummymaker: synthetic medicine/symptom report dataset generator.
//!
//! Draws synthetic patients from a scaled age/gender population, attaches
//! Pareto-distributed medicine and symptom ids, and writes the result as CSV
//! or JSON.
//!
//! Usage:
//!   cargo run -p dummymaker-cli -- generate
//!   cargo run -p dummymaker-cli -- generate --seed 42 --output-dir out
//!   cargo run -p dummymaker-cli -- check --config resources/config.toml

mod pipeline;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dummymaker_contracts::error::DummyResult;
use dummymaker_population::DEFAULT_TARGET_POPULATION;

use crate::pipeline::Inputs;

// ── CLI definition ────────────────────────────────────────────────────────────

/// Synthetic medicine purchase / symptom report datasets.
#[derive(Parser)]
#[command(
    name = "dummymaker",
    about = "Generate a synthetic medicine/symptom report dataset",
    long_about = "Builds a weighted age/gender patient population from incidence and\n\
                  population tables, then emits records with Pareto-distributed\n\
                  medicine and symptom ids as CSV or JSON."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the configured number of records and write data.csv / data.json.
    Generate {
        #[command(flatten)]
        common: CommonArgs,

        /// Directory the dataset file is written into.
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Validate the inputs and print the population pool summary.
    Check {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Configuration file (JSON, or TOML when the extension is .toml).
    #[arg(long, default_value = "resources/config.json")]
    config: PathBuf,

    /// Patient incidence table (tab-separated, per-100,000 rates).
    #[arg(long, default_value = "resources/japan_patient_stats.tsv")]
    incidence: PathBuf,

    /// Population table (tab-separated, relative counts per age).
    #[arg(long, default_value = "resources/japan_population_stats.tsv")]
    population: PathBuf,

    /// Size of the population the tables are scaled to.
    #[arg(long, default_value_t = DEFAULT_TARGET_POPULATION)]
    target_population: u64,

    /// Global seed. Omit for a non-reproducible run.
    #[arg(long)]
    seed: Option<u64>,
}

impl CommonArgs {
    fn load(&self) -> DummyResult<Inputs> {
        Inputs::load(&self.config, &self.incidence, &self.population)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for per-record output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate { common, output_dir } => run_generate(&common, &output_dir),
        Command::Check { common } => run_check(&common),
    };

    if let Err(e) = result {
        eprintln!("dummymaker error: {}", e);
        std::process::exit(1);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_generate(common: &CommonArgs, output_dir: &std::path::Path) -> DummyResult<()> {
    let inputs = common.load()?;
    let path =
        pipeline::generate_and_write(&inputs, common.target_population, common.seed, output_dir)?;
    println!(
        "Wrote {} records to {}",
        inputs.config.required_record_count,
        path.display()
    );
    Ok(())
}

fn run_check(common: &CommonArgs) -> DummyResult<()> {
    let inputs = common.load()?;
    let summary = pipeline::check(&inputs, common.target_population, common.seed)?;
    println!("{summary}");
    Ok(())
}
