//! Wiring of config, tables, pool, samplers and writers for one run.
//!
//! Every component gets its own random stream derived from the optional
//! global seed, so a seeded run is reproducible end to end.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use rand_chacha::ChaCha8Rng;
use tracing::info;

use dummymaker_config::ConfigLoader;
use dummymaker_contracts::{
    config::{DatasetConfig, OutputFormat},
    error::DummyResult,
    record::DummyRecord,
};
use dummymaker_core::{rng, BoundedParetoSampler, DatasetGenerator};
use dummymaker_population::{
    PatientIncidenceTable, PoolComposition, PopulationPool, PopulationTable,
};

/// Everything a run reads before sampling starts.
#[derive(Debug)]
pub struct Inputs {
    pub config: DatasetConfig,
    pub incidence: PatientIncidenceTable,
    pub population: PopulationTable,
}

impl Inputs {
    /// Load and validate the configuration file and both statistics tables.
    pub fn load(config: &Path, incidence: &Path, population: &Path) -> DummyResult<Self> {
        let config = ConfigLoader::from_file(config)?;
        let incidence = PatientIncidenceTable::from_file(incidence)?;
        let population = PopulationTable::from_file(population)?;
        Ok(Self { config, incidence, population })
    }
}

/// Build the population pool on its own random stream.
pub fn build_pool(
    inputs: &Inputs,
    target_population: u64,
    seed: Option<u64>,
) -> DummyResult<PopulationPool<ChaCha8Rng>> {
    PopulationPool::build(
        &inputs.incidence,
        &inputs.population,
        target_population,
        rng::stream_rng(seed, rng::POPULATION_STREAM),
    )
}

/// Build the generator: pool plus medicine and symptom samplers.
pub fn build_generator(
    inputs: &Inputs,
    target_population: u64,
    seed: Option<u64>,
) -> DummyResult<DatasetGenerator<ChaCha8Rng>> {
    let medicine = BoundedParetoSampler::new(
        "medDistribution",
        &inputs.config.med_distribution,
        rng::stream_rng(seed, rng::MEDICINE_STREAM),
    )?;
    let symptom = BoundedParetoSampler::new(
        "sideDistribution",
        &inputs.config.side_distribution,
        rng::stream_rng(seed, rng::SYMPTOM_STREAM),
    )?;
    let pool = build_pool(inputs, target_population, seed)?;
    Ok(DatasetGenerator::new(Box::new(pool), medicine, symptom))
}

/// Generate the configured number of records in memory.
pub fn generate(
    inputs: &Inputs,
    target_population: u64,
    seed: Option<u64>,
) -> DummyResult<Vec<DummyRecord>> {
    let mut generator = build_generator(inputs, target_population, seed)?;
    generator.generate(inputs.config.required_record_count)
}

/// Generate, then write the dataset into `output_dir`.
///
/// The output format is resolved only after generation completes.
pub fn generate_and_write(
    inputs: &Inputs,
    target_population: u64,
    seed: Option<u64>,
    output_dir: &Path,
) -> DummyResult<PathBuf> {
    let records = generate(inputs, target_population, seed)?;
    info!(records = records.len(), "records generated; writing dataset");
    dummymaker_output::write_dataset(
        &records,
        &inputs.config.write_form,
        output_dir,
        rng::stream_rng(seed, rng::HIT_STREAM),
    )
}

/// What `check` reports about a run without generating anything.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckSummary {
    pub record_count: u64,
    pub format: OutputFormat,
    pub target_population: u64,
    pub grand_total: u64,
    pub pool_size: usize,
    pub composition: PoolComposition,
}

/// Validate the output format and build the pool, returning its summary.
pub fn check(
    inputs: &Inputs,
    target_population: u64,
    seed: Option<u64>,
) -> DummyResult<CheckSummary> {
    let format = OutputFormat::parse(&inputs.config.write_form)?;
    let pool = build_pool(inputs, target_population, seed)?;
    Ok(CheckSummary {
        record_count: inputs.config.required_record_count,
        format,
        target_population: pool.target_population(),
        grand_total: pool.grand_total(),
        pool_size: pool.size(),
        composition: pool.composition(),
    })
}

impl fmt::Display for CheckSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration OK")?;
        writeln!(f, "  records to generate : {}", self.record_count)?;
        writeln!(f, "  output format       : {} ({})", self.format, self.format.file_name())?;
        writeln!(f, "Population pool")?;
        writeln!(f, "  target population   : {}", self.target_population)?;
        writeln!(f, "  table grand total   : {}", self.grand_total)?;
        writeln!(f, "  pool size           : {}", self.pool_size)?;
        writeln!(f, "    male              : {}", self.composition.male)?;
        write!(f, "    female            : {}", self.composition.female)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
