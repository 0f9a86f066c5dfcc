use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::constants::{MANIFEST_FILE, METRICS_FILE};
use crate::dataset::{load_rows, sha256_file, BatchCleaner, CleanedDataset, RunManifest};
use crate::error::Result;
use crate::metrics::{self, BatchMetrics};
use crate::pipeline::TextNormalizer;
use crate::resources::Resources;

/// What a finished batch run produced.
#[derive(Debug, Clone)]
pub struct CleanRun {
    pub dataset: CleanedDataset,
    pub manifest: RunManifest,
}

/// Cleans a labelled CSV file and writes the dataset, a run manifest and a
/// metrics snapshot into the configured output directory.
pub struct CleanUseCase {
    config: Config,
}

impl CleanUseCase {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    #[instrument(skip(self), fields(input = %input.display()))]
    pub fn run(&self, input: &Path) -> Result<CleanRun> {
        let load_started = Instant::now();
        let resources = Arc::new(Resources::load(&self.config.resources)?);
        BatchMetrics::record_resource_load(load_started.elapsed().as_secs_f64());

        let normalizer = TextNormalizer::new(self.config.cleaning, resources);
        let cleaner = BatchCleaner::new(normalizer, self.config.batch.threads)?;

        let input_sha256 = sha256_file(input)?;
        let rows = load_rows(input, &self.config.input)?;
        let outcome = cleaner.clean_rows(rows, &self.config.input)?;

        let out_dir = &self.config.output.directory;
        let outputs = outcome
            .dataset
            .write_all(out_dir, &self.config.output.formats)?;

        let manifest = RunManifest::new(
            input,
            input_sha256,
            self.config.cleaning,
            outcome.report,
            outputs,
        );
        manifest.write(out_dir.join(MANIFEST_FILE))?;
        info!(run_id = %manifest.run_id, "Wrote run manifest");

        match metrics::render() {
            Some(snapshot) => fs::write(out_dir.join(METRICS_FILE), snapshot)?,
            None => warn!("Metrics recorder not installed, skipping {}", METRICS_FILE),
        }

        Ok(CleanRun {
            dataset: outcome.dataset,
            manifest,
        })
    }
}
