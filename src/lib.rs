pub mod app;
pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod lemma;
pub mod logging;
pub mod metrics;
pub mod pipeline;
pub mod resources;

pub use config::{CleaningConfig, Config};
pub use dataset::{BatchCleaner, BatchReport, CleanedDataset, Record, RunManifest};
pub use error::{NormalizerError, Result};
pub use pipeline::{negation_handle, remove_noise_texts, Stage, TextNormalizer};
pub use resources::Resources;
