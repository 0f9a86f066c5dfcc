use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use super::{BatchReport, CleanedDataset};
use crate::config::{CleaningConfig, OutputFormat};
use crate::constants::{DATASET_CSV_FILE, DATASET_JSON_FILE};
use crate::error::Result;

impl CleanedDataset {
    /// Writes `{"texts": [...], "labels": [...]}`.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn read_json(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let dataset: CleanedDataset = serde_json::from_reader(BufReader::new(file))?;
        dataset.check_aligned()?;
        Ok(dataset)
    }

    /// Writes a `label,text` CSV with a header row.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = csv::Writer::from_path(path.as_ref())?;
        writer.write_record(["label", "text"])?;
        for (text, label) in self.iter() {
            writer.write_record(&[label.to_string(), text.to_string()])?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Writes every requested format into `dir` and returns the paths written.
    pub fn write_all(&self, dir: impl AsRef<Path>, formats: &[OutputFormat]) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(formats.len());
        for format in formats {
            let path = match format {
                OutputFormat::Json => {
                    let path = dir.join(DATASET_JSON_FILE);
                    self.write_json(&path)?;
                    path
                }
                OutputFormat::Csv => {
                    let path = dir.join(DATASET_CSV_FILE);
                    self.write_csv(&path)?;
                    path
                }
            };
            info!(path = %path.display(), records = self.len(), "Wrote cleaned dataset");
            written.push(path);
        }
        Ok(written)
    }
}

/// Describes one batch run so its outputs can be traced back to the input
/// and the settings that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub input_path: PathBuf,
    pub input_sha256: String,
    pub cleaning: CleaningConfig,
    pub report: BatchReport,
    pub outputs: Vec<PathBuf>,
}

impl RunManifest {
    pub fn new(
        input_path: impl Into<PathBuf>,
        input_sha256: String,
        cleaning: CleaningConfig,
        report: BatchReport,
        outputs: Vec<PathBuf>,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            created_at: Utc::now(),
            input_path: input_path.into(),
            input_sha256,
            cleaning,
            report,
            outputs,
        }
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Hex-encoded SHA-256 of a file's contents.
pub fn sha256_file(path: impl AsRef<Path>) -> Result<String> {
    let mut reader = BufReader::new(File::open(path.as_ref())?);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
