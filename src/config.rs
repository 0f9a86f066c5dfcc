use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{
    CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, LABEL_COLUMN, SENTIMENT140_COLUMNS, TEXT_COLUMN,
};
use crate::error::{NormalizerError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub cleaning: CleaningConfig,
    pub resources: ResourcesConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
    pub batch: BatchConfig,
}

/// Selects which optional pipeline stages run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Filter stopwords (keeping negation markers) and tag negated words.
    pub handle_negation: bool,
    /// Remove every stopword, negation markers included, near the end of the pipeline.
    pub remove_all_stopwords: bool,
    /// Reduce words to their base form.
    pub lemmatize: bool,
    /// Keep the uppercase `NEG` prefix through non-alphabetic stripping.
    /// When off, stripping keeps only `a-z` and the marker is erased.
    pub keep_negation_marker: bool,
}

/// Optional overrides for the built-in lexical resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// One stopword per line; replaces the embedded English list.
    pub stopwords_path: Option<PathBuf>,
    /// `contraction<TAB>expansion` per line; merged over the embedded table.
    pub contractions_path: Option<PathBuf>,
    /// Known lemmas, one per line; restricts rule-based lemmatization to real words.
    pub lemma_vocabulary_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidRecordPolicy {
    /// Log and count the record, then continue.
    #[default]
    Skip,
    /// Abort the batch on the first invalid record.
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRemap {
    pub from: i64,
    pub to: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Whether the first CSV row holds column names.
    pub has_headers: bool,
    /// Column names for headerless files.
    pub columns: Vec<String>,
    pub label_column: String,
    pub text_column: String,
    pub invalid_records: InvalidRecordPolicy,
    pub label_remap: Vec<LabelRemap>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            has_headers: false,
            columns: SENTIMENT140_COLUMNS.iter().map(|c| c.to_string()).collect(),
            label_column: LABEL_COLUMN.to_string(),
            text_column: TEXT_COLUMN.to_string(),
            invalid_records: InvalidRecordPolicy::Skip,
            // Sentiment140 encodes positive tweets as 4
            label_remap: vec![LabelRemap { from: 4, to: 1 }],
        }
    }
}

impl InputConfig {
    pub fn remap_label(&self, label: i64) -> i64 {
        self.label_remap
            .iter()
            .find(|r| r.from == label)
            .map(|r| r.to)
            .unwrap_or(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub formats: Vec<OutputFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            formats: vec![OutputFormat::Json],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Worker threads for batch cleaning; 0 uses one per core.
    pub threads: usize,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config_content = fs::read_to_string(path).map_err(|e| {
            NormalizerError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Resolves configuration from an explicit path, then `TWEET_NORMALIZER_CONFIG`,
    /// then `normalizer.toml` in the working directory. Falls back to defaults
    /// only when no path was requested and the default file is absent.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return Self::load(path.trim());
            }
        }
        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            return Self::load(default_path);
        }
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.cleaning.handle_negation);
        assert!(!config.cleaning.lemmatize);
        assert!(!config.input.has_headers);
        assert_eq!(config.input.columns.len(), 6);
        assert_eq!(config.input.invalid_records, InvalidRecordPolicy::Skip);
        assert_eq!(config.output.formats, vec![OutputFormat::Json]);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [cleaning]
            handle_negation = true
            remove_all_stopwords = true

            [input]
            invalid_records = "fail"
            label_remap = []

            [output]
            formats = ["json", "csv"]
            "#,
        )
        .unwrap();

        assert!(config.cleaning.handle_negation);
        assert!(config.cleaning.remove_all_stopwords);
        assert!(!config.cleaning.keep_negation_marker);
        assert_eq!(config.input.invalid_records, InvalidRecordPolicy::Fail);
        assert_eq!(config.input.text_column, "text");
        assert_eq!(config.input.remap_label(4), 4);
        assert_eq!(config.output.formats.len(), 2);
        assert_eq!(config.batch.threads, 0);
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let config = Config::from_toml_str(include_str!("../normalizer.example.toml")).unwrap();
        let defaults = Config::default();
        assert_eq!(config.cleaning, defaults.cleaning);
        assert_eq!(config.input.columns, defaults.input.columns);
        assert_eq!(config.input.label_remap, defaults.input.label_remap);
        assert_eq!(config.output.directory, defaults.output.directory);
        assert!(config.resources.stopwords_path.is_none());
    }

    #[test]
    fn test_label_remap() {
        let input = InputConfig::default();
        assert_eq!(input.remap_label(4), 1);
        assert_eq!(input.remap_label(0), 0);
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let err = Config::load("/nonexistent/normalizer.toml").unwrap_err();
        assert!(matches!(err, NormalizerError::Config(_)));
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let err = Config::from_toml_str("[cleaning]\nhandle_negation = \"yes\"").unwrap_err();
        assert!(matches!(err, NormalizerError::Toml(_)));
    }
}
