use thiserror::Error;

#[derive(Error, Debug)]
pub enum NormalizerError {
    #[error("invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },

    #[error("failed to load {resource}: {reason}")]
    ResourceLoad { resource: String, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),

    #[error("dataset has {texts} texts but {labels} labels")]
    Misaligned { texts: usize, labels: usize },
}

impl NormalizerError {
    pub fn resource(resource: impl Into<String>, reason: impl ToString) -> Self {
        NormalizerError::ResourceLoad {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }

    pub fn invalid_record(row: usize, reason: impl Into<String>) -> Self {
        NormalizerError::InvalidRecord {
            row,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizerError>;
