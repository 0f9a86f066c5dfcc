/// Stopwords kept when stopwords are filtered ahead of negation tagging.
pub const NEGATION_MARKERS: &[&str] = &["not", "no", "nor"];

/// Words that trigger tagging of the word that follows them.
pub const NEGATION_CUES: &[&str] = &["not", "no", "never", "cannot"];

/// Prefix glued onto a negated word.
pub const NEGATION_TAG: &str = "NEG";

/// Column layout of the headerless Sentiment140 export.
pub const SENTIMENT140_COLUMNS: &[&str] = &["label", "id", "date", "query", "user", "text"];

pub const LABEL_COLUMN: &str = "label";
pub const TEXT_COLUMN: &str = "text";

// Environment overrides
pub const CONFIG_PATH_ENV: &str = "TWEET_NORMALIZER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "normalizer.toml";

// Output artifact names inside the output directory
pub const DATASET_JSON_FILE: &str = "dataset.json";
pub const DATASET_CSV_FILE: &str = "dataset.csv";
pub const MANIFEST_FILE: &str = "manifest.json";
pub const METRICS_FILE: &str = "metrics.prom";
