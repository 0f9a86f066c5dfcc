//! Labelled tweet datasets: loading raw rows, cleaning them in parallel, and
//! persisting the aligned result.

mod batch;
mod loader;
mod output;

pub use batch::{BatchCleaner, BatchOutcome};
pub use loader::{decode_field, load_rows, read_rows, RawRow};
pub use output::{sha256_file, RunManifest};

use serde::{Deserialize, Serialize};

use crate::error::{NormalizerError, Result};

/// A row that passed validation: an integer label and non-empty raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub label: i64,
    pub text: String,
}

/// Cleaned texts and their labels. `texts[i]` always pairs with `labels[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanedDataset {
    texts: Vec<String>,
    labels: Vec<i64>,
}

impl CleanedDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: String, label: i64) {
        self.texts.push(text);
        self.labels.push(label);
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn labels(&self) -> &[i64] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.texts
            .iter()
            .map(String::as_str)
            .zip(self.labels.iter().copied())
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<i64>) {
        (self.texts, self.labels)
    }

    fn check_aligned(&self) -> Result<()> {
        if self.texts.len() != self.labels.len() {
            return Err(NormalizerError::Misaligned {
                texts: self.texts.len(),
                labels: self.labels.len(),
            });
        }
        Ok(())
    }
}

/// Counts for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Rows read from the input.
    pub total: usize,
    /// Records present in the cleaned dataset.
    pub kept: usize,
    /// Records whose cleaned text came out empty.
    pub dropped_empty: usize,
    /// Rows skipped for a missing text or unparseable label.
    pub invalid: usize,
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_keeps_pairs_aligned() {
        let mut dataset = CleanedDataset::new();
        dataset.push("good day".to_string(), 1);
        dataset.push("bad day".to_string(), 0);

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.labels(), &[1, 0]);
        let pairs: Vec<_> = dataset.iter().collect();
        assert_eq!(pairs, vec![("good day", 1), ("bad day", 0)]);
    }

    #[test]
    fn test_misaligned_json_is_rejected() {
        let dataset: CleanedDataset =
            serde_json::from_str(r#"{"texts": ["a", "b"], "labels": [1]}"#).unwrap();
        assert!(matches!(
            dataset.check_aligned(),
            Err(NormalizerError::Misaligned { texts: 2, labels: 1 })
        ));
    }
}
