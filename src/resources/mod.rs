//! Read-only lexical resources shared by every normalizer.
//!
//! Resources are loaded once, then handed to normalizers behind an `Arc`.
//! Nothing mutates them after construction.

mod contractions;
mod stopwords;

pub use contractions::ContractionExpander;
pub use stopwords::{StopwordSet, Stopwords};

use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::info;

use crate::config::ResourcesConfig;
use crate::error::Result;
use crate::lemma::{LemmaStage, LemmaVocabulary, RuleLemmatizer, SuffixTagger};

static SHARED: OnceCell<Arc<Resources>> = OnceCell::new();

#[derive(Debug, Clone)]
pub struct Resources {
    pub stopwords: Stopwords,
    pub contractions: ContractionExpander,
    pub lemma: LemmaStage,
}

impl Resources {
    /// Embedded English stopwords and contractions with the heuristic lemmatizer.
    pub fn english() -> Result<Self> {
        Ok(Self {
            stopwords: Stopwords::english(),
            contractions: ContractionExpander::english()?,
            lemma: LemmaStage::rule_based(),
        })
    }

    /// Builds resources, replacing built-ins with any files named in `config`.
    /// Any load failure is fatal: the pipeline cannot run without its resources.
    pub fn load(config: &ResourcesConfig) -> Result<Self> {
        let stopwords = match &config.stopwords_path {
            Some(path) => Stopwords::new(StopwordSet::load(path)?),
            None => Stopwords::english(),
        };

        let contractions = match &config.contractions_path {
            Some(path) => ContractionExpander::load(path)?,
            None => ContractionExpander::english()?,
        };

        let lemma = match &config.lemma_vocabulary_path {
            Some(path) => {
                let vocabulary = LemmaVocabulary::load(path)?;
                LemmaStage::new(
                    Arc::new(SuffixTagger::new()),
                    Arc::new(RuleLemmatizer::with_vocabulary(vocabulary)),
                )
            }
            None => LemmaStage::rule_based(),
        };

        info!(
            stopwords = stopwords.full.len(),
            contractions = contractions.len(),
            "Loaded normalization resources"
        );

        Ok(Self {
            stopwords,
            contractions,
            lemma,
        })
    }

    pub fn with_stopwords(mut self, stopwords: StopwordSet) -> Self {
        self.stopwords = Stopwords::new(stopwords);
        self
    }

    pub fn with_lemma_stage(mut self, lemma: LemmaStage) -> Self {
        self.lemma = lemma;
        self
    }

    /// Process-wide resources, loaded on first call. Later calls return the same
    /// instance and ignore `config`.
    pub fn shared(config: &ResourcesConfig) -> Result<Arc<Resources>> {
        SHARED
            .get_or_try_init(|| Resources::load(config).map(Arc::new))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_loads_builtins() {
        let resources = Resources::load(&ResourcesConfig::default()).unwrap();
        assert_eq!(resources.stopwords.full.len(), 179);
        assert!(!resources.contractions.is_empty());
    }

    #[test]
    fn test_custom_stopword_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "lol\nnot").unwrap();

        let config = ResourcesConfig {
            stopwords_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let resources = Resources::load(&config).unwrap();
        assert!(resources.stopwords.full.contains("not"));
        assert!(!resources.stopwords.without_negation.contains("not"));
        assert!(resources.stopwords.without_negation.contains("lol"));
    }

    #[test]
    fn test_missing_resource_is_fatal() {
        let config = ResourcesConfig {
            contractions_path: Some(PathBuf::from("/nonexistent/contractions.tsv")),
            ..Default::default()
        };
        assert!(Resources::load(&config).is_err());
    }

    #[test]
    fn test_shared_returns_same_instance() {
        let first = Resources::shared(&ResourcesConfig::default()).unwrap();
        let second = Resources::shared(&ResourcesConfig::default()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
