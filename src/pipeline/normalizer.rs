use serde::Serialize;
use std::sync::Arc;

use super::{negation_handle, stages, Stage};
use crate::config::CleaningConfig;
use crate::resources::Resources;

/// A stage together with the text it produced.
#[derive(Debug, Clone, Serialize)]
pub struct StageOutput {
    pub stage: Stage,
    pub text: String,
}

/// Runs the enabled stages over one text, in [`Stage::ORDER`].
///
/// The normalizer holds no mutable state, so a single instance can be shared
/// across worker threads. It never fails: input that cleans down to nothing
/// yields an empty string.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    config: CleaningConfig,
    resources: Arc<Resources>,
}

impl TextNormalizer {
    pub fn new(config: CleaningConfig, resources: Arc<Resources>) -> Self {
        Self { config, resources }
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn stages(&self) -> impl Iterator<Item = Stage> + '_ {
        Stage::ORDER
            .into_iter()
            .filter(move |stage| stage.is_enabled(&self.config))
    }

    pub fn apply_stage(&self, stage: Stage, text: &str) -> String {
        let stopwords = &self.resources.stopwords;
        match stage {
            Stage::Lowercase => stages::lowercase(text),
            Stage::ExpandContractions => {
                stages::expand_contractions(text, &self.resources.contractions)
            }
            Stage::RemoveNoise => stages::remove_noise_texts(text),
            Stage::RemoveStopwordsKeepNegation => {
                stages::remove_stopwords(text, &stopwords.without_negation)
            }
            Stage::TagNegation => negation_handle(text),
            Stage::StripNonAlphabetic => {
                stages::strip_non_alphabetic(text, self.config.keep_negation_marker)
            }
            Stage::DropShortWords => stages::drop_short_words(text),
            Stage::CollapseWhitespace => stages::collapse_whitespace(text),
            Stage::Lemmatize => self.resources.lemma.apply(text),
            Stage::RemoveAllStopwords => stages::remove_stopwords(text, &stopwords.full),
            Stage::Trim => stages::trim(text),
        }
    }

    pub fn normalize(&self, text: &str) -> String {
        self.stages()
            .fold(text.to_string(), |acc, stage| self.apply_stage(stage, &acc))
    }

    /// Like [`normalize`](Self::normalize) but keeps every intermediate result.
    pub fn trace(&self, text: &str) -> Vec<StageOutput> {
        let mut current = text.to_string();
        let mut outputs = Vec::new();
        for stage in self.stages() {
            current = self.apply_stage(stage, &current);
            outputs.push(StageOutput {
                stage,
                text: current.clone(),
            });
        }
        outputs
    }
}
