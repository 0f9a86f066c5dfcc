//! The text normalization pipeline: a fixed sequence of pure stages.

mod negation;
mod normalizer;
pub mod stages;

pub use negation::negation_handle;
pub use normalizer::{StageOutput, TextNormalizer};
pub use stages::remove_noise_texts;

use serde::Serialize;
use std::fmt;

use crate::config::CleaningConfig;

/// One step of the pipeline. [`Stage::ORDER`] is the only order stages run in;
/// non-alphabetic stripping depends on artifacts of the stages before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Lowercase,
    ExpandContractions,
    RemoveNoise,
    RemoveStopwordsKeepNegation,
    TagNegation,
    StripNonAlphabetic,
    DropShortWords,
    CollapseWhitespace,
    Lemmatize,
    RemoveAllStopwords,
    Trim,
}

impl Stage {
    pub const ORDER: [Stage; 11] = [
        Stage::Lowercase,
        Stage::ExpandContractions,
        Stage::RemoveNoise,
        Stage::RemoveStopwordsKeepNegation,
        Stage::TagNegation,
        Stage::StripNonAlphabetic,
        Stage::DropShortWords,
        Stage::CollapseWhitespace,
        Stage::Lemmatize,
        Stage::RemoveAllStopwords,
        Stage::Trim,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Lowercase => "lowercase",
            Stage::ExpandContractions => "expand_contractions",
            Stage::RemoveNoise => "remove_noise",
            Stage::RemoveStopwordsKeepNegation => "remove_stopwords_keep_negation",
            Stage::TagNegation => "tag_negation",
            Stage::StripNonAlphabetic => "strip_non_alphabetic",
            Stage::DropShortWords => "drop_short_words",
            Stage::CollapseWhitespace => "collapse_whitespace",
            Stage::Lemmatize => "lemmatize",
            Stage::RemoveAllStopwords => "remove_all_stopwords",
            Stage::Trim => "trim",
        }
    }

    /// Whether the stage runs under `config`. Unconditional stages always do.
    pub fn is_enabled(&self, config: &CleaningConfig) -> bool {
        match self {
            Stage::RemoveStopwordsKeepNegation | Stage::TagNegation => config.handle_negation,
            Stage::Lemmatize => config.lemmatize,
            Stage::RemoveAllStopwords => config.remove_all_stopwords,
            _ => true,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_runs_unconditional_stages_only() {
        let config = CleaningConfig::default();
        let enabled: Vec<Stage> = Stage::ORDER
            .into_iter()
            .filter(|s| s.is_enabled(&config))
            .collect();
        assert_eq!(
            enabled,
            vec![
                Stage::Lowercase,
                Stage::ExpandContractions,
                Stage::RemoveNoise,
                Stage::StripNonAlphabetic,
                Stage::DropShortWords,
                Stage::CollapseWhitespace,
                Stage::Trim,
            ]
        );
    }

    #[test]
    fn test_negation_stages_precede_stripping() {
        let position = |stage| Stage::ORDER.iter().position(|s| *s == stage).unwrap();
        assert!(position(Stage::TagNegation) < position(Stage::StripNonAlphabetic));
        assert!(position(Stage::RemoveStopwordsKeepNegation) < position(Stage::TagNegation));
        assert!(position(Stage::Lemmatize) < position(Stage::RemoveAllStopwords));
        assert_eq!(Stage::ORDER.last(), Some(&Stage::Trim));
    }
}
