//! Part-of-speech-driven lemmatization.
//!
//! The stage tags every whitespace token, maps the tag onto one of four word
//! classes and asks a [`Lemmatizer`] for the base form. Tokens whose tag maps to
//! no class pass through unchanged. Taggers and lemmatizers are traits so a
//! no-op implementation can stand in for the rule-based one.

mod morphy;
mod tagger;

pub use morphy::{LemmaVocabulary, RuleLemmatizer};
pub use tagger::SuffixTagger;

use std::sync::Arc;

use crate::constants::NEGATION_TAG;

/// The word classes a lemma can be looked up under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordClass {
    Adjective,
    Noun,
    Verb,
    Adverb,
}

impl WordClass {
    /// Maps a Penn Treebank tag by its first letter: `J`, `N`, `V`, `R`.
    pub fn from_penn_tag(tag: &str) -> Option<Self> {
        match tag.chars().next()? {
            'J' => Some(WordClass::Adjective),
            'N' => Some(WordClass::Noun),
            'V' => Some(WordClass::Verb),
            'R' => Some(WordClass::Adverb),
            _ => None,
        }
    }
}

/// Assigns a Penn Treebank tag to each token, in order.
pub trait PosTagger: Send + Sync {
    fn tag(&self, tokens: &[&str]) -> Vec<String>;
}

/// Reduces a word to its dictionary form for the given class.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, word: &str, class: WordClass) -> String;
}

/// Returns every word unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLemmatizer;

impl Lemmatizer for NoopLemmatizer {
    fn lemmatize(&self, word: &str, _class: WordClass) -> String {
        word.to_string()
    }
}

/// Tagger + lemmatizer pair applied to whole texts.
#[derive(Clone)]
pub struct LemmaStage {
    tagger: Arc<dyn PosTagger>,
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl std::fmt::Debug for LemmaStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LemmaStage").finish_non_exhaustive()
    }
}

impl LemmaStage {
    pub fn new(tagger: Arc<dyn PosTagger>, lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        Self { tagger, lemmatizer }
    }

    /// Heuristic tagger with rule-based lemmas and no vocabulary.
    pub fn rule_based() -> Self {
        Self::new(Arc::new(SuffixTagger::new()), Arc::new(RuleLemmatizer::new()))
    }

    pub fn noop() -> Self {
        Self::new(Arc::new(SuffixTagger::new()), Arc::new(NoopLemmatizer))
    }

    /// Lemmatizes each token and rejoins with single spaces. A `NEG` prefix is
    /// set aside while the word underneath is tagged and reduced.
    pub fn apply(&self, text: &str) -> String {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.is_empty() {
            return String::new();
        }

        let bare: Vec<&str> = tokens.iter().map(|t| strip_marker(t).1).collect();
        let tags = self.tagger.tag(&bare);

        tokens
            .iter()
            .zip(bare.iter())
            .zip(tags.iter())
            .map(|((token, word), tag)| {
                let (marker, _) = strip_marker(token);
                match WordClass::from_penn_tag(tag) {
                    Some(class) => format!("{}{}", marker, self.lemmatizer.lemmatize(word, class)),
                    None => token.to_string(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn strip_marker(token: &str) -> (&str, &str) {
    match token.strip_prefix(NEGATION_TAG) {
        Some(rest) if !rest.is_empty() => (NEGATION_TAG, rest),
        _ => ("", token),
    }
}
