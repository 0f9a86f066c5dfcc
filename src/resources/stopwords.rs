//! Stopword sets and the negation-preserving variant derived from them.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::constants::NEGATION_MARKERS;
use crate::error::{NormalizerError, Result};

const ENGLISH_STOPWORDS: &str = include_str!("data/english_stopwords.txt");

/// An immutable set of stopwords.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// The embedded NLTK English list (179 words).
    pub fn english() -> Self {
        Self::parse(ENGLISH_STOPWORDS)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses one word per line. Blank lines and `#` comments are ignored;
    /// words are trimmed and lowercased.
    pub fn parse(content: &str) -> Self {
        Self::from_words(content.lines().filter_map(clean_line))
    }

    /// Reads a stopword file. The handle is closed before returning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let resource = format!("stopwords from '{}'", path.display());
        let file = File::open(path).map_err(|e| NormalizerError::resource(&resource, e))?;

        let mut words = HashSet::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| NormalizerError::resource(&resource, e))?;
            if let Some(word) = clean_line(&line) {
                words.insert(word);
            }
        }

        if words.is_empty() {
            return Err(NormalizerError::resource(resource, "file contains no stopwords"));
        }
        Ok(Self { words })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// A copy of this set with `excluded` removed.
    pub fn without(&self, excluded: &[&str]) -> Self {
        Self {
            words: self
                .words
                .iter()
                .filter(|w| !excluded.contains(&w.as_str()))
                .cloned()
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn clean_line(line: &str) -> Option<String> {
    let word = line.trim();
    if word.is_empty() || word.starts_with('#') {
        None
    } else {
        Some(word.to_lowercase())
    }
}

/// The two stopword variants the pipeline filters with.
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    /// Every stopword, negation markers included.
    pub full: StopwordSet,
    /// The full set minus `not`, `no` and `nor`.
    pub without_negation: StopwordSet,
}

impl Stopwords {
    pub fn new(full: StopwordSet) -> Self {
        let without_negation = full.without(NEGATION_MARKERS);
        Self {
            full,
            without_negation,
        }
    }

    pub fn english() -> Self {
        Self::new(StopwordSet::english())
    }
}
