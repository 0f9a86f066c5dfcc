use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::{Lemmatizer, WordClass};
use crate::error::{NormalizerError, Result};

/// Irregular forms that no suffix rule can reach.
static EXCEPTIONS: Lazy<HashMap<WordClass, HashMap<&'static str, &'static str>>> = Lazy::new(|| {
    let verbs: &[(&str, &str)] = &[
        ("am", "be"), ("are", "be"), ("is", "be"), ("was", "be"), ("were", "be"),
        ("been", "be"), ("being", "be"), ("has", "have"), ("had", "have"),
        ("having", "have"), ("does", "do"), ("did", "do"), ("done", "do"),
        ("goes", "go"), ("went", "go"), ("gone", "go"), ("got", "get"),
        ("gotten", "get"), ("saw", "see"), ("seen", "see"), ("made", "make"),
        ("said", "say"), ("took", "take"), ("taken", "take"), ("came", "come"),
        ("knew", "know"), ("known", "know"), ("thought", "think"), ("told", "tell"),
        ("felt", "feel"), ("left", "leave"), ("ran", "run"), ("began", "begin"),
        ("begun", "begin"), ("bought", "buy"), ("brought", "bring"),
        ("caught", "catch"), ("ate", "eat"), ("eaten", "eat"), ("gave", "give"),
        ("given", "give"), ("wrote", "write"), ("written", "write"),
        ("found", "find"), ("kept", "keep"), ("slept", "sleep"), ("lost", "lose"),
        ("paid", "pay"), ("sat", "sit"), ("stood", "stand"), ("won", "win"),
        ("heard", "hear"), ("meant", "mean"), ("met", "meet"), ("sent", "send"),
        ("spent", "spend"), ("built", "build"), ("fell", "fall"),
        ("fallen", "fall"), ("forgot", "forget"), ("forgotten", "forget"),
        ("chose", "choose"), ("chosen", "choose"), ("drove", "drive"),
        ("driven", "drive"), ("broke", "break"), ("broken", "break"),
        ("spoke", "speak"), ("spoken", "speak"), ("died", "die"), ("lied", "lie"),
        ("agreed", "agree"), ("freed", "free"), ("seeing", "see"),
    ];
    let nouns: &[(&str, &str)] = &[
        ("children", "child"), ("men", "man"), ("women", "woman"), ("feet", "foot"),
        ("teeth", "tooth"), ("mice", "mouse"), ("geese", "goose"),
        ("people", "people"), ("news", "news"), ("series", "series"),
        ("species", "species"), ("lens", "lens"), ("physics", "physics"),
    ];
    let adjectives: &[(&str, &str)] = &[
        ("better", "good"), ("best", "good"), ("worse", "bad"), ("worst", "bad"),
        ("further", "far"), ("farther", "far"), ("furthest", "far"),
    ];

    [
        (WordClass::Verb, verbs),
        (WordClass::Noun, nouns),
        (WordClass::Adjective, adjectives),
    ]
    .into_iter()
    .map(|(class, pairs)| (class, pairs.iter().copied().collect::<HashMap<_, _>>()))
    .collect()
});

// WordNet detachment rules, tried in order
const NOUN_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
    ("s", ""),
];
const VERB_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("ied", "y"),
    ("es", "e"),
    ("es", ""),
    ("ed", "e"),
    ("ed", ""),
    ("ing", "e"),
    ("ing", ""),
    ("s", ""),
];
const ADJECTIVE_RULES: &[(&str, &str)] = &[
    ("iest", "y"),
    ("ier", "y"),
    ("er", ""),
    ("est", ""),
    ("er", "e"),
    ("est", "e"),
];

/// Set of known base forms used to validate rule output.
#[derive(Debug, Clone, Default)]
pub struct LemmaVocabulary {
    words: HashSet<String>,
}

impl LemmaVocabulary {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads one lemma per line (first whitespace-separated field).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let resource = format!("lemma vocabulary from '{}'", path.display());
        let file = File::open(path).map_err(|e| NormalizerError::resource(&resource, e))?;

        let mut words = HashSet::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| NormalizerError::resource(&resource, e))?;
            if let Some(word) = line.split_whitespace().next() {
                if !word.starts_with('#') {
                    words.insert(word.to_lowercase());
                }
            }
        }
        Ok(Self { words })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// WordNet-style lemmatizer: exception table, then suffix detachment.
///
/// With a vocabulary, the shortest candidate found in it wins (the word itself
/// included), mirroring WordNet's morphy. Without one, a fixed heuristic picks a
/// single candidate, undoubling final consonants and restoring a silent `e`.
#[derive(Debug, Clone, Default)]
pub struct RuleLemmatizer {
    vocabulary: Option<LemmaVocabulary>,
}

impl RuleLemmatizer {
    pub fn new() -> Self {
        Self { vocabulary: None }
    }

    pub fn with_vocabulary(vocabulary: LemmaVocabulary) -> Self {
        Self {
            vocabulary: Some(vocabulary),
        }
    }

    fn rules(class: WordClass) -> &'static [(&'static str, &'static str)] {
        match class {
            WordClass::Noun => NOUN_RULES,
            WordClass::Verb => VERB_RULES,
            WordClass::Adjective => ADJECTIVE_RULES,
            WordClass::Adverb => &[],
        }
    }

    fn lemmatize_with_vocabulary(word: &str, class: WordClass, vocabulary: &LemmaVocabulary) -> String {
        let mut candidates: Vec<String> = Vec::new();
        if vocabulary.contains(word) {
            candidates.push(word.to_string());
        }
        for (suffix, replacement) in Self::rules(class) {
            if let Some(stem) = word.strip_suffix(suffix) {
                if stem.is_empty() {
                    continue;
                }
                let candidate = format!("{}{}", stem, replacement);
                if vocabulary.contains(&candidate) {
                    candidates.push(candidate);
                }
                if let Some(undoubled) = undouble(stem) {
                    if vocabulary.contains(undoubled) {
                        candidates.push(undoubled.to_string());
                    }
                }
            }
        }

        candidates
            .into_iter()
            .min_by_key(|c| c.len())
            .unwrap_or_else(|| word.to_string())
    }

    fn lemmatize_heuristic(word: &str, class: WordClass) -> String {
        match class {
            WordClass::Noun => heuristic_noun(word),
            WordClass::Verb => heuristic_verb(word),
            WordClass::Adjective => heuristic_adjective(word),
            WordClass::Adverb => word.to_string(),
        }
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize(&self, word: &str, class: WordClass) -> String {
        let lower = word.to_lowercase();
        if let Some(lemma) = EXCEPTIONS
            .get(&class)
            .and_then(|forms| forms.get(lower.as_str()))
        {
            return lemma.to_string();
        }
        match &self.vocabulary {
            Some(vocabulary) => Self::lemmatize_with_vocabulary(&lower, class, vocabulary),
            None => Self::lemmatize_heuristic(&lower, class),
        }
    }
}

fn heuristic_noun(word: &str) -> String {
    if word.len() <= 3 || word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    for (suffix, replacement) in NOUN_RULES {
        if let Some(stem) = word.strip_suffix(suffix) {
            if *suffix == "ies" && word.len() <= 4 {
                continue;
            }
            if *suffix == "men" && stem.len() < 2 {
                continue;
            }
            return format!("{}{}", stem, replacement);
        }
    }
    word.to_string()
}

fn heuristic_verb(word: &str) -> String {
    let len = word.len();
    if len > 4 {
        if let Some(stem) = word.strip_suffix("ies").or_else(|| word.strip_suffix("ied")) {
            return format!("{}y", stem);
        }
    }
    if let Some(stem) = word.strip_suffix("es") {
        if ["s", "x", "z", "ch", "sh", "o"].iter().any(|s| stem.ends_with(s)) {
            return stem.to_string();
        }
    }
    if word.ends_with("eed") {
        return word.to_string();
    }
    if len > 3 {
        if let Some(stem) = word.strip_suffix("ed") {
            return finish_stem(stem).unwrap_or_else(|| word.to_string());
        }
    }
    if len > 4 {
        if let Some(stem) = word.strip_suffix("ing") {
            return finish_stem(stem).unwrap_or_else(|| word.to_string());
        }
    }
    if let Some(stem) = word.strip_suffix('s') {
        if !word.ends_with("ss") && len > 3 {
            return stem.to_string();
        }
    }
    word.to_string()
}

fn heuristic_adjective(word: &str) -> String {
    for (suffix, replacement) in [("iest", "y"), ("ier", "y")] {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.len() >= 2 {
                return format!("{}{}", stem, replacement);
            }
        }
    }
    for suffix in ["est", "er"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.len() >= 3 {
                if let Some(base) = finish_stem(stem) {
                    return base;
                }
            }
        }
    }
    word.to_string()
}

/// Repairs a stem left by stripping `ed`/`ing`/`er`/`est`. `None` when the stem
/// has no vowel, which means the suffix was part of the word (`bring`, `shed`).
fn finish_stem(stem: &str) -> Option<String> {
    if !stem.chars().any(is_vowel) {
        return None;
    }
    if let Some(undoubled) = undouble(stem) {
        return Some(undoubled.to_string());
    }
    if needs_silent_e(stem) {
        return Some(format!("{}e", stem));
    }
    Some(stem.to_string())
}

/// `runn` -> `run`. Doubled `l`, `s`, `f` and `z` are kept (`tall`, `pass`).
fn undouble(stem: &str) -> Option<&str> {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 3 && bytes[n - 1] == bytes[n - 2] && b"bdgmnprt".contains(&bytes[n - 1]) {
        Some(&stem[..n - 1])
    } else {
        None
    }
}

fn needs_silent_e(stem: &str) -> bool {
    let chars: Vec<char> = stem.chars().collect();
    let n = chars.len();
    let Some(&last) = chars.last() else {
        return false;
    };

    if last == 'v' || last == 'c' || stem.ends_with("iz") || stem.ends_with("dg") {
        return true;
    }

    // short consonant-vowel-consonant stems: mak(e), lov(e), us(e)
    let consonant_end = !is_vowel(last) && !"wxy".contains(last);
    match n {
        2 => consonant_end && is_vowel(chars[0]),
        3 => consonant_end && is_vowel(chars[1]) && !is_vowel(chars[0]),
        _ => false,
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}
