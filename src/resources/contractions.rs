//! Contraction dictionary and expander.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{NormalizerError, Result};

/// Built-in English contractions, including the unambiguous forms people type
/// without an apostrophe. Forms that collide with ordinary words (`its`, `were`,
/// `well`, `ill`, `hell`, `shell`, `wed`, `id`) are deliberately absent.
const ENGLISH_CONTRACTIONS: &[(&str, &str)] = &[
    ("ain't", "are not"),
    ("aren't", "are not"),
    ("can't", "cannot"),
    ("can't've", "cannot have"),
    ("could've", "could have"),
    ("couldn't", "could not"),
    ("couldn't've", "could not have"),
    ("didn't", "did not"),
    ("doesn't", "does not"),
    ("don't", "do not"),
    ("hadn't", "had not"),
    ("hasn't", "has not"),
    ("haven't", "have not"),
    ("he'd", "he would"),
    ("he'll", "he will"),
    ("he's", "he is"),
    ("here's", "here is"),
    ("how'd", "how did"),
    ("how'll", "how will"),
    ("how's", "how is"),
    ("i'd", "i would"),
    ("i'll", "i will"),
    ("i'm", "i am"),
    ("i've", "i have"),
    ("isn't", "is not"),
    ("it'd", "it would"),
    ("it'll", "it will"),
    ("it's", "it is"),
    ("let's", "let us"),
    ("ma'am", "madam"),
    ("mightn't", "might not"),
    ("might've", "might have"),
    ("mustn't", "must not"),
    ("must've", "must have"),
    ("needn't", "need not"),
    ("o'clock", "of the clock"),
    ("shan't", "shall not"),
    ("she'd", "she would"),
    ("she'll", "she will"),
    ("she's", "she is"),
    ("should've", "should have"),
    ("shouldn't", "should not"),
    ("that'd", "that would"),
    ("that'll", "that will"),
    ("that's", "that is"),
    ("there'd", "there would"),
    ("there'll", "there will"),
    ("there's", "there is"),
    ("they'd", "they would"),
    ("they'll", "they will"),
    ("they're", "they are"),
    ("they've", "they have"),
    ("wasn't", "was not"),
    ("we'd", "we would"),
    ("we'll", "we will"),
    ("we're", "we are"),
    ("we've", "we have"),
    ("weren't", "were not"),
    ("what'll", "what will"),
    ("what're", "what are"),
    ("what's", "what is"),
    ("what've", "what have"),
    ("when's", "when is"),
    ("where'd", "where did"),
    ("where's", "where is"),
    ("who'd", "who would"),
    ("who'll", "who will"),
    ("who's", "who is"),
    ("who've", "who have"),
    ("why's", "why is"),
    ("won't", "will not"),
    ("would've", "would have"),
    ("wouldn't", "would not"),
    ("y'all", "you all"),
    ("you'd", "you would"),
    ("you'll", "you will"),
    ("you're", "you are"),
    ("you've", "you have"),
    // apostrophe-less
    ("aint", "are not"),
    ("arent", "are not"),
    ("cant", "cannot"),
    ("couldnt", "could not"),
    ("didnt", "did not"),
    ("doesnt", "does not"),
    ("dont", "do not"),
    ("hadnt", "had not"),
    ("hasnt", "has not"),
    ("havent", "have not"),
    ("im", "i am"),
    ("isnt", "is not"),
    ("ive", "i have"),
    ("mustnt", "must not"),
    ("shouldnt", "should not"),
    ("thats", "that is"),
    ("theyre", "they are"),
    ("theyve", "they have"),
    ("wasnt", "was not"),
    ("werent", "were not"),
    ("whats", "what is"),
    ("wont", "will not"),
    ("wouldnt", "would not"),
    ("youre", "you are"),
    ("youve", "you have"),
    // slang
    ("dunno", "do not know"),
    ("gimme", "give me"),
    ("gonna", "going to"),
    ("gotta", "got to"),
    ("lemme", "let me"),
    ("wanna", "want to"),
];

/// Expands contractions using a whole-word, case-insensitive dictionary lookup.
#[derive(Debug, Clone)]
pub struct ContractionExpander {
    table: BTreeMap<String, String>,
    pattern: Option<Regex>,
}

impl ContractionExpander {
    pub fn english() -> Result<Self> {
        Self::from_table(english_table())
    }

    /// Builds an expander from `contraction -> expansion` pairs. Keys must begin
    /// and end with a word character so they can be matched as whole words.
    pub fn from_table(table: BTreeMap<String, String>) -> Result<Self> {
        let table: BTreeMap<String, String> = table
            .into_iter()
            .map(|(k, v)| (normalize_apostrophes(&k).to_lowercase(), v))
            .collect();

        if let Some(bad) = table.keys().find(|k| !is_word_bounded(k)) {
            return Err(NormalizerError::resource(
                "contractions",
                format!("entry '{}' must start and end with a letter or digit", bad),
            ));
        }

        // Longest first so `can't've` wins over `can't`
        let mut keys: Vec<&String> = table.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        let alternation = keys
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = if alternation.is_empty() {
            None
        } else {
            let re = Regex::new(&format!(r"(?i)\b(?:{})\b", alternation))
                .map_err(|e| NormalizerError::resource("contractions", e))?;
            Some(re)
        };

        Ok(Self { table, pattern })
    }

    /// Parses `contraction<TAB>expansion` lines; `#` starts a comment line.
    pub fn parse_table(content: &str) -> Result<BTreeMap<String, String>> {
        let mut table = BTreeMap::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once('\t').ok_or_else(|| {
                NormalizerError::resource(
                    "contractions",
                    format!("line {}: expected '<contraction>\\t<expansion>'", idx + 1),
                )
            })?;
            table.insert(key.trim().to_string(), value.trim().to_string());
        }
        Ok(table)
    }

    /// Loads a contraction file and merges it over the built-in English table.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let resource = format!("contractions from '{}'", path.display());
        let file = File::open(path).map_err(|e| NormalizerError::resource(&resource, e))?;

        let mut content = String::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| NormalizerError::resource(&resource, e))?;
            content.push_str(&line);
            content.push('\n');
        }

        let mut table = english_table();
        table.extend(Self::parse_table(&content)?);
        Self::from_table(table)
    }

    /// Replaces every whole-word contraction. A capitalized contraction yields a
    /// capitalized expansion; typographic apostrophes are treated as `'`.
    pub fn expand(&self, text: &str) -> String {
        let text = normalize_apostrophes(text);
        let Some(pattern) = &self.pattern else {
            return text;
        };
        pattern
            .replace_all(&text, |caps: &Captures| {
                let found = &caps[0];
                match self.table.get(&found.to_lowercase()) {
                    Some(expansion) if starts_uppercase(found) => capitalize(expansion),
                    Some(expansion) => expansion.clone(),
                    None => found.to_string(),
                }
            })
            .into_owned()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn english_table() -> BTreeMap<String, String> {
    ENGLISH_CONTRACTIONS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn normalize_apostrophes(text: &str) -> String {
    text.replace(['\u{2019}', '\u{2018}'], "'")
}

fn is_word_bounded(key: &str) -> bool {
    let mut chars = key.chars();
    match (chars.next(), key.chars().last()) {
        (Some(first), Some(last)) => first.is_alphanumeric() && last.is_alphanumeric(),
        _ => false,
    }
}

fn starts_uppercase(s: &str) -> bool {
    s.chars().next().map(char::is_uppercase).unwrap_or(false)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_expands_sentence() {
        let expander = ContractionExpander::english().unwrap();
        assert_eq!(
            expander.expand("i dont know where he'll go."),
            "i do not know where he will go."
        );
    }

    #[test]
    fn test_whole_words_only() {
        let expander = ContractionExpander::english().unwrap();
        // `he's` inside `she's` must not be matched separately
        assert_eq!(expander.expand("she's here"), "she is here");
        assert_eq!(expander.expand("image imdont"), "image imdont");
        assert_eq!(expander.expand("its well"), "its well");
    }

    #[test]
    fn test_longest_match_wins() {
        let expander = ContractionExpander::english().unwrap();
        assert_eq!(expander.expand("can't've"), "cannot have");
    }

    #[test]
    fn test_preserves_leading_capital() {
        let expander = ContractionExpander::english().unwrap();
        assert_eq!(expander.expand("Don't stop"), "Do not stop");
        assert_eq!(expander.expand("I'm fine"), "I am fine");
    }

    #[test]
    fn test_typographic_apostrophe() {
        let expander = ContractionExpander::english().unwrap();
        assert_eq!(expander.expand("it\u{2019}s late"), "it is late");
    }

    #[test]
    fn test_possessive_is_left_alone() {
        let expander = ContractionExpander::english().unwrap();
        assert_eq!(expander.expand("@jordan's troll"), "@jordan's troll");
    }

    #[test]
    fn test_rejects_unbounded_keys() {
        let mut table = BTreeMap::new();
        table.insert("'s".to_string(), "is".to_string());
        assert!(ContractionExpander::from_table(table).is_err());
    }

    #[test]
    fn test_empty_table_is_identity() {
        let expander = ContractionExpander::from_table(BTreeMap::new()).unwrap();
        assert!(expander.is_empty());
        assert_eq!(expander.expand("don't"), "don't");
    }

    #[test]
    fn test_load_merges_over_builtin() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# slang").unwrap();
        writeln!(file, "idk\ti do not know").unwrap();

        let expander = ContractionExpander::load(file.path()).unwrap();
        assert_eq!(expander.expand("idk, don't ask"), "i do not know, do not ask");
    }

    #[test]
    fn test_parse_table_rejects_malformed_line() {
        assert!(ContractionExpander::parse_table("idk i do not know").is_err());
    }
}
