use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::PosTagger;

/// Closed-class words and frequent irregular forms with fixed tags.
static LEXICON: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let groups: &[(&str, &[&str])] = &[
        ("DT", &["the", "a", "an", "this", "that", "these", "those", "every", "each", "some", "any", "all", "both", "either", "neither"]),
        ("PRP", &["i", "me", "you", "he", "him", "she", "her", "it", "we", "us", "they", "them", "myself", "yourself", "himself", "herself", "itself", "ourselves", "themselves"]),
        ("PRP$", &["my", "your", "his", "its", "our", "their", "mine", "yours", "ours", "theirs"]),
        ("IN", &["in", "on", "at", "of", "for", "with", "from", "by", "about", "into", "over", "under", "after", "before", "through", "between", "without", "during", "against", "because", "if", "while", "than", "as", "since", "until", "upon", "within", "like"]),
        ("CC", &["and", "or", "but", "nor", "yet"]),
        ("MD", &["can", "could", "will", "would", "shall", "should", "may", "might", "must", "cannot"]),
        ("TO", &["to"]),
        ("RB", &["not", "never", "very", "too", "also", "just", "really", "so", "already", "always", "often", "here", "there", "now", "then", "again", "still", "even", "ever", "quite", "rather", "soon", "today", "tonight", "tomorrow", "yesterday", "indeed", "no"]),
        ("WP", &["what", "who", "whom", "which"]),
        ("WRB", &["when", "where", "why", "how"]),
        ("UH", &["oh", "hey", "yes", "yeah", "lol", "omg", "wow", "ok", "okay", "haha", "hi", "hello"]),
        ("VB", &["be", "have", "do", "go", "get", "need", "see", "know", "make", "take", "come", "think", "want", "say", "feel", "love", "hate", "miss"]),
        ("VBP", &["am", "are"]),
        ("VBZ", &["is", "has", "does", "goes"]),
        ("VBD", &["was", "were", "had", "did", "went", "got", "saw", "made", "said", "took", "came", "knew", "thought", "told", "felt", "left", "ran", "began", "bought", "brought", "caught", "ate", "gave", "wrote", "found", "kept", "slept", "lost", "paid", "sat", "stood", "won", "heard", "meant", "met", "sent", "spent", "built", "fell", "forgot", "chose", "drove", "broke", "spoke"]),
        ("VBN", &["been", "done", "gone", "gotten", "seen", "taken", "known", "given", "eaten", "written", "begun", "fallen", "forgotten", "chosen", "driven", "broken", "spoken"]),
        ("VBG", &["being", "having", "doing", "going"]),
        ("JJ", &["good", "bad", "great", "happy", "sad", "nice", "new", "old", "big", "small", "little", "long", "short", "high", "low", "hot", "cold", "sick", "tired", "awesome", "cool", "fun", "sorry", "glad", "sure", "ready", "free", "busy", "late", "early"]),
        ("JJR", &["better", "worse", "bigger", "smaller", "happier", "sadder", "older", "newer", "longer", "hotter", "colder", "nicer"]),
        ("JJS", &["best", "worst", "biggest", "smallest", "happiest", "oldest", "newest", "longest", "hottest", "coldest", "nicest"]),
        ("NN", &["day", "time", "today", "night", "morning", "work", "school", "home", "news", "class", "bus", "boss", "miss"]),
        ("NNS", &["people", "children", "men", "women", "feet", "teeth", "mice", "geese", "days", "friends", "things"]),
    ];

    let mut lexicon = HashMap::new();
    for (tag, words) in groups {
        for word in *words {
            lexicon.entry(*word).or_insert(*tag);
        }
    }
    lexicon
});

const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "able", "ible", "ive", "less", "ic", "al", "ish", "ary"];

/// Heuristic Penn Treebank tagger: a closed-class lexicon first, then suffix
/// rules, with a one-token lookbehind for base verbs after modals and `to`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixTagger;

impl SuffixTagger {
    pub fn new() -> Self {
        Self
    }

    fn tag_word(word: &str, previous: Option<&str>) -> &'static str {
        let lower = word.to_lowercase();
        if let Some(tag) = LEXICON.get(lower.as_str()) {
            return *tag;
        }
        if lower.chars().all(|c| c.is_ascii_digit()) {
            return "CD";
        }
        if matches!(previous, Some("MD") | Some("TO")) {
            return "VB";
        }

        let len = lower.len();
        if lower.ends_with("ly") && len > 4 {
            "RB"
        } else if lower.ends_with("ing") && len > 4 {
            "VBG"
        } else if lower.ends_with("ed") && !lower.ends_with("eed") && len > 3 {
            "VBD"
        } else if ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s) && len > s.len() + 2) {
            "JJ"
        } else if lower.ends_with('s')
            && !lower.ends_with("ss")
            && !lower.ends_with("us")
            && !lower.ends_with("is")
            && len > 3
        {
            "NNS"
        } else {
            "NN"
        }
    }
}

impl PosTagger for SuffixTagger {
    fn tag(&self, tokens: &[&str]) -> Vec<String> {
        let mut tags: Vec<String> = Vec::with_capacity(tokens.len());
        for token in tokens {
            let previous = tags.last().map(String::as_str);
            let tag = Self::tag_word(token, previous);
            tags.push(tag.to_string());
        }
        tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<String> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        SuffixTagger::new().tag(&tokens)
    }

    #[test]
    fn test_closed_class_words() {
        assert_eq!(tags("the dog and i"), vec!["DT", "NN", "CC", "PRP"]);
    }

    #[test]
    fn test_suffix_rules() {
        assert_eq!(
            tags("quickly running walked wonderful cats"),
            vec!["RB", "VBG", "VBD", "JJ", "NNS"]
        );
    }

    #[test]
    fn test_base_verb_after_modal() {
        assert_eq!(tags("will dance"), vec!["MD", "VB"]);
        assert_eq!(tags("to dance"), vec!["TO", "VB"]);
    }

    #[test]
    fn test_ambiguous_endings_stay_nouns() {
        assert_eq!(tags("class bus need"), vec!["NN", "NN", "VB"]);
    }

    #[test]
    fn test_one_tag_per_token() {
        assert_eq!(tags("").len(), 0);
        assert_eq!(tags("a b c d e").len(), 5);
    }
}
