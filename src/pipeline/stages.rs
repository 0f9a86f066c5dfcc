//! The individual text transformations. Each is a pure `&str -> String`
//! function so it can be exercised on its own.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::resources::{ContractionExpander, StopwordSet};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+").unwrap());
static MENTION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").unwrap());
static HASHTAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"#\w+").unwrap());
static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)https?://\S+|www\.\S+|\b[\w-]+(?:\.[\w-]+)*\.(?:com|net|org|edu|gov|io|co|me|ly|info|biz|us|uk|ca|de|tv)\b(?:/\S*)?",
    )
    .unwrap()
});
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

pub fn expand_contractions(text: &str, expander: &ContractionExpander) -> String {
    expander.expand(text)
}

/// Collapses every run of three or more identical characters to a single one
/// (`happyyyyy` -> `happy`). Runs of two are left alone; newlines never collapse.
pub fn collapse_repeated_chars(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }
        if run >= 3 && c != '\n' {
            out.push(c);
        } else {
            out.extend(std::iter::repeat(c).take(run));
        }
        i += run;
    }
    out
}

/// Strips noise in a fixed order: repeated characters, emails, mentions,
/// hashtags, then URLs. Removed spans become a single space.
pub fn remove_noise_texts(text: &str) -> String {
    let text = collapse_repeated_chars(text);
    let text = EMAIL_REGEX.replace_all(&text, " ");
    let text = MENTION_REGEX.replace_all(&text, " ");
    let text = HASHTAG_REGEX.replace_all(&text, " ");
    URL_REGEX.replace_all(&text, " ").into_owned()
}

/// Drops whitespace-separated tokens that are exact members of `stopwords`.
/// Tokens still carrying punctuation (`dog,`) are compared as written.
pub fn remove_stopwords(text: &str, stopwords: &StopwordSet) -> String {
    text.split_whitespace()
        .filter(|w| !stopwords.contains(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replaces every character outside `a-z` with a space. With `keep_uppercase`
/// the alphabet widens to `a-zA-Z`, which lets the `NEG` marker through.
pub fn strip_non_alphabetic(text: &str, keep_uppercase: bool) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_lowercase() || (keep_uppercase && c.is_ascii_uppercase()) {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Removes words of one character or fewer.
pub fn drop_short_words(text: &str) -> String {
    text.split_whitespace()
        .filter(|w| w.chars().count() > 1)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").into_owned()
}

pub fn trim(text: &str) -> String {
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_repeated_chars() {
        assert_eq!(collapse_repeated_chars("happyyyyy"), "happy");
        assert_eq!(collapse_repeated_chars("soooo good!!!"), "so good!");
        assert_eq!(collapse_repeated_chars("cool"), "cool");
        assert_eq!(collapse_repeated_chars("a\n\n\nb"), "a\n\n\nb");
        assert_eq!(collapse_repeated_chars(""), "");
    }

    #[test]
    fn test_remove_noise_texts() {
        let cleaned = remove_noise_texts(
            "Hey @someone_on_Twitter I have so many feelingssssssssssss about this #Tag",
        );
        assert!(!cleaned.contains('@'));
        assert!(!cleaned.contains("someone_on_Twitter"));
        assert!(!cleaned.contains("#Tag"));
        assert!(cleaned.contains("feelings about"));
        assert!(!cleaned.contains("feelingss"));
        assert_eq!(collapse_whitespace(&cleaned).trim(), "Hey I have so many feelings about this");
    }

    #[test]
    fn test_removes_emails() {
        let cleaned = remove_noise_texts("mail prankster@troll.com, now");
        assert_eq!(collapse_whitespace(&cleaned), "mail now");
    }

    #[test]
    fn test_removes_urls() {
        for input in [
            "see http://t.co/abc123 now",
            "see https://example.org/path?q=1 now",
            "see www.google.com now",
            "see google.com/search now",
            "see bit.ly now",
        ] {
            assert_eq!(collapse_whitespace(&remove_noise_texts(input)), "see now", "{input}");
        }
    }

    #[test]
    fn test_sentence_end_is_not_a_url() {
        assert_eq!(remove_noise_texts("a troll. he left"), "a troll. he left");
    }

    #[test]
    fn test_remove_stopwords() {
        let stopwords = StopwordSet::from_words(["the", "a"]);
        assert_eq!(remove_stopwords("  the cat  and a dog ", &stopwords), "cat and dog");
        assert_eq!(remove_stopwords("the, cat", &stopwords), "the, cat");
    }

    #[test]
    fn test_strip_non_alphabetic() {
        assert_eq!(strip_non_alphabetic("it's 2 good!", false), "it s   good ");
        assert_eq!(strip_non_alphabetic("not NEGbad", false), "not    bad");
        assert_eq!(strip_non_alphabetic("not NEGbad", true), "not NEGbad");
        assert_eq!(strip_non_alphabetic("café", false), "caf ");
    }

    #[test]
    fn test_strip_non_alphabetic_is_idempotent() {
        for input in ["Hello, World! 123", "not NEGbad...", "", "¿qué?", "tabs\tand\nlines"] {
            for keep in [false, true] {
                let once = strip_non_alphabetic(input, keep);
                assert_eq!(strip_non_alphabetic(&once, keep), once);
            }
        }
    }

    #[test]
    fn test_drop_short_words() {
        assert_eq!(drop_short_words("i think a cat s ok"), "think cat ok");
        assert_eq!(drop_short_words("a"), "");
    }

    #[test]
    fn test_collapse_whitespace_keeps_single_edges() {
        assert_eq!(collapse_whitespace("  a \t\n b  "), " a b ");
    }
}
