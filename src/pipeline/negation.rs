use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{NEGATION_CUES, NEGATION_TAG};

static NEGATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let cues = NEGATION_CUES.join("|");
    Regex::new(&format!(r"\b({})(\s+)([a-z]+)", cues)).unwrap()
});

/// Prefixes the word following a negation cue with `NEG`.
///
/// Matches are leftmost-first and non-overlapping, so in `not no fun` the first
/// match consumes `no` as the tagged word and `fun` stays untouched. The cue and
/// the whitespace after it are preserved as written.
pub fn negation_handle(text: &str) -> String {
    NEGATION_PATTERN
        .replace_all(text, format!("${{1}}${{2}}{}${{3}}", NEGATION_TAG).as_str())
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_word_after_cue() {
        assert_eq!(
            negation_handle("I do not like the food. I like the movie."),
            "I do not NEGlike the food. I like the movie."
        );
    }

    #[test]
    fn test_every_cue_word() {
        assert_eq!(negation_handle("no way"), "no NEGway");
        assert_eq!(negation_handle("never again"), "never NEGagain");
        assert_eq!(negation_handle("i cannot wait"), "i cannot NEGwait");
    }

    #[test]
    fn test_multiple_matches_left_to_right() {
        assert_eq!(
            negation_handle("not good and never happy"),
            "not NEGgood and never NEGhappy"
        );
    }

    #[test]
    fn test_adjacent_cues_first_match_wins() {
        assert_eq!(negation_handle("not no fun"), "not NEGno fun");
        assert_eq!(negation_handle("no not never good"), "no NEGnot never NEGgood");
    }

    #[test]
    fn test_trailing_cue_is_untouched() {
        assert_eq!(negation_handle("i said no"), "i said no");
        assert_eq!(negation_handle("not"), "not");
    }

    #[test]
    fn test_cue_must_be_whole_word() {
        assert_eq!(negation_handle("nothing good"), "nothing good");
        assert_eq!(negation_handle("piano lesson"), "piano lesson");
        assert_eq!(negation_handle("knot tied"), "knot tied");
    }

    #[test]
    fn test_requires_lowercase_word_after_whitespace() {
        assert_eq!(negation_handle("no, thanks"), "no, thanks");
        assert_eq!(negation_handle("not Bad"), "not Bad");
        assert_eq!(negation_handle("not  \tbad"), "not  \tNEGbad");
    }
}
