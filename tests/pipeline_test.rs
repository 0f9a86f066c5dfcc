use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

use tweet_normalizer::config::ResourcesConfig;
use tweet_normalizer::resources::StopwordSet;
use tweet_normalizer::{negation_handle, remove_noise_texts, CleaningConfig, Resources, Stage, TextNormalizer};

const TWEET: &str = "Just got an email from prankster@troll.com, I think it's @Jordan's troll. He told me in the mail that he really don't like my dog, but he did like a cat. #IHateJordan";

#[test]
fn test_public_helpers() {
    assert_eq!(
        negation_handle("I do not like the food. I like the movie."),
        "I do not NEGlike the food. I like the movie."
    );
    let cleaned = remove_noise_texts("Hey @someone_on_Twitter I have so many feelingssssssssssss about this #Tag");
    assert!(cleaned.contains("feelings"));
    assert!(!cleaned.contains('@'));
    assert!(!cleaned.contains('#'));
}

#[test]
fn test_sample_tweet_with_inert_stopwords() {
    let resources = Resources::english().unwrap().with_stopwords(StopwordSet::empty());
    let normalizer = TextNormalizer::new(
        CleaningConfig {
            handle_negation: true,
            remove_all_stopwords: true,
            ..Default::default()
        },
        Arc::new(resources),
    );
    assert_eq!(
        normalizer.normalize(TWEET),
        "just got an email from think it is troll he told me in the mail that he really do not like my dog but he did like cat"
    );
}

#[test]
fn test_normalize_is_deterministic_across_threads() {
    let normalizer = Arc::new(TextNormalizer::new(
        CleaningConfig {
            handle_negation: true,
            lemmatize: true,
            ..Default::default()
        },
        Arc::new(Resources::english().unwrap()),
    ));
    let expected = normalizer.normalize(TWEET);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let normalizer = Arc::clone(&normalizer);
            std::thread::spawn(move || normalizer.normalize(TWEET))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_custom_resource_files() {
    let mut stopwords = NamedTempFile::new().unwrap();
    writeln!(stopwords, "# project stopwords\nlol\nnot").unwrap();
    let mut contractions = NamedTempFile::new().unwrap();
    writeln!(contractions, "smh\tshaking my head").unwrap();

    let resources = Resources::load(&ResourcesConfig {
        stopwords_path: Some(stopwords.path().to_path_buf()),
        contractions_path: Some(contractions.path().to_path_buf()),
        lemma_vocabulary_path: None,
    })
    .unwrap();
    let normalizer = TextNormalizer::new(
        CleaningConfig {
            remove_all_stopwords: true,
            ..Default::default()
        },
        Arc::new(resources),
    );

    assert_eq!(normalizer.normalize("lol smh, not again"), "shaking my head again");
}

#[test]
fn test_trace_lists_enabled_stages_in_order() {
    let normalizer = TextNormalizer::new(
        CleaningConfig::default(),
        Arc::new(Resources::english().unwrap()),
    );
    let trace = normalizer.trace("Hello World!!!");
    let stages: Vec<Stage> = trace.iter().map(|step| step.stage).collect();
    assert_eq!(stages.first(), Some(&Stage::Lowercase));
    assert_eq!(stages.last(), Some(&Stage::Trim));
    assert!(!stages.contains(&Stage::TagNegation));
    assert_eq!(trace.last().unwrap().text, "hello world");
}
