use sitekit::tokenizer::tokenize;

#[test]
fn it_normalizes_and_stems() {
    let toks = tokenize("Running Runners RUN! Ｗｉｄｇｅｔｓ");
    let words: Vec<String> = toks.into_iter().map(|(w, _)| w).collect();
    assert!(words.contains(&"run".to_string()));
    // fullwidth letters fold to ASCII under NFKC
    assert!(words.contains(&"widget".to_string()));
}

#[test]
fn it_filters_stopwords() {
    let toks = tokenize("The quick brown fox and the lazy dog");
    let words: Vec<String> = toks.into_iter().map(|(w, _)| w).collect();
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert!(words.contains(&"fox".to_string()));
}

#[test]
fn numbers_alone_are_not_terms() {
    assert!(tokenize("2019 42").is_empty());
    assert_eq!(tokenize("v2 release").len(), 2);
}
