use langdetect_core::detector::Detector;
use langdetect_europarl::{EUROPARL_LANGUAGES, corpus, europarl_store};

fn init_logging() {
	let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn store_contains_every_bundled_language() {
	init_logging();
	let store = europarl_store().unwrap();
	assert_eq!(store.len(), EUROPARL_LANGUAGES.len());
	for language in EUROPARL_LANGUAGES {
		assert!(store.get(language).is_some(), "missing profile for `{language}`");
	}
}

#[test]
fn every_language_detects_its_own_corpus_confidently() {
	init_logging();
	let store = europarl_store().unwrap();
	let detector = Detector::new(&store).unwrap();

	for language in EUROPARL_LANGUAGES {
		let text = corpus(language).unwrap();
		let result = detector.detect(text);
		assert_eq!(
			result.language(),
			Some(language),
			"corpus for `{language}` was detected as {:?}",
			result.language()
		);
		assert!(result.is_confident(), "detection of `{language}` corpus was not confident");
	}
}

#[test]
fn short_sentences_detect_their_language() {
	init_logging();
	let store = europarl_store().unwrap();
	let detector = Detector::new(&store).unwrap();

	for language in ["en", "de", "fi", "hu", "el"] {
		let first_line = corpus(language).unwrap().lines().next().unwrap();
		let result = detector.detect(first_line);
		assert_eq!(
			result.language(),
			Some(language),
			"`{first_line}` was detected as {:?}",
			result.language()
		);
	}
}

#[test]
fn degenerate_input_is_not_confident() {
	init_logging();
	let store = europarl_store().unwrap();
	let detector = Detector::new(&store).unwrap();

	for text in ["", "   \t  \n", "42 + 17 = 59"] {
		let result = detector.detect(text);
		assert!(result.best().is_none());
		assert!(!result.is_confident());
	}
}

#[test]
fn detection_is_deterministic_across_calls() {
	init_logging();
	let store = europarl_store().unwrap();
	let detector = Detector::new(&store).unwrap();

	let text = corpus("fr").unwrap();
	assert_eq!(detector.detect(text), detector.detect(text));
}

#[test]
fn batch_detection_preserves_corpus_order() {
	init_logging();
	let store = europarl_store().unwrap();
	let detector = Detector::new(&store).unwrap();

	let languages = ["sv", "pt", "cs"];
	let texts: Vec<&str> = languages.iter().map(|language| corpus(language).unwrap()).collect();
	let results = detector.detect_batch(&texts);

	assert_eq!(results.len(), languages.len());
	for (language, result) in languages.iter().zip(&results) {
		assert_eq!(result.language(), Some(*language));
	}
}
