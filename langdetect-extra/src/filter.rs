use std::collections::HashMap;

use langdetect_core::detector::{DetectionResult, Detector};

use crate::script::Script;

/// A candidate-pruning heuristic applied before distance scoring.
///
/// Filters are pure: given the query text and the remaining candidate
/// language codes, they return the reduced candidate set. They compose by
/// ordered registration in an `ExtensionRegistry`, never by subclassing a
/// detector.
pub trait Filter: Send + Sync {
	fn reduce<'a>(&self, text: &str, candidates: Vec<&'a str>) -> Vec<&'a str>;
}

/// Prunes languages whose writing system cannot match the query text.
///
/// The dominant script of the text is compared against a per-language
/// script table. Languages missing from the table, and texts whose script
/// cannot be determined, are never pruned; this filter may only ever
/// remove impossible candidates.
pub struct ScriptFilter {
	scripts: HashMap<String, Vec<Script>>,
}

static DEFAULT_SCRIPTS: [(&str, &[Script]); 25] = [
	("bg", &[Script::Cyrillic]),
	("cs", &[Script::Latin]),
	("da", &[Script::Latin]),
	("de", &[Script::Latin]),
	("el", &[Script::Greek]),
	("en", &[Script::Latin]),
	("es", &[Script::Latin]),
	("et", &[Script::Latin]),
	("fi", &[Script::Latin]),
	("fr", &[Script::Latin]),
	("hu", &[Script::Latin]),
	("it", &[Script::Latin]),
	("lt", &[Script::Latin]),
	("lv", &[Script::Latin]),
	("nl", &[Script::Latin]),
	("pl", &[Script::Latin]),
	("pt", &[Script::Latin]),
	("ro", &[Script::Latin]),
	("sk", &[Script::Latin]),
	("sl", &[Script::Latin]),
	("sv", &[Script::Latin]),
	("ru", &[Script::Cyrillic]),
	("zh", &[Script::Han]),
	("ja", &[Script::Hiragana, Script::Katakana, Script::Han]),
	("ko", &[Script::Hangul]),
];

impl ScriptFilter {
	/// Creates the filter with the script table of the bundled languages.
	pub fn new() -> Self {
		let scripts = DEFAULT_SCRIPTS
			.iter()
			.map(|(language, scripts)| ((*language).to_owned(), scripts.to_vec()))
			.collect();
		Self { scripts }
	}

	/// Adds or replaces the script set of one language.
	pub fn with_language(mut self, language: &str, scripts: &[Script]) -> Self {
		self.scripts.insert(language.to_owned(), scripts.to_vec());
		self
	}
}

impl Default for ScriptFilter {
	fn default() -> Self {
		Self::new()
	}
}

impl Filter for ScriptFilter {
	fn reduce<'a>(&self, text: &str, candidates: Vec<&'a str>) -> Vec<&'a str> {
		let Some(dominant) = Script::dominant(text) else {
			return candidates;
		};
		candidates
			.into_iter()
			.filter(|language| match self.scripts.get(*language) {
				Some(scripts) => scripts.contains(&dominant),
				None => true,
			})
			.collect()
	}
}

/// An ordered collection of filters wrapping a base detector.
///
/// The registry composes heuristics around a `Detector` without touching
/// it: `compose` produces a `FilteredDetector` satisfying the same
/// detection contract.
pub struct ExtensionRegistry {
	filters: Vec<Box<dyn Filter>>,
}

impl ExtensionRegistry {
	pub fn new() -> Self {
		Self { filters: Vec::new() }
	}

	/// Appends a filter; filters run in registration order.
	pub fn register<F: Filter + 'static>(&mut self, filter: F) -> &mut Self {
		self.filters.push(Box::new(filter));
		self
	}

	/// Wraps a detector with the registered filter chain.
	pub fn compose<'a>(self, detector: Detector<'a>) -> FilteredDetector<'a> {
		FilteredDetector { detector, filters: self.filters }
	}
}

impl Default for ExtensionRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// A detector composed with a pre-scoring filter chain.
///
/// Filters reduce the candidate set in order before distance scoring. A
/// chain that eliminates every candidate falls back to unfiltered
/// scoring: an over-zealous heuristic may cost the pruning speedup but
/// can never turn a detectable text into "no result". The fallback is
/// logged as an observable event.
pub struct FilteredDetector<'a> {
	detector: Detector<'a>,
	filters: Vec<Box<dyn Filter>>,
}

impl<'a> FilteredDetector<'a> {
	/// Detects the language of a text through the filter chain.
	pub fn detect(&self, text: &str) -> DetectionResult {
		let mut candidates: Vec<&str> = self.detector.store().languages().collect();
		for filter in &self.filters {
			candidates = filter.reduce(text, candidates);
			if candidates.is_empty() {
				log::warn!("filter chain eliminated every candidate, falling back to unfiltered scoring");
				return self.detector.detect(text);
			}
		}
		self.detector.detect_restricted(text, &candidates)
	}

	/// Detects lazily over a sequence of texts, in input order.
	pub fn detect_all<I>(&self, texts: I) -> impl Iterator<Item = DetectionResult>
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		texts.into_iter().map(|text| self.detect(text.as_ref()))
	}

	/// The wrapped detector.
	pub fn inner(&self) -> &Detector<'a> {
		&self.detector
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn script_filter_keeps_only_compatible_languages() {
		let filter = ScriptFilter::new();
		let candidates = vec!["en", "fr", "bg", "ru", "el", "zh", "ja", "ko"];

		assert_eq!(filter.reduce("добрый вечер", candidates.clone()), vec!["bg", "ru"]);
		assert_eq!(filter.reduce("καλησπέρα σας", candidates.clone()), vec!["el"]);
		assert_eq!(filter.reduce("good evening", candidates.clone()), vec!["en", "fr"]);
		assert_eq!(filter.reduce("你好世界", candidates), vec!["zh", "ja"]);
	}

	#[test]
	fn script_filter_keeps_unmapped_languages() {
		let filter = ScriptFilter::new();
		assert_eq!(filter.reduce("добрый вечер", vec!["ru", "xx"]), vec!["ru", "xx"]);
	}

	#[test]
	fn script_filter_keeps_everything_for_undecidable_text() {
		let filter = ScriptFilter::new();
		let candidates = vec!["en", "ru", "zh"];
		assert_eq!(filter.reduce("12345", candidates.clone()), candidates);
	}

	#[test]
	fn script_table_can_be_extended() {
		let filter = ScriptFilter::new().with_language("sr", &[Script::Cyrillic, Script::Latin]);
		assert_eq!(filter.reduce("добро вече", vec!["sr", "en"]), vec!["sr"]);
		assert_eq!(filter.reduce("dobro veče", vec!["sr", "en"]), vec!["sr", "en"]);
	}
}
