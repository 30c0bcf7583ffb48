//! Extra languages and detection heuristics layered over the core.
//!
//! This crate extends the Europarl profile set with Russian, Chinese,
//! Japanese and Korean, trained from bundled excerpts in the style of
//! Project Gutenberg prose. Literary corpora are not parallel with the
//! parliamentary ones, so accuracy on closely related languages is more
//! limited than within the Europarl set; the script pre-filter exists to
//! compensate for most of that.
//!
//! It also provides the composition layer: the `Filter` capability
//! interface, the dominant-script pruning heuristic, and
//! `ExtensionRegistry` for wrapping any `Detector` with an ordered filter
//! chain.

use langdetect_core::config::{DEFAULT_CAP, DEFAULT_NGRAM_SIZES};
use langdetect_core::detector::Detector;
use langdetect_core::error::{ConfigurationError, LoadError};
use langdetect_core::model::builder::train_corpora;
use langdetect_core::store::ProfileStore;
use langdetect_europarl::europarl_store_with;

use crate::filter::{ExtensionRegistry, FilteredDetector, ScriptFilter};

/// Filter composition: the `Filter` trait, `ScriptFilter`,
/// `ExtensionRegistry` and `FilteredDetector`.
pub mod filter;

/// Coarse writing-system classification used by the script filter.
pub mod script;

/// ISO 639-1 codes of the languages added on top of the Europarl set.
pub const EXTRA_LANGUAGES: [&str; 4] = ["ru", "zh", "ja", "ko"];

static CORPORA: [(&str, &str); 4] = [
	("ru", include_str!("../corpora/ru.txt")),
	("zh", include_str!("../corpora/zh.txt")),
	("ja", include_str!("../corpora/ja.txt")),
	("ko", include_str!("../corpora/ko.txt")),
];

/// Returns the bundled corpus excerpt for one of the extra languages.
pub fn corpus(language: &str) -> Option<&'static str> {
	CORPORA
		.iter()
		.find(|(code, _)| *code == language)
		.map(|(_, text)| *text)
}

/// Builds a store holding only the extra languages, default configuration.
///
/// # Errors
/// Returns a `LoadError` if no usable profile survives.
pub fn extra_store() -> Result<ProfileStore, LoadError> {
	extra_store_with(&DEFAULT_NGRAM_SIZES, DEFAULT_CAP)
}

/// Builds a store holding only the extra languages with explicit n-gram
/// sizes and cap.
pub fn extra_store_with(sizes: &[usize], cap: usize) -> Result<ProfileStore, LoadError> {
	train_corpora(&CORPORA, sizes, cap)
}

/// Builds the combined store: the Europarl set plus the extra languages.
///
/// # Errors
/// Returns a `LoadError` if either source fails to build or the merge is
/// rejected.
pub fn uber_store() -> Result<ProfileStore, LoadError> {
	uber_store_with(&DEFAULT_NGRAM_SIZES, DEFAULT_CAP)
}

/// Builds the combined store with explicit n-gram sizes and cap.
pub fn uber_store_with(sizes: &[usize], cap: usize) -> Result<ProfileStore, LoadError> {
	let europarl = europarl_store_with(sizes, cap)?;
	let extra = extra_store_with(sizes, cap)?;
	Ok(ProfileStore::merged(&[&europarl, &extra])?)
}

/// Wraps a detector over the given store with the script pre-filter.
///
/// # Errors
/// Returns a `ConfigurationError` if the store cannot back a detector.
pub fn uber_detector(store: &ProfileStore) -> Result<FilteredDetector<'_>, ConfigurationError> {
	let detector = Detector::new(store)?;
	let mut registry = ExtensionRegistry::new();
	registry.register(ScriptFilter::new());
	Ok(registry.compose(detector))
}
