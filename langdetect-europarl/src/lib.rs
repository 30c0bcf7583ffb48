//! Bundled language profiles for the European parliamentary languages.
//!
//! This crate ships corpus excerpts in the style of the Europarl parallel
//! corpus for twenty-one languages and builds a ready-to-use
//! `ProfileStore` from them. Parallel corpora keep the per-language
//! statistics comparable, which is exactly what rank-based scoring needs.
//!
//! The store is built once, at startup, outside the detection path; a
//! language whose bundled corpus cannot be turned into a profile is
//! skipped with a warning rather than failing the whole set.

use langdetect_core::config::{DEFAULT_CAP, DEFAULT_NGRAM_SIZES};
use langdetect_core::error::LoadError;
use langdetect_core::model::builder::train_corpora;
use langdetect_core::store::ProfileStore;

/// ISO 639-1 codes of the bundled parliamentary languages.
pub const EUROPARL_LANGUAGES: [&str; 21] = [
	"bg", "cs", "da", "de", "el", "en", "es", "et", "fi", "fr", "hu", "it", "lt", "lv", "nl",
	"pl", "pt", "ro", "sk", "sl", "sv",
];

static CORPORA: [(&str, &str); 21] = [
	("bg", include_str!("../corpora/bg.txt")),
	("cs", include_str!("../corpora/cs.txt")),
	("da", include_str!("../corpora/da.txt")),
	("de", include_str!("../corpora/de.txt")),
	("el", include_str!("../corpora/el.txt")),
	("en", include_str!("../corpora/en.txt")),
	("es", include_str!("../corpora/es.txt")),
	("et", include_str!("../corpora/et.txt")),
	("fi", include_str!("../corpora/fi.txt")),
	("fr", include_str!("../corpora/fr.txt")),
	("hu", include_str!("../corpora/hu.txt")),
	("it", include_str!("../corpora/it.txt")),
	("lt", include_str!("../corpora/lt.txt")),
	("lv", include_str!("../corpora/lv.txt")),
	("nl", include_str!("../corpora/nl.txt")),
	("pl", include_str!("../corpora/pl.txt")),
	("pt", include_str!("../corpora/pt.txt")),
	("ro", include_str!("../corpora/ro.txt")),
	("sk", include_str!("../corpora/sk.txt")),
	("sl", include_str!("../corpora/sl.txt")),
	("sv", include_str!("../corpora/sv.txt")),
];

/// Returns the bundled corpus excerpt for a language, if it is one of
/// the Europarl set.
pub fn corpus(language: &str) -> Option<&'static str> {
	CORPORA
		.iter()
		.find(|(code, _)| *code == language)
		.map(|(_, text)| *text)
}

/// Builds the Europarl profile store with the default configuration.
///
/// # Errors
/// Returns a `LoadError` if no usable profile survives.
pub fn europarl_store() -> Result<ProfileStore, LoadError> {
	europarl_store_with(&DEFAULT_NGRAM_SIZES, DEFAULT_CAP)
}

/// Builds the Europarl profile store with explicit n-gram sizes and cap.
///
/// Languages whose corpus produces no profile are skipped with a logged
/// warning.
///
/// # Errors
/// Returns a `LoadError` if no usable profile survives or the
/// configuration is invalid.
pub fn europarl_store_with(sizes: &[usize], cap: usize) -> Result<ProfileStore, LoadError> {
	train_corpora(&CORPORA, sizes, cap)
}
