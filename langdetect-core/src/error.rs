use thiserror::Error;

/// A broken setup: empty or inconsistent profile sets, invalid engine
/// parameters, or a mismatch between the query configuration and the
/// attached store.
///
/// These errors are surfaced at construction or load time and are never
/// retried; a detector cannot be built over a misconfigured store.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigurationError {
	/// The profile store contains no profiles.
	#[error("profile store contains no profiles")]
	EmptyStore,

	/// Two profiles in the same set share a language code.
	#[error("duplicate language code `{0}` in profile set")]
	DuplicateLanguage(String),

	/// The n-gram size set is empty or contains zero.
	#[error("n-gram sizes must be a non-empty set of positive integers")]
	InvalidNgramSizes,

	/// The frequency vector cap is zero.
	#[error("n-gram cap must be greater than zero")]
	InvalidCap,

	/// The confidence threshold is outside [0, 1].
	#[error("confidence threshold must be within [0, 1]")]
	InvalidThreshold,

	/// The confidence margin is negative.
	#[error("minimum confidence margin must not be negative")]
	InvalidMargin,

	/// A profile failed load-time validation.
	#[error("profile for `{language}` is malformed: {reason}")]
	MalformedProfile { language: String, reason: String },

	/// The query extractor and the attached store use different caps.
	///
	/// An asymmetric cap silently biases every score, so this is rejected
	/// once at attach time instead of being tolerated per call.
	#[error("query cap {query} does not match store cap {store}")]
	CapMismatch { query: usize, store: usize },

	/// The query extractor and the attached store use different n-gram sizes.
	#[error("query n-gram sizes {query:?} do not match store sizes {store:?}")]
	NgramSizeMismatch { query: Vec<usize>, store: Vec<usize> },

	/// Profiles within one set disagree on cap or n-gram sizes.
	#[error("profiles `{first}` and `{second}` disagree on n-gram configuration")]
	InconsistentProfiles { first: String, second: String },
}

/// A profile source that could not be turned into a usable store.
///
/// A failed load yields no store at all; there is no partially-usable
/// state to recover.
#[derive(Debug, Error)]
pub enum LoadError {
	/// The profile source could not be read.
	#[error("failed to read profile source")]
	Io(#[from] std::io::Error),

	/// The binary profile data could not be decoded.
	#[error("failed to decode binary profile data")]
	Binary(#[from] postcard::Error),

	/// The JSON profile data could not be decoded.
	#[error("failed to decode profile JSON")]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Configuration(#[from] ConfigurationError),

	#[error(transparent)]
	Training(#[from] TrainingError),
}

/// A corpus that could not be turned into a profile.
///
/// Raised only on the producer side; the runtime detection path never
/// trains and never sees this error.
#[derive(Debug, Error, PartialEq)]
pub enum TrainingError {
	/// The corpus produced no n-grams at all.
	#[error("corpus for language `{0}` produced no n-grams")]
	EmptyCorpus(String),
}
