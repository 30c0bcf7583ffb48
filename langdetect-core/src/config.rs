use crate::error::ConfigurationError;
use crate::model::extractor::normalize_sizes;

/// Default n-gram sizes extracted from texts and corpora.
pub const DEFAULT_NGRAM_SIZES: [usize; 5] = [1, 2, 3, 4, 5];

/// Default number of top-ranked n-grams retained per frequency vector.
pub const DEFAULT_CAP: usize = 300;

/// Default minimum confidence of the best candidate for a confident result.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Default minimum confidence gap between the two best candidates.
pub const DEFAULT_MIN_MARGIN: f64 = 0.05;

/// Constructor-time configuration for a `Detector`.
///
/// The n-gram sizes and the cap must match the attached profile store
/// exactly; both sides of a detection are built with the same pipeline,
/// otherwise ranks are not comparable. The thresholds only shape the
/// `confident` flag, never the ranking itself.
///
/// # Invariants
/// - `ngram_sizes` is non-empty and contains no zero
/// - `cap > 0`
/// - `confidence_threshold` lies within [0, 1]
/// - `min_margin >= 0`
#[derive(Clone, Debug, PartialEq)]
pub struct DetectorConfig {
	/// N-gram sizes used for query extraction.
	pub ngram_sizes: Vec<usize>,
	/// Maximum number of ranked n-grams per frequency vector.
	pub cap: usize,
	/// Minimum confidence of the best candidate.
	pub confidence_threshold: f64,
	/// Minimum confidence gap to the second-best candidate.
	pub min_margin: f64,
}

impl Default for DetectorConfig {
	fn default() -> Self {
		Self {
			ngram_sizes: DEFAULT_NGRAM_SIZES.to_vec(),
			cap: DEFAULT_CAP,
			confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
			min_margin: DEFAULT_MIN_MARGIN,
		}
	}
}

impl DetectorConfig {
	/// Checks every invariant of the configuration.
	///
	/// # Errors
	/// Returns the first violated invariant as a `ConfigurationError`.
	pub fn validate(&self) -> Result<(), ConfigurationError> {
		normalize_sizes(&self.ngram_sizes)?;
		if self.cap == 0 {
			return Err(ConfigurationError::InvalidCap);
		}
		if !(0.0..=1.0).contains(&self.confidence_threshold) {
			return Err(ConfigurationError::InvalidThreshold);
		}
		if self.min_margin < 0.0 {
			return Err(ConfigurationError::InvalidMargin);
		}
		Ok(())
	}
}
