use std::sync::mpsc;
use std::thread;

use crate::config::DetectorConfig;
use crate::error::ConfigurationError;
use crate::model::extractor::NGramExtractor;
use crate::model::vector::FrequencyVector;
use crate::store::ProfileStore;

/// One candidate language with its raw distance and mapped confidence.
///
/// `distance` is the average rank displacement of the query n-grams
/// against this language's profile (lower is closer); `confidence` maps it
/// into [0, 1], higher is better.
#[derive(Clone, Debug, PartialEq)]
pub struct Score {
	pub language: String,
	pub distance: f64,
	pub confidence: f64,
}

/// The outcome of one detection, owned by the caller.
///
/// Candidates are ordered by descending confidence; ties are broken by
/// language code so identical inputs always produce identical results.
#[derive(Clone, Debug, PartialEq)]
pub struct DetectionResult {
	ranking: Vec<Score>,
	confident: bool,
}

impl DetectionResult {
	/// The result for input that produced no n-grams at all.
	pub(crate) fn unknown() -> Self {
		Self { ranking: Vec::new(), confident: false }
	}

	/// The best candidate, or `None` for degenerate input.
	pub fn best(&self) -> Option<&Score> {
		self.ranking.first()
	}

	/// The best candidate's language code.
	pub fn language(&self) -> Option<&str> {
		self.best().map(|score| score.language.as_str())
	}

	/// Whether the best candidate cleared both the confidence threshold
	/// and the margin over the runner-up.
	pub fn is_confident(&self) -> bool {
		self.confident
	}

	/// All scored candidates, best first.
	pub fn ranking(&self) -> &[Score] {
		&self.ranking
	}
}

/// The public entry point of the engine.
///
/// A detector borrows an immutable `ProfileStore` and compares query
/// texts against every profile in it. Detection holds no mutable state,
/// so one detector may serve any number of threads concurrently.
///
/// The query extractor must use the same n-gram sizes and cap as the
/// store's profiles; the mismatch is rejected once at construction
/// instead of silently biasing every score.
#[derive(Clone, Debug)]
pub struct Detector<'a> {
	store: &'a ProfileStore,
	extractor: NGramExtractor,
	confidence_threshold: f64,
	min_margin: f64,
}

impl<'a> Detector<'a> {
	/// Creates a detector whose extraction configuration is derived from
	/// the store, with default thresholds.
	///
	/// # Errors
	/// Returns a `ConfigurationError` if the store is unusable.
	pub fn new(store: &'a ProfileStore) -> Result<Self, ConfigurationError> {
		let config = DetectorConfig {
			ngram_sizes: store.ngram_sizes().to_vec(),
			cap: store.cap(),
			..DetectorConfig::default()
		};
		Self::with_config(store, config)
	}

	/// Creates a detector with an explicit configuration.
	///
	/// # Errors
	/// - Any invalid configuration parameter
	/// - `ConfigurationError::EmptyStore` for a store without profiles
	/// - `CapMismatch` / `NgramSizeMismatch` when the query configuration
	///   disagrees with the store
	pub fn with_config(store: &'a ProfileStore, config: DetectorConfig) -> Result<Self, ConfigurationError> {
		config.validate()?;
		if store.is_empty() {
			return Err(ConfigurationError::EmptyStore);
		}

		let extractor = NGramExtractor::new(&config.ngram_sizes, config.cap)?;
		if extractor.cap() != store.cap() {
			return Err(ConfigurationError::CapMismatch {
				query: extractor.cap(),
				store: store.cap(),
			});
		}
		if extractor.sizes() != store.ngram_sizes() {
			return Err(ConfigurationError::NgramSizeMismatch {
				query: extractor.sizes().to_vec(),
				store: store.ngram_sizes().to_vec(),
			});
		}

		Ok(Self {
			store,
			extractor,
			confidence_threshold: config.confidence_threshold,
			min_margin: config.min_margin,
		})
	}

	/// The store this detector scores against.
	pub fn store(&self) -> &'a ProfileStore {
		self.store
	}

	/// Detects the language of a text against the whole store.
	///
	/// Never fails: degenerate input (empty, whitespace-only, no letters)
	/// yields an empty ranking with `confident = false`.
	pub fn detect(&self, text: &str) -> DetectionResult {
		self.score(text, None)
	}

	/// Detects the language of a text among a restricted candidate set.
	///
	/// Useful when the caller already knows the document is one of a few
	/// languages; languages absent from the store are ignored.
	pub fn detect_restricted(&self, text: &str, languages: &[&str]) -> DetectionResult {
		self.score(text, Some(languages))
	}

	/// Detects lazily over a sequence of texts.
	///
	/// One result per input, in input order, no cross-input state; the
	/// caller may stop consuming at any point.
	pub fn detect_all<I>(&self, texts: I) -> impl Iterator<Item = DetectionResult>
	where
		I: IntoIterator,
		I::Item: AsRef<str>,
	{
		texts.into_iter().map(|text| self.detect(text.as_ref()))
	}

	/// Detects a batch of texts across worker threads.
	///
	/// The batch is split into per-thread chunks; results are tagged with
	/// their input index and reassembled, so the output order always
	/// matches the input order.
	pub fn detect_batch(&self, texts: &[&str]) -> Vec<DetectionResult> {
		if texts.is_empty() {
			return Vec::new();
		}

		let cpus = num_cpus::get().max(1);
		let chunk_size = texts.len().div_ceil(cpus);

		thread::scope(|scope| {
			let (tx, rx) = mpsc::channel();
			for (chunk_index, chunk) in texts.chunks(chunk_size).enumerate() {
				let tx = tx.clone();
				scope.spawn(move || {
					let base = chunk_index * chunk_size;
					for (offset, text) in chunk.iter().enumerate() {
						if tx.send((base + offset, self.detect(text))).is_err() {
							return;
						}
					}
				});
			}
			drop(tx);

			let mut results = vec![DetectionResult::unknown(); texts.len()];
			for (index, result) in rx {
				results[index] = result;
			}
			results
		})
	}

	fn score(&self, text: &str, restriction: Option<&[&str]>) -> DetectionResult {
		let query = self.extractor.extract(text);
		if query.is_empty() {
			return DetectionResult::unknown();
		}

		let cap = self.extractor.cap();
		let mut ranking = Vec::with_capacity(self.store.len());
		for profile in self.store.profiles() {
			if let Some(allowed) = restriction {
				if !allowed.contains(&profile.language()) {
					continue;
				}
			}
			let distance = rank_distance(&query, profile.vector(), cap);
			log::debug!("language `{}` scored {distance:.3}", profile.language());
			ranking.push(Score {
				language: profile.language().to_owned(),
				distance,
				confidence: 1.0 - distance / cap as f64,
			});
		}

		ranking.sort_by(|a, b| {
			a.distance
				.total_cmp(&b.distance)
				.then_with(|| a.language.cmp(&b.language))
		});

		let confident = match ranking.as_slice() {
			[] => false,
			[best] => best.confidence >= self.confidence_threshold,
			[best, second, ..] => {
				best.confidence >= self.confidence_threshold
					&& best.confidence - second.confidence >= self.min_margin
			}
		};

		DetectionResult { ranking, confident }
	}
}

/// Average rank displacement of the query against one profile.
///
/// Every query n-gram contributes either the absolute difference of its
/// ranks on both sides, or the full cap when the profile does not contain
/// it. The total is normalized by the number of query n-grams compared,
/// keeping texts of different lengths comparable.
fn rank_distance(query: &FrequencyVector, profile: &FrequencyVector, cap: usize) -> f64 {
	let mut total = 0usize;
	for (query_rank, gram) in query.entries().enumerate() {
		total += match profile.rank(gram) {
			Some(profile_rank) => query_rank.abs_diff(profile_rank),
			None => cap,
		};
	}
	total as f64 / query.len() as f64
}
