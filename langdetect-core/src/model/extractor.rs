use std::collections::HashMap;

use super::vector::FrequencyVector;
use crate::error::ConfigurationError;

/// Marker character padding every normalized word.
///
/// Leading and trailing markers keep edge n-grams distinguishable from
/// interior ones, and runs of whitespace, punctuation or digits all
/// collapse into this single boundary.
pub const BOUNDARY: char = '_';

/// Sorts, deduplicates and checks a requested n-gram size set.
///
/// # Errors
/// Returns `ConfigurationError::InvalidNgramSizes` if the set is empty or
/// contains zero.
pub(crate) fn normalize_sizes(sizes: &[usize]) -> Result<Vec<usize>, ConfigurationError> {
	if sizes.is_empty() || sizes.contains(&0) {
		return Err(ConfigurationError::InvalidNgramSizes);
	}
	let mut sizes = sizes.to_vec();
	sizes.sort_unstable();
	sizes.dedup();
	Ok(sizes)
}

/// Splits a text into normalized, boundary-padded words.
///
/// - Unicode lowercasing, character by character
/// - Any non-alphabetic character terminates the current word
/// - Each word carries exactly one leading and one trailing `BOUNDARY`
fn padded_words(text: &str) -> Vec<String> {
	let mut words = Vec::new();
	let mut current = String::new();

	for c in text.chars() {
		if c.is_alphabetic() {
			if current.is_empty() {
				current.push(BOUNDARY);
			}
			current.extend(c.to_lowercase());
		} else if !current.is_empty() {
			current.push(BOUNDARY);
			words.push(std::mem::take(&mut current));
		}
	}
	if !current.is_empty() {
		current.push(BOUNDARY);
		words.push(current);
	}

	words
}

/// Accumulates raw n-gram counts until they are frozen into ranks.
///
/// Ties in the final ranking are broken by first observation order, so
/// feeding the same texts in the same order always yields the same vector.
#[derive(Debug, Default)]
pub(crate) struct GramCounter {
	counts: HashMap<String, GramStat>,
	observed: usize,
}

#[derive(Debug)]
struct GramStat {
	count: u64,
	first_seen: usize,
}

impl GramCounter {
	/// Counts every n-gram of the requested sizes in `text`.
	///
	/// Words shorter than a requested size contribute no n-grams of that
	/// size.
	pub(crate) fn feed(&mut self, text: &str, sizes: &[usize]) {
		for word in padded_words(text) {
			let chars: Vec<char> = word.chars().collect();
			for &size in sizes {
				if chars.len() < size {
					continue;
				}
				for window in chars.windows(size) {
					self.observe(window.iter().collect());
				}
			}
		}
	}

	fn observe(&mut self, gram: String) {
		let order = self.observed;
		let stat = self.counts.entry(gram).or_insert(GramStat { count: 0, first_seen: order });
		stat.count += 1;
		self.observed += 1;
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Freezes the accumulated counts into a ranked vector.
	///
	/// N-grams are sorted by descending count (ties by first observation),
	/// assigned ranks from 0 and truncated to the top `cap` entries.
	pub(crate) fn into_vector(self, cap: usize) -> FrequencyVector {
		let mut entries: Vec<(String, GramStat)> = self.counts.into_iter().collect();
		entries.sort_by(|a, b| {
			b.1.count
				.cmp(&a.1.count)
				.then_with(|| a.1.first_seen.cmp(&b.1.first_seen))
		});
		entries.truncate(cap);
		FrequencyVector::from_ranked(entries.into_iter().map(|(gram, _)| gram).collect())
	}
}

/// Converts raw text into a ranked n-gram frequency vector.
///
/// The same extractor configuration must be used to build profiles and to
/// build query vectors; ranks from differently configured extractors are
/// not comparable.
///
/// # Invariants
/// - `sizes` is sorted, deduplicated, non-empty and free of zero
/// - At most `cap` entries survive into any produced vector
#[derive(Clone, Debug, PartialEq)]
pub struct NGramExtractor {
	sizes: Vec<usize>,
	cap: usize,
}

impl NGramExtractor {
	/// Creates an extractor for the given n-gram sizes and cap.
	///
	/// # Errors
	/// Returns a `ConfigurationError` if the size set or the cap is invalid.
	pub fn new(sizes: &[usize], cap: usize) -> Result<Self, ConfigurationError> {
		let sizes = normalize_sizes(sizes)?;
		if cap == 0 {
			return Err(ConfigurationError::InvalidCap);
		}
		Ok(Self { sizes, cap })
	}

	pub fn sizes(&self) -> &[usize] {
		&self.sizes
	}

	pub fn cap(&self) -> usize {
		self.cap
	}

	/// Extracts the ranked n-gram vector of a text.
	///
	/// Empty or whitespace-only input yields an empty vector; this is not
	/// an error, detection downgrades it to a no-confidence result.
	pub fn extract(&self, text: &str) -> FrequencyVector {
		let mut counter = GramCounter::default();
		counter.feed(text, &self.sizes);
		counter.into_vector(self.cap)
	}
}
