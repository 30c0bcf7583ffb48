use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::extractor::normalize_sizes;
use super::vector::FrequencyVector;
use crate::error::ConfigurationError;

/// One n-gram entry of a serialized profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileEntry {
	pub ngram: String,
	pub rank: usize,
}

/// The wire format of one language profile.
///
/// This is what an offline trainer emits and what `ProfileStore` reads,
/// either as JSON or as compact postcard binary. Entries may appear in any
/// order; ranks must be unique and contiguous from 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
	pub language: String,
	pub ngram_sizes: Vec<usize>,
	pub cap: usize,
	pub entries: Vec<ProfileEntry>,
}

/// An immutable statistical fingerprint for one language.
///
/// Created by the offline trainer or deserialized from a `ProfileRecord`,
/// validated on the way in, and never mutated afterwards. Lives for the
/// lifetime of the store holding it.
#[derive(Clone, Debug, PartialEq)]
pub struct LanguageProfile {
	language: String,
	ngram_sizes: Vec<usize>,
	cap: usize,
	vector: FrequencyVector,
}

fn malformed(language: &str, reason: impl Into<String>) -> ConfigurationError {
	ConfigurationError::MalformedProfile {
		language: language.to_owned(),
		reason: reason.into(),
	}
}

impl LanguageProfile {
	/// Assembles a profile from parts the trainer already validated.
	pub(crate) fn from_parts(
		language: String,
		ngram_sizes: Vec<usize>,
		cap: usize,
		vector: FrequencyVector,
	) -> Self {
		Self { language, ngram_sizes, cap, vector }
	}

	/// Validates a deserialized record and turns it into a profile.
	///
	/// # Errors
	/// Returns `ConfigurationError::MalformedProfile` when:
	/// - the language code is empty
	/// - the n-gram size set is empty or contains zero
	/// - the cap is zero or smaller than the entry count
	/// - the entry list is empty
	/// - an n-gram is empty or duplicated
	/// - ranks are not unique and contiguous from 0
	pub fn from_record(record: ProfileRecord) -> Result<Self, ConfigurationError> {
		let language = record.language;
		if language.trim().is_empty() {
			return Err(malformed(&language, "empty language code"));
		}
		let ngram_sizes = normalize_sizes(&record.ngram_sizes)
			.map_err(|_| malformed(&language, "invalid n-gram size set"))?;
		if record.cap == 0 {
			return Err(malformed(&language, "cap is zero"));
		}
		if record.entries.is_empty() {
			return Err(malformed(&language, "profile has no entries"));
		}
		if record.entries.len() > record.cap {
			return Err(malformed(
				&language,
				format!("{} entries exceed cap {}", record.entries.len(), record.cap),
			));
		}

		let mut ordered: Vec<Option<String>> = vec![None; record.entries.len()];
		for entry in record.entries {
			if entry.ngram.is_empty() {
				return Err(malformed(&language, format!("empty n-gram at rank {}", entry.rank)));
			}
			match ordered.get_mut(entry.rank) {
				Some(slot) if slot.is_none() => *slot = Some(entry.ngram),
				Some(_) => return Err(malformed(&language, format!("duplicate rank {}", entry.rank))),
				None => {
					return Err(malformed(
						&language,
						format!("rank {} breaks contiguity from 0", entry.rank),
					));
				}
			}
		}
		// Every slot is filled now: one entry per slot, no duplicates, in range.
		let entries: Vec<String> = ordered.into_iter().flatten().collect();

		let mut seen = HashSet::with_capacity(entries.len());
		for gram in &entries {
			if !seen.insert(gram.as_str()) {
				return Err(malformed(&language, format!("duplicate n-gram `{gram}`")));
			}
		}

		Ok(Self {
			language,
			ngram_sizes,
			cap: record.cap,
			vector: FrequencyVector::from_ranked(entries),
		})
	}

	/// Serializes the profile back into its wire record.
	pub fn to_record(&self) -> ProfileRecord {
		ProfileRecord {
			language: self.language.clone(),
			ngram_sizes: self.ngram_sizes.clone(),
			cap: self.cap,
			entries: self
				.vector
				.entries()
				.enumerate()
				.map(|(rank, ngram)| ProfileEntry { ngram: ngram.to_owned(), rank })
				.collect(),
		}
	}

	pub fn language(&self) -> &str {
		&self.language
	}

	pub fn ngram_sizes(&self) -> &[usize] {
		&self.ngram_sizes
	}

	pub fn cap(&self) -> usize {
		self.cap
	}

	pub fn vector(&self) -> &FrequencyVector {
		&self.vector
	}
}
