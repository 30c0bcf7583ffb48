use std::fs;
use std::path::Path;

use super::extractor::{GramCounter, normalize_sizes};
use super::profile::{LanguageProfile, ProfileRecord};
use crate::error::{ConfigurationError, LoadError, TrainingError};
use crate::io;
use crate::store::ProfileStore;

/// Offline trainer producing one `LanguageProfile` from a corpus.
///
/// The builder runs the exact extraction pipeline the detector uses at
/// query time (same normalization, same ranking, same cap), and aggregates
/// raw counts across every `learn` call before ranking. Nothing in the
/// detection path ever invokes it.
///
/// # Responsibilities
/// - Accumulate n-gram counts over corpus texts
/// - Freeze the counts into a ranked, capped profile
/// - Batch-train whole corpus directories with a binary cache
#[derive(Debug)]
pub struct ProfileBuilder {
	sizes: Vec<usize>,
	cap: usize,
	counter: GramCounter,
}

impl ProfileBuilder {
	/// Creates a trainer for the given n-gram sizes and cap.
	///
	/// Profiles built here are only comparable by detectors configured
	/// with the same sizes and cap.
	///
	/// # Errors
	/// Returns a `ConfigurationError` if the size set or the cap is invalid.
	pub fn new(sizes: &[usize], cap: usize) -> Result<Self, ConfigurationError> {
		let sizes = normalize_sizes(sizes)?;
		if cap == 0 {
			return Err(ConfigurationError::InvalidCap);
		}
		Ok(Self { sizes, cap, counter: GramCounter::default() })
	}

	/// Adds a corpus text to the accumulated statistics.
	pub fn learn(&mut self, text: &str) {
		self.counter.feed(text, &self.sizes);
	}

	/// Adds every line of a corpus file to the accumulated statistics.
	///
	/// # Errors
	/// Returns the underlying I/O error if the file cannot be read.
	pub fn learn_file<P: AsRef<Path>>(&mut self, path: P) -> std::io::Result<()> {
		for line in io::read_lines(path)? {
			self.learn(&line);
		}
		Ok(())
	}

	/// Freezes the accumulated counts into an immutable profile.
	///
	/// # Errors
	/// Returns `TrainingError::EmptyCorpus` if no n-gram was ever counted.
	pub fn build(self, language: &str) -> Result<LanguageProfile, TrainingError> {
		if self.counter.is_empty() {
			return Err(TrainingError::EmptyCorpus(language.to_owned()));
		}
		Ok(LanguageProfile::from_parts(
			language.to_owned(),
			self.sizes,
			self.cap,
			self.counter.into_vector(self.cap),
		))
	}
}

/// Trains a whole store from in-memory `(language, corpus)` pairs.
///
/// A language whose corpus yields no profile is skipped with a warning
/// instead of failing the whole set; bundled profile crates rely on this.
///
/// # Errors
/// Returns a `LoadError` if the surviving set is empty, inconsistent or
/// misconfigured.
pub fn train_corpora(
	corpora: &[(&str, &str)],
	sizes: &[usize],
	cap: usize,
) -> Result<ProfileStore, LoadError> {
	let mut profiles = Vec::with_capacity(corpora.len());
	for (language, corpus) in corpora {
		let mut builder = ProfileBuilder::new(sizes, cap)?;
		for line in corpus.lines() {
			builder.learn(line);
		}
		match builder.build(language) {
			Ok(profile) => profiles.push(profile),
			Err(error) => log::warn!("skipping profile for language `{language}`: {error}"),
		}
	}
	Ok(ProfileStore::from_profiles(profiles)?)
}

/// Trains a store from a directory of `<language>.txt` corpus files.
///
/// Next to each corpus a `<language>.bin` postcard cache is maintained:
/// when a cache exists and matches the requested configuration it is
/// loaded instead of retraining, otherwise the profile is rebuilt and the
/// cache rewritten.
///
/// # Errors
/// Returns a `LoadError` on I/O failure, on a corpus producing no
/// n-grams, or when the resulting profile set is unusable.
pub fn train_directory<P: AsRef<Path>>(
	dir: P,
	sizes: &[usize],
	cap: usize,
) -> Result<ProfileStore, LoadError> {
	let folder = io::normalize_folder(dir);
	let requested_sizes = normalize_sizes(sizes)?;

	let mut profiles = Vec::new();
	for corpus_path in io::list_files(&folder, "txt")? {
		let language = io::file_stem_name(&corpus_path)?;
		let cache_path = io::sibling_with_extension(&corpus_path, "bin")?;

		if cache_path.exists() {
			let bytes = fs::read(&cache_path)?;
			let record: ProfileRecord = postcard::from_bytes(&bytes)?;
			let profile = LanguageProfile::from_record(record)?;
			if profile.cap() == cap && profile.ngram_sizes() == requested_sizes.as_slice() {
				profiles.push(profile);
				continue;
			}
			log::warn!("cached profile for `{language}` does not match the requested configuration, retraining");
		}

		let mut builder = ProfileBuilder::new(sizes, cap)?;
		builder.learn_file(&corpus_path)?;
		let profile = builder.build(&language)?;
		fs::write(&cache_path, postcard::to_stdvec(&profile.to_record())?)?;
		log::debug!("trained profile for `{language}` from {}", corpus_path.display());
		profiles.push(profile);
	}

	Ok(ProfileStore::from_profiles(profiles)?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::extractor::NGramExtractor;

	#[test]
	fn counts_aggregate_across_learn_calls() {
		let mut builder = ProfileBuilder::new(&[1, 2], 50).unwrap();
		builder.learn("ab");
		builder.learn("ab");
		let profile = builder.build("xx").unwrap();

		// Two learn calls over the same text rank exactly like one text
		// containing it twice.
		let extractor = NGramExtractor::new(&[1, 2], 50).unwrap();
		assert_eq!(profile.vector(), &extractor.extract("ab ab"));
	}

	#[test]
	fn built_profile_carries_the_training_configuration() {
		let mut builder = ProfileBuilder::new(&[2, 1], 25).unwrap();
		builder.learn("some corpus text");
		let profile = builder.build("xx").unwrap();
		assert_eq!(profile.ngram_sizes(), &[1, 2]);
		assert_eq!(profile.cap(), 25);
		assert!(profile.vector().len() <= 25);
	}

	#[test]
	fn empty_corpus_is_a_training_error() {
		let builder = ProfileBuilder::new(&[1, 2, 3], 100).unwrap();
		assert_eq!(builder.build("xx"), Err(TrainingError::EmptyCorpus("xx".to_owned())));

		let mut builder = ProfileBuilder::new(&[1], 100).unwrap();
		builder.learn("   \n\t 123 ");
		assert_eq!(builder.build("yy"), Err(TrainingError::EmptyCorpus("yy".to_owned())));
	}

	#[test]
	fn train_corpora_skips_unusable_languages() {
		let store = train_corpora(
			&[("en", "the house of commons"), ("xx", "  1234  ")],
			&[1, 2, 3],
			100,
		)
		.unwrap();
		let languages: Vec<&str> = store.languages().collect();
		assert_eq!(languages, vec!["en"]);
	}

	#[test]
	fn train_directory_builds_and_caches_profiles() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("en.txt"), "the quick brown fox\nthe lazy dog\n").unwrap();
		fs::write(dir.path().join("fr.txt"), "le renard brun\nle chien paresseux\n").unwrap();

		let store = train_directory(dir.path(), &[1, 2, 3], 100).unwrap();
		let languages: Vec<&str> = store.languages().collect();
		assert_eq!(languages, vec!["en", "fr"]);
		assert!(dir.path().join("en.bin").exists());
		assert!(dir.path().join("fr.bin").exists());

		// Second pass loads the caches and yields the same profiles.
		let cached = train_directory(dir.path(), &[1, 2, 3], 100).unwrap();
		assert_eq!(cached.get("en"), store.get("en"));
		assert_eq!(cached.get("fr"), store.get("fr"));
	}

	#[test]
	fn train_directory_retrains_on_configuration_change() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join("en.txt"), "the quick brown fox\n").unwrap();

		let first = train_directory(dir.path(), &[1, 2], 100).unwrap();
		assert_eq!(first.cap(), 100);

		let second = train_directory(dir.path(), &[1, 2], 50).unwrap();
		assert_eq!(second.cap(), 50);
	}
}
