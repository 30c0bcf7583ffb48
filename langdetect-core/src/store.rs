use std::collections::HashMap;
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{ConfigurationError, LoadError};
use crate::model::profile::{LanguageProfile, ProfileRecord};

/// An immutable registry mapping language codes to their profiles.
///
/// Built once (at application startup, outside the request path) and read
/// concurrently by any number of detections afterwards. Profile iteration
/// order is the insertion order of the source, stable for a given store.
///
/// # Invariants
/// - At least one profile
/// - Language codes are unique
/// - Every profile shares the same n-gram sizes and cap
#[derive(Clone, Debug)]
pub struct ProfileStore {
	profiles: Vec<LanguageProfile>,
	index: HashMap<String, usize>,
	ngram_sizes: Vec<usize>,
	cap: usize,
}

impl ProfileStore {
	/// Builds a store from already-validated profiles.
	///
	/// # Errors
	/// - `ConfigurationError::EmptyStore` for an empty set
	/// - `ConfigurationError::DuplicateLanguage` on repeated codes
	/// - `ConfigurationError::InconsistentProfiles` when profiles disagree
	///   on n-gram sizes or cap
	pub fn from_profiles(profiles: Vec<LanguageProfile>) -> Result<Self, ConfigurationError> {
		let (ngram_sizes, cap, first_language) = match profiles.first() {
			Some(first) => (first.ngram_sizes().to_vec(), first.cap(), first.language().to_owned()),
			None => return Err(ConfigurationError::EmptyStore),
		};

		let mut index = HashMap::with_capacity(profiles.len());
		for (position, profile) in profiles.iter().enumerate() {
			if profile.ngram_sizes() != ngram_sizes.as_slice() || profile.cap() != cap {
				return Err(ConfigurationError::InconsistentProfiles {
					first: first_language.clone(),
					second: profile.language().to_owned(),
				});
			}
			if index.insert(profile.language().to_owned(), position).is_some() {
				return Err(ConfigurationError::DuplicateLanguage(profile.language().to_owned()));
			}
		}

		Ok(Self { profiles, index, ngram_sizes, cap })
	}

	/// Loads a store from a JSON stream of profile records.
	///
	/// # Errors
	/// Decoding and validation failures both abort the load; no partially
	/// usable store is ever produced.
	pub fn load_json<R: Read>(reader: R) -> Result<Self, LoadError> {
		let records: Vec<ProfileRecord> = serde_json::from_reader(reader)?;
		Self::from_records(records)
	}

	/// Loads a store from compact postcard bytes.
	pub fn load_binary(bytes: &[u8]) -> Result<Self, LoadError> {
		let records: Vec<ProfileRecord> = postcard::from_bytes(bytes)?;
		Self::from_records(records)
	}

	/// Loads a store from a file, dispatching on the extension.
	///
	/// `.json` files are decoded as JSON, anything else as postcard.
	pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
		let path = path.as_ref();
		if path.extension() == Some(OsStr::new("json")) {
			Self::load_json(BufReader::new(File::open(path)?))
		} else {
			Self::load_binary(&fs::read(path)?)
		}
	}

	fn from_records(records: Vec<ProfileRecord>) -> Result<Self, LoadError> {
		let mut profiles = Vec::with_capacity(records.len());
		for record in records {
			profiles.push(LanguageProfile::from_record(record)?);
		}
		Ok(Self::from_profiles(profiles)?)
	}

	/// Writes the store to a JSON stream.
	pub fn save_json<W: Write>(&self, writer: W) -> Result<(), LoadError> {
		serde_json::to_writer_pretty(writer, &self.to_records())?;
		Ok(())
	}

	/// Serializes the store to compact postcard bytes.
	pub fn save_binary(&self) -> Result<Vec<u8>, LoadError> {
		Ok(postcard::to_stdvec(&self.to_records())?)
	}

	/// Writes the store to a file, dispatching on the extension like
	/// `load_file`.
	pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LoadError> {
		let path = path.as_ref();
		if path.extension() == Some(OsStr::new("json")) {
			self.save_json(BufWriter::new(File::create(path)?))
		} else {
			fs::write(path, self.save_binary()?)?;
			Ok(())
		}
	}

	fn to_records(&self) -> Vec<ProfileRecord> {
		self.profiles.iter().map(LanguageProfile::to_record).collect()
	}

	/// Merges several stores into one logical store.
	///
	/// Profiles keep their per-store insertion order, earlier stores
	/// first.
	///
	/// # Errors
	/// Duplicate language codes or disagreeing configurations across the
	/// sources are rejected.
	pub fn merged(stores: &[&ProfileStore]) -> Result<ProfileStore, ConfigurationError> {
		let mut profiles = Vec::new();
		for store in stores {
			profiles.extend(store.profiles.iter().cloned());
		}
		Self::from_profiles(profiles)
	}

	/// Looks up the profile of a language code.
	pub fn get(&self, language: &str) -> Option<&LanguageProfile> {
		self.index.get(language).map(|&position| &self.profiles[position])
	}

	/// Iterates over the language codes in stable store order.
	pub fn languages(&self) -> impl Iterator<Item = &str> {
		self.profiles.iter().map(LanguageProfile::language)
	}

	/// Iterates over the profiles in stable store order.
	pub fn profiles(&self) -> impl Iterator<Item = &LanguageProfile> {
		self.profiles.iter()
	}

	pub fn len(&self) -> usize {
		self.profiles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.profiles.is_empty()
	}

	/// N-gram sizes shared by every profile in the store.
	pub fn ngram_sizes(&self) -> &[usize] {
		&self.ngram_sizes
	}

	/// Frequency vector cap shared by every profile in the store.
	pub fn cap(&self) -> usize {
		self.cap
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::builder::ProfileBuilder;

	fn profile(language: &str, corpus: &str) -> LanguageProfile {
		let mut builder = ProfileBuilder::new(&[1, 2, 3], 100).unwrap();
		builder.learn(corpus);
		builder.build(language).unwrap()
	}

	fn store() -> ProfileStore {
		ProfileStore::from_profiles(vec![
			profile("en", "the quick brown fox jumps over the lazy dog"),
			profile("fr", "le renard brun saute par dessus le chien paresseux"),
		])
		.unwrap()
	}

	#[test]
	fn lookup_and_order_are_stable() {
		let store = store();
		assert_eq!(store.len(), 2);
		assert_eq!(store.get("en").map(LanguageProfile::language), Some("en"));
		assert!(store.get("de").is_none());
		let languages: Vec<&str> = store.languages().collect();
		assert_eq!(languages, vec!["en", "fr"]);
	}

	#[test]
	fn empty_profile_set_is_rejected() {
		assert_eq!(
			ProfileStore::from_profiles(vec![]).unwrap_err(),
			ConfigurationError::EmptyStore
		);
	}

	#[test]
	fn duplicate_language_codes_are_rejected() {
		let result = ProfileStore::from_profiles(vec![
			profile("en", "some english text"),
			profile("en", "more english text"),
		]);
		assert_eq!(result.unwrap_err(), ConfigurationError::DuplicateLanguage("en".to_owned()));
	}

	#[test]
	fn inconsistent_profile_configurations_are_rejected() {
		let mut small = ProfileBuilder::new(&[1, 2, 3], 50).unwrap();
		small.learn("le renard brun");
		let result = ProfileStore::from_profiles(vec![
			profile("en", "the quick brown fox"),
			small.build("fr").unwrap(),
		]);
		assert!(matches!(
			result.unwrap_err(),
			ConfigurationError::InconsistentProfiles { .. }
		));
	}

	#[test]
	fn json_round_trip_preserves_profiles() {
		let store = store();
		let mut encoded = Vec::new();
		store.save_json(&mut encoded).unwrap();
		let reloaded = ProfileStore::load_json(encoded.as_slice()).unwrap();
		assert_eq!(reloaded.get("en"), store.get("en"));
		assert_eq!(reloaded.get("fr"), store.get("fr"));
	}

	#[test]
	fn binary_round_trip_preserves_profiles() {
		let store = store();
		let bytes = store.save_binary().unwrap();
		let reloaded = ProfileStore::load_binary(&bytes).unwrap();
		assert_eq!(reloaded.get("en"), store.get("en"));
		assert_eq!(reloaded.get("fr"), store.get("fr"));
	}

	#[test]
	fn file_round_trip_dispatches_on_extension() {
		let dir = tempfile::tempdir().unwrap();
		let store = store();

		let json_path = dir.path().join("profiles.json");
		store.save_file(&json_path).unwrap();
		let from_json = ProfileStore::load_file(&json_path).unwrap();
		assert_eq!(from_json.get("en"), store.get("en"));

		let bin_path = dir.path().join("profiles.bin");
		store.save_file(&bin_path).unwrap();
		let from_bin = ProfileStore::load_file(&bin_path).unwrap();
		assert_eq!(from_bin.get("fr"), store.get("fr"));
	}

	#[test]
	fn corrupt_sources_are_load_errors() {
		assert!(matches!(
			ProfileStore::load_json(&b"not json at all"[..]),
			Err(LoadError::Json(_))
		));
		assert!(matches!(ProfileStore::load_file("/no/such/profiles.bin"), Err(LoadError::Io(_))));
	}

	#[test]
	fn malformed_records_abort_the_load() {
		let json = br#"[{"language": "en", "ngram_sizes": [1], "cap": 10,
			"entries": [{"ngram": "a", "rank": 0}, {"ngram": "b", "rank": 2}]}]"#;
		assert!(matches!(
			ProfileStore::load_json(&json[..]),
			Err(LoadError::Configuration(ConfigurationError::MalformedProfile { .. }))
		));
	}

	#[test]
	fn merged_stores_combine_their_languages() {
		let left = ProfileStore::from_profiles(vec![profile("en", "the quick brown fox")]).unwrap();
		let right = ProfileStore::from_profiles(vec![profile("fr", "le renard brun")]).unwrap();
		let merged = ProfileStore::merged(&[&left, &right]).unwrap();
		let languages: Vec<&str> = merged.languages().collect();
		assert_eq!(languages, vec!["en", "fr"]);
	}

	#[test]
	fn merged_stores_reject_duplicates() {
		let left = ProfileStore::from_profiles(vec![profile("en", "the quick brown fox")]).unwrap();
		let result = ProfileStore::merged(&[&left, &left]);
		assert_eq!(result.unwrap_err(), ConfigurationError::DuplicateLanguage("en".to_owned()));
	}
}
