//! Statistical data model of the detection engine.
//!
//! This module covers the whole producer/consumer pipeline around
//! per-language n-gram statistics:
//! - Normalized n-gram extraction (`NGramExtractor`)
//! - Ranked frequency tables (`FrequencyVector`)
//! - Immutable language fingerprints and their wire format
//!   (`LanguageProfile`, `ProfileRecord`)
//! - The offline trainer (`ProfileBuilder`)

/// Offline profile trainer.
///
/// Accumulates corpus statistics through the same extraction pipeline the
/// detector uses at query time, then freezes them into a `LanguageProfile`.
pub mod builder;

/// Text normalization and n-gram counting.
///
/// Converts raw text into a ranked, capped frequency vector; shared by
/// query construction and profile training.
pub mod extractor;

/// Per-language fingerprints and their serializable records.
///
/// Validates deserialized profiles (rank contiguity, cap bounds, unique
/// n-grams) before they enter a store.
pub mod profile;

/// Ranked n-gram frequency tables.
pub mod vector;
