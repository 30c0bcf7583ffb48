//! Statistical natural-language identification library.
//!
//! This crate provides the core of an n-gram language detection system:
//! - Character n-gram extraction with rank-based frequency statistics
//! - Immutable per-language profiles with a serializable wire format
//! - A profile store supporting JSON and compact binary encodings
//! - A detector scoring texts against every profile in a store
//! - An offline profile trainer sharing the extraction pipeline
//!
//! Detection is a pure computation over immutable shared data: once a
//! `ProfileStore` is loaded, any number of threads may detect concurrently
//! without synchronization.

/// Detector configuration (n-gram sizes, cap, confidence thresholds).
pub mod config;

/// Language detection: scoring, ranking and confidence.
pub mod detector;

/// Error taxonomy: configuration, load and training failures.
pub mod error;

/// N-gram extraction, frequency vectors, profiles and the trainer.
pub mod model;

/// The profile registry: loading, saving and merging profile sets.
pub mod store;

/// I/O utilities (corpus file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;
