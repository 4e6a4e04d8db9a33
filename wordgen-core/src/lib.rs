//! Word-level n-gram text generation library.
//!
//! This crate provides a variable-order n-gram modeling system including:
//! - Corpus tokenization (lowercase words, apostrophes preserved)
//! - Context-keyed transition counting for any order `k >= 1`
//! - Normalized next-token probability distributions
//! - Weighted random generation with a sliding context window
//!
//! Only the high-level API is exposed publicly. Low-level file helpers
//! are kept internal to ensure consistency and prevent misuse.

/// Core n-gram model types and generation logic.
///
/// This module exposes the count/probability tables, the model itself
/// and the generation driver.
pub mod model;

/// Corpus loading (file reading, start-marker slicing, `.txt` listing).
pub mod corpus;

/// Tokenization of raw text into lowercase word tokens.
pub mod tokenize;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;
