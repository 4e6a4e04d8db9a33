//! Top-level module for the n-gram modeling system.
//!
//! This module provides a word-level n-gram model, including:
//! - Fixed-order context keys (`Context`)
//! - Transition counting (`CountTable`)
//! - Normalized per-context distributions (`Distribution`)
//! - The full conditional table (`ProbabilityTable`)
//! - The immutable model and its query API (`NGramModel`)
//! - A sliding-window generation driver (`Generator`)

/// Fixed-length ordered context key of `k` tokens.
///
/// Value equality and hashing; used as the lookup key everywhere.
pub mod context;

/// Raw occurrence counts of (context -> next token) observations.
///
/// Built in a single pass over a token sequence; supports merging
/// equal-order tables for chunked ingestion.
pub mod count_table;

/// Normalized next-token weights for one context.
///
/// Handles weighted random sampling with an injected random source.
pub mod distribution;

/// Mapping from every observed context to its `Distribution`.
pub mod probability_table;

/// The immutable model: order plus probability table.
///
/// Handles building (single-pass or chunked), probability queries
/// and seeding helpers.
pub mod ngram_model;

/// Generation driver: seeds from an initial context, samples in a loop
/// and slides the window until done or out of matches.
pub mod generator;
