use std::collections::HashMap;

use rand::Rng;
use rand::prelude::IteratorRandom;
use serde::{Deserialize, Serialize};

use super::context::Context;
use super::count_table::CountTable;
use super::distribution::Distribution;

/// The full conditional table: every observed context mapped to its
/// normalized next-token distribution.
///
/// # Responsibilities
/// - Normalize a `CountTable` context by context
/// - Answer distribution lookups and no-match queries
/// - Draw a next token for a context (weighted sampling)
///
/// # Invariants
/// - `order` matches the order of the source count table
/// - Each context in `contexts` has a non-empty distribution
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ProbabilityTable {
	/// The order of the model (number of context tokens)
	order: usize,

	/// Mapping from a context to its next-token distribution
	contexts: HashMap<Context, Distribution>,
}

impl ProbabilityTable {
	/// Derives a probability table from raw counts.
	///
	/// Each context is normalized independently: probability = count
	/// divided by the context's total observation count. This step is
	/// pure; a well-formed count table cannot make it fail.
	pub fn from_counts(counts: &CountTable) -> Self {
		let contexts = counts
			.iter()
			.map(|(context, next_counts)| (context.clone(), Distribution::from_counts(next_counts)))
			.collect();
		Self { order: counts.order(), contexts }
	}

	/// The order `k` of the table.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct contexts.
	pub fn len(&self) -> usize {
		self.contexts.len()
	}

	/// True if the table holds no context at all.
	pub fn is_empty(&self) -> bool {
		self.contexts.is_empty()
	}

	/// The distribution recorded for `context`, or `None` when the
	/// context was never observed.
	pub fn distribution(&self, context: &Context) -> Option<&Distribution> {
		self.contexts.get(context)
	}

	/// Iterates over all (context, distribution) entries.
	pub fn iter(&self) -> impl Iterator<Item = (&Context, &Distribution)> {
		self.contexts.iter()
	}

	/// Draws the next token after `context` by weighted sampling.
	///
	/// Returns `None` when the context is absent from the table, the
	/// no-match signal the generator uses to terminate. An unknown
	/// context never falls back to another distribution.
	pub fn sample_next<R: Rng + ?Sized>(&self, context: &Context, rng: &mut R) -> Option<&str> {
		self.contexts.get(context)?.sample(rng)
	}

	/// Returns a random known context.
	///
	/// Useful for starting a generation sequence without a caller-chosen
	/// seed. Returns `None` if the table is empty.
	pub fn random_context<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Context> {
		self.contexts.keys().choose(rng)
	}
}
