use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::context::Context;

/// Raw occurrence counts of (context -> next token) observations for a
/// fixed order `k`.
///
/// # Responsibilities
/// - Accumulate transition counts in a single pass over a token sequence
/// - Merge with another table of the same order (chunked ingestion)
/// - Expose per-context counts for normalization
///
/// # Invariants
/// - `order` is always >= 1
/// - Every stored context has length `order`
/// - Every count is strictly positive (created at 1, incremented after)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CountTable {
	/// The order of the model (number of context tokens)
	order: usize, // must be >= 1

	/// Mapping from a context to the counts of tokens observed after it
	contexts: HashMap<Context, HashMap<String, usize>>,
}

impl CountTable {
	/// Builds a count table from an ordered token sequence.
	///
	/// For every index `i` in `0..n - order`, the window
	/// `tokens[i..i + order]` is the context and `tokens[i + order]` the
	/// observed next token. Consecutive windows overlap by `order - 1`
	/// tokens, so every token past the first `order` acts as a "next"
	/// target exactly once.
	///
	/// A sequence of length `<= order` yields an empty table; that is an
	/// empty corpus, not an error. The scan involves no randomness, so a
	/// given (sequence, order) pair always produces the same table.
	///
	/// # Errors
	/// Returns an error if `order == 0`, which can never form a context.
	pub fn build(tokens: &[String], order: usize) -> Result<Self, String> {
		if order == 0 {
			return Err("order must be >= 1".to_owned());
		}

		let mut table = Self { order, contexts: HashMap::new() };
		if tokens.len() <= order {
			// Too few tokens, no (context, next) pair to count
			return Ok(table);
		}

		for window in tokens.windows(order + 1) {
			let context = Context::new(&window[..order]);
			let next = &window[order];
			*table
				.contexts
				.entry(context)
				.or_default()
				.entry(next.clone())
				.or_insert(0) += 1;
		}

		Ok(table)
	}

	/// The order `k` of the table.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct contexts observed.
	pub fn len(&self) -> usize {
		self.contexts.len()
	}

	/// True if no (context, next) pair was ever observed.
	pub fn is_empty(&self) -> bool {
		self.contexts.is_empty()
	}

	/// The next-token counts recorded for `context`, if any.
	pub fn counts_for(&self, context: &Context) -> Option<&HashMap<String, usize>> {
		self.contexts.get(context)
	}

	/// Iterates over all (context, next-token counts) entries.
	pub fn iter(&self) -> impl Iterator<Item = (&Context, &HashMap<String, usize>)> {
		self.contexts.iter()
	}

	/// Sum of every count across all contexts.
	///
	/// For a table built from `n` tokens this is exactly `n - order`
	/// (or 0 when `n <= order`).
	pub fn total_observations(&self) -> usize {
		self.contexts
			.values()
			.map(|counts| counts.values().sum::<usize>())
			.sum()
	}

	/// Merges another count table into this one.
	///
	/// Counts for matching (context, next token) pairs are summed. Used
	/// to recombine the partial tables of a chunked build.
	///
	/// # Errors
	/// Returns an error if the table orders do not match.
	pub fn merge(&mut self, other: &Self) -> Result<(), String> {
		if self.order != other.order {
			return Err("order mismatch".to_owned());
		}

		for (context, counts) in &other.contexts {
			let existing = self.contexts.entry(context.clone()).or_default();
			for (next, count) in counts {
				*existing.entry(next.clone()).or_insert(0) += count;
			}
		}

		Ok(())
	}
}
