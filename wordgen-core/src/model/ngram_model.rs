use std::path::Path;
use std::sync::mpsc;
use std::thread;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::corpus;
use super::context::Context;
use super::count_table::CountTable;
use super::generator;
use super::probability_table::ProbabilityTable;

/// An order-`k` word n-gram model.
///
/// The model maps every `k`-token context observed in a corpus to the
/// normalized distribution of tokens seen to follow it, and answers
/// probability queries and generation requests against that table.
///
/// # Responsibilities
/// - Build the table from a token sequence (single pass or chunked)
/// - Answer per-(context, token) probability queries
/// - Drive bounded text generation with a sliding context window
///
/// # Invariants
/// - `order` is always >= 1
/// - Immutable once built: nothing is added, removed or re-weighted
///   afterwards, so a model can be shared freely across concurrent
///   generation sessions (each with its own random source)
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NGramModel {
	/// The order of the model (number of context tokens)
	order: usize, // must be >= 1

	/// Conditional next-token distributions per context
	probabilities: ProbabilityTable,
}

impl NGramModel {
	/// Builds a model of order `order` from an ordered token sequence.
	///
	/// Counts transitions in one left-to-right pass, then normalizes
	/// each context independently. A sequence shorter than `order + 1`
	/// tokens produces an empty model: every query answers "not found"
	/// and generation returns only its seed.
	///
	/// # Errors
	/// Returns an error if `order == 0`.
	pub fn build(tokens: &[String], order: usize) -> Result<Self, String> {
		let counts = CountTable::build(tokens, order)?;
		Ok(Self { order, probabilities: ProbabilityTable::from_counts(&counts) })
	}

	/// Builds a model by counting chunks of the token sequence on
	/// worker threads and merging the partial tables.
	///
	/// The sequence of window start positions is partitioned across
	/// `num_cpus * 8` chunks; each chunk carries `order` extra trailing
	/// tokens so the windows crossing its end are still counted by it
	/// and by nobody else. Merged counts are therefore identical to the
	/// single-pass build, chunking changes nothing in the result.
	///
	/// # Errors
	/// Returns an error if `order == 0`.
	pub fn build_chunked(tokens: &[String], order: usize) -> Result<Self, String> {
		if order == 0 {
			return Err("order must be >= 1".to_owned());
		}
		if tokens.len() <= order {
			return Self::build(tokens, order);
		}

		// Number of windows, i.e. of (context, next) observations
		let starts = tokens.len() - order;
		let cpus = num_cpus::get();
		let chunks = cpus * 8;
		let chunk_size = starts.div_ceil(chunks).max(1);

		let (tx, rx) = mpsc::channel();
		let mut begin = 0;
		while begin < starts {
			let end = (begin + chunk_size).min(starts);
			// The `order` trailing tokens overlap the next chunk
			let slice: Vec<String> = tokens[begin..end + order].to_vec();
			let tx = tx.clone();

			thread::spawn(move || {
				// unwrap() is safe, order >= 1 was checked above
				let partial = CountTable::build(&slice, order).unwrap();
				tx.send(partial).expect("Failed to send from thread");
			});
			begin = end;
		}
		drop(tx);

		let mut counts = CountTable::build(&[], order)?;
		for partial in rx.iter() {
			counts.merge(&partial)?;
		}

		Ok(Self { order, probabilities: ProbabilityTable::from_counts(&counts) })
	}

	/// Builds a model from a corpus file.
	///
	/// The file is read and tokenized by the corpus loader; when
	/// `start_marker` is found in the text, everything up to and
	/// including it is skipped. A missing or unreadable file means "no
	/// tokens available" and yields an empty model rather than a fatal
	/// failure.
	///
	/// # Errors
	/// Returns an error if `order == 0`.
	pub fn from_corpus_file<P: AsRef<Path>>(
		filepath: P,
		start_marker: Option<&str>,
		order: usize,
	) -> Result<Self, String> {
		let tokens = corpus::load_tokens(filepath, start_marker);
		Self::build_chunked(&tokens, order)
	}

	/// The order `k` of the model.
	pub fn order(&self) -> usize {
		self.order
	}

	/// The underlying probability table.
	pub fn probabilities(&self) -> &ProbabilityTable {
		&self.probabilities
	}

	/// True if no context was ever observed (corpus shorter than
	/// `order + 1` tokens).
	pub fn is_empty(&self) -> bool {
		self.probabilities.is_empty()
	}

	/// The probability that `token` follows `context_tokens`, rounded
	/// to 2 decimal places.
	///
	/// This is the external query boundary: the table keeps full
	/// precision (and sampling uses it), the legacy 2-decimal display
	/// convention applies only to the value returned here.
	///
	/// Returns `None` when the context or the (context, token) pair was
	/// never observed, including when `context_tokens` is not exactly
	/// `order` tokens long.
	pub fn probability_of(&self, context_tokens: &[String], token: &str) -> Option<f64> {
		let probability = self
			.probabilities
			.distribution(&Context::new(context_tokens))?
			.probability(token)?;
		Some((probability * 100.0).round() / 100.0)
	}

	/// Returns a random known context, useful as a generation seed.
	///
	/// Returns `None` if the model is empty.
	pub fn random_context<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Context> {
		self.probabilities.random_context(rng)
	}

	/// Generates up to `word_count` tokens starting from `seed`.
	///
	/// See [`generator::generate`] for the termination rules.
	pub fn generate<R: Rng + ?Sized>(
		&self,
		seed: &[String],
		word_count: usize,
		rng: &mut R,
	) -> Vec<String> {
		generator::generate(self, seed, word_count, rng)
	}
}
