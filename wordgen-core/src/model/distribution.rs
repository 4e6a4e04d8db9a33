use std::collections::HashMap;

use rand::Rng;

use serde::{Deserialize, Serialize};

/// The normalized next-token distribution of a single context.
///
/// Conceptually this is a node in a Markov chain where outgoing edges
/// are weighted by their conditional probability.
///
/// ## Responsibilities:
/// - Hold full-precision probabilities (rounding happens at the query
///   boundary, never here)
/// - Draw a next token by weighted random sampling
///
/// ## Invariants
/// - Every stored probability is in (0, 1]
/// - Probabilities sum to 1.0 within floating-point tolerance
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Distribution {
	/// Next-token probabilities.
	/// Example: { "or" => 0.5, "that" => 0.5 }
	weights: HashMap<String, f64>,
}

impl Distribution {
	/// Normalizes raw occurrence counts into a distribution.
	///
	/// The total is strictly positive for any table-built count map
	/// (every context has at least one observation), so the division is
	/// always defined.
	pub fn from_counts(counts: &HashMap<String, usize>) -> Self {
		let total: usize = counts.values().sum();
		let weights = counts
			.iter()
			.map(|(token, count)| (token.clone(), *count as f64 / total as f64))
			.collect();
		Self { weights }
	}

	/// The stored probability of `token`, at full precision.
	pub fn probability(&self, token: &str) -> Option<f64> {
		self.weights.get(token).copied()
	}

	/// Number of distinct next tokens.
	pub fn len(&self) -> usize {
		self.weights.len()
	}

	/// True if the context was never observed with any next token.
	pub fn is_empty(&self) -> bool {
		self.weights.is_empty()
	}

	/// Iterates over (next token, probability) pairs.
	pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
		self.weights.iter().map(|(token, p)| (token.as_str(), *p))
	}

	/// Draws a next token by weighted random sampling.
	///
	/// The probability of selecting a token is exactly its stored
	/// weight; a uniform choice among keys would be wrong and is never
	/// used. The random source is injected so callers can pass a seeded
	/// generator for reproducible draws.
	///
	/// This method performs:
	/// - an O(n) scan over the weights
	/// - a cumulative subtraction to select a bucket
	///
	/// Returns `None` if the distribution has no entries.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		if self.weights.is_empty() {
			return None;
		}

		// Randomly select a bucket
		let mut r: f64 = rng.random_range(0.0..1.0);

		let mut fallback: Option<&str> = None;
		for (token, weight) in &self.weights {
			if r < *weight {
				return Some(token);
			}
			r -= weight;
			fallback = Some(token);
		}

		// Fallback for floating-point drift: should not happen, but kept for safety.
		fallback
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn counts(pairs: &[(&str, usize)]) -> HashMap<String, usize> {
		pairs.iter().map(|(t, c)| (t.to_string(), *c)).collect()
	}

	#[test]
	fn normalizes_counts() {
		let dist = Distribution::from_counts(&counts(&[("or", 1), ("that", 1)]));
		assert_eq!(dist.probability("or"), Some(0.5));
		assert_eq!(dist.probability("that"), Some(0.5));
		assert_eq!(dist.probability("question"), None);
	}

	#[test]
	fn probabilities_sum_to_one() {
		let dist = Distribution::from_counts(&counts(&[("a", 3), ("b", 2), ("c", 1), ("d", 1)]));
		let sum: f64 = dist.iter().map(|(_, p)| p).sum();
		assert!((sum - 1.0).abs() < 1e-6);
	}

	#[test]
	fn sample_is_deterministic_under_fixed_seed() {
		let dist = Distribution::from_counts(&counts(&[("or", 1), ("that", 1)]));
		let first = dist.sample(&mut StdRng::seed_from_u64(42)).unwrap().to_owned();
		let second = dist.sample(&mut StdRng::seed_from_u64(42)).unwrap().to_owned();
		assert_eq!(first, second);
	}

	#[test]
	fn sample_only_returns_observed_tokens() {
		let dist = Distribution::from_counts(&counts(&[("or", 1), ("that", 1)]));
		let mut rng = StdRng::seed_from_u64(7);
		for _ in 0..100 {
			let token = dist.sample(&mut rng).unwrap();
			assert!(token == "or" || token == "that");
		}
	}

	#[test]
	fn sample_respects_weights() {
		// "heavy" holds 9/10 of the mass; over 1000 draws it must dominate
		let dist = Distribution::from_counts(&counts(&[("heavy", 9), ("light", 1)]));
		let mut rng = StdRng::seed_from_u64(0);
		let heavy = (0..1000)
			.filter(|_| dist.sample(&mut rng) == Some("heavy"))
			.count();
		assert!(heavy > 800, "expected a heavy majority, got {heavy}/1000");
	}

	#[test]
	fn singleton_distribution_always_sampled() {
		let dist = Distribution::from_counts(&counts(&[("not", 1)]));
		let mut rng = StdRng::seed_from_u64(3);
		for _ in 0..10 {
			assert_eq!(dist.sample(&mut rng), Some("not"));
		}
	}
}
