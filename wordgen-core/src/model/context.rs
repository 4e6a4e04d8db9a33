use std::fmt;

use serde::{Deserialize, Serialize};

/// A fixed-length ordered tuple of `k` word tokens, used as the lookup
/// key of every table in the model.
///
/// Two contexts are equal iff all `k` positions match by value, which is
/// what the derived `PartialEq`/`Hash` give us over the boxed slice.
///
/// # Invariants
/// - The length never changes after construction (`k` is the model order)
/// - Tokens are stored as produced by the tokenizer (lowercase)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Context(Box<[String]>);

impl Context {
	/// Creates a context from a slice of tokens.
	pub fn new(tokens: &[String]) -> Self {
		Self(tokens.to_vec().into_boxed_slice())
	}

	/// Number of tokens in the context (the model order `k`).
	pub fn order(&self) -> usize {
		self.0.len()
	}

	/// The tokens of the context, oldest first.
	pub fn tokens(&self) -> &[String] {
		&self.0
	}

	/// Returns the context obtained by dropping the oldest token and
	/// appending `next`: the sliding-window advance used during
	/// generation.
	pub fn slide(&self, next: &str) -> Self {
		let mut tokens: Vec<String> = self.0[1..].to_vec();
		tokens.push(next.to_owned());
		Self(tokens.into_boxed_slice())
	}
}

impl From<Vec<String>> for Context {
	fn from(tokens: Vec<String>) -> Self {
		Self(tokens.into_boxed_slice())
	}
}

impl fmt::Display for Context {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0.join(" "))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn ctx(tokens: &[&str]) -> Context {
		Context::new(&tokens.iter().map(|t| t.to_string()).collect::<Vec<_>>())
	}

	#[test]
	fn equality_is_by_value() {
		assert_eq!(ctx(&["to", "be"]), ctx(&["to", "be"]));
		assert_ne!(ctx(&["to", "be"]), ctx(&["be", "to"]));
	}

	#[test]
	fn slide_drops_oldest_and_appends() {
		let slid = ctx(&["to", "be", "or"]).slide("not");
		assert_eq!(slid, ctx(&["be", "or", "not"]));
		assert_eq!(slid.order(), 3);
	}

	#[test]
	fn display_joins_with_spaces() {
		assert_eq!(ctx(&["to", "be"]).to_string(), "to be");
	}
}
