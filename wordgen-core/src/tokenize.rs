//! Raw text to word tokens.
//!
//! The contract is fixed so that token sequences derived from the same
//! corpus are reproducible: lowercase everything, drop every character
//! that is not a word character, whitespace or an apostrophe, then
//! split on whitespace.

/// Tokenizes raw text into an ordered sequence of lowercase words.
///
/// Punctuation is stripped, but apostrophes survive so contractions
/// ("don't", "o'er") stay single tokens. Underscores count as word
/// characters. Runs of whitespace of any kind act as one separator;
/// leading and trailing separators produce no empty tokens.
pub fn tokenize(text: &str) -> Vec<String> {
	text.to_lowercase()
		.chars()
		.filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '\'' || *c == '_')
		.collect::<String>()
		.split_whitespace()
		.map(str::to_owned)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lowercases_and_splits() {
		assert_eq!(
			tokenize("To be OR not"),
			vec!["to", "be", "or", "not"]
		);
	}

	#[test]
	fn strips_punctuation_but_keeps_apostrophes() {
		assert_eq!(
			tokenize("Shall I compare thee to a summer's day?"),
			vec!["shall", "i", "compare", "thee", "to", "a", "summer's", "day"]
		);
		assert_eq!(tokenize("don't stop, ever!"), vec!["don't", "stop", "ever"]);
	}

	#[test]
	fn whitespace_runs_are_one_separator() {
		assert_eq!(tokenize("  to\t\tbe \n or "), vec!["to", "be", "or"]);
	}

	#[test]
	fn empty_and_punctuation_only_input() {
		assert!(tokenize("").is_empty());
		assert!(tokenize("... !!! —— ??").is_empty());
	}

	#[test]
	fn reference_sentence() {
		assert_eq!(
			tokenize("to be or not to be that is the question"),
			vec!["to", "be", "or", "not", "to", "be", "that", "is", "the", "question"]
		);
	}
}
