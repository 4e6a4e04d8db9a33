use rand::Rng;

use super::context::Context;
use super::ngram_model::NGramModel;

/// Lifecycle of a generation session.
///
/// `Seeded` becomes `Generating` on the first sample attempt;
/// `Generating` loops on successful draws and becomes `Terminated` on a
/// no-match signal or once the target length is reached. `Terminated`
/// is absorbing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GenerationState {
	Seeded,
	Generating,
	Terminated,
}

/// Drives repeated sampling against an immutable model to produce a
/// bounded token sequence.
///
/// # Responsibilities
/// - Seed the output with the initial context tokens
/// - Sample one next token per step from the live sliding context
/// - Stop early, without error, when the context is unknown
///
/// # Invariants
/// - The output never exceeds the target length
/// - The model is never mutated; each step re-queries it with the
///   current window
#[derive(Debug)]
pub struct Generator<'a> {
	model: &'a NGramModel,
	context: Context,
	output: Vec<String>,
	target: usize,
	state: GenerationState,
}

impl<'a> Generator<'a> {
	/// Creates a session seeded with `seed` and bounded by `target`
	/// total tokens.
	///
	/// The seed tokens become the head of the output, truncated to
	/// `target` when that is smaller than the seed itself. A seed
	/// absent from the model is accepted: the first step will simply
	/// find no match and terminate the session.
	pub fn new(model: &'a NGramModel, seed: &[String], target: usize) -> Self {
		let output: Vec<String> = seed.iter().take(target).cloned().collect();
		Self {
			model,
			context: Context::new(seed),
			output,
			target,
			state: GenerationState::Seeded,
		}
	}

	/// Attempts to generate one more token.
	///
	/// On success the token is appended to the output and the context
	/// window slides forward (oldest token dropped, new one appended).
	/// Returns `None` once the session is terminated, either because
	/// the target length is reached or because the current context has
	/// no entry in the model. Termination is normal, not an error, and
	/// is absorbing: further calls keep returning `None`.
	pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&'a str> {
		if self.state == GenerationState::Terminated {
			return None;
		}
		if self.output.len() >= self.target {
			self.state = GenerationState::Terminated;
			return None;
		}

		self.state = GenerationState::Generating;

		let model: &'a NGramModel = self.model;
		match model.probabilities().sample_next(&self.context, rng) {
			Some(token) => {
				self.output.push(token.to_owned());
				self.context = self.context.slide(token);
				Some(token)
			}
			None => {
				self.state = GenerationState::Terminated;
				None
			}
		}
	}

	/// True once the session can produce no further token.
	pub fn is_terminated(&self) -> bool {
		self.state == GenerationState::Terminated
	}

	/// Runs the session to termination and returns the full sequence.
	pub fn run<R: Rng + ?Sized>(mut self, rng: &mut R) -> Vec<String> {
		while self.step(rng).is_some() {}
		self.output
	}
}

/// Generates a token sequence of length at most `word_count`.
///
/// The sequence starts with the tokens of `initial_context` and grows
/// by weighted sampling from the model, the context sliding forward
/// after each draw. Generation stops at `word_count` tokens, or earlier
/// as soon as the current context is unknown to the model, including
/// immediately, when the initial context itself was never observed.
pub fn generate<R: Rng + ?Sized>(
	model: &NGramModel,
	initial_context: &[String],
	word_count: usize,
	rng: &mut R,
) -> Vec<String> {
	Generator::new(model, initial_context, word_count).run(rng)
}
