use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SuggestError};
use crate::tokenizer::Token;

/// Represents a context of an n-gram model.
///
/// A `State` corresponds to a fixed sequence of `n` tokens (`key`) and stores
/// every token observed right after it in the corpus.
///
/// ## Responsibilities:
/// - Accumulate transition occurrences during learning
/// - Report the conditional frequency of each following token
/// - Merge with another state having the same key (parallel learning support)
///
/// ## Invariants
/// - All transitions belong to the same `key`
/// - Each transition occurrence count is strictly positive
/// - `total` is the sum of all transition counts
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct State {
	/// The context tokens.
	key: Vec<Token>,
	/// Outgoing transitions indexed by the next token.
	/// Example: { "am" => 42, "was" => 3 }
	transitions: HashMap<Token, usize>,
	/// Number of times the context was observed with a following token.
	total: usize,
}

impl State {
	/// Creates a new empty state for the given context.
	pub fn new(key: &[Token]) -> Self {
		Self {
			key: key.to_vec(),
			transitions: HashMap::new(),
			total: 0,
		}
	}

	/// Records one occurrence of `next` following this context.
	pub fn add_transition(&mut self, next: &str) {
		*self.transitions.entry(next.to_owned()).or_insert(0) += 1;
		self.total += 1;
	}

	/// Number of times the context was observed.
	#[cfg(test)]
	pub fn total(&self) -> usize {
		self.total
	}

	/// Occurrence count of the `next` transition (0 when never observed).
	#[cfg(test)]
	pub fn count(&self, next: &str) -> usize {
		self.transitions.get(next).copied().unwrap_or(0)
	}

	/// Returns every following token with its conditional frequency.
	///
	/// Scores sum to 1 over the returned set. Order is unspecified.
	pub fn next_words(&self) -> (Vec<Token>, Vec<f64>) {
		let total = self.total as f64;
		self.transitions
			.iter()
			.map(|(next, occurrence)| (next.clone(), *occurrence as f64 / total))
			.unzip()
	}

	/// Merges another state into this one.
	///
	/// Both states must represent the same context; occurrence counts are summed.
	///
	/// # Errors
	/// Returns `InvalidArgument` if the state keys do not match.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.key != other.key {
			return Err(SuggestError::invalid(format!(
				"context mismatch: {:?} vs {:?}",
				self.key, other.key
			)));
		}

		for (next, occurrence) in &other.transitions {
			*self.transitions.entry(next.clone()).or_insert(0) += *occurrence;
		}
		self.total += other.total;

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(tokens: &[&str]) -> Vec<Token> {
		tokens.iter().map(|t| t.to_string()).collect()
	}

	#[test]
	fn total_tracks_transitions() {
		let mut state = State::new(&key(&["i"]));
		state.add_transition("am");
		state.add_transition("am");
		state.add_transition("was");
		assert_eq!(state.total(), 3);
		assert_eq!(state.count("am"), 2);
		assert_eq!(state.count("is"), 0);

		let (words, scores) = state.next_words();
		assert_eq!(words.len(), 2);
		assert!((scores.iter().sum::<f64>() - 1.0).abs() < 1e-12);
	}

	#[test]
	fn merge_sums_counts() {
		let mut left = State::new(&key(&["a", "b"]));
		left.add_transition("c");
		let mut right = State::new(&key(&["a", "b"]));
		right.add_transition("c");
		right.add_transition("d");

		left.merge(&right).unwrap();
		assert_eq!(left.count("c"), 2);
		assert_eq!(left.count("d"), 1);
		assert_eq!(left.total(), 3);
	}

	#[test]
	fn merge_rejects_other_context() {
		let mut left = State::new(&key(&["a"]));
		let right = State::new(&key(&["b"]));
		assert!(matches!(left.merge(&right), Err(SuggestError::InvalidArgument(_))));
	}
}
