use super::state::State;
use super::vocabulary::check_document;
use crate::error::{Result, SuggestError};
use crate::tokenizer::Token;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents a word-level n-gram model.
///
/// The `NGramModel` stores states for contexts of `n` tokens and
/// reports which tokens followed each context in the training corpus.
///
/// # Responsibilities
/// - Build the model from tokenized documents
/// - Accumulate transition counts for each context
/// - Report next-token conditional frequencies for a context
/// - Merge with another n-gram model of the same order `n`
///
/// # Invariants
/// - `n` is always >= 1
/// - Each state in `states` corresponds to a unique context of length `n`
/// - All state transitions have occurrence counts >= 1
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NGramModel {
	/// The order of the model (number of context tokens)
	n: usize,

	/// Mapping from a context (length n) to its corresponding state
	states: HashMap<Vec<Token>, State>,
}

impl NGramModel {
	/// Creates a new empty n-gram model of order `n`.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `n < 1`.
	pub fn new(n: usize) -> Result<Self> {
		if n < 1 {
			return Err(SuggestError::invalid("n-gram order must be >= 1"));
		}
		Ok(Self { n, states: HashMap::new() })
	}

	/// Builds a model of order `n` from every document of `corpus`.
	///
	/// # Errors
	/// - `InvalidArgument` if `n < 1`
	/// - `MalformedCorpus` if a document contains an empty token
	pub fn from_corpus<D, T>(corpus: &[D], n: usize) -> Result<Self>
	where
		D: AsRef<[T]>,
		T: AsRef<str>,
	{
		let mut model = Self::new(n)?;
		for document in corpus {
			model.add_document(document.as_ref())?;
		}
		Ok(model)
	}

	/// The order of the model.
	pub fn order(&self) -> usize {
		self.n
	}

	/// Number of distinct contexts observed.
	pub fn context_count(&self) -> usize {
		self.states.len()
	}

	/// Adds a tokenized document to the model.
	///
	/// Slides a window of `n + 1` tokens over the document: the first `n`
	/// tokens are the context, the last one is the following token.
	/// Documents shorter than `n + 1` tokens add nothing.
	pub fn add_document<T: AsRef<str>>(&mut self, document: &[T]) -> Result<()> {
		check_document(document)?;
		if document.len() <= self.n {
			return Ok(());
		}

		let tokens: Vec<Token> = document.iter().map(|t| t.as_ref().to_owned()).collect();
		for window in tokens.windows(self.n + 1) {
			let (context, next) = window.split_at(self.n);
			// Get or create the state for this context
			let state = self.states.entry(context.to_vec()).or_insert_with(|| State::new(context));
			state.add_transition(&next[0]);
		}
		Ok(())
	}

	/// Returns the tokens observed after `context` and their conditional frequencies.
	///
	/// Only the last `n` tokens of `context` are used; a shorter context is used
	/// as-is. An unseen context yields two empty vectors, otherwise the scores
	/// sum to 1. Order is unspecified.
	pub fn next_words(&self, context: &[Token]) -> (Vec<Token>, Vec<f64>) {
		let key = &context[context.len().saturating_sub(self.n)..];
		match self.states.get(key) {
			Some(state) => state.next_words(),
			None => (Vec::new(), Vec::new()),
		}
	}

	/// Merges another n-gram model into this one.
	///
	/// # Notes
	/// - Both models must have the same order `n`.
	/// - Occurrence counts for matching states and transitions are summed.
	///
	/// # Errors
	/// Returns `InvalidArgument` if the model orders do not match.
	pub fn merge(&mut self, other: &Self) -> Result<()> {
		if self.n != other.n {
			return Err(SuggestError::invalid(format!("order mismatch: {} vs {}", self.n, other.n)));
		}

		for (key, state) in &other.states {
			if let Some(existing) = self.states.get_mut(key) {
				existing.merge(state)?;
			} else {
				self.states.insert(key.clone(), state.clone());
			}
		}

		Ok(())
	}
}
