use log::debug;
use serde::{Deserialize, Serialize};

use super::prefix_tree::PrefixTree;
use super::vocabulary::Vocabulary;
use crate::error::{Result, SuggestError};
use crate::tokenizer::Token;

/// Completes a partially typed token using corpus word frequencies.
///
/// # Responsibilities
/// - Hold the (optionally filtered) vocabulary and its prefix tree
/// - Score every completion by its frequency over the whole corpus
///
/// # Invariants
/// - A token is in `prefix_tree` if and only if it has a positive count in `vocabulary`
/// - `vocabulary` is not empty
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WordCompletor {
	vocabulary: Vocabulary,
	prefix_tree: PrefixTree,
}

impl WordCompletor {
	/// Counts the corpus tokens and indexes them.
	///
	/// With `min_frequency = Some(k)`, only tokens seen more than `k` times
	/// are indexed.
	///
	/// # Errors
	/// - `MalformedCorpus` if a document contains an empty token
	/// - `InvalidArgument` if no token survives (empty corpus or too strict filter)
	pub fn new<D, T>(corpus: &[D], min_frequency: Option<usize>) -> Result<Self>
	where
		D: AsRef<[T]>,
		T: AsRef<str>,
	{
		Self::from_vocabulary(Vocabulary::from_corpus(corpus)?, min_frequency)
	}

	/// Builds the completor from already counted tokens.
	pub fn from_vocabulary(mut vocabulary: Vocabulary, min_frequency: Option<usize>) -> Result<Self> {
		let observed = vocabulary.len();
		if let Some(min_frequency) = min_frequency {
			vocabulary.retain_above(min_frequency);
		}
		if vocabulary.is_empty() {
			return Err(SuggestError::invalid(format!(
				"vocabulary is empty ({observed} distinct tokens observed, min_frequency {min_frequency:?})"
			)));
		}
		debug!("Indexing {} of {} distinct tokens", vocabulary.len(), observed);

		let prefix_tree = PrefixTree::new(vocabulary.tokens());
		Ok(Self { vocabulary, prefix_tree })
	}

	/// Returns the indexed tokens starting with `prefix` and their scores.
	///
	/// The score of a word is `count(word) / total tokens in the corpus`;
	/// scores are not normalized over the returned set. Both vectors have
	/// the same length and are empty when nothing matches. Their order is
	/// unspecified.
	pub fn complete(&self, prefix: &str) -> (Vec<Token>, Vec<f64>) {
		let words = self.prefix_tree.search_prefix(prefix);
		let total = self.vocabulary.total() as f64;
		let scores = words
			.iter()
			.map(|word| self.vocabulary.count(word) as f64 / total)
			.collect();
		(words, scores)
	}

	/// Indexed vocabulary.
	pub fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}
}
