use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SuggestError};
use crate::tokenizer::Token;

/// Token occurrence counts over a training corpus.
///
/// # Invariants
/// - Every stored count is >= 1
/// - `total` is the number of tokens seen in the corpus; after `retain_above`
///   it still counts the dropped tokens, so frequencies stay relative to the
///   whole corpus
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Vocabulary {
	counts: HashMap<Token, usize>,
	total: usize,
}

impl Vocabulary {
	/// Counts every token of every document.
	///
	/// # Errors
	/// Returns `MalformedCorpus` if a document contains an empty token.
	pub fn from_corpus<D, T>(corpus: &[D]) -> Result<Self>
	where
		D: AsRef<[T]>,
		T: AsRef<str>,
	{
		let mut vocabulary = Self::default();
		for document in corpus {
			vocabulary.add_document(document.as_ref())?;
		}
		Ok(vocabulary)
	}

	/// Counts the tokens of one document.
	///
	/// The document is checked before anything is counted, a rejected
	/// document leaves the vocabulary untouched.
	pub fn add_document<T: AsRef<str>>(&mut self, document: &[T]) -> Result<()> {
		check_document(document)?;
		for token in document {
			*self.counts.entry(token.as_ref().to_owned()).or_insert(0) += 1;
		}
		self.total += document.len();
		Ok(())
	}

	/// Occurrence count of `token` (0 when unknown).
	pub fn count(&self, token: &str) -> usize {
		self.counts.get(token).copied().unwrap_or(0)
	}

	/// Total number of tokens seen in the corpus.
	pub fn total(&self) -> usize {
		self.total
	}

	/// Number of distinct tokens.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	pub fn tokens(&self) -> impl Iterator<Item=&str> {
		self.counts.keys().map(String::as_str)
	}

	/// Drops every token seen `min_frequency` times or fewer.
	pub fn retain_above(&mut self, min_frequency: usize) {
		self.counts.retain(|_, count| *count > min_frequency);
	}

	/// Adds the counts of `other` into this vocabulary.
	pub fn merge(&mut self, other: &Self) {
		for (token, count) in &other.counts {
			*self.counts.entry(token.clone()).or_insert(0) += *count;
		}
		self.total += other.total;
	}
}

/// Rejects documents holding an empty token.
pub(crate) fn check_document<T: AsRef<str>>(document: &[T]) -> Result<()> {
	match document.iter().position(|token| token.as_ref().is_empty()) {
		Some(index) => Err(SuggestError::MalformedCorpus(format!("empty token at position {index}"))),
		None => Ok(()),
	}
}
