use crate::error::{Result, SuggestError};

/// Per-request parameters of `SuggestionEngine::suggest`.
///
/// # Responsibilities
/// - Hold the result limits of a keystroke request
/// - Reject zero limits at the moment they are set
///
/// # Invariants
/// - `max_words`, `max_texts` and `words_per_text` are always >= 1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuggestionInput {
	/// Maximum number of completions of the last word.
	max_words: usize,

	/// Maximum number of multi-word continuations.
	max_texts: usize,

	/// Number of tokens appended after the completed word in each continuation.
	words_per_text: usize,
}

impl Default for SuggestionInput {
	fn default() -> Self {
		Self { max_words: 3, max_texts: 1, words_per_text: 3 }
	}
}

impl SuggestionInput {
	pub fn max_words(&self) -> usize {
		self.max_words
	}

	pub fn max_texts(&self) -> usize {
		self.max_texts
	}

	pub fn words_per_text(&self) -> usize {
		self.words_per_text
	}

	/// Sets the maximum number of word completions.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `max_words` is 0.
	pub fn set_max_words(&mut self, max_words: usize) -> Result<()> {
		self.max_words = positive("max_words", max_words)?;
		Ok(())
	}

	/// Sets the maximum number of continuations.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `max_texts` is 0.
	pub fn set_max_texts(&mut self, max_texts: usize) -> Result<()> {
		self.max_texts = positive("max_texts", max_texts)?;
		Ok(())
	}

	/// Sets the continuation length.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `words_per_text` is 0.
	pub fn set_words_per_text(&mut self, words_per_text: usize) -> Result<()> {
		self.words_per_text = positive("words_per_text", words_per_text)?;
		Ok(())
	}
}

/// Checks that a result-count limit is at least 1.
pub(crate) fn positive(name: &str, value: usize) -> Result<usize> {
	if value == 0 {
		return Err(SuggestError::invalid(format!("{name} must be >= 1")));
	}
	Ok(value)
}
