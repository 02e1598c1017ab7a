use serde::{Deserialize, Serialize};

use crate::error::{Result, SuggestError};
use crate::tokenizer::Grammar;

/// Build-time configuration of a `SuggestionEngine`.
///
/// Stored inside the serialized engine so a cached blob can be checked
/// against the configuration it is loaded with.
///
/// # Invariants
/// - `order` is always >= 1
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
	/// Token grammar used for raw text.
	pub grammar: Grammar,

	/// Number of context tokens of the n-gram model.
	order: usize,

	/// Keep only tokens seen strictly more than this many times for completion.
	/// `None` keeps every observed token.
	pub min_frequency: Option<usize>,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self { grammar: Grammar::default(), order: 2, min_frequency: None }
	}
}

impl EngineConfig {
	/// Creates a configuration with the given n-gram order and default settings.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `order < 1`.
	pub fn new(order: usize) -> Result<Self> {
		let mut config = Self::default();
		config.set_order(order)?;
		Ok(config)
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Sets the n-gram order.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `order < 1`.
	pub fn set_order(&mut self, order: usize) -> Result<()> {
		if order < 1 {
			return Err(SuggestError::invalid("n-gram order must be >= 1"));
		}
		self.order = order;
		Ok(())
	}

	pub fn with_grammar(mut self, grammar: Grammar) -> Self {
		self.grammar = grammar;
		self
	}

	pub fn with_min_frequency(mut self, min_frequency: Option<usize>) -> Self {
		self.min_frequency = min_frequency;
		self
	}
}
