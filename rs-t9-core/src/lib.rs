//! Word-level text suggestion library.
//!
//! This crate predicts how a user keeps typing:
//! - Tokenization of raw text into lower-cased tokens
//! - Completion of the current, partially typed word (prefix tree + frequencies)
//! - Next-word prediction with a fixed-order n-gram model
//! - A suggestion engine ranking both kinds of proposals
//!
//! A built engine is immutable and can be shared across threads.

/// Suggestion models and the engine combining them.
pub mod model;

/// Token grammars and the tokenizer.
pub mod tokenizer;

/// Error type shared by the whole crate.
pub mod error;

/// I/O utilities (corpus loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use error::{Result, SuggestError};
pub use model::config::EngineConfig;
pub use model::engine::SuggestionEngine;
pub use model::suggestion::Suggestions;
pub use model::suggestion_input::SuggestionInput;
pub use tokenizer::{tokenize, Grammar, Token};
