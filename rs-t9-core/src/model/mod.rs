//! Top-level module for the suggestion system.
//!
//! It provides:
//! - A prefix tree over the vocabulary (`PrefixTree`)
//! - Token counts (`Vocabulary`) and word completion (`WordCompletor`)
//! - Fixed-order word n-gram models (`NGramModel`)
//! - The engine combining both (`SuggestionEngine`)

/// High-level engine: builds, caches and queries the models.
pub mod engine;

/// Build configuration (`EngineConfig`).
pub mod config;

/// Per-request limits (`SuggestionInput`).
pub mod suggestion_input;

/// Ranked results and the ranking order.
pub mod suggestion;

/// Fixed-order word n-gram model (`n >= 1`).
///
/// Handles document ingestion, transition counting,
/// next-token frequencies, and model merging.
pub mod ngram_model;

/// Completion of a partially typed token.
pub mod word_completor;

/// Token occurrence counts.
pub mod vocabulary;

/// Character trie over the vocabulary.
pub mod prefix_tree;

/// Internal representation of a single n-gram context.
///
/// Tracks following tokens and their counts.
/// This module is not exposed publicly.
mod state;
