use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;

/// Index of the root node in `PrefixTree::nodes`.
const ROOT: usize = 0;

/// A node of the prefix tree.
///
/// Children are indices into the tree's node arena, one per outgoing character.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
struct PrefixTreeNode {
	children: HashMap<char, usize>,
	/// A complete token ends on this node.
	is_end_of_word: bool,
}

/// Character trie over the vocabulary, answering "which tokens start with `prefix`".
///
/// Nodes live in a flat arena, so cloning, dropping and serializing the tree
/// never recurse, however long the stored tokens are.
///
/// # Invariants
/// - `nodes[ROOT]` always exists
/// - Every child index points inside `nodes`; each node except the root has
///   exactly one parent
/// - The path spelling a token reaches a node marked `is_end_of_word`
///   if and only if that token was inserted.
/// - `len` is the number of distinct inserted tokens.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(try_from = "RawPrefixTree")]
pub struct PrefixTree {
	nodes: Vec<PrefixTreeNode>,
	len: usize,
}

/// Decoded tree, checked before it becomes a `PrefixTree`.
#[derive(Deserialize)]
struct RawPrefixTree {
	nodes: Vec<PrefixTreeNode>,
	len: usize,
}

impl TryFrom<RawPrefixTree> for PrefixTree {
	type Error = String;

	fn try_from(raw: RawPrefixTree) -> Result<Self, Self::Error> {
		if raw.nodes.is_empty() {
			return Err("prefix tree has no root".to_owned());
		}

		let mut parents = vec![0usize; raw.nodes.len()];
		for node in &raw.nodes {
			for &child in node.children.values() {
				match parents.get_mut(child) {
					Some(count) if child != ROOT => *count += 1,
					_ => return Err(format!("invalid child index {child}")),
				}
			}
		}
		if parents.iter().skip(1).any(|count| *count != 1) {
			return Err("prefix tree node without exactly one parent".to_owned());
		}

		let words = raw.nodes.iter().filter(|node| node.is_end_of_word).count();
		if words != raw.len {
			return Err(format!("prefix tree holds {words} words, header says {}", raw.len));
		}

		Ok(Self { nodes: raw.nodes, len: raw.len })
	}
}

impl Default for PrefixTree {
	fn default() -> Self {
		Self { nodes: vec![PrefixTreeNode::default()], len: 0 }
	}
}

impl PrefixTree {
	/// Creates a tree containing every token of `vocabulary`.
	pub fn new<I, S>(vocabulary: I) -> Self
	where
		I: IntoIterator<Item=S>,
		S: AsRef<str>,
	{
		let mut tree = Self::default();
		for word in vocabulary {
			tree.insert(word.as_ref());
		}
		tree
	}

	/// Inserts a token. Inserting the same token twice is a no-op.
	pub fn insert(&mut self, word: &str) {
		let mut node = ROOT;
		for c in word.chars() {
			node = match self.nodes[node].children.get(&c) {
				Some(&child) => child,
				None => {
					let child = self.nodes.len();
					self.nodes.push(PrefixTreeNode::default());
					self.nodes[node].children.insert(c, child);
					child
				}
			};
		}
		if !self.nodes[node].is_end_of_word {
			self.nodes[node].is_end_of_word = true;
			self.len += 1;
		}
	}

	/// Number of distinct tokens stored.
	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Returns `true` if `word` was inserted as a complete token.
	pub fn contains(&self, word: &str) -> bool {
		self.walk(word).is_some_and(|node| self.nodes[node].is_end_of_word)
	}

	/// Returns every stored token starting with `prefix` (including `prefix` itself).
	///
	/// The order of the result follows child iteration order and must not be
	/// relied upon. An empty prefix returns the whole vocabulary; an unknown
	/// prefix returns an empty vector.
	pub fn search_prefix(&self, prefix: &str) -> Vec<Token> {
		let Some(start) = self.walk(prefix) else {
			return Vec::new();
		};

		let mut words = Vec::new();
		let mut path = prefix.to_owned();
		if self.nodes[start].is_end_of_word {
			words.push(path.clone());
		}

		// Depth-first over (node, path length in bytes before its edge, edge char),
		// sharing one path buffer between branches
		let mut stack: Vec<(usize, usize, char)> = self.nodes[start]
			.children
			.iter()
			.map(|(c, child)| (*child, path.len(), *c))
			.collect();
		while let Some((node, parent_len, c)) = stack.pop() {
			path.truncate(parent_len);
			path.push(c);
			if self.nodes[node].is_end_of_word {
				words.push(path.clone());
			}
			for (next, child) in &self.nodes[node].children {
				stack.push((*child, path.len(), *next));
			}
		}
		words
	}

	/// Follows `prefix` from the root, one character per edge.
	fn walk(&self, prefix: &str) -> Option<usize> {
		let mut node = ROOT;
		for c in prefix.chars() {
			node = *self.nodes[node].children.get(&c)?;
		}
		Some(node)
	}
}
