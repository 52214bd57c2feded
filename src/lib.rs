//! A fast, safe, generic compact (radix) trie.
//!
//! [`Trie`] maps variable-length sequences to values. Any keys which share a
//! common prefix are stored below a single copy of that prefix, and chains of
//! single-child nodes are collapsed into multi-element edge labels on insert
//! and re-collapsed on delete.
//!
//! The trie is generic in two dimensions: the sequence type `S` (strings,
//! byte arrays, integer slices, token lists, ...) and the value type `T`.
//! Genericity over `S` is achieved through a [`Sequencer`] supplied at
//! construction; the trie never inspects sequence elements directly.
//!
//! ```
//! use seqtrie::{ByteSequencer, Trie, TrieMatch};
//!
//! let mut trie = Trie::new(ByteSequencer);
//! trie.put("hello", 1);
//! trie.put("help", 2);
//!
//! assert_eq!(trie.get_with(&"hello", TrieMatch::Exact), Some(&1));
//! // The default match mode is StartsWith: "he" matches both keys and
//! // resolves to one of them.
//! assert!(trie.get(&"he").is_some());
//!
//! // Live subtree views are scoped to a prefix.
//! let view = trie.subtrie(&"hel").unwrap();
//! assert_eq!(view.len(), 2);
//! let mut keys: Vec<&str> = view.keys().copied().collect();
//! keys.sort();
//! assert_eq!(keys, ["hello", "help"]);
//! ```
//!
//! Iteration order follows the stable position order of each node's child
//! index, an implementation detail; do not rely on insertion order or
//! lexicographic order.

pub use self::node::NodeRef;
pub use self::sequencer::{ByteSequencer, Indexed, Sequencer, SliceSequencer};
pub use self::trie_common::TrieCommon;

mod children;
pub mod iter;
mod node;
mod sequencer;
mod subtrie;
mod traversal;
mod trie;
mod trie_common;

#[cfg(test)]
mod proptests;

use self::node::{Arena, NodeId};

/// How a query sequence is matched against the keys stored in a trie.
///
/// All four modes share one search routine and differ only in which node
/// they accept once descent terminates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TrieMatch {
    /// Only a node whose full key equals the query.
    Exact,
    /// The query is a prefix of at least one stored key. This is the
    /// initial default mode of a trie.
    #[default]
    StartsWith,
    /// Like [`TrieMatch::StartsWith`], but additionally accepts the deepest
    /// node whose path is a prefix of the query when the query runs past
    /// every stored key.
    Partial,
    /// Like [`TrieMatch::StartsWith`]; intended for whole-subtree
    /// enumeration via [`Trie::subtrie_with`].
    Subtree,
}

/// Data structure for storing and querying sequence-like keys and
/// associated values.
///
/// Construction takes a [`Sequencer`] defining length, per-element hashing
/// and prefix matching for the key type, and optionally a default value
/// returned by [`Trie::get`] when a query misses.
///
/// All nodes live in a single arena owned by the trie; parent and child
/// links are plain indices into it, which is what makes the two-way links
/// of a radix trie safe to express.
#[derive(Clone, Debug)]
pub struct Trie<S, T, Sq> {
    arena: Arena<S, T>,
    sequencer: Sq,
    default: Option<T>,
    default_match: TrieMatch,
}

/// Immutable live view of a subtree of a larger trie.
///
/// Obtained from [`Trie::subtrie`]; the view's root is the node the prefix
/// search resolved to, and `len`, iteration and lookups are scoped to it.
#[derive(Debug)]
pub struct SubTrie<'a, S, T, Sq> {
    trie: &'a Trie<S, T, Sq>,
    node: NodeId,
}

/// Mutable live view of a subtree of a larger trie.
///
/// Removals through the view affect the owning trie. A view whose root node
/// is itself removed (last value, no descendants left) becomes empty.
#[derive(Debug)]
pub struct SubTrieMut<'a, S, T, Sq> {
    trie: &'a mut Trie<S, T, Sq>,
    node: Option<NodeId>,
}
