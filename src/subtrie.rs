//! Live subtree views.
//!
//! A view is a light handle holding one node as its logical root. Lookups
//! and removals through a view take full keys (not suffixes) and are scoped
//! to the view root: the key must descend through it.

use crate::iter::{Iter, IterMut, Keys, Nodes, NodesAll, Values};
use crate::sequencer::Sequencer;
use crate::{SubTrie, SubTrieMut, TrieMatch};

impl<'a, S, T, Sq: Sequencer<S>> SubTrie<'a, S, T, Sq> {
    /// Number of key-value pairs under this view. O(1) via the cached
    /// subtree size.
    pub fn len(&self) -> usize {
        self.trie.arena[self.node].size
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The exact key stored at the view root, if it holds a value.
    pub fn key(&self) -> Option<&'a S> {
        let node = &self.trie.arena[self.node];
        if node.value.is_some() {
            node.sequence.as_ref()
        } else {
            None
        }
    }

    /// The value stored at the view root, if any.
    pub fn value(&self) -> Option<&'a T> {
        self.trie.arena[self.node].value.as_ref()
    }

    /// Look up `key` within this subtree using the owning trie's default
    /// match mode, falling back to the trie's default value on a miss.
    pub fn get(&self, key: &S) -> Option<&'a T> {
        self.get_with(key, self.trie.default_match)
    }

    /// Look up `key` within this subtree using an explicit match mode.
    pub fn get_with(&self, key: &S, mode: TrieMatch) -> Option<&'a T> {
        match self.trie.search(self.node, key, mode) {
            Some(id) => self.trie.arena[id]
                .value
                .as_ref()
                .or(self.trie.default.as_ref()),
            None => self.trie.default.as_ref(),
        }
    }

    /// Whether `key` matches within this subtree under the owning trie's
    /// default match mode.
    pub fn has(&self, key: &S) -> bool {
        self.has_with(key, self.trie.default_match)
    }

    /// Whether `key` matches within this subtree under `mode`.
    pub fn has_with(&self, key: &S, mode: TrieMatch) -> bool {
        self.trie.search(self.node, key, mode).is_some()
    }

    /// Whether exactly `key` is stored within this subtree.
    pub fn contains_key(&self, key: &S) -> bool {
        self.has_with(key, TrieMatch::Exact)
    }

    /// Narrow the view to the subtree `key` resolves to under the owning
    /// trie's default match mode.
    pub fn subtrie(&self, key: &S) -> Option<SubTrie<'a, S, T, Sq>> {
        self.subtrie_with(key, self.trie.default_match)
    }

    /// Narrow the view to the subtree `key` resolves to under `mode`.
    pub fn subtrie_with(&self, key: &S, mode: TrieMatch) -> Option<SubTrie<'a, S, T, Sq>> {
        let node = self.trie.search(self.node, key, mode)?;
        Some(SubTrie {
            trie: self.trie,
            node,
        })
    }

    /// Iterate over the key-value pairs of this subtree.
    pub fn iter(&self) -> Iter<'a, S, T> {
        Iter::new(&self.trie.arena, Some(self.node))
    }

    /// Iterate over the keys of this subtree.
    pub fn keys(&self) -> Keys<'a, S, T> {
        Keys::new(self.iter())
    }

    /// Iterate over the values of this subtree.
    pub fn values(&self) -> Values<'a, S, T> {
        Values::new(self.iter())
    }

    /// Iterate over the valued nodes of this subtree.
    pub fn nodes(&self) -> Nodes<'a, S, T> {
        Nodes::new(&self.trie.arena, Some(self.node))
    }

    /// Iterate over every node of this subtree, naked branches included.
    pub fn nodes_all(&self) -> NodesAll<'a, S, T> {
        NodesAll::new(&self.trie.arena, Some(self.node))
    }
}

impl<S, T, Sq> Clone for SubTrie<'_, S, T, Sq> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T, Sq> Copy for SubTrie<'_, S, T, Sq> {}

impl<'a, 'b, S, T, Sq: Sequencer<S>> IntoIterator for &'b SubTrie<'a, S, T, Sq> {
    type Item = (&'a S, &'a T);
    type IntoIter = Iter<'a, S, T>;

    fn into_iter(self) -> Iter<'a, S, T> {
        self.iter()
    }
}

impl<'a, S, T, Sq: Sequencer<S>> SubTrieMut<'a, S, T, Sq> {
    /// Number of key-value pairs under this view.
    pub fn len(&self) -> usize {
        self.node.map_or(0, |id| self.trie.arena[id].size)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The exact key stored at the view root, if it holds a value.
    pub fn key(&self) -> Option<&S> {
        let node = &self.trie.arena[self.node?];
        if node.value.is_some() {
            node.sequence.as_ref()
        } else {
            None
        }
    }

    /// The value stored at the view root, if any.
    pub fn value(&self) -> Option<&T> {
        self.trie.arena[self.node?].value.as_ref()
    }

    /// Mutable access to the value stored at the view root, if any.
    pub fn value_mut(&mut self) -> Option<&mut T> {
        let id = self.node?;
        self.trie.arena[id].value.as_mut()
    }

    /// Look up `key` within this subtree using the owning trie's default
    /// match mode, falling back to the trie's default value on a miss.
    pub fn get(&self, key: &S) -> Option<&T> {
        self.get_with(key, self.trie.default_match)
    }

    /// Look up `key` within this subtree using an explicit match mode.
    pub fn get_with(&self, key: &S, mode: TrieMatch) -> Option<&T> {
        let root = self.node?;
        match self.trie.search(root, key, mode) {
            Some(id) => self.trie.arena[id]
                .value
                .as_ref()
                .or(self.trie.default.as_ref()),
            None => self.trie.default.as_ref(),
        }
    }

    /// Whether `key` matches within this subtree under the owning trie's
    /// default match mode.
    pub fn has(&self, key: &S) -> bool {
        self.has_with(key, self.trie.default_match)
    }

    /// Whether `key` matches within this subtree under `mode`.
    pub fn has_with(&self, key: &S, mode: TrieMatch) -> bool {
        match self.node {
            Some(root) => self.trie.search(root, key, mode).is_some(),
            None => false,
        }
    }

    /// Whether exactly `key` is stored within this subtree.
    pub fn contains_key(&self, key: &S) -> bool {
        self.has_with(key, TrieMatch::Exact)
    }

    /// Remove the value stored under exactly `key` within this subtree,
    /// returning it. The removal affects the owning trie.
    ///
    /// If the removed key is the view root itself and no descendants
    /// remain, the view becomes empty.
    pub fn remove(&mut self, key: &S) -> Option<T> {
        let root = self.node?;
        let id = self.trie.search(root, key, TrieMatch::Exact)?;
        let detaches_root = id == root && !self.trie.arena[id].has_children();
        let removed = self.trie.remove_node(id);
        if detaches_root {
            self.node = None;
        }
        removed
    }

    /// Iterate over the key-value pairs of this subtree.
    pub fn iter(&self) -> Iter<'_, S, T> {
        Iter::new(&self.trie.arena, self.node)
    }

    /// Iterate over the key-value pairs of this subtree with mutable
    /// values.
    pub fn iter_mut(&mut self) -> IterMut<'_, S, T> {
        IterMut::new(&mut self.trie.arena, self.node)
    }

    /// Iterate over the keys of this subtree.
    pub fn keys(&self) -> Keys<'_, S, T> {
        Keys::new(self.iter())
    }

    /// Iterate over the values of this subtree.
    pub fn values(&self) -> Values<'_, S, T> {
        Values::new(self.iter())
    }

    /// Iterate over the valued nodes of this subtree.
    pub fn nodes(&self) -> Nodes<'_, S, T> {
        Nodes::new(&self.trie.arena, self.node)
    }

    /// Iterate over every node of this subtree, naked branches included.
    pub fn nodes_all(&self) -> NodesAll<'_, S, T> {
        NodesAll::new(&self.trie.arena, self.node)
    }
}
