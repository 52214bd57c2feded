//! The public map API.

use crate::iter::{Iter, IterMut, Keys, Nodes, NodesAll, Values};
use crate::node::{Arena, NodeId, ROOT};
use crate::sequencer::Sequencer;
use crate::{SubTrie, SubTrieMut, Trie, TrieMatch};

impl<S, T, Sq: Sequencer<S>> Trie<S, T, Sq> {
    /// Create an empty trie driven by the given sequencer.
    pub fn new(sequencer: Sq) -> Trie<S, T, Sq> {
        Trie {
            arena: Arena::new(),
            sequencer,
            default: None,
            default_match: TrieMatch::default(),
        }
    }

    /// Create an empty trie with a default value, returned by [`Trie::get`]
    /// when a query misses.
    pub fn with_default(sequencer: Sq, default: T) -> Trie<S, T, Sq> {
        Trie {
            default: Some(default),
            ..Trie::new(sequencer)
        }
    }

    /// An empty trie with the same sequencer, default value and default
    /// match mode as this one.
    pub fn empty_clone(&self) -> Trie<S, T, Sq>
    where
        T: Clone,
        Sq: Clone,
    {
        Trie {
            arena: Arena::new(),
            sequencer: self.sequencer.clone(),
            default: self.default.clone(),
            default_match: self.default_match,
        }
    }

    /// Insert a key-value pair, returning any value previously stored under
    /// the exact same key. A zero-length key is a no-op returning `None`.
    pub fn put(&mut self, key: S, value: T) -> Option<T>
    where
        S: Clone,
    {
        self.insert(key, value)
    }

    /// Look up `key` with the trie's default match mode, falling back to
    /// the default value on a miss.
    pub fn get(&self, key: &S) -> Option<&T> {
        self.get_with(key, self.default_match)
    }

    /// Look up `key` with an explicit match mode, falling back to the
    /// default value on a miss or on a match that resolves to a naked
    /// branch.
    pub fn get_with(&self, key: &S, mode: TrieMatch) -> Option<&T> {
        match self.search(ROOT, key, mode) {
            Some(id) => self.arena[id].value.as_ref().or(self.default.as_ref()),
            None => self.default.as_ref(),
        }
    }

    /// Mutable access to the value `key` resolves to under the default
    /// match mode. The default value is not a fallback here.
    pub fn get_mut(&mut self, key: &S) -> Option<&mut T> {
        self.get_mut_with(key, self.default_match)
    }

    /// Mutable access to the value `key` resolves to under `mode`.
    pub fn get_mut_with(&mut self, key: &S, mode: TrieMatch) -> Option<&mut T> {
        let id = self.search(ROOT, key, mode)?;
        self.arena[id].value.as_mut()
    }

    /// Whether `key` matches under the trie's default match mode.
    pub fn has(&self, key: &S) -> bool {
        self.has_with(key, self.default_match)
    }

    /// Whether `key` matches under `mode`.
    pub fn has_with(&self, key: &S, mode: TrieMatch) -> bool {
        self.search(ROOT, key, mode).is_some()
    }

    /// Whether some stored value equals `value` under `==`.
    pub fn contains_value(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// Remove the value stored under exactly `key`, returning it.
    pub fn remove(&mut self, key: &S) -> Option<T> {
        let id = self.search(ROOT, key, TrieMatch::Exact)?;
        self.remove_node(id)
    }

    /// Number of key-value pairs. O(1) via the cached root subtree size.
    pub fn len(&self) -> usize {
        self.arena[ROOT].size
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every key-value pair.
    pub fn clear(&mut self) {
        self.arena = Arena::new();
    }

    /// The match mode used by [`Trie::get`], [`Trie::has`] and
    /// [`Trie::subtrie`]. Initially [`TrieMatch::StartsWith`].
    pub fn default_match(&self) -> TrieMatch {
        self.default_match
    }

    pub fn set_default_match(&mut self, mode: TrieMatch) {
        self.default_match = mode;
    }

    /// The value returned by [`Trie::get`] on a miss.
    pub fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    pub fn set_default_value(&mut self, default: Option<T>) {
        self.default = default;
    }

    pub fn sequencer(&self) -> &Sq {
        &self.sequencer
    }

    /// A live view of the subtree `key` resolves to under the default match
    /// mode, or `None` on a miss.
    pub fn subtrie(&self, key: &S) -> Option<SubTrie<'_, S, T, Sq>> {
        self.subtrie_with(key, self.default_match)
    }

    /// A live view of the subtree `key` resolves to under `mode`.
    pub fn subtrie_with(&self, key: &S, mode: TrieMatch) -> Option<SubTrie<'_, S, T, Sq>> {
        let node = self.search(ROOT, key, mode)?;
        Some(SubTrie { trie: self, node })
    }

    /// A mutable live view of the subtree `key` resolves to under the
    /// default match mode. Removals through the view affect this trie.
    pub fn subtrie_mut(&mut self, key: &S) -> Option<SubTrieMut<'_, S, T, Sq>> {
        self.subtrie_mut_with(key, self.default_match)
    }

    /// A mutable live view of the subtree `key` resolves to under `mode`.
    pub fn subtrie_mut_with(&mut self, key: &S, mode: TrieMatch) -> Option<SubTrieMut<'_, S, T, Sq>> {
        let node = self.search(ROOT, key, mode)?;
        Some(SubTrieMut {
            trie: self,
            node: Some(node),
        })
    }

    /// Iterate over all key-value pairs.
    pub fn iter(&self) -> Iter<'_, S, T> {
        Iter::new(&self.arena, Some(ROOT))
    }

    /// Iterate over all key-value pairs with mutable values.
    pub fn iter_mut(&mut self) -> IterMut<'_, S, T> {
        IterMut::new(&mut self.arena, Some(ROOT))
    }

    /// Iterate over all keys.
    pub fn keys(&self) -> Keys<'_, S, T> {
        Keys::new(self.iter())
    }

    /// Iterate over all values.
    pub fn values(&self) -> Values<'_, S, T> {
        Values::new(self.iter())
    }

    /// Iterate over all valued nodes.
    pub fn nodes(&self) -> Nodes<'_, S, T> {
        Nodes::new(&self.arena, Some(ROOT))
    }

    /// Iterate over every node, naked branches included.
    pub fn nodes_all(&self) -> NodesAll<'_, S, T> {
        NodesAll::new(&self.arena, Some(ROOT))
    }

    /// Check the structural invariants of the whole trie (quite costly).
    /// You shouldn't ever have to call this.
    #[doc(hidden)]
    pub fn check_integrity(&self) -> bool {
        let (ok, size) = self.check_node(ROOT, true);
        ok && size == self.len()
    }

    fn check_node(&self, id: NodeId, is_root: bool) -> (bool, usize) {
        let node = &self.arena[id];

        if is_root {
            if node.parent.is_some()
                || node.start != 0
                || node.end != 0
                || node.value.is_some()
                || node.sequence.is_some()
            {
                println!("malformed root node");
                return (false, 0);
            }
        } else {
            if node.end <= node.start {
                println!("empty edge label at a non-root node");
                return (false, 0);
            }
            if node.value.is_none() && node.child_count() < 2 {
                println!("naked node with fewer than two children");
                return (false, 0);
            }
            let sequence = match &node.sequence {
                Some(sequence) => sequence,
                None => {
                    println!("non-root node without a sequence");
                    return (false, 0);
                }
            };
            let length = self.sequencer.length(sequence);
            if length < node.end {
                println!("sequence shorter than the node's end index");
                return (false, 0);
            }
            if node.value.is_some() && length != node.end {
                println!("valued node whose key extends past its end index");
                return (false, 0);
            }
        }

        let mut size = usize::from(node.value.is_some());

        if let Some(children) = &node.children {
            let mut counted = 0;
            for pos in 0..children.capacity() {
                let child_id = match children.value_at(pos) {
                    Some(child_id) => child_id,
                    None => continue,
                };
                counted += 1;
                let child = &self.arena[child_id];
                if child.parent != Some(id) {
                    println!("child with a stale parent link");
                    return (false, 0);
                }
                if child.start != node.end {
                    println!("child edge not starting at the parent's end");
                    return (false, 0);
                }
                let child_sequence = match &child.sequence {
                    Some(sequence) => sequence,
                    None => {
                        println!("non-root node without a sequence");
                        return (false, 0);
                    }
                };
                if self.sequencer.hash(child_sequence, child.start) != children.hash_at(pos) {
                    println!("child filed under the wrong bucket");
                    return (false, 0);
                }
                if !is_root {
                    let sequence = node.sequence.as_ref().expect("checked above");
                    let agreed = self.sequencer.matches(sequence, 0, child_sequence, 0, node.end);
                    if agreed != node.end {
                        println!("child sequence disagrees with its ancestor path");
                        return (false, 0);
                    }
                }
            }
            if counted != children.len() {
                println!(
                    "child count error, recorded: {}, actual: {}",
                    children.len(),
                    counted
                );
                return (false, 0);
            }
            for child_id in children.ids() {
                match self.check_node(child_id, false) {
                    (false, _) => return (false, 0),
                    (true, child_size) => size += child_size,
                }
            }
        }

        if size != node.size {
            println!("cached size error, recorded: {}, actual: {}", node.size, size);
            return (false, 0);
        }

        (true, size)
    }
}

impl<S, T, Sq: Sequencer<S> + Default> Default for Trie<S, T, Sq> {
    fn default() -> Self {
        Trie::new(Sq::default())
    }
}

impl<S: Clone, T, Sq: Sequencer<S>> Extend<(S, T)> for Trie<S, T, Sq> {
    fn extend<I: IntoIterator<Item = (S, T)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<S: Clone, T, Sq: Sequencer<S> + Default> FromIterator<(S, T)> for Trie<S, T, Sq> {
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Trie<S, T, Sq> {
        let mut trie = Trie::default();
        trie.extend(iter);
        trie
    }
}

impl<S, T: PartialEq, Sq: Sequencer<S>> PartialEq for Trie<S, T, Sq> {
    fn eq(&self, other: &Trie<S, T, Sq>) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|(key, value)| {
            other
                .search(ROOT, key, TrieMatch::Exact)
                .and_then(|id| other.arena[id].value.as_ref())
                .map_or(false, |v| *v == *value)
        })
    }
}

impl<'a, S, T, Sq: Sequencer<S>> IntoIterator for &'a Trie<S, T, Sq> {
    type Item = (&'a S, &'a T);
    type IntoIter = Iter<'a, S, T>;

    fn into_iter(self) -> Iter<'a, S, T> {
        self.iter()
    }
}
