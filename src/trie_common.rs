//! Common read access for tries and subtrie views.

use crate::iter::{Children, Iter, Keys, Nodes, NodesAll, Values};
use crate::node::{NodeId, NodeRef, ROOT};
use crate::{SubTrie, SubTrieMut, Trie};

/// Functionality shared by [`Trie`], [`SubTrie`] and [`SubTrieMut`]:
/// iteration over the subtree and read access to the root node.
///
/// Implemented for references, so calls read naturally:
/// `trie.keys()`, `view.iter()`, and so on.
pub trait TrieCommon<'a, S: 'a, T: 'a, Sq: 'a>: Sized {
    #[doc(hidden)]
    fn view(self) -> (&'a Trie<S, T, Sq>, Option<NodeId>);

    /// The exact key stored at this subtree's root node, if it holds a
    /// value. `None` for the whole-trie view and for naked branches.
    fn key(self) -> Option<&'a S> {
        let (trie, node) = self.view();
        let node = &trie.arena[node?];
        if node.value.is_some() {
            node.sequence.as_ref()
        } else {
            None
        }
    }

    /// The value stored at this subtree's root node, if any.
    fn value(self) -> Option<&'a T> {
        let (trie, node) = self.view();
        trie.arena[node?].value.as_ref()
    }

    /// Number of key-value pairs in this subtree. O(1) via the cached
    /// subtree size.
    fn len(self) -> usize {
        let (trie, node) = self.view();
        node.map_or(0, |id| trie.arena[id].size)
    }

    fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Whether the root node of this subtree has no children.
    fn is_leaf(self) -> bool {
        let (trie, node) = self.view();
        node.map_or(true, |id| !trie.arena[id].has_children())
    }

    /// The root node of this subtree.
    fn node(self) -> Option<NodeRef<'a, S, T>> {
        let (trie, node) = self.view();
        Some(NodeRef {
            arena: &trie.arena,
            id: node?,
        })
    }

    /// Iterate over the key-value pairs of this subtree.
    fn iter(self) -> Iter<'a, S, T> {
        let (trie, node) = self.view();
        Iter::new(&trie.arena, node)
    }

    /// Iterate over the keys of this subtree.
    fn keys(self) -> Keys<'a, S, T> {
        Keys::new(self.iter())
    }

    /// Iterate over the values of this subtree.
    fn values(self) -> Values<'a, S, T> {
        Values::new(self.iter())
    }

    /// Iterate over the valued nodes of this subtree.
    fn nodes(self) -> Nodes<'a, S, T> {
        let (trie, node) = self.view();
        Nodes::new(&trie.arena, node)
    }

    /// Iterate over every node of this subtree, naked branches included.
    fn nodes_all(self) -> NodesAll<'a, S, T> {
        let (trie, node) = self.view();
        NodesAll::new(&trie.arena, node)
    }

    /// Iterate over the direct child subtries of this subtree's root.
    fn children(self) -> Children<'a, S, T, Sq> {
        let (trie, node) = self.view();
        Children::new(trie, node)
    }
}

impl<'a, S: 'a, T: 'a, Sq: 'a> TrieCommon<'a, S, T, Sq> for &'a Trie<S, T, Sq> {
    fn view(self) -> (&'a Trie<S, T, Sq>, Option<NodeId>) {
        (self, Some(ROOT))
    }
}

impl<'a: 'b, 'b, S: 'a, T: 'a, Sq: 'a> TrieCommon<'a, S, T, Sq> for &'b SubTrie<'a, S, T, Sq> {
    fn view(self) -> (&'a Trie<S, T, Sq>, Option<NodeId>) {
        (self.trie, Some(self.node))
    }
}

/// A mutable view iterates through a reborrow, so the items live as long as
/// the reference to the view rather than the view itself.
impl<'a: 'b, 'b, S: 'a, T: 'a, Sq: 'a> TrieCommon<'b, S, T, Sq> for &'b SubTrieMut<'a, S, T, Sq> {
    fn view(self) -> (&'b Trie<S, T, Sq>, Option<NodeId>) {
        (self.trie, self.node)
    }
}
