//! The core algorithms: the search engine shared by every read operation,
//! and the insert/split/remove/compaction machinery.

use crate::children::ChildMap;
use crate::node::{Node, NodeId, ROOT};
use crate::sequencer::Sequencer;
use crate::{Trie, TrieMatch};

impl<S, T, Sq: Sequencer<S>> Trie<S, T, Sq> {
    /// Descend from `from` along `query` and decide, per `mode`, whether the
    /// node the descent terminated at is a hit.
    ///
    /// All four match modes share this routine; they differ only in what
    /// they accept at termination. Divergence strictly inside an edge is a
    /// miss for every mode.
    pub(crate) fn search(&self, from: NodeId, query: &S, mode: TrieMatch) -> Option<NodeId> {
        let query_len = self.sequencer.length(query);
        let from_node = &self.arena[from];
        if query_len == 0 || query_len < from_node.end {
            return None;
        }

        let mut offset = from_node.end;

        // A non-root starting point (a subtree view) is itself a candidate:
        // its prefix must agree with the query, and a query equal to the
        // prefix resolves to the view root.
        if let Some(sequence) = &from_node.sequence {
            let matched = self.sequencer.matches(sequence, 0, query, 0, from_node.end);
            if matched < from_node.end {
                return None;
            }
            if matched == query_len {
                return self.accept(from, query, query_len, offset, mode);
            }
        }

        let bucket = self.sequencer.hash(query, offset);
        let mut cur = self.arena[from].children.as_ref()?.get(bucket)?;

        loop {
            let node = &self.arena[cur];
            let sequence = node
                .sequence
                .as_ref()
                .expect("non-root node without a sequence");
            let node_len = node.edge_len();
            let cap = node_len.min(query_len - offset);
            let matched = self.sequencer.matches(sequence, node.start, query, offset, cap);
            offset += matched;

            if matched != cap {
                // Diverged inside the edge.
                return None;
            }
            if cap < node_len {
                // Query ends inside the edge.
                break;
            }
            if offset == query_len {
                // Query ends at the node boundary.
                break;
            }
            let bucket = self.sequencer.hash(query, offset);
            match self.arena[cur].children.as_ref().and_then(|c| c.get(bucket)) {
                Some(next) => cur = next,
                None => break,
            }
        }

        self.accept(cur, query, query_len, offset, mode)
    }

    fn accept(
        &self,
        id: NodeId,
        query: &S,
        query_len: usize,
        offset: usize,
        mode: TrieMatch,
    ) -> Option<NodeId> {
        match mode {
            TrieMatch::Exact => {
                let node = &self.arena[id];
                if node.value.is_none() || node.end != query_len {
                    return None;
                }
                let sequence = node.sequence.as_ref()?;
                let verified = self.sequencer.matches(sequence, 0, query, 0, node.end);
                (verified == node.end).then_some(id)
            }
            TrieMatch::StartsWith | TrieMatch::Subtree => (offset == query_len).then_some(id),
            TrieMatch::Partial => Some(id),
        }
    }

    /// Insert `query` -> `value`, returning the displaced value for an
    /// already-present key. A zero-length query is a no-op.
    pub(crate) fn insert(&mut self, query: S, value: T) -> Option<T>
    where
        S: Clone,
    {
        let query_len = self.sequencer.length(&query);
        if query_len == 0 {
            return None;
        }

        let mut offset = 0;
        let bucket = self.sequencer.hash(&query, 0);
        let mut cur = match self.arena[ROOT].children.as_ref().and_then(|c| c.get(bucket)) {
            Some(id) => id,
            None => {
                self.attach_leaf(ROOT, query, 0, query_len, value);
                return None;
            }
        };

        loop {
            let (node_len, cap, matched) = {
                let node = &self.arena[cur];
                let sequence = node
                    .sequence
                    .as_ref()
                    .expect("non-root node without a sequence");
                let node_len = node.edge_len();
                let cap = node_len.min(query_len - offset);
                let matched = self.sequencer.matches(sequence, node.start, &query, offset, cap);
                (node_len, cap, matched)
            };
            offset += matched;

            if matched != cap {
                // Diverged inside the edge: fork into a naked branch with
                // the suffix and the new leaf as its two children.
                self.split(cur, matched, None);
                self.attach_leaf(cur, query, offset, query_len, value);
                return None;
            }
            if cap < node_len {
                // Query ends inside the edge: the prefix becomes a valued
                // node holding the new key.
                self.split(cur, cap, Some(value));
                self.arena[cur].sequence = Some(query);
                return None;
            }
            if offset == query_len {
                // Exact node. Re-pointing at the newest key lets the
                // previously referenced (possibly much longer) sequence go.
                self.arena[cur].sequence = Some(query);
                return self.arena.set_value(cur, Some(value));
            }
            let bucket = self.sequencer.hash(&query, offset);
            match self.arena[cur].children.as_ref().and_then(|c| c.get(bucket)) {
                Some(next) => cur = next,
                None => {
                    self.attach_leaf(cur, query, offset, query_len, value);
                    return None;
                }
            }
        }
    }

    /// Attach a new leaf under `parent`, then run the +1 size walk for its
    /// value.
    fn attach_leaf(&mut self, parent: NodeId, query: S, start: usize, end: usize, value: T) {
        let bucket = self.sequencer.hash(&query, start);
        let id = self.arena.alloc(Node {
            parent: Some(parent),
            sequence: Some(query),
            start,
            end,
            value: None,
            children: None,
            size: 0,
        });
        let parent_node = &mut self.arena[parent];
        match &mut parent_node.children {
            Some(children) => {
                children.put(bucket, id);
            }
            None => parent_node.children = Some(ChildMap::with_entry(bucket, id)),
        }
        self.arena.set_value(id, Some(value));
    }

    /// Split `id`'s edge at relative index `at`: the suffix, value and
    /// children move into a new node attached below `id`, and `id` keeps the
    /// prefix with `new_value` (if any).
    ///
    /// `at` lies strictly inside the edge, so the suffix's first element —
    /// the new child's bucket — is well-defined.
    fn split(&mut self, id: NodeId, at: usize, new_value: Option<T>)
    where
        S: Clone,
    {
        let (sequence, suffix_start) = {
            let node = &self.arena[id];
            let sequence = node.sequence.clone().expect("split at the root");
            (sequence, node.start + at)
        };
        let bucket = self.sequencer.hash(&sequence, suffix_start);

        let node = &mut self.arena[id];
        let suffix = Node {
            parent: Some(id),
            sequence: Some(sequence),
            start: suffix_start,
            end: node.end,
            value: node.value.take(),
            children: node.children.take(),
            // The suffix inherits the whole subtree, so it inherits the
            // whole cached size.
            size: node.size,
        };
        node.end = suffix_start;

        let suffix_id = self.arena.alloc(suffix);
        self.arena.register_as_parent(suffix_id);
        self.arena[id].children = Some(ChildMap::with_entry(bucket, suffix_id));
        if new_value.is_some() {
            self.arena.set_value(id, new_value);
        }
    }

    /// Clear `id`'s value and restore the radix-compression invariant
    /// around it.
    pub(crate) fn remove_node(&mut self, id: NodeId) -> Option<T> {
        let value = self.arena.set_value(id, None);
        match self.arena[id].child_count() {
            0 => {
                let (bucket, parent) = {
                    let node = &self.arena[id];
                    let sequence = node
                        .sequence
                        .as_ref()
                        .expect("non-root node without a sequence");
                    let parent = node.parent.expect("removed the root");
                    (self.sequencer.hash(sequence, node.start), parent)
                };
                self.arena[parent]
                    .children
                    .as_mut()
                    .expect("detached node's parent has no child index")
                    .remove(bucket);
                self.arena.release(id);

                // A branch left naked with a single child collapses into it.
                let parent_node = &self.arena[parent];
                if parent != ROOT
                    && parent_node.value.is_none()
                    && parent_node.child_count() == 1
                {
                    self.absorb_only_child(parent);
                }
            }
            1 => self.absorb_only_child(id),
            _ => {}
        }
        value
    }

    /// Absorb `id`'s lone child: `id` takes over the child's sequence,
    /// value, children and end index, extending its own edge label by the
    /// child's former contribution.
    fn absorb_only_child(&mut self, id: NodeId) {
        let child_id = self.arena[id]
            .children
            .as_ref()
            .and_then(ChildMap::first)
            .expect("absorbing without a child");
        let child = self.arena.release(child_id);

        let node = &mut self.arena[id];
        node.children = child.children;
        node.value = child.value;
        node.sequence = child.sequence;
        node.end = child.end;
        self.arena.register_as_parent(id);
    }
}
