//! Property-based tests against a `BTreeMap` model, with a full structural
//! integrity check after every mutation.

use std::collections::BTreeMap;

use proptest::prelude::*;
use proptest_derive::Arbitrary;

use crate::{ByteSequencer, Trie, TrieMatch};

/// Key generation biased toward shared prefixes, so that splits, naked
/// branches and compaction all get exercised.
#[derive(Debug, Clone)]
struct Key(Vec<u8>);

impl Arbitrary for Key {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: ()) -> Self::Strategy {
        prop_oneof![
            Just(Key(vec![])),
            prop::collection::vec(prop::sample::select(vec![b'a', b'b', b'c']), 1..6)
                .prop_map(Key),
            "[a-d]{1,10}".prop_map(|s| Key(s.into_bytes())),
            "[a-c]{2,5}/[a-c]{1,4}".prop_map(|s| Key(s.into_bytes())),
        ]
        .boxed()
    }
}

#[derive(Arbitrary, Debug, Clone)]
enum Action {
    Insert(Key, u16),
    Remove(Key),
    Get(Key),
}

struct Harness {
    trie: Trie<Vec<u8>, u16, ByteSequencer>,
    model: BTreeMap<Vec<u8>, u16>,
}

impl Harness {
    fn new() -> Harness {
        Harness {
            trie: Trie::new(ByteSequencer),
            model: BTreeMap::new(),
        }
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::Insert(Key(key), value) => {
                if key.is_empty() {
                    // Zero-length keys are a silent no-op.
                    assert_eq!(self.trie.put(key, value), None);
                } else {
                    let trie_prev = self.trie.put(key.clone(), value);
                    let model_prev = self.model.insert(key, value);
                    assert_eq!(trie_prev, model_prev);
                }
            }
            Action::Remove(Key(key)) => {
                assert_eq!(self.trie.remove(&key), self.model.remove(&key));
            }
            Action::Get(Key(key)) => {
                assert_eq!(
                    self.trie.get_with(&key, TrieMatch::Exact),
                    self.model.get(&key)
                );
            }
        }
        assert_eq!(self.trie.len(), self.model.len());
        assert!(self.trie.check_integrity());
    }
}

fn entry_map(entries: &BTreeMap<String, u16>) -> Trie<Vec<u8>, u16, ByteSequencer> {
    let mut trie = Trie::new(ByteSequencer);
    for (key, value) in entries {
        trie.put(key.clone().into_bytes(), *value);
    }
    trie
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn trie_matches_btreemap_model(actions in prop::collection::vec(any::<Action>(), 1..48)) {
        let mut harness = Harness::new();
        for action in actions {
            harness.execute(action);
        }
    }

    #[test]
    fn iteration_matches_model(
        entries in prop::collection::btree_map("[a-c]{1,8}", any::<u16>(), 0..24),
    ) {
        let trie = entry_map(&entries);
        prop_assert_eq!(trie.len(), entries.len());

        let collected: BTreeMap<Vec<u8>, u16> =
            trie.iter().map(|(k, v)| (k.clone(), *v)).collect();
        let expected: BTreeMap<Vec<u8>, u16> = entries
            .iter()
            .map(|(k, v)| (k.clone().into_bytes(), *v))
            .collect();
        prop_assert_eq!(collected, expected);
        prop_assert!(trie.check_integrity());
    }

    #[test]
    fn prefix_views_match_model(
        entries in prop::collection::btree_map("[a-c]{1,8}", any::<u16>(), 0..24),
        prefix in "[a-c]{1,4}",
    ) {
        let trie = entry_map(&entries);
        let prefix = prefix.into_bytes();
        let mut expected: Vec<Vec<u8>> = entries
            .keys()
            .filter(|k| k.as_bytes().starts_with(&prefix))
            .map(|k| k.clone().into_bytes())
            .collect();
        expected.sort();

        match trie.subtrie_with(&prefix, TrieMatch::Subtree) {
            Some(view) => {
                prop_assert_eq!(view.len(), expected.len());
                let mut collected: Vec<Vec<u8>> = view.keys().cloned().collect();
                collected.sort();
                prop_assert_eq!(collected, expected);
            }
            None => prop_assert!(expected.is_empty()),
        }
    }

    #[test]
    fn starts_with_matches_model(
        entries in prop::collection::btree_map("[a-c]{1,8}", any::<u16>(), 0..24),
        probe in "[a-c]{1,6}",
    ) {
        let trie = entry_map(&entries);
        let probe = probe.into_bytes();
        let hit = entries.keys().any(|k| k.as_bytes().starts_with(&probe));
        prop_assert_eq!(trie.has_with(&probe, TrieMatch::StartsWith), hit);
    }

    #[test]
    fn view_removal_matches_model(
        entries in prop::collection::btree_map("[a-c]{1,8}", any::<u16>(), 0..24),
        prefix in "[a-c]{1,4}",
    ) {
        let mut trie = entry_map(&entries);
        let prefix = prefix.into_bytes();
        let targets: Vec<Vec<u8>> = entries
            .keys()
            .filter(|k| k.as_bytes().starts_with(&prefix))
            .map(|k| k.clone().into_bytes())
            .collect();

        match trie.subtrie_mut_with(&prefix, TrieMatch::Subtree) {
            Some(mut view) => {
                for key in &targets {
                    prop_assert!(view.remove(key).is_some());
                }
                prop_assert_eq!(view.len(), 0);
            }
            None => prop_assert!(targets.is_empty()),
        }

        prop_assert_eq!(trie.len(), entries.len() - targets.len());
        prop_assert!(trie.check_integrity());
        for key in entries.keys() {
            let expected = !key.as_bytes().starts_with(&prefix);
            prop_assert_eq!(
                trie.has_with(&key.clone().into_bytes(), TrieMatch::Exact),
                expected
            );
        }
    }
}
