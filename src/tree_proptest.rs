//! Property-based tests for the reconciliation engine.
//!
//! These tests use proptest to generate random catalogs and verify that the
//! engine's invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::align::{align, AlignOptions};
    use crate::codec::{normalize, parse};
    use crate::diff::diff;
    use crate::generate::{Fixed, TitleCase};
    use crate::lint::{check_balance, find_duplicate_siblings};
    use crate::merge::merge_missing;
    use crate::tree::{KeyTree, Node};
    use proptest::prelude::*;

    // A small alphabet so that generated trees share keys often.
    fn key() -> impl Strategy<Value = String> {
        "[a-c]{1,2}"
    }

    fn value() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-zA-Z {}\"\\\\.]{0,8}",
            Just("TODO".to_string()),
            "\\PC{0,4}",
        ]
    }

    fn tree() -> impl Strategy<Value = KeyTree> {
        let leaf = value().prop_map(Node::Leaf);
        let node = leaf.prop_recursive(3, 32, 4, |inner| {
            prop::collection::vec((key(), inner), 0..4)
                .prop_map(|entries| Node::Branch(entries.into_iter().collect()))
        });
        prop::collection::vec((key(), node), 0..5)
            .prop_map(|entries| entries.into_iter().collect())
    }

    // ============================================================================
    // codec property tests
    // ============================================================================

    proptest! {
        /// Property: normalized output parses back to the same tree
        #[test]
        fn normalize_round_trips(t in tree()) {
            let text = normalize(&t);
            let parsed = parse(&text).unwrap();
            prop_assert_eq!(&parsed, &t);
            prop_assert_eq!(normalize(&parsed), text);
        }

        /// Property: normalized output is clean for every text-level check
        #[test]
        fn normalized_output_lints_clean(t in tree()) {
            let text = normalize(&t);
            prop_assert!(find_duplicate_siblings(&text).is_empty());
            prop_assert!(check_balance(&text).is_empty());
        }

        /// Property: a key written twice is reported exactly once
        #[test]
        fn repeated_key_reported_once(k in "[a-zA-Z_]{1,8}", v1 in "[a-z]{0,5}", v2 in "[a-z]{0,5}") {
            let text = format!(r#"{{"{k}": "{v1}", "{k}": "{v2}"}}"#);
            let duplicates = find_duplicate_siblings(&text);
            prop_assert_eq!(duplicates.len(), 1);
            prop_assert_eq!(duplicates[0].path.to_string(), k);
        }
    }

    // ============================================================================
    // diff / merge property tests
    // ============================================================================

    proptest! {
        /// Property: diff is symmetric in its two "only in" buckets
        #[test]
        fn diff_is_symmetric(a in tree(), b in tree()) {
            let forward = diff(&a, &b).sorted();
            let backward = diff(&b, &a).sorted();
            prop_assert_eq!(forward.only_in_reference, backward.only_in_target);
            prop_assert_eq!(forward.only_in_target, backward.only_in_reference);
        }

        /// Property: a tree has no structural differences with itself
        #[test]
        fn diff_with_self_has_no_gaps(t in tree()) {
            let report = diff(&t, &t);
            prop_assert!(report.only_in_reference.is_empty());
            prop_assert!(report.only_in_target.is_empty());
        }

        /// Property: merging the diff output makes every reported path exist
        #[test]
        fn merge_completes_diff(reference in tree(), target in tree()) {
            let report = diff(&reference, &target);
            let outcome = merge_missing(&target, &report.only_in_reference, &TitleCase);
            for path in &report.only_in_reference {
                prop_assert!(outcome.tree.lookup(path).is_some(), "missing {}", path);
            }
        }

        /// Property: merge keeps every existing leaf not reported as a collision
        #[test]
        fn merge_preserves_existing_leaves(reference in tree(), target in tree()) {
            let report = diff(&reference, &target);
            let outcome = merge_missing(&target, &report.only_in_reference, &Fixed("X".to_string()));
            for (path, value) in target.leaves() {
                let collided = outcome.collisions.iter().any(|c| path.starts_with(&c.path));
                if !collided {
                    prop_assert_eq!(outcome.tree.leaf(&path), Some(value));
                }
            }
        }

        /// Property: merge is a no-op once the target is complete
        #[test]
        fn merge_is_idempotent(reference in tree(), target in tree()) {
            let first = merge_missing(&target, &diff(&reference, &target).only_in_reference, &TitleCase);
            let again = merge_missing(&first.tree, &diff(&reference, &first.tree).only_in_reference, &TitleCase);
            prop_assert_eq!(again.tree, first.tree);
        }

        /// Property: an aligned tree has exactly the reference's leaf paths
        #[test]
        fn align_matches_reference_shape(reference in tree(), target in tree()) {
            let generator = Fixed("TODO".to_string());
            let outcome = align(&reference, &target, &AlignOptions { relocate: true, generator: &generator });
            prop_assert_eq!(outcome.tree.leaf_paths(), reference.leaf_paths());
        }
    }
}
