//! Structural comparison of a reference catalog and a target catalog
//!
//! [`diff`] walks both trees key by key and sorts every difference into one
//! of three disjoint buckets of a [`ReconciliationReport`]:
//!
//! - `only_in_reference`: keys the target still lacks,
//! - `only_in_target`: orphaned keys the reference no longer has,
//! - `placeholders_in_target`: keys present in both whose target value is a
//!   placeholder marker such as `TODO`.
//!
//! Paths are reported at leaf granularity. A sub-tree missing from the target
//! contributes one path per leaf it contains, so feeding `only_in_reference`
//! back into [`crate::merge::merge_missing`] recreates it. A key that is a
//! sub-tree on one side and a string on the other is missing on both sides:
//! the sub-tree's leaves on one, the string's own path on the other.
//!
//! Lists are in traversal order, which follows the documents' key order. Sort
//! them with [`ReconciliationReport::sorted`] when comparing reports.

use glob::Pattern;
use log::debug;
use serde::Serialize;

use crate::path::KeyPath;
use crate::placeholder::PlaceholderPolicy;
use crate::tree::{KeyTree, Node};

/// The result of comparing a target catalog against a reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationReport {
    pub only_in_reference: Vec<KeyPath>,
    pub only_in_target: Vec<KeyPath>,
    pub placeholders_in_target: Vec<KeyPath>,
}

impl ReconciliationReport {
    /// Returns `true` if the target has no gaps, orphans or placeholders.
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    /// Total number of reported paths.
    pub fn total(&self) -> usize {
        self.only_in_reference.len() + self.only_in_target.len() + self.placeholders_in_target.len()
    }

    /// A copy with every list sorted, for order-insensitive comparison.
    pub fn sorted(&self) -> Self {
        let mut sorted = self.clone();
        sorted.only_in_reference.sort();
        sorted.only_in_target.sort();
        sorted.placeholders_in_target.sort();
        sorted
    }

    /// A copy keeping only paths whose dotted form matches `pattern`.
    pub fn filtered(&self, pattern: &Pattern) -> Self {
        let keep = |paths: &[KeyPath]| -> Vec<KeyPath> {
            paths.iter().filter(|p| p.matches(pattern)).cloned().collect()
        };
        Self {
            only_in_reference: keep(&self.only_in_reference),
            only_in_target: keep(&self.only_in_target),
            placeholders_in_target: keep(&self.placeholders_in_target),
        }
    }
}

/// Compare `target` against `reference` using the default placeholder policy.
///
/// # Examples
///
/// ```
/// use catalog_sync::{diff, keytree};
///
/// let reference = keytree! { "a" => { "b" => "Hello" } };
/// let target = keytree! { "a" => {} };
/// let report = diff::diff(&reference, &target);
/// assert_eq!(report.only_in_reference[0].to_string(), "a.b");
/// ```
pub fn diff(reference: &KeyTree, target: &KeyTree) -> ReconciliationReport {
    diff_with(reference, target, &PlaceholderPolicy::default())
}

/// Compare `target` against `reference` with an explicit placeholder policy.
pub fn diff_with(
    reference: &KeyTree,
    target: &KeyTree,
    policy: &PlaceholderPolicy,
) -> ReconciliationReport {
    let root = KeyPath::root();
    let mut report = ReconciliationReport::default();

    missing_leaves(reference, target, &root, &mut report.only_in_reference);
    placeholder_leaves(reference, target, policy, &root, &mut report.placeholders_in_target);
    missing_leaves(target, reference, &root, &mut report.only_in_target);

    debug!(
        "diff: {} only in reference, {} only in target, {} placeholders",
        report.only_in_reference.len(),
        report.only_in_target.len(),
        report.placeholders_in_target.len()
    );
    report
}

/// Record every leaf of `from` that has no leaf counterpart in `other`.
fn missing_leaves(from: &KeyTree, other: &KeyTree, prefix: &KeyPath, out: &mut Vec<KeyPath>) {
    for (key, node) in from.iter() {
        let path = prefix.child(key);
        match (node, other.get(key)) {
            (Node::Branch(a), Some(Node::Branch(b))) => missing_leaves(a, b, &path, out),
            (Node::Leaf(_), Some(Node::Leaf(_))) => {}
            (Node::Leaf(_), _) => out.push(path),
            (Node::Branch(a), _) => all_leaves(a, &path, out),
        }
    }
}

fn all_leaves(tree: &KeyTree, prefix: &KeyPath, out: &mut Vec<KeyPath>) {
    for (key, node) in tree.iter() {
        let path = prefix.child(key);
        match node {
            Node::Leaf(_) => out.push(path),
            Node::Branch(child) => all_leaves(child, &path, out),
        }
    }
}

fn placeholder_leaves(
    reference: &KeyTree,
    target: &KeyTree,
    policy: &PlaceholderPolicy,
    prefix: &KeyPath,
    out: &mut Vec<KeyPath>,
) {
    for (key, node) in reference.iter() {
        match (node, target.get(key)) {
            (Node::Branch(a), Some(Node::Branch(b))) => {
                placeholder_leaves(a, b, policy, &prefix.child(key), out)
            }
            (Node::Leaf(_), Some(Node::Leaf(value))) if policy.is_placeholder(value) => {
                out.push(prefix.child(key))
            }
            _ => {}
        }
    }
}
