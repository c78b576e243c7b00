//! Backfilling missing keys into a target catalog
//!
//! [`merge`] takes a target tree and a set of paths that must exist, and
//! returns a new tree in which they do. Missing leaves get a value from a
//! [`LeafGenerator`]; leaves that already exist are never overwritten, so a
//! merge can not clobber a real translation.
//!
//! ## Collision policy
//!
//! When an intermediate segment of a path holds a string where a sub-tree is
//! needed, the string is replaced by an empty sub-tree. Structural consistency
//! wins over preserving the stray scalar, but the replacement is never silent:
//! every one is returned as a [`StructuralCollision`] and logged as a warning.

use indexmap::map::Entry;
use log::{debug, warn};
use serde::Serialize;

use crate::generate::LeafGenerator;
use crate::path::KeyPath;
use crate::tree::{KeyTree, Node};

/// A string found where a sub-tree was required, and overwritten.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StructuralCollision {
    /// Path of the node that was a string.
    pub path: KeyPath,
    /// The string value that was discarded.
    pub replaced: String,
}

/// The result of a merge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// The merged tree.
    pub tree: KeyTree,
    /// Paths whose leaves were created, in the order they were added.
    pub added: Vec<KeyPath>,
    /// Strings that were replaced by sub-trees.
    pub collisions: Vec<StructuralCollision>,
}

impl MergeOutcome {
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.collisions.is_empty()
    }
}

/// Ensure every `(path, generator)` pair exists in a copy of `target`.
///
/// Root paths are ignored. A path whose final segment already exists (as a
/// leaf or a sub-tree) is left untouched.
pub fn merge<'a, I>(target: &KeyTree, missing: I) -> MergeOutcome
where
    I: IntoIterator<Item = (&'a KeyPath, &'a dyn LeafGenerator)>,
{
    let mut outcome = MergeOutcome {
        tree: target.clone(),
        ..Default::default()
    };

    for (path, generator) in missing {
        if path.segments().is_empty() {
            debug!("merge: ignoring root path");
            continue;
        }
        if insert_missing(
            &mut outcome.tree,
            path.segments(),
            &KeyPath::root(),
            generator,
            &mut outcome.collisions,
        ) {
            outcome.added.push(path.clone());
        }
    }

    outcome
}

/// Merge `paths` into `target`, generating every missing leaf with `generator`.
///
/// # Examples
///
/// ```
/// use catalog_sync::generate::TitleCase;
/// use catalog_sync::{diff, keytree, merge};
///
/// let reference = keytree! { "a" => { "b" => "Hello" } };
/// let target = keytree! { "a" => {} };
/// let report = diff::diff(&reference, &target);
/// let merged = merge::merge_missing(&target, &report.only_in_reference, &TitleCase);
/// assert_eq!(merged.tree, keytree! { "a" => { "b" => "B" } });
/// ```
pub fn merge_missing(
    target: &KeyTree,
    paths: &[KeyPath],
    generator: &dyn LeafGenerator,
) -> MergeOutcome {
    merge(target, paths.iter().map(|path| (path, generator)))
}

/// Create the leaf at `segments` below `tree` unless something is already
/// there, replacing strings that stand where a sub-tree is needed. Returns
/// whether a leaf was added.
fn insert_missing(
    tree: &mut KeyTree,
    segments: &[String],
    walked: &KeyPath,
    generator: &dyn LeafGenerator,
    collisions: &mut Vec<StructuralCollision>,
) -> bool {
    let Some((segment, rest)) = segments.split_first() else {
        return false;
    };
    let walked = walked.child(segment);

    if rest.is_empty() {
        return match tree.entry(segment.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(Node::Leaf(generator.generate(&walked)));
                true
            }
            Entry::Occupied(_) => false,
        };
    }

    let node = tree
        .entry(segment.clone())
        .or_insert_with(|| Node::Branch(KeyTree::new()));
    match node {
        Node::Branch(child) => insert_missing(child, rest, &walked, generator, collisions),
        Node::Leaf(value) => {
            let replaced = std::mem::take(value);
            warn!(
                "Replacing string at '{}' with a sub-tree (discarded value: {:?})",
                walked, replaced
            );
            collisions.push(StructuralCollision {
                path: walked.clone(),
                replaced,
            });
            let mut child = KeyTree::new();
            let added = insert_missing(&mut child, rest, &walked, generator, collisions);
            *node = Node::Branch(child);
            added
        }
    }
}
