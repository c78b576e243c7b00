//! Rebuilding a target catalog in the reference catalog's shape
//!
//! [`align`] is the heavy-handed counterpart of `merge`: instead of adding
//! what is missing, it produces a fresh tree with exactly the reference's
//! keys, nesting and key order, pulling each value out of the target. Keys
//! the target has but the reference does not are dropped (and reported).
//!
//! Catalogs that drifted tend to have whole groups filed one level too high
//! (`myEvents.title` instead of `events.myEvents.title`). With relocation
//! enabled, a value missing at its reference path is looked up again without
//! the first segment before falling back to the generator.

use std::collections::HashSet;

use serde::Serialize;

use crate::generate::LeafGenerator;
use crate::path::KeyPath;
use crate::tree::{KeyTree, Node};

/// Options for [`align`].
pub struct AlignOptions<'a> {
    /// Look for values one level shallower when the exact path is missing.
    pub relocate: bool,
    /// Produces values for reference keys the target cannot supply.
    pub generator: &'a dyn LeafGenerator,
}

/// A value taken from a different path in the target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Relocation {
    pub from: KeyPath,
    pub to: KeyPath,
}

/// The result of [`align`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AlignOutcome {
    #[serde(skip)]
    pub tree: KeyTree,
    /// Values moved to their reference path.
    pub relocated: Vec<Relocation>,
    /// Reference paths filled by the generator.
    pub generated: Vec<KeyPath>,
    /// Target leaves that ended up unused.
    pub dropped: Vec<KeyPath>,
}

/// Rebuild `target` with the exact structure of `reference`.
pub fn align(reference: &KeyTree, target: &KeyTree, options: &AlignOptions<'_>) -> AlignOutcome {
    let mut outcome = AlignOutcome::default();
    let mut used: HashSet<KeyPath> = HashSet::new();

    outcome.tree = rebuild(reference, target, &KeyPath::root(), options, &mut used, &mut outcome);
    outcome.dropped = target
        .leaf_paths()
        .into_iter()
        .filter(|path| !used.contains(path))
        .collect();
    outcome
}

fn rebuild(
    reference: &KeyTree,
    target: &KeyTree,
    prefix: &KeyPath,
    options: &AlignOptions<'_>,
    used: &mut HashSet<KeyPath>,
    outcome: &mut AlignOutcome,
) -> KeyTree {
    let mut tree = KeyTree::new();
    for (key, node) in reference.iter() {
        let path = prefix.child(key);
        let rebuilt = match node {
            Node::Branch(child) => Node::Branch(rebuild(child, target, &path, options, used, outcome)),
            Node::Leaf(_) => Node::Leaf(resolve(target, &path, options, used, outcome)),
        };
        tree.insert(key.clone(), rebuilt);
    }
    tree
}

fn resolve(
    target: &KeyTree,
    path: &KeyPath,
    options: &AlignOptions<'_>,
    used: &mut HashSet<KeyPath>,
    outcome: &mut AlignOutcome,
) -> String {
    if let Some(value) = target.leaf(path) {
        used.insert(path.clone());
        return value.to_string();
    }

    if options.relocate {
        if let Some(shallower) = path.without_first() {
            if let Some(value) = target.leaf(&shallower) {
                used.insert(shallower.clone());
                outcome.relocated.push(Relocation {
                    from: shallower,
                    to: path.clone(),
                });
                return value.to_string();
            }
        }
    }

    outcome.generated.push(path.clone());
    options.generator.generate(path)
}
