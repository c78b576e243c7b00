//! Replacing placeholder leaves with reference values
//!
//! Where a target catalog says `TODO` (or any other placeholder the policy
//! recognizes) and the reference catalog has a real string at the same path,
//! [`fill_placeholders`] copies the reference string over. It is the cheapest
//! way to turn "untranslated" into "shown in the reference language" before a
//! translator gets to it.

use serde::Serialize;

use crate::generate::LeafGenerator;
use crate::path::KeyPath;
use crate::placeholder::PlaceholderPolicy;
use crate::tree::{KeyTree, Node};

/// The result of [`fill_placeholders`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FillOutcome {
    #[serde(skip)]
    pub tree: KeyTree,
    /// Placeholders replaced by the reference value.
    pub filled: Vec<KeyPath>,
    /// Placeholders with no usable reference value.
    pub unresolved: Vec<KeyPath>,
}

/// Replace every placeholder leaf of `target` whose reference counterpart is a
/// real string.
///
/// Placeholders the reference cannot fill are listed in `unresolved`. When
/// `mark_unresolved` is given they are also rewritten to its output, e.g.
/// `[MISSING_EN] title`, so the gap stays visible in the file.
pub fn fill_placeholders(
    reference: &KeyTree,
    target: &KeyTree,
    policy: &PlaceholderPolicy,
    mark_unresolved: Option<&dyn LeafGenerator>,
) -> FillOutcome {
    let mut outcome = FillOutcome {
        tree: target.clone(),
        ..Default::default()
    };
    let mut filled = Vec::new();
    let mut unresolved = Vec::new();
    walk(
        &mut outcome.tree,
        Some(reference),
        &KeyPath::root(),
        policy,
        mark_unresolved,
        &mut filled,
        &mut unresolved,
    );
    outcome.filled = filled;
    outcome.unresolved = unresolved;
    outcome
}

fn walk(
    target: &mut KeyTree,
    reference: Option<&KeyTree>,
    prefix: &KeyPath,
    policy: &PlaceholderPolicy,
    mark_unresolved: Option<&dyn LeafGenerator>,
    filled: &mut Vec<KeyPath>,
    unresolved: &mut Vec<KeyPath>,
) {
    let keys: Vec<String> = target.keys().cloned().collect();
    for key in keys {
        let path = prefix.child(&key);
        let counterpart = reference.and_then(|r| r.get(&key));
        let Some(node) = target.get_mut(&key) else {
            continue;
        };

        match node {
            Node::Branch(child) => walk(
                child,
                counterpart.and_then(Node::as_branch),
                &path,
                policy,
                mark_unresolved,
                filled,
                unresolved,
            ),
            Node::Leaf(value) if policy.is_placeholder(value) => {
                match counterpart.and_then(Node::as_leaf) {
                    Some(real) if !policy.is_placeholder(real) => {
                        *value = real.to_string();
                        filled.push(path);
                    }
                    _ => {
                        if let Some(generator) = mark_unresolved {
                            *value = generator.generate(&path);
                        }
                        unresolved.push(path);
                    }
                }
            }
            Node::Leaf(_) => {}
        }
    }
}

/// The marker the unresolved placeholders get by default: `[MISSING_EN] <key>`.
pub fn unresolved_marker(path: &KeyPath) -> String {
    format!("[MISSING_EN] {}", path.last().unwrap_or_default())
}
