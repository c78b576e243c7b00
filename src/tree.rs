//! The catalog tree model
//!
//! A translation catalog is a recursively nested, ordered mapping from string
//! keys to either a string leaf or another mapping. [`KeyTree`] keeps keys in
//! first-seen order so that a parse/normalize cycle never reorders a file.
//!
//! Re-inserting a key that already exists replaces the value in place: the key
//! keeps its original position. That gives parsing a well-defined
//! last-write-wins resolution for duplicate siblings, which the lint pass in
//! [`crate::lint`] reports separately.

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::path::KeyPath;

/// A single node of a catalog tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// A translated string (or a placeholder standing in for one).
    Leaf(String),
    /// A nested group of keys.
    Branch(KeyTree),
}

impl Node {
    pub fn leaf(value: impl Into<String>) -> Self {
        Node::Leaf(value.into())
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Node::Leaf(value) => Some(value),
            Node::Branch(_) => None,
        }
    }

    pub fn as_branch(&self) -> Option<&KeyTree> {
        match self {
            Node::Leaf(_) => None,
            Node::Branch(tree) => Some(tree),
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self, Node::Branch(_))
    }
}

/// An ordered mapping from key to [`Node`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyTree {
    entries: IndexMap<String, Node>,
}

impl KeyTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries.get_mut(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Insert a node, returning the previous one if the key existed.
    ///
    /// An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, node: Node) -> Option<Node> {
        self.entries.insert(key.into(), node)
    }

    /// Remove a key, preserving the order of the remaining siblings.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.entries.shift_remove(key)
    }

    pub fn entry(&mut self, key: String) -> Entry<'_, String, Node> {
        self.entries.entry(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Node)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Look up the node at `path`. The root path yields `None`.
    pub fn lookup(&self, path: &KeyPath) -> Option<&Node> {
        let (last, parents) = path.segments().split_last()?;
        let mut current = self;
        for segment in parents {
            current = current.get(segment)?.as_branch()?;
        }
        current.get(last)
    }

    /// The leaf value at `path`, if the path ends in a leaf.
    pub fn leaf(&self, path: &KeyPath) -> Option<&str> {
        self.lookup(path).and_then(Node::as_leaf)
    }

    /// Every leaf path in depth-first, first-seen order.
    pub fn leaf_paths(&self) -> Vec<KeyPath> {
        self.leaves().into_iter().map(|(path, _)| path).collect()
    }

    /// Every leaf with its path, in depth-first, first-seen order.
    pub fn leaves(&self) -> Vec<(KeyPath, &str)> {
        let mut out = Vec::new();
        collect_leaves(self, &KeyPath::root(), &mut out);
        out
    }

    /// Number of leaves in the whole tree.
    pub fn leaf_count(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                Node::Leaf(_) => 1,
                Node::Branch(tree) => tree.leaf_count(),
            })
            .sum()
    }
}

fn collect_leaves<'a>(tree: &'a KeyTree, prefix: &KeyPath, out: &mut Vec<(KeyPath, &'a str)>) {
    for (key, node) in tree.iter() {
        let path = prefix.child(key);
        match node {
            Node::Leaf(value) => out.push((path, value)),
            Node::Branch(child) => collect_leaves(child, &path, out),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for KeyTree {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        let mut tree = KeyTree::new();
        for (key, node) in iter {
            tree.insert(key, node);
        }
        tree
    }
}

impl Serialize for KeyTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, node) in &self.entries {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Leaf(value) => serializer.serialize_str(value),
            Node::Branch(tree) => tree.serialize(serializer),
        }
    }
}

struct KeyTreeVisitor;

impl<'de> Visitor<'de> for KeyTreeVisitor {
    type Value = KeyTree;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object of translation keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<KeyTree, A::Error> {
        let mut tree = KeyTree::new();
        while let Some(key) = map.next_key::<String>()? {
            let node = map.next_value::<Node>()?;
            tree.insert(key, node);
        }
        Ok(tree)
    }
}

impl<'de> Deserialize<'de> for KeyTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(KeyTreeVisitor)
    }
}

struct NodeVisitor;

impl<'de> Visitor<'de> for NodeVisitor {
    type Value = Node;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string or an object")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Node, E> {
        Ok(Node::Leaf(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Node, E> {
        Ok(Node::Leaf(value))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Node, A::Error> {
        KeyTreeVisitor.visit_map(map).map(Node::Branch)
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NodeVisitor)
    }
}

/// Build a [`KeyTree`] inline, mostly for tests and examples.
///
/// ```
/// use catalog_sync::keytree;
///
/// let tree = keytree! { "a" => { "b" => "Hello" }, "c" => "World" };
/// assert_eq!(tree.leaf_count(), 2);
/// ```
#[macro_export]
macro_rules! keytree {
    (@node { $($inner:tt)* }) => {
        $crate::tree::Node::Branch($crate::keytree! { $($inner)* })
    };
    (@node $value:literal) => {
        $crate::tree::Node::Leaf(($value).to_string())
    };
    () => { $crate::tree::KeyTree::new() };
    ($($key:literal => $value:tt),+ $(,)?) => {{
        let mut tree = $crate::tree::KeyTree::new();
        $( tree.insert($key, $crate::keytree!(@node $value)); )+
        tree
    }};
}
