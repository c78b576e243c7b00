//! # Keys Command Implementation
//!
//! This module implements the `keys` subcommand, which lists the leaf keys of
//! a catalog as dotted paths, or draws the catalog's key hierarchy with
//! `--tree`. Both forms honour the `--only` filter.
//!
//! This command is a safe, read-only operation that does not modify any files.

use std::borrow::Cow;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use glob::Pattern;
use ptree::{print_tree, TreeItem};

use catalog_sync::path::KeyPath;
use catalog_sync::tree::{KeyTree, Node};

use super::{key_filter, load_catalog};

/// List the keys of a catalog
#[derive(Args, Debug)]
pub struct KeysArgs {
    /// The catalog to list.
    pub file: PathBuf,

    /// Only list key paths matching this glob (e.g. 'nav.*').
    #[arg(long, value_name = "GLOB")]
    pub only: Option<String>,

    /// Draw the key hierarchy instead of listing paths.
    #[arg(long)]
    pub tree: bool,
}

/// Execute the `keys` command.
pub fn execute(args: KeysArgs) -> Result<ExitCode> {
    let filter = key_filter(args.only.as_deref())?;
    let catalog = load_catalog(&args.file)?;

    if args.tree {
        let label = args.file.display().to_string();
        let root = build_tree_node(label, &catalog.tree, &KeyPath::root(), filter.as_ref());
        print_tree(&root).map_err(|e| anyhow::anyhow!("Failed to display tree: {}", e))?;
    } else {
        let mut stdout = io::stdout().lock();
        for path in catalog.tree.leaf_paths() {
            if filter.as_ref().map_or(true, |pattern| path.matches(pattern)) {
                writeln!(stdout, "{}", path)?;
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Build the display tree for `tree`, keeping only branches that lead to a
/// leaf matching `filter`.
fn build_tree_node(
    label: String,
    tree: &KeyTree,
    prefix: &KeyPath,
    filter: Option<&Pattern>,
) -> TreeNode {
    let mut children = Vec::new();
    for (key, node) in tree.iter() {
        let path = prefix.child(key);
        match node {
            Node::Branch(child) => {
                let built = build_tree_node(key.clone(), child, &path, filter);
                if filter.is_none() || !built.children.is_empty() {
                    children.push(built);
                }
            }
            Node::Leaf(value) => {
                if filter.map_or(true, |pattern| path.matches(pattern)) {
                    children.push(TreeNode {
                        label: format!("{}: {:?}", key, value),
                        children: vec![],
                    });
                }
            }
        }
    }
    TreeNode { label, children }
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: io::Write>(&self, f: &mut W, _style: &ptree::Style) -> io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> Cow<'_, [Self::Child]> {
        Cow::Borrowed(&self.children)
    }
}
