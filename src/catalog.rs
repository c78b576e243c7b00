//! Loading catalogs from disk and writing them back
//!
//! The engine modules work on in-memory trees; this is where files come in.
//! [`load`] keeps the raw text alongside the parsed tree so the lint passes
//! can run on exactly what was read, and [`write`] only touches a file when
//! its normalized content actually changes.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::codec::{self, Format};
use crate::error::{Error, Result};
use crate::tree::KeyTree;

/// A catalog file, parsed.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub path: PathBuf,
    /// The text as read from disk.
    pub text: String,
    pub tree: KeyTree,
}

/// Read a file as text.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::Filesystem {
        message: format!("Failed to read '{}': {}", path.display(), e),
    })
}

/// Read and parse a catalog.
///
/// A malformed catalog is reported as [`Error::Parse`] carrying the file
/// name and the offset of the defect.
pub fn load(path: &Path) -> Result<Catalog> {
    let text = read_text(path)?;
    let tree = codec::parse(&text).map_err(|source| Error::Parse {
        file: path.display().to_string(),
        source,
    })?;
    debug!("Loaded {} ({} leaves)", path.display(), tree.leaf_count());
    Ok(Catalog {
        path: path.to_path_buf(),
        text,
        tree,
    })
}

/// Write `tree` to `path` in normalized form.
///
/// Returns `false` without touching the file when it already holds exactly
/// that content. Parent directories are created as needed.
pub fn write(path: &Path, tree: &KeyTree, format: &Format) -> Result<bool> {
    let content = codec::normalize_with(tree, format);
    if fs::read_to_string(path).is_ok_and(|existing| existing == content) {
        debug!("{} is up to date", path.display());
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::Filesystem {
            message: format!("Failed to create directory '{}': {}", parent.display(), e),
        })?;
    }
    fs::write(path, content).map_err(|e| Error::Filesystem {
        message: format!("Failed to write file '{}': {}", path.display(), e),
    })?;
    Ok(true)
}
