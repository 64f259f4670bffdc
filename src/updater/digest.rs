//! Content addressing for downloaded database trees.
//!
//! The digest is what makes promotion idempotent: equal trees produce equal
//! `target_` names, so a re-download of unchanged data is detected by a
//! single directory existence check.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

const PATH_SIGN: [u8; 1] = [0];
const CONTENTS_SIGN: [u8; 1] = [1];

/// Computes the hex SHA-256 digest of a directory tree.
///
/// Regular files contribute a separator byte, their path relative to
/// `root`, another separator, and their full contents, visited in sorted
/// order so the digest is independent of readdir order. Directories and
/// symlinks contribute nothing.
pub fn tree_digest(root: &Path) -> Result<String> {
    let mut hasher = Sha256::new();
    hash_dir(&mut hasher, root, root)?;
    Ok(hex::encode(hasher.finalize()))
}

fn hash_dir(hasher: &mut Sha256, root: &Path, dir: &Path) -> Result<()> {
    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("cannot read directory {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("cannot list directory {}", dir.display()))?;

    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .with_context(|| format!("cannot stat {}", path.display()))?;

        if file_type.is_dir() {
            hash_dir(hasher, root, &path)?;
        } else if file_type.is_file() {
            let relative = path
                .strip_prefix(root)
                .expect("walked path is always under the root");

            hasher.update(PATH_SIGN);
            hasher.update(relative.as_os_str().as_encoded_bytes());
            hasher.update(CONTENTS_SIGN);

            let mut file = File::open(&path)
                .with_context(|| format!("cannot open a file {}", path.display()))?;
            std::io::copy(&mut file, hasher)
                .with_context(|| format!("cannot hash a file {}", path.display()))?;
        }
        // Symlinks and special files are invisible to the digest.
    }

    Ok(())
}
