use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

/// List the regular files directly inside `dir`, sorted by file name.
///
/// Subdirectories are skipped, not descended into. Symlinks count if they
/// point to a regular file.
pub fn discover_inputs(dir: impl AsRef<Path>) -> anyhow::Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut ret = Vec::new();
    for e in fs::read_dir(dir).with_context(|| {
        format!("failed to read input directory {}", dir.display())
    })? {
        let path = e?.path();
        // Follows symlinks, unlike DirEntry::file_type.
        if path.is_file() {
            ret.push(path);
        }
    }

    // Filesystem order varies between platforms, sort so the header comes
    // out the same everywhere.
    ret.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(ret)
}
