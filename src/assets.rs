use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Copies the files of `<graph_dir>/assets` into `dest_dir` (flat, no recursion).
///
/// Returns the number of files copied, or `None` when the graph has no assets folder.
pub fn copy_assets(graph_dir: &Path, dest_dir: &Path) -> Result<Option<usize>> {
    let assets_src = graph_dir.join("assets");
    if !assets_src.is_dir() {
        return Ok(None);
    }

    fs::create_dir_all(dest_dir)
        .with_context(|| format!("Failed to create directory: {:?}", dest_dir))?;

    let mut copied = 0;
    for entry in fs::read_dir(&assets_src)
        .with_context(|| format!("Failed to read directory: {:?}", assets_src))?
    {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let target = dest_dir.join(file_name);
        fs::copy(&path, &target)
            .with_context(|| format!("Failed to copy {:?} to {:?}", path, target))?;
        debug!(asset = ?file_name, "copied asset");
        copied += 1;
    }
    Ok(Some(copied))
}
