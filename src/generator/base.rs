use anyhow::Result;
use std::path::Path;

/// A generator of one auxiliary Hugo site file.
pub trait Generator {
    /// Short human-readable name used in logs.
    fn name(&self) -> &'static str;

    /// Writes the generated file below `site_dir` (the parent of Hugo's `content/`).
    fn output_to_site(&self, site_dir: &Path) -> Result<()>;
}
