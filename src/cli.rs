use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::assets::copy_assets;
use crate::config::{EngineConfig, SiteConfig};
use crate::generator::site_generators;
use crate::pipeline::{export_pages, today, ExportReport};

/// Options of one export run, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Logseq graph root (contains `pages/` and `assets/`).
    pub graph: PathBuf,
    /// Hugo `content/` folder. Its parent is the Hugo site directory.
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub site: Option<PathBuf>,
    /// Remove the output folder before exporting.
    pub clean: bool,
    /// Overrides the engine config's default language.
    pub default_lang: Option<String>,
}

fn site_dir_of(output: &Path) -> &Path {
    output.parent().unwrap_or_else(|| Path::new(""))
}

/// Runs a full export: configuration, assets, site files, then pages.
pub fn run_export(options: &ExportOptions) -> Result<ExportReport> {
    if !options.graph.exists() {
        bail!("Graph folder not found: {}", options.graph.display());
    }

    let engine = EngineConfig::load_or_default(options.config.as_deref());
    let site = SiteConfig::load_or_default(options.site.as_deref());
    let site_loaded = options.site.is_some();

    let mut export_config = engine.export_config();
    if let Some(lang) = &options.default_lang {
        export_config.default_language = lang.clone();
    }

    info!(sections = ?export_config.sections.keys().collect::<Vec<_>>(), "sections");
    info!(internal_keys = ?export_config.internal_keys, "ignored internal keys");
    info!(theme_params = ?export_config.theme_params, "theme params");

    if options.clean && options.output.exists() {
        fs::remove_dir_all(&options.output)
            .with_context(|| format!("Failed to clean output folder: {:?}", options.output))?;
        info!(output = %options.output.display(), "cleaned output folder");
    }

    let pages_dir = options.graph.join("pages");
    if !pages_dir.exists() {
        bail!("No 'pages' folder found in {}", options.graph.display());
    }

    let site_dir = site_dir_of(&options.output);
    let static_assets = site_dir.join("static").join("assets");
    match copy_assets(&options.graph, &static_assets)? {
        Some(count) => info!(count, dest = %static_assets.display(), "copied assets"),
        None => info!(graph = %options.graph.display(), "no assets folder found"),
    }

    for generator in site_generators(&engine, &site, site_loaded) {
        generator
            .output_to_site(site_dir)
            .with_context(|| format!("Failed to generate {}", generator.name()))?;
    }

    let report = export_pages(&pages_dir, &options.output, &export_config, &today())?;

    info!(
        exported = report.exported.len(),
        skipped = report.skipped.len(),
        "export done"
    );
    if !report.skipped.is_empty() {
        info!(pages = %report.skipped.join(", "), "skipped pages without public:: true");
    }
    Ok(report)
}
