use crate::generator::base::Generator;
use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

const HEADER: &str = "# Auto-generated by logseq-hugo-conv, edit the hugo: block of site.yaml instead\n";

/// Writes the Hugo site configuration `hugo.yaml` from the site config's `hugo:` block.
///
/// `baseURL` is derived from `hosting.site_url` and always ends with a single `/`.
pub struct HugoConfigGenerator {
    hugo: Mapping,
    site_url: String,
    site_loaded: bool,
}

impl HugoConfigGenerator {
    pub fn new(hugo: Mapping, site_url: String, site_loaded: bool) -> Self {
        HugoConfigGenerator {
            hugo,
            site_url,
            site_loaded,
        }
    }

    fn config_with_base_url(&self) -> Mapping {
        let mut config = self.hugo.clone();
        if !self.site_url.is_empty() {
            let base_url = format!("{}/", self.site_url.trim_end_matches('/'));
            config.insert(Value::from("baseURL"), Value::from(base_url));
        }
        config
    }
}

impl Generator for HugoConfigGenerator {
    fn name(&self) -> &'static str {
        "hugo config"
    }

    fn output_to_site(&self, site_dir: &Path) -> Result<()> {
        let out_path = site_dir.join("hugo.yaml");

        if !self.site_loaded {
            if out_path.exists() {
                info!("no site config given, keeping existing hugo.yaml");
            } else {
                warn!("no site config given and no hugo.yaml found, the Hugo build will fail");
            }
            return Ok(());
        }

        if self.hugo.is_empty() {
            info!("no hugo: block in site config, skipping hugo.yaml");
            return Ok(());
        }

        let config = self.config_with_base_url();
        let yaml = serde_yaml::to_string(&config)?;
        fs::create_dir_all(site_dir)
            .with_context(|| format!("Failed to create directory: {:?}", site_dir))?;
        fs::write(&out_path, format!("{}{}", HEADER, yaml))
            .with_context(|| format!("Failed to write {:?}", out_path))?;

        let title = config.get("title").and_then(Value::as_str).unwrap_or("(untitled)");
        let theme = config.get("theme").and_then(Value::as_str).unwrap_or("(none)");
        info!(title, theme, "generated hugo.yaml");
        Ok(())
    }
}
