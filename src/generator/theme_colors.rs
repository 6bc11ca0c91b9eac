use crate::config::ColorPalette;
use crate::generator::base::Generator;
use anyhow::{Context, Result};
use serde_yaml::Mapping;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

const HEADER: &str = "/* Auto-generated by logseq-hugo-conv, edit the colors: block of config.yaml instead */";
const PLACEHOLDER: &str = "/* theme-colors.css: no colors: block defined in config.yaml */\n";

/// Writes `static/css/theme-colors.css`.
///
/// `colors` holds theme-agnostic values per semantic name; `color_vars` maps each
/// semantic name to the active theme's CSS variable. Light values go under
/// `:root`, dark values under `.dark`. The file is always written (a placeholder
/// when nothing is configured) so the stylesheet link never 404s.
pub struct ThemeColorsGenerator {
    colors: ColorPalette,
    color_vars: Mapping,
}

impl ThemeColorsGenerator {
    pub fn new(colors: ColorPalette, color_vars: Mapping) -> Self {
        ThemeColorsGenerator { colors, color_vars }
    }

    fn render(&self) -> String {
        let mut lines = vec![HEADER.to_string(), String::new()];
        let modes: [(&BTreeMap<String, String>, &str); 2] =
            [(&self.colors.light, ":root"), (&self.colors.dark, ".dark")];

        for (mode_colors, selector) in modes {
            if mode_colors.is_empty() {
                continue;
            }
            lines.push(format!("{} {{", selector));
            for (semantic, css_var) in &self.color_vars {
                let (Some(semantic), Some(css_var)) = (semantic.as_str(), css_var.as_str()) else {
                    continue;
                };
                if let Some(value) = mode_colors.get(semantic).filter(|v| !v.is_empty()) {
                    lines.push(format!("    {}: {};", css_var, value));
                }
            }
            lines.push("}".to_string());
            lines.push(String::new());
        }
        lines.join("\n")
    }
}

impl Generator for ThemeColorsGenerator {
    fn name(&self) -> &'static str {
        "theme colors"
    }

    fn output_to_site(&self, site_dir: &Path) -> Result<()> {
        let css_dir = site_dir.join("static").join("css");
        fs::create_dir_all(&css_dir)
            .with_context(|| format!("Failed to create directory: {:?}", css_dir))?;
        let out_path = css_dir.join("theme-colors.css");

        if self.colors.is_empty() || self.color_vars.is_empty() {
            fs::write(&out_path, PLACEHOLDER)
                .with_context(|| format!("Failed to write {:?}", out_path))?;
            info!("no colors defined, theme-colors.css left empty");
            return Ok(());
        }

        fs::write(&out_path, self.render())
            .with_context(|| format!("Failed to write {:?}", out_path))?;
        info!(variables = self.color_vars.len(), "generated theme-colors.css");
        Ok(())
    }
}
