use crate::generator::base::Generator;
use anyhow::{Context, Result};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

const HEADER: &str = "# Auto-generated by logseq-hugo-conv, edit the languages: block of site.yaml instead\n";
const EMPTY_PLACEHOLDER: &str = "# No languages: block defined in site.yaml\n";
const DEFAULT_DISPLAY: &str = "flag_name";

/// Writes `data/languages.yaml`, read by the header partial to render the language switcher.
///
/// Keys are Hugo language codes (`fr`, `en`, `zh-tw`); the special `display` key
/// (`abbr`, `name`, `flag` or `flag_name`) selects the switcher format.
pub struct LanguagesDataGenerator {
    languages: Mapping,
    site_loaded: bool,
}

impl LanguagesDataGenerator {
    /// # Arguments
    ///
    /// * `languages` - the `languages:` block of the site config.
    /// * `site_loaded` - whether a site config was given. When it was not, an
    ///   existing file is left untouched so the switcher settings survive.
    pub fn new(languages: Mapping, site_loaded: bool) -> Self {
        LanguagesDataGenerator {
            languages,
            site_loaded,
        }
    }

    fn render(&self) -> Result<String> {
        let display = self
            .languages
            .get("display")
            .cloned()
            .unwrap_or_else(|| Value::from(DEFAULT_DISPLAY));

        let mut output = Mapping::new();
        output.insert(Value::from("display"), display);
        for (code, entry) in &self.languages {
            if code.as_str() != Some("display") {
                output.insert(code.clone(), entry.clone());
            }
        }
        Ok(format!("{}{}", HEADER, serde_yaml::to_string(&output)?))
    }
}

impl Generator for LanguagesDataGenerator {
    fn name(&self) -> &'static str {
        "languages data"
    }

    fn output_to_site(&self, site_dir: &Path) -> Result<()> {
        let data_dir = site_dir.join("data");
        let out_path = data_dir.join("languages.yaml");

        if !self.site_loaded {
            if out_path.exists() {
                info!("no site config given, keeping existing data/languages.yaml");
            } else {
                warn!("no site config given and no data/languages.yaml found, the language switcher will use its fallback");
            }
            return Ok(());
        }

        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create directory: {:?}", data_dir))?;

        if self.languages.is_empty() {
            fs::write(&out_path, EMPTY_PLACEHOLDER)
                .with_context(|| format!("Failed to write {:?}", out_path))?;
            info!("no languages defined, data/languages.yaml left empty");
            return Ok(());
        }

        fs::write(&out_path, self.render()?)
            .with_context(|| format!("Failed to write {:?}", out_path))?;
        let count = self
            .languages
            .keys()
            .filter(|k| k.as_str() != Some("display"))
            .count();
        info!(languages = count, "generated data/languages.yaml");
        Ok(())
    }
}
