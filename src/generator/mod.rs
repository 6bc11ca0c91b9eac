//! Output generators.
//!
//! `front_matter` and `output_path` produce the per-page Hugo header and
//! destination; the remaining generators write the auxiliary site files
//! (language switcher data, `hugo.yaml`, theme colours) from configuration.

pub mod base;
pub mod front_matter;
pub mod hugo_config;
pub mod languages_data;
pub mod output_path;
pub mod theme_colors;

pub use front_matter::FrontMatter;
pub use output_path::{page_language, resolve_output_path};

use crate::config::{EngineConfig, SiteConfig};
use base::Generator;

/// The site file generators for one export, in the order they run.
pub fn site_generators(
    engine: &EngineConfig,
    site: &SiteConfig,
    site_loaded: bool,
) -> Vec<Box<dyn Generator>> {
    vec![
        Box::new(hugo_config::HugoConfigGenerator::new(
            site.hugo.clone(),
            site.hosting.site_url.clone(),
            site_loaded,
        )),
        Box::new(theme_colors::ThemeColorsGenerator::new(
            engine.colors.clone(),
            engine.color_vars.clone(),
        )),
        Box::new(languages_data::LanguagesDataGenerator::new(
            site.languages.clone(),
            site_loaded,
        )),
    ]
}
