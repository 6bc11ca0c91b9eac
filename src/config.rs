//! Engine and site configuration.
//!
//! Two YAML documents drive an export:
//!
//! - the engine config (`--config`): sections, internal keys, theme parameter
//!   names and colours. Shared, no personal data.
//! - the site config (`--site`): languages, the Hugo site block and hosting.
//!   Personal, usually kept inside the Logseq graph.
//!
//! Neither document is required. A missing or broken file degrades to defaults
//! with a warning; it never aborts the export.

use serde::{Deserialize, Deserializer};
use serde_yaml::Mapping;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Logseq `type::` value to Hugo section. An empty section means the language root.
pub type SectionsMap = BTreeMap<String, String>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub fn default_sections() -> SectionsMap {
    [
        ("home", ""),
        ("cv", "cv"),
        ("post", "blog"),
        ("blog", "blog"),
        ("curious", "curious"),
        ("contact", "contact"),
        ("page", ""),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Logseq keys that are implementation details and never rendered.
pub fn default_internal_keys() -> BTreeSet<String> {
    [
        "collapsed",
        "id",
        "background-color",
        "heading",
        "card-last-reviewed",
        "card-next-schedule",
        "card-last-score",
        "card-ease-factor",
        "card-repeats",
        "card-last-interval",
        "logseq.order-list-type",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_language() -> String {
    String::from("fr")
}

fn default_toc_param() -> String {
    String::from("ShowToc")
}

fn default_toc_open_param() -> String {
    String::from("TocOpen")
}

fn default_show_tags_param() -> String {
    String::from("ShowTags")
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_sections<'de, D>(deserializer: D) -> Result<SectionsMap, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Option<String>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(k, v)| (k, v.unwrap_or_default()))
        .collect())
}

fn deserialize_internal_keys<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|k| k.to_lowercase()).collect())
}

/// Front matter field names expected by the active Hugo theme.
///
/// Defaults match PaperMod. A partial `theme_params:` block only overrides the
/// keys it names; an empty name disables that field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ThemeParamNames {
    #[serde(default = "default_toc_param", deserialize_with = "string_or_null")]
    pub toc: String,
    #[serde(default = "default_toc_open_param", deserialize_with = "string_or_null")]
    pub toc_open: String,
    #[serde(default = "default_show_tags_param", deserialize_with = "string_or_null")]
    pub show_tags: String,
}

impl Default for ThemeParamNames {
    fn default() -> Self {
        ThemeParamNames {
            toc: default_toc_param(),
            toc_open: default_toc_open_param(),
            show_tags: default_show_tags_param(),
        }
    }
}

/// Colour values per mode, keyed by semantic name (`background`, `text_primary`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ColorPalette {
    #[serde(default)]
    pub light: BTreeMap<String, String>,
    #[serde(default)]
    pub dark: BTreeMap<String, String>,
}

impl ColorPalette {
    pub fn is_empty(&self) -> bool {
        self.light.is_empty() && self.dark.is_empty()
    }
}

/// The engine configuration document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Replaces the default mapping wholesale when present.
    #[serde(default = "default_sections", deserialize_with = "deserialize_sections")]
    pub sections: SectionsMap,

    /// Replaces the default set wholesale when present. Keys are lowercased.
    #[serde(
        rename = "logseq_internal_keys",
        default = "default_internal_keys",
        deserialize_with = "deserialize_internal_keys"
    )]
    pub internal_keys: BTreeSet<String>,

    #[serde(default)]
    pub theme_params: ThemeParamNames,

    #[serde(default)]
    pub colors: ColorPalette,

    /// Semantic colour name to the theme's CSS variable, in declaration order.
    #[serde(default)]
    pub color_vars: Mapping,

    #[serde(default = "default_language")]
    pub default_language: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            sections: default_sections(),
            internal_keys: default_internal_keys(),
            theme_params: ThemeParamNames::default(),
            colors: ColorPalette::default(),
            color_vars: Mapping::new(),
            default_language: default_language(),
        }
    }
}

impl EngineConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the engine config, falling back to defaults when `path` is `None`
    /// or the file cannot be read or parsed.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            debug!("no engine config given, using defaults");
            return Self::default();
        };
        match Self::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "engine config not loaded, using defaults");
                Self::default()
            }
        }
    }

    /// The read-only subset consumed by the page pipeline.
    pub fn export_config(&self) -> ExportConfig {
        ExportConfig {
            sections: self.sections.clone(),
            internal_keys: self.internal_keys.clone(),
            theme_params: self.theme_params.clone(),
            default_language: self.default_language.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HostingConfig {
    #[serde(default, deserialize_with = "string_or_null")]
    pub site_url: String,
}

/// The personal site configuration document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SiteConfig {
    /// Language switcher entries keyed by Hugo language code, plus an optional `display` key.
    #[serde(default)]
    pub languages: Mapping,

    /// Written out as `hugo.yaml`, key order preserved.
    #[serde(default)]
    pub hugo: Mapping,

    #[serde(default)]
    pub hosting: HostingConfig,
}

impl SiteConfig {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            debug!("no site config given, using defaults");
            return Self::default();
        };
        match Self::from_path(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "site config not loaded, using defaults");
                Self::default()
            }
        }
    }
}

/// Configuration shared read-only by every page of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub sections: SectionsMap,
    pub internal_keys: BTreeSet<String>,
    pub theme_params: ThemeParamNames,
    pub default_language: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        EngineConfig::default().export_config()
    }
}
