use crate::config::ThemeParamNames;
use crate::parser::PropertyBlock;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static NON_SLUG_CHAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w-]").unwrap());

/// Property values that turn the table of contents on.
const TRUTHY: &[&str] = &["true", "1", "yes"];

/// Hugo front matter derived from a page's properties.
///
/// Values are written inside double quotes as-is; embedded quotes are not escaped.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FrontMatter {
    pub title: String,
    pub slug: String,
    pub page_type: String,
    pub date: String,
    pub description: Option<String>,
    pub weight: Option<String>,
    /// Links equivalent pages across languages (`translationKey::` in Logseq).
    pub translation_key: Option<String>,
    pub toc: bool,
    pub tags: Vec<String>,
}

/// Lowercases `title` and replaces every character that is not a word character or `-` with `-`.
pub fn slug_from_title(title: &str) -> String {
    NON_SLUG_CHAR
        .replace_all(&title.to_lowercase(), "-")
        .into_owned()
}

impl FrontMatter {
    /// Builds the front matter of a page.
    ///
    /// # Arguments
    ///
    /// * `props` - the page's property block.
    /// * `source` - the page file; its stem is the fallback title.
    /// * `tags` - tags extracted from the page body.
    /// * `today` - `YYYY-MM-DD` date used when the page has no `date::`.
    pub fn from_properties(
        props: &PropertyBlock,
        source: &Path,
        tags: &[String],
        today: &str,
    ) -> Self {
        let title = match props.get("title") {
            Some(title) => title.to_string(),
            None => source
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        let slug = props
            .get("slug")
            .map(str::to_string)
            .unwrap_or_else(|| slug_from_title(&title));
        let toc = props
            .get("toc")
            .is_some_and(|v| TRUTHY.contains(&v.to_lowercase().as_str()));

        FrontMatter {
            slug,
            page_type: props.get("type").unwrap_or("page").to_string(),
            date: props.get("date").unwrap_or(today).to_string(),
            description: props.get_non_empty("description").map(str::to_string),
            weight: props.get_non_empty("menu_order").map(str::to_string),
            translation_key: props.get_non_empty("translationkey").map(str::to_string),
            toc,
            tags: tags.to_vec(),
            title,
        }
    }

    /// Renders the `---` delimited YAML block.
    pub fn render(&self, theme: &ThemeParamNames) -> String {
        let mut fm = vec![
            "---".to_string(),
            format!("title: \"{}\"", self.title),
            format!("slug: \"{}\"", self.slug),
            format!("type: \"{}\"", self.page_type),
            format!("date: {}", self.date),
        ];
        if let Some(description) = &self.description {
            fm.push(format!("description: \"{}\"", description));
        }
        if let Some(weight) = &self.weight {
            fm.push(format!("weight: {}", weight));
        }
        if let Some(key) = &self.translation_key {
            fm.push(format!("translationKey: \"{}\"", key));
        }
        if self.toc {
            for field in [&theme.toc, &theme.toc_open] {
                if !field.is_empty() {
                    fm.push(format!("{}: true", field));
                }
            }
        }
        if !self.tags.is_empty() {
            let quoted: Vec<String> = self.tags.iter().map(|t| format!("\"{}\"", t)).collect();
            fm.push(format!("tags: [{}]", quoted.join(", ")));
        }
        fm.push("---".to_string());
        fm.join("\n")
    }
}
