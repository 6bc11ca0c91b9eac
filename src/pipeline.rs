//! Page pipeline: read, publish filter, conversion and write.

use crate::config::ExportConfig;
use crate::generator::{page_language, resolve_output_path, FrontMatter};
use crate::outline::OutlineConverter;
use crate::parser::{extract_tags, parse_properties};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to read page {}: {source}", path.display())]
    ReadPage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    WritePage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("pages directory is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),

    #[error("invalid page pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("failed to list pages: {0}")]
    Glob(#[from] glob::GlobError),
}

/// One source page of the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub path: PathBuf,
    pub content: String,
}

impl Page {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Page {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn read(path: &Path) -> Result<Self, ExportError> {
        let content = fs::read_to_string(path).map_err(|source| ExportError::ReadPage {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Page::new(path, content))
    }

    pub fn file_name(&self) -> String {
        file_name_of(&self.path)
    }
}

/// The last component of `path` as a lossy string, empty when there is none.
fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// A converted page, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Exported(PathBuf),
    /// The page has no `public:: true`.
    Skipped,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    /// Source page and written file, in processing order.
    pub exported: Vec<(PathBuf, PathBuf)>,
    /// File names of the pages that were not public.
    pub skipped: Vec<String>,
}

/// Today's date in the `YYYY-MM-DD` form used for pages without `date::`.
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Converts a page into its Hugo document, or `None` when the page is not public.
pub fn render_page(
    page: &Page,
    output_root: &Path,
    config: &ExportConfig,
    today: &str,
) -> Option<OutputDocument> {
    let props = parse_properties(&page.content);
    if !props.is_public() {
        return None;
    }

    let lang = page_language(&props, &config.default_language);
    let tags = extract_tags(&page.content);
    let front_matter =
        FrontMatter::from_properties(&props, &page.path, &tags, today).render(&config.theme_params);
    let body = OutlineConverter::new(&config.internal_keys, &lang).convert(&page.content);

    Some(OutputDocument {
        path: resolve_output_path(&props, output_root, &config.sections, &config.default_language),
        content: format!("{}\n\n{}", front_matter, body),
    })
}

/// Reads, converts and writes one page.
pub fn process_page(
    path: &Path,
    output_root: &Path,
    config: &ExportConfig,
    today: &str,
) -> Result<PageOutcome, ExportError> {
    let page = Page::read(path)?;
    let Some(document) = render_page(&page, output_root, config, today) else {
        debug!(page = %page.file_name(), "skipped, not public");
        return Ok(PageOutcome::Skipped);
    };

    if let Some(parent) = document.path.parent() {
        fs::create_dir_all(parent).map_err(|source| ExportError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&document.path, &document.content).map_err(|source| ExportError::WritePage {
        path: document.path.clone(),
        source,
    })?;
    Ok(PageOutcome::Exported(document.path))
}

/// Lists the `*.md` files directly under `pages_dir`, sorted by file name.
pub fn discover_pages(pages_dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    let dir = pages_dir
        .to_str()
        .ok_or_else(|| ExportError::NonUtf8Path(pages_dir.to_path_buf()))?;
    let pattern = format!("{}/*.md", glob::Pattern::escape(dir));

    let mut pages = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if path.is_file() {
            pages.push(path);
        }
    }
    pages.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(pages)
}

/// Exports every public page of `pages_dir` into `output_root`, one at a time.
///
/// Non-article pages that resolve to the same `_index.md` overwrite each other;
/// the last one in file name order wins.
pub fn export_pages(
    pages_dir: &Path,
    output_root: &Path,
    config: &ExportConfig,
    today: &str,
) -> Result<ExportReport, ExportError> {
    let mut report = ExportReport::default();
    for path in discover_pages(pages_dir)? {
        match process_page(&path, output_root, config, today)? {
            PageOutcome::Exported(out) => {
                info!(page = %path.display(), output = %out.display(), "exported");
                report.exported.push((path, out));
            }
            PageOutcome::Skipped => report.skipped.push(file_name_of(&path)),
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    const TODAY: &str = "2024-06-01";

    #[test]
    fn test_render_page_full_document() {
        let page = Page::new(
            "pages/Hello.md",
            "title:: Hello\ntype:: post\nslug:: hi\nlang:: en\npublic:: true\n\n- Working on #project/alpha\n\t- with ^^care^^\n",
        );
        let document = render_page(&page, Path::new("content"), &ExportConfig::default(), TODAY)
            .expect("public page renders");
        assert_eq!(document.path, Path::new("content/en/blog/hi.md"));
        assert_eq!(
            document.content,
            "---\n\
             title: \"Hello\"\n\
             slug: \"hi\"\n\
             type: \"post\"\n\
             date: 2024-06-01\n\
             tags: [\"project/alpha\"]\n\
             ---\n\
             \n\
             Working on [#project/alpha](/en/tags/project/alpha/)\n\
             - with <mark>care</mark>"
        );
    }

    #[test]
    fn test_render_page_requires_public_true() {
        let config = ExportConfig::default();
        for props in ["public:: false\n", "public:: yes\n", "title:: none\n", ""] {
            let page = Page::new("p.md", format!("{}- body", props));
            assert_eq!(render_page(&page, Path::new("out"), &config, TODAY), None);
        }
        let page = Page::new("p.md", "public:: TRUE\n- body");
        assert!(render_page(&page, Path::new("out"), &config, TODAY).is_some());
    }

    #[test]
    fn test_plain_paragraphs_follow_front_matter() {
        let page = Page::new("About.md", "public:: true\n\nFirst paragraph.\n\nSecond one.");
        let document = render_page(&page, Path::new("c"), &ExportConfig::default(), TODAY)
            .expect("public page renders");
        assert!(document.content.ends_with("---\n\nFirst paragraph.\n\nSecond one."));
        assert_eq!(document.path, Path::new("c/fr/_index.md"));
    }

    #[test]
    fn test_default_language_applies_to_links_and_path() {
        let config = ExportConfig {
            default_language: "pt_BR".to_string(),
            ..ExportConfig::default()
        };
        let page = Page::new("x.md", "public:: true\ntype:: post\nslug:: s\n\n- #Tag");
        let document = render_page(&page, Path::new("c"), &config, TODAY).expect("renders");
        assert_eq!(document.path, Path::new("c/pt-br/blog/s.md"));
        assert!(document.content.ends_with("[#Tag](/pt-br/tags/tag/)"));
    }

    #[test]
    fn test_process_page_writes_and_skips() -> Result<()> {
        let graph = tempdir()?;
        let out = tempdir()?;
        let public = graph.path().join("public.md");
        let private = graph.path().join("private.md");
        fs::write(&public, "public:: true\ntype:: cv\nlang:: en\n\n- Experience")?;
        fs::write(&private, "public:: false\n\n- Secret")?;

        let config = ExportConfig::default();
        let outcome = process_page(&public, out.path(), &config, TODAY)?;
        let expected = out.path().join("en/cv/_index.md");
        assert_eq!(outcome, PageOutcome::Exported(expected.clone()));
        assert!(fs::read_to_string(&expected)?.ends_with("---\n\nExperience"));

        assert_eq!(process_page(&private, out.path(), &config, TODAY)?, PageOutcome::Skipped);
        Ok(())
    }

    #[test]
    fn test_file_names() {
        assert_eq!(Page::new("pages/Hello World.md", "").file_name(), "Hello World.md");
        assert_eq!(file_name_of(Path::new("a/b/c.md")), "c.md");
        assert_eq!(file_name_of(Path::new("/")), "");
    }

    #[test]
    fn test_process_page_missing_source_is_an_error() {
        let out = tempdir().expect("tempdir");
        let result = process_page(
            &out.path().join("missing.md"),
            out.path(),
            &ExportConfig::default(),
            TODAY,
        );
        assert!(matches!(result, Err(ExportError::ReadPage { .. })));
    }

    #[test]
    fn test_export_pages_sorted_last_write_wins() -> Result<()> {
        let graph = tempdir()?;
        let out = tempdir()?;
        let pages = graph.path().join("pages [draft]");
        fs::create_dir_all(&pages)?;
        fs::write(pages.join("b.md"), "public:: true\nlang:: en\n\n- second home")?;
        fs::write(pages.join("a.md"), "public:: true\nlang:: en\n\n- first home")?;
        fs::write(pages.join("c.md"), "title:: draft\n\n- nope")?;
        fs::write(pages.join("notes.txt"), "public:: true")?;

        let report = export_pages(&pages, out.path(), &ExportConfig::default(), TODAY)?;
        let sources: Vec<_> = report
            .exported
            .iter()
            .filter_map(|(src, _)| src.file_name())
            .collect();
        assert_eq!(sources, vec!["a.md", "b.md"]);
        assert_eq!(report.skipped, vec!["c.md".to_string()]);

        let index = fs::read_to_string(out.path().join("en/_index.md"))?;
        assert!(index.ends_with("second home"));
        Ok(())
    }
}
