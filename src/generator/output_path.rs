use crate::config::SectionsMap;
use crate::parser::PropertyBlock;
use std::path::{Path, PathBuf};

/// Types that get one file per article; every other type is a section page.
pub const ARTICLE_TYPES: &[&str] = &["post", "blog"];

/// Filename shared by all non-article pages of a section.
pub const SECTION_INDEX: &str = "_index.md";

/// The page's Hugo language code: `lang::` or `default_lang`, lowercased with
/// underscores turned into hyphens (`zh_TW` becomes `zh-tw`).
pub fn page_language(props: &PropertyBlock, default_lang: &str) -> String {
    props
        .get("lang")
        .unwrap_or(default_lang)
        .to_lowercase()
        .replace('_', "-")
}

/// Resolves `<output_root>/<lang>/<section>/<file>` for a page.
///
/// The section comes from `sections`, falling back to the type itself; an empty
/// section places the page directly under the language directory. Articles are
/// written to `<slug>.md`, everything else to `_index.md`, so several non-article
/// pages of the same type and language end up on the same path.
pub fn resolve_output_path(
    props: &PropertyBlock,
    output_root: &Path,
    sections: &SectionsMap,
    default_lang: &str,
) -> PathBuf {
    let lang = page_language(props, default_lang);
    let page_type = props.get("type").unwrap_or("page");
    let slug = props.get("slug").unwrap_or("page");
    let section = sections
        .get(page_type)
        .map(String::as_str)
        .unwrap_or(page_type);

    let mut dir = output_root.join(lang);
    if !section.is_empty() {
        dir.push(section);
    }

    if ARTICLE_TYPES.contains(&page_type) {
        dir.join(format!("{}.md", slug))
    } else {
        dir.join(SECTION_INDEX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_sections;
    use crate::parser::parse_properties;

    fn resolve(props: &str) -> PathBuf {
        resolve_output_path(
            &parse_properties(props),
            Path::new("content"),
            &default_sections(),
            "fr",
        )
    }

    #[test]
    fn test_post_uses_slug() {
        assert_eq!(
            resolve("type:: post\nslug:: hi\nlang:: fr\n"),
            Path::new("content/fr/blog/hi.md")
        );
        assert_eq!(
            resolve("type:: blog\nslug:: other\nlang:: en\n"),
            Path::new("content/en/blog/other.md")
        );
    }

    #[test]
    fn test_page_goes_to_language_root() {
        assert_eq!(resolve("type:: page\nlang:: fr\n"), Path::new("content/fr/_index.md"));
        assert_eq!(resolve("type:: home\n"), Path::new("content/fr/_index.md"));
        assert_eq!(resolve("title:: no type\n"), Path::new("content/fr/_index.md"));
    }

    #[test]
    fn test_section_pages_collapse_to_index() {
        assert_eq!(
            resolve("type:: cv\nslug:: my-cv\nlang:: en\n"),
            Path::new("content/en/cv/_index.md")
        );
    }

    #[test]
    fn test_unmapped_type_is_its_own_section() {
        assert_eq!(
            resolve("type:: projects\nlang:: en\n"),
            Path::new("content/en/projects/_index.md")
        );
    }

    #[test]
    fn test_language_normalization_and_missing_slug() {
        assert_eq!(
            resolve("type:: post\nlang:: zh_TW\n"),
            Path::new("content/zh-tw/blog/page.md")
        );
    }

    #[test]
    fn test_custom_sections_map() {
        let mut sections = SectionsMap::new();
        sections.insert("post".to_string(), "articles".to_string());
        let props = parse_properties("type:: post\nslug:: hi\nlang:: EN\n");
        assert_eq!(
            resolve_output_path(&props, Path::new("/out"), &sections, "fr"),
            Path::new("/out/en/articles/hi.md")
        );
    }
}
