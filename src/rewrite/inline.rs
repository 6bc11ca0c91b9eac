//! Line-level rewrites of Logseq inline syntax.
//!
//! Each rule is a pure `&str -> String` transform. [`rewrite_line`] applies them
//! in a fixed order:
//!
//! 1. [`sized_images`]: `![alt](path){:width W, :height H}` to `<img>`
//! 2. [`asset_paths`]: `../assets/` to `/assets/`
//! 3. [`highlights`]: `^^text^^` to `<mark>text</mark>`
//! 4. [`page_refs`]: `[[Page]]` and `#[[Page]]` to `Page`
//! 5. [`tag_links`]: `#tag` to a localized taxonomy link

use crate::parser::tags::preceded_by_word_or_hash;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static SIZED_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)\{([^}]+)\}").unwrap());
static ASSET_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\.[/\\]assets[/\\]").unwrap());
static WIDTH_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":width\s+(\d+)").unwrap());
static HEIGHT_ATTR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":height\s+(\d+)").unwrap());
static HIGHLIGHT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\^\^(.+?)\^\^").unwrap());
static PAGE_REF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#?\[\[([^\]]+)\]\]").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\w[\w/-]*)").unwrap());

/// Applies every inline rule to one content line, in order.
pub fn rewrite_line(line: &str, lang: &str) -> String {
    let line = sized_images(line);
    let line = asset_paths(&line);
    let line = highlights(&line);
    let line = page_refs(&line);
    tag_links(&line, lang)
}

/// `![alt](path){attrs}` becomes an `<img>` tag.
///
/// Only one dimension is emitted so the browser keeps the aspect ratio: `width`
/// when present, else `height`, else none.
pub fn sized_images(line: &str) -> String {
    SIZED_IMAGE
        .replace_all(line, |caps: &Captures| {
            let alt = &caps[1];
            let path = ASSET_PREFIX.replace_all(&caps[2], "/assets/");
            let attrs = &caps[3];

            let mut parts = vec![format!("src=\"{}\"", path)];
            if !alt.is_empty() {
                parts.push(format!("alt=\"{}\"", alt));
            }
            if let Some(width) = WIDTH_ATTR.captures(attrs) {
                parts.push(format!("width=\"{}\"", &width[1]));
            } else if let Some(height) = HEIGHT_ATTR.captures(attrs) {
                parts.push(format!("height=\"{}\"", &height[1]));
            }
            format!("<img {}>", parts.join(" "))
        })
        .into_owned()
}

/// Rewrites relative `../assets/` (or `..\assets\`) prefixes to the site-absolute `/assets/`.
pub fn asset_paths(line: &str) -> String {
    ASSET_PREFIX.replace_all(line, "/assets/").into_owned()
}

pub fn highlights(line: &str) -> String {
    HIGHLIGHT.replace_all(line, "<mark>${1}</mark>").into_owned()
}

/// Page references are flattened to their plain title; no hyperlink is produced.
pub fn page_refs(line: &str) -> String {
    PAGE_REF.replace_all(line, "${1}").into_owned()
}

/// `#tag` becomes `[#tag](/<lang>/tags/<tag lowercased>/)`.
///
/// A `#` preceded by another `#` or a word character (headings, URL fragments,
/// `issue#42`) is left alone.
pub fn tag_links(line: &str, lang: &str) -> String {
    TAG.replace_all(line, |caps: &Captures| {
        let start = caps.get(0).map_or(0, |m| m.start());
        if preceded_by_word_or_hash(line, start) {
            return caps[0].to_string();
        }
        let tag = &caps[1];
        format!("[#{}](/{}/tags/{}/)", tag, lang, tag.to_lowercase())
    })
    .into_owned()
}
