use crate::rewrite::{convert_admonitions, convert_video_embeds, rewrite_line};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static PAGE_PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w[\w-]*::[ \t]").unwrap());
static COLLAPSED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*collapsed::\s*(true|false)").unwrap());
static BLOCK_ID_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*id::\s+[a-f0-9-]{8}").unwrap());
static EMPTY_BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\t*-\s*$").unwrap());
static BULLET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\t*)(- |\s{4})(.*)").unwrap());
static INLINE_PROPERTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w[\w-]*)::[ \t]*(.*)").unwrap());
static HTML_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<(?:img|video)\s").unwrap());

/// A single page line, classified by its outline role.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum OutlineItem<'a> {
    /// Logseq serialized block metadata (`collapsed::`, `id::`).
    Metadata,
    /// A bare `-` with no content.
    EmptyBullet,
    /// A bullet at `depth` tabs of indentation.
    Bullet { depth: usize, content: &'a str },
    /// Headings, quotes, paragraphs and anything else.
    Text(&'a str),
}

impl<'a> OutlineItem<'a> {
    /// Classifies a body line. Lines that do not look like a bullet fall through to `Text`.
    pub fn parse(line: &'a str) -> Self {
        if COLLAPSED_MARKER.is_match(line) || BLOCK_ID_MARKER.is_match(line) {
            return OutlineItem::Metadata;
        }
        if EMPTY_BULLET.is_match(line) {
            return OutlineItem::EmptyBullet;
        }
        match BULLET.captures(line) {
            Some(caps) => OutlineItem::Bullet {
                depth: caps.get(1).map_or(0, |m| m.as_str().len()),
                content: caps.get(3).map_or("", |m| m.as_str()),
            },
            None => OutlineItem::Text(line),
        }
    }
}

/// True for a line of the leading page-properties run (`key:: value`) or a blank line.
pub fn is_page_property(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || PAGE_PROPERTY.is_match(trimmed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    InProperties,
    InBody,
}

/// Converts a Logseq page into flat Hugo Markdown.
///
/// Processing order:
/// 1. admonition blocks and video embeds over the whole text
/// 2. line by line: the leading properties run is dropped, then each body line
///    is classified and rendered (see [`OutlineItem`])
/// 3. raw `<img>`/`<video>` lines are padded with blank lines
/// 4. runs of blank lines are capped at two, and the result is trimmed
pub struct OutlineConverter<'a> {
    internal_keys: &'a BTreeSet<String>,
    lang: &'a str,
}

impl<'a> OutlineConverter<'a> {
    /// Creates a converter.
    ///
    /// # Arguments
    ///
    /// * `internal_keys` - lowercase property keys whose bullets are dropped entirely.
    /// * `lang` - language code embedded in tag links.
    pub fn new(internal_keys: &'a BTreeSet<String>, lang: &'a str) -> Self {
        OutlineConverter {
            internal_keys,
            lang,
        }
    }

    pub fn convert(&self, text: &str) -> String {
        let text = convert_admonitions(text);
        let text = convert_video_embeds(&text);

        let mut state = State::InProperties;
        let mut output = Vec::new();
        for line in text.lines() {
            if state == State::InProperties {
                if is_page_property(line) {
                    continue;
                }
                state = State::InBody;
            }
            if let Some(converted) = self.convert_line(line) {
                output.push(converted);
            }
        }

        let output = collapse_blank_runs(pad_html_blocks(output));
        output.join("\n").trim().to_string()
    }

    /// Renders one body line, or `None` when the line is dropped.
    fn convert_line(&self, line: &str) -> Option<String> {
        match OutlineItem::parse(line) {
            OutlineItem::Metadata => None,
            OutlineItem::EmptyBullet => Some(String::new()),
            OutlineItem::Bullet { depth, content } => {
                let content = match INLINE_PROPERTY.captures(content.trim()) {
                    Some(caps) if self.internal_keys.contains(&caps[1].to_lowercase()) => {
                        return None;
                    }
                    // Custom keys (logo::, cover::, ...) keep only their value.
                    Some(caps) => caps[2].trim().to_string(),
                    None => content.to_string(),
                };
                let content = rewrite_line(&content, self.lang);
                if depth == 0 {
                    Some(content)
                } else {
                    Some(format!("{}- {}", "  ".repeat(depth - 1), content))
                }
            }
            OutlineItem::Text(text) => Some(rewrite_line(text, self.lang)),
        }
    }
}

/// Raw HTML blocks need a blank line on both sides for Hugo's goldmark to render them.
fn pad_html_blocks(lines: Vec<String>) -> Vec<String> {
    let mut spaced: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        if HTML_BLOCK.is_match(&line) {
            if spaced.last().is_some_and(|prev| !prev.trim().is_empty()) {
                spaced.push(String::new());
            }
            spaced.push(line);
            spaced.push(String::new());
        } else {
            spaced.push(line);
        }
    }
    spaced
}

fn collapse_blank_runs(lines: Vec<String>) -> Vec<String> {
    let mut blank_count = 0;
    lines
        .into_iter()
        .filter(|line| {
            if line.trim().is_empty() {
                blank_count += 1;
                blank_count <= 2
            } else {
                blank_count = 0;
                true
            }
        })
        .collect()
}
