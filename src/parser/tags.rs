use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// A property line at the start of the remaining text.
static PROPERTY_CONTINUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w-]+::").unwrap());

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\w[\w/-]*)").unwrap());

/// Returns the page body as seen by the tag scan: everything after the first
/// line break that is not directly followed by a `key::` line.
fn body_after_properties(text: &str) -> &str {
    for (pos, _) in text.match_indices('\n') {
        let rest = &text[pos + 1..];
        if !PROPERTY_CONTINUATION.is_match(rest) {
            return rest;
        }
    }
    text
}

/// True when the character right before `pos` is `#` or a word character,
/// which rules out a tag starting at `pos`.
pub(crate) fn preceded_by_word_or_hash(text: &str, pos: usize) -> bool {
    text[..pos]
        .chars()
        .next_back()
        .is_some_and(|c| c == '#' || c == '_' || c.is_alphanumeric())
}

/// Extracts the `#tags` of a page for the front matter.
///
/// Works on the raw page text, not on converted output. A tag is `#` followed by
/// a word that may contain `/` and `-`, and must not be preceded by `#` or a word
/// character. Results are deduplicated and sorted.
pub fn extract_tags(text: &str) -> Vec<String> {
    let body = body_after_properties(text);
    let tags: BTreeSet<String> = TAG
        .captures_iter(body)
        .filter(|captures| {
            let start = captures.get(0).map_or(0, |m| m.start());
            !preceded_by_word_or_hash(body, start)
        })
        .map(|captures| captures[1].to_string())
        .collect();
    tags.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_tags_sorted_and_deduplicated() {
        let text = "title:: T\npublic:: true\n- about #rust and #Zig\n- more #rust\n";
        assert_eq!(extract_tags(text), vec!["Zig", "rust"]);
    }

    #[test]
    fn test_extract_tags_with_slashes_and_hyphens() {
        let text = "public:: true\n- working on #project/alpha and #side-quest\n";
        assert_eq!(extract_tags(text), vec!["project/alpha", "side-quest"]);
    }

    #[test]
    fn test_extract_tags_ignores_headings_anchors_and_embedded_hashes() {
        let text = "public:: true\n## Heading\n- issue#42 and ##double\n- color: #\n";
        assert!(extract_tags(text).is_empty());
    }

    #[test]
    fn test_preceded_by_word_or_hash() {
        assert!(preceded_by_word_or_hash("a#b", 1));
        assert!(preceded_by_word_or_hash("_#b", 1));
        assert!(preceded_by_word_or_hash("é#b", "é".len()));
        assert!(preceded_by_word_or_hash("##b", 1));
        assert!(!preceded_by_word_or_hash("#b", 0));
        assert!(!preceded_by_word_or_hash(" #b", 1));
        assert!(!preceded_by_word_or_hash("(#b", 1));
    }

    #[test]
    fn test_extract_tags_skips_property_block() {
        let text = "tags:: #fromprops\npublic:: true\n- body #inbody\n";
        assert_eq!(extract_tags(text), vec!["inbody"]);
    }

    #[test]
    fn test_extract_tags_first_line_is_cut_without_properties() {
        // Without a property run, the cut happens at the first line break.
        let text = "#first line\n#second\n";
        assert_eq!(extract_tags(text), vec!["second"]);
        assert!(extract_tags("#only").contains(&"only".to_string()));
    }

    #[test]
    fn test_extract_tags_bracketed_reference() {
        let text = "public:: true\n- see #[[Multi Word]] and #real\n";
        assert_eq!(extract_tags(text), vec!["real"]);
    }
}
