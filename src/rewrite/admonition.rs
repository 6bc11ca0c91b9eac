use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static BEGIN_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)#\+BEGIN_(\w+)\n").unwrap());

const DEFAULT_ICON: &str = "ℹ️";

/// Admonition kind (uppercase) to the emoji shown in the callout header.
pub const ADMONITION_ICONS: &[(&str, &str)] = &[
    ("NOTE", "📝"),
    ("TIP", "💡"),
    ("WARNING", "⚠️"),
    ("CAUTION", "🚨"),
    ("IMPORTANT", "❗"),
    ("EXAMPLE", "📋"),
    ("QUOTE", "💬"),
    ("PINNED", "📌"),
];

pub fn icon_for(kind: &str) -> &'static str {
    ADMONITION_ICONS
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(kind))
        .map_or(DEFAULT_ICON, |(_, icon)| icon)
}

fn render(kind: &str, content: &str) -> String {
    let kind = kind.to_uppercase();
    let body = content
        .trim()
        .lines()
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n");
    format!("> **{} {}**\n>\n{}", icon_for(&kind), kind, body)
}

/// Converts `#+BEGIN_KIND ... #+END_KIND` blocks into emoji-styled blockquotes.
///
/// ```text
/// #+BEGIN_NOTE
/// Content
/// #+END_NOTE
/// ```
/// becomes
/// ```text
/// > **📝 NOTE**
/// >
/// > Content
/// ```
///
/// The kind is matched case-insensitively and the closing marker must name the
/// same kind as the opening one. A block without its closing marker is left as is.
pub fn convert_admonitions(text: &str) -> String {
    // ASCII lowercasing keeps byte offsets, so positions found here index `text`.
    let folded = text.to_ascii_lowercase();
    let mut output = String::with_capacity(text.len());
    let mut copied = 0;
    let mut search_from = 0;

    while let Some(caps) = BEGIN_MARKER.captures_at(text, search_from) {
        let Some(begin) = caps.get(0) else { break };
        let kind = &caps[1];
        let end_marker = format!("\n#+end_{}", kind.to_ascii_lowercase());
        let end_start = folded[begin.end()..]
            .find(&end_marker)
            .map(|offset| begin.end() + offset);

        match end_start {
            Some(end_start) => {
                let end = end_start + end_marker.len();
                output.push_str(&text[copied..begin.start()]);
                output.push_str(&render(kind, &text[begin.end()..end_start]));
                copied = end;
                search_from = end;
            }
            None => {
                debug!(kind, "admonition without a closing marker left untouched");
                search_from = begin.start() + 1;
            }
        }
    }

    output.push_str(&text[copied..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_tip() {
        assert_eq!(
            convert_admonitions("#+BEGIN_TIP\nHello\n#+END_TIP"),
            "> **💡 TIP**\n>\n> Hello"
        );
    }

    #[test]
    fn test_convert_multiline_case_insensitive() {
        let text = "before\n#+begin_note\n  first\nsecond  \n#+END_NOTE\nafter";
        assert_eq!(
            convert_admonitions(text),
            "before\n> **📝 NOTE**\n>\n> first\n> second\nafter"
        );
    }

    #[test]
    fn test_unknown_kind_uses_default_icon() {
        assert_eq!(
            convert_admonitions("#+BEGIN_SIDEBAR\nx\n#+END_SIDEBAR"),
            "> **ℹ️ SIDEBAR**\n>\n> x"
        );
    }

    #[test]
    fn test_mismatched_or_unterminated_blocks_untouched() {
        let text = "#+BEGIN_NOTE\nx\n#+END_TIP";
        assert_eq!(convert_admonitions(text), text);

        let text = "#+BEGIN_WARNING\nnever closed";
        assert_eq!(convert_admonitions(text), text);
    }

    #[test]
    fn test_closing_marker_needs_the_exact_kind() {
        let text = "#+BEGIN_A_B\nx\n#+END_AXB\n#+end_a_b";
        assert_eq!(
            convert_admonitions(text),
            "> **ℹ️ A_B**\n>\n> x\n> #+END_AXB"
        );
    }

    #[test]
    fn test_multiple_blocks() {
        let text = "#+BEGIN_NOTE\na\n#+END_NOTE\nmid\n#+BEGIN_QUOTE\nb\n#+END_QUOTE";
        assert_eq!(
            convert_admonitions(text),
            "> **📝 NOTE**\n>\n> a\nmid\n> **💬 QUOTE**\n>\n> b"
        );
    }

    #[test]
    fn test_icon_for() {
        assert_eq!(icon_for("warning"), "⚠️");
        assert_eq!(icon_for("PINNED"), "📌");
        assert_eq!(icon_for("whatever"), "ℹ️");
    }
}
