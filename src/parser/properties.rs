use regex::Regex;
use std::sync::LazyLock;

static PROPERTY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\w[\w-]*)::[ \t]*(.*)").unwrap());

/// The leading `key:: value` block of a Logseq page.
///
/// Keys are stored lowercased and values trimmed. Insertion order is kept so that
/// the block can be logged or inspected in the order it was written.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct PropertyBlock {
    entries: Vec<(String, String)>,
}

impl PropertyBlock {
    /// Creates a new, empty `PropertyBlock`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a property. A repeated key keeps its position and takes the new value.
    pub fn insert(&mut self, key: &str, value: &str) {
        let key = key.to_lowercase();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key, value.to_string())),
        }
    }

    /// Returns the value stored under `key`. Lookup is case-insensitive.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value under `key`, treating an empty value as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// A page is exported only when it carries `public:: true` (value compared case-insensitively).
    pub fn is_public(&self) -> bool {
        self.get("public")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }
}

/// Extracts the `key:: value` properties from the top of a Logseq page.
///
/// Scanning stops at the first non-blank line that is neither a property nor a
/// bullet (`-`). Blank lines inside the block are skipped. Once stopped, later
/// property-looking lines in the body are never picked up.
pub fn parse_properties(text: &str) -> PropertyBlock {
    let mut props = PropertyBlock::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(captures) = PROPERTY_LINE.captures(trimmed) {
            props.insert(&captures[1], captures[2].trim());
        } else if !trimmed.is_empty() && !line.starts_with('-') {
            break;
        }
    }
    props
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_properties_basic() {
        let text = "title:: Hello World\nType:: post\npublic:: true\n\n- first bullet\n";
        let props = parse_properties(text);
        assert_eq!(props.get("title"), Some("Hello World"));
        assert_eq!(props.get("type"), Some("post"));
        assert_eq!(props.get("public"), Some("true"));
        assert_eq!(props.len(), 3);
    }

    #[test]
    fn test_parse_properties_stops_at_body() {
        let text = "title:: Page\nSome paragraph\nlate:: value\n";
        let props = parse_properties(text);
        assert_eq!(props.get("title"), Some("Page"));
        assert!(!props.contains_key("late"));
    }

    #[test]
    fn test_parse_properties_tolerates_blank_lines_and_bullets() {
        let text = "title:: Page\n\n  \n- bullet\nlang:: en\n";
        let props = parse_properties(text);
        assert_eq!(props.get("title"), Some("Page"));
        assert_eq!(props.get("lang"), Some("en"));
    }

    #[test]
    fn test_parse_properties_empty_and_keys_lowercased() {
        assert!(parse_properties("").is_empty());
        assert!(parse_properties("Just text\n").is_empty());

        let props = parse_properties("TranslationKey::   about  \nempty::\n");
        assert_eq!(props.get("translationkey"), Some("about"));
        assert_eq!(props.get("TRANSLATIONKEY"), Some("about"));
        assert_eq!(props.get("empty"), Some(""));
        assert_eq!(props.get_non_empty("empty"), None);
    }

    #[test]
    fn test_repeated_key_takes_last_value() {
        let props = parse_properties("a:: 1\nb:: 2\nA:: 3\n");
        let collected: Vec<_> = props.iter().collect();
        assert_eq!(collected, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_is_public() {
        assert!(parse_properties("public:: true").is_public());
        assert!(parse_properties("public:: TRUE").is_public());
        assert!(parse_properties("public:: True").is_public());
        assert!(!parse_properties("public:: false").is_public());
        assert!(!parse_properties("public:: yes").is_public());
        assert!(!parse_properties("title:: x").is_public());
    }
}
