use regex::{Captures, Regex};
use std::sync::LazyLock;

static VIDEO_EMBED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(?:video|youtube)\s+(https?://[^\}]+)\}\}").unwrap()
});
static YOUTUBE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([a-zA-Z0-9_-]+)").unwrap()
});

/// Renders a single embed: the Hugo `youtube` shortcode for YouTube links, a plain
/// `<video>` element for anything else.
pub fn render_video(url: &str) -> String {
    let url = url.trim();
    match YOUTUBE_ID.captures(url) {
        Some(id) => format!("{{{{< youtube {} >}}}}", &id[1]),
        None => format!("<video src=\"{}\" controls></video>", url),
    }
}

/// Rewrites `{{video URL}}` and `{{youtube URL}}` macros across the page text.
pub fn convert_video_embeds(text: &str) -> String {
    VIDEO_EMBED
        .replace_all(text, |caps: &Captures| render_video(&caps[1]))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_short_link() {
        assert_eq!(
            convert_video_embeds("{{video https://youtu.be/XYZ123}}"),
            "{{< youtube XYZ123 >}}"
        );
    }

    #[test]
    fn test_youtube_watch_link() {
        assert_eq!(
            convert_video_embeds("- {{youtube https://www.youtube.com/watch?v=a_B-9&t=10}}"),
            "- {{< youtube a_B-9 >}}"
        );
    }

    #[test]
    fn test_other_host_falls_back_to_video_tag() {
        assert_eq!(
            convert_video_embeds("{{video https://cdn.example.org/clip.mp4 }}"),
            r#"<video src="https://cdn.example.org/clip.mp4" controls></video>"#
        );
    }

    #[test]
    fn test_non_http_macros_untouched() {
        let text = "{{video ../assets/clip.mp4}} {{embed [[Page]]}}";
        assert_eq!(convert_video_embeds(text), text);
    }
}
