//! Text rewrites from Logseq syntax to Hugo Markdown/HTML.
//!
//! Block rewrites run once over the whole page text; inline rewrites run per line.

pub mod admonition;
pub mod inline;
pub mod media;

pub use admonition::convert_admonitions;
pub use inline::rewrite_line;
pub use media::convert_video_embeds;
