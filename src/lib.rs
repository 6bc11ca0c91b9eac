//! Converts Logseq pages marked `public:: true` into Hugo content files.
//!
//! Supported Logseq syntax:
//!
//! | Logseq                                | Hugo                                   |
//! |---------------------------------------|----------------------------------------|
//! | `[[Page]]`                            | `Page`                                 |
//! | `#Tag`                                | `[#Tag](/lang/tags/tag/)` + front matter tags |
//! | `^^text^^`                            | `<mark>text</mark>`                    |
//! | `../assets/img.ext`                   | `/assets/img.ext`                      |
//! | `![alt](path){:height H, :width W}`   | `<img src="path" width="W">`           |
//! | `{{video https://...}}`               | `youtube` shortcode or `<video>`       |
//! | `#+BEGIN_NOTE ... #+END_NOTE`         | emoji-styled blockquote                |
//! | `collapsed::` / `id::`                | removed                                |
//! | `logo:: ![]()`                        | key removed, value kept                |

pub mod assets;
pub mod cli;
pub mod config;
pub mod generator;
pub mod outline;
pub mod parser;
pub mod pipeline;
pub mod rewrite;
