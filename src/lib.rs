//! # roffdown
//!
//! Convert markdown manual pages into nroff `man` pages and matching HTML.
//!
//! ## Features
//!
//! - One pass over the rendered HTML produces both outputs in sync
//! - Headings, paragraphs, nested bulleted and numbered lists, block quotes,
//!   preformatted blocks, bold/italic/code fonts
//! - Description lists, written in markdown as ordered lists starting at 0
//! - `@NAME@` placeholder substitution and build metadata from a JSON config
//!
//! ## Quick Start
//!
//! ```
//! use roffdown::{PageInfo, convert};
//!
//! let page = PageInfo::new("tool", "1", "06 Aug 2020").with_version("1.0");
//! let doc = convert("# NAME\n\ntool - do **things**\n", &page).unwrap();
//!
//! assert!(doc.man.starts_with(".TH \"tool\" \"1\" \"06 Aug 2020\" \"tool 1.0\""));
//! assert!(doc.man.contains(".SH \"NAME\"\n.P\ntool - do \\fBthings\\fP\n"));
//! assert!(doc.html.contains("<title>tool(1) man page</title>"));
//! ```
//!
//! ## Files
//!
//! [`ManPage`] handles a whole `NAME.SECTION.md` file: decoding, placeholder
//! substitution, date resolution and writing `NAME.SECTION` and
//! `NAME.SECTION.html`.
//!
//! ```no_run
//! use std::path::Path;
//! use roffdown::{Config, ManPage, Outputs};
//!
//! let config = Config::from_path("man.json").unwrap();
//! let page = ManPage::load(Path::new("rsync.1.md"), &config, None).unwrap();
//! page.write(Outputs::Both).unwrap();
//! ```

pub mod config;
pub mod error;
pub mod man;
pub mod markdown;
pub mod page;
pub mod token;
pub(crate) mod util;

pub use config::Config;
pub use error::{Error, Result};
pub use man::{PageInfo, Rendered, Rewriter};
pub use markdown::{CommonMark, MarkdownRenderer};
pub use page::{ManPage, Outputs, SourceName};
pub use token::{Attribute, Token, tokenize};

/// A converted manual page: a standalone HTML page and an nroff man page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub html: String,
    pub man: String,
}

/// Convert markdown to both documents with the CommonMark renderer.
pub fn convert(markdown: &str, page: &PageInfo) -> Result<Document> {
    convert_with(&CommonMark, markdown, page)
}

/// Convert markdown to both documents with a custom renderer.
pub fn convert_with<R: MarkdownRenderer + ?Sized>(
    renderer: &R,
    markdown: &str,
    page: &PageInfo,
) -> Result<Document> {
    let html = renderer.render(markdown);
    convert_html(&html, page)
}

/// Convert an already rendered HTML fragment to both documents.
///
/// Nothing is produced if the fragment contains a malformed description list.
pub fn convert_html(html: &str, page: &PageInfo) -> Result<Document> {
    let body = man::rewrite(tokenize(html))?;
    Ok(Document {
        html: man::frame_html(&body.html, page),
        man: man::frame_man(&body.man, page),
    })
}
