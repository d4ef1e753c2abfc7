//! HTML → nroff man page transducer.
//!
//! A markdown manual page, once rendered to HTML and tokenized, is rewritten
//! in one pass into two synchronized outputs: a lightly adjusted HTML body and
//! an nroff body using the `man` macros (`.SH`, `.P`, `.IP`, `.RS`/`.RE`,
//! `.nf`/`.fi`).
//!
//! - [`escape`]: pure HTML and nroff escaping
//! - [`font`]: inline font markers, resolved to `\fB`/`\fI`/`\fP` at flush time
//! - [`list`]: nested list context and the description list rule
//! - [`rewrite`]: the tag-driven state machine
//! - [`frame`]: page headers and footers
//!
//! ## Description lists
//!
//! Markdown has no description list, so an ordered list starting at 0 stands
//! in for one. In such a list each item's first child element is the term:
//!
//! ```text
//! 0.  `--verbose`, `-v`
//!
//!     This option increases the amount of information you are given.
//! ```
//!
//! becomes `<dl><dt>…</dt><dd>…</dd></dl>` in HTML and
//! `.IP "\fB--verbose\fP, \fB-v\fP"` followed by the body in nroff. An item
//! with no child element to take the term from is a fatal error.

pub mod escape;
pub mod font;
pub mod frame;
pub mod list;
pub mod rewrite;

pub use escape::{escape_html, manify, quote_macro_arg};
pub use frame::{DEFAULT_MANUAL, PageInfo, frame_html, frame_man};
pub use rewrite::{Rendered, Rewriter, rewrite};
