//! Markdown → HTML rendering.
//!
//! The transducer only needs *some* renderer producing the usual CommonMark
//! tag vocabulary, so rendering sits behind the [`MarkdownRenderer`] trait.
//! [`CommonMark`] is the default, backed by `pulldown-cmark`.

use pulldown_cmark::{Options, Parser, html};

/// A capability turning markdown source into an HTML fragment.
pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> String;
}

/// Plain CommonMark rendering (no tables, footnotes or other extensions).
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonMark;

impl MarkdownRenderer for CommonMark {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Options::empty());
        let mut out = String::with_capacity(markdown.len() + markdown.len() / 2);
        html::push_html(&mut out, parser);
        out
    }
}

impl<F> MarkdownRenderer for F
where
    F: Fn(&str) -> String,
{
    fn render(&self, markdown: &str) -> String {
        self(markdown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_start_list_keeps_start_attribute() {
        let html = CommonMark.render("0. `--verbose`\n\n    Say more.\n");
        assert!(html.starts_with("<ol start=\"0\">"));
        assert!(html.contains("<p><code>--verbose</code></p>"));
        assert!(html.contains("<p>Say more.</p>"));
    }

    #[test]
    fn test_default_start_has_no_attribute() {
        let html = CommonMark.render("1. one\n2. two\n");
        assert!(html.starts_with("<ol>"));
    }

    #[test]
    fn test_closure_renderer() {
        let renderer = |md: &str| format!("<p>{md}</p>");
        assert_eq!(renderer.render("x"), "<p>x</p>");
    }
}
