//! Page headers and footers around the rendered bodies.

use super::escape::{escape_html, manify, quote_macro_arg};

/// Default fifth `.TH` field.
pub const DEFAULT_MANUAL: &str = "User Commands";

const HTML_STYLE: &str = "\
body {
  max-width: 50em;
  margin: auto;
}
body, b, strong, u {
  font-family: sans-serif;
}
code {
  font-family: monospace;
  font-weight: bold;
  white-space: pre;
}
pre code {
  display: block;
  font-weight: normal;
}
blockquote pre code {
  background: #f1f1f1;
}
dd p:first-of-type {
  margin-block-start: 0em;
}
";

/// Metadata of one manual page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    /// Program name, e.g. `rsync`.
    pub program: String,
    /// Manual section, e.g. `1`.
    pub section: String,
    /// Date shown in the page footer.
    pub date: String,
    pub version: Option<String>,
    pub manual: Option<String>,
}

impl PageInfo {
    pub fn new(
        program: impl Into<String>,
        section: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            section: section.into(),
            date: date.into(),
            version: None,
            manual: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_manual(mut self, manual: impl Into<String>) -> Self {
        self.manual = Some(manual.into());
        self
    }

    /// HTML page title, e.g. `rsync(1) man page`.
    pub fn title(&self) -> String {
        format!("{}({}) man page", self.program, self.section)
    }

    /// Source field of the `.TH` line, e.g. `rsync 3.2.3`.
    fn source(&self) -> String {
        match &self.version {
            Some(version) => format!("{} {}", self.program, version),
            None => String::new(),
        }
    }
}

/// Wrap an HTML body into a standalone page.
pub fn frame_html(body: &str, page: &PageInfo) -> String {
    let mut out = String::with_capacity(body.len() + HTML_STYLE.len() + 256);
    out.push_str("<html><head>\n");
    out.push_str(&format!("<title>{}</title>\n", escape_html(&page.title())));
    out.push_str("<meta charset=\"UTF-8\"/>\n");
    out.push_str("<style>\n");
    out.push_str(HTML_STYLE);
    out.push_str("</style>\n");
    out.push_str("</head><body>\n");
    out.push_str(body);
    out.push_str(&format!(
        "<div style=\"float: right\"><p><i>{}</i></p></div>\n",
        escape_html(&page.date)
    ));
    out.push_str("</body></html>\n");
    out
}

/// Wrap an nroff body into a man page.
pub fn frame_man(body: &str, page: &PageInfo) -> String {
    let source = page.source();
    let fields = [
        page.program.as_str(),
        page.section.as_str(),
        page.date.as_str(),
        source.as_str(),
        page.manual.as_deref().unwrap_or(DEFAULT_MANUAL),
    ];
    let mut out = String::with_capacity(body.len() + 128);
    out.push_str(".TH");
    for field in fields {
        out.push_str(" \"");
        out.push_str(&quote_macro_arg(&manify(field)));
        out.push('"');
    }
    out.push('\n');
    out.push_str(body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_man_title_line() {
        let page = PageInfo::new("rsync", "1", "06 Aug 2020").with_version("3.2.3");
        let man = frame_man(".P\nbody\n", &page);
        assert_eq!(
            man,
            ".TH \"rsync\" \"1\" \"06 Aug 2020\" \"rsync 3.2.3\" \"User Commands\"\n.P\nbody\n"
        );
    }

    #[test]
    fn test_man_title_without_version() {
        let page = PageInfo::new("tool", "8", "date").with_manual("System Manager's Manual");
        let man = frame_man("", &page);
        assert_eq!(
            man,
            ".TH \"tool\" \"8\" \"date\" \"\" \"System Manager's Manual\"\n"
        );
    }

    #[test]
    fn test_html_page() {
        let page = PageInfo::new("a<b", "1", "today");
        let html = frame_html("<p>x</p>\n", &page);
        assert!(html.starts_with("<html><head>\n<title>a&lt;b(1) man page</title>\n"));
        assert!(html.contains("</head><body>\n<p>x</p>\n<div style=\"float: right\"><p><i>today</i></p></div>\n"));
        assert!(html.ends_with("</body></html>\n"));
    }
}
