//! Build metadata configuration.
//!
//! A small JSON file supplies what the markdown source cannot know about
//! itself: the program version, a fixed date for reproducible builds, the
//! manual name, and values for `@NAME@` placeholders.
//!
//! ```json
//! {
//!   "version": "3.2.3",
//!   "date": "06 Aug 2020",
//!   "substitutions": { "BINDIR": "/usr/bin" }
//! }
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use memchr::memchr;
use serde::Deserialize;

use crate::error::Result;
use crate::man::PageInfo;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Program version, shown in the `.TH` line and available as `@VERSION@`.
    pub version: Option<String>,
    /// Overrides the date derived from the input file.
    pub date: Option<String>,
    /// Manual name shown in the page header (default "User Commands").
    pub manual: Option<String>,
    /// Values for `@NAME@` placeholders.
    pub substitutions: BTreeMap<String, String>,
}

impl Config {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    fn lookup(&self, name: &str) -> Option<&str> {
        if let Some(value) = self.substitutions.get(name) {
            return Some(value);
        }
        match name {
            "VERSION" => self.version.as_deref(),
            _ => None,
        }
    }

    /// Replace every known `@NAME@` placeholder in `text`.
    ///
    /// Unknown placeholders, and `@` signs that do not delimit a name, are
    /// left as they are.
    pub fn substitute<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let bytes = text.as_bytes();
        let mut out = String::new();
        let mut copied = 0;
        let mut pos = 0;

        while let Some(off) = memchr(b'@', &bytes[pos..]) {
            let open = pos + off;
            let Some(len) = memchr(b'@', &bytes[open + 1..]) else {
                break;
            };
            let close = open + 1 + len;
            let name = &text[open + 1..close];

            if is_placeholder_name(name)
                && let Some(value) = self.lookup(name)
            {
                out.push_str(&text[copied..open]);
                out.push_str(value);
                copied = close + 1;
                pos = close + 1;
            } else {
                // The closing '@' may open the next placeholder
                pos = close;
            }
        }

        if copied == 0 {
            return Cow::Borrowed(text);
        }
        out.push_str(&text[copied..]);
        Cow::Owned(out)
    }

    /// Page metadata for `program(section)`, dated `fallback_date` unless the
    /// config fixes the date.
    pub fn page_info(&self, program: &str, section: &str, fallback_date: &str) -> PageInfo {
        let date = self.date.as_deref().unwrap_or(fallback_date);
        let mut page = PageInfo::new(program, section, date);
        page.version = self.version.clone();
        page.manual = self.manual.clone();
        page
    }
}

fn is_placeholder_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::from_json(
            r#"{"version": "1.2.3", "substitutions": {"BINDIR": "/usr/bin", "VERSION": "9"}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Config::from_json(r#"{"verison": "1"}"#).is_err());
    }

    #[test]
    fn test_substitute_known_placeholders() {
        let config = config();
        assert_eq!(
            config.substitute("run @BINDIR@/tool, version @VERSION@"),
            "run /usr/bin/tool, version 9"
        );
    }

    #[test]
    fn test_version_placeholder_falls_back_to_version() {
        let config = Config {
            version: Some("3.2.3".into()),
            ..Config::default()
        };
        assert_eq!(config.substitute("v@VERSION@"), "v3.2.3");
    }

    #[test]
    fn test_substitute_leaves_unknown_and_stray_at_signs() {
        let config = config();
        assert_eq!(
            config.substitute("mail user@host or @UNKNOWN@ @BINDIR@"),
            "mail user@host or @UNKNOWN@ /usr/bin"
        );
        assert!(matches!(config.substitute("no placeholders"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_page_info_uses_config_date() {
        let config = Config {
            date: Some("01 Jan 2020".into()),
            manual: Some("Tools".into()),
            ..Config::default()
        };
        let page = config.page_info("tool", "1", "ignored");
        assert_eq!(page.date, "01 Jan 2020");
        assert_eq!(page.manual.as_deref(), Some("Tools"));
        assert_eq!(config.page_info("tool", "1", "today").version, None);
    }
}
